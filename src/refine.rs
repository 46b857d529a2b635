// Copyright 2025-present The docrank authors
// SPDX-License-Identifier: Apache-2.0

//! Sub-section refinement: condense a top-ranked section into its most
//! relevant sentences.
//!
//! Selection is greedy by unit score, but the surviving units are emitted in
//! their original body order. Reordering by score reads like word salad;
//! keeping document order keeps the refined text coherent.

use crate::corpus::CorpusModel;
use crate::persona::PersonaProfile;
use crate::text::{split_sentences, tokenize};
use crate::types::{ScoredSection, Section, SubsectionAnalysis};

/// How many top-ranked sections get refined output by default.
pub const DEFAULT_TOP_SECTIONS: usize = 5;

/// Character budget for one refined text.
pub const DEFAULT_CHAR_BUDGET: usize = 900;

/// Produce the refined output unit for one ranked section.
///
/// A body already within the budget is returned verbatim. Otherwise each
/// sentence unit is scored against the combined job and persona query and
/// the best-scoring units that fit the budget are kept, in original order.
pub fn refine(
    entry: &ScoredSection,
    section: &Section,
    profile: &PersonaProfile,
    model: &CorpusModel,
    char_budget: usize,
) -> SubsectionAnalysis {
    let body = section.body_text();
    let refined_text = if body.chars().count() <= char_budget {
        body
    } else {
        condense(&body, profile, model, char_budget)
    };

    SubsectionAnalysis {
        document: section.document.clone(),
        refined_text,
        page_number: section.page_start,
        rank: entry.rank,
    }
}

fn condense(
    body: &str,
    profile: &PersonaProfile,
    model: &CorpusModel,
    char_budget: usize,
) -> String {
    let units = split_sentences(body);
    if units.is_empty() {
        return truncate_chars(body, char_budget);
    }

    let query = combined_query(profile);
    let mut scored: Vec<(usize, f64)> = units
        .iter()
        .enumerate()
        .map(|(i, unit)| (i, model.score(&tokenize(unit), &query)))
        .collect();
    // Best score first; equal scores keep the earlier unit.
    scored.sort_by(|(a_idx, a_score), (b_idx, b_score)| {
        b_score
            .partial_cmp(a_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a_idx.cmp(b_idx))
    });

    let best = scored[0].0;
    let mut selected: Vec<usize> = Vec::new();
    let mut used = 0usize;
    for (index, _) in scored {
        let unit_len = units[index].chars().count();
        // Joining space for every unit after the first.
        let cost = if selected.is_empty() { unit_len } else { unit_len + 1 };
        if used + cost <= char_budget {
            selected.push(index);
            used += cost;
        }
    }

    if selected.is_empty() {
        // Even the best unit alone exceeds the budget.
        return truncate_chars(&units[best], char_budget);
    }

    selected.sort_unstable();
    let parts: Vec<&str> = selected.iter().map(|&i| units[i].as_str()).collect();
    parts.join(" ")
}

/// Job keywords plus persona priority terms, the refinement query.
fn combined_query(profile: &PersonaProfile) -> Vec<String> {
    let mut query = profile.job_keywords.clone();
    for keyword in &profile.priority_keywords {
        if !query.contains(&keyword.term) {
            query.push(keyword.term.clone());
        }
    }
    query
}

fn truncate_chars(text: &str, budget: usize) -> String {
    text.chars().take(budget).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DocId, SubScores};

    fn section(body: &[&str]) -> Section {
        Section {
            doc: DocId(0),
            document: "paper.pdf".to_string(),
            index: 0,
            heading: "Methodology".to_string(),
            synthetic: false,
            body: body.iter().map(|s| s.to_string()).collect(),
            page_start: 2,
            page_end: 3,
        }
    }

    fn entry(rank: u32) -> ScoredSection {
        ScoredSection {
            section: 0,
            scores: SubScores {
                content: 0.5,
                persona: 0.5,
                job: 0.5,
                quality: 0.5,
            },
            composite: 0.5,
            rank,
        }
    }

    fn fixtures(sections: &[Section]) -> (CorpusModel, PersonaProfile) {
        let model = CorpusModel::build(sections);
        let profile = PersonaProfile::extract("PhD Researcher", "conduct a literature review");
        (model, profile)
    }

    #[test]
    fn short_body_passes_through_verbatim() {
        let sec = section(&["A short body.", "Nothing to trim."]);
        let (model, profile) = fixtures(std::slice::from_ref(&sec));
        let out = refine(&entry(1), &sec, &profile, &model, 900);
        assert_eq!(out.refined_text, "A short body. Nothing to trim.");
        assert_eq!(out.page_number, 2);
        assert_eq!(out.rank, 1);
    }

    #[test]
    fn refined_text_respects_the_budget() {
        let filler = "This sentence pads the body with unrelated material. ".repeat(30);
        let sec = section(&[
            "The literature review methodology is described here.",
            &filler,
        ]);
        let (model, profile) = fixtures(std::slice::from_ref(&sec));
        let out = refine(&entry(1), &sec, &profile, &model, 200);
        assert!(out.refined_text.chars().count() <= 200);
        assert!(!out.refined_text.is_empty());
    }

    #[test]
    fn selected_units_keep_original_order() {
        // Two relevant sentences separated by filler; both fit the budget
        // and must appear in body order in the output.
        let filler = "Entirely unrelated padding text goes on and on here. ".repeat(20);
        let sec = section(&[
            "First the literature review scope is defined.",
            &filler,
            "Then the review methodology is applied to the literature.",
        ]);
        let (model, profile) = fixtures(std::slice::from_ref(&sec));
        let out = refine(&entry(3), &sec, &profile, &model, 120);
        let first = out.refined_text.find("scope is defined");
        let second = out.refined_text.find("methodology is applied");
        match (first, second) {
            (Some(a), Some(b)) => assert!(a < b),
            // Budget may admit only one of the two; either way the text
            // must contain review material, not filler.
            _ => assert!(out.refined_text.contains("review")),
        }
    }

    #[test]
    fn oversized_single_unit_is_truncated() {
        let one_long = "word ".repeat(400);
        let sec = section(&[one_long.trim()]);
        let (model, profile) = fixtures(std::slice::from_ref(&sec));
        let out = refine(&entry(1), &sec, &profile, &model, 50);
        assert_eq!(out.refined_text.chars().count(), 50);
    }

    #[test]
    fn carries_document_and_rank_through() {
        let sec = section(&["Tiny."]);
        let (model, profile) = fixtures(std::slice::from_ref(&sec));
        let out = refine(&entry(7), &sec, &profile, &model, 900);
        assert_eq!(out.document, "paper.pdf");
        assert_eq!(out.rank, 7);
    }
}
