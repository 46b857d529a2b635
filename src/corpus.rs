// Copyright 2025-present The docrank authors
// SPDX-License-Identifier: Apache-2.0

//! Corpus-relative term weighting (TF-IDF over sections).
//!
//! The "document" unit for corpus statistics is the [`Section`], not the
//! whole input document: section-level specificity is what should drive the
//! inverse-frequency term.
//!
//! The API is deliberately two-phase: [`CorpusModel::build`] consumes every
//! section of the run exactly once, and [`CorpusModel::score`] is stateless
//! afterwards. Scores are only comparable within one model instance.
//!
//! # Invariants
//!
//! - `score` always lands in `[0, 1]`.
//! - An empty term vector on either side scores `0` against anything.
//! - IDF is floored at 1.0, so a single-section corpus (df = n for every
//!   term) stays non-degenerate instead of zeroing every weight.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::text::tokenize;
use crate::types::Section;

/// Vocabulary cap. Sections beyond hobby scale produce more distinct terms
/// than scoring ever needs; keeping the most frequent ones bounds both model
/// size and per-score work.
pub const MAX_VOCABULARY: usize = 2000;

/// Frozen term-importance model for one run.
#[derive(Debug, Clone, Serialize)]
pub struct CorpusModel {
    /// term → vocabulary slot
    vocabulary: HashMap<String, usize>,
    /// Per-slot inverse document frequency, aligned with vocabulary slots.
    idf: Vec<f64>,
    /// Number of sections the model was built from.
    sections: usize,
}

impl CorpusModel {
    /// Build the model from every section in the run.
    ///
    /// Must be called with *all* sections before any score is computed.
    /// A zero-section input yields a model that scores 0 for everything.
    pub fn build(sections: &[Section]) -> CorpusModel {
        let mut doc_freq: HashMap<String, usize> = HashMap::new();
        let mut corpus_freq: HashMap<String, usize> = HashMap::new();

        for section in sections {
            let terms = tokenize(&section.full_text());
            let mut seen: HashSet<&str> = HashSet::new();
            for term in &terms {
                *corpus_freq.entry(term.clone()).or_insert(0) += 1;
                if seen.insert(term.as_str()) {
                    *doc_freq.entry(term.clone()).or_insert(0) += 1;
                }
            }
        }

        // Cap the vocabulary: keep the highest corpus frequency, break ties
        // by shorter term first, then lexicographically.
        let mut ranked: Vec<(String, usize)> = corpus_freq.into_iter().collect();
        ranked.sort_by(|(a_term, a_freq), (b_term, b_freq)| {
            b_freq
                .cmp(a_freq)
                .then(a_term.len().cmp(&b_term.len()))
                .then(a_term.cmp(b_term))
        });
        ranked.truncate(MAX_VOCABULARY);

        let total = sections.len();
        let mut vocabulary = HashMap::with_capacity(ranked.len());
        let mut idf = Vec::with_capacity(ranked.len());
        for (slot, (term, _)) in ranked.into_iter().enumerate() {
            let df = doc_freq.get(&term).copied().unwrap_or(1).max(1);
            idf.push(inverse_document_frequency(total, df));
            vocabulary.insert(term, slot);
        }

        CorpusModel {
            vocabulary,
            idf,
            sections: total,
        }
    }

    /// Number of terms in the capped vocabulary.
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Number of sections the model was built from.
    pub fn section_count(&self) -> usize {
        self.sections
    }

    /// Cosine similarity of the TF-IDF vectors of two term lists, in
    /// `[0, 1]`. Either side weighing to an empty vector scores 0.
    pub fn score(&self, terms: &[String], query: &[String]) -> f64 {
        let a = self.weigh(terms);
        let b = self.weigh(query);
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }

        // Iterate the smaller map for the dot product.
        let (small, large) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };
        let dot: f64 = small
            .iter()
            .filter_map(|(slot, w)| large.get(slot).map(|v| w * v))
            .sum();
        let norm_a: f64 = a.values().map(|w| w * w).sum::<f64>().sqrt();
        let norm_b: f64 = b.values().map(|w| w * w).sum::<f64>().sqrt();
        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }
        (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
    }

    /// Sparse TF-IDF vector over vocabulary slots. Terms outside the
    /// vocabulary are dropped.
    fn weigh(&self, terms: &[String]) -> HashMap<usize, f64> {
        let mut counts: HashMap<usize, usize> = HashMap::new();
        let mut in_vocab = 0usize;
        for term in terms {
            if let Some(&slot) = self.vocabulary.get(term) {
                *counts.entry(slot).or_insert(0) += 1;
                in_vocab += 1;
            }
        }
        if in_vocab == 0 {
            return HashMap::new();
        }
        counts
            .into_iter()
            .map(|(slot, count)| {
                let tf = count as f64 / in_vocab as f64;
                (slot, tf * self.idf[slot])
            })
            .collect()
    }
}

/// `1 + ln(n/df)`, floored at 1.0.
///
/// The floor keeps a term that appears in every section (df = n) at a
/// neutral weight instead of zero, which matters for single-section corpora.
fn inverse_document_frequency(total_sections: usize, doc_freq: usize) -> f64 {
    if total_sections == 0 || doc_freq == 0 {
        return 1.0;
    }
    (1.0 + (total_sections as f64 / doc_freq as f64).ln()).max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DocId;

    fn section(doc: u32, index: u32, heading: &str, body: &str) -> Section {
        Section {
            doc: DocId(doc),
            document: format!("doc{}.pdf", doc),
            index,
            heading: heading.to_string(),
            synthetic: false,
            body: vec![body.to_string()],
            page_start: 1,
            page_end: 1,
        }
    }

    fn terms(text: &str) -> Vec<String> {
        tokenize(text)
    }

    #[test]
    fn score_is_in_unit_interval() {
        let sections = vec![
            section(0, 0, "Methodology", "literature review methods and analysis"),
            section(0, 1, "Appendix", "tables and figures listing"),
        ];
        let model = CorpusModel::build(&sections);
        let s = model.score(
            &terms("literature review methods"),
            &terms("conduct a literature review"),
        );
        assert!(s > 0.0 && s <= 1.0, "score {} out of range", s);
    }

    #[test]
    fn empty_query_scores_zero() {
        let sections = vec![section(0, 0, "Intro", "some content words here")];
        let model = CorpusModel::build(&sections);
        assert_eq!(model.score(&terms("content words"), &[]), 0.0);
        assert_eq!(model.score(&[], &terms("content")), 0.0);
    }

    #[test]
    fn out_of_vocabulary_query_scores_zero() {
        let sections = vec![section(0, 0, "Intro", "alpha beta gamma")];
        let model = CorpusModel::build(&sections);
        assert_eq!(
            model.score(&terms("alpha beta"), &terms("zeta omega unknown")),
            0.0
        );
    }

    #[test]
    fn identical_vectors_score_one() {
        let sections = vec![
            section(0, 0, "One", "alpha beta gamma delta"),
            section(0, 1, "Two", "epsilon zeta eta theta"),
        ];
        let model = CorpusModel::build(&sections);
        let same = terms("alpha beta gamma delta");
        let s = model.score(&same, &same);
        assert!((s - 1.0).abs() < 1e-9, "self-similarity was {}", s);
    }

    #[test]
    fn single_section_corpus_stays_nondegenerate() {
        let sections = vec![section(0, 0, "Only", "solitary section content here")];
        let model = CorpusModel::build(&sections);
        // df == n for every term; the idf floor keeps weights nonzero.
        let s = model.score(&terms("solitary section content"), &terms("solitary content"));
        assert!(s > 0.0);
        assert!(s <= 1.0);
    }

    #[test]
    fn rare_term_outweighs_common_term() {
        let sections = vec![
            section(0, 0, "A", "shared rareterm"),
            section(0, 1, "B", "shared other"),
            section(0, 2, "C", "shared another"),
        ];
        let model = CorpusModel::build(&sections);
        let rare = model.score(&terms("shared rareterm"), &terms("rareterm"));
        let common = model.score(&terms("shared rareterm"), &terms("shared"));
        assert!(rare > common);
    }

    #[test]
    fn idf_floor_applies_at_full_document_frequency() {
        assert!((inverse_document_frequency(5, 5) - 1.0).abs() < 1e-12);
        assert!(inverse_document_frequency(5, 1) > 1.0);
        assert!((inverse_document_frequency(0, 0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_section_model_scores_zero() {
        let model = CorpusModel::build(&[]);
        assert_eq!(model.vocabulary_len(), 0);
        assert_eq!(model.score(&terms("anything"), &terms("anything")), 0.0);
    }
}
