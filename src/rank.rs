// Copyright 2025-present The docrank authors
// SPDX-License-Identifier: Apache-2.0

//! Composite scoring and deterministic ranking of sections.
//!
//! Each section gets four independently normalized sub-scores which are
//! blended with fixed weights. The final order is total and deterministic:
//! composite descending, ties broken by document order then in-document
//! section order, so floating-point coincidences can never make two runs
//! disagree.

use crate::corpus::CorpusModel;
use crate::persona::PersonaProfile;
use crate::text::tokenize;
use crate::types::{ScoredSection, Section, SubScores};

/// Composite blend weights. They sum to 1.0 so the composite stays in [0, 1].
pub const WEIGHT_CONTENT: f64 = 0.3;
pub const WEIGHT_PERSONA: f64 = 0.3;
pub const WEIGHT_JOB: f64 = 0.3;
pub const WEIGHT_QUALITY: f64 = 0.1;

/// Per-keyword frequency cap for persona alignment. Repeating a priority
/// term beyond this earns nothing, which blunts keyword stuffing.
const PERSONA_FREQ_CAP: usize = 3;

const QUALITY_LENGTH_WEIGHT: f64 = 0.6;
const QUALITY_STRUCTURE_WEIGHT: f64 = 0.4;

/// Body length above which the length signal saturates.
const QUALITY_LENGTH_CAP_WORDS: usize = 300;

/// Score and order all sections. Returns the full ranking, composite
/// descending, with 1-based ranks assigned. Zero sections in, zero out.
pub fn rank(
    sections: &[Section],
    model: &CorpusModel,
    profile: &PersonaProfile,
) -> Vec<ScoredSection> {
    let mut scored: Vec<ScoredSection> = sections
        .iter()
        .enumerate()
        .map(|(i, section)| {
            let scores = score_section(section, model, profile);
            let composite = WEIGHT_CONTENT * scores.content
                + WEIGHT_PERSONA * scores.persona
                + WEIGHT_JOB * scores.job
                + WEIGHT_QUALITY * scores.quality;
            ScoredSection {
                section: i,
                scores,
                composite,
                rank: 0,
            }
        })
        .collect();

    scored.sort_by(|a, b| {
        let sa = &sections[a.section];
        let sb = &sections[b.section];
        b.composite
            .partial_cmp(&a.composite)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(sa.doc.cmp(&sb.doc))
            .then(sa.index.cmp(&sb.index))
    });
    for (position, entry) in scored.iter_mut().enumerate() {
        entry.rank = position as u32 + 1;
    }
    scored
}

fn score_section(
    section: &Section,
    model: &CorpusModel,
    profile: &PersonaProfile,
) -> SubScores {
    let terms = tokenize(&section.full_text());
    SubScores {
        content: model.score(&terms, &profile.job_keywords),
        persona: persona_alignment(&terms, profile),
        job: model.score(&terms, &profile.job_terms),
        quality: quality(section),
    }
}

/// Weighted fraction of the persona's priority vocabulary present in the
/// section, with per-keyword frequency capped. Normalized so that a section
/// hitting every priority keyword at the cap scores exactly 1.0.
fn persona_alignment(section_terms: &[String], profile: &PersonaProfile) -> f64 {
    if profile.priority_keywords.is_empty() {
        return 0.0;
    }
    let mut achieved = 0.0;
    let mut achievable = 0.0;
    for keyword in &profile.priority_keywords {
        let count = section_terms.iter().filter(|t| **t == keyword.term).count();
        achieved += keyword.weight * count.min(PERSONA_FREQ_CAP) as f64;
        achievable += keyword.weight * PERSONA_FREQ_CAP as f64;
    }
    if achievable == 0.0 {
        0.0
    } else {
        (achieved / achievable).clamp(0.0, 1.0)
    }
}

/// Length/structure quality heuristic in [0, 1].
///
/// Length follows a square-root curve with diminishing returns, saturating
/// at [`QUALITY_LENGTH_CAP_WORDS`]. Structure is the fraction of three
/// binary signals: an embedded sub-heading-like line, list markers, and
/// numeric data.
fn quality(section: &Section) -> f64 {
    let words = section.body_words();
    let length = ((words.min(QUALITY_LENGTH_CAP_WORDS) as f64)
        / QUALITY_LENGTH_CAP_WORDS as f64)
        .sqrt();

    let mut signals = 0u32;
    if section.body.iter().any(|p| looks_like_subheading(p)) {
        signals += 1;
    }
    if section.body.iter().any(|p| has_list_marker(p)) {
        signals += 1;
    }
    if section
        .body
        .iter()
        .any(|p| p.chars().any(|c| c.is_ascii_digit()))
    {
        signals += 1;
    }
    let structure = f64::from(signals) / 3.0;

    QUALITY_LENGTH_WEIGHT * length + QUALITY_STRUCTURE_WEIGHT * structure
}

/// A short paragraph in title or upper case, i.e. a sub-heading the
/// segmenter left embedded in the body.
fn looks_like_subheading(paragraph: &str) -> bool {
    let words: Vec<&str> = paragraph.split_whitespace().collect();
    if words.is_empty() || words.len() > 8 {
        return false;
    }
    words
        .iter()
        .all(|w| w.chars().next().is_some_and(char::is_uppercase))
}

fn has_list_marker(paragraph: &str) -> bool {
    let trimmed = paragraph.trim_start();
    if trimmed.starts_with('-') || trimmed.starts_with('•') || trimmed.starts_with('*') {
        return true;
    }
    // "1." / "2)" style enumeration.
    let bytes = trimmed.as_bytes();
    let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    digits > 0 && matches!(bytes.get(digits), Some(b'.') | Some(b')'))
}
