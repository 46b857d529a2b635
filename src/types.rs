// Copyright 2025-present The docrank authors
// SPDX-License-Identifier: Apache-2.0

//! The value records that flow through the ranking pipeline.
//!
//! Ownership moves strictly downstream: the loader builds [`Document`]s, the
//! segmenter turns them into [`Section`]s, the ranker derives ephemeral
//! [`ScoredSection`]s, and the refiner emits [`SubsectionAnalysis`] output
//! units. Nothing here is mutated after construction.
//!
//! # Invariants
//!
//! - **Section**: belongs to exactly one document; `(doc, index)` is unique
//!   within a run; `page_start <= page_end`.
//! - **ScoredSection**: `section` indexes into the section slice it was ranked
//!   from; sub-scores and composite are all in `[0, 1]`.

use serde::{Deserialize, Serialize};

/// Type-safe document identifier.
///
/// Prevents accidentally passing a section index where a document ID is
/// expected. Use `DocId::new()` for runtime-validated construction, or
/// `.into()` for trusted sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct DocId(pub u32);

impl DocId {
    /// Create a new DocId, validating it's within bounds.
    #[inline]
    pub fn new(id: u32, num_docs: usize) -> Option<Self> {
        if (id as usize) < num_docs {
            Some(DocId(id))
        } else {
            None
        }
    }

    /// Get the underlying value.
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    /// Convert to usize for array indexing.
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for DocId {
    fn from(id: u32) -> Self {
        DocId(id)
    }
}

impl From<DocId> for usize {
    fn from(id: DocId) -> Self {
        id.0 as usize
    }
}

/// One parsed text run from a PDF page, as produced by the extraction
/// collaborator. Font metadata drives heading detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    pub text: String,
    pub font_size: f32,
    #[serde(default)]
    pub bold: bool,
    pub page: u32,
}

/// An input document: filename plus its ordered text blocks.
///
/// Immutable once loaded. The `id` reflects load order of the documents that
/// actually loaded, which is what ranking tie-breaks use for "document order".
#[derive(Debug, Clone)]
pub struct Document {
    pub id: DocId,
    pub filename: String,
    pub blocks: Vec<TextBlock>,
}

/// A contiguous span of one document's text under one heading.
///
/// Created by the segmenter and never mutated. `synthetic` marks headings the
/// segmenter invented for content that appeared before any detected heading
/// (or for documents with no headings at all).
#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub doc: DocId,
    /// Filename of the owning document, carried for output assembly.
    pub document: String,
    /// Position within the owning document, 0-based.
    pub index: u32,
    pub heading: String,
    pub synthetic: bool,
    /// Body paragraphs in document order.
    pub body: Vec<String>,
    pub page_start: u32,
    pub page_end: u32,
}

impl Section {
    /// Body paragraphs joined into a single string.
    pub fn body_text(&self) -> String {
        self.body.join(" ")
    }

    /// Heading plus body, the text unit that corpus statistics see.
    pub fn full_text(&self) -> String {
        if self.body.is_empty() {
            self.heading.clone()
        } else {
            format!("{} {}", self.heading, self.body_text())
        }
    }

    /// Word count of the body.
    pub fn body_words(&self) -> usize {
        self.body.iter().map(|p| p.split_whitespace().count()).sum()
    }
}

/// The four independently normalized sub-scores behind a composite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SubScores {
    /// TF-IDF similarity to the extracted job keyword vector.
    pub content: f64,
    /// Weighted match against the persona category's priority keywords.
    pub persona: f64,
    /// TF-IDF similarity to the full job-text term vector.
    pub job: f64,
    /// Length/structure quality heuristic.
    pub quality: f64,
}

/// A section's ranking outcome. Ephemeral: exists only between scoring and
/// output assembly.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredSection {
    /// Index into the section slice passed to the ranker.
    pub section: usize,
    pub scores: SubScores,
    pub composite: f64,
    /// 1-based position in the deterministic total order.
    pub rank: u32,
}

/// Refined sub-section text for one top-ranked section. Final output unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubsectionAnalysis {
    pub document: String,
    pub refined_text: String,
    pub page_number: u32,
    pub rank: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_section() -> Section {
        Section {
            doc: DocId(0),
            document: "report.pdf".to_string(),
            index: 2,
            heading: "Methodology".to_string(),
            synthetic: false,
            body: vec![
                "First paragraph here.".to_string(),
                "Second one.".to_string(),
            ],
            page_start: 3,
            page_end: 4,
        }
    }

    #[test]
    fn doc_id_bounds_check() {
        assert_eq!(DocId::new(2, 3), Some(DocId(2)));
        assert_eq!(DocId::new(3, 3), None);
    }

    #[test]
    fn full_text_includes_heading() {
        let section = make_section();
        assert_eq!(
            section.full_text(),
            "Methodology First paragraph here. Second one."
        );
    }

    #[test]
    fn full_text_of_bodyless_section_is_heading() {
        let mut section = make_section();
        section.body.clear();
        assert_eq!(section.full_text(), "Methodology");
    }

    #[test]
    fn body_words_counts_across_paragraphs() {
        assert_eq!(make_section().body_words(), 5);
    }

    #[test]
    fn parse_block_with_default_bold() {
        let json = r#"{"text": "Overview", "fontSize": 14.0, "page": 1}"#;
        let block: TextBlock = serde_json::from_str(json).unwrap();
        assert!(!block.bold);
        assert_eq!(block.page, 1);
    }
}
