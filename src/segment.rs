// Copyright 2025-present The docrank authors
// SPDX-License-Identifier: Apache-2.0

//! Section segmentation: per-page text blocks in, ordered [`Section`]s out.
//!
//! A block becomes a heading when its font size clearly exceeds the
//! document's body-text mode, when it is bold and short at body size, or when
//! it matches one of a fixed set of heading shapes (numbered outlines, Roman
//! numerals, chapter/section keywords, short ALL-CAPS lines). Everything else
//! aggregates into the body of the most recent heading.
//!
//! Degenerate inputs stay usable: content before the first heading lands in a
//! synthetic "Introduction" section, a document with no headings at all
//! becomes exactly one section spanning its whole text, and an empty block
//! list yields an empty section list rather than an error.

use crate::types::{Document, Section, TextBlock};

/// How far (in points) a block's font size must exceed the document's
/// body-text mode before size alone makes it a heading.
pub const HEADING_SIZE_DELTA: f32 = 2.0;

/// Bold blocks longer than this many words are body text, not headings.
pub const MAX_HEADING_WORDS: usize = 15;

/// ALL-CAPS lines longer than this many words are not treated as headings.
pub const MAX_CAPS_HEADING_WORDS: usize = 8;

/// Heading assigned to content that precedes any detected heading.
pub const SYNTHETIC_HEADING: &str = "Introduction";

/// Blocks shorter than this (after trimming) are extraction noise and skipped.
const MIN_BLOCK_LEN: usize = 3;

/// Segment one document into ordered sections.
///
/// Returns an empty vector for a document with no usable blocks; the caller
/// continues with the remaining documents.
pub fn segment(doc: &Document) -> Vec<Section> {
    let blocks: Vec<&TextBlock> = doc
        .blocks
        .iter()
        .filter(|b| b.text.trim().len() >= MIN_BLOCK_LEN)
        .collect();
    if blocks.is_empty() {
        return Vec::new();
    }

    let body_mode = font_size_mode(&blocks);

    let mut sections: Vec<Section> = Vec::new();
    let mut current: Option<Section> = None;

    for block in blocks {
        let text = block.text.trim();
        if is_heading(text, block.font_size, block.bold, body_mode) {
            if let Some(done) = current.take() {
                sections.push(done);
            }
            current = Some(new_section(
                doc,
                sections.len() as u32,
                clean_title(text),
                false,
                block.page,
            ));
        } else {
            let section = current.get_or_insert_with(|| {
                new_section(
                    doc,
                    sections.len() as u32,
                    SYNTHETIC_HEADING.to_string(),
                    true,
                    block.page,
                )
            });
            section.body.push(clean_paragraph(text));
            section.page_end = section.page_end.max(block.page);
        }
    }
    if let Some(done) = current.take() {
        sections.push(done);
    }

    sections
}

fn new_section(doc: &Document, index: u32, heading: String, synthetic: bool, page: u32) -> Section {
    Section {
        doc: doc.id,
        document: doc.filename.clone(),
        index,
        heading,
        synthetic,
        body: Vec::new(),
        page_start: page,
        page_end: page,
    }
}

/// Most frequent font size across usable blocks, the document's body-text
/// size. Sizes are bucketed to tenths of a point; frequency ties resolve to
/// the smaller size since body text outnumbers and undercuts headings.
fn font_size_mode(blocks: &[&TextBlock]) -> f32 {
    let mut counts: Vec<(u32, usize)> = Vec::new();
    for block in blocks {
        let bucket = (block.font_size * 10.0).round().max(0.0) as u32;
        match counts.iter_mut().find(|(b, _)| *b == bucket) {
            Some((_, n)) => *n += 1,
            None => counts.push((bucket, 1)),
        }
    }
    counts
        .iter()
        .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))
        .map_or(12.0, |(bucket, _)| *bucket as f32 / 10.0)
}

/// Heading classification for one block.
fn is_heading(text: &str, font_size: f32, bold: bool, body_mode: f32) -> bool {
    let words = text.split_whitespace().count();

    if font_size > body_mode + HEADING_SIZE_DELTA {
        return true;
    }
    if bold && font_size >= body_mode && words <= MAX_HEADING_WORDS {
        return true;
    }
    if matches_heading_pattern(text) {
        return true;
    }
    // Short ALL-CAPS line at body size or above
    is_all_caps(text) && words <= MAX_CAPS_HEADING_WORDS && font_size >= body_mode
}

/// Structural heading shapes that hold regardless of font metadata.
fn matches_heading_pattern(text: &str) -> bool {
    numbered_outline(text) || roman_numeral_prefix(text) || chapter_keyword(text) || {
        // ALL-CAPS of letters and spaces only, at least six characters
        text.len() >= 6
            && is_all_caps(text)
            && text.chars().all(|c| c.is_ascii_uppercase() || c == ' ')
            && text.split_whitespace().count() <= MAX_CAPS_HEADING_WORDS
    }
}

/// `1. Introduction`, `2.3 Methods`, `4.1.2 Detail` style markers.
fn numbered_outline(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut i = 0;
    if !bytes.first().is_some_and(u8::is_ascii_digit) {
        return false;
    }
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    // `1.2` / `4.1.2` subsection numbers; a dot not followed by a digit is a
    // trailing `1.` marker.
    let mut infix_dot = false;
    while i < bytes.len() && bytes[i] == b'.' {
        if bytes.get(i + 1).is_some_and(u8::is_ascii_digit) {
            infix_dot = true;
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
        } else {
            i += 1;
            break;
        }
    }
    if !bytes.get(i).is_some_and(u8::is_ascii_whitespace) {
        return false;
    }
    // Subsection numbers are headings on their own; a bare `1 ` or `1. `
    // additionally needs an uppercase start to the title.
    infix_dot
        || text[i..]
            .trim_start()
            .chars()
            .next()
            .is_some_and(char::is_uppercase)
}

/// `IV. Results` style markers.
fn roman_numeral_prefix(text: &str) -> bool {
    let prefix: String = text
        .chars()
        .take_while(|c| matches!(c, 'I' | 'V' | 'X' | 'L' | 'C' | 'D' | 'M'))
        .collect();
    !prefix.is_empty() && text[prefix.len()..].starts_with(". ")
}

/// `Chapter 3`, `Section 2`, `Part IV`, `Module 1`, `Appendix A` markers.
fn chapter_keyword(text: &str) -> bool {
    let mut parts = text.split_whitespace();
    let Some(first) = parts.next() else {
        return false;
    };
    let keyword = matches!(
        first.to_ascii_lowercase().as_str(),
        "chapter" | "section" | "part" | "module" | "appendix"
    );
    if !keyword {
        return false;
    }
    parts.next().is_some_and(|label| {
        label
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit() || (c.is_ascii_uppercase() && label.len() <= 3))
    })
}

fn is_all_caps(text: &str) -> bool {
    let mut saw_alpha = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if c.is_lowercase() {
                return false;
            }
            saw_alpha = true;
        }
    }
    saw_alpha
}

/// Collapse whitespace, strip trailing punctuation, and title-case long
/// ALL-CAPS headings.
fn clean_title(title: &str) -> String {
    let collapsed = title.split_whitespace().collect::<Vec<_>>().join(" ");
    let trimmed = collapsed.trim_end_matches(['.', ':']).to_string();
    if trimmed.len() > 10 && is_all_caps(&trimmed) {
        title_case(&trimmed)
    } else {
        trimmed
    }
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Collapse whitespace within a body paragraph.
fn clean_paragraph(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
