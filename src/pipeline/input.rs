// Copyright 2025-present The docrank authors
// SPDX-License-Identifier: Apache-2.0

//! Block-file loading.
//!
//! Each configured document has a companion `documents/<filename>.json` file
//! holding the extracted text blocks. A missing or malformed file gets the
//! document skipped with a warning; the run continues with whatever loaded.
//! Document IDs reflect the order of the documents that actually loaded.

use std::path::Path;

#[cfg(feature = "parallel")]
use indicatif::ProgressBar;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use serde::Deserialize;

use crate::config::RunConfig;
use crate::types::{DocId, Document, TextBlock};

/// Subdirectory of the input directory holding block files.
const DOCUMENTS_DIR: &str = "documents";

/// On-disk shape of one block file.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocumentFile {
    #[serde(default)]
    blocks: Vec<TextBlock>,
}

/// What came back from loading: the documents that parsed, and the filenames
/// that did not.
pub struct LoadOutcome {
    pub documents: Vec<Document>,
    pub skipped: Vec<String>,
}

/// Load every configured document's block file, skipping failures.
pub fn load_documents(
    input_dir: &Path,
    config: &RunConfig,
    #[cfg(feature = "parallel")] progress: &ProgressBar,
) -> LoadOutcome {
    #[cfg(feature = "parallel")]
    let parsed: Vec<(String, Option<Vec<TextBlock>>)> = config
        .documents
        .par_iter()
        .map(|filename| {
            let loaded = load_one(input_dir, filename);
            progress.inc(1);
            (filename.clone(), loaded)
        })
        .collect();

    #[cfg(not(feature = "parallel"))]
    let parsed: Vec<(String, Option<Vec<TextBlock>>)> = config
        .documents
        .iter()
        .map(|filename| (filename.clone(), load_one(input_dir, filename)))
        .collect();

    // IDs are assigned after the parallel phase so they stay stable in
    // config order regardless of completion order.
    let mut documents = Vec::new();
    let mut skipped = Vec::new();
    for (filename, blocks) in parsed {
        match blocks {
            Some(blocks) => {
                documents.push(Document {
                    id: DocId(documents.len() as u32),
                    filename,
                    blocks,
                });
            }
            None => skipped.push(filename),
        }
    }

    LoadOutcome { documents, skipped }
}

fn load_one(input_dir: &Path, filename: &str) -> Option<Vec<TextBlock>> {
    let path = input_dir
        .join(DOCUMENTS_DIR)
        .join(format!("{}.json", filename));
    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("⚠️  Skipping {}: {}", filename, e);
            return None;
        }
    };
    match serde_json::from_str::<DocumentFile>(&content) {
        Ok(file) => Some(file.blocks),
        Err(e) => {
            eprintln!("⚠️  Skipping {}: invalid JSON ({})", filename, e);
            None
        }
    }
}
