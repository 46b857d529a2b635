// Copyright 2025-present The docrank authors
// SPDX-License-Identifier: Apache-2.0

//! Output assembly and atomic writing of `analysis.json`.
//!
//! The file is written to a temporary sibling and renamed into place, so a
//! run that fails mid-write leaves no partial output behind.

use std::path::Path;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;
use crate::types::{ScoredSection, Section, SubsectionAnalysis};

/// Cap on the ranked section list emitted in the output.
pub const MAX_EXTRACTED_SECTIONS: usize = 20;

/// Run provenance carried in the output file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunMetadata {
    pub input_documents: Vec<String>,
    pub persona: String,
    pub job_to_be_done: String,
    /// RFC 3339, UTC.
    pub processing_timestamp: String,
    #[serde(default)]
    pub skipped_documents: Vec<String>,
    pub total_sections: usize,
}

impl RunMetadata {
    pub fn new(
        input_documents: Vec<String>,
        persona: String,
        job_to_be_done: String,
        skipped_documents: Vec<String>,
        total_sections: usize,
    ) -> RunMetadata {
        RunMetadata {
            input_documents,
            persona,
            job_to_be_done,
            processing_timestamp: Utc::now().to_rfc3339(),
            skipped_documents,
            total_sections,
        }
    }
}

/// One entry of the ranked section list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedSection {
    pub document: String,
    pub section_title: String,
    pub page_number: u32,
    pub importance_rank: u32,
}

impl ExtractedSection {
    pub fn from_ranked(entry: &ScoredSection, section: &Section) -> ExtractedSection {
        ExtractedSection {
            document: section.document.clone(),
            section_title: section.heading.clone(),
            page_number: section.page_start,
            importance_rank: entry.rank,
        }
    }
}

/// The complete output document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub metadata: RunMetadata,
    pub extracted_sections: Vec<ExtractedSection>,
    pub subsection_analysis: Vec<SubsectionAnalysis>,
}

/// Serialize and write the result atomically: temp file first, then rename.
pub fn write_atomic(path: &Path, result: &AnalysisResult) -> Result<(), PipelineError> {
    let json = serde_json::to_vec_pretty(result)?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp_path = Path::new(&tmp);

    std::fs::write(tmp_path, &json)?;
    if let Err(e) = std::fs::rename(tmp_path, path) {
        // Don't leave the temp file around on a failed rename.
        let _ = std::fs::remove_file(tmp_path);
        return Err(e.into());
    }
    Ok(())
}
