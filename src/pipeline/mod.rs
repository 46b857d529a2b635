// Copyright 2025-present The docrank authors
// SPDX-License-Identifier: Apache-2.0

//! The batch ranking pipeline.
//!
//! One synchronous pass: load config → load block files → segment → build the
//! corpus model → extract the persona profile → rank → refine → write output.
//! Per-document loading and segmentation fan out with rayon under the
//! `parallel` feature; the corpus build is the single barrier that everything
//! upstream must reach first.

pub mod input;
pub mod output;

use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::RunConfig;
use crate::corpus::CorpusModel;
use crate::error::PipelineError;
use crate::persona::PersonaProfile;
use crate::rank::rank;
use crate::refine::refine;
use crate::segment::segment;
use crate::types::{Document, Section, SubsectionAnalysis};

use output::{AnalysisResult, ExtractedSection, RunMetadata};

/// Name of the configuration file inside the input directory.
const CONFIG_FILE: &str = "config.json";

/// Knobs for one ranking run.
#[derive(Debug, Clone)]
pub struct RankOptions {
    pub input_dir: PathBuf,
    pub output_path: PathBuf,
    /// Cap on the emitted ranked section list.
    pub top_sections: usize,
    /// How many top sections get refined sub-section output.
    pub refine_top: usize,
    /// Character budget per refined text.
    pub char_budget: usize,
}

/// Per-document segmentation statistics, for `inspect`.
#[derive(Debug, Clone)]
pub struct DocumentStats {
    pub filename: String,
    pub sections: usize,
    pub detected_headings: usize,
    pub synthetic_sections: usize,
    pub pages: u32,
    pub words: usize,
}

#[cfg(feature = "parallel")]
fn create_progress_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {pos}/{len} {msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("━━╸")
}

/// Run the full pipeline and write `analysis.json`.
///
/// Fatal failures return an error and leave no output file behind; skipped
/// documents degrade the run but are recorded in the output metadata.
pub fn run_rank(options: &RankOptions) -> Result<(), PipelineError> {
    let config = RunConfig::load(&options.input_dir.join(CONFIG_FILE))?;

    #[cfg(feature = "parallel")]
    let multi = MultiProgress::new();

    // 1. Load block files, skipping unreadable ones.
    #[cfg(feature = "parallel")]
    let load_pb = multi.add(ProgressBar::new(config.documents.len() as u64));
    #[cfg(feature = "parallel")]
    load_pb.set_style(create_progress_style());
    #[cfg(feature = "parallel")]
    load_pb.set_prefix("Loading");
    #[cfg(feature = "parallel")]
    load_pb.set_message("documents...");

    let outcome = input::load_documents(
        &options.input_dir,
        &config,
        #[cfg(feature = "parallel")]
        &load_pb,
    );

    #[cfg(feature = "parallel")]
    load_pb.finish_with_message(format!(
        "loaded {} documents ({} skipped)",
        outcome.documents.len(),
        outcome.skipped.len()
    ));

    // 2. Segment every document. The corpus model needs all sections, so
    // this completes before any scoring starts.
    #[cfg(feature = "parallel")]
    let segment_pb = multi.add(ProgressBar::new(outcome.documents.len() as u64));
    #[cfg(feature = "parallel")]
    segment_pb.set_style(create_progress_style());
    #[cfg(feature = "parallel")]
    segment_pb.set_prefix("Segmenting");

    let sections = segment_all(
        &outcome.documents,
        #[cfg(feature = "parallel")]
        &segment_pb,
    );

    #[cfg(feature = "parallel")]
    segment_pb.finish_with_message(format!("{} sections", sections.len()));

    if sections.is_empty() {
        return Err(PipelineError::EmptyCorpus);
    }

    // 3. Model, profile, ranking.
    let model = CorpusModel::build(&sections);
    let profile = PersonaProfile::extract(&config.persona, &config.job_to_be_done);
    let ranked = rank(&sections, &model, &profile);

    // 4. Assemble the output.
    let extracted: Vec<ExtractedSection> = ranked
        .iter()
        .take(options.top_sections)
        .map(|entry| ExtractedSection::from_ranked(entry, &sections[entry.section]))
        .collect();

    let subsections: Vec<SubsectionAnalysis> = ranked
        .iter()
        .take(options.refine_top)
        .map(|entry| {
            refine(
                entry,
                &sections[entry.section],
                &profile,
                &model,
                options.char_budget,
            )
        })
        .collect();

    let result = AnalysisResult {
        metadata: RunMetadata::new(
            config.documents.clone(),
            config.persona.clone(),
            config.job_to_be_done.clone(),
            outcome.skipped.clone(),
            sections.len(),
        ),
        extracted_sections: extracted,
        subsection_analysis: subsections,
    };

    output::write_atomic(&options.output_path, &result)?;

    eprintln!();
    eprintln!("✅ Analysis complete");
    eprintln!(
        "   {} documents │ {} sections │ {} ranked │ {} refined",
        outcome.documents.len(),
        sections.len(),
        result.extracted_sections.len(),
        result.subsection_analysis.len()
    );
    if !outcome.skipped.is_empty() {
        eprintln!("   ⚠️  skipped: {}", outcome.skipped.join(", "));
    }
    eprintln!("   → {}", options.output_path.display());

    Ok(())
}

/// Segment all documents, in document order.
fn segment_all(
    documents: &[Document],
    #[cfg(feature = "parallel")] progress: &ProgressBar,
) -> Vec<Section> {
    #[cfg(feature = "parallel")]
    let per_doc: Vec<Vec<Section>> = documents
        .par_iter()
        .map(|doc| {
            let sections = segment(doc);
            progress.inc(1);
            sections
        })
        .collect();

    #[cfg(not(feature = "parallel"))]
    let per_doc: Vec<Vec<Section>> = documents.iter().map(segment).collect();

    per_doc.into_iter().flatten().collect()
}

/// Load and segment everything, reporting per-document statistics.
///
/// Skipped documents appear with zero sections so the table shows them.
pub fn collect_stats(input_dir: &Path) -> Result<Vec<DocumentStats>, PipelineError> {
    let config = RunConfig::load(&input_dir.join(CONFIG_FILE))?;

    #[cfg(feature = "parallel")]
    let progress = ProgressBar::hidden();

    let outcome = input::load_documents(
        input_dir,
        &config,
        #[cfg(feature = "parallel")]
        &progress,
    );

    let mut stats: Vec<DocumentStats> = outcome
        .documents
        .iter()
        .map(|doc| {
            let sections = segment(doc);
            let synthetic = sections.iter().filter(|s| s.synthetic).count();
            DocumentStats {
                filename: doc.filename.clone(),
                sections: sections.len(),
                detected_headings: sections.len() - synthetic,
                synthetic_sections: synthetic,
                pages: doc.blocks.iter().map(|b| b.page).max().unwrap_or(0),
                words: sections.iter().map(Section::body_words).sum(),
            }
        })
        .collect();

    for filename in outcome.skipped {
        stats.push(DocumentStats {
            filename,
            sections: 0,
            detected_headings: 0,
            synthetic_sections: 0,
            pages: 0,
            words: 0,
        });
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_input(dir: &Path, config_json: &str, docs: &[(&str, &str)]) {
        fs::write(dir.join(CONFIG_FILE), config_json).unwrap();
        let docs_dir = dir.join("documents");
        fs::create_dir_all(&docs_dir).unwrap();
        for (filename, json) in docs {
            fs::write(docs_dir.join(format!("{}.json", filename)), json).unwrap();
        }
    }

    fn options(dir: &Path) -> RankOptions {
        RankOptions {
            input_dir: dir.to_path_buf(),
            output_path: dir.join("analysis.json"),
            top_sections: 20,
            refine_top: 5,
            char_budget: 900,
        }
    }

    #[test]
    fn empty_corpus_writes_no_output() {
        let dir = tempfile::tempdir().unwrap();
        write_input(
            dir.path(),
            r#"{"persona": "Researcher", "job_to_be_done": "review", "documents": ["a.pdf"]}"#,
            &[("a.pdf", r#"{"blocks": []}"#)],
        );

        let err = run_rank(&options(dir.path())).unwrap_err();
        assert!(matches!(err, PipelineError::EmptyCorpus));
        assert!(!dir.path().join("analysis.json").exists());
    }

    #[test]
    fn stats_include_skipped_documents() {
        let dir = tempfile::tempdir().unwrap();
        write_input(
            dir.path(),
            r#"{"persona": "Researcher", "job_to_be_done": "review",
                "documents": ["good.pdf", "gone.pdf"]}"#,
            &[(
                "good.pdf",
                r#"{"blocks": [
                    {"text": "Overview", "fontSize": 16.0, "page": 1},
                    {"text": "Some body text for the section.", "fontSize": 11.0, "page": 1}
                ]}"#,
            )],
        );

        let stats = collect_stats(dir.path()).unwrap();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].filename, "good.pdf");
        assert!(stats[0].sections >= 1);
        assert_eq!(stats[1].filename, "gone.pdf");
        assert_eq!(stats[1].sections, 0);
    }
}
