//! Persona-driven section ranking for extracted PDF text.
//!
//! Given a set of documents (as pre-extracted text blocks with font
//! metadata), a persona, and a job-to-be-done, this crate segments each
//! document into sections, weighs terms across the whole corpus, scores each
//! section for the persona and job, and emits a ranked section list with
//! refined sub-section text for the top hits.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐    ┌─────────────┐    ┌────────────┐
//! │ config.rs  │    │ segment.rs  │───▶│ corpus.rs  │
//! │ (RunConfig)│    │ (Section)   │    │(CorpusModel)│
//! └─────┬──────┘    └──────▲──────┘    └─────┬──────┘
//!       │                  │                 │
//!       ▼                  │                 ▼
//! ┌────────────┐    ┌──────┴──────┐    ┌────────────┐
//! │ persona.rs │    │ pipeline/   │───▶│  rank.rs   │
//! │ (Profile)  │───▶│ (run_rank)  │    │ refine.rs  │
//! └────────────┘    └─────────────┘    └────────────┘
//! ```
//!
//! The pipeline is a single synchronous pass; with the `parallel` feature,
//! document loading and segmentation fan out with rayon, and the corpus
//! model build is the barrier everything upstream must reach first.
//!
//! # Usage
//!
//! ```ignore
//! use docrank::pipeline::{run_rank, RankOptions};
//!
//! let options = RankOptions {
//!     input_dir: "input".into(),
//!     output_path: "analysis.json".into(),
//!     top_sections: 20,
//!     refine_top: 5,
//!     char_budget: 900,
//! };
//! run_rank(&options)?;
//! ```

// Module declarations
pub mod config;
pub mod corpus;
pub mod error;
pub mod persona;
pub mod pipeline;
pub mod rank;
pub mod refine;
pub mod segment;
pub mod text;
pub mod types;

// Re-exports for public API
pub use config::RunConfig;
pub use corpus::{CorpusModel, MAX_VOCABULARY};
pub use error::PipelineError;
pub use persona::{PersonaCategory, PersonaProfile, WeightedKeyword};
pub use rank::rank;
pub use refine::{refine, DEFAULT_CHAR_BUDGET, DEFAULT_TOP_SECTIONS};
pub use segment::segment;
pub use text::{normalize, tokenize};
pub use types::{
    DocId, Document, ScoredSection, Section, SubScores, SubsectionAnalysis, TextBlock,
};
