//! Error taxonomy for the ranking pipeline.
//!
//! Per-document ingestion failures are deliberately *not* represented here:
//! an unreadable block file gets the document skipped and recorded in the
//! output metadata, never aborting the run. The variants below are the fatal
//! cases where continuing would produce meaningless output.

use thiserror::Error;

/// Fatal pipeline failures. A run that returns one of these writes no output
/// file and the binary exits nonzero.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Configuration is missing, unreadable, or fails validation. Surfaced
    /// before any document processing starts.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Zero usable sections across all documents: nothing to rank.
    #[error("no usable sections found in any input document")]
    EmptyCorpus,

    /// Filesystem failure outside the per-document skip path (e.g. writing
    /// the output file).
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Output serialization failure.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_names_the_field() {
        let err = PipelineError::Config("missing required field: persona".to_string());
        assert_eq!(
            err.to_string(),
            "invalid configuration: missing required field: persona"
        );
    }

    #[test]
    fn empty_corpus_message_is_stable() {
        assert_eq!(
            PipelineError::EmptyCorpus.to_string(),
            "no usable sections found in any input document"
        );
    }
}
