//! Run configuration: persona, job-to-be-done, and the document list.
//!
//! The upstream tooling that produces `config.json` is not consistent about
//! shapes: `persona` may be a plain string or an object with `role` and
//! `expertise`, and `job_to_be_done` may be a string or an object with `task`.
//! Both forms are accepted and flattened; validation happens before any
//! document is touched.

use std::path::Path;

use serde::Deserialize;

use crate::error::PipelineError;

/// Validated run configuration.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Persona description: role plus any stated expertise areas, flattened
    /// into one string for keyword extraction.
    pub persona: String,
    /// Free-text job-to-be-done driving query extraction.
    pub job_to_be_done: String,
    /// Document filenames, in the order they should be processed.
    pub documents: Vec<String>,
}

#[derive(Deserialize)]
struct RawConfig {
    persona: Option<PersonaField>,
    job_to_be_done: Option<JobField>,
    #[serde(default)]
    documents: Vec<DocumentEntry>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PersonaField {
    Text(String),
    Role {
        role: String,
        #[serde(default)]
        expertise: Vec<String>,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JobField {
    Text(String),
    Task { task: String },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DocumentEntry {
    Name(String),
    Record { filename: String },
}

impl RunConfig {
    /// Load and validate `config.json` from the given path.
    ///
    /// Any failure here is a [`PipelineError::Config`]: an unreadable file,
    /// invalid JSON, missing/empty persona or job, or an empty document list.
    pub fn load(path: &Path) -> Result<RunConfig, PipelineError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let parsed: RawConfig = serde_json::from_str(&raw)
            .map_err(|e| PipelineError::Config(format!("invalid config JSON: {}", e)))?;
        RunConfig::from_raw(parsed)
    }

    fn from_raw(raw: RawConfig) -> Result<RunConfig, PipelineError> {
        let persona = match raw.persona {
            Some(PersonaField::Text(text)) => text,
            Some(PersonaField::Role { role, expertise }) => {
                let mut combined = role;
                for area in expertise {
                    combined.push(' ');
                    combined.push_str(&area);
                }
                combined
            }
            None => String::new(),
        };
        if persona.trim().is_empty() {
            return Err(PipelineError::Config(
                "missing required field: persona".to_string(),
            ));
        }

        let job = match raw.job_to_be_done {
            Some(JobField::Text(text)) => text,
            Some(JobField::Task { task }) => task,
            None => String::new(),
        };
        if job.trim().is_empty() {
            return Err(PipelineError::Config(
                "missing required field: job_to_be_done".to_string(),
            ));
        }

        let documents: Vec<String> = raw
            .documents
            .into_iter()
            .map(|entry| match entry {
                DocumentEntry::Name(name) => name,
                DocumentEntry::Record { filename } => filename,
            })
            .filter(|name| !name.trim().is_empty())
            .collect();
        if documents.is_empty() {
            return Err(PipelineError::Config(
                "document list is empty".to_string(),
            ));
        }

        Ok(RunConfig {
            persona,
            job_to_be_done: job,
            documents,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<RunConfig, PipelineError> {
        RunConfig::from_raw(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn parses_flat_string_form() {
        let config = parse(
            r#"{
                "persona": "PhD Researcher",
                "job_to_be_done": "conduct a literature review",
                "documents": ["a.pdf", "b.pdf"]
            }"#,
        )
        .unwrap();
        assert_eq!(config.persona, "PhD Researcher");
        assert_eq!(config.documents, vec!["a.pdf", "b.pdf"]);
    }

    #[test]
    fn parses_object_forms() {
        let config = parse(
            r#"{
                "persona": {"role": "Analyst", "expertise": ["market research"]},
                "job_to_be_done": {"task": "summarize quarterly trends"},
                "documents": [{"filename": "q3.pdf"}]
            }"#,
        )
        .unwrap();
        assert_eq!(config.persona, "Analyst market research");
        assert_eq!(config.job_to_be_done, "summarize quarterly trends");
        assert_eq!(config.documents, vec!["q3.pdf"]);
    }

    #[test]
    fn missing_persona_is_config_error() {
        let err = parse(r#"{"job_to_be_done": "x", "documents": ["a.pdf"]}"#).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
        assert!(err.to_string().contains("persona"));
    }

    #[test]
    fn blank_job_is_config_error() {
        let err = parse(
            r#"{"persona": "Student", "job_to_be_done": "   ", "documents": ["a.pdf"]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("job_to_be_done"));
    }

    #[test]
    fn empty_document_list_is_config_error() {
        let err =
            parse(r#"{"persona": "Student", "job_to_be_done": "learn", "documents": []}"#)
                .unwrap_err();
        assert!(err.to_string().contains("document list"));
    }
}
