// Copyright 2025-present The docrank authors
// SPDX-License-Identifier: Apache-2.0

//! Persona classification and job keyword extraction.
//!
//! The persona string is matched against a small fixed rule table of keyword
//! families. Classification is intentionally coarse: it selects a static
//! priority-keyword table, nothing more. Unrecognized personas fall back to
//! [`PersonaCategory::Generic`], which borrows the job keywords at neutral
//! weight so ranking still has a usable query.
//!
//! Determinism: category selection takes the highest family hit count, and a
//! tie goes to the family declared first in [`CATEGORY_RULES`].

use serde::Serialize;

use crate::text::tokenize;

/// Maximum number of salient job terms kept as the query vector.
const MAX_JOB_KEYWORDS: usize = 20;

/// Weight applied to job-derived keywords under the Generic fallback.
const NEUTRAL_WEIGHT: f64 = 1.0;

/// Coarse persona families with dedicated priority vocabularies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonaCategory {
    Researcher,
    Student,
    Analyst,
    Developer,
    Manager,
    Generic,
}

/// A query term with its match weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightedKeyword {
    pub term: String,
    pub weight: f64,
}

/// Everything the ranker needs to know about who is asking and why.
#[derive(Debug, Clone, Serialize)]
pub struct PersonaProfile {
    pub category: PersonaCategory,
    /// Category-specific terms with weights; for Generic, the job keywords
    /// at neutral weight.
    pub priority_keywords: Vec<WeightedKeyword>,
    /// Salient job terms, most frequent first. The content-relevance query.
    pub job_keywords: Vec<String>,
    /// Every usable term of the job text, duplicates preserved. The
    /// job-alignment query.
    pub job_terms: Vec<String>,
}

/// Indicator words that vote for each category, in declaration order.
/// First family wins a hit-count tie.
const CATEGORY_RULES: &[(PersonaCategory, &[&str])] = &[
    (
        PersonaCategory::Researcher,
        &[
            "researcher",
            "research",
            "scientist",
            "phd",
            "postdoc",
            "professor",
            "academic",
            "scholar",
        ],
    ),
    (
        PersonaCategory::Student,
        &[
            "student",
            "undergraduate",
            "graduate",
            "learner",
            "trainee",
            "intern",
        ],
    ),
    (
        PersonaCategory::Analyst,
        &["analyst", "analysis", "investment", "consultant"],
    ),
    (
        PersonaCategory::Developer,
        &[
            "developer",
            "engineer",
            "programmer",
            "architect",
            "devops",
        ],
    ),
    (
        PersonaCategory::Manager,
        &[
            "manager",
            "management",
            "director",
            "executive",
            "lead",
            "officer",
        ],
    ),
];

// Per-category priority vocabularies. The top entries carry heavier weights
// than the long tail of indicator terms.
const RESEARCHER_PRIORITIES: &[(&str, f64)] = &[
    ("methodology", 3.0),
    ("findings", 2.5),
    ("analysis", 2.0),
    ("experiment", 2.0),
    ("hypothesis", 2.0),
    ("literature", 2.0),
    ("review", 2.0),
    ("empirical", 2.0),
    ("theoretical", 2.0),
    ("framework", 2.0),
    ("survey", 2.0),
    ("investigation", 2.0),
    ("results", 2.0),
];

const STUDENT_PRIORITIES: &[(&str, f64)] = &[
    ("concept", 2.5),
    ("example", 2.0),
    ("definition", 2.0),
    ("tutorial", 2.0),
    ("guide", 2.0),
    ("basics", 2.0),
    ("fundamental", 2.0),
    ("introduction", 2.0),
    ("explanation", 2.0),
    ("principle", 2.0),
];

const ANALYST_PRIORITIES: &[(&str, f64)] = &[
    ("data", 2.5),
    ("trend", 2.0),
    ("metric", 2.0),
    ("pattern", 2.0),
    ("correlation", 2.0),
    ("statistics", 2.0),
    ("benchmark", 2.0),
    ("performance", 2.0),
    ("evaluation", 2.0),
    ("assessment", 2.0),
];

const DEVELOPER_PRIORITIES: &[(&str, f64)] = &[
    ("implementation", 2.5),
    ("code", 2.0),
    ("system", 2.0),
    ("programming", 2.0),
    ("algorithm", 2.0),
    ("architecture", 2.0),
    ("design", 2.0),
    ("technical", 2.0),
    ("solution", 2.0),
    ("framework", 2.0),
];

const MANAGER_PRIORITIES: &[(&str, f64)] = &[
    ("strategy", 2.5),
    ("planning", 2.0),
    ("decision", 2.0),
    ("leadership", 2.0),
    ("coordination", 2.0),
    ("objective", 2.0),
    ("goal", 2.0),
    ("vision", 2.0),
    ("policy", 2.0),
    ("governance", 2.0),
];

impl PersonaCategory {
    fn priority_table(self) -> &'static [(&'static str, f64)] {
        match self {
            PersonaCategory::Researcher => RESEARCHER_PRIORITIES,
            PersonaCategory::Student => STUDENT_PRIORITIES,
            PersonaCategory::Analyst => ANALYST_PRIORITIES,
            PersonaCategory::Developer => DEVELOPER_PRIORITIES,
            PersonaCategory::Manager => MANAGER_PRIORITIES,
            PersonaCategory::Generic => &[],
        }
    }
}

impl PersonaProfile {
    /// Build a profile from the raw persona and job strings.
    ///
    /// Never fails: any persona string classifies (Generic at worst), and an
    /// already-validated nonempty job string always yields terms unless it is
    /// pure stop words, in which case the queries are simply empty.
    pub fn extract(persona_text: &str, job_text: &str) -> PersonaProfile {
        let category = classify(persona_text);
        let job_terms = tokenize(job_text);
        let job_keywords = salient_terms(&job_terms, MAX_JOB_KEYWORDS);

        let priority_keywords = if category == PersonaCategory::Generic {
            job_keywords
                .iter()
                .map(|term| WeightedKeyword {
                    term: term.clone(),
                    weight: NEUTRAL_WEIGHT,
                })
                .collect()
        } else {
            category
                .priority_table()
                .iter()
                .map(|&(term, weight)| WeightedKeyword {
                    term: term.to_string(),
                    weight,
                })
                .collect()
        };

        PersonaProfile {
            category,
            priority_keywords,
            job_keywords,
            job_terms,
        }
    }
}

/// Pick the category whose indicator family scores the most hits against the
/// persona text. Zero hits everywhere means Generic.
fn classify(persona_text: &str) -> PersonaCategory {
    let tokens = tokenize(persona_text);

    let mut best = PersonaCategory::Generic;
    let mut best_hits = 0usize;
    for &(category, indicators) in CATEGORY_RULES {
        let hits = indicators
            .iter()
            .filter(|indicator| tokens.iter().any(|t| t == *indicator))
            .count();
        // Strictly-greater keeps the earlier family on a tie.
        if hits > best_hits {
            best = category;
            best_hits = hits;
        }
    }
    best
}

/// Top `limit` terms by frequency; equal frequencies keep first-appearance
/// order so extraction is deterministic.
fn salient_terms(terms: &[String], limit: usize) -> Vec<String> {
    let mut order: Vec<&String> = Vec::new();
    let mut freq: std::collections::HashMap<&String, usize> = std::collections::HashMap::new();
    for term in terms {
        let count = freq.entry(term).or_insert(0);
        if *count == 0 {
            order.push(term);
        }
        *count += 1;
    }

    let mut ranked: Vec<(usize, &String)> = order
        .iter()
        .enumerate()
        .map(|(first_seen, term)| (first_seen, *term))
        .collect();
    ranked.sort_by(|(a_seen, a_term), (b_seen, b_term)| {
        freq[*b_term].cmp(&freq[*a_term]).then(a_seen.cmp(b_seen))
    });
    ranked
        .into_iter()
        .take(limit)
        .map(|(_, term)| term.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_researcher_persona() {
        let profile = PersonaProfile::extract(
            "PhD Researcher in computational biology",
            "conduct a literature review",
        );
        assert_eq!(profile.category, PersonaCategory::Researcher);
        assert!(profile
            .priority_keywords
            .iter()
            .any(|k| k.term == "methodology" && k.weight == 3.0));
    }

    #[test]
    fn classifies_student_persona() {
        let profile = PersonaProfile::extract("Undergraduate student", "learn the basics");
        assert_eq!(profile.category, PersonaCategory::Student);
    }

    #[test]
    fn unrecognized_persona_falls_back_to_generic() {
        let profile = PersonaProfile::extract("Time Traveler", "review historical records");
        assert_eq!(profile.category, PersonaCategory::Generic);
        // Generic borrows the job keywords at neutral weight.
        assert!(!profile.priority_keywords.is_empty());
        assert!(profile.priority_keywords.iter().all(|k| k.weight == 1.0));
        assert!(profile.priority_keywords.iter().any(|k| k.term == "review"));
    }

    #[test]
    fn tie_breaks_by_declaration_order() {
        // One hit for Researcher ("research") and one for Manager ("lead"):
        // Researcher is declared first and must win.
        let profile = PersonaProfile::extract("research lead", "evaluate options");
        assert_eq!(profile.category, PersonaCategory::Researcher);
    }

    #[test]
    fn job_keywords_are_frequency_ordered() {
        let profile = PersonaProfile::extract(
            "Analyst",
            "compare revenue revenue revenue against profit profit margins",
        );
        assert_eq!(profile.job_keywords[0], "revenue");
        assert_eq!(profile.job_keywords[1], "profit");
    }

    #[test]
    fn job_keyword_list_is_capped() {
        let long_job = (0..40)
            .map(|i| format!("uniqueterm{:02}", i))
            .collect::<Vec<_>>()
            .join(" ");
        let profile = PersonaProfile::extract("Developer", &long_job);
        assert_eq!(profile.job_keywords.len(), 20);
        // Equal frequency: first appearance wins.
        assert_eq!(profile.job_keywords[0], "uniqueterm00");
    }

    #[test]
    fn job_terms_preserve_duplicates() {
        let profile = PersonaProfile::extract("Manager", "plan the plan");
        assert_eq!(profile.job_terms, vec!["plan", "plan"]);
    }

    #[test]
    fn extraction_is_deterministic() {
        let a = PersonaProfile::extract("Data Analyst", "analyze quarterly sales trends");
        let b = PersonaProfile::extract("Data Analyst", "analyze quarterly sales trends");
        assert_eq!(a.category, b.category);
        assert_eq!(a.job_keywords, b.job_keywords);
        assert_eq!(a.priority_keywords, b.priority_keywords);
    }
}
