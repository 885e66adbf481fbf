//! Shared fixtures for the integration tests.

use std::path::PathBuf;

use survey_cohort::{SurveyConfig, SurveyContext};
use survey_data::{Respondent, RespondentDraft};

/// Workspace root, where `data/` and `survey.toml` live.
pub fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..")
}

pub fn data_dir() -> PathBuf {
    repo_root().join("data")
}

/// Context over the shipped `survey.toml`.
pub fn shipped_context() -> SurveyContext {
    let config = SurveyConfig::load(repo_root().join("survey.toml"))
        .unwrap_or_else(|e| panic!("shipped survey.toml must load: {e}"));
    SurveyContext::new(config)
}

pub fn respondent(labels: [&str; 5]) -> Respondent {
    Respondent::from_labels(labels).unwrap_or_else(|e| panic!("bad fixture {labels:?}: {e}"))
}

pub fn draft(labels: [Option<&str>; 5]) -> RespondentDraft {
    let mut d = RespondentDraft::new();
    for (attr, label) in survey_data::Attribute::ALL.into_iter().zip(labels) {
        if let Some(l) = label {
            d.set(attr, l)
                .unwrap_or_else(|e| panic!("bad fixture {l}: {e}"));
        }
    }
    d
}
