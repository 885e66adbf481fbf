//! Cluster assignment and cohort summaries for the welcome survey.
//!
//! A [`SurveyContext`] owns the process-wide resources (model, labelled
//! reference population, cluster profiles). Each is loaded on first use and
//! read-only afterwards. Per request, [`SurveyContext::evaluate`] takes the
//! current form state and either reports the unanswered fields or classifies
//! the respondent and summarizes their cohort.
//!
//! Getting started:
//! - Point a [`SurveyConfig`] at the model artifact, dataset and profiles
//!   (or use the defaults under `data/`)
//! - Build a context with `SurveyContext::new(config)`
//! - Call `evaluate(&draft)` for every form change
//!
//! The lower-level pieces ([`classify`], [`summarize`], [`Population`]) are
//! exported for callers that manage their own resources.

pub mod classify;
pub mod config;
pub mod context;
pub mod error;
pub mod population;
pub mod summary;

pub use classify::classify;
pub use config::SurveyConfig;
pub use context::{ClusterOverview, Evaluation, SurveyContext};
pub use error::SurveyError;
pub use population::{LabeledRespondent, Population};
pub use summary::{
    share_percent, summarize, summarize_with, Bucket, CohortSummary, FrequencyTable,
    DEFAULT_SAMPLE_SIZE,
};
