use survey_data::{ClusterId, DataLoadError, MetadataLoadError};
use survey_model::ModelError;
use thiserror::Error;

/// Every fault of the classification pipeline. None of them is retried.
#[derive(Debug, Error)]
pub enum SurveyError {
    #[error("model load failed: {0}")]
    ModelLoad(#[source] ModelError),
    #[error("reference data load failed: {0}")]
    DataLoad(#[from] DataLoadError),
    #[error("cluster metadata load failed: {0}")]
    MetadataLoad(#[from] MetadataLoadError),
    /// The model produced a cluster id with no profile entry.
    #[error("no profile for cluster '{0}'")]
    UnknownCluster(ClusterId),
    #[error("{0}")]
    Inference(#[source] ModelError),
    #[error("invalid configuration: {0}")]
    Config(String),
}
