//! Model trait and error types for cluster assignment

use crate::metadata::ModelMetadata;
use survey_data::{ClusterId, Respondent};
use thiserror::Error;

/// Errors that can occur while loading or running a model
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("cannot read model artifact {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse model artifact {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid model artifact: {0}")]
    Invalid(String),
    #[error("inference failed: {0}")]
    Inference(String),
}

/// Pluggable clustering model
///
/// Implementations assign each respondent of a batch to one cluster.
pub trait ClusterModel: Send + Sync {
    /// Model identifier (the artifact's logical name)
    fn name(&self) -> &str {
        &self.metadata().id
    }

    fn metadata(&self) -> &ModelMetadata;

    /// Backend identifier
    fn backend_name(&self) -> &str;

    /// Every cluster id this model can emit, in cluster index order
    fn clusters(&self) -> Vec<ClusterId>;

    /// Assign a cluster id to every row; the output has one id per input row,
    /// in input order.
    fn predict(&self, rows: &[Respondent]) -> Result<Vec<ClusterId>, ModelError>;
}

/// Cluster id for index `index` under a label prefix such as `"Cluster "`.
pub fn cluster_label(prefix: &str, index: usize) -> ClusterId {
    ClusterId::new(format!("{prefix}{index}"))
}
