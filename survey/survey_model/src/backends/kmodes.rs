//! K-modes backend: Hamming dissimilarity against per-cluster modes

use crate::backend::{cluster_label, ClusterModel, ModelError};
use crate::metadata::ModelMetadata;
use survey_data::{Attribute, ClusterId, Respondent};

#[derive(Debug, Clone)]
pub struct KModesBackend {
    metadata: ModelMetadata,
    label_prefix: String,
    columns: Vec<Attribute>,
    /// One row per cluster, aligned with `columns`
    modes: Vec<Vec<String>>,
}

impl KModesBackend {
    pub fn new(
        metadata: ModelMetadata,
        label_prefix: String,
        columns: Vec<Attribute>,
        modes: Vec<Vec<String>>,
    ) -> Result<Self, ModelError> {
        if columns.is_empty() {
            return Err(ModelError::Invalid("k-modes model has no features".into()));
        }
        if modes.is_empty() {
            return Err(ModelError::Invalid("k-modes model has no modes".into()));
        }
        if let Some((i, m)) = modes.iter().enumerate().find(|(_, m)| m.len() != columns.len()) {
            return Err(ModelError::Invalid(format!(
                "mode {} has {} values, expected {}",
                i,
                m.len(),
                columns.len()
            )));
        }
        Ok(Self {
            metadata,
            label_prefix,
            columns,
            modes,
        })
    }

    fn dissimilarity(&self, respondent: &Respondent, mode: &[String]) -> usize {
        self.columns
            .iter()
            .zip(mode)
            .filter(|(attr, value)| respondent.label(**attr) != value.as_str())
            .count()
    }

    fn nearest(&self, respondent: &Respondent) -> usize {
        let mut best = 0;
        let mut best_cost = usize::MAX;
        for (i, mode) in self.modes.iter().enumerate() {
            let cost = self.dissimilarity(respondent, mode);
            if cost < best_cost {
                best = i;
                best_cost = cost;
            }
        }
        best
    }
}

impl ClusterModel for KModesBackend {
    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    fn backend_name(&self) -> &str {
        "kmodes"
    }

    fn clusters(&self) -> Vec<ClusterId> {
        (0..self.modes.len())
            .map(|i| cluster_label(&self.label_prefix, i))
            .collect()
    }

    fn predict(&self, rows: &[Respondent]) -> Result<Vec<ClusterId>, ModelError> {
        Ok(rows
            .iter()
            .map(|r| cluster_label(&self.label_prefix, self.nearest(r)))
            .collect())
    }
}
