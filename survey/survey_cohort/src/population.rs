//! Reference population labelled with cluster ids.

use std::collections::BTreeMap;

use log::info;
use serde::Serialize;
use survey_data::{ClusterId, Respondent};
use survey_model::{ClusterModel, ModelError};

use crate::error::SurveyError;

/// A historical respondent and the cluster the model assigned to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabeledRespondent {
    /// Zero-based position in the reference dataset
    pub row: usize,
    #[serde(flatten)]
    pub respondent: Respondent,
    pub cluster: ClusterId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Population {
    rows: Vec<LabeledRespondent>,
}

impl Population {
    /// Runs every respondent through `model` in one batch.
    pub fn label(model: &dyn ClusterModel, respondents: Vec<Respondent>) -> Result<Self, SurveyError> {
        let ids = model.predict(&respondents).map_err(SurveyError::Inference)?;
        if ids.len() != respondents.len() {
            return Err(SurveyError::Inference(ModelError::Inference(format!(
                "model '{}' returned {} cluster ids for {} rows",
                model.name(),
                ids.len(),
                respondents.len()
            ))));
        }
        let rows: Vec<LabeledRespondent> = respondents
            .into_iter()
            .zip(ids)
            .enumerate()
            .map(|(row, (respondent, cluster))| LabeledRespondent {
                row,
                respondent,
                cluster,
            })
            .collect();
        info!(
            "labelled {} respondents with model '{}'",
            rows.len(),
            model.name()
        );
        Ok(Self { rows })
    }

    pub fn from_rows(rows: Vec<LabeledRespondent>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[LabeledRespondent] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &LabeledRespondent> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows assigned to `cluster`, in dataset order.
    pub fn cohort(&self, cluster: &ClusterId) -> Vec<&LabeledRespondent> {
        self.rows.iter().filter(|r| &r.cluster == cluster).collect()
    }

    pub fn cluster_sizes(&self) -> BTreeMap<ClusterId, usize> {
        let mut sizes = BTreeMap::new();
        for r in &self.rows {
            *sizes.entry(r.cluster.clone()).or_insert(0) += 1;
        }
        sizes
    }
}
