//! Serialized model artifacts.
//!
//! An artifact is a JSON document naming the algorithm, the features the
//! model was trained on (column plus category order) and the fitted
//! parameters:
//!
//! ```
//! use survey_model::ModelArtifact;
//! let artifact = ModelArtifact::from_json(r#"{
//!     "metadata": {"id": "demo", "name": "Demo", "version": "1.0.0"},
//!     "algorithm": "kmeans",
//!     "features": [{"column": "gender", "categories": ["Mężczyzna", "Kobieta"]}],
//!     "centroids": [[1.0, 0.0], [0.0, 1.0]]
//! }"#).unwrap();
//! let model = artifact.into_model().unwrap();
//! assert_eq!(model.clusters().len(), 2);
//! ```

use std::collections::BTreeMap;
use std::fs::read_to_string;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};
use survey_data::Attribute;

use crate::backend::{ClusterModel, ModelError};
use crate::backends::{KMeansBackend, KModesBackend};
use crate::encoding::OneHotEncoder;
use crate::metadata::ModelMetadata;

pub const DEFAULT_LABEL_PREFIX: &str = "Cluster ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    KMeans,
    KModes,
}

/// One input column and its category order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSpec {
    pub column: String,
    #[serde(default)]
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub metadata: ModelMetadata,
    pub algorithm: Algorithm,
    #[serde(default = "default_label_prefix")]
    pub label_prefix: String,
    pub features: Vec<FeatureSpec>,
    /// K-means centroids in one-hot space
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub centroids: Vec<Vec<f64>>,
    /// K-modes modes, column name -> answer
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modes: Vec<BTreeMap<String, String>>,
}

fn default_label_prefix() -> String {
    DEFAULT_LABEL_PREFIX.to_string()
}

impl ModelArtifact {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    fn columns(&self) -> Result<Vec<Attribute>, ModelError> {
        self.features
            .iter()
            .map(|f| {
                Attribute::from_column(&f.column).ok_or_else(|| {
                    ModelError::Invalid(format!("unknown feature column '{}'", f.column))
                })
            })
            .collect()
    }

    /// Validates the artifact and builds the backend it names.
    pub fn into_model(self) -> Result<Box<dyn ClusterModel>, ModelError> {
        let columns = self.columns()?;
        match self.algorithm {
            Algorithm::KMeans => {
                let encoder = OneHotEncoder::new(
                    columns
                        .into_iter()
                        .zip(self.features.into_iter().map(|f| f.categories))
                        .collect(),
                )?;
                let backend =
                    KMeansBackend::new(self.metadata, self.label_prefix, encoder, self.centroids)?;
                Ok(Box::new(backend))
            }
            Algorithm::KModes => {
                for (i, a) in columns.iter().enumerate() {
                    if columns[..i].contains(a) {
                        return Err(ModelError::Invalid(format!("feature '{a}' listed twice")));
                    }
                }
                let mut modes = Vec::with_capacity(self.modes.len());
                for (i, mode) in self.modes.iter().enumerate() {
                    let row = self
                        .features
                        .iter()
                        .map(|f| {
                            mode.get(&f.column).cloned().ok_or_else(|| {
                                ModelError::Invalid(format!(
                                    "mode {} has no value for '{}'",
                                    i, f.column
                                ))
                            })
                        })
                        .collect::<Result<Vec<_>, _>>()?;
                    modes.push(row);
                }
                let backend = KModesBackend::new(self.metadata, self.label_prefix, columns, modes)?;
                Ok(Box::new(backend))
            }
        }
    }
}

/// Loads a model artifact from disk.
pub fn load_model<P: AsRef<Path>>(path: P) -> Result<Box<dyn ClusterModel>, ModelError> {
    let path = path.as_ref();
    let source = path.display().to_string();
    let text = read_to_string(path).map_err(|e| ModelError::Load {
        path: source.clone(),
        source: e,
    })?;
    let artifact = ModelArtifact::from_json(&text).map_err(|e| ModelError::Parse {
        path: source.clone(),
        source: e,
    })?;
    let model = artifact.into_model()?;
    info!(
        "loaded {} model '{}' v{} with {} clusters from {}",
        model.backend_name(),
        model.name(),
        model.metadata().version,
        model.clusters().len(),
        source
    );
    Ok(model)
}
