//! K-means backend: nearest centroid over one-hot encoded answers

use crate::backend::{cluster_label, ClusterModel, ModelError};
use crate::encoding::OneHotEncoder;
use crate::metadata::ModelMetadata;
use survey_data::{ClusterId, Respondent};

/// Fitted k-means model. Centroids live in the encoder's one-hot space.
#[derive(Debug, Clone)]
pub struct KMeansBackend {
    metadata: ModelMetadata,
    label_prefix: String,
    encoder: OneHotEncoder,
    centroids: Vec<Vec<f64>>,
}

impl KMeansBackend {
    pub fn new(
        metadata: ModelMetadata,
        label_prefix: String,
        encoder: OneHotEncoder,
        centroids: Vec<Vec<f64>>,
    ) -> Result<Self, ModelError> {
        if centroids.is_empty() {
            return Err(ModelError::Invalid("k-means model has no centroids".into()));
        }
        for (i, c) in centroids.iter().enumerate() {
            if c.len() != encoder.width() {
                return Err(ModelError::Invalid(format!(
                    "centroid {} has {} coordinates, encoded width is {}",
                    i,
                    c.len(),
                    encoder.width()
                )));
            }
            if c.iter().any(|x| !x.is_finite()) {
                return Err(ModelError::Invalid(format!("centroid {i} is not finite")));
            }
        }
        Ok(Self {
            metadata,
            label_prefix,
            encoder,
            centroids,
        })
    }

    pub fn centroids(&self) -> &[Vec<f64>] {
        &self.centroids
    }

    /// Index of the closest centroid; ties go to the lower index.
    fn nearest(&self, x: &[f64]) -> usize {
        let mut best = 0;
        let mut best_dist = f64::INFINITY;
        for (i, c) in self.centroids.iter().enumerate() {
            let dist = squared_distance(x, c);
            if dist < best_dist {
                best = i;
                best_dist = dist;
            }
        }
        best
    }
}

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
}

impl ClusterModel for KMeansBackend {
    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    fn backend_name(&self) -> &str {
        "kmeans"
    }

    fn clusters(&self) -> Vec<ClusterId> {
        (0..self.centroids.len())
            .map(|i| cluster_label(&self.label_prefix, i))
            .collect()
    }

    fn predict(&self, rows: &[Respondent]) -> Result<Vec<ClusterId>, ModelError> {
        Ok(rows
            .iter()
            .map(|r| cluster_label(&self.label_prefix, self.nearest(&self.encoder.encode(r))))
            .collect())
    }
}
