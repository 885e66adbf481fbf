//! Clustering model boundary for survey respondents.
//!
//! A model is an opaque capability: given a batch of respondents it returns
//! one cluster id per row. Concrete engines implement [`ClusterModel`];
//! [`load_model`] reads a serialized artifact and picks the backend named in
//! it (`kmeans` or `kmodes`).

pub mod artifact;
pub mod backend;
pub mod backends;
pub mod encoding;
pub mod metadata;

pub use artifact::{load_model, Algorithm, FeatureSpec, ModelArtifact};
pub use backend::{ClusterModel, ModelError};
pub use backends::{KMeansBackend, KModesBackend};
pub use encoding::OneHotEncoder;
pub use metadata::{ModelMetadata, ModelVersion};
