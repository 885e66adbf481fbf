//! Backend implementations for different clustering algorithms

pub mod kmeans;
pub mod kmodes;

pub use kmeans::KMeansBackend;
pub use kmodes::KModesBackend;
