//! Cluster names and descriptions.

use std::collections::BTreeMap;
use std::fs::read_to_string;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cluster::ClusterId;

#[derive(Debug, Error)]
pub enum MetadataLoadError {
    #[error("cannot read cluster metadata {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse cluster metadata {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Human-readable description of one cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterProfile {
    pub name: String,
    pub description: String,
}

impl ClusterProfile {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Profiles keyed by the exact cluster ids the model emits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterProfiles {
    entries: BTreeMap<ClusterId, ClusterProfile>,
}

impl ClusterProfiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, MetadataLoadError> {
        let path = path.as_ref();
        let source = path.display().to_string();
        let text = read_to_string(path).map_err(|e| MetadataLoadError::Io {
            path: source.clone(),
            source: e,
        })?;
        let profiles = Self::from_json(&text, &source)?;
        info!("loaded {} cluster profiles from {}", profiles.len(), source);
        Ok(profiles)
    }

    pub fn from_json(text: &str, source: &str) -> Result<Self, MetadataLoadError> {
        serde_json::from_str(text).map_err(|e| MetadataLoadError::Parse {
            path: source.to_string(),
            source: e,
        })
    }

    pub fn insert(&mut self, id: ClusterId, profile: ClusterProfile) -> Option<ClusterProfile> {
        self.entries.insert(id, profile)
    }

    pub fn get(&self, id: &ClusterId) -> Option<&ClusterProfile> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &ClusterId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &ClusterId> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ClusterId, &ClusterProfile)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(ClusterId, ClusterProfile)> for ClusterProfiles {
    fn from_iter<I: IntoIterator<Item = (ClusterId, ClusterProfile)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
