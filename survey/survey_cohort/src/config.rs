//! `survey.toml` configuration.
//!
//! ```toml
//! [model]
//! path = "data/welcome_survey_clustering_pipeline_v2.json"
//!
//! [dataset]
//! path = "data/welcome_survey_simple_v2.csv"
//!
//! [profiles]
//! path = "data/welcome_survey_cluster_names_and_descriptions_v2.json"
//!
//! [summary]
//! sample_size = 10
//! ```
//!
//! Every section is optional. Relative paths resolve against the directory
//! of the config file (or the base directory set with `with_base_dir`).

use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SurveyError;
use crate::summary::DEFAULT_SAMPLE_SIZE;

pub const CONFIG_FILE: &str = "survey.toml";
pub const DEFAULT_MODEL_PATH: &str = "data/welcome_survey_clustering_pipeline_v2.json";
pub const DEFAULT_DATASET_PATH: &str = "data/welcome_survey_simple_v2.csv";
pub const DEFAULT_PROFILES_PATH: &str =
    "data/welcome_survey_cluster_names_and_descriptions_v2.json";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelSection {
    pub path: PathBuf,
}

impl Default for ModelSection {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_MODEL_PATH),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DatasetSection {
    pub path: PathBuf,
}

impl Default for DatasetSection {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATASET_PATH),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProfilesSection {
    pub path: PathBuf,
}

impl Default for ProfilesSection {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_PROFILES_PATH),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SummarySection {
    /// Upper bound of random cohort rows shown per summary
    pub sample_size: usize,
}

impl Default for SummarySection {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SurveyConfig {
    pub model: ModelSection,
    pub dataset: DatasetSection,
    pub profiles: ProfilesSection,
    pub summary: SummarySection,
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl SurveyConfig {
    pub fn parse(text: &str) -> Result<Self, SurveyError> {
        let config: SurveyConfig =
            toml::from_str(text).map_err(|e| SurveyError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a config file; relative paths in it resolve against its directory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SurveyError> {
        let path = path.as_ref();
        let text = read_to_string(path)
            .map_err(|e| SurveyError::Config(format!("cannot read {}: {e}", path.display())))?;
        let config = Self::parse(&text)
            .map_err(|e| SurveyError::Config(format!("{}: {e}", path.display())))?;
        let base = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(config.with_base_dir(base))
    }

    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    pub fn validate(&self) -> Result<(), SurveyError> {
        if self.summary.sample_size == 0 {
            return Err(SurveyError::Config(
                "summary.sample_size must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    pub fn model_path(&self) -> PathBuf {
        self.resolve(&self.model.path)
    }

    pub fn dataset_path(&self) -> PathBuf {
        self.resolve(&self.dataset.path)
    }

    pub fn profiles_path(&self) -> PathBuf {
        self.resolve(&self.profiles.path)
    }
}
