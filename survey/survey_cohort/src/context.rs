//! Session context owning the lazily loaded model, population and profiles.

use std::sync::{Arc, OnceLock};

use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use survey_data::{
    read_respondents, Attribute, ClusterId, ClusterProfile, ClusterProfiles, Respondent,
    RespondentDraft,
};
use survey_model::{load_model, ClusterModel};

use crate::classify::classify;
use crate::config::SurveyConfig;
use crate::error::SurveyError;
use crate::population::Population;
use crate::summary::{share_percent, summarize_with, CohortSummary};

/// Outcome of evaluating the current survey form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Evaluation {
    /// At least one answer is missing; nothing was classified.
    Incomplete { missing: Vec<Attribute> },
    Classified(Box<CohortSummary>),
}

/// Size and share of one cluster in the reference population.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterOverview {
    pub cluster: ClusterId,
    pub profile: ClusterProfile,
    pub size: usize,
    pub share: u32,
}

/// Process-wide resources of one survey session.
///
/// Each resource is loaded on first access and never replaced, so every
/// request sees the same model, population and profiles.
pub struct SurveyContext {
    config: SurveyConfig,
    model: OnceLock<Arc<dyn ClusterModel>>,
    population: OnceLock<Population>,
    profiles: OnceLock<ClusterProfiles>,
}

impl SurveyContext {
    pub fn new(config: SurveyConfig) -> Self {
        Self {
            config,
            model: OnceLock::new(),
            population: OnceLock::new(),
            profiles: OnceLock::new(),
        }
    }

    /// Context whose model is already loaded (alternative engines, tests).
    pub fn with_model(config: SurveyConfig, model: Arc<dyn ClusterModel>) -> Self {
        let ctx = Self::new(config);
        let _ = ctx.model.set(model);
        ctx
    }

    pub fn config(&self) -> &SurveyConfig {
        &self.config
    }

    pub fn get_model(&self) -> Result<Arc<dyn ClusterModel>, SurveyError> {
        if let Some(model) = self.model.get() {
            return Ok(Arc::clone(model));
        }
        let path = self.config.model_path();
        info!("loading model artifact {}", path.display());
        let model: Arc<dyn ClusterModel> =
            Arc::from(load_model(&path).map_err(SurveyError::ModelLoad)?);
        Ok(Arc::clone(self.model.get_or_init(|| model)))
    }

    pub fn get_population(&self) -> Result<&Population, SurveyError> {
        if let Some(population) = self.population.get() {
            return Ok(population);
        }
        let model = self.get_model()?;
        let respondents = read_respondents(self.config.dataset_path())?;
        let population = Population::label(model.as_ref(), respondents)?;
        Ok(self.population.get_or_init(|| population))
    }

    pub fn get_cluster_profiles(&self) -> Result<&ClusterProfiles, SurveyError> {
        if let Some(profiles) = self.profiles.get() {
            return Ok(profiles);
        }
        let profiles = ClusterProfiles::read(self.config.profiles_path())?;
        Ok(self.profiles.get_or_init(|| profiles))
    }

    /// Fails with `UnknownCluster` for the first cluster the model can emit
    /// that has no profile. Profiles the model never emits are only logged.
    pub fn check_profiles_cover_model(&self) -> Result<(), SurveyError> {
        let model = self.get_model()?;
        let profiles = self.get_cluster_profiles()?;
        let clusters = model.clusters();
        if let Some(missing) = clusters.iter().find(|c| !profiles.contains(c)) {
            return Err(SurveyError::UnknownCluster(missing.clone()));
        }
        for id in profiles.ids().filter(|id| !clusters.contains(*id)) {
            warn!("profile '{id}' does not match any cluster of model '{}'", model.name());
        }
        Ok(())
    }

    pub fn classify(&self, respondent: &Respondent) -> Result<ClusterId, SurveyError> {
        let model = self.get_model()?;
        classify(model.as_ref(), respondent)
    }

    /// Classifies a complete respondent and summarizes their cohort.
    pub fn summarize_respondent(&self, respondent: &Respondent) -> Result<CohortSummary, SurveyError> {
        let cluster = self.classify(respondent)?;
        let population = self.get_population()?;
        let profiles = self.get_cluster_profiles()?;
        let mut rng = StdRng::from_entropy();
        summarize_with(
            &cluster,
            population,
            profiles,
            self.config.summary.sample_size,
            &mut rng,
        )
    }

    /// One request: an incomplete form is reported without touching the
    /// model; a complete one is classified and summarized.
    pub fn evaluate(&self, draft: &RespondentDraft) -> Result<Evaluation, SurveyError> {
        let Some(respondent) = draft.complete() else {
            return Ok(Evaluation::Incomplete {
                missing: draft.missing(),
            });
        };
        let summary = self.summarize_respondent(&respondent)?;
        Ok(Evaluation::Classified(Box::new(summary)))
    }

    /// Every cluster the model can emit, with its population size and share.
    pub fn cluster_overview(&self) -> Result<Vec<ClusterOverview>, SurveyError> {
        let model = self.get_model()?;
        let population = self.get_population()?;
        let profiles = self.get_cluster_profiles()?;
        let sizes = population.cluster_sizes();
        model
            .clusters()
            .into_iter()
            .map(|cluster| {
                let profile = profiles
                    .get(&cluster)
                    .cloned()
                    .ok_or_else(|| SurveyError::UnknownCluster(cluster.clone()))?;
                let size = sizes.get(&cluster).copied().unwrap_or(0);
                Ok(ClusterOverview {
                    share: share_percent(size, population.len()),
                    cluster,
                    profile,
                    size,
                })
            })
            .collect()
    }
}

impl std::fmt::Debug for SurveyContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurveyContext")
            .field("config", &self.config)
            .field("model_loaded", &self.model.get().is_some())
            .field("population_loaded", &self.population.get().is_some())
            .field("profiles_loaded", &self.profiles.get().is_some())
            .finish()
    }
}
