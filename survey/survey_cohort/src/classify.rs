use log::debug;
use survey_data::{ClusterId, Respondent};
use survey_model::{ClusterModel, ModelError};

use crate::error::SurveyError;

/// Assigns a single respondent to a cluster.
///
/// Only complete respondents can be classified; a form with unanswered
/// fields must go through `RespondentDraft::complete` first.
pub fn classify(model: &dyn ClusterModel, respondent: &Respondent) -> Result<ClusterId, SurveyError> {
    let mut ids = model
        .predict(std::slice::from_ref(respondent))
        .map_err(SurveyError::Inference)?;
    if ids.len() != 1 {
        return Err(SurveyError::Inference(ModelError::Inference(format!(
            "model '{}' returned {} cluster ids for a single respondent",
            model.name(),
            ids.len()
        ))));
    }
    let id = ids.swap_remove(0);
    debug!("classified {respondent:?} as '{id}'");
    Ok(id)
}
