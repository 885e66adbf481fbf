//! One-hot encoding of categorical survey answers.

use log::warn;
use survey_data::{Attribute, Respondent};

use crate::backend::ModelError;

/// Encodes respondents into fixed-width 0/1 vectors.
///
/// Each feature contributes one slot per category, in the category order the
/// model was trained with. An answer outside a feature's categories encodes as
/// all zeros for that feature.
#[derive(Debug, Clone, PartialEq)]
pub struct OneHotEncoder {
    features: Vec<(Attribute, Vec<String>)>,
    width: usize,
}

impl OneHotEncoder {
    pub fn new(features: Vec<(Attribute, Vec<String>)>) -> Result<Self, ModelError> {
        if features.is_empty() {
            return Err(ModelError::Invalid("model has no features".into()));
        }
        for (i, (attr, categories)) in features.iter().enumerate() {
            if features[..i].iter().any(|(a, _)| a == attr) {
                return Err(ModelError::Invalid(format!("feature '{attr}' listed twice")));
            }
            if categories.is_empty() {
                return Err(ModelError::Invalid(format!("feature '{attr}' has no categories")));
            }
            let known = attr.labels();
            for c in categories {
                if !known.contains(&c.as_str()) {
                    warn!("feature '{attr}': category '{c}' is not a survey answer and will never match");
                }
            }
        }
        let width = features.iter().map(|(_, c)| c.len()).sum();
        Ok(Self { features, width })
    }

    /// Length of every encoded vector.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn attributes(&self) -> impl Iterator<Item = Attribute> + '_ {
        self.features.iter().map(|(a, _)| *a)
    }

    pub fn encode(&self, respondent: &Respondent) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.width);
        for (attr, categories) in &self.features {
            let answer = respondent.label(*attr);
            out.extend(
                categories
                    .iter()
                    .map(|c| if c == answer { 1.0 } else { 0.0 }),
            );
        }
        out
    }
}
