//! Complete respondents and partially filled survey forms.

use serde::{Deserialize, Serialize};

use crate::attribute::{
    AgeBracket, Attribute, EduLevel, FavAnimals, FavPlace, Gender, UnknownValue,
};

/// One complete set of survey answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Respondent {
    pub age: AgeBracket,
    pub edu_level: EduLevel,
    pub fav_animals: FavAnimals,
    pub fav_place: FavPlace,
    pub gender: Gender,
}

impl Respondent {
    pub fn new(
        age: AgeBracket,
        edu_level: EduLevel,
        fav_animals: FavAnimals,
        fav_place: FavPlace,
        gender: Gender,
    ) -> Self {
        Self {
            age,
            edu_level,
            fav_animals,
            fav_place,
            gender,
        }
    }

    /// Builds a respondent from survey labels given in `Attribute::ALL` order.
    pub fn from_labels(labels: [&str; 5]) -> Result<Self, UnknownValue> {
        Ok(Self {
            age: labels[0].parse()?,
            edu_level: labels[1].parse()?,
            fav_animals: labels[2].parse()?,
            fav_place: labels[3].parse()?,
            gender: labels[4].parse()?,
        })
    }

    pub fn label(&self, attribute: Attribute) -> &'static str {
        match attribute {
            Attribute::Age => self.age.label(),
            Attribute::EduLevel => self.edu_level.label(),
            Attribute::FavAnimals => self.fav_animals.label(),
            Attribute::FavPlace => self.fav_place.label(),
            Attribute::Gender => self.gender.label(),
        }
    }

    /// Natural-order position of the answer for `attribute`.
    pub fn ordinal(&self, attribute: Attribute) -> usize {
        match attribute {
            Attribute::Age => self.age.ordinal(),
            Attribute::EduLevel => self.edu_level.ordinal(),
            Attribute::FavAnimals => self.fav_animals.ordinal(),
            Attribute::FavPlace => self.fav_place.ordinal(),
            Attribute::Gender => self.gender.ordinal(),
        }
    }
}

/// Survey form state: any subset of the five answers.
///
/// Only a complete draft converts into a [`Respondent`], so a partially
/// filled form can never be handed to a classifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RespondentDraft {
    pub age: Option<AgeBracket>,
    pub edu_level: Option<EduLevel>,
    pub fav_animals: Option<FavAnimals>,
    pub fav_place: Option<FavPlace>,
    pub gender: Option<Gender>,
}

impl RespondentDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets one answer from its survey label. The draft is unchanged on error.
    pub fn set(&mut self, attribute: Attribute, label: &str) -> Result<(), UnknownValue> {
        match attribute {
            Attribute::Age => self.age = Some(label.parse()?),
            Attribute::EduLevel => self.edu_level = Some(label.parse()?),
            Attribute::FavAnimals => self.fav_animals = Some(label.parse()?),
            Attribute::FavPlace => self.fav_place = Some(label.parse()?),
            Attribute::Gender => self.gender = Some(label.parse()?),
        }
        Ok(())
    }

    pub fn unset(&mut self, attribute: Attribute) {
        match attribute {
            Attribute::Age => self.age = None,
            Attribute::EduLevel => self.edu_level = None,
            Attribute::FavAnimals => self.fav_animals = None,
            Attribute::FavPlace => self.fav_place = None,
            Attribute::Gender => self.gender = None,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Label of the current answer for `attribute`, if any.
    pub fn get(&self, attribute: Attribute) -> Option<&'static str> {
        match attribute {
            Attribute::Age => self.age.map(AgeBracket::label),
            Attribute::EduLevel => self.edu_level.map(EduLevel::label),
            Attribute::FavAnimals => self.fav_animals.map(FavAnimals::label),
            Attribute::FavPlace => self.fav_place.map(FavPlace::label),
            Attribute::Gender => self.gender.map(Gender::label),
        }
    }

    /// Unanswered attributes, in column order.
    pub fn missing(&self) -> Vec<Attribute> {
        Attribute::ALL
            .into_iter()
            .filter(|a| self.get(*a).is_none())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.complete().is_some()
    }

    pub fn complete(&self) -> Option<Respondent> {
        Some(Respondent {
            age: self.age?,
            edu_level: self.edu_level?,
            fav_animals: self.fav_animals?,
            fav_place: self.fav_place?,
            gender: self.gender?,
        })
    }
}

impl From<Respondent> for RespondentDraft {
    fn from(r: Respondent) -> Self {
        Self {
            age: Some(r.age),
            edu_level: Some(r.edu_level),
            fav_animals: Some(r.fav_animals),
            fav_place: Some(r.fav_place),
            gender: Some(r.gender),
        }
    }
}
