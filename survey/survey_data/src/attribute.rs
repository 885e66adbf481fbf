//! Closed answer enumerations and the attribute (column) they belong to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A value that is not part of an attribute's enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{value}' is not a valid {attribute} value (expected one of: {})", .attribute.labels().join(", "))]
pub struct UnknownValue {
    pub attribute: Attribute,
    pub value: String,
}

/// A column name that is not one of the five survey attributes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown survey field '{0}' (expected one of: age, edu_level, fav_animals, fav_place, gender)")]
pub struct UnknownAttribute(pub String);

macro_rules! categorical {
    (
        $(#[$meta:meta])*
        $name:ident for $attr:ident {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// Every value, in natural order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Survey label of this value.
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            /// Position of this value in the natural order.
            pub fn ordinal(self) -> usize {
                self as usize
            }

            pub fn from_label(label: &str) -> Option<Self> {
                match label {
                    $($label => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = UnknownValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $name::from_label(s).ok_or_else(|| UnknownValue {
                    attribute: Attribute::$attr,
                    value: s.to_string(),
                })
            }
        }
    };
}

categorical! {
    /// Age bracket, ordered from youngest to oldest.
    AgeBracket for Age {
        Under18 => "<18",
        From18To24 => "18-24",
        From25To34 => "25-34",
        From35To44 => "35-44",
        From45To54 => "45-54",
        From55To64 => "55-64",
        From65 => ">=65",
    }
}

categorical! {
    EduLevel for EduLevel {
        Primary => "Podstawowe",
        Secondary => "Średnie",
        Higher => "Wyższe",
    }
}

categorical! {
    FavAnimals for FavAnimals {
        NoFavorite => "Brak ulubionych",
        Dogs => "Psy",
        Cats => "Koty",
        Other => "Inne",
        CatsAndDogs => "Koty i psy",
    }
}

categorical! {
    /// Favorite leisure place.
    FavPlace for FavPlace {
        ByTheWater => "Nad wodą",
        InTheForest => "W lesie",
        InTheMountains => "W górach",
        Other => "Inne",
    }
}

categorical! {
    Gender for Gender {
        Male => "Mężczyzna",
        Female => "Kobieta",
    }
}

/// One of the five survey columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Age,
    EduLevel,
    FavAnimals,
    FavPlace,
    Gender,
}

impl Attribute {
    /// All attributes in dataset column order.
    pub const ALL: [Attribute; 5] = [
        Attribute::Age,
        Attribute::EduLevel,
        Attribute::FavAnimals,
        Attribute::FavPlace,
        Attribute::Gender,
    ];

    /// Column name in the reference dataset and in model artifacts.
    pub fn column(self) -> &'static str {
        match self {
            Attribute::Age => "age",
            Attribute::EduLevel => "edu_level",
            Attribute::FavAnimals => "fav_animals",
            Attribute::FavPlace => "fav_place",
            Attribute::Gender => "gender",
        }
    }

    /// Accepts the column name, with `-` allowed in place of `_`.
    pub fn from_column(name: &str) -> Option<Self> {
        let normalized = name.trim().replace('-', "_");
        Attribute::ALL
            .into_iter()
            .find(|a| a.column() == normalized)
    }

    /// Labels of every value of this attribute, in natural order.
    pub fn labels(self) -> Vec<&'static str> {
        fn collect<T: Copy>(all: &[T], label: fn(T) -> &'static str) -> Vec<&'static str> {
            all.iter().map(|v| label(*v)).collect()
        }
        match self {
            Attribute::Age => collect(AgeBracket::ALL, AgeBracket::label),
            Attribute::EduLevel => collect(EduLevel::ALL, EduLevel::label),
            Attribute::FavAnimals => collect(FavAnimals::ALL, FavAnimals::label),
            Attribute::FavPlace => collect(FavPlace::ALL, FavPlace::label),
            Attribute::Gender => collect(Gender::ALL, Gender::label),
        }
    }

    /// Number of values in the enumeration.
    pub fn cardinality(self) -> usize {
        match self {
            Attribute::Age => AgeBracket::ALL.len(),
            Attribute::EduLevel => EduLevel::ALL.len(),
            Attribute::FavAnimals => FavAnimals::ALL.len(),
            Attribute::FavPlace => FavPlace::ALL.len(),
            Attribute::Gender => Gender::ALL.len(),
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Attribute {
    type Err = UnknownAttribute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Attribute::from_column(s).ok_or_else(|| UnknownAttribute(s.to_string()))
    }
}
