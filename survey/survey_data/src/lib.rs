//! Data primitives for the welcome survey.
//!
//! - Closed answer enumerations (`AgeBracket`, `EduLevel`, `FavAnimals`,
//!   `FavPlace`, `Gender`) whose declaration order is their natural order
//! - `Respondent` (all five answers) and `RespondentDraft` (form state)
//! - `ClusterId`, the opaque label emitted by a clustering model
//! - Readers for the semicolon-delimited reference dataset and the cluster
//!   name/description file
//!
//! ```
//! use survey_data::{Attribute, RespondentDraft};
//! let mut draft = RespondentDraft::new();
//! draft.set(Attribute::Age, "25-34").unwrap();
//! draft.set(Attribute::Gender, "Kobieta").unwrap();
//! assert!(draft.complete().is_none());
//! assert_eq!(draft.missing().len(), 3);
//! ```
pub mod attribute;
pub mod cluster;
pub mod dataset;
pub mod profiles;
pub mod respondent;

pub use attribute::{
    AgeBracket, Attribute, EduLevel, FavAnimals, FavPlace, Gender, UnknownAttribute, UnknownValue,
};
pub use cluster::ClusterId;
pub use dataset::{parse_respondents, read_respondents, DataLoadError, COLUMNS, DELIMITER};
pub use profiles::{ClusterProfile, ClusterProfiles, MetadataLoadError};
pub use respondent::{Respondent, RespondentDraft};
