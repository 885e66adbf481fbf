//! Reader for the reference survey dataset.
//!
//! The file is semicolon-delimited with a header row naming exactly the five
//! survey columns (in any order). Every cell must be a label from the
//! column's enumeration.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::info;
use thiserror::Error;

use crate::attribute::{Attribute, UnknownValue};
use crate::respondent::Respondent;

/// Field delimiter of the reference dataset.
pub const DELIMITER: u8 = b';';

/// Required header columns, in `Attribute::ALL` order.
pub const COLUMNS: [&str; 5] = ["age", "edu_level", "fav_animals", "fav_place", "gender"];

#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("cannot read dataset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{path}: header must contain exactly the columns {expected}, found '{found}'")]
    Header {
        path: String,
        expected: String,
        found: String,
    },
    #[error("{path}: malformed record at line {line}: {message}")]
    Malformed {
        path: String,
        line: u64,
        message: String,
    },
    #[error("{path}: line {line}: {source}")]
    Value {
        path: String,
        line: u64,
        #[source]
        source: UnknownValue,
    },
    #[error("{path}: dataset contains no records")]
    Empty { path: String },
}

/// Reads all respondents from a dataset file.
pub fn read_respondents<P: AsRef<Path>>(path: P) -> Result<Vec<Respondent>, DataLoadError> {
    let path = path.as_ref();
    let source = path.display().to_string();
    let file = File::open(path).map_err(|e| DataLoadError::Io {
        path: source.clone(),
        source: e,
    })?;
    let rows = parse_respondents(file, &source)?;
    info!("loaded {} respondents from {}", rows.len(), source);
    Ok(rows)
}

/// Parses respondents from any reader; `source` names the input in errors.
pub fn parse_respondents<R: Read>(reader: R, source: &str) -> Result<Vec<Respondent>, DataLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| malformed(source, 1, &e))?
        .clone();
    let positions = column_positions(&headers).ok_or_else(|| DataLoadError::Header {
        path: source.to_string(),
        expected: COLUMNS.join(";"),
        found: headers.iter().collect::<Vec<_>>().join(";"),
    })?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| {
            let line = e.position().map(|p| p.line()).unwrap_or(0);
            malformed(source, line, &e)
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let mut labels = [""; 5];
        for (slot, &idx) in labels.iter_mut().zip(positions.iter()) {
            *slot = record.get(idx).ok_or_else(|| DataLoadError::Malformed {
                path: source.to_string(),
                line,
                message: format!("missing field {idx}"),
            })?;
        }
        let respondent = Respondent::from_labels(labels).map_err(|e| DataLoadError::Value {
            path: source.to_string(),
            line,
            source: e,
        })?;
        rows.push(respondent);
    }

    if rows.is_empty() {
        return Err(DataLoadError::Empty {
            path: source.to_string(),
        });
    }
    Ok(rows)
}

/// Maps each attribute (in `Attribute::ALL` order) to its header position.
/// `None` unless the header holds exactly the five columns once each.
fn column_positions(headers: &csv::StringRecord) -> Option<[usize; 5]> {
    if headers.len() != COLUMNS.len() {
        return None;
    }
    let mut positions = [usize::MAX; 5];
    for (idx, name) in headers.iter().enumerate() {
        let name = name.trim_start_matches('\u{feff}');
        let attr = Attribute::ALL.into_iter().find(|a| a.column() == name)?;
        let slot = &mut positions[attr as usize];
        if *slot != usize::MAX {
            return None;
        }
        *slot = idx;
    }
    Some(positions)
}

fn malformed(source: &str, line: u64, err: &csv::Error) -> DataLoadError {
    DataLoadError::Malformed {
        path: source.to_string(),
        line,
        message: err.to_string(),
    }
}
