//! Comma-delimited dataset loader.
//!
//! The first record is a header and is skipped. Every data record holds D
//! feature columns followed by one non-negative integer label; D is taken from
//! the first data record. Fields may be quoted and are trimmed. Blank lines are
//! ignored.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use thiserror::Error;

use crate::error::KnnError;
use crate::instance::{Dataset, Instance, Label};

/// Errors raised while reading a dataset. Line numbers are 1-based and count
/// the header.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Input is empty; expected a header line")]
    MissingHeader,

    #[error("Line {line}: expected at least one feature and a label")]
    MissingLabel { line: usize },

    #[error("Line {line}: invalid feature value {value:?}")]
    InvalidFeature { line: usize, value: String },

    #[error("Line {line}: invalid label {value:?}")]
    InvalidLabel { line: usize, value: String },

    #[error("Line {line}: expected {expected} features, found {found}")]
    DimensionMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Invalid dataset: {0}")]
    Dataset(#[from] KnnError),
}

/// Result type for loader operations
pub type Result<T> = std::result::Result<T, LoadError>;

/// Reads a dataset from a CSV file.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    log::debug!("reading dataset from {}", path.display());
    parse_csv(File::open(path)?)
}

/// Reads a dataset from any reader.
pub fn parse_csv<R: Read>(reader: R) -> Result<Dataset> {
    // Row widths are checked here so errors carry the line number.
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);
    if rdr.headers()?.is_empty() {
        return Err(LoadError::MissingHeader);
    }

    let mut instances = Vec::new();
    let mut dimension = None;
    for record in rdr.records() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let line = record.position().map_or(0, |p| p.line() as usize);
        let instance = parse_record(&record, line)?;
        let expected = *dimension.get_or_insert(instance.dimension());
        if instance.dimension() != expected {
            return Err(LoadError::DimensionMismatch {
                line,
                expected,
                found: instance.dimension(),
            });
        }
        instances.push(instance);
    }

    log::info!("Total data read: {}", instances.len());
    Ok(Dataset::new(instances)?)
}

/// Parses one `f1,...,fD,label` record.
fn parse_record(record: &StringRecord, line: usize) -> Result<Instance> {
    let fields: Vec<&str> = record.iter().collect();
    let Some((label_field, feature_fields)) = fields.split_last() else {
        return Err(LoadError::MissingLabel { line });
    };
    if feature_fields.is_empty() {
        return Err(LoadError::MissingLabel { line });
    }

    let features = feature_fields
        .iter()
        .map(|field| {
            field
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| LoadError::InvalidFeature {
                    line,
                    value: field.to_string(),
                })
        })
        .collect::<Result<Vec<_>>>()?;
    let label = label_field
        .parse::<Label>()
        .map_err(|_| LoadError::InvalidLabel {
            line,
            value: label_field.to_string(),
        })?;

    Ok(Instance::new(features, label)?)
}
