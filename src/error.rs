use std::path::PathBuf;
use thiserror::Error;

use crate::validation::ValidationReport;

/// The main error type for geomark operations.
#[derive(Debug, Error)]
pub enum GeomarkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse project JSON from {path}: {source}")]
    ProjectJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write project JSON to {path}: {source}")]
    ProjectJsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse settings JSON from {path}: {source}")]
    SettingsJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write settings JSON to {path}: {source}")]
    SettingsJsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid color '{0}' (expected #AARRGGBB or #RRGGBB)")]
    InvalidColor(String),

    #[error("Coordinate ({latitude}, {longitude}) is outside the map")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("An area needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("{path} has {skipped} invalid entries that would be lost on save; fix the file or pass --force")]
    UnloadableEntries { path: PathBuf, skipped: usize },

    #[error("No {kind} at index {index} (project has {len})")]
    IndexOutOfRange {
        kind: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Validation failed with {error_count} error(s) and {warning_count} warning(s)")]
    ValidationFailed {
        error_count: usize,
        warning_count: usize,
        report: ValidationReport,
    },
}
