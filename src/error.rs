use std::path::PathBuf;
use thiserror::Error;

use crate::validation::ValidationReport;

/// The main error type for regionmap operations.
#[derive(Debug, Error)]
pub enum RegionMapError {
    #[error("Failed to read country boundaries from {path}: {source}")]
    InputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse country boundaries from {path}: {source}")]
    InputParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Malformed geometry for feature '{feature}': {source}")]
    InputGeometry {
        feature: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unsupported geometry type '{geometry_type}' for feature '{feature}' (expected Polygon or MultiPolygon)")]
    UnsupportedGeometry {
        feature: String,
        geometry_type: String,
    },

    #[error("Failed to read region table from {path}: {source}")]
    TableRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse region table from {path}: {source}")]
    TableParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to serialize region table: {0}")]
    TableSerialize(#[source] serde_yaml::Error),

    #[error("Invalid region table: {0}")]
    InvalidTable(String),

    #[error("Failed to serialize region data: {0}")]
    AssetSerialize(#[source] serde_json::Error),

    #[error("Failed to serialize report: {0}")]
    ReportSerialize(#[source] serde_json::Error),

    #[error("Failed to write region data to {path}: {source}")]
    AssetWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read region data from {path}: {source}")]
    AssetRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed region data in {path}: {message}")]
    AssetFormat { path: PathBuf, message: String },

    #[error("Validation failed with {error_count} error(s) and {warning_count} warning(s)")]
    ValidationFailed {
        error_count: usize,
        warning_count: usize,
        report: ValidationReport,
    },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}
