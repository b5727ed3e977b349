//! YAML serialization for classification tables.
//!
//! A table file lists regions in output order, each with its metadata and
//! member countries:
//!
//! ```yaml
//! regions:
//!   - id: europe
//!     name: Europe
//!     chapter: ../02-europe/index.html
//!     color: "#4A90A4"
//!     countries: [AUT, BEL, FRA]
//! ```
//!
//! `regionmap table` prints the built-in table in this format.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{ClassificationTable, Region};
use crate::error::RegionMapError;

#[derive(Debug, Serialize, Deserialize)]
struct TableFile {
    regions: Vec<Region>,
}

/// Reads and validates a classification table from a YAML file.
///
/// # Errors
/// Returns an error if the file cannot be read, is not valid YAML for the
/// table schema, or describes an invalid table.
pub fn read_table_yaml(path: &Path) -> Result<ClassificationTable, RegionMapError> {
    let text = fs::read_to_string(path).map_err(|source| RegionMapError::TableRead {
        path: path.to_path_buf(),
        source,
    })?;

    parse_table(&text, path)
}

/// Parses and validates a classification table from a YAML string.
///
/// Useful for testing without file I/O. Syntax errors are reported as
/// [`RegionMapError::TableParse`] with the path `<string>`.
pub fn from_table_yaml_str(yaml: &str) -> Result<ClassificationTable, RegionMapError> {
    parse_table(yaml, Path::new("<string>"))
}

fn parse_table(yaml: &str, path: &Path) -> Result<ClassificationTable, RegionMapError> {
    let file: TableFile =
        serde_yaml::from_str(yaml).map_err(|source| RegionMapError::TableParse {
            path: path.to_path_buf(),
            source,
        })?;

    ClassificationTable::from_regions(file.regions)
}

/// Writes a classification table to a YAML string.
pub fn to_table_yaml_string(table: &ClassificationTable) -> Result<String, RegionMapError> {
    let file = TableFile {
        regions: table.regions().cloned().collect(),
    };
    serde_yaml::to_string(&file).map_err(RegionMapError::TableSerialize)
}
