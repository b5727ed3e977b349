//! The JavaScript data asset consumed by the map front end.
//!
//! The asset is a script that assigns the region collection to a constant
//! and then publishes it on `window`:
//!
//! ```text
//! /**
//!  * World Regional Geography - Regional GeoJSON Data
//!  * Generated from high-quality country boundaries.
//!  */
//!
//! const RegionalData = {"type":"FeatureCollection","features":[...]};
//!
//! window.WorldRegionsData = RegionalData;
//! ```
//!
//! # Deterministic Output
//!
//! The JSON is compact and struct fields serialize in declaration order,
//! so the same collection always renders to the same bytes.

use std::fs;
use std::path::Path;

use serde::de::Error as _;

use super::model::RegionCollection;
use crate::error::RegionMapError;

/// Comment block at the top of the asset.
pub const HEADER: &str = "/**\n * World Regional Geography - Regional GeoJSON Data\n * Generated from high-quality country boundaries.\n */\n";

/// Name of the script-level binding holding the collection.
pub const BINDING: &str = "RegionalData";

/// Property of `window` the collection is published under.
pub const GLOBAL_NAME: &str = "WorldRegionsData";

/// Renders the full asset text for a region collection.
pub fn to_asset_string(collection: &RegionCollection) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(collection)?;

    let mut out = String::with_capacity(HEADER.len() + json.len() + 96);
    out.push_str(HEADER);
    out.push('\n');
    out.push_str(&format!("const {} = ", BINDING));
    out.push_str(&json);
    out.push_str(";\n\n");
    out.push_str(&publish_statement());
    out.push('\n');
    Ok(out)
}

/// Writes the asset to `path`, replacing any existing file.
///
/// Missing parent directories are created.
///
/// # Errors
/// Returns an error if serialization fails or the file cannot be written.
pub fn write_asset(path: &Path, collection: &RegionCollection) -> Result<(), RegionMapError> {
    let text = to_asset_string(collection).map_err(RegionMapError::AssetSerialize)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| RegionMapError::AssetWrite {
            path: path.to_path_buf(),
            source,
        })?;
    }

    fs::write(path, text).map_err(|source| RegionMapError::AssetWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a region collection back out of an asset file.
///
/// # Errors
/// Returns [`RegionMapError::AssetFormat`] if the wrapper is missing or the
/// embedded JSON is not a region collection.
pub fn read_asset(path: &Path) -> Result<RegionCollection, RegionMapError> {
    let text = fs::read_to_string(path).map_err(|source| RegionMapError::AssetRead {
        path: path.to_path_buf(),
        source,
    })?;
    from_asset_str(&text).map_err(|e| RegionMapError::AssetFormat {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Parses a region collection out of asset text.
///
/// The header comment is not checked; the assignment and the publish
/// statement are.
pub fn from_asset_str(text: &str) -> Result<RegionCollection, serde_json::Error> {
    let assignment = format!("const {} = ", BINDING);
    let start = text.find(&assignment).ok_or_else(|| {
        serde_json::Error::custom(format!("missing `{}` assignment", assignment.trim_end()))
    })? + assignment.len();
    let rest = &text[start..];

    let publish = publish_statement();
    let end = rest
        .rfind(&publish)
        .ok_or_else(|| serde_json::Error::custom(format!("missing `{}`", publish)))?;

    let json = rest[..end]
        .trim_end()
        .strip_suffix(';')
        .ok_or_else(|| serde_json::Error::custom("assignment is not terminated with `;`"))?;

    serde_json::from_str(json)
}

fn publish_statement() -> String {
    format!("window.{} = {};", GLOBAL_NAME, BINDING)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::RegionFeature;
    use crate::table::RegionMetadata;
    use serde_json::Number;

    fn sample_collection() -> RegionCollection {
        let n = |v: f64| Number::from_f64(v).unwrap();
        RegionCollection::new(vec![RegionFeature::new(
            "oceania",
            RegionMetadata::new(
                "Australia & Oceania",
                "../11-australia-oceania/index.html",
                "#9370DB",
            ),
            vec![vec![vec![
                vec![n(150.5), n(-30.25)],
                vec![n(151.0), n(-30.25)],
                vec![n(151.0), n(-29.0)],
                vec![n(150.5), n(-30.25)],
            ]]],
        )])
    }

    #[test]
    fn empty_collection_layout() {
        let text = to_asset_string(&RegionCollection::default()).unwrap();
        assert_eq!(
            text,
            "/**\n * World Regional Geography - Regional GeoJSON Data\n * Generated from high-quality country boundaries.\n */\n\nconst RegionalData = {\"type\":\"FeatureCollection\",\"features\":[]};\n\nwindow.WorldRegionsData = RegionalData;\n"
        );
    }

    #[test]
    fn asset_json_is_compact() {
        let text = to_asset_string(&sample_collection()).unwrap();
        let line = text
            .lines()
            .find(|l| l.starts_with("const RegionalData = "))
            .unwrap();
        assert!(!line.contains(": "));
        assert!(!line.contains(", "));
        assert!(line.contains("[[[[150.5,-30.25],[151.0,-30.25]"));
    }

    #[test]
    fn parse_rendered_asset() {
        let original = sample_collection();
        let text = to_asset_string(&original).unwrap();
        let parsed = from_asset_str(&text).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn parse_rejects_missing_publish_statement() {
        let text = "const RegionalData = {\"type\":\"FeatureCollection\",\"features\":[]};\n";
        let err = from_asset_str(text).unwrap_err();
        assert!(err.to_string().contains("window.WorldRegionsData"));
    }

    #[test]
    fn parse_rejects_missing_assignment() {
        let err = from_asset_str("window.WorldRegionsData = RegionalData;").unwrap_err();
        assert!(err.to_string().contains("const RegionalData"));
    }

    #[test]
    fn write_creates_parent_and_overwrites() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("js").join("regions-data.js");

        write_asset(&path, &sample_collection()).expect("first write");
        write_asset(&path, &RegionCollection::default()).expect("second write");

        let restored = read_asset(&path).expect("read back");
        assert!(restored.features.is_empty());
    }

    #[test]
    fn read_asset_reports_format_errors() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("regions-data.js");
        fs::write(&path, "const RegionalData = {};\n\nwindow.WorldRegionsData = RegionalData;\n")
            .unwrap();

        let err = read_asset(&path).unwrap_err();
        assert!(matches!(err, RegionMapError::AssetFormat { .. }));
    }
}
