//! Reading the country-boundary GeoJSON input.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::model::CountryCollection;
use crate::error::RegionMapError;

/// Reads the country collection from a GeoJSON file.
///
/// Only the envelope is validated here: a top-level object with a
/// `features` array whose entries are objects. Geometries are decoded later,
/// and only for features that end up classified.
///
/// # Errors
/// Returns [`RegionMapError::InputRead`] if the file cannot be opened and
/// [`RegionMapError::InputParse`] if it is not a feature collection.
pub fn read_countries(path: &Path) -> Result<CountryCollection, RegionMapError> {
    let file = File::open(path).map_err(|source| RegionMapError::InputRead {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| RegionMapError::InputParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses a country collection from a JSON string.
///
/// Useful for testing without file I/O.
pub fn from_countries_str(json: &str) -> Result<CountryCollection, serde_json::Error> {
    serde_json::from_str(json)
}

/// Parses a country collection from bytes.
pub fn from_countries_slice(bytes: &[u8]) -> Result<CountryCollection, serde_json::Error> {
    serde_json::from_slice(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_collection() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "id": "FRA", "properties": {"name": "France"},
                 "geometry": {"type": "Polygon", "coordinates": [[[2, 46], [3, 46], [3, 47], [2, 46]]]}}
            ]
        }"#;

        let collection = from_countries_str(json).expect("parse");
        assert_eq!(collection.kind.as_deref(), Some("FeatureCollection"));
        assert_eq!(collection.features.len(), 1);
        assert_eq!(collection.features[0].id_str(), Some("FRA"));
    }

    #[test]
    fn tolerates_missing_id_and_null_geometry() {
        let json = r#"{"features": [{"properties": {"iso_a3": "DEU"}, "geometry": null}]}"#;
        let collection = from_countries_str(json).expect("parse");
        assert!(collection.features[0].id.is_none());
        assert!(collection.features[0].geometry.is_none());
    }

    #[test]
    fn missing_features_is_an_error() {
        let err = from_countries_str(r#"{"type": "FeatureCollection"}"#).unwrap_err();
        assert!(err.to_string().contains("missing field `features`"));
    }

    #[test]
    fn non_array_features_is_an_error() {
        assert!(from_countries_str(r#"{"features": {"FRA": 1}}"#).is_err());
    }

    #[test]
    fn read_missing_file_is_input_error() {
        let err = read_countries(Path::new("no/such/countries.geo.json")).unwrap_err();
        assert!(matches!(err, RegionMapError::InputRead { .. }));
    }

    #[test]
    fn read_invalid_json_is_parse_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("countries.geo.json");
        std::fs::write(&path, "not json").expect("write");

        let err = read_countries(&path).unwrap_err();
        assert!(matches!(err, RegionMapError::InputParse { .. }));
    }
}
