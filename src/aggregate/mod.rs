//! The region aggregation pipeline.
//!
//! Each input country is classified by identifier, its ring-sets are
//! appended to the bucket of its region, and every non-empty bucket becomes
//! one `MultiPolygon` region feature. There is no geometric union: ring-sets
//! are concatenated exactly as they appear in the input.
//!
//! # Example
//!
//! ```
//! use regionmap::aggregate::{aggregate, AggregateOptions};
//! use regionmap::geo::{CountryCollection, CountryFeature};
//! use regionmap::table::ClassificationTable;
//! use serde_json::Number;
//!
//! let n = |v: i64| Number::from(v);
//! let ring = vec![vec![n(2), n(46)], vec![n(3), n(46)], vec![n(3), n(47)], vec![n(2), n(46)]];
//! let input = CountryCollection::new(vec![
//!     CountryFeature::polygon("FRA", vec![ring]),
//!     CountryFeature::polygon("ATA", vec![]),
//! ]);
//!
//! let table = ClassificationTable::builtin();
//! let result = aggregate(&input, &table, &AggregateOptions::default()).unwrap();
//! assert_eq!(result.collection.features.len(), 1);
//! assert_eq!(result.collection.features[0].id, "europe");
//! ```

pub mod report;

pub use report::{
    AggregateIssue, AggregateIssueCode, AggregateReport, AggregateSeverity, InputCounts,
    OutputCounts,
};

use serde_json::Value;

use crate::error::RegionMapError;
use crate::geo::{
    CountryCollection, CountryFeature, Geometry, RegionCollection, RegionFeature, RingSet,
};
use crate::table::ClassificationTable;

/// A place to read a country identifier from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IdentifierSource {
    /// The feature's top-level `id`.
    FeatureId,
    /// A named entry in the feature's `properties`.
    Property(String),
}

impl IdentifierSource {
    /// Extracts a non-empty string identifier, if this source has one.
    pub fn extract<'a>(&self, feature: &'a CountryFeature) -> Option<&'a str> {
        let value = match self {
            IdentifierSource::FeatureId => feature.id.as_ref(),
            IdentifierSource::Property(key) => feature.properties.as_ref()?.get(key),
        };
        value.and_then(Value::as_str).filter(|s| !s.is_empty())
    }

    /// Short label used in log output.
    pub fn describe(&self) -> String {
        match self {
            IdentifierSource::FeatureId => "id".to_string(),
            IdentifierSource::Property(key) => format!("properties.{}", key),
        }
    }
}

/// The identifier sources tried by default: `id`, then `properties.iso_a3`.
pub fn default_identifier_sources() -> Vec<IdentifierSource> {
    vec![
        IdentifierSource::FeatureId,
        IdentifierSource::Property("iso_a3".to_string()),
    ]
}

/// Tries each source in order and returns the first identifier found.
pub fn resolve_identifier<'a, 's>(
    feature: &'a CountryFeature,
    sources: &'s [IdentifierSource],
) -> Option<(&'s IdentifierSource, &'a str)> {
    sources
        .iter()
        .find_map(|source| source.extract(feature).map(|id| (source, id)))
}

/// What to do with a classified feature whose geometry is neither
/// `Polygon` nor `MultiPolygon`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnsupportedGeometryPolicy {
    /// Abort the whole run.
    #[default]
    Fail,
    /// Log a warning, record it in the report, and continue.
    Skip,
}

/// Options for aggregation behavior.
#[derive(Clone, Debug)]
pub struct AggregateOptions {
    /// Identifier sources, tried in order.
    pub id_sources: Vec<IdentifierSource>,
    pub unsupported_geometry: UnsupportedGeometryPolicy,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            id_sources: default_identifier_sources(),
            unsupported_geometry: UnsupportedGeometryPolicy::Fail,
        }
    }
}

/// The result of one aggregation run.
#[derive(Clone, Debug)]
pub struct Aggregation {
    pub collection: RegionCollection,
    pub report: AggregateReport,
}

/// Groups country features into one feature per non-empty region.
///
/// Output features follow the table's region order. Within a region,
/// ring-sets keep input order; a `MultiPolygon` country contributes each of
/// its ring-sets as a separate entry.
///
/// Features without an identifier, with an unmapped identifier, or without
/// geometry are skipped and recorded in the report.
///
/// # Errors
/// - [`RegionMapError::InputGeometry`] if a classified feature's coordinates
///   do not match its geometry type.
/// - [`RegionMapError::UnsupportedGeometry`] if a classified feature has
///   another geometry type and the policy is
///   [`UnsupportedGeometryPolicy::Fail`].
pub fn aggregate(
    collection: &CountryCollection,
    table: &ClassificationTable,
    opts: &AggregateOptions,
) -> Result<Aggregation, RegionMapError> {
    let mut report = AggregateReport::new();
    report.input.features = collection.features.len();

    if let Some(kind) = collection.kind.as_deref() {
        if kind != "FeatureCollection" {
            tracing::warn!(
                kind,
                "input type is not FeatureCollection; reading features anyway"
            );
        }
    }

    let mut buckets: Vec<Vec<RingSet>> = vec![Vec::new(); table.len()];

    for (idx, feature) in collection.features.iter().enumerate() {
        let Some((source, code)) = resolve_identifier(feature, &opts.id_sources) else {
            tracing::warn!(index = idx, "feature has no usable identifier; skipping");
            report.add(AggregateIssue::warning(
                AggregateIssueCode::Unclassifiable,
                idx,
                None,
                "no usable identifier",
            ));
            continue;
        };

        let Some(position) = table.position_of(code) else {
            tracing::info!(
                index = idx,
                country = code,
                "country is not in any region; skipping"
            );
            report.add(AggregateIssue::info(
                AggregateIssueCode::UnmappedCountryCode,
                idx,
                Some(code),
                format!("'{}' is not in any region", code),
            ));
            continue;
        };

        let Some(raw) = feature.geometry.as_ref() else {
            tracing::warn!(index = idx, country = code, "feature has no geometry; skipping");
            report.add(AggregateIssue::warning(
                AggregateIssueCode::MissingGeometry,
                idx,
                Some(code),
                "no geometry",
            ));
            continue;
        };

        let geometry = raw
            .decode()
            .map_err(|source| RegionMapError::InputGeometry {
                feature: code.to_string(),
                source,
            })?;

        let bucket = &mut buckets[position];
        match geometry {
            Geometry::Polygon(rings) => bucket.push(rings),
            Geometry::MultiPolygon(polygons) => bucket.extend(polygons),
            Geometry::Unsupported(kind) => match opts.unsupported_geometry {
                UnsupportedGeometryPolicy::Fail => {
                    return Err(RegionMapError::UnsupportedGeometry {
                        feature: code.to_string(),
                        geometry_type: kind,
                    });
                }
                UnsupportedGeometryPolicy::Skip => {
                    tracing::warn!(
                        index = idx,
                        country = code,
                        geometry = kind.as_str(),
                        "unsupported geometry type; skipping"
                    );
                    report.add(AggregateIssue::warning(
                        AggregateIssueCode::UnsupportedGeometrySkipped,
                        idx,
                        Some(code),
                        format!("unsupported geometry type '{}'", kind),
                    ));
                    continue;
                }
            },
        }

        report.input.classified += 1;
        tracing::debug!(
            country = code,
            via = %source.describe(),
            "classified feature"
        );
    }

    let features: Vec<RegionFeature> = table
        .regions()
        .zip(buckets)
        .filter(|(_, polygons)| !polygons.is_empty())
        .map(|(region, polygons)| {
            RegionFeature::new(region.id.clone(), region.metadata.clone(), polygons)
        })
        .collect();

    let collection = RegionCollection::new(features);
    report.output = OutputCounts {
        regions: collection.features.len(),
        ring_sets: collection.ring_set_count(),
    };

    Ok(Aggregation { collection, report })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::RawGeometry;
    use serde_json::{json, Number};

    fn square(x: i64, y: i64) -> RingSet {
        let n = |v: i64| Number::from(v);
        vec![vec![
            vec![n(x), n(y)],
            vec![n(x + 1), n(y)],
            vec![n(x + 1), n(y + 1)],
            vec![n(x), n(y)],
        ]]
    }

    fn run(features: Vec<CountryFeature>) -> Result<Aggregation, RegionMapError> {
        aggregate(
            &CountryCollection::new(features),
            &ClassificationTable::builtin(),
            &AggregateOptions::default(),
        )
    }

    #[test]
    fn identifier_falls_back_to_iso_a3() {
        let feature = CountryFeature::polygon("", square(0, 0)).with_property("iso_a3", "DEU");
        let sources = default_identifier_sources();
        let (source, id) = resolve_identifier(&feature, &sources).unwrap();
        assert_eq!(id, "DEU");
        assert_eq!(source, &IdentifierSource::Property("iso_a3".into()));
    }

    #[test]
    fn identifier_prefers_feature_id() {
        let feature = CountryFeature::polygon("FRA", square(0, 0)).with_property("iso_a3", "DEU");
        let sources = default_identifier_sources();
        let (source, id) = resolve_identifier(&feature, &sources).unwrap();
        assert_eq!(id, "FRA");
        assert_eq!(source, &IdentifierSource::FeatureId);
    }

    #[test]
    fn numeric_id_is_not_an_identifier() {
        let mut feature = CountryFeature::polygon("x", square(0, 0));
        feature.id = Some(json!(250));
        assert!(resolve_identifier(&feature, &default_identifier_sources()).is_none());
    }

    #[test]
    fn polygon_and_multipolygon_are_flattened_into_buckets() {
        let result = run(vec![
            CountryFeature::polygon("FRA", square(0, 0)),
            CountryFeature::multi_polygon("USA", vec![square(10, 10), square(20, 20)]),
            CountryFeature::polygon("DEU", square(1, 1)),
        ])
        .unwrap();

        let features = &result.collection.features;
        assert_eq!(features.len(), 2);
        assert_eq!(features[0].id, "europe");
        assert_eq!(
            features[0].geometry.coordinates,
            vec![square(0, 0), square(1, 1)]
        );
        assert_eq!(features[1].id, "north-america");
        assert_eq!(
            features[1].geometry.coordinates,
            vec![square(10, 10), square(20, 20)]
        );
        assert_eq!(result.report.input.classified, 3);
        assert_eq!(result.report.output.ring_sets, 4);
    }

    #[test]
    fn output_follows_table_order_not_input_order() {
        let result = run(vec![
            CountryFeature::polygon("AUS", square(0, 0)),
            CountryFeature::polygon("IND", square(0, 0)),
            CountryFeature::polygon("FRA", square(0, 0)),
        ])
        .unwrap();

        let ids: Vec<&str> = result
            .collection
            .features
            .iter()
            .map(|f| f.id.as_str())
            .collect();
        assert_eq!(ids, vec!["europe", "south-asia", "oceania"]);
    }

    #[test]
    fn skipped_features_are_reported() {
        let mut no_geometry = CountryFeature::polygon("ITA", square(0, 0));
        no_geometry.geometry = None;

        let result = run(vec![
            CountryFeature::polygon("ATA", square(0, 0)),
            CountryFeature::polygon("", square(0, 0)),
            no_geometry,
        ])
        .unwrap();

        assert!(result.collection.features.is_empty());
        let report = &result.report;
        assert_eq!(report.skipped_count(), 3);
        assert_eq!(report.count_of(AggregateIssueCode::UnmappedCountryCode), 1);
        assert_eq!(report.count_of(AggregateIssueCode::Unclassifiable), 1);
        assert_eq!(report.count_of(AggregateIssueCode::MissingGeometry), 1);
    }

    #[test]
    fn unsupported_geometry_fails_by_default() {
        let mut point = CountryFeature::polygon("FRA", square(0, 0));
        point.geometry = Some(RawGeometry {
            kind: "Point".into(),
            coordinates: json!([2, 46]),
        });

        let err = run(vec![point]).unwrap_err();
        match err {
            RegionMapError::UnsupportedGeometry {
                feature,
                geometry_type,
            } => {
                assert_eq!(feature, "FRA");
                assert_eq!(geometry_type, "Point");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unsupported_geometry_can_be_skipped() {
        let mut line = CountryFeature::polygon("FRA", square(0, 0));
        line.geometry = Some(RawGeometry {
            kind: "LineString".into(),
            coordinates: json!([[0, 0], [1, 1]]),
        });

        let opts = AggregateOptions {
            unsupported_geometry: UnsupportedGeometryPolicy::Skip,
            ..Default::default()
        };
        let input =
            CountryCollection::new(vec![line, CountryFeature::polygon("DEU", square(0, 0))]);
        let result = aggregate(&input, &ClassificationTable::builtin(), &opts).unwrap();

        assert_eq!(result.collection.features.len(), 1);
        assert_eq!(
            result
                .report
                .count_of(AggregateIssueCode::UnsupportedGeometrySkipped),
            1
        );
    }

    #[test]
    fn unsupported_geometry_on_unmapped_feature_is_ignored() {
        let mut point = CountryFeature::polygon("ATA", square(0, 0));
        point.geometry = Some(RawGeometry {
            kind: "Point".into(),
            coordinates: json!([0, -90]),
        });
        assert!(run(vec![point]).is_ok());
    }

    #[test]
    fn malformed_coordinates_fail() {
        let mut bad = CountryFeature::polygon("FRA", square(0, 0));
        bad.geometry = Some(RawGeometry {
            kind: "Polygon".into(),
            coordinates: json!("nope"),
        });
        assert!(matches!(
            run(vec![bad]),
            Err(RegionMapError::InputGeometry { .. })
        ));
    }

    #[test]
    fn custom_identifier_sources() {
        let feature = CountryFeature::polygon("x", square(0, 0))
            .without_id()
            .with_property("adm0_a3", "FRA");
        let opts = AggregateOptions {
            id_sources: vec![IdentifierSource::Property("adm0_a3".into())],
            ..Default::default()
        };
        let input = CountryCollection::new(vec![feature]);
        let result = aggregate(&input, &ClassificationTable::builtin(), &opts).unwrap();
        assert_eq!(result.collection.features[0].id, "europe");
    }
}
