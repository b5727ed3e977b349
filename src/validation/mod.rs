//! Region asset validation.
//!
//! Checks an emitted region collection against what the map front end
//! relies on:
//! - Identity (unique region ids known to the classification table)
//! - Properties (non-empty name, chapter and color; hex colors)
//! - Geometry (non-empty MultiPolygons, closed rings, WGS84 ranges)

mod report;

pub use report::{IssueCode, IssueContext, Severity, ValidationIssue, ValidationReport};

use std::collections::HashMap;

use crate::geo::{Position, RegionCollection, RegionFeature, Ring};
use crate::table::ClassificationTable;

/// Options for validation behavior.
#[derive(Clone, Debug, Default)]
pub struct ValidateOptions {
    /// If true, treat warnings as errors.
    pub strict: bool,
}

/// Validates a region collection and returns a report of all issues found.
///
/// Geometry issues are reported at most once per ring and code, so a
/// badly broken boundary does not flood the report.
pub fn validate_collection(
    collection: &RegionCollection,
    table: &ClassificationTable,
) -> ValidationReport {
    let mut report = ValidationReport::new();
    let mut seen_ids: HashMap<&str, usize> = HashMap::new();

    for (idx, feature) in collection.features.iter().enumerate() {
        if let Some(first_idx) = seen_ids.get(feature.id.as_str()) {
            report.add(ValidationIssue::error(
                IssueCode::DuplicateRegionId,
                format!(
                    "Duplicate region id '{}' (first seen at index {})",
                    feature.id, first_idx
                ),
                IssueContext::Feature {
                    id: feature.id.clone(),
                },
            ));
        } else {
            seen_ids.insert(&feature.id, idx);
        }

        validate_properties(feature, table, &mut report);
        validate_geometry(feature, &mut report);
    }

    report
}

fn validate_properties(
    feature: &RegionFeature,
    table: &ClassificationTable,
    report: &mut ValidationReport,
) {
    let context = || IssueContext::Feature {
        id: feature.id.clone(),
    };
    let props = &feature.properties;

    match table.get(&feature.id) {
        None => report.add(ValidationIssue::warning(
            IssueCode::UnknownRegion,
            format!("'{}' is not a region in the table", feature.id),
            context(),
        )),
        Some(region) if region.metadata != *props => report.add(ValidationIssue::warning(
            IssueCode::MetadataMismatch,
            format!(
                "properties {:?} differ from table metadata {:?}",
                props, region.metadata
            ),
            context(),
        )),
        Some(_) => {}
    }

    for (field, value) in [
        ("name", &props.name),
        ("chapter", &props.chapter),
        ("color", &props.color),
    ] {
        if value.trim().is_empty() {
            report.add(ValidationIssue::error(
                IssueCode::EmptyProperty,
                format!("Empty '{}' property", field),
                context(),
            ));
        }
    }

    if !props.color.is_empty() && !is_hex_color(&props.color) {
        report.add(ValidationIssue::warning(
            IssueCode::InvalidColor,
            format!("Color '{}' is not #RRGGBB", props.color),
            context(),
        ));
    }
}

fn validate_geometry(feature: &RegionFeature, report: &mut ValidationReport) {
    let polygons = &feature.geometry.coordinates;
    if polygons.is_empty() {
        report.add(ValidationIssue::error(
            IssueCode::EmptyGeometry,
            "MultiPolygon has no polygons",
            IssueContext::Feature {
                id: feature.id.clone(),
            },
        ));
        return;
    }

    for (p_idx, rings) in polygons.iter().enumerate() {
        if rings.is_empty() {
            report.add(ValidationIssue::error(
                IssueCode::EmptyRingSet,
                "Polygon has no rings",
                IssueContext::Ring {
                    id: feature.id.clone(),
                    polygon: p_idx,
                    ring: 0,
                },
            ));
            continue;
        }

        for (r_idx, ring) in rings.iter().enumerate() {
            let context = IssueContext::Ring {
                id: feature.id.clone(),
                polygon: p_idx,
                ring: r_idx,
            };
            validate_ring(ring, context, report);
        }
    }
}

fn validate_ring(ring: &Ring, context: IssueContext, report: &mut ValidationReport) {
    if let Some((pos_idx, pos)) = ring.iter().enumerate().find(|(_, p)| p.len() < 2) {
        report.add(ValidationIssue::error(
            IssueCode::InvalidPosition,
            format!(
                "Position {} has {} value(s), expected at least 2",
                pos_idx,
                pos.len()
            ),
            context,
        ));
        // Closure and range checks need complete positions
        return;
    }

    if ring.len() < 4 {
        report.add(ValidationIssue::warning(
            IssueCode::DegenerateRing,
            format!("Ring has {} position(s), expected at least 4", ring.len()),
            context.clone(),
        ));
    }

    if let (Some(first), Some(last)) = (ring.first(), ring.last()) {
        if !same_position(first, last) {
            report.add(ValidationIssue::warning(
                IssueCode::UnclosedRing,
                "First and last positions differ",
                context.clone(),
            ));
        }
    }

    let out_of_range = ring.iter().find(|pos| {
        let lon = pos[0].as_f64().unwrap_or(f64::NAN);
        let lat = pos[1].as_f64().unwrap_or(f64::NAN);
        !(-180.0..=180.0).contains(&lon) || !(-90.0..=90.0).contains(&lat)
    });
    if let Some(pos) = out_of_range {
        report.add(ValidationIssue::warning(
            IssueCode::CoordinateOutOfRange,
            format!("Position [{}, {}] is outside WGS84 bounds", pos[0], pos[1]),
            context,
        ));
    }
}

/// Compares positions by value, so `46` and `46.0` are the same coordinate.
fn same_position(a: &Position, b: &Position) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .zip(b)
            .all(|(x, y)| x == y || x.as_f64().is_some_and(|x| y.as_f64() == Some(x)))
}

fn is_hex_color(color: &str) -> bool {
    color
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}
