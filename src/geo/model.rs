//! GeoJSON shapes read from the country dataset and written for regions.
//!
//! Input types are permissive: `id`, `properties` and `geometry` may all be
//! missing, and geometry coordinates stay as raw JSON until a feature is
//! actually classified. Output types are strict and always describe a
//! `FeatureCollection` of `MultiPolygon` features.
//!
//! Coordinates are carried as [`serde_json::Number`] so integers stay
//! integers and floats keep their shortest round-trip form. Point data is
//! never inspected or altered on the way through.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::table::RegionMetadata;

/// A single position: `[longitude, latitude]`, possibly with extra values.
pub type Position = Vec<Number>;

/// A closed sequence of positions.
pub type Ring = Vec<Position>;

/// The rings of one polygon: an outer boundary followed by any holes.
pub type RingSet = Vec<Ring>;

// ============================================================================
// Input
// ============================================================================

/// The country-boundary input collection.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CountryCollection {
    /// Expected to be `"FeatureCollection"`; other values are tolerated.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// One feature per country.
    pub features: Vec<CountryFeature>,
}

impl CountryCollection {
    /// Creates a `FeatureCollection` from features.
    pub fn new(features: Vec<CountryFeature>) -> Self {
        Self {
            kind: Some("FeatureCollection".into()),
            features,
        }
    }
}

/// One country in the input collection.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CountryFeature {
    /// Primary identifier; only a non-empty string is meaningful.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    /// Free-form properties; `iso_a3` is the fallback identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Map<String, Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<RawGeometry>,
}

impl CountryFeature {
    /// Creates a feature with a string `id` and a Polygon geometry.
    pub fn polygon(id: impl Into<String>, rings: RingSet) -> Self {
        Self {
            id: Some(Value::String(id.into())),
            properties: None,
            geometry: Some(RawGeometry::polygon(rings)),
        }
    }

    /// Creates a feature with a string `id` and a MultiPolygon geometry.
    pub fn multi_polygon(id: impl Into<String>, polygons: Vec<RingSet>) -> Self {
        Self {
            id: Some(Value::String(id.into())),
            properties: None,
            geometry: Some(RawGeometry::multi_polygon(polygons)),
        }
    }

    /// Sets a property value.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    /// Removes the `id` field.
    pub fn without_id(mut self) -> Self {
        self.id = None;
        self
    }

    /// Returns the `id` if it is a string, for diagnostics.
    pub fn id_str(&self) -> Option<&str> {
        self.id.as_ref().and_then(Value::as_str)
    }
}

/// A geometry whose coordinates have not been decoded yet.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RawGeometry {
    /// The GeoJSON geometry type, e.g. `"Polygon"`.
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub coordinates: Value,
}

impl RawGeometry {
    /// Creates a Polygon geometry.
    pub fn polygon(rings: RingSet) -> Self {
        Self {
            kind: "Polygon".into(),
            coordinates: ring_set_value(rings),
        }
    }

    /// Creates a MultiPolygon geometry.
    pub fn multi_polygon(polygons: Vec<RingSet>) -> Self {
        Self {
            kind: "MultiPolygon".into(),
            coordinates: Value::Array(polygons.into_iter().map(ring_set_value).collect()),
        }
    }

    /// Decodes the coordinates according to the geometry type.
    ///
    /// Unknown types are returned as [`Geometry::Unsupported`] without
    /// looking at their coordinates.
    ///
    /// # Errors
    /// Returns an error if a Polygon or MultiPolygon has coordinates that do
    /// not nest as the type requires.
    pub fn decode(&self) -> Result<Geometry, serde_json::Error> {
        match self.kind.as_str() {
            "Polygon" => RingSet::deserialize(&self.coordinates).map(Geometry::Polygon),
            "MultiPolygon" => {
                Vec::<RingSet>::deserialize(&self.coordinates).map(Geometry::MultiPolygon)
            }
            other => Ok(Geometry::Unsupported(other.to_string())),
        }
    }
}

fn ring_set_value(rings: RingSet) -> Value {
    Value::Array(
        rings
            .into_iter()
            .map(|ring| {
                Value::Array(
                    ring.into_iter()
                        .map(|pos| Value::Array(pos.into_iter().map(Value::Number).collect()))
                        .collect(),
                )
            })
            .collect(),
    )
}

/// A decoded input geometry.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Polygon(RingSet),
    MultiPolygon(Vec<RingSet>),
    /// Any other geometry type, by name.
    Unsupported(String),
}

// ============================================================================
// Output
// ============================================================================

/// Type tag for [`RegionCollection`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectionTag {
    #[default]
    FeatureCollection,
}

/// Type tag for [`RegionFeature`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureTag {
    #[default]
    Feature,
}

/// Type tag for [`MultiPolygon`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MultiPolygonTag {
    #[default]
    MultiPolygon,
}

/// The region collection consumed by the map front end.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionCollection {
    #[serde(rename = "type")]
    pub kind: CollectionTag,

    pub features: Vec<RegionFeature>,
}

impl RegionCollection {
    /// Creates a collection from region features.
    pub fn new(features: Vec<RegionFeature>) -> Self {
        Self {
            kind: CollectionTag::FeatureCollection,
            features,
        }
    }

    /// Total number of ring-sets across all features.
    pub fn ring_set_count(&self) -> usize {
        self.features
            .iter()
            .map(|f| f.geometry.coordinates.len())
            .sum()
    }
}

/// One merged region.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionFeature {
    #[serde(rename = "type")]
    pub kind: FeatureTag,

    /// Region id, e.g. `"europe"`.
    pub id: String,

    pub properties: RegionMetadata,

    pub geometry: MultiPolygon,
}

impl RegionFeature {
    /// Creates a region feature from its member ring-sets.
    pub fn new(id: impl Into<String>, properties: RegionMetadata, polygons: Vec<RingSet>) -> Self {
        Self {
            kind: FeatureTag::Feature,
            id: id.into(),
            properties,
            geometry: MultiPolygon::new(polygons),
        }
    }
}

/// A MultiPolygon geometry: a list of ring-sets.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiPolygon {
    #[serde(rename = "type")]
    pub kind: MultiPolygonTag,

    pub coordinates: Vec<RingSet>,
}

impl MultiPolygon {
    /// Creates a MultiPolygon from ring-sets.
    pub fn new(coordinates: Vec<RingSet>) -> Self {
        Self {
            kind: MultiPolygonTag::MultiPolygon,
            coordinates,
        }
    }
}
