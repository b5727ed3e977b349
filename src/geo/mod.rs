//! GeoJSON types for the country input and the region output.
//!
//! # Example
//!
//! ```
//! use regionmap::geo::{CountryCollection, CountryFeature, Geometry};
//! use serde_json::Number;
//!
//! let square = vec![vec![
//!     vec![Number::from(0i64), Number::from(0i64)],
//!     vec![Number::from(1i64), Number::from(0i64)],
//!     vec![Number::from(1i64), Number::from(1i64)],
//!     vec![Number::from(0i64), Number::from(0i64)],
//! ]];
//! let collection = CountryCollection::new(vec![CountryFeature::polygon("FRA", square.clone())]);
//!
//! let geometry = collection.features[0].geometry.as_ref().unwrap();
//! assert_eq!(geometry.decode().unwrap(), Geometry::Polygon(square));
//! ```

pub mod io_asset;
pub mod io_geojson;
mod model;

pub use model::{
    CollectionTag, CountryCollection, CountryFeature, FeatureTag, Geometry, MultiPolygon,
    MultiPolygonTag, Position, RawGeometry, RegionCollection, RegionFeature, Ring, RingSet,
};
