//! The classification table: country code to region, region to metadata.
//!
//! A [`ClassificationTable`] is built once at startup (either the compiled-in
//! [`ClassificationTable::builtin`] table or one loaded from YAML) and then
//! passed by reference into the aggregation pipeline. It is never mutated
//! after construction.
//!
//! # Example
//!
//! ```
//! use regionmap::table::ClassificationTable;
//!
//! let table = ClassificationTable::builtin();
//! let region = table.region_of("FRA").expect("France is classified");
//! assert_eq!(region.id, "europe");
//! assert_eq!(table.metadata_of("europe").name, "Europe");
//! assert!(table.region_of("ATA").is_none());
//! ```

mod builtin;
pub mod io_yaml;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::RegionMapError;

/// Display metadata attached to a region's output feature.
///
/// Field order here is the key order of `properties` in the emitted data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionMetadata {
    /// Human-readable region name.
    pub name: String,

    /// Link to the chapter covering this region.
    pub chapter: String,

    /// Fill color as a `#RRGGBB` hex string.
    pub color: String,
}

impl RegionMetadata {
    /// Creates a new metadata record.
    pub fn new(
        name: impl Into<String>,
        chapter: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            chapter: chapter.into(),
            color: color.into(),
        }
    }
}

/// A macro-region and the countries that belong to it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Short stable key, e.g. `"europe"` or `"south-asia"`.
    pub id: String,

    #[serde(flatten)]
    pub metadata: RegionMetadata,

    /// Member country codes.
    #[serde(default)]
    pub countries: Vec<String>,
}

impl Region {
    /// Creates a new region with the given member countries.
    pub fn new<I, S>(id: impl Into<String>, metadata: RegionMetadata, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            metadata,
            countries: countries.into_iter().map(Into::into).collect(),
        }
    }
}

/// Immutable lookup from country code to region and from region to metadata.
#[derive(Clone, Debug)]
pub struct ClassificationTable {
    regions: Vec<Region>,
    region_index: HashMap<String, usize>,
    country_index: HashMap<String, usize>,
}

impl ClassificationTable {
    /// Returns the compiled-in table of ten macro-regions.
    pub fn builtin() -> Self {
        builtin::builtin_table()
    }

    /// Builds a table from regions in declaration order, validating it.
    ///
    /// # Errors
    /// Returns [`RegionMapError::InvalidTable`] if a region id is empty or
    /// repeated, a metadata field is empty, a country code is empty, or a
    /// country is listed under more than one region.
    pub fn from_regions(regions: Vec<Region>) -> Result<Self, RegionMapError> {
        let mut region_index = HashMap::with_capacity(regions.len());
        let mut country_index = HashMap::new();

        for (idx, region) in regions.iter().enumerate() {
            if region.id.trim().is_empty() {
                return Err(RegionMapError::InvalidTable(format!(
                    "region at position {} has an empty id",
                    idx
                )));
            }
            if region_index.insert(region.id.clone(), idx).is_some() {
                return Err(RegionMapError::InvalidTable(format!(
                    "duplicate region id '{}'",
                    region.id
                )));
            }

            let meta = &region.metadata;
            for (field, value) in [
                ("name", &meta.name),
                ("chapter", &meta.chapter),
                ("color", &meta.color),
            ] {
                if value.trim().is_empty() {
                    return Err(RegionMapError::InvalidTable(format!(
                        "region '{}' has an empty {}",
                        region.id, field
                    )));
                }
            }

            for code in &region.countries {
                if code.trim().is_empty() {
                    return Err(RegionMapError::InvalidTable(format!(
                        "region '{}' lists an empty country code",
                        region.id
                    )));
                }
                if let Some(first) = country_index.insert(code.clone(), idx) {
                    return Err(RegionMapError::InvalidTable(format!(
                        "country '{}' is listed under both '{}' and '{}'",
                        code, regions[first].id, region.id
                    )));
                }
            }
        }

        Ok(Self {
            regions,
            region_index,
            country_index,
        })
    }

    /// Builds lookup indexes without validation. Later duplicates win.
    fn from_regions_unchecked(regions: Vec<Region>) -> Self {
        let region_index = regions
            .iter()
            .enumerate()
            .map(|(idx, r)| (r.id.clone(), idx))
            .collect();
        let country_index = regions
            .iter()
            .enumerate()
            .flat_map(|(idx, r)| r.countries.iter().map(move |c| (c.clone(), idx)))
            .collect();

        Self {
            regions,
            region_index,
            country_index,
        }
    }

    /// Looks up the region a country belongs to.
    ///
    /// `None` means the country is deliberately outside every region.
    pub fn region_of(&self, country_code: &str) -> Option<&Region> {
        self.position_of(country_code).map(|idx| &self.regions[idx])
    }

    /// Returns the declaration-order position of a country's region.
    pub(crate) fn position_of(&self, country_code: &str) -> Option<usize> {
        self.country_index.get(country_code).copied()
    }

    /// Looks up a region by id.
    pub fn get(&self, region_id: &str) -> Option<&Region> {
        self.region_index
            .get(region_id)
            .map(|&idx| &self.regions[idx])
    }

    /// Returns the display metadata for a region.
    ///
    /// # Panics
    /// Panics if `region_id` is not one of this table's regions. Region ids
    /// come from the table itself, so an unknown id is a programming error.
    pub fn metadata_of(&self, region_id: &str) -> &RegionMetadata {
        match self.get(region_id) {
            Some(region) => &region.metadata,
            None => panic!("unknown region id '{}'", region_id),
        }
    }

    /// Iterates regions in declaration order.
    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    /// Number of regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Returns true if the table has no regions.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Number of classified country codes.
    pub fn country_count(&self) -> usize {
        self.country_index.len()
    }
}
