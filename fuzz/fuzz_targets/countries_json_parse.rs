//! Fuzz target for country GeoJSON parsing and aggregation.
//!
//! This fuzzer feeds arbitrary byte sequences to the country collection
//! parser and aggregates whatever parses, checking for panics or hangs.
//!
//! Run with:
//!   cargo +nightly fuzz run countries_json_parse

#![no_main]

use libfuzzer_sys::fuzz_target;
use regionmap::aggregate::{aggregate, AggregateOptions, UnsupportedGeometryPolicy};
use regionmap::geo::io_geojson::from_countries_slice;
use regionmap::table::ClassificationTable;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let Ok(countries) = from_countries_slice(data) else {
        return;
    };

    let opts = AggregateOptions {
        unsupported_geometry: UnsupportedGeometryPolicy::Skip,
        ..Default::default()
    };
    let _ = aggregate(&countries, &ClassificationTable::builtin(), &opts);
});
