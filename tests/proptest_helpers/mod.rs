#![allow(dead_code)]

use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};
use regionmap::geo::{CountryCollection, CountryFeature, Geometry, RingSet};
use regionmap::table::ClassificationTable;
use serde_json::Number;

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Country codes the generators draw from: every mapped code plus a few
/// codes outside every region.
pub fn code_pool() -> Vec<String> {
    let mut codes: Vec<String> = ClassificationTable::builtin()
        .regions()
        .flat_map(|r| r.countries.iter().cloned())
        .collect();
    codes.extend(["ATA", "-99", "ZZZ", "SXM"].map(String::from));
    codes
}

/// A closed square ring-set whose corner encodes `tag`, so every generated
/// ring-set is distinguishable from every other.
pub fn tagged_ring_set(tag: u32) -> RingSet {
    let x = i64::from(tag % 360) - 180;
    let y = i64::from(tag / 360) % 170 - 85;
    let n = |v: i64| Number::from(v);
    vec![vec![
        vec![n(x), n(y), n(i64::from(tag))],
        vec![n(x + 1), n(y)],
        vec![n(x + 1), n(y + 1)],
        vec![n(x), n(y), n(i64::from(tag))],
    ]]
}

/// Generator description of one country feature, before tags are assigned.
#[derive(Clone, Debug)]
pub struct FeatureShape {
    pub code: String,
    /// `None` for a Polygon, `Some(k)` for a MultiPolygon with `k` ring-sets.
    pub multi: Option<usize>,
    pub via_property: bool,
}

pub fn arb_feature_shape() -> BoxedStrategy<FeatureShape> {
    let pool = code_pool();
    (
        proptest::sample::select(pool),
        proptest::option::of(0usize..4),
        any::<bool>(),
    )
        .prop_map(|(code, multi, via_property)| FeatureShape {
            code,
            multi,
            via_property,
        })
        .boxed()
}

/// Builds a collection where every ring-set carries a unique tag.
pub fn build_collection(shapes: &[FeatureShape]) -> CountryCollection {
    let mut next_tag = 0u32;
    let mut take = || {
        next_tag += 1;
        tagged_ring_set(next_tag)
    };

    let features = shapes
        .iter()
        .map(|shape| {
            let feature = match shape.multi {
                None => CountryFeature::polygon(shape.code.as_str(), take()),
                Some(k) => CountryFeature::multi_polygon(
                    shape.code.as_str(),
                    (0..k).map(|_| take()).collect(),
                ),
            };
            if shape.via_property {
                feature
                    .without_id()
                    .with_property("iso_a3", shape.code.as_str())
            } else {
                feature
            }
        })
        .collect();

    CountryCollection::new(features)
}

pub fn arb_collection(max_features: usize) -> BoxedStrategy<CountryCollection> {
    proptest::collection::vec(arb_feature_shape(), 0..=max_features)
        .prop_map(|shapes| build_collection(&shapes))
        .boxed()
}

/// The ring-sets a feature contributes, in order.
pub fn ring_sets_of(feature: &CountryFeature) -> Vec<RingSet> {
    match feature.geometry.as_ref().map(|g| g.decode()) {
        Some(Ok(Geometry::Polygon(rings))) => vec![rings],
        Some(Ok(Geometry::MultiPolygon(polygons))) => polygons,
        _ => Vec::new(),
    }
}
