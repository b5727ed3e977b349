//! The compiled-in classification table.
//!
//! Regions are listed in chapter order; that order is the output feature
//! order. Each region carries its member countries as ISO 3166-1 alpha-3
//! codes (plus `XKX` for Kosovo, which has no official code).

use super::{ClassificationTable, Region, RegionMetadata};

struct BuiltinRegion {
    id: &'static str,
    name: &'static str,
    chapter: &'static str,
    color: &'static str,
    countries: &'static [&'static str],
}

const BUILTIN_REGIONS: &[BuiltinRegion] = &[
    BuiltinRegion {
        id: "europe",
        name: "Europe",
        chapter: "../02-europe/index.html",
        color: "#4A90A4",
        countries: &[
            "AUT", "BEL", "BGR", "HRV", "CYP", "CZE", "DNK", "EST", "FIN", "FRA", "DEU", "GRC",
            "HUN", "IRL", "ITA", "LVA", "LTU", "LUX", "MLT", "NLD", "POL", "PRT", "ROU", "SVK",
            "SVN", "ESP", "SWE", "GBR", "ISL", "NOR", "CHE", "ALB", "BIH", "MKD", "MNE", "SRB",
            "XKX", "AND", "LIE", "MCO", "SMR", "VAT", "BLR", "UKR", "MDA",
        ],
    },
    BuiltinRegion {
        id: "russia",
        name: "Russia & Central Asia",
        chapter: "../03-russia/index.html",
        color: "#7B68EE",
        countries: &["RUS", "KAZ", "KGZ", "TJK", "TKM", "UZB", "GEO", "ARM", "AZE"],
    },
    BuiltinRegion {
        id: "north-america",
        name: "North America",
        chapter: "../04-north-america/index.html",
        color: "#2E8B57",
        countries: &["USA", "CAN", "GRL"],
    },
    BuiltinRegion {
        id: "latin-america",
        name: "Latin America & Caribbean",
        chapter: "../05-latin-america/index.html",
        color: "#DAA520",
        countries: &[
            "MEX", "GTM", "BLZ", "SLV", "HND", "NIC", "CRI", "PAN", "COL", "VEN", "GUY", "SUR",
            "ECU", "PER", "BRA", "BOL", "PRY", "URY", "ARG", "CHL", "CUB", "HTI", "DOM", "JAM",
            "BHS", "TTO", "BRB", "LCA", "VCT", "GRD", "ATG", "DMA", "KNA",
        ],
    },
    BuiltinRegion {
        id: "africa-sub",
        name: "Sub-Saharan Africa",
        chapter: "../06-sub-saharan-africa/index.html",
        color: "#CD853F",
        countries: &[
            "MRT", "SEN", "GMB", "CPV", "MLI", "BFA", "NER", "NGA", "BEN", "TGO", "GHA", "CIV",
            "LBR", "SLE", "GIN", "GNB", "CMR", "CAF", "TCD", "SDN", "SSD", "ETH", "ERI", "DJI",
            "SOM", "KEN", "UGA", "RWA", "BDI", "TZA", "COD", "COG", "GAB", "GNQ", "STP", "AGO",
            "ZMB", "MWI", "MOZ", "ZWE", "BWA", "NAM", "ZAF", "LSO", "SWZ", "MDG", "MUS", "SYC",
            "COM",
        ],
    },
    BuiltinRegion {
        id: "mena",
        name: "North Africa & SW Asia",
        chapter: "../07-north-africa-sw-asia/index.html",
        color: "#DC143C",
        countries: &[
            "MAR", "DZA", "TUN", "LBY", "EGY", "ISR", "LBN", "JOR", "SYR", "IRQ", "SAU", "YEM",
            "OMN", "ARE", "QAT", "BHR", "KWT", "TUR", "IRN", "PSE", "ESH",
        ],
    },
    BuiltinRegion {
        id: "south-asia",
        name: "South Asia",
        chapter: "../08-south-asia/index.html",
        color: "#FF8C00",
        countries: &["AFG", "PAK", "IND", "NPL", "BTN", "BGD", "LKA", "MDV"],
    },
    BuiltinRegion {
        id: "east-asia",
        name: "East Asia",
        chapter: "../09-east-asia/index.html",
        color: "#FF4500",
        countries: &["CHN", "MNG", "PRK", "KOR", "JPN", "TWN"],
    },
    BuiltinRegion {
        id: "southeast-asia",
        name: "Southeast Asia",
        chapter: "../10-southeast-asia/index.html",
        color: "#32CD32",
        countries: &["MMR", "THA", "LAO", "VNM", "KHM", "MYS", "SGP", "IDN", "BRN", "PHL", "TLS"],
    },
    BuiltinRegion {
        id: "oceania",
        name: "Australia & Oceania",
        chapter: "../11-australia-oceania/index.html",
        color: "#9370DB",
        countries: &[
            "AUS", "NZL", "PNG", "SLB", "VUT", "NCL", "FJI", "TON", "WSM", "KIR", "MHL", "FSM",
            "PLW", "NRU", "TUV",
        ],
    },
];

/// Builds the compiled-in table.
///
/// The static data is checked by the tests below, so construction here
/// skips the validation that externally supplied tables go through.
pub(super) fn builtin_table() -> ClassificationTable {
    let regions = BUILTIN_REGIONS
        .iter()
        .map(|r| Region {
            id: r.id.to_string(),
            metadata: RegionMetadata::new(r.name, r.chapter, r.color),
            countries: r.countries.iter().map(|c| c.to_string()).collect(),
        })
        .collect();

    ClassificationTable::from_regions_unchecked(regions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn builtin_table_passes_validation() {
        let table = builtin_table();
        let regions: Vec<Region> = table.regions().cloned().collect();
        ClassificationTable::from_regions(regions).expect("builtin table should be valid");
    }

    #[test]
    fn builtin_table_has_ten_regions_in_chapter_order() {
        let table = builtin_table();
        let ids: Vec<&str> = table.regions().map(|r| r.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "europe",
                "russia",
                "north-america",
                "latin-america",
                "africa-sub",
                "mena",
                "south-asia",
                "east-asia",
                "southeast-asia",
                "oceania",
            ]
        );
    }

    #[test]
    fn builtin_country_codes_are_unique_and_three_letters() {
        let mut seen = HashSet::new();
        for region in BUILTIN_REGIONS {
            for code in region.countries {
                assert_eq!(code.len(), 3, "bad code {code}");
                assert!(code.chars().all(|c| c.is_ascii_uppercase()), "bad code {code}");
                assert!(seen.insert(*code), "duplicate code {code}");
            }
        }
        assert_eq!(seen.len(), 200);
    }

    #[test]
    fn antarctica_is_not_classified() {
        let table = builtin_table();
        assert!(table.region_of("ATA").is_none());
    }
}
