#![allow(dead_code)]

use geomark::geo::GeoCoord;
use geomark::model::{AreaPointRecord, AreaRecord, CameraRecord, PointRecord, ProjectFile};
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

/// Slightly inside the mercator band so projection round-trips stay valid.
pub const SAFE_LATITUDE: f64 = 85.0;

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

/// Coordinates on a micro-degree grid, so their JSON text parses back to
/// the identical `f64`.
pub fn arb_geo() -> BoxedStrategy<GeoCoord> {
    let max_lat = (SAFE_LATITUDE * 1e6) as i64;
    (-max_lat..=max_lat, -180_000_000i64..=180_000_000)
        .prop_map(|(lat, lon)| GeoCoord::new(lat as f64 / 1e6, lon as f64 / 1e6))
        .boxed()
}

/// Coordinates guaranteed to fail the map's range check.
pub fn arb_invalid_geo() -> BoxedStrategy<GeoCoord> {
    prop_oneof![
        (85.06f64..=1000.0, -180.0f64..=180.0).prop_map(|(lat, lon)| GeoCoord::new(lat, lon)),
        (-1000.0f64..=-85.06, -180.0f64..=180.0).prop_map(|(lat, lon)| GeoCoord::new(lat, lon)),
        (-80.0f64..=80.0, 180.001f64..=1000.0).prop_map(|(lat, lon)| GeoCoord::new(lat, lon)),
        (-80.0f64..=80.0, -1000.0f64..=-180.001).prop_map(|(lat, lon)| GeoCoord::new(lat, lon)),
        Just(GeoCoord::new(f64::NAN, 0.0)),
        Just(GeoCoord::new(0.0, f64::INFINITY)),
    ]
    .boxed()
}

pub fn arb_color() -> BoxedStrategy<String> {
    any::<u32>()
        .prop_map(|argb| format!("#{:08X}", argb | 0x0100_0000))
        .boxed()
}

fn name_strategy() -> BoxedStrategy<String> {
    proptest::string::string_regex("[A-Za-z0-9 ]{0,16}")
        .expect("valid name regex")
        .boxed()
}

pub fn arb_point_record() -> BoxedStrategy<PointRecord> {
    (arb_geo(), name_strategy(), arb_color(), 1u32..=1000)
        .prop_map(|(geo, name, color, size)| PointRecord {
            longitude: geo.longitude,
            latitude: geo.latitude,
            name,
            color,
            size: size as f64 / 100.0,
        })
        .boxed()
}

pub fn arb_area_record() -> BoxedStrategy<AreaRecord> {
    (
        name_strategy(),
        proptest::collection::vec(arb_geo(), 3..=8),
        arb_color(),
        arb_color(),
    )
        .prop_map(|(name, vertices, fill_color, border_color)| AreaRecord {
            name,
            points: vertices
                .into_iter()
                .map(|v| AreaPointRecord {
                    longitude: v.longitude,
                    latitude: v.latitude,
                })
                .collect(),
            fill_color,
            border_color,
        })
        .boxed()
}

pub fn arb_project(max_points: usize, max_areas: usize) -> BoxedStrategy<ProjectFile> {
    (
        proptest::collection::vec(arb_point_record(), 0..=max_points),
        proptest::collection::vec(arb_area_record(), 0..=max_areas),
        (-100_000_000i64..=100_000_000, -100_000_000i64..=100_000_000, 1u32..=5_000_000),
    )
        .prop_map(|(points, areas, (center_x, center_y, resolution))| ProjectFile {
            camera: CameraRecord {
                center_x: center_x as f64 / 100.0,
                center_y: center_y as f64 / 100.0,
                resolution: resolution as f64 / 100.0,
                rotation: 0.0,
            },
            points,
            areas,
        })
        .boxed()
}
