//! Tests for geographic value objects

use core_kernel::geo::{BoundingBox, Coordinate, GeoError, INDIA_BOUNDS};

#[test]
fn test_coordinate_construction() {
    let coord = Coordinate::new(23.2599, 77.4126).unwrap();
    assert_eq!(coord.latitude, 23.2599);
    assert_eq!(coord.longitude, 77.4126);
}

#[test]
fn test_coordinate_rejects_out_of_range_latitude() {
    assert_eq!(
        Coordinate::new(95.0, 77.0),
        Err(GeoError::InvalidLatitude(95.0))
    );
    assert_eq!(
        Coordinate::new(-95.0, 77.0),
        Err(GeoError::InvalidLatitude(-95.0))
    );
}

#[test]
fn test_coordinate_rejects_out_of_range_longitude() {
    assert_eq!(
        Coordinate::new(23.0, 185.0),
        Err(GeoError::InvalidLongitude(185.0))
    );
}

#[test]
fn test_coordinate_accepts_boundary_values() {
    assert!(Coordinate::new(90.0, 180.0).is_ok());
    assert!(Coordinate::new(-90.0, -180.0).is_ok());
}

#[test]
fn test_coordinate_display() {
    let coord = Coordinate::new(23.2599, 77.4126).unwrap();
    assert_eq!(coord.to_string(), "(23.2599, 77.4126)");
}

#[test]
fn test_india_bounds_values() {
    assert_eq!(INDIA_BOUNDS.min_latitude, 6.0);
    assert_eq!(INDIA_BOUNDS.max_latitude, 37.0);
    assert_eq!(INDIA_BOUNDS.min_longitude, 68.0);
    assert_eq!(INDIA_BOUNDS.max_longitude, 97.0);
}

#[test]
fn test_india_bounds_contains_interior_points() {
    for (lat, lng) in [(23.2599, 77.4126), (11.6, 76.1), (28.6, 77.2)] {
        let coord = Coordinate::new(lat, lng).unwrap();
        assert!(INDIA_BOUNDS.contains(&coord), "expected {} inside", coord);
    }
}

#[test]
fn test_india_bounds_edges_are_inclusive() {
    let south_west = Coordinate::new(6.0, 68.0).unwrap();
    let north_east = Coordinate::new(37.0, 97.0).unwrap();
    assert!(INDIA_BOUNDS.contains(&south_west));
    assert!(INDIA_BOUNDS.contains(&north_east));
}

#[test]
fn test_india_bounds_rejects_outside_points() {
    let too_south = Coordinate::new(3.0, 77.0).unwrap();
    let too_west = Coordinate::new(23.0, 60.0).unwrap();
    let too_east = Coordinate::new(23.0, 99.0).unwrap();
    assert!(!INDIA_BOUNDS.contains(&too_south));
    assert!(!INDIA_BOUNDS.contains(&too_west));
    assert!(!INDIA_BOUNDS.contains(&too_east));
}

#[test]
fn test_bounding_box_axis_checks_are_independent() {
    // Latitude inside, longitude outside
    assert!(INDIA_BOUNDS.contains_latitude(23.0));
    assert!(!INDIA_BOUNDS.contains_longitude(60.0));
}

#[test]
fn test_default_bounding_box_is_india() {
    assert_eq!(BoundingBox::default(), INDIA_BOUNDS);
}

#[test]
fn test_coordinate_serde_roundtrip() {
    let coord = Coordinate::new(23.2599, 77.4126).unwrap();
    let json = serde_json::to_string(&coord).unwrap();
    let back: Coordinate = serde_json::from_str(&json).unwrap();
    assert_eq!(coord, back);
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_containment_agrees_with_axis_checks(
            lat in -90.0f64..90.0,
            lng in -180.0f64..180.0,
        ) {
            let coord = Coordinate::new(lat, lng).unwrap();
            prop_assert_eq!(
                INDIA_BOUNDS.contains(&coord),
                INDIA_BOUNDS.contains_latitude(lat) && INDIA_BOUNDS.contains_longitude(lng)
            );
        }

        #[test]
        fn prop_world_range_coordinates_construct(
            lat in -90.0f64..=90.0,
            lng in -180.0f64..=180.0,
        ) {
            prop_assert!(Coordinate::new(lat, lng).is_ok());
        }
    }
}
