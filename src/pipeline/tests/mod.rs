//! Tests for the POI pipeline
//!
//! Unit tests for each stage plus end-to-end runs of the processor.

pub mod synthesis_tests;

// Test helper functions and fixtures
use crate::models::RawPoi;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::json;

/// Seeded generator so every test draws the same sequence
pub fn test_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Point geometry derived from the record id so distinct ids never collide
pub fn point_geometry(id: u32) -> serde_json::Value {
    json!({
        "type": "Point",
        "coordinates": [-4.0 + f64::from(id) * 0.001, 5.3]
    })
}

/// Bare node with identity and geometry only
pub fn create_test_poi(id: u32) -> RawPoi {
    RawPoi::new(id.to_string(), "node", point_geometry(id))
}

pub fn create_shop_poi(id: u32, shop: &str) -> RawPoi {
    create_test_poi(id).with_shop(shop).with_name(format!("Shop {}", id))
}

pub fn create_amenity_poi(id: u32, amenity: &str) -> RawPoi {
    create_test_poi(id)
        .with_amenity(amenity)
        .with_name(format!("Amenity {}", id))
}

pub fn create_tourism_poi(id: u32, tourism: &str) -> RawPoi {
    create_test_poi(id).with_tourism(tourism)
}

/// Mixed batch resembling a city export
///
/// Contains one exact duplicate, one record without any category, one
/// excluded category and one placeholder shop without a fallback.
pub fn create_mixed_batch() -> Vec<RawPoi> {
    let fuel = create_amenity_poi(1, "fuel").with_opening_hours("24/7");
    vec![
        fuel.clone(),
        fuel,
        create_shop_poi(2, "bakery").with_opening_hours("07:00-12:00; 15:00-20:00"),
        create_amenity_poi(3, "bar").with_opening_hours("22:00-02:00"),
        create_amenity_poi(4, "casino"),
        create_test_poi(5).with_name("Park bench"),
        create_shop_poi(6, "yes"),
        create_amenity_poi(7, "pharmacy").with_opening_hours("closed"),
        create_tourism_poi(8, "hotel"),
        create_shop_poi(9, "supermarket"),
    ]
}
