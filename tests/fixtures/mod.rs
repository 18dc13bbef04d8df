//! Test fixtures for freight-planner.
//!
//! Provides realistic test data including:
//! - Real Delhi NCR locations
//! - Cargo presets and request builders

pub mod delhi_locations;

use freight_planner::{CargoSpec, Coordinate, OptimizeRequest};

/// Pickup in north-west Delhi, ~22 km from `DELIVERY`.
pub const PICKUP: Coordinate = Coordinate::new(28.70, 77.10);
pub const DELIVERY: Coordinate = Coordinate::new(28.55, 77.25);

/// Pickup and delivery ~39.6 km apart: beyond a van's single-leg range but
/// reachable by relaying through the west hub.
pub const FAR_PICKUP: Coordinate = Coordinate::new(28.80, 77.03);
pub const FAR_DELIVERY: Coordinate = Coordinate::new(28.52, 77.28);

/// 50 kg, 80x60x60 cm: too heavy for a two-wheeler.
pub fn crate_cargo() -> CargoSpec {
    CargoSpec::new(50.0, 80.0, 60.0, 60.0)
}

/// 2 kg, 20x20x10 cm: fits every class.
pub fn parcel() -> CargoSpec {
    CargoSpec::new(2.0, 20.0, 20.0, 10.0)
}

pub fn request(pickup: Coordinate, delivery: Coordinate, cargo: CargoSpec) -> OptimizeRequest {
    OptimizeRequest::new(pickup, delivery, cargo)
}

pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {} within {} of {}",
        actual,
        tolerance,
        expected
    );
}
