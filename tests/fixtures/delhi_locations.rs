//! Real Delhi NCR locations for realistic test fixtures.
//!
//! Coordinates are rounded to four decimals, close enough for haversine
//! quoting against the default hub registry.

use freight_planner::Coordinate;

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coords(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

// ============================================================================
// Landmarks and commercial districts
// ============================================================================

pub const LANDMARKS: &[Location] = &[
    Location::new("India Gate", 28.6129, 77.2295),
    Location::new("Connaught Place", 28.6315, 77.2167),
    Location::new("Chandni Chowk", 28.6506, 77.2303),
    Location::new("Saket", 28.5245, 77.2066),
];

// ============================================================================
// Industrial and residential areas across the service zones
// ============================================================================

pub const INDUSTRIAL: &[Location] = &[
    Location::new("Okhla Industrial Area", 28.5300, 77.2710),
    Location::new("Mundka Industrial Area", 28.6824, 77.0301),
    Location::new("Narela", 28.8527, 77.0929),
    Location::new("Rohini Sector 10", 28.7325, 77.1170),
    Location::new("Dwarka Sector 21", 28.5522, 77.0583),
    Location::new("Noida Sector 18", 28.5708, 77.3261),
    Location::new("Gurugram Cyber City", 28.4950, 77.0895),
];

// ============================================================================
// Intercity destinations, beyond the range of every vehicle class
// ============================================================================

pub const INTERCITY: &[Location] = &[
    Location::new("Agra", 27.1767, 78.0081),
    Location::new("Jaipur", 26.9124, 75.7873),
];

/// Every location inside the metro service area.
pub fn metro() -> Vec<&'static Location> {
    LANDMARKS.iter().chain(INDUSTRIAL.iter()).collect()
}
