//! Polyline representation for route geometries.
//!
//! Routes are kept as decoded coordinates inside the core. Encoding to the
//! compact polyline format happens at the boundary, when a quote is handed to
//! a map renderer.

use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;
use crate::haversine::distance_km;

/// A route geometry as an ordered list of coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Coordinate>,
}

impl Polyline {
    /// Creates a new Polyline from route coordinates.
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    /// Returns the coordinate points.
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    /// Consumes the polyline and returns the points.
    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }

    /// Sum of the great-circle lengths of every segment.
    pub fn length_km(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| distance_km(pair[0], pair[1]))
            .sum()
    }

    /// Encode with the 5-decimal encoded polyline algorithm used by web map
    /// APIs.
    pub fn encode(&self) -> String {
        let mut encoded = String::new();
        let (mut prev_lat, mut prev_lng) = (0i64, 0i64);
        for point in &self.points {
            let lat = (point.lat * 1e5).round() as i64;
            let lng = (point.lng * 1e5).round() as i64;
            encode_value(lat - prev_lat, &mut encoded);
            encode_value(lng - prev_lng, &mut encoded);
            prev_lat = lat;
            prev_lng = lng;
        }
        encoded
    }
}

fn encode_value(delta: i64, out: &mut String) {
    let shifted = delta << 1;
    let mut value = (if delta < 0 { !shifted } else { shifted }) as u64;
    while value >= 0x20 {
        out.push(char::from((0x20 | (value & 0x1f)) as u8 + 63));
        value >>= 5;
    }
    out.push(char::from(value as u8 + 63));
}
