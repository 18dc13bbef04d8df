//! Transfer hub registry.

use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;

/// A named transfer hub.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hub {
    pub name: String,
    pub coordinate: Coordinate,
}

impl Hub {
    /// Creates a hub at the given coordinate.
    pub fn new(name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            name: name.into(),
            coordinate,
        }
    }
}

/// Delhi NCR hubs, one per zone plus two micro-hubs.
const DELHI_HUBS: [(&str, f64, f64); 7] = [
    ("north", 28.832652, 77.099613),
    ("west", 28.685020, 77.098174),
    ("south", 28.513000, 77.269200),
    ("east", 28.639425, 77.310904),
    ("central", 28.700257, 77.167209),
    ("micro-mundka", 28.7744, 77.0405),
    ("micro-okhla", 28.5358, 77.2764),
];

/// Ordered set of hubs. Every hub is tried on every optimization.
#[derive(Debug, Clone, PartialEq)]
pub struct HubRegistry {
    hubs: Vec<Hub>,
}

impl Default for HubRegistry {
    fn default() -> Self {
        Self::new(
            DELHI_HUBS
                .iter()
                .map(|&(name, lat, lng)| Hub::new(name, Coordinate::new(lat, lng)))
                .collect(),
        )
    }
}

impl HubRegistry {
    /// Creates a registry from hubs in the order they should be tried.
    pub fn new(hubs: Vec<Hub>) -> Self {
        Self { hubs }
    }

    /// Returns every hub in registry order.
    pub fn all(&self) -> &[Hub] {
        &self.hubs
    }

    /// Coordinates of the named hub.
    pub fn get(&self, name: &str) -> Option<Coordinate> {
        self.hubs
            .iter()
            .find(|hub| hub.name == name)
            .map(|hub| hub.coordinate)
    }

    pub fn len(&self) -> usize {
        self.hubs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hubs.is_empty()
    }
}
