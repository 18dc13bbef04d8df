//! Seams between the quoting core and its collaborators.
//!
//! The optimizer only needs a way to measure distance and, optionally, a fleet
//! to bind the chosen vehicle class to. Address resolution lives entirely
//! outside the core; callers geocode before they quote.

use crate::catalog::VehicleKind;
use crate::coordinate::Coordinate;
use crate::fleet::{FleetUtilization, VehicleBinding};
use crate::geocode::GeocodeError;

/// Provides the distance between two coordinates in kilometers.
pub trait DistanceProvider {
    fn distance_km(&self, from: Coordinate, to: Coordinate) -> f64;
}

/// Resolves a free-text address into a coordinate.
pub trait Geocoder {
    fn geocode(&self, address: &str) -> Result<Coordinate, GeocodeError>;
}

/// A shipment to bind against a concrete vehicle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BindRequest {
    pub kind: VehicleKind,
    pub pickup: Coordinate,
    pub delivery: Coordinate,
    pub weight_kg: f64,
    pub volume_cm3: f64,
    /// Commit the load to the vehicle (point-to-point assignment).
    pub assign: bool,
}

/// Source of concrete vehicles for a quote.
///
/// `bind` must look up the nearest available instance and, when requested,
/// assign the shipment to it as one step: implementations shared across
/// threads hold their lock for the whole call so no instance is double-booked.
pub trait FleetRepository {
    /// Returns `None` when no instance of the class has spare capacity.
    fn bind(&mut self, request: &BindRequest) -> Option<VehicleBinding>;

    /// Number of instances of `kind` able to take the load right now.
    fn available(&self, kind: VehicleKind, weight_kg: f64, volume_cm3: f64) -> usize;

    /// Total number of instances of `kind`.
    fn count(&self, kind: VehicleKind) -> usize;

    /// Instance totals over `kinds` and how many can take the load.
    ///
    /// Shared implementations read both figures under one lock.
    fn utilization(&self, kinds: &[VehicleKind], weight_kg: f64, volume_cm3: f64) -> FleetUtilization {
        FleetUtilization {
            feasible_vehicles: kinds.iter().map(|&kind| self.count(kind)).sum(),
            available_vehicles: kinds
                .iter()
                .map(|&kind| self.available(kind, weight_kg, volume_cm3))
                .sum(),
        }
    }
}
