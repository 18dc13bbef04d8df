//! Cargo description and vehicle capacity filter.
//!
//! Dimensions are compared axis by axis in the order the caller supplies
//! them (length, width, height). No rotation or packing is attempted.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::catalog::{VehicleClass, VehicleKind};

/// Weight and outer dimensions of a shipment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CargoSpec {
    pub weight_kg: f64,
    pub length_cm: f64,
    pub width_cm: f64,
    pub height_cm: f64,
}

/// Malformed quote request, rejected before any computation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInput {
    #[error("{field} must be a positive finite number, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    #[error("{field} coordinate is not finite")]
    NonFiniteCoordinate { field: &'static str },
}

impl CargoSpec {
    pub fn new(weight_kg: f64, length_cm: f64, width_cm: f64, height_cm: f64) -> Self {
        Self {
            weight_kg,
            length_cm,
            width_cm,
            height_cm,
        }
    }

    pub fn volume_cm3(&self) -> f64 {
        self.length_cm * self.width_cm * self.height_cm
    }

    pub fn dimensions_cm(&self) -> [f64; 3] {
        [self.length_cm, self.width_cm, self.height_cm]
    }

    /// Checks that weight and every dimension are strictly positive.
    pub fn validate(&self) -> Result<(), InvalidInput> {
        let fields = [
            ("weight_kg", self.weight_kg),
            ("length_cm", self.length_cm),
            ("width_cm", self.width_cm),
            ("height_cm", self.height_cm),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(InvalidInput::NonPositive { field, value });
            }
        }
        Ok(())
    }

    /// True when this cargo fits the class by weight, volume and each axis.
    pub fn fits(&self, class: &VehicleClass) -> bool {
        let [max_l, max_w, max_h] = class.max_dimensions_cm;
        let weight_ok = self.weight_kg <= class.max_weight_kg;
        let volume_ok = self.volume_cm3() <= class.max_volume_cm3;
        let dimensions_ok =
            self.length_cm <= max_l && self.width_cm <= max_w && self.height_cm <= max_h;

        debug!(
            vehicle = %class.kind,
            weight_ok,
            volume_ok,
            dimensions_ok,
            "capacity check"
        );

        weight_ok && volume_ok && dimensions_ok
    }
}

/// Vehicle classes able to carry the cargo, in catalog declaration order.
///
/// Empty when nothing in the catalog can take it.
pub fn feasible_vehicle_classes(cargo: &CargoSpec) -> Vec<VehicleKind> {
    let feasible: Vec<VehicleKind> = VehicleKind::ALL
        .into_iter()
        .filter(|kind| cargo.fits(kind.class()))
        .collect();

    debug!(
        weight_kg = cargo.weight_kg,
        volume_cm3 = cargo.volume_cm3(),
        ?feasible,
        "feasible vehicle classes"
    );

    feasible
}
