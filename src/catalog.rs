//! Static vehicle catalog.
//!
//! One entry per vehicle class with its range, capacity, speed and per-km
//! rate. The table is constant for the process lifetime.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Vehicle class identifier, in catalog declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VehicleKind {
    #[serde(rename = "2W")]
    TwoWheeler,
    Van,
    Tempo,
    Truck,
}

impl VehicleKind {
    pub const ALL: [VehicleKind; 4] = [
        VehicleKind::TwoWheeler,
        VehicleKind::Van,
        VehicleKind::Tempo,
        VehicleKind::Truck,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleKind::TwoWheeler => "2W",
            VehicleKind::Van => "Van",
            VehicleKind::Tempo => "Tempo",
            VehicleKind::Truck => "Truck",
        }
    }

    /// Catalog entry for this class.
    pub fn class(&self) -> &'static VehicleClass {
        &VEHICLE_CLASSES[*self as usize]
    }
}

impl fmt::Display for VehicleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lookup of a vehicle class name not present in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown vehicle class `{0}`")]
pub struct UnknownVehicleClass(pub String);

impl FromStr for VehicleKind {
    type Err = UnknownVehicleClass;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        VehicleKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| UnknownVehicleClass(name.to_string()))
    }
}

/// Capability and pricing limits of one vehicle class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VehicleClass {
    pub kind: VehicleKind,
    pub speed_kmh: f64,
    /// Longest single leg the class may drive.
    pub max_leg_distance_km: f64,
    pub max_weight_kg: f64,
    /// Length, width, height.
    pub max_dimensions_cm: [f64; 3],
    pub max_volume_cm3: f64,
    pub cost_per_km: f64,
}

impl VehicleClass {
    const fn new(
        kind: VehicleKind,
        speed_kmh: f64,
        max_leg_distance_km: f64,
        max_weight_kg: f64,
        max_dimensions_cm: [f64; 3],
        cost_per_km: f64,
    ) -> Self {
        Self {
            kind,
            speed_kmh,
            max_leg_distance_km,
            max_weight_kg,
            max_dimensions_cm,
            max_volume_cm3: max_dimensions_cm[0] * max_dimensions_cm[1] * max_dimensions_cm[2],
            cost_per_km,
        }
    }
}

/// Indexed by `VehicleKind as usize`.
pub const VEHICLE_CLASSES: [VehicleClass; 4] = [
    VehicleClass::new(VehicleKind::TwoWheeler, 25.0, 9.0, 5.0, [30.0, 30.0, 15.0], 7.0),
    VehicleClass::new(VehicleKind::Van, 35.0, 30.0, 750.0, [120.0, 100.0, 100.0], 18.0),
    VehicleClass::new(VehicleKind::Tempo, 40.0, 70.0, 1200.0, [180.0, 140.0, 130.0], 25.0),
    VehicleClass::new(VehicleKind::Truck, 45.0, 100.0, 5000.0, [300.0, 200.0, 200.0], 35.0),
];

/// Look up a vehicle class by its catalog name (case-insensitive).
pub fn vehicle_class(name: &str) -> Result<&'static VehicleClass, UnknownVehicleClass> {
    name.parse::<VehicleKind>().map(|kind| kind.class())
}

/// Sort classes cheapest first. Equal rates keep declaration order.
pub fn sort_by_cost(kinds: &mut [VehicleKind]) {
    kinds.sort_by(|a, b| {
        a.class()
            .cost_per_km
            .total_cmp(&b.class().cost_per_km)
            .then_with(|| a.cmp(b))
    });
}
