//! Simulated fleet of concrete vehicles.
//!
//! Instances are seeded at every hub and carry their own location and spare
//! capacity. The fleet lives only as long as its owner keeps it; nothing is
//! persisted.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::{debug, warn};

use crate::catalog::{VehicleClass, VehicleKind};
use crate::coordinate::Coordinate;
use crate::haversine::distance_km;
use crate::hubs::Hub;
use crate::traits::{BindRequest, FleetRepository};

/// How many instances of each class are seeded at every hub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleetConfig {
    pub per_hub: Vec<(VehicleKind, usize)>,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            per_hub: vec![
                (VehicleKind::Van, 3),
                (VehicleKind::Tempo, 2),
                (VehicleKind::Truck, 1),
                (VehicleKind::TwoWheeler, 4),
            ],
        }
    }
}

/// One concrete vehicle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleInstance {
    pub id: String,
    pub kind: VehicleKind,
    pub current_location: Coordinate,
    pub home_hub: String,
    pub remaining_weight_kg: f64,
    pub remaining_volume_cm3: f64,
    pub assigned_route: Vec<Coordinate>,
}

impl VehicleInstance {
    /// An empty vehicle parked at its home hub.
    pub fn new(id: impl Into<String>, kind: VehicleKind, hub: &Hub) -> Self {
        let class = kind.class();
        Self {
            id: id.into(),
            kind,
            current_location: hub.coordinate,
            home_hub: hub.name.clone(),
            remaining_weight_kg: class.max_weight_kg,
            remaining_volume_cm3: class.max_volume_cm3,
            assigned_route: Vec::new(),
        }
    }

    pub fn class(&self) -> &'static VehicleClass {
        self.kind.class()
    }

    /// Whether the remaining capacity can take the load.
    pub fn capacity_ok(&self, weight_kg: f64, volume_cm3: f64) -> bool {
        self.remaining_weight_kg >= weight_kg && self.remaining_volume_cm3 >= volume_cm3
    }

    /// Assign a point-to-point job.
    ///
    /// Both the approach leg (current location to pickup) and the loaded leg
    /// must be within range. On refusal the vehicle is left untouched.
    pub fn assign_direct(
        &mut self,
        pickup: Coordinate,
        delivery: Coordinate,
        weight_kg: f64,
        volume_cm3: f64,
    ) -> bool {
        let max_leg = self.class().max_leg_distance_km;
        let legs = [(self.current_location, pickup), (pickup, delivery)];
        if legs.iter().any(|&(from, to)| distance_km(from, to) > max_leg) {
            debug!(vehicle = %self.id, "direct assignment out of range");
            return false;
        }

        self.assigned_route = vec![pickup, delivery];
        self.remaining_weight_kg -= weight_kg;
        self.remaining_volume_cm3 -= volume_cm3;
        self.current_location = delivery;
        true
    }
}

/// The vehicle a quote was bound to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleBinding {
    pub vehicle_id: String,
    pub kind: VehicleKind,
    pub home_hub: String,
    /// Location after any assignment.
    pub current_location: Coordinate,
    pub remaining_weight_kg: f64,
    pub remaining_volume_cm3: f64,
    /// Whether the load was committed to the vehicle.
    pub assigned: bool,
}

impl VehicleBinding {
    fn of(vehicle: &VehicleInstance, assigned: bool) -> Self {
        Self {
            vehicle_id: vehicle.id.clone(),
            kind: vehicle.kind,
            home_hub: vehicle.home_hub.clone(),
            current_location: vehicle.current_location,
            remaining_weight_kg: vehicle.remaining_weight_kg,
            remaining_volume_cm3: vehicle.remaining_volume_cm3,
            assigned,
        }
    }
}

/// Instances of a set of classes, and how many of them can take a load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FleetUtilization {
    pub feasible_vehicles: usize,
    pub available_vehicles: usize,
}

/// Spare capacity summed over a vehicle class.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CapacitySummary {
    pub weight_kg: f64,
    pub volume_cm3: f64,
    pub count: usize,
}

/// Fleet composition and spare capacity.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FleetStatus {
    pub total_vehicles: usize,
    pub by_kind: BTreeMap<VehicleKind, usize>,
    pub by_hub: BTreeMap<String, usize>,
    pub available_capacity: BTreeMap<VehicleKind, CapacitySummary>,
}

/// An in-memory pool of vehicle instances.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fleet {
    vehicles: Vec<VehicleInstance>,
}

impl Fleet {
    /// Creates a fleet from existing instances.
    pub fn new(vehicles: Vec<VehicleInstance>) -> Self {
        Self { vehicles }
    }

    /// Seed every hub with the configured number of instances per class.
    ///
    /// Ids read `<CLASS>-<HUB>-<NNN>`, e.g. `VAN-MICRO-OKHLA-002`.
    pub fn initialize(hubs: &[Hub], config: &FleetConfig) -> Self {
        let mut vehicles = Vec::new();
        for hub in hubs {
            let hub_tag = hub.name.to_uppercase();
            for &(kind, count) in &config.per_hub {
                let class_tag = kind.as_str().to_uppercase();
                for seq in 1..=count {
                    let id = format!("{}-{}-{:03}", class_tag, hub_tag, seq);
                    vehicles.push(VehicleInstance::new(id, kind, hub));
                }
            }
        }
        debug!(vehicles = vehicles.len(), hubs = hubs.len(), "fleet initialized");
        Self { vehicles }
    }

    /// Returns the instances in fleet order.
    pub fn vehicles(&self) -> &[VehicleInstance] {
        &self.vehicles
    }

    /// Looks up an instance by id.
    pub fn get(&self, id: &str) -> Option<&VehicleInstance> {
        self.vehicles.iter().find(|vehicle| vehicle.id == id)
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    fn nearest_index(
        &self,
        kind: VehicleKind,
        pickup: Coordinate,
        weight_kg: f64,
        volume_cm3: f64,
    ) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (index, vehicle) in self.vehicles.iter().enumerate() {
            if vehicle.kind != kind || !vehicle.capacity_ok(weight_kg, volume_cm3) {
                continue;
            }
            let km = distance_km(vehicle.current_location, pickup);
            if best.is_none_or(|(_, best_km)| km < best_km) {
                best = Some((index, km));
            }
        }
        best.map(|(index, _)| index)
    }

    /// Closest instance of `kind` to the pickup that still has room.
    /// Equal distances keep the first instance in fleet order.
    pub fn nearest_available(
        &self,
        kind: VehicleKind,
        pickup: Coordinate,
        weight_kg: f64,
        volume_cm3: f64,
    ) -> Option<&VehicleInstance> {
        let index = self.nearest_index(kind, pickup, weight_kg, volume_cm3)?;
        Some(&self.vehicles[index])
    }

    pub fn nearest_available_mut(
        &mut self,
        kind: VehicleKind,
        pickup: Coordinate,
        weight_kg: f64,
        volume_cm3: f64,
    ) -> Option<&mut VehicleInstance> {
        let index = self.nearest_index(kind, pickup, weight_kg, volume_cm3)?;
        Some(&mut self.vehicles[index])
    }

    /// Vehicle counts by class and hub, with spare capacity per class.
    pub fn status(&self) -> FleetStatus {
        let mut status = FleetStatus {
            total_vehicles: self.vehicles.len(),
            ..FleetStatus::default()
        };
        for vehicle in &self.vehicles {
            *status.by_kind.entry(vehicle.kind).or_default() += 1;
            *status.by_hub.entry(vehicle.home_hub.clone()).or_default() += 1;
            let capacity = status.available_capacity.entry(vehicle.kind).or_default();
            capacity.weight_kg += vehicle.remaining_weight_kg;
            capacity.volume_cm3 += vehicle.remaining_volume_cm3;
            capacity.count += 1;
        }
        status
    }
}

impl FleetRepository for Fleet {
    fn bind(&mut self, request: &BindRequest) -> Option<VehicleBinding> {
        let Some(vehicle) = self.nearest_available_mut(
            request.kind,
            request.pickup,
            request.weight_kg,
            request.volume_cm3,
        ) else {
            warn!(vehicle = %request.kind, "no instance with spare capacity");
            return None;
        };

        let assigned = request.assign
            && vehicle.assign_direct(
                request.pickup,
                request.delivery,
                request.weight_kg,
                request.volume_cm3,
            );
        if request.assign && !assigned {
            warn!(vehicle = %vehicle.id, "direct assignment refused, quote left unbound");
        }

        Some(VehicleBinding::of(vehicle, assigned))
    }

    fn available(&self, kind: VehicleKind, weight_kg: f64, volume_cm3: f64) -> usize {
        self.vehicles
            .iter()
            .filter(|vehicle| vehicle.kind == kind && vehicle.capacity_ok(weight_kg, volume_cm3))
            .count()
    }

    fn count(&self, kind: VehicleKind) -> usize {
        self.vehicles.iter().filter(|vehicle| vehicle.kind == kind).count()
    }
}

/// A fleet shared between threads.
///
/// Every `bind` takes the lock once for the lookup and the assignment
/// together. Clones share the same vehicles.
#[derive(Debug, Clone, Default)]
pub struct SharedFleet {
    inner: Arc<Mutex<Fleet>>,
}

impl SharedFleet {
    /// Wraps a fleet for use across threads.
    pub fn new(fleet: Fleet) -> Self {
        Self {
            inner: Arc::new(Mutex::new(fleet)),
        }
    }

    /// Copy of the current fleet state.
    pub fn snapshot(&self) -> Fleet {
        self.with(|fleet| fleet.clone())
    }

    pub fn status(&self) -> FleetStatus {
        self.with(|fleet| fleet.status())
    }

    /// Runs `f` under the lock, recovering the fleet if a holder panicked.
    fn with<T>(&self, f: impl FnOnce(&mut Fleet) -> T) -> T {
        let mut guard = match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut guard)
    }
}

impl FleetRepository for SharedFleet {
    fn bind(&mut self, request: &BindRequest) -> Option<VehicleBinding> {
        self.with(|fleet| fleet.bind(request))
    }

    fn available(&self, kind: VehicleKind, weight_kg: f64, volume_cm3: f64) -> usize {
        self.with(|fleet| fleet.available(kind, weight_kg, volume_cm3))
    }

    fn count(&self, kind: VehicleKind) -> usize {
        self.with(|fleet| fleet.count(kind))
    }

    fn utilization(&self, kinds: &[VehicleKind], weight_kg: f64, volume_cm3: f64) -> FleetUtilization {
        self.with(|fleet| fleet.utilization(kinds, weight_kg, volume_cm3))
    }
}
