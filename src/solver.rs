//! Quote optimizer: picks the vehicle class and route for one shipment.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::catalog::{self, VehicleKind};
use crate::coordinate::Coordinate;
use crate::feasibility::{CargoSpec, InvalidInput, feasible_vehicle_classes};
use crate::fleet::{Fleet, FleetConfig, FleetUtilization, VehicleBinding};
use crate::haversine::Haversine;
use crate::hubs::HubRegistry;
use crate::metrics::{RouteCandidate, RouteStrategy, best_route};
use crate::polyline::Polyline;
use crate::pricing::{DeliveryStrategy, pooling_policy};
use crate::traits::{BindRequest, DistanceProvider, FleetRepository};

/// Objective used to rank vehicle classes against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizeBy {
    #[default]
    Cost,
    Time,
}

impl OptimizeBy {
    fn score(&self, candidate: &RouteCandidate) -> f64 {
        match self {
            OptimizeBy::Cost => candidate.cost,
            OptimizeBy::Time => candidate.time_min,
        }
    }
}

/// A quote request with coordinates already resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizeRequest {
    pub pickup: Coordinate,
    pub delivery: Coordinate,
    pub cargo: CargoSpec,
    #[serde(default)]
    pub strategy: DeliveryStrategy,
    #[serde(default)]
    pub optimize_by: OptimizeBy,
    /// Catalog name of the preferred class, e.g. `"Van"`.
    #[serde(default)]
    pub vehicle_preference: Option<String>,
}

impl OptimizeRequest {
    pub fn new(pickup: Coordinate, delivery: Coordinate, cargo: CargoSpec) -> Self {
        Self {
            pickup,
            delivery,
            cargo,
            strategy: DeliveryStrategy::default(),
            optimize_by: OptimizeBy::default(),
            vehicle_preference: None,
        }
    }

    pub fn strategy(mut self, strategy: DeliveryStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn optimize_by(mut self, optimize_by: OptimizeBy) -> Self {
        self.optimize_by = optimize_by;
        self
    }

    /// Prefer a class by its catalog name (`"2W"`, `"Van"`, `"Tempo"`, `"Truck"`).
    pub fn prefer(mut self, vehicle: impl Into<String>) -> Self {
        self.vehicle_preference = Some(vehicle.into());
        self
    }

    fn validate(&self) -> Result<(), InvalidInput> {
        if !self.pickup.is_finite() {
            return Err(InvalidInput::NonFiniteCoordinate { field: "pickup" });
        }
        if !self.delivery.is_finite() {
            return Err(InvalidInput::NonFiniteCoordinate { field: "delivery" });
        }
        self.cargo.validate()
    }

    /// Preferred class, if the name is exactly a catalog name.
    fn preferred_kind(&self) -> Option<VehicleKind> {
        let name = self.vehicle_preference.as_deref()?;
        let kind = VehicleKind::ALL.into_iter().find(|kind| kind.as_str() == name);
        if kind.is_none() {
            warn!(preference = name, "ignoring unknown vehicle preference");
        }
        kind
    }
}

/// Cargo as echoed back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CargoSummary {
    pub weight_kg: f64,
    pub dimensions_cm: [f64; 3],
    pub volume_cm3: f64,
}

impl From<&CargoSpec> for CargoSummary {
    fn from(cargo: &CargoSpec) -> Self {
        Self {
            weight_kg: cargo.weight_kg,
            dimensions_cm: cargo.dimensions_cm(),
            volume_cm3: cargo.volume_cm3(),
        }
    }
}

/// How the selection was reached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostics {
    pub evaluated_vehicles: Vec<VehicleKind>,
    pub optimized_by: OptimizeBy,
    pub preference: Option<VehicleKind>,
    pub hubs_considered: usize,
    pub fleet: Option<FleetUtilization>,
}

/// A successful quote.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationResult {
    pub feasible_vehicles: Vec<VehicleKind>,
    pub selected_vehicle: VehicleKind,
    pub vehicle_instance_id: Option<String>,
    pub fleet_binding: Option<VehicleBinding>,
    /// Pricing label, e.g. `Hub-Shared-Pooling`.
    pub strategy: String,
    pub route_strategy: RouteStrategy,
    pub hub: Option<String>,
    pub legs_km: Vec<f64>,
    pub total_distance_km: f64,
    pub total_time_min: f64,
    pub total_cost: f64,
    pub original_cost: f64,
    pub pooling_discount: f64,
    pub savings: f64,
    pub route: Vec<Coordinate>,
    pub cargo: CargoSummary,
    pub diagnostics: Diagnostics,
    pub message: String,
}

impl OptimizationResult {
    /// Route geometry for map rendering.
    pub fn polyline(&self) -> Polyline {
        Polyline::new(self.route.clone())
    }
}

/// Why no quote could be produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptimizeError {
    #[error("invalid request: {0}")]
    InvalidInput(#[from] InvalidInput),
    #[error("no vehicle can handle this cargo size/weight")]
    InfeasibleCargo {
        cargo: CargoSummary,
        feasible_vehicles: Vec<VehicleKind>,
    },
    #[error("no feasible route found for any vehicle")]
    NoFeasibleRoute {
        feasible_vehicles: Vec<VehicleKind>,
        attempted: Vec<VehicleKind>,
    },
}

impl OptimizeError {
    /// Classes able to carry the cargo; empty for invalid or oversized cargo.
    pub fn feasible_vehicles(&self) -> &[VehicleKind] {
        match self {
            OptimizeError::InvalidInput(_) => &[],
            OptimizeError::InfeasibleCargo {
                feasible_vehicles, ..
            }
            | OptimizeError::NoFeasibleRoute {
                feasible_vehicles, ..
            } => feasible_vehicles,
        }
    }
}

/// Evaluation order: the preferred class first when it is feasible, then the
/// rest cheapest first.
pub fn evaluation_order(feasible: &[VehicleKind], preferred: Option<VehicleKind>) -> Vec<VehicleKind> {
    let mut rest: Vec<VehicleKind> = feasible
        .iter()
        .copied()
        .filter(|kind| Some(*kind) != preferred)
        .collect();
    catalog::sort_by_cost(&mut rest);

    match preferred {
        Some(kind) if feasible.contains(&kind) => std::iter::once(kind).chain(rest).collect(),
        _ => rest,
    }
}

/// Quotes shipments against a hub registry and a distance metric.
#[derive(Debug, Clone, Default)]
pub struct Optimizer<D = Haversine> {
    hubs: HubRegistry,
    distance: D,
}

impl Optimizer<Haversine> {
    /// Optimizer over great-circle distances.
    pub fn new(hubs: HubRegistry) -> Self {
        Self {
            hubs,
            distance: Haversine,
        }
    }
}

impl<D: DistanceProvider> Optimizer<D> {
    /// Optimizer over a custom distance metric.
    pub fn with_distance(hubs: HubRegistry, distance: D) -> Self {
        Self { hubs, distance }
    }

    pub fn hubs(&self) -> &HubRegistry {
        &self.hubs
    }

    /// Quote one shipment.
    ///
    /// With a fleet, the nearest instance of the selected class with room for
    /// the load is bound to the quote; under `p2p` the load is also assigned
    /// to it. Binding is best effort and never fails the quote.
    pub fn optimize(
        &self,
        request: &OptimizeRequest,
        fleet: Option<&mut dyn FleetRepository>,
    ) -> Result<OptimizationResult, OptimizeError> {
        request.validate()?;

        let cargo = &request.cargo;
        let feasible = feasible_vehicle_classes(cargo);
        if feasible.is_empty() {
            info!(weight_kg = cargo.weight_kg, "no vehicle class can carry cargo");
            return Err(OptimizeError::InfeasibleCargo {
                cargo: CargoSummary::from(cargo),
                feasible_vehicles: feasible,
            });
        }

        let preferred = request.preferred_kind().filter(|kind| feasible.contains(kind));
        let order = evaluation_order(&feasible, preferred);
        debug!(?order, ?preferred, "vehicle evaluation order");

        let candidates: Vec<(VehicleKind, RouteCandidate)> = order
            .iter()
            .filter_map(|&kind| {
                best_route(
                    &self.distance,
                    self.hubs.all(),
                    request.pickup,
                    request.delivery,
                    kind.class(),
                )
                .map(|candidate| (kind, candidate))
            })
            .collect();

        let Some(selected) = select(&candidates, preferred, request.optimize_by) else {
            info!(?feasible, "no feasible route for any vehicle class");
            return Err(OptimizeError::NoFeasibleRoute {
                feasible_vehicles: feasible,
                attempted: order,
            });
        };
        let (kind, candidate) = &candidates[selected];
        let kind = *kind;

        let (fleet_binding, utilization) = match fleet {
            Some(fleet) => {
                let volume_cm3 = cargo.volume_cm3();
                let binding = fleet.bind(&BindRequest {
                    kind,
                    pickup: request.pickup,
                    delivery: request.delivery,
                    weight_kg: cargo.weight_kg,
                    volume_cm3,
                    assign: request.strategy == DeliveryStrategy::P2p,
                });
                if binding.is_none() {
                    warn!(vehicle = %kind, "fleet exhausted, quote left unbound");
                }
                let utilization = fleet.utilization(&feasible, cargo.weight_kg, volume_cm3);
                (binding, Some(utilization))
            }
            None => (None, None),
        };

        let policy = pooling_policy(request.strategy, candidate.hub.is_some());
        let priced = policy.apply(candidate.cost);

        let message = match (request.strategy, &candidate.hub) {
            (DeliveryStrategy::P2p, _) => "Success (Direct P2P delivery)".to_string(),
            (DeliveryStrategy::Auto, Some(hub)) => format!(
                "Success ({} via {} - {}% discount applied!)",
                policy.label,
                hub,
                policy.percent()
            ),
            (DeliveryStrategy::Auto, None) => format!(
                "Success ({} - {}% discount applied!)",
                policy.label,
                policy.percent()
            ),
        };

        info!(
            vehicle = %kind,
            vehicle_id = ?fleet_binding.as_ref().map(|b| &b.vehicle_id),
            strategy = policy.label,
            hub = ?candidate.hub,
            cost = priced.total_cost,
            "route selected"
        );

        Ok(OptimizationResult {
            feasible_vehicles: feasible,
            selected_vehicle: kind,
            vehicle_instance_id: fleet_binding.as_ref().map(|b| b.vehicle_id.clone()),
            fleet_binding,
            strategy: policy.label.to_string(),
            route_strategy: candidate.strategy,
            hub: candidate.hub.clone(),
            legs_km: candidate.legs_km.clone(),
            total_distance_km: candidate.distance_km,
            total_time_min: candidate.time_min,
            total_cost: priced.total_cost,
            original_cost: priced.original_cost,
            pooling_discount: priced.discount,
            savings: priced.savings,
            route: candidate.route.clone(),
            cargo: CargoSummary::from(cargo),
            diagnostics: Diagnostics {
                evaluated_vehicles: order,
                optimized_by: request.optimize_by,
                preference: preferred,
                hubs_considered: self.hubs.len(),
                fleet: utilization,
            },
            message,
        })
    }
}

impl<D: DistanceProvider + Sync> Optimizer<D> {
    /// Quote independent shipments in parallel, each against its own freshly
    /// seeded fleet.
    pub fn optimize_batch(
        &self,
        requests: &[OptimizeRequest],
        fleet_config: &FleetConfig,
    ) -> Vec<Result<OptimizationResult, OptimizeError>> {
        requests
            .par_iter()
            .map(|request| {
                let mut fleet = Fleet::initialize(self.hubs.all(), fleet_config);
                self.optimize(request, Some(&mut fleet))
            })
            .collect()
    }
}

/// Index of the winning candidate.
///
/// A preferred class that produced any route wins outright. Otherwise the
/// lowest score wins and ties keep evaluation order.
fn select(
    candidates: &[(VehicleKind, RouteCandidate)],
    preferred: Option<VehicleKind>,
    optimize_by: OptimizeBy,
) -> Option<usize> {
    if let Some(index) = candidates.iter().position(|(kind, _)| Some(*kind) == preferred) {
        return Some(index);
    }

    let mut best: Option<(usize, f64)> = None;
    for (index, (_, candidate)) in candidates.iter().enumerate() {
        let score = optimize_by.score(candidate);
        if best.is_none_or(|(_, best_score)| score < best_score) {
            best = Some((index, score));
        }
    }
    best.map(|(index, _)| index)
}

/// Quote one shipment with the default Delhi hub registry.
pub fn optimize(
    request: &OptimizeRequest,
    fleet: Option<&mut dyn FleetRepository>,
) -> Result<OptimizationResult, OptimizeError> {
    Optimizer::<Haversine>::default().optimize(request, fleet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hubs::Hub;

    #[test]
    fn test_evaluation_order_cheapest_first() {
        let feasible = vec![VehicleKind::Van, VehicleKind::Tempo, VehicleKind::Truck];
        assert_eq!(evaluation_order(&feasible, None), feasible);
    }

    #[test]
    fn test_evaluation_order_preference_first() {
        let feasible = vec![VehicleKind::Van, VehicleKind::Tempo, VehicleKind::Truck];
        assert_eq!(
            evaluation_order(&feasible, Some(VehicleKind::Truck)),
            vec![VehicleKind::Truck, VehicleKind::Van, VehicleKind::Tempo]
        );
    }

    #[test]
    fn test_evaluation_order_ignores_infeasible_preference() {
        let feasible = vec![VehicleKind::Van, VehicleKind::Tempo];
        assert_eq!(evaluation_order(&feasible, Some(VehicleKind::TwoWheeler)), feasible);
    }

    #[test]
    fn test_unknown_preference_is_ignored() {
        let request = OptimizeRequest::new(
            Coordinate::new(28.70, 77.10),
            Coordinate::new(28.55, 77.25),
            CargoSpec::new(50.0, 80.0, 60.0, 60.0),
        )
        .prefer("Rickshaw");
        assert_eq!(request.preferred_kind(), None);
        assert_eq!(request.clone().prefer("Tempo").preferred_kind(), Some(VehicleKind::Tempo));
    }

    #[test]
    fn test_preference_must_match_catalog_name_exactly() {
        let request = OptimizeRequest::new(
            Coordinate::new(28.70, 77.10),
            Coordinate::new(28.55, 77.25),
            CargoSpec::new(50.0, 80.0, 60.0, 60.0),
        );
        assert_eq!(request.clone().prefer("tempo").preferred_kind(), None);
        assert_eq!(request.clone().prefer(" Van").preferred_kind(), None);
        assert_eq!(request.prefer("2W").preferred_kind(), Some(VehicleKind::TwoWheeler));
    }

    #[test]
    fn test_validate_rejects_non_finite_coordinates() {
        let request = OptimizeRequest::new(
            Coordinate::new(f64::NAN, 77.10),
            Coordinate::new(28.55, 77.25),
            CargoSpec::new(50.0, 80.0, 60.0, 60.0),
        );
        assert_eq!(
            request.validate(),
            Err(InvalidInput::NonFiniteCoordinate { field: "pickup" })
        );
    }

    #[test]
    fn test_error_messages() {
        let err = OptimizeError::NoFeasibleRoute {
            feasible_vehicles: vec![VehicleKind::Truck],
            attempted: vec![VehicleKind::Truck],
        };
        assert_eq!(err.to_string(), "no feasible route found for any vehicle");
        assert_eq!(err.feasible_vehicles(), &[VehicleKind::Truck]);
    }

    /// Grid metric that doubles the straight pickup-to-delivery road.
    struct Detour {
        pickup: Coordinate,
        delivery: Coordinate,
    }

    impl DistanceProvider for Detour {
        fn distance_km(&self, from: Coordinate, to: Coordinate) -> f64 {
            let km = ((from.lat - to.lat).powi(2) + (from.lng - to.lng).powi(2)).sqrt();
            if from == self.pickup && to == self.delivery { 2.0 * km } else { km }
        }
    }

    #[test]
    fn test_cheaper_hub_route_is_quoted_with_hub_discount() {
        let pickup = Coordinate::new(0.0, 0.0);
        let delivery = Coordinate::new(10.0, 0.0);
        let hubs = HubRegistry::new(vec![Hub::new("mid", Coordinate::new(5.0, 0.0))]);
        let optimizer = Optimizer::with_distance(hubs, Detour { pickup, delivery });
        let request = OptimizeRequest::new(pickup, delivery, CargoSpec::new(50.0, 80.0, 60.0, 60.0));

        let result = optimizer.optimize(&request, None).expect("quote");
        assert_eq!(result.selected_vehicle, VehicleKind::Van);
        assert_eq!(result.route_strategy, RouteStrategy::Hub);
        assert_eq!(result.hub.as_deref(), Some("mid"));
        assert_eq!(result.strategy, "Hub-Shared-Pooling");
        assert_eq!(result.original_cost, 180.0);
        assert_eq!(result.total_cost, 135.0);
        assert_eq!(result.pooling_discount, 0.25);
        assert_eq!(result.message, "Success (Hub-Shared-Pooling via mid - 25% discount applied!)");
    }
}
