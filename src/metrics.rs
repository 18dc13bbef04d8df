//! Route metrics for a single vehicle class.
//!
//! Two shapes are considered: a direct leg from pickup to delivery, and a
//! two-leg detour through one transfer hub. A hub route is feasible when each
//! leg is within the class's range, even if the total is not.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::VehicleClass;
use crate::coordinate::Coordinate;
use crate::hubs::Hub;
use crate::traits::DistanceProvider;

/// Dwell time at a transfer hub, in minutes.
pub const HANDLING_MIN: f64 = 10.0;

/// Shape of a route candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteStrategy {
    Direct,
    Hub,
}

/// A priced route for one vehicle class.
///
/// Distances and cost are rounded to 2 decimals and time to 1 decimal when
/// the candidate is built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteCandidate {
    pub strategy: RouteStrategy,
    pub hub: Option<String>,
    pub route: Vec<Coordinate>,
    /// One entry per leg.
    pub legs_km: Vec<f64>,
    pub distance_km: f64,
    pub time_min: f64,
    pub cost: f64,
    pub feasible: bool,
}

pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Point-to-point candidate; infeasible when the leg exceeds the class range.
pub fn direct_candidate<D: DistanceProvider + ?Sized>(
    distance: &D,
    pickup: Coordinate,
    delivery: Coordinate,
    class: &VehicleClass,
) -> RouteCandidate {
    let km = distance.distance_km(pickup, delivery);
    let time_min = km / class.speed_kmh * 60.0;
    let cost = km * class.cost_per_km;

    debug!(vehicle = %class.kind, distance_km = km, time_min, cost, "direct metrics");

    RouteCandidate {
        strategy: RouteStrategy::Direct,
        hub: None,
        route: vec![pickup, delivery],
        legs_km: vec![round_to(km, 2)],
        distance_km: round_to(km, 2),
        time_min: round_to(time_min, 1),
        cost: round_to(cost, 2),
        feasible: km <= class.max_leg_distance_km,
    }
}

/// Shortest feasible detour through any hub, or `None` if no hub keeps both
/// legs in range. Equal totals keep the first hub in registry order.
pub fn hub_candidate<D: DistanceProvider + ?Sized>(
    distance: &D,
    hubs: &[Hub],
    pickup: Coordinate,
    delivery: Coordinate,
    class: &VehicleClass,
) -> Option<RouteCandidate> {
    let mut best: Option<(&Hub, f64, f64)> = None;

    for hub in hubs {
        let d1 = distance.distance_km(pickup, hub.coordinate);
        let d2 = distance.distance_km(hub.coordinate, delivery);
        let in_range = d1 <= class.max_leg_distance_km && d2 <= class.max_leg_distance_km;

        debug!(
            vehicle = %class.kind,
            hub = %hub.name,
            pickup_leg_km = d1,
            delivery_leg_km = d2,
            in_range,
            "hub leg check"
        );

        if !in_range {
            continue;
        }
        let is_better = match best {
            Some((_, b1, b2)) => d1 + d2 < b1 + b2,
            None => true,
        };
        if is_better {
            best = Some((hub, d1, d2));
        }
    }

    best.map(|(hub, d1, d2)| {
        let total = d1 + d2;
        RouteCandidate {
            strategy: RouteStrategy::Hub,
            hub: Some(hub.name.clone()),
            route: vec![pickup, hub.coordinate, delivery],
            legs_km: vec![round_to(d1, 2), round_to(d2, 2)],
            distance_km: round_to(total, 2),
            time_min: round_to(total / class.speed_kmh * 60.0 + HANDLING_MIN, 1),
            cost: round_to(total * class.cost_per_km, 2),
            feasible: true,
        }
    })
}

/// Cheapest feasible candidate for the class. Direct wins a cost tie.
///
/// Always compares cost, whatever objective the caller ranks classes by.
pub fn best_route<D: DistanceProvider + ?Sized>(
    distance: &D,
    hubs: &[Hub],
    pickup: Coordinate,
    delivery: Coordinate,
    class: &VehicleClass,
) -> Option<RouteCandidate> {
    let direct = Some(direct_candidate(distance, pickup, delivery, class)).filter(|c| c.feasible);
    let hub = hub_candidate(distance, hubs, pickup, delivery, class);

    let best = match (direct, hub) {
        (Some(direct), Some(hub)) if hub.cost < direct.cost => Some(hub),
        (Some(direct), _) => Some(direct),
        (None, hub) => hub,
    };

    match &best {
        Some(candidate) => debug!(
            vehicle = %class.kind,
            strategy = ?candidate.strategy,
            hub = ?candidate.hub,
            cost = candidate.cost,
            "best route for class"
        ),
        None => debug!(vehicle = %class.kind, "no feasible route for class"),
    }

    best
}
