//! Fleet sharing tests
//!
//! Concurrent quotes against one shared fleet must never double-book a
//! vehicle.

mod fixtures;

use std::collections::HashSet;
use std::thread;

use freight_planner::fleet::{Fleet, FleetConfig, SharedFleet};
use freight_planner::hubs::HubRegistry;
use freight_planner::traits::FleetRepository;
use freight_planner::{DeliveryStrategy, Optimizer, VehicleKind};

use fixtures::{DELIVERY, PICKUP, assert_close, crate_cargo, request};

const JOBS: usize = 12;

#[test]
fn test_concurrent_p2p_quotes_bind_distinct_vehicles() {
    let hubs = HubRegistry::default();
    let shared = SharedFleet::new(Fleet::initialize(hubs.all(), &FleetConfig::default()));
    let optimizer = Optimizer::new(hubs);
    let req = request(PICKUP, DELIVERY, crate_cargo()).strategy(DeliveryStrategy::P2p);

    let ids: Vec<String> = thread::scope(|scope| {
        let handles: Vec<_> = (0..JOBS)
            .map(|_| {
                let mut fleet = shared.clone();
                let optimizer = &optimizer;
                let req = &req;
                scope.spawn(move || {
                    let result = optimizer.optimize(req, Some(&mut fleet)).expect("quotable");
                    let binding = result.fleet_binding.expect("bound");
                    assert!(binding.assigned);
                    binding.vehicle_id
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("worker finished"))
            .collect()
    });

    // Fifteen vans sit closer to the pickup than any van that has already
    // driven off to the delivery point, so every job gets its own van.
    let unique: HashSet<&String> = ids.iter().collect();
    assert_eq!(unique.len(), JOBS);

    let status = shared.status();
    let vans = &status.available_capacity[&VehicleKind::Van];
    assert_eq!(vans.count, 21);
    assert_close(vans.weight_kg, 21.0 * 750.0 - JOBS as f64 * 50.0, 1e-9);
}

#[test]
fn test_shared_fleet_counts_match_plain_fleet() {
    let hubs = HubRegistry::default();
    let fleet = Fleet::initialize(hubs.all(), &FleetConfig::default());
    let shared = SharedFleet::new(fleet.clone());

    for kind in VehicleKind::ALL {
        assert_eq!(shared.count(kind), fleet.count(kind));
        assert_eq!(
            shared.available(kind, 1.0, 1.0),
            fleet.available(kind, 1.0, 1.0)
        );
    }
    assert_eq!(shared.snapshot(), fleet);
}

#[test]
fn test_status_tracks_remaining_capacity_after_assignment() {
    let hubs = HubRegistry::default();
    let mut fleet = Fleet::initialize(hubs.all(), &FleetConfig::default());
    let optimizer = Optimizer::new(hubs);
    let req = request(PICKUP, DELIVERY, crate_cargo()).strategy(DeliveryStrategy::P2p);

    optimizer.optimize(&req, Some(&mut fleet)).expect("quotable");

    let status = fleet.status();
    assert_eq!(status.total_vehicles, 70);
    assert_eq!(status.by_hub["west"], 10);
    let vans = &status.available_capacity[&VehicleKind::Van];
    assert_eq!(vans.weight_kg, 21.0 * 750.0 - 50.0);
    assert_eq!(vans.volume_cm3, 21.0 * 1_200_000.0 - 288_000.0);
}
