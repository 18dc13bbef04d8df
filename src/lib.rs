//! freight-planner core
//!
//! Quotes cargo deliveries across a metro area: which vehicle class can carry
//! the load, whether to go direct or relay through a transfer hub, what it
//! costs, and which concrete vehicle takes the job.

pub mod traits;
pub mod coordinate;
pub mod haversine;
pub mod catalog;
pub mod hubs;
pub mod feasibility;
pub mod metrics;
pub mod fleet;
pub mod pricing;
pub mod solver;
pub mod polyline;
pub mod geocode;

pub use catalog::VehicleKind;
pub use coordinate::Coordinate;
pub use feasibility::CargoSpec;
pub use pricing::DeliveryStrategy;
pub use solver::{OptimizationResult, OptimizeBy, OptimizeError, OptimizeRequest, Optimizer, optimize};
