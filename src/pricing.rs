//! Pooling discount policy.
//!
//! Under the `auto` strategy a shipment is priced as if it were consolidated
//! with others: a flat discount keyed only on the route shape. No actual
//! matching with other shipments takes place.

use serde::{Deserialize, Serialize};

use crate::metrics::round_to;

/// Discount for routes through a hub under `auto`.
pub const HUB_POOLING_DISCOUNT: f64 = 0.25;
/// Discount for direct routes under `auto`.
pub const DIRECT_POOLING_DISCOUNT: f64 = 0.15;

/// How the caller wants the shipment delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStrategy {
    /// Shared pooling with a flat discount.
    #[default]
    Auto,
    /// Dedicated point-to-point delivery, bound to one vehicle.
    P2p,
}

/// Pricing label and discount for a chosen route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoolingPolicy {
    pub label: &'static str,
    pub discount: f64,
}

/// A priced quote after the policy is applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricedCost {
    pub original_cost: f64,
    pub total_cost: f64,
    pub discount: f64,
    pub savings: f64,
}

pub fn pooling_policy(strategy: DeliveryStrategy, has_hub: bool) -> PoolingPolicy {
    match (strategy, has_hub) {
        (DeliveryStrategy::P2p, _) => PoolingPolicy {
            label: "Direct P2P",
            discount: 0.0,
        },
        (DeliveryStrategy::Auto, true) => PoolingPolicy {
            label: "Hub-Shared-Pooling",
            discount: HUB_POOLING_DISCOUNT,
        },
        (DeliveryStrategy::Auto, false) => PoolingPolicy {
            label: "Direct-Shared-Pooling",
            discount: DIRECT_POOLING_DISCOUNT,
        },
    }
}

impl PoolingPolicy {
    pub fn apply(&self, cost: f64) -> PricedCost {
        if self.discount == 0.0 {
            return PricedCost {
                original_cost: cost,
                total_cost: cost,
                discount: 0.0,
                savings: 0.0,
            };
        }
        let shared = cost * (1.0 - self.discount);
        PricedCost {
            original_cost: round_to(cost, 2),
            total_cost: round_to(shared, 2),
            discount: self.discount,
            savings: round_to(cost - shared, 2),
        }
    }

    /// Discount as a whole percentage, e.g. `25`.
    pub fn percent(&self) -> u32 {
        (self.discount * 100.0).round() as u32
    }
}
