//! Solution and violation types.

use serde::{Deserialize, Serialize};

use super::Route;
use crate::search::FirstSolutionStrategy;

/// A type of constraint violation in a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ViolationType {
    /// Cumulative load exceeds the effective vehicle capacity.
    CapacityExceeded {
        /// Load that exceeded capacity.
        load: u32,
        /// Effective capacity (after slack).
        capacity: u32,
    },
    /// Arrival after the node's time window closes.
    TimeWindowViolated {
        /// Node index where the violation occurred (0 = depot).
        node: usize,
        /// Arrival, minutes since midnight.
        arrival: f64,
        /// Time window due, minutes since midnight.
        due: f64,
    },
    /// Round-trip distance exceeds the distance dimension.
    MaxDistanceExceeded {
        /// Route distance in meters.
        distance: f64,
        /// Limit in meters.
        max_distance: f64,
    },
}

/// A constraint violation found by the evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// A constraint-satisfying assignment of every pickup to a vehicle.
///
/// Holds one [`Route`] per vehicle (unused vehicles have depot-only routes),
/// the objective cost in meters, and the construction strategy that found it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    cost: f64,
    strategy: FirstSolutionStrategy,
    routes: Vec<Route>,
}

impl Solution {
    /// Creates a solution from extracted routes.
    pub fn new(cost: f64, strategy: FirstSolutionStrategy, routes: Vec<Route>) -> Self {
        Self {
            cost,
            strategy,
            routes,
        }
    }

    /// Objective value reported by the search, in meters.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Strategy whose attempt produced this solution.
    pub fn strategy(&self) -> FirstSolutionStrategy {
        self.strategy
    }

    /// One route per vehicle, ordered by vehicle id.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Number of routes that visit at least one pickup.
    pub fn num_active_routes(&self) -> usize {
        self.routes.iter().filter(|r| !r.is_empty()).count()
    }

    /// Total distance across all routes, in meters.
    pub fn total_distance_m(&self) -> f64 {
        self.routes.iter().map(Route::total_distance_m).sum()
    }

    /// Total distance across all routes, in kilometers.
    pub fn total_distance_km(&self) -> f64 {
        self.total_distance_m() / 1000.0
    }

    /// Passengers picked up across all routes.
    pub fn total_passengers(&self) -> u32 {
        self.routes.iter().map(Route::total_load).sum()
    }

    /// Number of pickup stops across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(Route::len).sum()
    }

    /// Every served point id, route by route.
    pub fn point_ids(&self) -> Vec<u64> {
        self.routes.iter().flat_map(Route::point_ids).collect()
    }
}
