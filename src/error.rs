//! Error taxonomy for the routing engine.
//!
//! Validation failures are detected before any search starts and always abort
//! the solve call. Search exhaustion is reported separately as
//! [`InfeasibleError`] so callers can decide between a hard failure and the
//! degraded [`fallback`](crate::fallback) path.

use std::time::Duration;

use thiserror::Error;

use crate::search::FirstSolutionStrategy;

/// Malformed or out-of-policy input detected before search.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A pickup point lies beyond the fleet's maximum radius.
    #[error(
        "point {point_id} is {distance_km:.3} km from the depot, beyond the {max_distance_km} km limit"
    )]
    PointOutOfRange {
        /// Offending point.
        point_id: u64,
        /// Great-circle distance from the depot.
        distance_km: f64,
        /// Configured maximum one-way distance.
        max_distance_km: f64,
    },
    /// Aggregate demand cannot fit in the fleet.
    #[error("total demand of {total_passengers} passengers exceeds fleet capacity of {fleet_capacity}")]
    CapacityExceeded {
        /// Sum of all point demands.
        total_passengers: u64,
        /// `num_vehicles × capacity_per_vehicle`.
        fleet_capacity: u64,
    },
    /// Arrival time is unparseable or outside the operating interval while
    /// the reject policy is active.
    #[error("point {point_id} has unusable arrival time {value:?}")]
    InvalidArrivalTime {
        /// Offending point.
        point_id: u64,
        /// Raw value supplied by the caller.
        value: String,
    },
    /// A point declared zero passengers.
    #[error("point {point_id} must carry at least one passenger")]
    InvalidPassengers {
        /// Offending point.
        point_id: u64,
    },
    /// A point has non-finite or out-of-range coordinates.
    #[error("point {point_id} has invalid coordinates ({lat}, {lon})")]
    InvalidCoordinates {
        /// Offending point.
        point_id: u64,
        /// Supplied latitude.
        lat: f64,
        /// Supplied longitude.
        lon: f64,
    },
    /// The depot has non-finite or out-of-range coordinates.
    #[error("depot has invalid coordinates ({lat}, {lon})")]
    InvalidDepot {
        /// Supplied latitude.
        lat: f64,
        /// Supplied longitude.
        lon: f64,
    },
    /// Fleet parameters are unusable.
    #[error("invalid fleet: {reason}")]
    InvalidFleet {
        /// What is wrong with the fleet.
        reason: String,
    },
    /// Engine configuration is unusable.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// What is wrong with the configuration.
        reason: String,
    },
}

impl ValidationError {
    /// The point this error refers to, if any.
    pub fn point_id(&self) -> Option<u64> {
        match self {
            Self::PointOutOfRange { point_id, .. }
            | Self::InvalidArrivalTime { point_id, .. }
            | Self::InvalidPassengers { point_id }
            | Self::InvalidCoordinates { point_id, .. } => Some(*point_id),
            _ => None,
        }
    }
}

/// Every configured strategy exhausted its time slice without a feasible
/// assignment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no feasible assignment found by {} strategies within {time_budget:?}", strategies.len())]
pub struct InfeasibleError {
    /// Strategies that were tried, in order.
    pub strategies: Vec<FirstSolutionStrategy>,
    /// Total search budget that was spent.
    pub time_budget: Duration,
}

/// Any failure of a solve call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RoutingError {
    /// Input rejected before search.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Search found nothing feasible.
    #[error(transparent)]
    Infeasible(#[from] InfeasibleError),
}
