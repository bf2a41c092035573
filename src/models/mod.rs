//! Domain model types for depot-anchored pickup routing.
//!
//! Provides the caller-facing inputs (depot, pickup points, fleet) and the
//! engine's outputs (stops, routes, solutions), plus the time window and
//! violation types shared by the evaluator.

mod fleet;
mod point;
mod route;
mod solution;

pub use fleet::{Fleet, FleetLimits};
pub use point::{Depot, GeoPoint, PickupPoint, TimeWindow};
pub use route::{Route, Stop, StopKind};
pub use solution::{Solution, Violation, ViolationType};
