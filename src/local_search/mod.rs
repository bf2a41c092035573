//! Local search operators for improving feasible assignments.
//!
//! Operators work in place on per-vehicle node sequences, score moves
//! through an [`ArcCost`], and only apply moves that keep every touched
//! route feasible.
//!
//! - [`relocate_improve`]: Inter-route pickup relocation
//! - [`exchange_improve`]: Inter-route tail exchange (2-opt*)
//! - [`two_opt_improve`]: Intra-route segment reversal
//! - [`or_opt_improve`]: Intra-route segment relocation
//! - [`guided_local_search`]: Penalty-guided descent over all of the above

mod cost;
mod exchange;
mod guided;
mod or_opt;
mod relocate;
mod two_opt;

pub use cost::{
    insertion_delta, removal_delta, route_cost, ArcCost, ArcPenalties, PenalizedCost,
};
pub use exchange::exchange_improve;
pub use guided::{descend, guided_local_search, GuidedSearchConfig};
pub use or_opt::{or_opt_improve, MAX_SEGMENT_LEN};
pub use relocate::relocate_improve;
pub use two_opt::two_opt_improve;

/// Smallest cost decrease, in meters, that counts as an improvement.
pub const IMPROVEMENT_EPSILON: f64 = 1e-6;
