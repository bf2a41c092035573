//! Construction heuristics for the first assignment of each search attempt.
//!
//! Every heuristic works on a fixed fleet, honours all constraint
//! dimensions, and returns `None` rather than a partial assignment.
//!
//! - [`savings`]: Clarke-Wright savings (1964), O(n² log n)
//! - [`path_cheapest_arc`]: Nearest feasible extension per vehicle, O(n² L)
//! - [`cheapest_insertion`]: Global cheapest feasible insertion, O(n³ L)
//! - [`sweep`]: Polar-angle sweep (Gillett & Miller, 1974), O(n log n + n L²)
//! - [`automatic`]: Cheapest of all of the above

mod automatic;
mod cheapest_insertion;
mod path_cheapest_arc;
mod savings;
mod sweep;

pub use automatic::{automatic, construct};
pub use cheapest_insertion::cheapest_insertion;
pub use path_cheapest_arc::path_cheapest_arc;
pub use savings::savings;
pub use sweep::sweep;
