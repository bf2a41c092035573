//! Constraint model assembly.
//!
//! Turns a depot, a slice of pickup points, and a fleet into a
//! [`ConstraintModel`]: validated demands, time windows in minutes, the
//! effective vehicle capacity, the route distance limit, and the distance
//! matrix shared by every search strategy.

mod clock;
mod config;
mod model;

pub use clock::{format_clock, parse_clock, MINUTES_PER_DAY};
pub use config::{
    ArrivalTimePolicy, ModelConfig, MAX_WINDOW_WIDTH_MINUTES, MIN_WINDOW_WIDTH_MINUTES,
};
pub use model::{ConstraintModel, EffectiveArrival, DEPOT};
