//! Great-circle distance model.
//!
//! Provides the haversine formula and a dense distance matrix over the depot
//! (node 0) and every pickup point.

mod haversine;
mod matrix;

pub use haversine::{haversine_km, haversine_m, EARTH_RADIUS_KM};
pub use matrix::DistanceMatrix;
