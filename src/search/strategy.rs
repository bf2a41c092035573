//! First-solution strategies.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Heuristic used to build the starting assignment of a search attempt.
///
/// # Examples
///
/// ```
/// use pickup_routing::search::FirstSolutionStrategy;
///
/// assert_eq!(
///     FirstSolutionStrategy::DEFAULT_ORDER,
///     [
///         FirstSolutionStrategy::Savings,
///         FirstSolutionStrategy::PathCheapestArc,
///         FirstSolutionStrategy::Automatic,
///     ]
/// );
/// assert_eq!(FirstSolutionStrategy::Savings.to_string(), "SAVINGS");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FirstSolutionStrategy {
    /// Clarke-Wright savings merges.
    Savings,
    /// Extend each route with its nearest feasible node.
    PathCheapestArc,
    /// Insert the globally cheapest feasible node at its cheapest position.
    CheapestInsertion,
    /// Fill vehicles in polar-angle order around the depot.
    Sweep,
    /// Run every concrete heuristic and keep the cheapest start.
    Automatic,
}

impl FirstSolutionStrategy {
    /// Strategies tried when the caller does not choose.
    pub const DEFAULT_ORDER: [Self; 3] = [Self::Savings, Self::PathCheapestArc, Self::Automatic];

    /// Heuristics that build an assignment directly.
    pub const CONCRETE: [Self; 4] = [
        Self::Savings,
        Self::PathCheapestArc,
        Self::CheapestInsertion,
        Self::Sweep,
    ];

    /// Upper-case name used in logs and reports.
    pub fn name(self) -> &'static str {
        match self {
            Self::Savings => "SAVINGS",
            Self::PathCheapestArc => "PATH_CHEAPEST_ARC",
            Self::CheapestInsertion => "CHEAPEST_INSERTION",
            Self::Sweep => "SWEEP",
            Self::Automatic => "AUTOMATIC",
        }
    }
}

impl fmt::Display for FirstSolutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
