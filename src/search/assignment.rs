//! Node-index view of a candidate solution.

use crate::constraints::{ConstraintModel, DEPOT};
use crate::evaluation::RouteEvaluator;

/// One node sequence per vehicle, depot implied at both ends.
///
/// This is the working representation of heuristics and local search;
/// [`extract_solution`](crate::extract::extract_solution) turns it into
/// caller-facing routes.
///
/// # Examples
///
/// ```
/// use pickup_routing::search::Assignment;
///
/// let a = Assignment::new(vec![vec![2, 1], vec![], vec![3]]);
/// assert!(a.is_complete(3));
/// assert!(!a.is_complete(4));
/// assert_eq!(a.arcs().count(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assignment {
    routes: Vec<Vec<usize>>,
}

impl Assignment {
    /// Wraps per-vehicle node sequences.
    pub fn new(routes: Vec<Vec<usize>>) -> Self {
        Self { routes }
    }

    /// `num_vehicles` empty routes.
    pub fn empty(num_vehicles: usize) -> Self {
        Self {
            routes: vec![Vec::new(); num_vehicles],
        }
    }

    /// Node sequences, one per vehicle.
    pub fn routes(&self) -> &[Vec<usize>] {
        &self.routes
    }

    /// Mutable access for local search moves.
    pub fn routes_mut(&mut self) -> &mut [Vec<usize>] {
        &mut self.routes
    }

    /// Consumes the assignment.
    pub fn into_routes(self) -> Vec<Vec<usize>> {
        self.routes
    }

    /// Pads with empty routes up to `num_vehicles`.
    pub fn pad_to(&mut self, num_vehicles: usize) {
        if self.routes.len() < num_vehicles {
            self.routes.resize_with(num_vehicles, Vec::new);
        }
    }

    /// Every traversed arc, depot legs included; unused vehicles add none.
    pub fn arcs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.routes
            .iter()
            .filter(|r| !r.is_empty())
            .flat_map(|r| {
                std::iter::once(DEPOT)
                    .chain(r.iter().copied())
                    .zip(r.iter().copied().chain(std::iter::once(DEPOT)))
            })
    }

    /// Total distance in meters.
    pub fn cost(&self, model: &ConstraintModel<'_>) -> f64 {
        RouteEvaluator::new(model).total_distance(&self.routes)
    }

    /// Returns `true` if nodes `1..=num_points` each appear exactly once.
    pub fn is_complete(&self, num_points: usize) -> bool {
        let mut seen = vec![false; num_points + 1];
        let mut count = 0;
        for &node in self.routes.iter().flatten() {
            if node == DEPOT || node > num_points || seen[node] {
                return false;
            }
            seen[node] = true;
            count += 1;
        }
        count == num_points
    }

    /// Complete, within the fleet size, and every route feasible.
    pub fn is_feasible(&self, model: &ConstraintModel<'_>) -> bool {
        self.routes.len() <= model.num_vehicles()
            && self.is_complete(model.num_points())
            && RouteEvaluator::new(model).all_feasible(&self.routes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arcs_skip_empty_routes() {
        let a = Assignment::new(vec![vec![1, 2], vec![]]);
        let arcs: Vec<_> = a.arcs().collect();
        assert_eq!(arcs, vec![(0, 1), (1, 2), (2, 0)]);
    }

    #[test]
    fn test_is_complete_rejects_duplicates() {
        assert!(!Assignment::new(vec![vec![1, 1]]).is_complete(2));
        assert!(!Assignment::new(vec![vec![0, 1]]).is_complete(1));
        assert!(Assignment::empty(3).is_complete(0));
    }

    #[test]
    fn test_pad_to() {
        let mut a = Assignment::new(vec![vec![1]]);
        a.pad_to(3);
        assert_eq!(a.routes().len(), 3);
        a.pad_to(1);
        assert_eq!(a.routes().len(), 3);
    }
}
