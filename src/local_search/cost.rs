//! Arc cost functions shared by construction and local search.

use crate::constraints::DEPOT;
use crate::distance::DistanceMatrix;

/// Cost of traversing a single arc.
///
/// Local search moves are scored through this trait so the same operators
/// serve both plain descent (true distance) and guided local search
/// (distance plus arc penalties).
pub trait ArcCost {
    /// Cost of driving from `from` to `to`.
    fn arc(&self, from: usize, to: usize) -> f64;
}

impl ArcCost for DistanceMatrix {
    fn arc(&self, from: usize, to: usize) -> f64 {
        self.get(from, to)
    }
}

/// Symmetric per-arc penalty counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArcPenalties {
    counts: Vec<u32>,
    size: usize,
}

impl ArcPenalties {
    /// All-zero penalties over `size` nodes.
    pub fn new(size: usize) -> Self {
        Self {
            counts: vec![0; size * size],
            size,
        }
    }

    /// Times the arc `{from, to}` has been penalized.
    pub fn get(&self, from: usize, to: usize) -> u32 {
        self.counts[from * self.size + to]
    }

    /// Penalizes the undirected arc `{from, to}` once more.
    pub fn increment(&mut self, from: usize, to: usize) {
        self.counts[from * self.size + to] += 1;
        if from != to {
            self.counts[to * self.size + from] += 1;
        }
    }
}

/// Distance augmented with `lambda × penalty` per arc.
#[derive(Debug, Clone, Copy)]
pub struct PenalizedCost<'a> {
    distances: &'a DistanceMatrix,
    penalties: &'a ArcPenalties,
    lambda: f64,
}

impl<'a> PenalizedCost<'a> {
    /// Combines a distance matrix with penalties weighted by `lambda`.
    pub fn new(distances: &'a DistanceMatrix, penalties: &'a ArcPenalties, lambda: f64) -> Self {
        Self {
            distances,
            penalties,
            lambda,
        }
    }
}

impl ArcCost for PenalizedCost<'_> {
    fn arc(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to) + self.lambda * f64::from(self.penalties.get(from, to))
    }
}

/// Node before `pos` in a depot-anchored route.
pub(crate) fn prev_node(route: &[usize], pos: usize) -> usize {
    if pos == 0 {
        DEPOT
    } else {
        route[pos - 1]
    }
}

/// Node at `pos`, or the depot past the end.
pub(crate) fn node_at(route: &[usize], pos: usize) -> usize {
    route.get(pos).copied().unwrap_or(DEPOT)
}

/// Cost of the full depot-to-depot route.
pub fn route_cost<C: ArcCost + ?Sized>(route: &[usize], cost: &C) -> f64 {
    if route.is_empty() {
        return 0.0;
    }
    let mut total = 0.0;
    let mut prev = DEPOT;
    for &node in route.iter().chain(std::iter::once(&DEPOT)) {
        total += cost.arc(prev, node);
        prev = node;
    }
    total
}

/// Change in cost from removing the node at `pos`.
pub fn removal_delta<C: ArcCost + ?Sized>(route: &[usize], pos: usize, cost: &C) -> f64 {
    let prev = prev_node(route, pos);
    let next = node_at(route, pos + 1);
    let node = route[pos];
    if route.len() == 1 {
        // the vehicle goes unused
        return -(cost.arc(DEPOT, node) + cost.arc(node, DEPOT));
    }
    cost.arc(prev, next) - cost.arc(prev, node) - cost.arc(node, next)
}

/// Change in cost from inserting `node` before position `pos`.
pub fn insertion_delta<C: ArcCost + ?Sized>(
    route: &[usize],
    pos: usize,
    node: usize,
    cost: &C,
) -> f64 {
    let prev = prev_node(route, pos);
    let next = node_at(route, pos);
    if route.is_empty() {
        return cost.arc(DEPOT, node) + cost.arc(node, DEPOT);
    }
    cost.arc(prev, node) + cost.arc(node, next) - cost.arc(prev, next)
}
