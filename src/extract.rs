//! Conversion of search results into caller-facing routes.

use crate::constraints::ConstraintModel;
use crate::evaluation::{RouteEvaluator, Visit};
use crate::models::{Route, Solution, Stop, StopKind};
use crate::search::SearchResult;

/// Builds one [`Route`] per vehicle from a search result.
///
/// Running load and distance come from the model's distance matrix, so
/// route totals add up to the search cost. Unused vehicles get a
/// depot-to-depot route.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use pickup_routing::constraints::{ConstraintModel, ModelConfig};
/// use pickup_routing::extract::extract_solution;
/// use pickup_routing::models::{Depot, Fleet, PickupPoint};
/// use pickup_routing::search::{SearchConfig, SearchEngine};
///
/// let depot = Depot::new(48.4504, -2.0448).unwrap();
/// let points = vec![PickupPoint::new(1, 48.4604, -2.0448, 2, "09:00", "Church").unwrap()];
/// let fleet = Fleet::new(2, 8, 15.0).unwrap();
/// let model = ConstraintModel::build(&depot, &points, fleet, &ModelConfig::default()).unwrap();
///
/// let engine = SearchEngine::new(SearchConfig::default().with_time_budget(Duration::from_secs(1)));
/// let result = engine.search(&model).unwrap().into_result().unwrap();
/// let solution = extract_solution(&model, &result);
/// assert_eq!(solution.routes().len(), 2);
/// assert_eq!(solution.total_passengers(), 2);
/// assert!((solution.total_distance_m() - result.cost()).abs() < 1e-6);
/// ```
pub fn extract_solution(model: &ConstraintModel<'_>, result: &SearchResult) -> Solution {
    let mut routes: Vec<Route> = result
        .routes()
        .iter()
        .enumerate()
        .map(|(vehicle, nodes)| extract_route(model, vehicle, nodes))
        .collect();
    for vehicle in routes.len()..model.num_vehicles() {
        routes.push(extract_route(model, vehicle, &[]));
    }
    Solution::new(result.cost(), result.strategy(), routes)
}

/// Builds the stop list of one vehicle visiting `nodes` in order.
pub fn extract_route(model: &ConstraintModel<'_>, vehicle_id: usize, nodes: &[usize]) -> Route {
    let (trace, _) = RouteEvaluator::new(model).trace(nodes);
    let last = trace.visits.len().saturating_sub(1);
    let mut route = Route::new(vehicle_id);
    for (i, visit) in trace.visits.iter().enumerate() {
        let kind = if i == 0 {
            StopKind::DepotStart
        } else if i == last {
            StopKind::DepotEnd
        } else {
            StopKind::Pickup
        };
        route.push_stop(make_stop(model, kind, visit));
    }
    route
}

fn make_stop(model: &ConstraintModel<'_>, kind: StopKind, visit: &Visit) -> Stop {
    let location = model.location(visit.node);
    let point = model.point(visit.node).filter(|_| kind == StopKind::Pickup);
    let arrival = point.and_then(|_| model.effective_arrival(visit.node));
    Stop {
        kind,
        point_id: point.map(|p| p.id()),
        lat: location.lat,
        lon: location.lon,
        name: point.map_or_else(|| model.depot().name().to_owned(), |p| p.name().to_owned()),
        poi_type: point.and_then(|p| p.poi_type()).map(str::to_owned),
        arrival_time: arrival.map(|a| a.clock()),
        requested_arrival_time: point.map(|p| p.arrival_time().to_owned()),
        arrival_repaired: arrival.is_some_and(|a| a.repaired),
        service_minute: visit.service_start,
        passengers: model.demand(visit.node),
        load_after: visit.load_after,
        distance_m: visit.distance_after,
    }
}
