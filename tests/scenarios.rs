//! End-to-end solve scenarios on fixed coastal-town inputs.

use std::collections::HashMap;
use std::time::Duration;

use pickup_routing::constraints::{parse_clock, ModelConfig};
use pickup_routing::distance::haversine_km;
use pickup_routing::error::{RoutingError, ValidationError};
use pickup_routing::local_search::GuidedSearchConfig;
use pickup_routing::models::{Depot, Fleet, PickupPoint};
use pickup_routing::planner::{PlanOutcome, RoutePlanner};
use pickup_routing::report::{stop_records, SolutionReport};
use pickup_routing::search::{FirstSolutionStrategy, SearchConfig};
use rstest::{fixture, rstest};

#[fixture]
fn depot() -> Depot {
    Depot::new(48.4504, -2.0448).expect("valid").with_name("Chateau")
}

#[fixture]
fn planner() -> RoutePlanner {
    RoutePlanner::default().with_search(
        SearchConfig::default()
            .with_time_budget(Duration::from_secs(2))
            .with_guided(GuidedSearchConfig::default().with_max_iterations(50)),
    )
}

fn point(id: u64, lat: f64, lon: f64, passengers: u32, arrival: &str) -> PickupPoint {
    PickupPoint::new(id, lat, lon, passengers, arrival, format!("Stop {id}")).expect("valid")
}

fn three_points() -> Vec<PickupPoint> {
    vec![
        point(1, 48.4630, -2.0610, 3, "09:00"),
        point(2, 48.4400, -2.0300, 2, "09:30"),
        point(3, 48.4710, -2.0205, 4, "10:00"),
    ]
}

#[rstest]
#[case::savings(FirstSolutionStrategy::Savings)]
#[case::path_cheapest_arc(FirstSolutionStrategy::PathCheapestArc)]
#[case::cheapest_insertion(FirstSolutionStrategy::CheapestInsertion)]
#[case::sweep(FirstSolutionStrategy::Sweep)]
#[case::automatic(FirstSolutionStrategy::Automatic)]
fn test_small_instance_visits_each_point_once(
    depot: Depot,
    planner: RoutePlanner,
    #[case] strategy: FirstSolutionStrategy,
) {
    let mut search = planner.search.clone();
    search.strategies = vec![strategy];
    let planner = planner.with_search(search);

    let fleet = Fleet::new(3, 8, 15.0).expect("valid");
    let solution = planner.solve(&depot, &three_points(), fleet).expect("feasible");

    assert_eq!(solution.routes().len(), 3);
    assert_eq!(solution.strategy(), strategy);
    let mut counts: HashMap<u64, usize> = HashMap::new();
    for id in solution.point_ids() {
        *counts.entry(id).or_default() += 1;
    }
    assert_eq!(counts.len(), 3);
    assert!(counts.values().all(|&c| c == 1));
    assert_eq!(solution.total_passengers(), 9);
    for route in solution.routes() {
        assert!(route.is_depot_anchored());
        assert!(route.total_load() <= 8);
        assert!(route.total_distance_km() <= 30.0);
    }

    let records = stop_records(&depot, solution.routes());
    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|r| r.stop_number >= 1));
}

#[rstest]
fn test_demand_above_fleet_capacity_fails_before_search(depot: Depot, planner: RoutePlanner) {
    let points: Vec<PickupPoint> = (1..=10)
        .map(|i| point(i, 48.4504 + 0.002 * i as f64, -2.0448, 3, "09:00"))
        .collect();
    let fleet = Fleet::new(3, 8, 15.0).expect("valid");

    let err = planner.solve(&depot, &points, fleet).unwrap_err();
    assert_eq!(
        err,
        RoutingError::Validation(ValidationError::CapacityExceeded {
            total_passengers: 30,
            fleet_capacity: 24,
        })
    );
    // plan() must not degrade validation failures
    assert!(planner.plan(&depot, &points, fleet).is_err());
}

#[rstest]
fn test_no_points_yields_empty_routes(depot: Depot, planner: RoutePlanner) {
    let fleet = Fleet::new(2, 8, 15.0).expect("valid");
    let solution = planner.solve(&depot, &[], fleet).expect("feasible");

    assert_eq!(solution.routes().len(), 2);
    assert!(solution.routes().iter().all(|r| r.is_empty() && r.is_depot_anchored()));
    assert_eq!(solution.total_distance_km(), 0.0);
    assert_eq!(solution.total_passengers(), 0);

    let report = SolutionReport::from(&solution);
    assert_eq!(report.routes.len(), 2);
    assert_eq!(report.total_passengers, 0);
}

#[rstest]
#[case::at_limit(0.0, true)]
#[case::just_beyond(-1e-6, false)]
fn test_radius_boundary(
    depot: Depot,
    planner: RoutePlanner,
    #[case] limit_offset_km: f64,
    #[case] accepted: bool,
) {
    let far = point(42, 48.4954, -2.0448, 2, "09:00");
    let radius = haversine_km(depot.location(), far.location());
    let fleet = Fleet::new(1, 8, radius + limit_offset_km).expect("valid");

    let result = planner.solve(&depot, &[far], fleet);
    if accepted {
        let solution = result.expect("point at the limit is accepted");
        assert_eq!(solution.point_ids(), vec![42]);
    } else {
        match result {
            Err(RoutingError::Validation(err)) => assert_eq!(err.point_id(), Some(42)),
            other => panic!("expected out-of-range rejection, got {other:?}"),
        }
    }
}

#[rstest]
fn test_oversized_pickup_falls_back(depot: Depot, planner: RoutePlanner) {
    let points = vec![
        point(1, 48.4600, -2.0448, 5, "09:00"),
        point(2, 48.4400, -2.0448, 1, "09:00"),
        point(3, 48.4504, -2.0300, 1, "09:00"),
    ];
    let fleet = Fleet::new(2, 4, 15.0).expect("valid");

    match planner.solve(&depot, &points, fleet) {
        Err(RoutingError::Infeasible(infeasible)) => {
            assert_eq!(infeasible.strategies, planner.search.strategies);
        }
        other => panic!("expected infeasible, got {other:?}"),
    }

    let PlanOutcome::Degraded(degraded) = planner.plan(&depot, &points, fleet).expect("planned")
    else {
        panic!("expected degraded plan");
    };
    assert_eq!(degraded.routes().len(), 2);
    assert_eq!(degraded.point_ids(), vec![1, 2, 3]);
    assert_eq!(degraded.routes()[0].point_ids(), vec![1, 2]);
    assert!(!degraded.violations().is_empty());

    let json = serde_json::to_value(SolutionReport::from(&degraded)).expect("serializable");
    assert_eq!(json["status"], "degraded");
    assert!(json.get("strategy").is_none());
}

#[rstest]
fn test_capacity_slack_lets_one_vehicle_take_both(depot: Depot, planner: RoutePlanner) {
    let points = vec![
        point(1, 48.4600, -2.0448, 6, "09:00"),
        point(2, 48.4610, -2.0440, 6, "09:00"),
    ];
    let fleet = Fleet::new(2, 8, 15.0).expect("valid");

    let strict = planner.solve(&depot, &points, fleet).expect("feasible");
    assert_eq!(strict.num_active_routes(), 2);

    let relaxed = planner
        .with_model(ModelConfig::default().with_capacity_slack(1.5))
        .solve(&depot, &points, fleet)
        .expect("feasible");
    assert_eq!(relaxed.num_active_routes(), 1);
    assert!(relaxed.routes().iter().all(|r| r.total_load() <= 12));
}

#[rstest]
fn test_mixed_windows_are_served_on_time(depot: Depot, planner: RoutePlanner) {
    let points = vec![
        point(1, 48.4630, -2.0610, 2, "08:00"),
        point(2, 48.4400, -2.0300, 2, "11:30"),
        point(3, 48.4710, -2.0205, 1, "08:15"),
        point(4, 48.4450, -2.0550, 3, "11:00"),
        point(5, 48.4560, -2.0350, 1, "08:00"),
    ];
    let fleet = Fleet::new(2, 8, 15.0).expect("valid");
    let width = 30;

    let solution = planner
        .with_model(ModelConfig::default().with_window_width(width))
        .solve(&depot, &points, fleet)
        .expect("feasible");

    let mut served = solution.point_ids();
    served.sort_unstable();
    assert_eq!(served, vec![1, 2, 3, 4, 5]);
    for route in solution.routes() {
        for stop in route.pickups() {
            assert!(!stop.arrival_repaired);
            let ready = stop.arrival_time.as_deref().and_then(parse_clock).expect("scheduled");
            let due = ready + width;
            assert!(
                f64::from(ready) <= stop.service_minute + 1e-9
                    && stop.service_minute <= f64::from(due) + 1e-9,
                "point {:?} served at {:.2}, window [{ready}, {due}]",
                stop.point_id,
                stop.service_minute
            );
        }
    }
}
