//! End-to-end scenarios on the 10-location C108 excerpt.

use std::time::Duration;

use gls_routing::constructive::{nearest_feasible, ConstructionError, ConstructionMode};
use gls_routing::evaluation::{Context, Objective, RouteEvaluator};
use gls_routing::gls::{solve, GlsConfig, GuidedLocalSearch, Step, Termination};
use gls_routing::instance::parse_instance;
use gls_routing::local_search::{local_search, Operator};
use gls_routing::models::{CostModel, Solution};
use gls_routing::output::write_solution;

const C108_SHORT: &str = r#"
C108_shortened_x10

VEHICLE
NUMBER     CAPACITY
3         20

CUSTOMER
CUST NO.   XCOORD.   YCOORD.   DEMAND    READY TIME   DUE DATE   SERVICE TIME

    0      40         50          0          0       1236          0
    1      45         68         10        830       1049         90
    2      45         70         30        756        939         90
    3      42         66         10         16        336         90
    4      42         68         10        643        866         90
    5      42         65         10         15        226         90
    6      40         69         20        499        824         90
    7      40         66         20         87        308         90
    8      38         68         20        150        429         90
    9      38         70         10        429        710         90
"#;

fn model_with_capacity(capacity: u32) -> CostModel {
    let text = C108_SHORT.replace("3         20", &format!("3         {capacity}"));
    parse_instance(&text)
        .expect("valid instance")
        .into_cost_model()
        .expect("valid model")
}

fn assert_invariants(model: &CostModel, solution: &Solution) {
    let mut served: Vec<usize> = solution
        .routes()
        .iter()
        .flat_map(|r| r.customers().iter().copied())
        .collect();
    served.sort_unstable();
    let expected: Vec<usize> = (1..=model.num_customers()).collect();
    assert_eq!(served, expected, "every customer exactly once");

    for route in solution.routes() {
        assert!(model.fits(model.load(route.customers())));
        let path = route.path();
        assert_eq!(path.first(), Some(&model.depot()));
        assert_eq!(path.last(), Some(&model.depot()));
    }
    assert!(solution.num_routes() <= model.vehicle_count());
    assert!(RouteEvaluator::new(model).is_feasible(solution));
}

fn polished(model: &CostModel, solution: &Solution) -> f64 {
    let obj = Objective::new(model);
    let s = local_search(obj, solution, &Context::Plain, &[]);
    obj.evaluate(&s, &Context::Plain)
}

#[test]
fn test_printed_capacity_is_infeasible() {
    let model = model_with_capacity(20);
    assert_eq!(model.total_demand(), 140);
    let err = nearest_feasible(&model, ConstructionMode::Strict).unwrap_err();
    assert_eq!(
        err,
        ConstructionError::DemandExceedsCapacity {
            customer: 2,
            demand: 30,
            capacity: 20
        }
    );
    assert!(solve(&model, GlsConfig::default()).is_err());
}

#[test]
fn test_ignore_constraints_returns_diagnostic_solution() {
    let model = model_with_capacity(20);
    let sol = nearest_feasible(&model, ConstructionMode::IgnoreConstraints)
        .expect("diagnostic mode never fails");
    assert!(!sol.all_served(model.num_customers()));
    assert!(sol.unassigned().contains(&2));
    assert_eq!(
        sol.num_served() + sol.num_unassigned(),
        model.num_customers()
    );
    for route in sol.routes() {
        assert!(model.load(route.customers()) <= 20);
    }
}

#[test]
fn test_initial_solution_invariants_with_room() {
    let model = model_with_capacity(200);
    let initial = nearest_feasible(&model, ConstructionMode::Strict).expect("feasible");
    assert_invariants(&model, &initial);
}

#[test]
fn test_initial_solution_invariants_tight_fleet() {
    // 140 units over three vehicles of 50 leaves 10 spare.
    let model = model_with_capacity(50);
    match nearest_feasible(&model, ConstructionMode::Strict) {
        Ok(initial) => assert_invariants(&model, &initial),
        Err(ConstructionError::VehiclesExhausted { unassigned, .. }) => {
            assert!(!unassigned.is_empty())
        }
        Err(e) => panic!("unexpected error: {e}"),
    }
}

#[test]
fn test_objective_is_sum_of_route_edges() {
    let model = model_with_capacity(200);
    let sol = solve(&model, GlsConfig::default())
        .expect("feasible")
        .solution;
    let by_hand: f64 = sol
        .routes()
        .iter()
        .map(|r| {
            r.path()
                .windows(2)
                .map(|w| model.cost(w[0], w[1]))
                .sum::<f64>()
        })
        .sum();
    let obj = Objective::new(&model);
    assert!((obj.evaluate(&sol, &Context::Plain) - by_hand).abs() < 1e-9);
}

#[test]
fn test_max_iterations_zero() {
    let model = model_with_capacity(200);
    let initial = nearest_feasible(&model, ConstructionMode::Strict).expect("feasible");
    let result = solve(&model, GlsConfig::default().with_max_iterations(0)).expect("feasible");
    assert_eq!(result.iterations, 0);
    assert_eq!(result.termination, Termination::IterationLimit);
    assert!((result.cost - polished(&model, &initial)).abs() < 1e-10);
    assert_invariants(&model, &result.solution);
}

#[test]
fn test_zero_time_budget() {
    let model = model_with_capacity(200);
    let config = GlsConfig::default().with_time_limit(Duration::ZERO);

    let mut gls = GuidedLocalSearch::new(&model, config.clone()).expect("feasible");
    assert_eq!(gls.step(), Step::TimedOut);
    assert!(gls.penalties().is_empty());
    let result = gls.finish(Termination::TimedOut);

    let initial = nearest_feasible(&model, ConstructionMode::Strict).expect("feasible");
    assert!((result.cost - polished(&model, &initial)).abs() < 1e-10);
    assert_eq!(result.penalized_features, 0);

    let via_solve = solve(&model, config).expect("feasible");
    assert_eq!(via_solve.termination, Termination::TimedOut);
    assert_eq!(via_solve.solution, result.solution);
}

#[test]
fn test_full_run_keeps_invariants_and_improves() {
    let model = model_with_capacity(200);
    let result = solve(&model, GlsConfig::default()).expect("feasible");
    assert_invariants(&model, &result.solution);
    assert!(result.cost <= result.initial_cost + 1e-10);
    assert!(result.elapsed < Duration::from_secs(60));
}

#[test]
fn test_excluding_every_operator_returns_initial() {
    let model = model_with_capacity(200);
    let initial = nearest_feasible(&model, ConstructionMode::Strict).expect("feasible");
    let config = GlsConfig::default().with_excluded_operators(Operator::ALL.to_vec());
    let result = solve(&model, config).expect("feasible");
    assert_eq!(result.solution, initial);
    assert_eq!(result.termination, Termination::Converged);
}

#[test]
fn test_text_output_of_result() {
    let model = model_with_capacity(200);
    let result = solve(&model, GlsConfig::default()).expect("feasible");
    let mut buf = Vec::new();
    write_solution(&model, &result.solution, &mut buf).expect("write");
    let text = String::from_utf8(buf).expect("utf8");
    assert!(text.starts_with("Route 1: 0 "));
    assert!(text.contains(&format!("Vehicles: {}", result.solution.num_routes())));
    assert!(text.contains(&format!("Distance: {:.2}", result.cost)));
}
