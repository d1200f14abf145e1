//! Property tests over random instances.

use proptest::prelude::*;

use gls_routing::constructive::{nearest_feasible, ConstructionMode};
use gls_routing::evaluation::{Context, Objective, PenaltyContext, RouteEvaluator};
use gls_routing::gls::{
    current_features, most_utilized, solve, utility, GlsConfig, GuidedLocalSearch, PenaltyMap,
    Step,
};
use gls_routing::local_search::local_search;
use gls_routing::models::{CostModel, Customer, Solution};

/// Up to 12 customers on a grid, demands 1..=10, capacity at least 10 and
/// one vehicle per customer, so construction always succeeds.
fn instance() -> impl Strategy<Value = CostModel> {
    (
        prop::collection::vec((-50i32..=50, -50i32..=50, 1u32..=10), 1..12),
        10u32..=40,
    )
        .prop_map(|(rows, capacity)| {
            let mut customers = vec![Customer::depot(0.0, 0.0)];
            for (i, (x, y, demand)) in rows.iter().enumerate() {
                customers.push(Customer::new(i + 1, *x as f64, *y as f64, *demand, 0.0));
            }
            let vehicles = rows.len();
            CostModel::euclidean(customers, vehicles, capacity).expect("valid model")
        })
}

fn check_invariants(model: &CostModel, solution: &Solution) -> Result<(), TestCaseError> {
    let mut served: Vec<usize> = solution
        .routes()
        .iter()
        .flat_map(|r| r.customers().iter().copied())
        .collect();
    served.sort_unstable();
    let expected: Vec<usize> = (1..=model.num_customers()).collect();
    prop_assert_eq!(served, expected);
    for route in solution.routes() {
        prop_assert!(model.fits(model.load(route.customers())));
    }
    prop_assert!(solution.num_routes() <= model.vehicle_count());
    prop_assert!(RouteEvaluator::new(model).is_feasible(solution));
    Ok(())
}

fn small_config() -> GlsConfig {
    GlsConfig::default()
        .with_max_iterations(30)
        .with_progress_interval(0)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn constructor_output_is_a_feasible_partition(model in instance()) {
        let sol = nearest_feasible(&model, ConstructionMode::Strict).expect("feasible");
        check_invariants(&model, &sol)?;
    }

    #[test]
    fn objective_is_sum_of_path_costs(model in instance()) {
        let sol = nearest_feasible(&model, ConstructionMode::Strict).expect("feasible");
        let by_hand: f64 = sol
            .routes()
            .iter()
            .flat_map(|r| r.path().windows(2).map(|w| (w[0], w[1])).collect::<Vec<_>>())
            .map(|(a, b)| model.cost(a, b))
            .sum();
        let value = Objective::new(&model).evaluate(&sol, &Context::Plain);
        prop_assert!((value - by_hand).abs() < 1e-9);
    }

    #[test]
    fn local_search_keeps_invariants_and_never_worsens(model in instance()) {
        let obj = Objective::new(&model);
        let start = nearest_feasible(&model, ConstructionMode::Strict).expect("feasible");
        let improved = local_search(obj, &start, &Context::Plain, &[]);
        check_invariants(&model, &improved)?;
        prop_assert!(
            obj.evaluate(&improved, &Context::Plain)
                <= obj.evaluate(&start, &Context::Plain) + 1e-9
        );
    }

    #[test]
    fn penalized_local_search_keeps_invariants(model in instance(), lambda in 0.0f64..1.0) {
        let obj = Objective::new(&model);
        let start = nearest_feasible(&model, ConstructionMode::Strict).expect("feasible");
        let features = current_features(&start);
        let mut penalties = PenaltyMap::new();
        for edge in features.iter().step_by(2) {
            penalties.increment(edge);
        }
        let ctx = Context::Penalized(PenaltyContext::new(&features, &penalties, lambda));
        let candidate = local_search(obj, &start, &ctx, &[]);
        check_invariants(&model, &candidate)?;
        prop_assert!(obj.evaluate(&candidate, &ctx) <= obj.evaluate(&start, &ctx) + 1e-9);
    }

    #[test]
    fn most_utilized_is_deterministic_and_maximal(model in instance(), bumps in 0usize..20) {
        let sol = nearest_feasible(&model, ConstructionMode::Strict).expect("feasible");
        let features = current_features(&sol);
        let mut penalties = PenaltyMap::new();
        for _ in 0..bumps {
            if let Some(e) = most_utilized(&features, &penalties, &model) {
                penalties.increment(e);
            }
        }
        let first = most_utilized(&features, &penalties, &model);
        let second = most_utilized(&features, &penalties, &model);
        prop_assert_eq!(first, second);

        let chosen = first.expect("non-empty feature set");
        let best = utility(chosen, &penalties, &model);
        for e in features.iter() {
            prop_assert!(utility(e, &penalties, &model) <= best);
        }
    }

    #[test]
    fn driver_never_worsens_and_is_deterministic(model in instance()) {
        let a = solve(&model, small_config()).expect("feasible");
        let b = solve(&model, small_config()).expect("feasible");
        check_invariants(&model, &a.solution)?;
        prop_assert!(a.cost <= a.initial_cost + 1e-9);
        prop_assert_eq!(a.solution, b.solution);
        prop_assert_eq!(a.iterations, b.iterations);
    }

    #[test]
    fn penalties_only_grow(model in instance()) {
        let mut gls = GuidedLocalSearch::new(&model, small_config()).expect("feasible");
        let mut snapshot = PenaltyMap::new();
        for _ in 0..10 {
            let step = gls.step();
            for (edge, count) in snapshot.iter() {
                prop_assert!(gls.penalties().get(edge) >= count);
            }
            snapshot = gls.penalties().clone();
            if step != Step::Continue {
                break;
            }
        }
    }
}
