//! Route timing, load, and feasibility diagnostics.

use serde::{Deserialize, Serialize};

use crate::models::{CostModel, Route, Solution, Violation, ViolationType, Visit};

/// Timing and load of one route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSchedule {
    /// One entry per customer, in visit order.
    pub visits: Vec<Visit>,
    /// Travel distance, depot legs included.
    pub distance: f64,
    /// Time the vehicle is back at the depot.
    pub duration: f64,
    /// Total demand served.
    pub load: u64,
}

/// Walks routes to compute visit timing, cumulative load, and constraint
/// violations.
///
/// Travel time equals travel cost. Capacity violations are hard; time
/// window violations are reported but the search does not enforce them.
///
/// # Examples
///
/// ```
/// use gls_routing::models::{CostModel, Customer, Route};
/// use gls_routing::evaluation::RouteEvaluator;
///
/// let model = CostModel::euclidean(
///     vec![
///         Customer::depot(0.0, 0.0),
///         Customer::new(1, 3.0, 4.0, 10, 5.0),
///         Customer::new(2, 6.0, 8.0, 20, 5.0),
///     ],
///     1,
///     100,
/// )
/// .unwrap();
///
/// let evaluator = RouteEvaluator::new(&model);
/// let (schedule, violations) = evaluator.build_schedule(&Route::new(0, vec![1, 2]));
/// assert_eq!(schedule.visits.len(), 2);
/// assert_eq!(schedule.load, 30);
/// assert!(violations.is_empty());
/// ```
pub struct RouteEvaluator<'a> {
    model: &'a CostModel,
}

impl<'a> RouteEvaluator<'a> {
    pub fn new(model: &'a CostModel) -> Self {
        Self { model }
    }

    /// Computes the schedule of `route` and the violations found on it.
    ///
    /// Capacity violations carry route index 0; [`check_solution`](Self::check_solution)
    /// rewrites them to the route's position.
    pub fn build_schedule(&self, route: &Route) -> (RouteSchedule, Vec<Violation>) {
        let mut violations = Vec::new();
        let mut visits = Vec::with_capacity(route.len());
        let mut time = 0.0;
        let mut load: u64 = 0;
        let mut distance = 0.0;
        let mut prev = route.depot();

        for &cid in route.customers() {
            let travel = self.model.cost(prev, cid);
            distance += travel;
            let arrival = time + travel;
            let customer = self.model.customer(cid);

            let service_start = match customer.time_window() {
                Some(tw) => {
                    if tw.is_violated(arrival) {
                        violations.push(Violation::new(ViolationType::TimeWindowViolated {
                            customer_id: cid,
                            arrival,
                            due: tw.due(),
                        }));
                    }
                    arrival + tw.waiting_time(arrival)
                }
                None => arrival,
            };

            let departure = service_start + customer.service_duration();
            load += u64::from(customer.demand());
            visits.push(Visit {
                customer_id: cid,
                arrival_time: arrival,
                departure_time: departure,
                load_after: load,
            });
            time = departure;
            prev = cid;
        }

        if !route.is_empty() {
            let back = self.model.cost(prev, route.depot());
            distance += back;
            time += back;
        }

        if load > u64::from(self.model.capacity()) {
            violations.push(Violation::new(ViolationType::CapacityExceeded {
                route_index: 0,
                load,
                capacity: self.model.capacity(),
            }));
        }

        let schedule = RouteSchedule {
            visits,
            distance,
            duration: time,
            load,
        };
        (schedule, violations)
    }

    /// Schedules of every route of `solution`, in route order.
    pub fn schedules(&self, solution: &Solution) -> Vec<RouteSchedule> {
        solution
            .routes()
            .iter()
            .map(|r| self.build_schedule(r).0)
            .collect()
    }

    /// All violations of `solution`: partition, route count, capacity, and
    /// time windows.
    pub fn check_solution(&self, solution: &Solution) -> Vec<Violation> {
        let n = self.model.num_customers();
        let mut violations = Vec::new();

        if solution.num_routes() > self.model.vehicle_count() {
            violations.push(Violation::new(ViolationType::RouteCountExceeded {
                routes: solution.num_routes(),
                vehicles: self.model.vehicle_count(),
            }));
        }

        let mut visits = vec![0usize; n + 1];
        for (idx, route) in solution.routes().iter().enumerate() {
            let mut known = true;
            for &cid in route.customers() {
                if cid == 0 || cid > n {
                    violations.push(Violation::new(ViolationType::UnknownCustomer {
                        route_index: idx,
                        customer_id: cid,
                    }));
                    known = false;
                } else {
                    visits[cid] += 1;
                }
            }
            if !known {
                continue;
            }

            let (_, route_violations) = self.build_schedule(route);
            violations.extend(route_violations.into_iter().map(|mut v| {
                if let ViolationType::CapacityExceeded { route_index, .. } = &mut v.kind {
                    *route_index = idx;
                }
                v
            }));
        }

        for (cid, &count) in visits.iter().enumerate().skip(1) {
            match count {
                0 => violations.push(Violation::new(ViolationType::CustomerMissing {
                    customer_id: cid,
                })),
                1 => {}
                repeated => violations.push(Violation::new(ViolationType::CustomerDuplicated {
                    customer_id: cid,
                    visits: repeated,
                })),
            }
        }

        violations
    }

    /// Returns `true` when `solution` has no hard violation.
    pub fn is_feasible(&self, solution: &Solution) -> bool {
        self.check_solution(solution).iter().all(|v| !v.is_hard())
    }
}
