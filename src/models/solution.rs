//! Solution and violation types.

use serde::{Deserialize, Serialize};

use super::Route;

/// A type of constraint violation in a solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ViolationType {
    /// Route load exceeds vehicle capacity.
    CapacityExceeded {
        /// Route index in the solution.
        route_index: usize,
        /// Total demand on the route.
        load: u64,
        /// Vehicle capacity.
        capacity: u32,
    },
    /// Arrival after the customer's time window closes.
    TimeWindowViolated {
        /// Customer where the violation occurred.
        customer_id: usize,
        /// Actual arrival time.
        arrival: f64,
        /// Time window due date.
        due: f64,
    },
    /// More routes than available vehicles.
    RouteCountExceeded {
        /// Routes in the solution.
        routes: usize,
        /// Vehicles available.
        vehicles: usize,
    },
    /// A customer is not served by any route.
    CustomerMissing {
        /// The unserved customer.
        customer_id: usize,
    },
    /// A customer is served more than once.
    CustomerDuplicated {
        /// The customer served repeatedly.
        customer_id: usize,
        /// Number of visits.
        visits: usize,
    },
    /// A route references an identity outside the instance, or the depot.
    UnknownCustomer {
        /// Route index in the solution.
        route_index: usize,
        /// Offending identity.
        customer_id: usize,
    },
}

/// A constraint violation in a solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }

    /// Hard violations break the CVRP invariants; time windows are soft.
    pub fn is_hard(&self) -> bool {
        !matches!(self.kind, ViolationType::TimeWindowViolated { .. })
    }
}

/// A set of routes serving the customers of one instance.
///
/// Solutions are immutable values: construction and local search produce
/// new solutions rather than editing existing ones. Empty routes are
/// dropped on construction. `unassigned` is only non-empty for diagnostic
/// solutions built with constraints ignored.
///
/// # Examples
///
/// ```
/// use gls_routing::models::{Route, Solution};
///
/// let sol = Solution::new(vec![
///     Route::new(0, vec![1, 2]),
///     Route::new(0, vec![]),
///     Route::new(0, vec![3]),
/// ]);
/// assert_eq!(sol.num_routes(), 2);
/// assert_eq!(sol.num_served(), 3);
/// assert!(sol.all_served(3));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Solution {
    routes: Vec<Route>,
    unassigned: Vec<usize>,
}

impl Solution {
    /// Creates a solution from routes, discarding empty ones.
    pub fn new(routes: Vec<Route>) -> Self {
        Self {
            routes: routes.into_iter().filter(|r| !r.is_empty()).collect(),
            unassigned: Vec::new(),
        }
    }

    /// Records customers left without a route.
    pub fn with_unassigned(mut self, unassigned: Vec<usize>) -> Self {
        self.unassigned = unassigned;
        self
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Number of routes (vehicles used).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    pub fn unassigned(&self) -> &[usize] {
        &self.unassigned
    }

    pub fn num_unassigned(&self) -> usize {
        self.unassigned.len()
    }

    /// Total number of customer visits across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(Route::len).sum()
    }

    /// Every consecutive pair of every route, in route order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.routes.iter().flat_map(Route::edges)
    }

    /// Returns `true` if customers `1..=num_customers` are each served
    /// exactly once and nothing else is served.
    pub fn all_served(&self, num_customers: usize) -> bool {
        let mut seen = vec![false; num_customers + 1];
        for &c in self.routes.iter().flat_map(|r| r.customers()) {
            if c == 0 || c > num_customers || seen[c] {
                return false;
            }
            seen[c] = true;
        }
        seen.iter().skip(1).all(|&s| s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solution_empty() {
        let sol = Solution::default();
        assert_eq!(sol.num_routes(), 0);
        assert_eq!(sol.num_unassigned(), 0);
        assert_eq!(sol.num_served(), 0);
        assert!(sol.all_served(0));
        assert!(!sol.all_served(1));
    }

    #[test]
    fn test_solution_drops_empty_routes() {
        let sol = Solution::new(vec![Route::new(0, vec![]), Route::new(0, vec![4])]);
        assert_eq!(sol.num_routes(), 1);
        assert_eq!(sol.routes()[0].customers(), &[4]);
    }

    #[test]
    fn test_solution_edges_in_route_order() {
        let sol = Solution::new(vec![Route::new(0, vec![1, 2]), Route::new(0, vec![3])]);
        let edges: Vec<_> = sol.edges().collect();
        assert_eq!(edges, vec![(0, 1), (1, 2), (2, 0), (0, 3), (3, 0)]);
    }

    #[test]
    fn test_all_served_detects_duplicates_and_gaps() {
        let dup = Solution::new(vec![Route::new(0, vec![1, 2]), Route::new(0, vec![2])]);
        assert!(!dup.all_served(2));

        let gap = Solution::new(vec![Route::new(0, vec![1, 3])]);
        assert!(!gap.all_served(3));

        let unknown = Solution::new(vec![Route::new(0, vec![1, 9])]);
        assert!(!unknown.all_served(2));
    }

    #[test]
    fn test_unassigned_recorded() {
        let sol = Solution::new(vec![Route::new(0, vec![1])]).with_unassigned(vec![2, 3]);
        assert_eq!(sol.unassigned(), &[2, 3]);
        assert!(!sol.all_served(3));
    }

    #[test]
    fn test_violation_hardness() {
        let cap = Violation::new(ViolationType::CapacityExceeded {
            route_index: 0,
            load: 250,
            capacity: 200,
        });
        let tw = Violation::new(ViolationType::TimeWindowViolated {
            customer_id: 3,
            arrival: 400.0,
            due: 336.0,
        });
        assert!(cap.is_hard());
        assert!(!tw.is_hard());
    }
}
