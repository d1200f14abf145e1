//! Route and visit types.

use serde::{Deserialize, Serialize};

/// Timing and load at one stop of a route, as computed by
/// [`RouteEvaluator`](crate::evaluation::RouteEvaluator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visit {
    /// Customer visited.
    pub customer_id: usize,
    /// Arrival time at this customer.
    pub arrival_time: f64,
    /// Departure time (arrival + waiting + service duration).
    pub departure_time: f64,
    /// Cumulative load after this visit.
    pub load_after: u64,
}

/// An ordered sequence of customers served by one vehicle.
///
/// The route starts and ends at `depot`; the depot is implicit and not
/// stored among the customers. Routes are values: improving a route means
/// building a new one.
///
/// # Examples
///
/// ```
/// use gls_routing::models::Route;
///
/// let route = Route::new(0, vec![3, 1, 2]);
/// assert_eq!(route.path(), vec![0, 3, 1, 2, 0]);
/// assert_eq!(route.edges().count(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Route {
    depot: usize,
    customers: Vec<usize>,
}

impl Route {
    /// Creates a route visiting `customers` in order from and back to `depot`.
    pub fn new(depot: usize, customers: Vec<usize>) -> Self {
        Self { depot, customers }
    }

    pub fn depot(&self) -> usize {
        self.depot
    }

    /// Customers in visit order (depot excluded).
    pub fn customers(&self) -> &[usize] {
        &self.customers
    }

    /// Number of customers served (depot excluded).
    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Full node sequence, depot included at both ends.
    pub fn path(&self) -> Vec<usize> {
        let mut path = Vec::with_capacity(self.customers.len() + 2);
        path.push(self.depot);
        path.extend_from_slice(&self.customers);
        path.push(self.depot);
        path
    }

    /// Consecutive `(from, to)` pairs, depot legs included.
    ///
    /// An empty route yields no edges.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let inner = self.customers.windows(2).map(|w| (w[0], w[1]));
        let first = self.customers.first().map(|&c| (self.depot, c));
        let last = self.customers.last().map(|&c| (c, self.depot));
        first.into_iter().chain(inner).chain(last)
    }
}
