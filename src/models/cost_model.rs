//! Immutable cost view over one problem instance.

use crate::distance::DistanceMatrix;

use super::Customer;

/// Error returned when a [`CostModel`] cannot be assembled.
#[derive(Debug, Clone, PartialEq)]
pub enum CostModelError {
    /// The model needs at least the depot.
    NoDepot,
    /// Location 0 is not flagged as the depot.
    DepotNotFirst,
    /// A customer's id does not match its position.
    IdMismatch { position: usize, id: usize },
    /// Matrix dimension differs from the number of locations.
    MatrixSize { expected: usize, actual: usize },
    /// `cost(a, a)` must be zero.
    NonZeroDiagonal { index: usize, value: f64 },
    /// A travel cost is negative or not finite.
    InvalidCost { from: usize, to: usize, value: f64 },
    /// At least one vehicle is required.
    NoVehicles,
}

impl std::fmt::Display for CostModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoDepot => write!(f, "cost model has no locations; expected a depot at index 0"),
            Self::DepotNotFirst => write!(f, "location 0 must be the depot"),
            Self::IdMismatch { position, id } => {
                write!(f, "customer at position {position} has id {id}")
            }
            Self::MatrixSize { expected, actual } => write!(
                f,
                "cost matrix is {actual}x{actual} but there are {expected} locations"
            ),
            Self::NonZeroDiagonal { index, value } => {
                write!(f, "cost({index}, {index}) = {value}, expected 0")
            }
            Self::InvalidCost { from, to, value } => {
                write!(f, "cost({from}, {to}) = {value} is not a finite non-negative value")
            }
            Self::NoVehicles => write!(f, "vehicle count must be at least 1"),
        }
    }
}

impl std::error::Error for CostModelError {}

/// Customers, travel costs and fleet parameters of one instance.
///
/// Built once per instance and never mutated. Location 0 is the depot;
/// locations `1..=num_customers()` are the customers to serve. Looking up an
/// identity outside the instance is a programming error and panics.
///
/// # Examples
///
/// ```
/// use gls_routing::models::{CostModel, Customer};
///
/// let model = CostModel::euclidean(
///     vec![
///         Customer::depot(0.0, 0.0),
///         Customer::new(1, 3.0, 4.0, 10, 0.0),
///         Customer::new(2, 6.0, 8.0, 20, 0.0),
///     ],
///     2,
///     30,
/// )
/// .unwrap();
/// assert_eq!(model.num_customers(), 2);
/// assert!((model.cost(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(model.total_demand(), 30);
/// ```
#[derive(Debug, Clone)]
pub struct CostModel {
    customers: Vec<Customer>,
    distances: DistanceMatrix,
    vehicle_count: usize,
    capacity: u32,
}

impl CostModel {
    /// Assembles a model from explicit travel costs.
    pub fn new(
        customers: Vec<Customer>,
        distances: DistanceMatrix,
        vehicle_count: usize,
        capacity: u32,
    ) -> Result<Self, CostModelError> {
        let depot = customers.first().ok_or(CostModelError::NoDepot)?;
        if !depot.is_depot() {
            return Err(CostModelError::DepotNotFirst);
        }
        if let Some((position, c)) = customers.iter().enumerate().find(|(i, c)| c.id() != *i) {
            return Err(CostModelError::IdMismatch {
                position,
                id: c.id(),
            });
        }
        if distances.size() != customers.len() {
            return Err(CostModelError::MatrixSize {
                expected: customers.len(),
                actual: distances.size(),
            });
        }
        for from in 0..distances.size() {
            for to in 0..distances.size() {
                let value = distances.get(from, to);
                if from == to && value != 0.0 {
                    return Err(CostModelError::NonZeroDiagonal { index: from, value });
                }
                if !value.is_finite() || value < 0.0 {
                    return Err(CostModelError::InvalidCost { from, to, value });
                }
            }
        }
        if vehicle_count == 0 {
            return Err(CostModelError::NoVehicles);
        }
        Ok(Self {
            customers,
            distances,
            vehicle_count,
            capacity,
        })
    }

    /// Assembles a model whose costs are Euclidean distances between locations.
    pub fn euclidean(
        customers: Vec<Customer>,
        vehicle_count: usize,
        capacity: u32,
    ) -> Result<Self, CostModelError> {
        let distances = DistanceMatrix::from_customers(&customers);
        Self::new(customers, distances, vehicle_count, capacity)
    }

    /// Travel cost from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either identity is outside the instance.
    pub fn cost(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to)
    }

    /// Demand of a location (0 for the depot).
    pub fn demand(&self, id: usize) -> u32 {
        self.customers[id].demand()
    }

    pub fn customer(&self, id: usize) -> &Customer {
        &self.customers[id]
    }

    /// All locations, depot first.
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Number of customers to serve (depot excluded).
    pub fn num_customers(&self) -> usize {
        self.customers.len() - 1
    }

    pub fn depot(&self) -> usize {
        0
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn vehicle_count(&self) -> usize {
        self.vehicle_count
    }

    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Sum of all customer demands.
    pub fn total_demand(&self) -> u64 {
        self.customers.iter().map(|c| u64::from(c.demand())).sum()
    }

    /// Total demand of the given customers, widened so sums of `u32`
    /// demands cannot overflow.
    pub fn load(&self, customers: &[usize]) -> u64 {
        customers.iter().map(|&c| u64::from(self.demand(c))).sum()
    }

    /// Whether `load` fits in one vehicle.
    pub fn fits(&self, load: u64) -> bool {
        load <= u64::from(self.capacity)
    }
}
