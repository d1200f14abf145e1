//! Dense travel cost matrix.

use crate::models::Customer;

/// A dense n×n travel cost matrix stored in row-major order.
///
/// Costs may be asymmetric. Built either from customer coordinates
/// (Euclidean) or from an explicit grid.
///
/// # Examples
///
/// ```
/// use gls_routing::models::Customer;
/// use gls_routing::distance::DistanceMatrix;
///
/// let customers = vec![
///     Customer::depot(0.0, 0.0),
///     Customer::new(1, 3.0, 4.0, 10, 0.0),
/// ];
/// let dm = DistanceMatrix::from_customers(&customers);
/// assert!((dm.get(1, 0) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a matrix of the given size with every entry zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Euclidean distances between customer coordinates.
    pub fn from_customers(customers: &[Customer]) -> Self {
        let n = customers.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = customers[i].distance_to(&customers[j]);
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Wraps an explicit row-major grid.
    ///
    /// Returns `None` if `data.len() != size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Cost from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        assert!(
            from < self.size && to < self.size,
            "location ({from}, {to}) out of bounds for a {n}x{n} matrix",
            n = self.size
        );
        self.data[from * self.size + to]
    }

    /// Overwrites the cost from `from` to `to`.
    pub fn set(&mut self, from: usize, to: usize, cost: f64) {
        assert!(
            from < self.size && to < self.size,
            "location ({from}, {to}) out of bounds for a {n}x{n} matrix",
            n = self.size
        );
        self.data[from * self.size + to] = cost;
    }

    /// Number of locations.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if `get(i, j)` and `get(j, i)` agree within `tol`.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        (0..self.size)
            .flat_map(|i| ((i + 1)..self.size).map(move |j| (i, j)))
            .all(|(i, j)| (self.get(i, j) - self.get(j, i)).abs() <= tol)
    }
}
