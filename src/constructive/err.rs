//! Construction failures.

/// Raised when no feasible initial solution exists for the fleet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    /// A single customer's demand exceeds vehicle capacity.
    DemandExceedsCapacity {
        customer: usize,
        demand: u32,
        capacity: u32,
    },
    /// All vehicles were used and customers remain unserved.
    VehiclesExhausted {
        unassigned: Vec<usize>,
        vehicles: usize,
    },
}

impl ConstructionError {
    /// Customers the constructor could not place.
    pub fn unassigned(&self) -> &[usize] {
        match self {
            Self::DemandExceedsCapacity { customer, .. } => std::slice::from_ref(customer),
            Self::VehiclesExhausted { unassigned, .. } => unassigned,
        }
    }
}

impl std::fmt::Display for ConstructionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DemandExceedsCapacity {
                customer,
                demand,
                capacity,
            } => write!(
                f,
                "customer {customer} demands {demand}, more than the vehicle capacity {capacity}"
            ),
            Self::VehiclesExhausted {
                unassigned,
                vehicles,
            } => write!(
                f,
                "{} customer(s) left unserved after using all {vehicles} vehicle(s)",
                unassigned.len()
            ),
        }
    }
}

impl std::error::Error for ConstructionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let e = ConstructionError::DemandExceedsCapacity {
            customer: 2,
            demand: 30,
            capacity: 20,
        };
        assert_eq!(
            e.to_string(),
            "customer 2 demands 30, more than the vehicle capacity 20"
        );
        assert_eq!(e.unassigned(), &[2]);

        let e = ConstructionError::VehiclesExhausted {
            unassigned: vec![4, 9],
            vehicles: 3,
        };
        assert_eq!(
            e.to_string(),
            "2 customer(s) left unserved after using all 3 vehicle(s)"
        );
        assert_eq!(e.unassigned(), &[4, 9]);
    }
}
