//! Edge features and their accumulated penalties.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A directed pair of consecutive locations in a route; the unit GLS
/// penalizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
}

impl Edge {
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }
}

impl From<(usize, usize)> for Edge {
    fn from((from, to): (usize, usize)) -> Self {
        Self { from, to }
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.from, self.to)
    }
}

/// Penalty counts per edge.
///
/// Absent edges count as zero. Counts only ever grow: there is no removal
/// or decrement, so a map lives exactly as long as one search run.
///
/// # Examples
///
/// ```
/// use gls_routing::gls::{Edge, PenaltyMap};
///
/// let mut penalties = PenaltyMap::new();
/// let e = Edge::new(0, 3);
/// assert_eq!(penalties.get(e), 0);
/// penalties.increment(e);
/// penalties.increment(e);
/// assert_eq!(penalties.get(e), 2);
/// assert_eq!(penalties.get(Edge::new(3, 0)), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PenaltyMap {
    counts: HashMap<Edge, u32>,
}

impl PenaltyMap {
    /// Creates a map with every edge at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current penalty of `edge`.
    #[inline]
    pub fn get(&self, edge: Edge) -> u32 {
        self.counts.get(&edge).copied().unwrap_or(0)
    }

    /// Raises the penalty of `edge` by one and returns the new count.
    #[inline]
    pub fn increment(&mut self, edge: Edge) -> u32 {
        let count = self.counts.entry(edge).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    /// Number of edges penalized at least once.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all penalty counts.
    pub fn total(&self) -> u64 {
        self.counts.values().map(|&c| u64::from(c)).sum()
    }

    /// Penalized edges with their counts, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (Edge, u32)> + '_ {
        self.counts.iter().map(|(&e, &c)| (e, c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_zero() {
        let p = PenaltyMap::new();
        assert!(p.is_empty());
        assert_eq!(p.get(Edge::new(4, 2)), 0);
        assert_eq!(p.total(), 0);
    }

    #[test]
    fn test_increment_unseen_edge() {
        let mut p = PenaltyMap::new();
        assert_eq!(p.increment(Edge::new(1, 2)), 1);
        assert_eq!(p.increment(Edge::new(1, 2)), 2);
        assert_eq!(p.increment(Edge::new(9, 0)), 1);
        assert_eq!(p.len(), 2);
        assert_eq!(p.total(), 3);
    }

    #[test]
    fn test_edges_are_directed() {
        let mut p = PenaltyMap::new();
        p.increment(Edge::new(1, 2));
        assert_eq!(p.get(Edge::new(1, 2)), 1);
        assert_eq!(p.get(Edge::new(2, 1)), 0);
    }

    #[test]
    fn test_edge_from_tuple_and_display() {
        let e: Edge = (3, 7).into();
        assert_eq!(e, Edge::new(3, 7));
        assert_eq!(e.to_string(), "(3, 7)");
    }
}
