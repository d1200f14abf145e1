//! Feature extraction and selection of the edge to penalize.

use std::collections::HashSet;

use crate::models::{CostModel, Solution};

use super::penalty::{Edge, PenaltyMap};

/// The edges used by a solution, in first-seen order.
///
/// Order follows the routes of the solution and the edges within each route;
/// it decides ties in [`most_utilized`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureSet {
    edges: Vec<Edge>,
    index: HashSet<Edge>,
}

impl FeatureSet {
    /// Builds a feature set from edges, keeping the first occurrence of each.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = Edge>,
    {
        let mut set = Self::default();
        for edge in edges {
            if set.index.insert(edge) {
                set.edges.push(edge);
            }
        }
        set
    }

    #[inline]
    pub fn contains(&self, edge: Edge) -> bool {
        self.index.contains(&edge)
    }

    pub fn iter(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edges.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Every consecutive pair of every route of `solution`, depot legs included.
///
/// # Examples
///
/// ```
/// use gls_routing::gls::{current_features, Edge};
/// use gls_routing::models::{Route, Solution};
///
/// let sol = Solution::new(vec![Route::new(0, vec![2, 1])]);
/// let features: Vec<Edge> = current_features(&sol).iter().collect();
/// assert_eq!(features, vec![Edge::new(0, 2), Edge::new(2, 1), Edge::new(1, 0)]);
/// ```
pub fn current_features(solution: &Solution) -> FeatureSet {
    FeatureSet::from_edges(solution.edges().map(Edge::from))
}

/// Utility of penalizing `edge`: its cost discounted by the penalty it
/// already carries.
#[inline]
pub fn utility(edge: Edge, penalties: &PenaltyMap, model: &CostModel) -> f64 {
    model.cost(edge.from, edge.to) / (f64::from(penalties.get(edge)) + 1.0)
}

/// The feature with the highest [`utility`].
///
/// Exact ties go to the feature that comes first in `features`. Returns
/// `None` only for an empty feature set.
pub fn most_utilized(
    features: &FeatureSet,
    penalties: &PenaltyMap,
    model: &CostModel,
) -> Option<Edge> {
    let mut best: Option<(Edge, f64)> = None;
    for edge in features.iter() {
        let u = utility(edge, penalties, model);
        if best.is_none_or(|(_, b)| u > b) {
            best = Some((edge, u));
        }
    }
    best.map(|(edge, _)| edge)
}
