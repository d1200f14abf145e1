//! Plain and penalty-augmented objective.

use std::collections::HashSet;

use crate::gls::{Edge, FeatureSet, PenaltyMap};
use crate::models::{CostModel, Route, Solution};

/// Penalty state handed to the objective during one GLS iteration.
#[derive(Debug, Clone, Copy)]
pub struct PenaltyContext<'a> {
    /// Features currently eligible for penalization.
    pub features: &'a FeatureSet,
    /// Accumulated penalty counts.
    pub penalties: &'a PenaltyMap,
    /// Penalty weight (lambda).
    pub lambda: f64,
    /// Lets local search accept capacity-violating moves.
    pub ignore_feasibility: bool,
}

impl<'a> PenaltyContext<'a> {
    pub fn new(features: &'a FeatureSet, penalties: &'a PenaltyMap, lambda: f64) -> Self {
        Self {
            features,
            penalties,
            lambda,
            ignore_feasibility: false,
        }
    }

    pub fn with_ignore_feasibility(mut self, ignore: bool) -> Self {
        self.ignore_feasibility = ignore;
        self
    }
}

/// What the objective measures.
#[derive(Debug, Clone, Copy)]
pub enum Context<'a> {
    /// Total travel distance.
    Plain,
    /// Travel distance of the route at this index only.
    Route(usize),
    /// Distance plus GLS penalties.
    Penalized(PenaltyContext<'a>),
}

impl Context<'_> {
    /// Whether moves evaluated under this context must respect capacity.
    pub fn enforces_feasibility(&self) -> bool {
        !matches!(
            self,
            Context::Penalized(PenaltyContext {
                ignore_feasibility: true,
                ..
            })
        )
    }
}

/// Objective function over solutions of one [`CostModel`].
///
/// Evaluation is deterministic: routes are summed in solution order, edges
/// in route order, and penalty terms in feature order.
///
/// # Examples
///
/// ```
/// use gls_routing::evaluation::{Context, Objective};
/// use gls_routing::models::{CostModel, Customer, Route, Solution};
///
/// let model = CostModel::euclidean(
///     vec![
///         Customer::depot(0.0, 0.0),
///         Customer::new(1, 3.0, 4.0, 1, 0.0),
///         Customer::new(2, 0.0, 8.0, 1, 0.0),
///     ],
///     2,
///     10,
/// )
/// .unwrap();
/// let objective = Objective::new(&model);
/// let sol = Solution::new(vec![Route::new(0, vec![1]), Route::new(0, vec![2])]);
///
/// assert!((objective.evaluate(&sol, &Context::Plain) - 26.0).abs() < 1e-10);
/// assert!((objective.evaluate(&sol, &Context::Route(1)) - 16.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Objective<'a> {
    model: &'a CostModel,
}

impl<'a> Objective<'a> {
    pub fn new(model: &'a CostModel) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &'a CostModel {
        self.model
    }

    /// Value of `solution` under `ctx`.
    ///
    /// - `Plain`: sum of every route's distance.
    /// - `Route(i)`: distance of route `i` (panics if out of range).
    /// - `Penalized`: distance plus `lambda * p(e) * cost(e)` for every
    ///   context feature `e` that the solution uses.
    pub fn evaluate(&self, solution: &Solution, ctx: &Context<'_>) -> f64 {
        match ctx {
            Context::Plain => self.distance(solution),
            Context::Route(index) => self.route_distance(&solution.routes()[*index]),
            Context::Penalized(p) => {
                let used: HashSet<Edge> = solution.edges().map(Edge::from).collect();
                let penalty: f64 = p
                    .features
                    .iter()
                    .filter(|e| used.contains(e))
                    .fold(0.0, |acc, e| {
                        acc + f64::from(p.penalties.get(e)) * self.model.cost(e.from, e.to)
                    });
                self.distance(solution) + p.lambda * penalty
            }
        }
    }

    /// Total travel distance of `solution`.
    ///
    /// Folds from `+0.0`: an empty solution measures `0.0`, never `-0.0`.
    pub fn distance(&self, solution: &Solution) -> f64 {
        solution
            .routes()
            .iter()
            .fold(0.0, |acc, r| acc + self.route_distance(r))
    }

    /// Travel distance of one route, depot legs included.
    pub fn route_distance(&self, route: &Route) -> f64 {
        route
            .edges()
            .fold(0.0, |acc, (a, b)| acc + self.model.cost(a, b))
    }

    /// Weight of traversing `from -> to` under `ctx`.
    ///
    /// Summing arc weights over a solution's edges reproduces
    /// [`evaluate`](Self::evaluate) for plain and penalized contexts, which
    /// lets moves be scored by the arcs they add and remove.
    #[inline]
    pub fn arc(&self, from: usize, to: usize, ctx: &Context<'_>) -> f64 {
        let cost = self.model.cost(from, to);
        match ctx {
            Context::Penalized(p) => {
                let edge = Edge::new(from, to);
                if p.features.contains(edge) {
                    cost + p.lambda * f64::from(p.penalties.get(edge)) * cost
                } else {
                    cost
                }
            }
            _ => cost,
        }
    }

    /// Sum of arc weights along `depot -> customers... -> depot`.
    pub fn sequence_weight(&self, customers: &[usize], ctx: &Context<'_>) -> f64 {
        let depot = self.model.depot();
        match (customers.first(), customers.last()) {
            (Some(&first), Some(&last)) => {
                self.arc(depot, first, ctx)
                    + customers
                        .windows(2)
                        .map(|w| self.arc(w[0], w[1], ctx))
                        .sum::<f64>()
                    + self.arc(last, depot, ctx)
            }
            _ => 0.0,
        }
    }
}
