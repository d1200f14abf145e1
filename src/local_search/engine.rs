//! Local search driver combining the move operators.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::evaluation::{Context, Objective};
use crate::models::{Route, Solution};

use super::exchange::exchange_pass;
use super::relocate::relocate_pass;
use super::two_opt::two_opt_pass;

/// A move operator the local search can apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operator {
    /// Intra-route segment reversal.
    TwoOpt,
    /// Inter-route tail exchange (2-opt*).
    Exchange,
    /// Inter-route single-customer relocation.
    Relocate,
}

impl Operator {
    /// Every operator, in the order the search applies them.
    pub const ALL: [Operator; 3] = [Operator::TwoOpt, Operator::Exchange, Operator::Relocate];

    pub fn name(&self) -> &'static str {
        match self {
            Operator::TwoOpt => "two-opt",
            Operator::Exchange => "exchange",
            Operator::Relocate => "relocate",
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when an operator name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOperatorError {
    name: String,
}

impl std::fmt::Display for UnknownOperatorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown local search operator '{}' (expected one of: two-opt, exchange, relocate)",
            self.name
        )
    }
}

impl std::error::Error for UnknownOperatorError {}

impl FromStr for Operator {
    type Err = UnknownOperatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "two-opt" | "2-opt" | "2opt" | "two_opt" => Ok(Operator::TwoOpt),
            "exchange" | "2-opt*" | "cross" => Ok(Operator::Exchange),
            "relocate" | "relocation" => Ok(Operator::Relocate),
            _ => Err(UnknownOperatorError { name: s.to_string() }),
        }
    }
}

/// Descent over the enabled operators until none improves.
///
/// Each pass runs every enabled operator in [`Operator::ALL`] order; a move
/// is applied only if it lowers the objective under the given context. The
/// search works on a private copy and returns a new solution. It is
/// deterministic: equal inputs give equal outputs.
///
/// # Examples
///
/// ```
/// use gls_routing::evaluation::{Context, Objective};
/// use gls_routing::local_search::{LocalSearch, Operator};
/// use gls_routing::models::{CostModel, Customer, Route, Solution};
///
/// let model = CostModel::euclidean(
///     vec![
///         Customer::depot(0.0, 0.0),
///         Customer::new(1, 0.0, 1.0, 1, 0.0),
///         Customer::new(2, 1.0, 1.0, 1, 0.0),
///         Customer::new(3, 1.0, 0.0, 1, 0.0),
///     ],
///     1,
///     10,
/// )
/// .unwrap();
/// let objective = Objective::new(&model);
/// let crossed = Solution::new(vec![Route::new(0, vec![1, 3, 2])]);
///
/// let search = LocalSearch::new(objective).excluding(&[Operator::Relocate]);
/// let improved = search.improve(&crossed, &Context::Plain);
/// assert!((objective.evaluate(&improved, &Context::Plain) - 4.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct LocalSearch<'a> {
    objective: Objective<'a>,
    operators: Vec<Operator>,
}

impl<'a> LocalSearch<'a> {
    /// A search using every operator.
    pub fn new(objective: Objective<'a>) -> Self {
        Self {
            objective,
            operators: Operator::ALL.to_vec(),
        }
    }

    /// Disables the given operators.
    pub fn excluding(mut self, excluded: &[Operator]) -> Self {
        self.operators.retain(|op| !excluded.contains(op));
        self
    }

    /// Operators still enabled, in application order.
    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }

    /// Runs the descent from `solution` to a local optimum under `ctx`.
    pub fn improve(&self, solution: &Solution, ctx: &Context<'_>) -> Solution {
        let depot = self.objective.model().depot();
        let mut routes: Vec<Vec<usize>> = solution
            .routes()
            .iter()
            .map(|r| r.customers().to_vec())
            .collect();

        let mut passes = 0usize;
        loop {
            passes += 1;
            let mut improved = false;
            for op in &self.operators {
                let changed = match op {
                    Operator::TwoOpt => two_opt_pass(&mut routes, &self.objective, ctx),
                    Operator::Exchange => exchange_pass(&mut routes, &self.objective, ctx),
                    Operator::Relocate => relocate_pass(&mut routes, &self.objective, ctx),
                };
                if changed {
                    trace!(operator = %op, pass = passes, "operator improved solution");
                }
                improved |= changed;
            }
            if !improved {
                break;
            }
        }

        Solution::new(routes.into_iter().map(|c| Route::new(depot, c)).collect())
            .with_unassigned(solution.unassigned().to_vec())
    }
}

/// Improves `solution` with every operator except `excluded`.
pub fn local_search(
    objective: Objective<'_>,
    solution: &Solution,
    ctx: &Context<'_>,
    excluded: &[Operator],
) -> Solution {
    LocalSearch::new(objective)
        .excluding(excluded)
        .improve(solution, ctx)
}
