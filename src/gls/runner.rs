//! GLS execution loop.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::constructive::{nearest_feasible, ConstructionError, ConstructionMode};
use crate::evaluation::{Context, Objective, PenaltyContext, RouteEvaluator};
use crate::local_search::local_search;
use crate::models::{CostModel, Solution};

use super::config::GlsConfig;
use super::features::{current_features, most_utilized};
use super::penalty::PenaltyMap;

/// A candidate must beat the best cost by more than this to be adopted.
const ACCEPT_EPS: f64 = 1e-10;

/// Outcome of one outer iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The candidate improved the best solution; keep searching.
    Continue,
    /// The candidate did not improve the best plain cost.
    Converged,
    /// The time budget was spent before the iteration started.
    TimedOut,
}

impl Step {
    /// The termination this step implies, if it ends the search.
    pub fn termination(self) -> Option<Termination> {
        match self {
            Step::Continue => None,
            Step::Converged => Some(Termination::Converged),
            Step::TimedOut => Some(Termination::TimedOut),
        }
    }
}

/// Why the search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Termination {
    /// An iteration failed to improve the plain objective.
    Converged,
    /// `max_iterations` improving iterations were made.
    IterationLimit,
    /// The wall-clock budget ran out.
    TimedOut,
}

impl std::fmt::Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Termination::Converged => "converged",
            Termination::IterationLimit => "iteration limit",
            Termination::TimedOut => "timed out",
        })
    }
}

/// Result of a Guided Local Search run.
#[derive(Debug, Clone, Serialize)]
pub struct GlsResult {
    /// Best solution after the final plain local search.
    pub solution: Solution,

    /// Plain distance of `solution`.
    pub cost: f64,

    /// Plain distance of the constructed starting solution.
    pub initial_cost: f64,

    /// Number of improving outer iterations.
    pub iterations: usize,

    pub termination: Termination,

    /// Wall-clock time from the end of construction to the end of the final polish.
    pub elapsed: Duration,

    /// Number of distinct edges that received a penalty.
    pub penalized_features: usize,
}

/// Guided Local Search over a [`CostModel`].
///
/// Construction happens in [`new`](Self::new); each [`step`](Self::step) is
/// one outer iteration (penalize the most utilized edge of the current
/// solution, then re-optimize under the augmented objective), and
/// [`finish`](Self::finish) runs the final plain local search. [`run`](Self::run)
/// drives all three.
///
/// The penalty map is owned by the run and only grows.
///
/// # Examples
///
/// ```
/// use gls_routing::gls::{GlsConfig, GuidedLocalSearch};
/// use gls_routing::models::{CostModel, Customer};
///
/// let model = CostModel::euclidean(
///     vec![
///         Customer::depot(0.0, 0.0),
///         Customer::new(1, 5.0, 0.0, 4, 0.0),
///         Customer::new(2, 5.0, 5.0, 4, 0.0),
///         Customer::new(3, -5.0, 0.0, 4, 0.0),
///         Customer::new(4, -5.0, -5.0, 4, 0.0),
///     ],
///     2,
///     10,
/// )
/// .unwrap();
///
/// let gls = GuidedLocalSearch::new(&model, GlsConfig::default()).unwrap();
/// let result = gls.run();
/// assert!(result.solution.all_served(4));
/// assert!(result.cost <= result.initial_cost);
/// ```
#[derive(Debug)]
pub struct GuidedLocalSearch<'a> {
    objective: Objective<'a>,
    config: GlsConfig,
    penalties: PenaltyMap,
    best: Solution,
    best_cost: f64,
    initial_cost: f64,
    iterations: usize,
    started: Instant,
}

impl<'a> GuidedLocalSearch<'a> {
    /// Builds the starting solution with [`nearest_feasible`].
    ///
    /// # Errors
    ///
    /// Returns the [`ConstructionError`] when no feasible assignment exists.
    ///
    /// # Panics
    ///
    /// Panics if `config` fails [`GlsConfig::validate`].
    pub fn new(model: &'a CostModel, config: GlsConfig) -> Result<Self, ConstructionError> {
        if let Err(msg) = config.validate() {
            panic!("invalid GlsConfig: {msg}");
        }
        let initial = nearest_feasible(model, ConstructionMode::Strict).inspect_err(|e| {
            warn!(error = %e, "initial construction failed, no solution");
        })?;
        Ok(Self::from_initial(model, config, initial))
    }

    /// Starts the search from a given feasible solution of `model`.
    ///
    /// The time budget is measured from here, so construction time does not
    /// count against [`GlsConfig::time_limit`].
    ///
    /// # Panics
    ///
    /// Panics if `config` fails [`GlsConfig::validate`].
    pub fn from_initial(model: &'a CostModel, config: GlsConfig, initial: Solution) -> Self {
        if let Err(msg) = config.validate() {
            panic!("invalid GlsConfig: {msg}");
        }
        let objective = Objective::new(model);
        let initial_cost = objective.evaluate(&initial, &Context::Plain);
        info!(
            customers = model.num_customers(),
            routes = initial.num_routes(),
            cost = initial_cost,
            "guided local search started"
        );

        Self {
            objective,
            config,
            penalties: PenaltyMap::new(),
            best: initial,
            best_cost: initial_cost,
            initial_cost,
            iterations: 0,
            started: Instant::now(),
        }
    }

    /// Runs outer iterations until convergence, the iteration limit, or the
    /// time budget, then polishes the best solution.
    pub fn run(mut self) -> GlsResult {
        let termination = loop {
            if self.iterations >= self.config.max_iterations {
                break Termination::IterationLimit;
            }
            if let Some(t) = self.step().termination() {
                break t;
            }
        };
        self.finish(termination)
    }

    /// Performs one outer iteration.
    pub fn step(&mut self) -> Step {
        if self.started.elapsed() >= self.config.time_limit {
            return Step::TimedOut;
        }

        let model = self.objective.model();
        let features = current_features(&self.best);
        let Some(edge) = most_utilized(&features, &self.penalties, model) else {
            return Step::Converged;
        };
        let penalty = self.penalties.increment(edge);

        let ctx = Context::Penalized(
            PenaltyContext::new(&features, &self.penalties, self.config.penalty_factor)
                .with_ignore_feasibility(self.config.ignore_feasibility),
        );
        let candidate = local_search(
            self.objective,
            &self.best,
            &ctx,
            &self.config.excluded_operators,
        );
        let candidate_cost = self.objective.evaluate(&candidate, &Context::Plain);

        debug!(
            iteration = self.iterations + 1,
            edge = %edge,
            penalty,
            candidate = candidate_cost,
            best = self.best_cost,
            "gls iteration"
        );

        if candidate_cost + ACCEPT_EPS >= self.best_cost {
            return Step::Converged;
        }
        if self.config.ignore_feasibility && !RouteEvaluator::new(model).is_feasible(&candidate) {
            debug!(
                iteration = self.iterations + 1,
                "candidate violates capacity, not adopted"
            );
            return Step::Converged;
        }

        self.best = candidate;
        self.best_cost = candidate_cost;
        self.iterations += 1;

        if self.config.progress_interval > 0
            && self.iterations.is_multiple_of(self.config.progress_interval)
        {
            info!(
                iteration = self.iterations,
                best = self.best_cost,
                penalized = self.penalties.len(),
                "best so far"
            );
        }
        Step::Continue
    }

    /// Runs the final plain local search from the best solution.
    pub fn finish(self, termination: Termination) -> GlsResult {
        let solution = local_search(
            self.objective,
            &self.best,
            &Context::Plain,
            &self.config.excluded_operators,
        );
        let cost = self.objective.evaluate(&solution, &Context::Plain);
        let elapsed = self.started.elapsed();

        info!(
            %termination,
            iterations = self.iterations,
            initial = self.initial_cost,
            cost,
            routes = solution.num_routes(),
            elapsed_ms = elapsed.as_millis() as u64,
            "guided local search finished"
        );

        GlsResult {
            solution,
            cost,
            initial_cost: self.initial_cost,
            iterations: self.iterations,
            termination,
            elapsed,
            penalized_features: self.penalties.len(),
        }
    }

    pub fn penalties(&self) -> &PenaltyMap {
        &self.penalties
    }

    /// The best (and current) solution.
    pub fn current(&self) -> &Solution {
        &self.best
    }

    /// Plain distance of [`current`](Self::current).
    pub fn best_cost(&self) -> f64 {
        self.best_cost
    }

    pub fn initial_cost(&self) -> f64 {
        self.initial_cost
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }
}

/// Constructs a starting solution and runs Guided Local Search on it.
///
/// # Errors
///
/// Returns the [`ConstructionError`] when the instance has no feasible
/// starting assignment; there is no result in that case.
pub fn solve(model: &CostModel, config: GlsConfig) -> Result<GlsResult, ConstructionError> {
    Ok(GuidedLocalSearch::new(model, config)?.run())
}
