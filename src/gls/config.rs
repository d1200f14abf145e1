//! GLS configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::local_search::Operator;

/// Configuration for the Guided Local Search driver.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use gls_routing::gls::GlsConfig;
/// use gls_routing::local_search::Operator;
///
/// let config = GlsConfig::default()
///     .with_penalty_factor(0.3)
///     .with_max_iterations(500)
///     .with_time_limit(Duration::from_secs(60))
///     .with_excluded_operators(vec![Operator::Relocate]);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlsConfig {
    /// Penalty weight λ of the augmented objective.
    pub penalty_factor: f64,

    /// Maximum number of improving outer iterations.
    pub max_iterations: usize,

    /// Wall-clock budget, checked at the start of every outer iteration.
    /// Measured from the end of the initial construction.
    pub time_limit: Duration,

    /// Local search operators to disable.
    pub excluded_operators: Vec<Operator>,

    /// Log the best cost every this many iterations. 0 = never.
    pub progress_interval: usize,

    /// Let the penalized local search accept capacity-violating moves.
    ///
    /// The final polish always enforces capacity.
    pub ignore_feasibility: bool,
}

impl Default for GlsConfig {
    fn default() -> Self {
        Self {
            penalty_factor: 0.2,
            max_iterations: 1000,
            time_limit: Duration::from_secs(3600),
            excluded_operators: Vec::new(),
            progress_interval: 100,
            ignore_feasibility: false,
        }
    }
}

impl GlsConfig {
    pub fn with_penalty_factor(mut self, lambda: f64) -> Self {
        self.penalty_factor = lambda;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = limit;
        self
    }

    pub fn with_excluded_operators(mut self, ops: Vec<Operator>) -> Self {
        self.excluded_operators = ops;
        self
    }

    pub fn with_progress_interval(mut self, n: usize) -> Self {
        self.progress_interval = n;
        self
    }

    pub fn with_ignore_feasibility(mut self, ignore: bool) -> Self {
        self.ignore_feasibility = ignore;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !self.penalty_factor.is_finite() || self.penalty_factor < 0.0 {
            return Err(format!(
                "penalty_factor must be finite and non-negative, got {}",
                self.penalty_factor
            ));
        }
        Ok(())
    }
}
