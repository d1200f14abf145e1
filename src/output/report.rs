use std::io::Write;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::evaluation::{Context, Objective};
use crate::gls::{GlsResult, Termination};
use crate::models::{CostModel, Solution};

/// Result file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{other}' (expected text or json)")),
        }
    }
}

/// Search statistics attached to a report produced from a [`GlsResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSummary {
    pub initial_distance: f64,
    pub iterations: usize,
    pub termination: Termination,
    pub elapsed_ms: u64,
    pub penalized_features: usize,
}

/// Machine-readable summary of a solution.
///
/// Routes are written as full paths, depot at both ends.
///
/// # Examples
///
/// ```
/// use gls_routing::models::{CostModel, Customer, Route, Solution};
/// use gls_routing::output::SolutionReport;
///
/// let model = CostModel::euclidean(
///     vec![Customer::depot(0.0, 0.0), Customer::new(1, 3.0, 4.0, 2, 0.0)],
///     1,
///     10,
/// )
/// .unwrap();
/// let sol = Solution::new(vec![Route::new(0, vec![1])]);
/// let report = SolutionReport::new("tiny", &model, &sol);
/// assert_eq!(report.routes, vec![vec![0, 1, 0]]);
/// assert!((report.distance - 10.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionReport {
    pub name: String,
    pub distance: f64,
    pub vehicles: usize,
    pub routes: Vec<Vec<usize>>,
    pub served: usize,
    pub unassigned: Vec<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchSummary>,
}

impl SolutionReport {
    pub fn new(name: impl Into<String>, model: &CostModel, solution: &Solution) -> Self {
        Self {
            name: name.into(),
            distance: Objective::new(model).evaluate(solution, &Context::Plain),
            vehicles: solution.num_routes(),
            routes: solution.routes().iter().map(|r| r.path()).collect(),
            served: solution.num_served(),
            unassigned: solution.unassigned().to_vec(),
            search: None,
        }
    }

    /// Report for the solution of a GLS run, with its statistics.
    pub fn from_result(name: impl Into<String>, model: &CostModel, result: &GlsResult) -> Self {
        let mut report = Self::new(name, model, &result.solution);
        report.search = Some(SearchSummary {
            initial_distance: result.initial_cost,
            iterations: result.iterations,
            termination: result.termination,
            elapsed_ms: u64::try_from(result.elapsed.as_millis()).unwrap_or(u64::MAX),
            penalized_features: result.penalized_features,
        });
        report
    }

    /// Writes the report as pretty-printed JSON.
    pub fn write_json<W: Write>(&self, writer: W) -> serde_json::Result<()> {
        serde_json::to_writer_pretty(writer, self)
    }
}
