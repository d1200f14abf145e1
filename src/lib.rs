//! # gls-routing
//!
//! Capacitated vehicle routing (CVRP) solved with Guided Local Search.
//!
//! A greedy nearest-feasible-neighbor construction gives the starting
//! solution. Each GLS iteration penalizes the most utilized edge of the
//! current solution and re-optimizes with 2-opt, 2-opt* and relocate moves
//! under the penalty-augmented objective, until the plain distance stops
//! improving or the iteration or time budget runs out.
//!
//! ## Modules
//!
//! - [`models`]: Domain model types (Customer, Route, Solution, CostModel)
//! - [`distance`]: Distance matrix
//! - [`instance`]: Solomon-format instance loader
//! - [`evaluation`]: Objective (plain and augmented) and feasibility diagnostics
//! - [`constructive`]: Nearest-feasible-neighbor initial solution
//! - [`local_search`]: Local search operators (2-opt, 2-opt*, Relocate)
//! - [`gls`]: Guided Local Search driver, penalties, and feature selection
//! - [`output`]: Text and JSON solution writers
//!
//! ## Example
//!
//! ```
//! use gls_routing::gls::{solve, GlsConfig};
//! use gls_routing::instance::parse_instance;
//!
//! let text = "demo\nVEHICLE\n2 10\nCUSTOMER\n\
//!             0 0 0 0 0 100 0\n1 4 0 5 0 100 0\n2 4 3 5 0 100 0\n3 -4 0 5 0 100 0\n";
//! let model = parse_instance(text).unwrap().into_cost_model().unwrap();
//!
//! let result = solve(&model, GlsConfig::default()).unwrap();
//! assert!(result.solution.all_served(3));
//! assert!(result.solution.num_routes() <= 2);
//! ```

pub mod constructive;
pub mod distance;
pub mod evaluation;
pub mod gls;
pub mod instance;
pub mod local_search;
pub mod models;
pub mod output;
