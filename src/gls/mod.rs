//! Guided Local Search (GLS).
//!
//! Escapes local optima by penalizing edges of the current solution and
//! re-optimizing under the augmented objective
//! `distance + λ · Σ penalty(e) · cost(e)`. The edge penalized each
//! iteration is the one maximizing `cost(e) / (penalty(e) + 1)`. The search
//! stops when an iteration fails to improve the plain distance, at the
//! iteration limit, or when the time budget runs out; a final plain local
//! search removes the bias the penalties introduced.
//!
//! # References
//!
//! - Voudouris & Tsang (1999), "Guided local search and its application to
//!   the traveling salesman problem"
//! - Kilby, Prosser & Shaw (1999), "Guided Local Search for the Vehicle
//!   Routing Problem with Time Windows"

mod config;
mod features;
mod penalty;
mod runner;

pub use config::GlsConfig;
pub use features::{current_features, most_utilized, utility, FeatureSet};
pub use penalty::{Edge, PenaltyMap};
pub use runner::{solve, GlsResult, GuidedLocalSearch, Step, Termination};
