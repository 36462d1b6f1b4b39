//! Roster solving: configuration, model assembly, and statistics.
//!
//! Roster construction is formulated as a binary integer program and
//! solved exactly. [`RosterSolver`] drives the whole pipeline from
//! request to outcome; [`SolverConfig`] carries engine policy (premium
//! weekday, objective weights); [`RosterStatistics`] summarizes the
//! solved roster. The model formulation itself stays internal.

mod config;
mod engine;
mod model;
mod stats;

pub use config::{ObjectiveWeights, SolverConfig};
pub use engine::{RosterSolver, SolveOutcome, SolveRequest};
pub use stats::RosterStatistics;
