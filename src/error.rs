//! Error types for roster generation.
//!
//! Malformed input is rejected with a typed [`RosterError`] before any
//! model is built. An instance with no feasible roster is *not* an error:
//! it surfaces as [`SolveOutcome::Infeasible`](crate::solver::SolveOutcome),
//! since it is an expected outcome of a well-formed solve.

use chrono::NaiveDate;
use thiserror::Error;

/// Convenience alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, RosterError>;

/// Errors raised while validating input or running a solve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    /// The window's start date lies after its end date.
    #[error("invalid scheduling window: start {start} is after end {end}")]
    InvalidWindow { start: NaiveDate, end: NaiveDate },

    /// No participants were supplied. A single-day roster already needs one.
    #[error("participant set is empty; at least one participant is required")]
    EmptyParticipantSet,

    /// Two participants share the same identifier.
    #[error("duplicate participant id '{id}'")]
    DuplicateParticipant { id: String },

    /// A constraint entry references a participant absent from the roster.
    /// Such entries are never silently dropped or silently included.
    #[error("constraint for {date} references unknown participant '{participant_id}'")]
    DanglingConstraint {
        participant_id: String,
        date: NaiveDate,
    },

    /// Objective weights fail their sanity checks (negative, non-finite,
    /// or a preference reward that does not dominate the premium-day bonus).
    #[error("invalid objective weights: {detail}")]
    InvalidWeights { detail: String },

    /// The optimization backend failed for a reason other than proven
    /// infeasibility. Not expected for well-formed bounded models.
    #[error("solver backend failure: {message}")]
    Solver { message: String },
}
