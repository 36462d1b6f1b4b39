//! Roster assignment engine: one person on duty per day.
//!
//! Builds daily duty rosters over an inclusive date window for a pool of
//! participants, honoring hard availability constraints and equity rules
//! while maximizing satisfied preferences. Roster construction is
//! formulated as a binary integer program and solved exactly.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `SchedulingWindow`, `DutyDay`,
//!   `Participant`, `ConstraintEntry`, `Availability`, `AvailabilityGrid`,
//!   `Roster`, `DutyAssignment`
//! - **`solver`**: The integer-programming pipeline — `RosterSolver`,
//!   `SolveRequest`, `SolveOutcome`, `SolverConfig`, `RosterStatistics`
//! - **`validation`**: Request integrity checks (window order, empty
//!   pools, duplicate ids)
//! - **`error`**: The crate-wide error type
//!
//! # Approach
//!
//! Each (participant, day) pair becomes one binary decision variable.
//! Hard rules enter as constraint rows: full coverage, declared
//! unavailability, the even-split equity band, no back-to-back days, and
//! a premium floor when enough premium days exist. Preferences and
//! premium service enter as objective weights. The model is solved to
//! proven optimality or proven infeasibility, never approximated.
//!
//! # References
//!
//! - Ernst et al. (2004), "Staff scheduling and rostering: A review of
//!   applications, methods and models"
//! - Burke et al. (2004), "The state of the art of nurse rostering"
//! - Wolsey (1998), "Integer Programming"

pub mod error;
pub mod models;
pub mod solver;
pub mod validation;
