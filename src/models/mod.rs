//! Roster domain models.
//!
//! Provides the data types flowing through one solve: the scheduling
//! window and its expanded day sequence, the participant pool, the
//! availability constraints, and the resulting roster.
//!
//! All types are constructed fresh per invocation from caller-supplied
//! data; the engine holds no state between calls.

mod constraint;
mod participant;
mod roster;
mod window;

pub use constraint::{Availability, AvailabilityGrid, ConstraintEntry};
pub use participant::Participant;
pub use roster::{DutyAssignment, Roster};
pub use window::{DutyDay, SchedulingWindow};
