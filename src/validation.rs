//! Input validation for roster solves.
//!
//! Checks the structural preconditions of a solve request before any
//! model is built:
//! - window bounds ordered (start ≤ end)
//! - at least one participant
//! - no duplicate participant ids
//!
//! Referential integrity of constraint entries (no references to unknown
//! participants) is enforced where the entries are consumed, in
//! [`AvailabilityGrid::build`](crate::models::AvailabilityGrid::build).

use std::collections::HashSet;

use crate::error::RosterError;
use crate::models::{Participant, SchedulingWindow};

/// Validates the window and participant pool for a solve.
///
/// Fails fast with the first violation found, in the order listed in the
/// module docs.
pub fn validate_request(
    window: &SchedulingWindow,
    participants: &[Participant],
) -> Result<(), RosterError> {
    if window.start > window.end {
        return Err(RosterError::InvalidWindow {
            start: window.start,
            end: window.end,
        });
    }

    if participants.is_empty() {
        return Err(RosterError::EmptyParticipantSet);
    }

    let mut seen = HashSet::with_capacity(participants.len());
    for participant in participants {
        if !seen.insert(participant.id.as_str()) {
            return Err(RosterError::DuplicateParticipant {
                id: participant.id.clone(),
            });
        }
    }

    Ok(())
}
