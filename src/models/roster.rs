//! Roster (solution) model.
//!
//! A roster is the engine's sole output: one assignment per day of the
//! window, each naming the participant on duty. The assignment sequence
//! is sorted by date ascending; downstream consumers render and export
//! it positionally, so the ordering is part of the contract.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::DutyDay;

/// A single day-to-participant assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutyAssignment {
    /// Date of the duty.
    pub date: NaiveDate,
    /// Participant on duty that day.
    pub participant_id: String,
}

impl DutyAssignment {
    /// Creates a new assignment.
    pub fn new(date: NaiveDate, participant_id: impl Into<String>) -> Self {
        Self {
            date,
            participant_id: participant_id.into(),
        }
    }
}

/// A complete duty roster for one scheduling window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    /// Assignments in ascending date order.
    pub assignments: Vec<DutyAssignment>,
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a roster from assignments, sorting them by date.
    pub fn from_assignments(mut assignments: Vec<DutyAssignment>) -> Self {
        assignments.sort_by_key(|a| a.date);
        Self { assignments }
    }

    /// Appends an assignment. Callers composing rosters by hand should
    /// finish with [`from_assignments`](Self::from_assignments) or keep
    /// pushes in date order themselves.
    pub fn add_assignment(&mut self, assignment: DutyAssignment) {
        self.assignments.push(assignment);
    }

    /// Finds the assignment for a given date.
    pub fn assignment_for_date(&self, date: NaiveDate) -> Option<&DutyAssignment> {
        self.assignments.iter().find(|a| a.date == date)
    }

    /// Returns all assignments held by a participant.
    pub fn assignments_for_participant(&self, participant_id: &str) -> Vec<&DutyAssignment> {
        self.assignments
            .iter()
            .filter(|a| a.participant_id == participant_id)
            .collect()
    }

    /// Number of duty days a participant holds.
    pub fn shift_count(&self, participant_id: &str) -> usize {
        self.assignments
            .iter()
            .filter(|a| a.participant_id == participant_id)
            .count()
    }

    /// Whether the roster assigns exactly one participant to every day
    /// of the given sequence, with no extra assignments.
    pub fn covers(&self, days: &[DutyDay]) -> bool {
        if self.assignments.len() != days.len() {
            return false;
        }
        days.iter()
            .all(|day| self.assignments.iter().filter(|a| a.date == day.date).count() == 1)
    }

    /// Number of assignments.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }
}
