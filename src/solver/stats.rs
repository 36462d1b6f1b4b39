//! Post-solve roster statistics.
//!
//! Summarizes how the optimal roster distributes load and how many of
//! the declared preferences it honors. Everything here is derived from
//! the same collapsed availability grid the model was built from, so
//! the preference counts agree with the objective the solver maximized.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Availability, AvailabilityGrid, DutyDay, Participant, Roster};

/// Load and preference summary for one solved roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterStatistics {
    /// Days in the scheduling window.
    pub total_days: usize,
    /// Participants in the pool.
    pub participant_count: usize,
    /// Duty days served, per participant id. Zero-filled: every
    /// participant appears even with no assignments.
    pub shifts_per_participant: HashMap<String, usize>,
    /// Premium duty days served, per participant id.
    pub premium_days_per_participant: HashMap<String, usize>,
    /// Preferred cells the roster actually lands on.
    pub preferences_satisfied: usize,
    /// Preferred cells declared across the whole grid.
    pub preferences_total: usize,
}

impl RosterStatistics {
    /// Computes statistics for a roster over the expanded window.
    pub fn calculate(
        roster: &Roster,
        days: &[DutyDay],
        participants: &[Participant],
        grid: &AvailabilityGrid,
    ) -> Self {
        let mut shifts: HashMap<String, usize> = participants
            .iter()
            .map(|p| (p.id.clone(), 0))
            .collect();
        let mut premium: HashMap<String, usize> = participants
            .iter()
            .map(|p| (p.id.clone(), 0))
            .collect();

        let premium_dates: HashSet<NaiveDate> = days
            .iter()
            .filter(|day| day.premium)
            .map(|day| day.date)
            .collect();

        let mut satisfied = 0;
        for assignment in &roster.assignments {
            if let Some(count) = shifts.get_mut(&assignment.participant_id) {
                *count += 1;
            }
            if premium_dates.contains(&assignment.date) {
                if let Some(count) = premium.get_mut(&assignment.participant_id) {
                    *count += 1;
                }
            }
            if grid.availability_for(&assignment.participant_id, assignment.date)
                == Some(Availability::Preferred)
            {
                satisfied += 1;
            }
        }

        Self {
            total_days: days.len(),
            participant_count: participants.len(),
            shifts_per_participant: shifts,
            premium_days_per_participant: premium,
            preferences_satisfied: satisfied,
            preferences_total: grid.preferred_total(),
        }
    }

    /// Duty days served by `participant_id`, zero if unknown.
    pub fn shifts_for(&self, participant_id: &str) -> usize {
        self.shifts_per_participant
            .get(participant_id)
            .copied()
            .unwrap_or(0)
    }

    /// Premium duty days served by `participant_id`, zero if unknown.
    pub fn premium_days_for(&self, participant_id: &str) -> usize {
        self.premium_days_per_participant
            .get(participant_id)
            .copied()
            .unwrap_or(0)
    }
}
