//! Availability constraints and the per-cell availability grid.
//!
//! Callers describe each participant's relation to individual dates as a
//! flat list of [`ConstraintEntry`] records. Before solving, the engine
//! collapses that list into an [`AvailabilityGrid`]: a dense
//! participant-by-day matrix of [`Availability`] values. The collapse
//! happens exactly once, at this boundary; downstream logic reads the
//! grid and never re-derives the default state by absence-checking.
//!
//! # Precedence
//! At most one availability kind is effective per (participant, day)
//! cell. When conflicting entries target the same cell, `unavailable`
//! dominates `preferred` regardless of supply order: unavailability is a
//! hard constraint and a soft preference must not resurrect an excluded
//! cell. Explicit `available` entries are the neutral default.
//!
//! # Reference
//! Ernst et al. (2004), "Staff scheduling and rostering: A review of
//! applications, methods and models"

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::RosterError;
use crate::models::{DutyDay, Participant};

/// A participant's relation to a single date.
///
/// `Available` is the implicit default: callers normally persist only
/// `unavailable` and `preferred` records, and "no record" collapses to
/// `Available` when the grid is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    /// Hard exclusion: the participant must not be assigned on this day.
    Unavailable,
    /// Soft preference: assigning this day is rewarded by the objective.
    Preferred,
    /// Neutral default: the participant may be assigned on this day.
    #[default]
    Available,
}

impl Availability {
    /// Merges two availability kinds targeting the same cell.
    ///
    /// `Unavailable` dominates `Preferred`, which dominates `Available`.
    /// Commutative, so entry supply order never matters.
    pub fn merge(self, other: Availability) -> Availability {
        use Availability::*;
        match (self, other) {
            (Unavailable, _) | (_, Unavailable) => Unavailable,
            (Preferred, _) | (_, Preferred) => Preferred,
            (Available, Available) => Available,
        }
    }
}

/// One caller-supplied availability record for a (participant, date) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintEntry {
    /// Participant the entry applies to.
    pub participant_id: String,
    /// Date the entry applies to.
    pub date: NaiveDate,
    /// Declared availability for that date.
    pub availability: Availability,
}

impl ConstraintEntry {
    /// Creates an entry with an explicit availability kind.
    pub fn new(
        participant_id: impl Into<String>,
        date: NaiveDate,
        availability: Availability,
    ) -> Self {
        Self {
            participant_id: participant_id.into(),
            date,
            availability,
        }
    }

    /// Creates an `unavailable` entry.
    pub fn unavailable(participant_id: impl Into<String>, date: NaiveDate) -> Self {
        Self::new(participant_id, date, Availability::Unavailable)
    }

    /// Creates a `preferred` entry.
    pub fn preferred(participant_id: impl Into<String>, date: NaiveDate) -> Self {
        Self::new(participant_id, date, Availability::Preferred)
    }

    /// Creates an explicit `available` entry (the neutral default).
    pub fn available(participant_id: impl Into<String>, date: NaiveDate) -> Self {
        Self::new(participant_id, date, Availability::Available)
    }
}

/// Dense participant-by-day availability matrix.
///
/// Built once per solve from the expanded day sequence, the participant
/// roster, and the caller's constraint entries. Rows follow participant
/// order, columns follow day order; cells default to
/// [`Availability::Available`].
///
/// Entries dated outside the window are ignored: the surrounding system
/// stores constraints per planning window, so such records never belong
/// to the solve at hand. Entries naming an unknown participant are
/// rejected with [`RosterError::DanglingConstraint`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityGrid {
    /// First date of the window (column 0).
    start: NaiveDate,
    /// Number of day columns.
    day_count: usize,
    /// Participant id → row index, in roster order.
    rows: HashMap<String, usize>,
    /// Row-major cells: index = row * day_count + column.
    cells: Vec<Availability>,
}

impl AvailabilityGrid {
    /// Collapses constraint entries into a grid for one solve.
    ///
    /// # Errors
    /// - [`RosterError::DuplicateParticipant`] if two participants share an id.
    /// - [`RosterError::DanglingConstraint`] if an entry names a participant
    ///   absent from `participants`.
    pub fn build(
        days: &[DutyDay],
        participants: &[Participant],
        entries: &[ConstraintEntry],
    ) -> Result<Self, RosterError> {
        let mut rows = HashMap::with_capacity(participants.len());
        for (idx, participant) in participants.iter().enumerate() {
            if rows.insert(participant.id.clone(), idx).is_some() {
                return Err(RosterError::DuplicateParticipant {
                    id: participant.id.clone(),
                });
            }
        }

        let day_count = days.len();
        let start = days.first().map(|d| d.date).unwrap_or(NaiveDate::MIN);
        let mut grid = Self {
            start,
            day_count,
            rows,
            cells: vec![Availability::Available; participants.len() * day_count],
        };

        for entry in entries {
            let Some(&row) = grid.rows.get(&entry.participant_id) else {
                return Err(RosterError::DanglingConstraint {
                    participant_id: entry.participant_id.clone(),
                    date: entry.date,
                });
            };
            let Some(column) = grid.column_of(entry.date) else {
                continue; // outside the window
            };
            let idx = row * day_count + column;
            grid.cells[idx] = grid.cells[idx].merge(entry.availability);
        }

        Ok(grid)
    }

    /// Availability at a (row, column) cell. Indices follow the
    /// participant and day order the grid was built with.
    #[inline]
    pub fn get(&self, participant: usize, day: usize) -> Availability {
        self.cells[participant * self.day_count + day]
    }

    /// Availability for a participant id on a date.
    ///
    /// `None` when the participant is unknown or the date lies outside
    /// the window.
    pub fn availability_for(&self, participant_id: &str, date: NaiveDate) -> Option<Availability> {
        let row = *self.rows.get(participant_id)?;
        let column = self.column_of(date)?;
        Some(self.cells[row * self.day_count + column])
    }

    /// Row index for a participant id.
    pub fn row_of(&self, participant_id: &str) -> Option<usize> {
        self.rows.get(participant_id).copied()
    }

    /// Total number of `Preferred` cells after collapsing.
    pub fn preferred_total(&self) -> usize {
        self.cells
            .iter()
            .filter(|&&a| a == Availability::Preferred)
            .count()
    }

    /// Whether every participant is unavailable on the given day column.
    ///
    /// Such a day makes coverage impossible; used to produce a pointed
    /// infeasibility reason.
    pub fn day_fully_unavailable(&self, day: usize) -> bool {
        self.participant_count() > 0
            && (0..self.participant_count())
                .all(|row| self.get(row, day) == Availability::Unavailable)
    }

    /// Number of participant rows.
    pub fn participant_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of day columns.
    pub fn day_count(&self) -> usize {
        self.day_count
    }

    fn column_of(&self, date: NaiveDate) -> Option<usize> {
        let offset = (date - self.start).num_days();
        if offset >= 0 && (offset as usize) < self.day_count {
            Some(offset as usize)
        } else {
            None
        }
    }
}
