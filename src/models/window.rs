//! Scheduling window and calendar expansion.
//!
//! A [`SchedulingWindow`] is the inclusive date range a roster must cover.
//! Expanding it yields one [`DutyDay`] per calendar date, in ascending
//! order, with days falling on the designated premium weekday flagged.
//! Which weekday counts as premium is engine policy
//! (see [`SolverConfig`](crate::solver::SolverConfig)), not a per-call
//! parameter.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::RosterError;

/// An inclusive date range to be covered, one duty per day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingWindow {
    /// First day of the window (inclusive).
    pub start: NaiveDate,
    /// Last day of the window (inclusive).
    pub end: NaiveDate,
}

/// A single day of the expanded window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutyDay {
    /// Calendar date of this duty.
    pub date: NaiveDate,
    /// Whether the date falls on the premium weekday.
    pub premium: bool,
}

impl SchedulingWindow {
    /// Creates a new window. Bounds are checked on [`expand`](Self::expand).
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Number of days in the window, both bounds included.
    ///
    /// Negative or zero for a reversed window.
    #[inline]
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Whether a date falls within the window.
    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Expands the window into its ordered day sequence.
    ///
    /// Returns one [`DutyDay`] per date from start to end inclusive, in
    /// ascending order, flagging days whose weekday equals
    /// `premium_weekday`. Pure and deterministic.
    ///
    /// # Errors
    /// [`RosterError::InvalidWindow`] if start is after end.
    pub fn expand(&self, premium_weekday: Weekday) -> Result<Vec<DutyDay>, RosterError> {
        if self.start > self.end {
            return Err(RosterError::InvalidWindow {
                start: self.start,
                end: self.end,
            });
        }

        Ok(self
            .start
            .iter_days()
            .take_while(|date| *date <= self.end)
            .map(|date| DutyDay {
                date,
                premium: date.weekday() == premium_weekday,
            })
            .collect())
    }
}
