//! Solver configuration: premium-day policy and objective weights.
//!
//! The weights are policy constants, not derived quantities. They are
//! exposed here so they can be tuned and tested independently of the
//! model-building and solving logic.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::RosterError;
use crate::models::Availability;

/// Per-cell reward weights for the assignment objective.
///
/// Every (participant, day) cell earns `base` when assigned, plus
/// `preferred_bonus` if the participant prefers that day, plus
/// `premium_bonus` if the day is a premium day. The preference reward
/// must dominate the premium nudge so that preference satisfaction wins
/// tie-breaks among otherwise-equal feasible rosters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveWeights {
    /// Reward for any assignment. Keeps the objective non-degenerate
    /// even when no preferences exist.
    pub base: f64,
    /// Extra reward for assigning a participant a day they prefer.
    pub preferred_bonus: f64,
    /// Mild extra reward for covering a premium day, spreading premium
    /// coverage instead of leaving it arbitrary.
    pub premium_bonus: f64,
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        Self {
            base: 1.0,
            preferred_bonus: 10.0,
            premium_bonus: 2.0,
        }
    }
}

impl ObjectiveWeights {
    /// Creates weights with explicit values.
    pub fn new(base: f64, preferred_bonus: f64, premium_bonus: f64) -> Self {
        Self {
            base,
            preferred_bonus,
            premium_bonus,
        }
    }

    /// Checks the weights are usable as an objective.
    ///
    /// All three must be finite and non-negative, and the preference
    /// reward must strictly exceed the premium-day bonus.
    pub fn validate(&self) -> Result<(), RosterError> {
        for (name, value) in [
            ("base", self.base),
            ("preferred_bonus", self.preferred_bonus),
            ("premium_bonus", self.premium_bonus),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(RosterError::InvalidWeights {
                    detail: format!("{name} must be finite and non-negative, got {value}"),
                });
            }
        }

        if self.preferred_bonus <= self.premium_bonus {
            return Err(RosterError::InvalidWeights {
                detail: format!(
                    "preferred_bonus ({}) must exceed premium_bonus ({}) so preferences dominate tie-breaking",
                    self.preferred_bonus, self.premium_bonus
                ),
            });
        }

        Ok(())
    }

    /// Objective coefficient for one (participant, day) cell.
    pub fn cell_weight(&self, availability: Availability, premium: bool) -> f64 {
        let mut weight = self.base;
        if availability == Availability::Preferred {
            weight += self.preferred_bonus;
        }
        if premium {
            weight += self.premium_bonus;
        }
        weight
    }
}

/// Engine-level solver configuration.
///
/// Fixed at the engine boundary, not per call: a solver instance applies
/// the same premium weekday and weights to every request it handles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Weekday flagged as premium during window expansion.
    pub premium_weekday: Weekday,
    /// Objective reward weights.
    pub weights: ObjectiveWeights,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            premium_weekday: Weekday::Sun,
            weights: ObjectiveWeights::default(),
        }
    }
}

impl SolverConfig {
    /// Creates the default configuration (premium Sundays, weights 1/10/2).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the premium weekday.
    pub fn with_premium_weekday(mut self, weekday: Weekday) -> Self {
        self.premium_weekday = weekday;
        self
    }

    /// Sets the objective weights.
    pub fn with_weights(mut self, weights: ObjectiveWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), RosterError> {
        self.weights.validate()
    }
}
