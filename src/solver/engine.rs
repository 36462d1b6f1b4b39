//! Roster solving engine.
//!
//! [`RosterSolver`] is the crate's entry point. One call to
//! [`solve`](RosterSolver::solve) validates the request, expands the
//! window into its day sequence, collapses the constraint entries into
//! the availability grid, assembles and solves the integer program, and
//! decodes the optimal selection into a [`Roster`] with its
//! [`RosterStatistics`].
//!
//! Infeasibility is a legitimate outcome, not an error: a request can be
//! perfectly well-formed and still admit no roster (say, a solo
//! participant who cannot serve back-to-back days). Such solves return
//! [`SolveOutcome::Infeasible`] with a human-readable reason, while
//! [`RosterError`](crate::error::RosterError) is reserved for malformed
//! requests and solver failures.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::{
    AvailabilityGrid, ConstraintEntry, DutyAssignment, DutyDay, Participant, Roster,
    SchedulingWindow,
};
use crate::solver::config::SolverConfig;
use crate::solver::model::{ModelResolution, RosterModelBuilder};
use crate::solver::stats::RosterStatistics;
use crate::validation::validate_request;

/// One roster problem: the window to cover, the participant pool, and
/// their availability constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveRequest {
    /// Inclusive date range needing one assignee per day.
    pub window: SchedulingWindow,
    /// Pool of eligible participants.
    pub participants: Vec<Participant>,
    /// Availability declarations; absent means everyone is available
    /// everywhere.
    #[serde(default)]
    pub constraints: Vec<ConstraintEntry>,
}

impl SolveRequest {
    /// Creates a request with no availability constraints.
    pub fn new(window: SchedulingWindow, participants: Vec<Participant>) -> Self {
        Self {
            window,
            participants,
            constraints: Vec::new(),
        }
    }

    /// Attaches availability constraints.
    pub fn with_constraints(mut self, constraints: Vec<ConstraintEntry>) -> Self {
        self.constraints = constraints;
        self
    }
}

/// Result of a well-formed solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SolveOutcome {
    /// An optimal roster was found.
    Solved {
        roster: Roster,
        statistics: RosterStatistics,
    },
    /// The hard rules admit no roster at all.
    Infeasible { reason: String },
}

/// Assigns one participant to every day of a scheduling window.
///
/// Hard rules (full coverage, declared unavailability, the even-split
/// equity band, no back-to-back days, and the premium floor when
/// enough premium days exist) are always honored; among all rosters that
/// honor them, the solver returns one maximizing satisfied preferences,
/// premium bonuses weighted in.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use rota_engine::models::{Participant, SchedulingWindow};
/// use rota_engine::solver::{RosterSolver, SolveOutcome, SolveRequest};
///
/// let window = SchedulingWindow::new(
///     NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
/// );
/// let participants = vec![
///     Participant::new("alice", "Alice"),
///     Participant::new("bob", "Bob"),
/// ];
/// let request = SolveRequest::new(window, participants);
///
/// match RosterSolver::new().solve(&request)? {
///     SolveOutcome::Solved { roster, statistics } => {
///         assert_eq!(roster.assignment_count(), 10);
///         assert_eq!(statistics.shifts_for("alice"), 5);
///     }
///     SolveOutcome::Infeasible { reason } => panic!("{reason}"),
/// }
/// # Ok::<(), rota_engine::error::RosterError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct RosterSolver {
    config: SolverConfig,
}

impl RosterSolver {
    /// Creates a solver with the default configuration (Sunday premium,
    /// default objective weights).
    pub fn new() -> Self {
        Self {
            config: SolverConfig::default(),
        }
    }

    /// Creates a solver with a custom configuration.
    ///
    /// # Errors
    /// [`RosterError::InvalidWeights`](crate::error::RosterError::InvalidWeights)
    /// if the configured weights are degenerate.
    pub fn with_config(config: SolverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves one roster problem.
    ///
    /// # Errors
    /// Any [`RosterError`](crate::error::RosterError) for malformed
    /// requests (reversed window, empty pool, duplicate ids, dangling
    /// constraints) or for a solver backend failure. An over-constrained
    /// but well-formed request is not an error; it yields
    /// [`SolveOutcome::Infeasible`].
    pub fn solve(&self, request: &SolveRequest) -> Result<SolveOutcome> {
        validate_request(&request.window, &request.participants)?;
        let days = request.window.expand(self.config.premium_weekday)?;
        let grid = AvailabilityGrid::build(&days, &request.participants, &request.constraints)?;

        info!(
            days = days.len(),
            participants = request.participants.len(),
            constraints = request.constraints.len(),
            "assembling roster model"
        );

        let model =
            RosterModelBuilder::new(&days, &request.participants, &grid, &self.config.weights)
                .build();
        debug!(
            variables = model.variable_count(),
            rows = model.row_count(),
            "model assembled"
        );

        match model.solve()? {
            ModelResolution::Optimal { selected } => {
                let roster = decode_assignments(&selected, &days, &request.participants);
                let statistics =
                    RosterStatistics::calculate(&roster, &days, &request.participants, &grid);
                info!(
                    assignments = roster.assignment_count(),
                    preferences_satisfied = statistics.preferences_satisfied,
                    preferences_total = statistics.preferences_total,
                    "roster solved"
                );
                Ok(SolveOutcome::Solved { roster, statistics })
            }
            ModelResolution::Infeasible => {
                let reason = infeasibility_reason(&days, &grid);
                warn!(reason = %reason, "roster infeasible");
                Ok(SolveOutcome::Infeasible { reason })
            }
        }
    }
}

/// Turns the solver's 0/1 selection back into dated assignments.
fn decode_assignments(
    selected: &[Vec<bool>],
    days: &[DutyDay],
    participants: &[Participant],
) -> Roster {
    let mut assignments = Vec::with_capacity(days.len());
    for (row, participant) in selected.iter().zip(participants) {
        for (day, &on) in days.iter().zip(row) {
            if on {
                assignments.push(DutyAssignment::new(day.date, participant.id.clone()));
            }
        }
    }
    Roster::from_assignments(assignments)
}

/// Explains why no roster exists, as pointedly as the grid allows.
///
/// A day on which every participant is unavailable is the one cause
/// detectable by inspection, so it is named outright; anything subtler
/// falls back to naming the rule families in play.
fn infeasibility_reason(days: &[DutyDay], grid: &AvailabilityGrid) -> String {
    for (column, day) in days.iter().enumerate() {
        if grid.day_fully_unavailable(column) {
            return format!(
                "every participant is unavailable on {}, so the day cannot be covered",
                day.date
            );
        }
    }
    "no assignment satisfies the coverage, equity band, no-repeat, and premium floor rules \
     under the declared unavailability"
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RosterError;
    use crate::models::ConstraintEntry;
    use crate::solver::config::ObjectiveWeights;
    use chrono::{NaiveDate, Weekday};
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn pool(count: usize) -> Vec<Participant> {
        (1..=count)
            .map(|i| Participant::new(format!("p{i}"), format!("Person {i}")))
            .collect()
    }

    fn expect_solved(outcome: SolveOutcome) -> (Roster, RosterStatistics) {
        match outcome {
            SolveOutcome::Solved { roster, statistics } => (roster, statistics),
            SolveOutcome::Infeasible { reason } => panic!("expected a roster, got: {reason}"),
        }
    }

    #[test]
    fn test_covers_every_day_exactly_once() {
        let window = SchedulingWindow::new(date(2025, 1, 1), date(2025, 1, 10));
        let request = SolveRequest::new(window.clone(), pool(2));

        let (roster, statistics) = expect_solved(RosterSolver::new().solve(&request).unwrap());
        let days = window.expand(Weekday::Sun).unwrap();

        assert!(roster.covers(&days));
        assert_eq!(roster.assignment_count(), 10);
        assert!(roster
            .assignments
            .windows(2)
            .all(|pair| pair[0].date < pair[1].date));
        assert_eq!(statistics.shifts_for("p1"), 5);
        assert_eq!(statistics.shifts_for("p2"), 5);
    }

    #[test]
    fn test_no_back_to_back_days() {
        let window = SchedulingWindow::new(date(2025, 1, 1), date(2025, 1, 10));
        let request = SolveRequest::new(window, pool(2));

        let (roster, _) = expect_solved(RosterSolver::new().solve(&request).unwrap());
        for pair in roster.assignments.windows(2) {
            if pair[0].participant_id == pair[1].participant_id {
                assert!((pair[1].date - pair[0].date).num_days() >= 2);
            }
        }
    }

    #[test]
    fn test_unavailability_is_absolute() {
        let window = SchedulingWindow::new(date(2025, 1, 1), date(2025, 1, 3));
        let request = SolveRequest::new(window, pool(2))
            .with_constraints(vec![ConstraintEntry::unavailable("p1", date(2025, 1, 2))]);

        let (roster, _) = expect_solved(RosterSolver::new().solve(&request).unwrap());
        let on_jan_2 = roster.assignment_for_date(date(2025, 1, 2)).unwrap();
        assert_eq!(on_jan_2.participant_id, "p2");
    }

    #[test]
    fn test_single_preference_decides_the_day() {
        let window = SchedulingWindow::new(date(2025, 1, 1), date(2025, 1, 2));
        let request = SolveRequest::new(window, pool(2))
            .with_constraints(vec![ConstraintEntry::preferred("p1", date(2025, 1, 1))]);

        let (roster, statistics) = expect_solved(RosterSolver::new().solve(&request).unwrap());
        assert_eq!(
            roster.assignment_for_date(date(2025, 1, 1)).unwrap().participant_id,
            "p1"
        );
        assert_eq!(statistics.preferences_satisfied, 1);
    }

    #[test]
    fn test_preferences_honored_when_unopposed() {
        let window = SchedulingWindow::new(date(2025, 1, 1), date(2025, 1, 2));
        let request = SolveRequest::new(window, pool(2)).with_constraints(vec![
            ConstraintEntry::preferred("p1", date(2025, 1, 1)),
            ConstraintEntry::preferred("p2", date(2025, 1, 2)),
        ]);

        let (roster, statistics) = expect_solved(RosterSolver::new().solve(&request).unwrap());
        assert_eq!(
            roster.assignment_for_date(date(2025, 1, 1)).unwrap().participant_id,
            "p1"
        );
        assert_eq!(
            roster.assignment_for_date(date(2025, 1, 2)).unwrap().participant_id,
            "p2"
        );
        assert_eq!(statistics.preferences_satisfied, 2);
        assert_eq!(statistics.preferences_total, 2);
    }

    #[test]
    fn test_conflicting_preferences_satisfy_exactly_one() {
        // Both want Jan 1; coverage admits only one of them.
        let window = SchedulingWindow::new(date(2025, 1, 1), date(2025, 1, 2));
        let request = SolveRequest::new(window, pool(2)).with_constraints(vec![
            ConstraintEntry::preferred("p1", date(2025, 1, 1)),
            ConstraintEntry::preferred("p2", date(2025, 1, 1)),
        ]);

        let (_, statistics) = expect_solved(RosterSolver::new().solve(&request).unwrap());
        assert_eq!(statistics.preferences_satisfied, 1);
        assert_eq!(statistics.preferences_total, 2);
    }

    #[test]
    fn test_premium_floor_enforced_when_supply_suffices() {
        // Jan 5 and Jan 12, 2025 are Sundays: two premium days, two people.
        let window = SchedulingWindow::new(date(2025, 1, 1), date(2025, 1, 14));
        let request = SolveRequest::new(window, pool(2));

        let (_, statistics) = expect_solved(RosterSolver::new().solve(&request).unwrap());
        assert!(statistics.premium_days_for("p1") >= 1);
        assert!(statistics.premium_days_for("p2") >= 1);
    }

    #[test]
    fn test_premium_floor_skipped_when_supply_short() {
        // Mon Jan 6 - Sun Jan 12: one Sunday for three people. Enforcing
        // the floor would be unsatisfiable, so it must be omitted.
        let window = SchedulingWindow::new(date(2025, 1, 6), date(2025, 1, 12));
        let request = SolveRequest::new(window, pool(3));

        let (_, statistics) = expect_solved(RosterSolver::new().solve(&request).unwrap());
        let premium_total: usize = statistics
            .premium_days_per_participant
            .values()
            .sum();
        assert_eq!(premium_total, 1);
    }

    #[test]
    fn test_equity_band_on_uneven_split() {
        let window = SchedulingWindow::new(date(2025, 1, 1), date(2025, 1, 7));
        let request = SolveRequest::new(window, pool(3));

        let (_, statistics) = expect_solved(RosterSolver::new().solve(&request).unwrap());
        let mut total = 0;
        for participant in ["p1", "p2", "p3"] {
            let shifts = statistics.shifts_for(participant);
            assert!((2..=3).contains(&shifts), "{participant} got {shifts}");
            total += shifts;
        }
        assert_eq!(total, 7);
    }

    #[test]
    fn test_unavailable_beats_preferred_on_same_day() {
        let window = SchedulingWindow::new(date(2025, 1, 1), date(2025, 1, 2));
        for entries in [
            vec![
                ConstraintEntry::unavailable("p1", date(2025, 1, 1)),
                ConstraintEntry::preferred("p1", date(2025, 1, 1)),
            ],
            vec![
                ConstraintEntry::preferred("p1", date(2025, 1, 1)),
                ConstraintEntry::unavailable("p1", date(2025, 1, 1)),
            ],
        ] {
            let request = SolveRequest::new(window.clone(), pool(2)).with_constraints(entries);
            let (roster, statistics) =
                expect_solved(RosterSolver::new().solve(&request).unwrap());
            assert_eq!(
                roster.assignment_for_date(date(2025, 1, 1)).unwrap().participant_id,
                "p2"
            );
            assert_eq!(statistics.preferences_total, 0);
        }
    }

    #[test]
    fn test_fully_blocked_day_names_the_date() {
        let window = SchedulingWindow::new(date(2025, 1, 1), date(2025, 1, 2));
        let request = SolveRequest::new(window, pool(2)).with_constraints(vec![
            ConstraintEntry::unavailable("p1", date(2025, 1, 1)),
            ConstraintEntry::unavailable("p2", date(2025, 1, 1)),
        ]);

        match RosterSolver::new().solve(&request).unwrap() {
            SolveOutcome::Infeasible { reason } => {
                assert!(reason.contains("2025-01-01"), "reason was: {reason}");
            }
            SolveOutcome::Solved { .. } => panic!("a fully blocked day cannot be covered"),
        }
    }

    #[test]
    fn test_participant_blocked_all_window_is_infeasible() {
        // With p1 out for all three days, p2 would need all three, but
        // the equity ceiling is two and back-to-back days are forbidden.
        let window = SchedulingWindow::new(date(2025, 1, 1), date(2025, 1, 3));
        let request = SolveRequest::new(window, pool(2)).with_constraints(vec![
            ConstraintEntry::unavailable("p1", date(2025, 1, 1)),
            ConstraintEntry::unavailable("p1", date(2025, 1, 2)),
            ConstraintEntry::unavailable("p1", date(2025, 1, 3)),
        ]);

        assert!(matches!(
            RosterSolver::new().solve(&request).unwrap(),
            SolveOutcome::Infeasible { .. }
        ));
    }

    #[test]
    fn test_structural_infeasibility_gets_generic_reason() {
        // A solo participant over two days: the equity band demands both
        // days, the no-repeat rule forbids serving them back to back.
        let window = SchedulingWindow::new(date(2025, 1, 1), date(2025, 1, 2));
        let request = SolveRequest::new(window, pool(1));

        match RosterSolver::new().solve(&request).unwrap() {
            SolveOutcome::Infeasible { reason } => {
                assert!(reason.contains("no assignment satisfies"), "reason was: {reason}");
            }
            SolveOutcome::Solved { .. } => panic!("solo two-day roster must be infeasible"),
        }
    }

    #[test]
    fn test_reversed_window_is_an_error() {
        let window = SchedulingWindow::new(date(2025, 1, 10), date(2025, 1, 1));
        let request = SolveRequest::new(window, pool(2));
        let err = RosterSolver::new().solve(&request).unwrap_err();
        assert!(matches!(err, RosterError::InvalidWindow { .. }));
    }

    #[test]
    fn test_empty_pool_is_an_error() {
        let window = SchedulingWindow::new(date(2025, 1, 1), date(2025, 1, 3));
        let request = SolveRequest::new(window, vec![]);
        let err = RosterSolver::new().solve(&request).unwrap_err();
        assert_eq!(err, RosterError::EmptyParticipantSet);
    }

    #[test]
    fn test_duplicate_participant_is_an_error() {
        let window = SchedulingWindow::new(date(2025, 1, 1), date(2025, 1, 3));
        let participants = vec![
            Participant::new("p1", "Ada"),
            Participant::new("p1", "Imposter"),
        ];
        let request = SolveRequest::new(window, participants);
        let err = RosterSolver::new().solve(&request).unwrap_err();
        assert_eq!(err, RosterError::DuplicateParticipant { id: "p1".into() });
    }

    #[test]
    fn test_dangling_constraint_is_an_error() {
        let window = SchedulingWindow::new(date(2025, 1, 1), date(2025, 1, 3));
        let request = SolveRequest::new(window, pool(2))
            .with_constraints(vec![ConstraintEntry::preferred("ghost", date(2025, 1, 2))]);
        let err = RosterSolver::new().solve(&request).unwrap_err();
        assert!(matches!(err, RosterError::DanglingConstraint { .. }));
    }

    #[test]
    fn test_custom_premium_weekday_flows_through() {
        // Saturdays Jan 4 and Jan 11 become the premium days.
        let config = SolverConfig::new().with_premium_weekday(Weekday::Sat);
        let solver = RosterSolver::with_config(config).unwrap();

        let window = SchedulingWindow::new(date(2025, 1, 1), date(2025, 1, 14));
        let request = SolveRequest::new(window, pool(2));

        let (_, statistics) = expect_solved(solver.solve(&request).unwrap());
        assert!(statistics.premium_days_for("p1") >= 1);
        assert!(statistics.premium_days_for("p2") >= 1);
    }

    #[test]
    fn test_degenerate_weights_rejected() {
        // A premium bonus at or above the preferred bonus inverts the
        // preference ordering.
        let config =
            SolverConfig::new().with_weights(ObjectiveWeights::new(1.0, 2.0, 5.0));
        let err = RosterSolver::with_config(config).unwrap_err();
        assert!(matches!(err, RosterError::InvalidWeights { .. }));
    }

    #[test]
    fn test_solver_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RosterSolver>();
    }

    #[test]
    fn test_solve_is_deterministic() {
        let window = SchedulingWindow::new(date(2025, 1, 1), date(2025, 1, 10));
        let request = SolveRequest::new(window, pool(3))
            .with_constraints(vec![ConstraintEntry::preferred("p2", date(2025, 1, 4))]);

        let solver = RosterSolver::new();
        let first = solver.solve(&request).unwrap();
        let second = solver.solve(&request).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_statistics_dimensions_match_request() {
        let window = SchedulingWindow::new(date(2025, 1, 1), date(2025, 1, 10));
        let request = SolveRequest::new(window, pool(2))
            .with_constraints(vec![ConstraintEntry::preferred("p1", date(2025, 1, 3))]);

        let (_, statistics) = expect_solved(RosterSolver::new().solve(&request).unwrap());
        assert_eq!(statistics.total_days, 10);
        assert_eq!(statistics.participant_count, 2);
        assert!(statistics.preferences_satisfied <= statistics.preferences_total);
    }

    #[test]
    fn test_request_constraints_default_to_empty_on_the_wire() {
        let json = r#"{
            "window": { "start": "2025-01-01", "end": "2025-01-03" },
            "participants": [{ "id": "p1", "name": "Ada" }]
        }"#;
        let request: SolveRequest = serde_json::from_str(json).unwrap();
        assert!(request.constraints.is_empty());
        assert_eq!(request.window.start, date(2025, 1, 1));
    }

    #[test]
    fn test_unconstrained_windows_are_always_feasible() {
        // Round-robin rotation satisfies every hard rule whenever the
        // pool size is coprime with the week length, so none of these
        // randomly sized instances may come back infeasible.
        let mut rng = SmallRng::seed_from_u64(42);
        let solver = RosterSolver::new();

        for _ in 0..12 {
            let participant_count = rng.random_range(2..=6);
            let length = rng.random_range(7..=28);
            let start = date(2025, 3, 3); // a Monday
            let end = start + chrono::Duration::days(length - 1);

            let window = SchedulingWindow::new(start, end);
            let request = SolveRequest::new(window.clone(), pool(participant_count));
            let (roster, statistics) = expect_solved(solver.solve(&request).unwrap());

            let days = window.expand(Weekday::Sun).unwrap();
            assert!(roster.covers(&days));

            let min = days.len() / participant_count;
            let max = days.len().div_ceil(participant_count);
            for i in 1..=participant_count {
                let shifts = statistics.shifts_for(&format!("p{i}"));
                assert!(
                    (min..=max).contains(&shifts),
                    "p{i} got {shifts} shifts over {} days with {participant_count} people",
                    days.len()
                );
            }

            for pair in roster.assignments.windows(2) {
                if pair[0].participant_id == pair[1].participant_id {
                    assert!(
                        (pair[1].date - pair[0].date).num_days() >= 2,
                        "back-to-back assignment at {}",
                        pair[1].date
                    );
                }
            }
        }
    }

    #[test]
    fn test_preferences_never_cause_infeasibility() {
        let mut rng = SmallRng::seed_from_u64(7);
        let solver = RosterSolver::new();

        for _ in 0..8 {
            let participant_count = rng.random_range(2..=5);
            let length: i64 = rng.random_range(10..=21);
            let start = date(2025, 3, 3);
            let window = SchedulingWindow::new(start, start + chrono::Duration::days(length - 1));

            let mut entries = Vec::new();
            for i in 1..=participant_count {
                for _ in 0..3 {
                    let offset = rng.random_range(0..length);
                    entries.push(ConstraintEntry::preferred(
                        format!("p{i}"),
                        start + chrono::Duration::days(offset),
                    ));
                }
            }

            let request =
                SolveRequest::new(window, pool(participant_count)).with_constraints(entries);
            let (_, statistics) = expect_solved(solver.solve(&request).unwrap());
            assert!(statistics.preferences_satisfied <= statistics.preferences_total);
        }
    }
}
