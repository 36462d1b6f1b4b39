//! Integer-programming formulation of the roster problem.
//!
//! One binary variable per (participant, day) cell, a reward-maximizing
//! objective weighted per [`ObjectiveWeights`], and one typed rule per
//! hard-constraint family, each emitting its rows into the model:
//!
//! - [`Coverage`]: exactly one assignee per day
//! - [`Unavailability`]: declared days off pinned to zero
//! - [`EquityBand`]: per-participant load within the even-split band
//! - [`NoRepeat`]: no back-to-back duty days
//! - [`PremiumFloor`]: at least one premium day each, when enough exist
//!
//! The model is solved exactly (branch-and-bound over the LP relaxation)
//! with `good_lp`'s pure-Rust `microlp` backend; fractional assignments
//! cannot occur.
//!
//! # References
//!
//! - Wolsey (1998), "Integer Programming"
//! - Ernst et al. (2004), "Staff scheduling and rostering: A review of
//!   applications, methods and models"

use good_lp::{
    constraint, default_solver, variable, variables, Constraint, Expression, ProblemVariables,
    ResolutionError, Solution, SolverModel, Variable,
};
use tracing::debug;

use crate::error::RosterError;
use crate::models::{Availability, AvailabilityGrid, DutyDay, Participant};
use crate::solver::config::ObjectiveWeights;

/// Everything a rule needs to emit its constraint rows.
pub(crate) struct ModelContext<'a> {
    pub days: &'a [DutyDay],
    pub grid: &'a AvailabilityGrid,
    /// Assignment variables, `x[participant][day]`.
    pub x: &'a [Vec<Variable>],
}

/// One hard-constraint family of the roster model.
pub(crate) trait RosterRule {
    fn name(&self) -> &'static str;
    fn emit(&self, ctx: &ModelContext<'_>) -> Vec<Constraint>;
}

/// Exactly one assignee per day.
pub(crate) struct Coverage;

impl RosterRule for Coverage {
    fn name(&self) -> &'static str {
        "coverage"
    }

    fn emit(&self, ctx: &ModelContext<'_>) -> Vec<Constraint> {
        (0..ctx.days.len())
            .map(|d| {
                let assigned = ctx
                    .x
                    .iter()
                    .fold(Expression::from(0.0), |acc, vars| acc + vars[d]);
                constraint!(assigned == 1.0)
            })
            .collect()
    }
}

/// Pins `x[p][d]` to zero wherever the participant declared the day off.
pub(crate) struct Unavailability;

impl RosterRule for Unavailability {
    fn name(&self) -> &'static str {
        "unavailability"
    }

    fn emit(&self, ctx: &ModelContext<'_>) -> Vec<Constraint> {
        let mut rows = Vec::new();
        for (p, vars) in ctx.x.iter().enumerate() {
            for d in 0..ctx.days.len() {
                if ctx.grid.get(p, d) == Availability::Unavailable {
                    let cell = vars[d];
                    rows.push(constraint!(cell == 0.0));
                }
            }
        }
        rows
    }
}

/// Per-participant load bounded by the even-split band.
///
/// For N days and P participants, every participant's total lies in
/// `[floor(N/P), ceil(N/P)]`: nobody falls below the floor or exceeds
/// the ceiling of an even division.
pub(crate) struct EquityBand {
    min_share: usize,
    max_share: usize,
}

impl EquityBand {
    /// Even-split band for `day_count` days shared by `participant_count`
    /// people.
    pub(crate) fn for_window(day_count: usize, participant_count: usize) -> Self {
        if participant_count == 0 {
            return Self {
                min_share: 0,
                max_share: 0,
            };
        }
        Self {
            min_share: day_count / participant_count,
            max_share: day_count.div_ceil(participant_count),
        }
    }

    pub(crate) fn min_share(&self) -> usize {
        self.min_share
    }

    pub(crate) fn max_share(&self) -> usize {
        self.max_share
    }
}

impl RosterRule for EquityBand {
    fn name(&self) -> &'static str {
        "equity-band"
    }

    fn emit(&self, ctx: &ModelContext<'_>) -> Vec<Constraint> {
        let min = self.min_share as f64;
        let max = self.max_share as f64;
        let mut rows = Vec::with_capacity(ctx.x.len() * 2);
        for vars in ctx.x {
            let load = vars.iter().fold(Expression::from(0.0), |acc, &v| acc + v);
            let lower = load.clone();
            rows.push(constraint!(lower >= min));
            rows.push(constraint!(load <= max));
        }
        rows
    }
}

/// At least one premium day per participant.
///
/// Only constructed when the window holds at least as many premium days
/// as participants; otherwise the rule is omitted entirely rather than
/// enforced for an arbitrary subset of the pool.
pub(crate) struct PremiumFloor;

impl PremiumFloor {
    pub(crate) fn when_active(premium_days: usize, participant_count: usize) -> Option<Self> {
        if participant_count > 0 && premium_days >= participant_count {
            Some(Self)
        } else {
            None
        }
    }
}

impl RosterRule for PremiumFloor {
    fn name(&self) -> &'static str {
        "premium-floor"
    }

    fn emit(&self, ctx: &ModelContext<'_>) -> Vec<Constraint> {
        ctx.x
            .iter()
            .map(|vars| {
                let premium_load = ctx
                    .days
                    .iter()
                    .enumerate()
                    .filter(|(_, day)| day.premium)
                    .fold(Expression::from(0.0), |acc, (d, _)| acc + vars[d]);
                constraint!(premium_load >= 1.0)
            })
            .collect()
    }
}

/// No participant serves two consecutive calendar days.
///
/// Adjacency is positional in the day sequence, which equals calendar
/// adjacency because the expanded window is gap-free.
pub(crate) struct NoRepeat;

impl RosterRule for NoRepeat {
    fn name(&self) -> &'static str {
        "no-repeat"
    }

    fn emit(&self, ctx: &ModelContext<'_>) -> Vec<Constraint> {
        let mut rows = Vec::new();
        for vars in ctx.x {
            for d in 0..ctx.days.len().saturating_sub(1) {
                let pair = vars[d] + vars[d + 1];
                rows.push(constraint!(pair <= 1.0));
            }
        }
        rows
    }
}

/// Builds a [`RosterModel`] from domain objects.
pub(crate) struct RosterModelBuilder<'a> {
    days: &'a [DutyDay],
    participants: &'a [Participant],
    grid: &'a AvailabilityGrid,
    weights: &'a ObjectiveWeights,
}

impl<'a> RosterModelBuilder<'a> {
    pub(crate) fn new(
        days: &'a [DutyDay],
        participants: &'a [Participant],
        grid: &'a AvailabilityGrid,
        weights: &'a ObjectiveWeights,
    ) -> Self {
        Self {
            days,
            participants,
            grid,
            weights,
        }
    }

    /// Creates the variable grid, the weighted objective, and all
    /// constraint rows.
    pub(crate) fn build(&self) -> RosterModel {
        let mut vars = variables!();
        let x: Vec<Vec<Variable>> = (0..self.participants.len())
            .map(|_| {
                (0..self.days.len())
                    .map(|_| vars.add(variable().binary()))
                    .collect()
            })
            .collect();

        let mut objective = Expression::from(0.0);
        for (p, row) in x.iter().enumerate() {
            for (d, day) in self.days.iter().enumerate() {
                let weight = self.weights.cell_weight(self.grid.get(p, d), day.premium);
                objective = objective + weight * row[d];
            }
        }

        let ctx = ModelContext {
            days: self.days,
            grid: self.grid,
            x: &x,
        };
        let mut rows = Vec::new();
        for rule in self.rules() {
            let emitted = rule.emit(&ctx);
            debug!(rule = rule.name(), rows = emitted.len(), "emitted constraint rows");
            rows.extend(emitted);
        }

        RosterModel {
            vars,
            x,
            objective,
            rows,
        }
    }

    fn rules(&self) -> Vec<Box<dyn RosterRule>> {
        let premium_days = self.days.iter().filter(|d| d.premium).count();
        let mut rules: Vec<Box<dyn RosterRule>> = vec![
            Box::new(Coverage),
            Box::new(Unavailability),
            Box::new(EquityBand::for_window(
                self.days.len(),
                self.participants.len(),
            )),
            Box::new(NoRepeat),
        ];
        if let Some(floor) = PremiumFloor::when_active(premium_days, self.participants.len()) {
            rules.push(Box::new(floor));
        }
        rules
    }
}

/// The assembled model: variables, objective, and constraint rows.
///
/// Owned for the duration of one solve and discarded on return.
pub(crate) struct RosterModel {
    vars: ProblemVariables,
    x: Vec<Vec<Variable>>,
    objective: Expression,
    rows: Vec<Constraint>,
}

/// Exact outcome of one model solve.
pub(crate) enum ModelResolution {
    /// Optimal selection, `selected[participant][day]`.
    Optimal { selected: Vec<Vec<bool>> },
    /// No assignment satisfies all hard rows.
    Infeasible,
}

impl RosterModel {
    /// Number of binary assignment variables.
    pub(crate) fn variable_count(&self) -> usize {
        self.x.iter().map(|row| row.len()).sum()
    }

    /// Number of hard-constraint rows.
    pub(crate) fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Solves to optimality or proven infeasibility.
    pub(crate) fn solve(self) -> Result<ModelResolution, RosterError> {
        let Self {
            vars,
            x,
            objective,
            rows,
        } = self;

        let mut problem = vars.maximise(objective).using(default_solver);
        for row in rows {
            problem = problem.with(row);
        }

        match problem.solve() {
            Ok(solution) => {
                let selected = x
                    .iter()
                    .map(|vars| vars.iter().map(|&v| solution.value(v) > 0.5).collect())
                    .collect();
                Ok(ModelResolution::Optimal { selected })
            }
            Err(ResolutionError::Infeasible) => Ok(ModelResolution::Infeasible),
            Err(err) => Err(RosterError::Solver {
                message: err.to_string(),
            }),
        }
    }
}
