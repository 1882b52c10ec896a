mod backend;
mod conflicts;
mod decode;
mod formulation;
mod grid;
mod hard;
mod penalties;
mod score;
mod types;
mod util;

pub use score::ObjectiveBreakdown;
pub use types::{SchedError, SolveOutcome, Solved, Violation, ViolationKind};

use crate::model::{PlanningInput, Schedule, SolverOptions};

/// Solveur de roulement : une instance par résolution, entrée figée.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleSolver<'a> {
    input: &'a PlanningInput,
    options: SolverOptions,
}

impl<'a> ScheduleSolver<'a> {
    /// Valide l'entrée et les options avant toute construction de modèle.
    pub fn new(input: &'a PlanningInput, options: SolverOptions) -> Result<Self, SchedError> {
        util::validate(input, &options)?;
        Ok(Self { input, options })
    }

    pub fn input(&self) -> &PlanningInput {
        self.input
    }

    pub fn options(&self) -> SolverOptions {
        self.options
    }

    /// Construit le modèle, lance l'optimisation bornée en temps et décode.
    pub fn solve(&self) -> Result<SolveOutcome, SchedError> {
        backend::solve(self)
    }
}

/// Raccourci : valide puis résout.
pub fn solve(input: &PlanningInput, options: SolverOptions) -> Result<SolveOutcome, SchedError> {
    ScheduleSolver::new(input, options)?.solve()
}

/// Liste les règles dures violées par `schedule`.
pub fn check_schedule(schedule: &Schedule, input: &PlanningInput) -> Vec<Violation> {
    conflicts::detect_violations(schedule, input)
}
