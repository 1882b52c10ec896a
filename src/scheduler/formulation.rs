use super::grid::ShiftGrid;
use super::{hard, penalties};
use crate::model::{PlanningInput, Weights};
use good_lp::{Constraint, Expression, ProblemVariables};

/// Univers de variables et contraintes d'une résolution. Reconstruit à
/// chaque appel, jamais partagé.
pub(super) struct Formulation {
    pub(super) vars: ProblemVariables,
    pub(super) grid: ShiftGrid,
    pub(super) constraints: Vec<Constraint>,
    pub(super) objective: Expression,
}

impl Formulation {
    pub(super) fn build(input: &PlanningInput, weights: &Weights) -> Self {
        let mut vars = ProblemVariables::new();
        let grid = ShiftGrid::allocate(&mut vars, input);
        let mut constraints = Vec::new();

        hard::coverage(&grid, &mut constraints);
        hard::one_shift_per_day(&grid, &mut constraints);
        hard::availability(&grid, input, &mut constraints);
        hard::rest_after_night(&grid, &mut constraints);
        hard::backup_repetition(&grid, &mut constraints);
        let hard_count = constraints.len();

        let objective = penalties::build(&mut vars, &grid, input, &mut constraints).weighted(weights);

        tracing::debug!(
            workers = grid.workers(),
            days = grid.days(),
            hard = hard_count,
            soft = constraints.len() - hard_count,
            "constraint model built"
        );

        Self {
            vars,
            grid,
            constraints,
            objective,
        }
    }
}
