//! Contraintes souples : variables de pénalité et objectif pondéré.

use super::grid::ShiftGrid;
use super::util::{overlimit_starts, window_starts, IDEAL_ROTATION, WORKLOAD_WINDOW};
use crate::model::{PlanningInput, ShiftKind, Weights};
use good_lp::{constraint, variable, Constraint, Expression, ProblemVariables};

/// Sommes non pondérées de chaque terme de l'objectif.
pub(super) struct PenaltyTerms {
    pub(super) total_deviation: Expression,
    pub(super) type_deviation: Expression,
    pub(super) overlimit: Expression,
    pub(super) max_consecutive: Expression,
    pub(super) same_shift: Expression,
    pub(super) ideal_penalty: Expression,
}

impl PenaltyTerms {
    pub(super) fn weighted(self, weights: &Weights) -> Expression {
        let eq = f64::from(weights.equality);
        self.total_deviation * eq
            + self.type_deviation * eq
            + self.overlimit * f64::from(weights.consecutive)
            + self.max_consecutive * f64::from(weights.max_consecutive)
            + self.same_shift * f64::from(weights.variability)
            + self.ideal_penalty * f64::from(weights.perfection)
    }
}

pub(super) fn build(
    vars: &mut ProblemVariables,
    grid: &ShiftGrid,
    input: &PlanningInput,
    out: &mut Vec<Constraint>,
) -> PenaltyTerms {
    let (total_deviation, type_deviation) = fairness(vars, grid, input, out);
    PenaltyTerms {
        total_deviation,
        type_deviation,
        overlimit: overlimit(vars, grid, out),
        max_consecutive: max_consecutive(vars, grid, out),
        same_shift: same_shift(vars, grid, out),
        ideal_penalty: ideal_pattern(vars, grid, out),
    }
}

fn window_workload(grid: &ShiftGrid, w: usize, start: u32) -> Expression {
    (start..start + WORKLOAD_WINDOW)
        .map(|day| grid.work(w, day))
        .sum()
}

/// `overlimit[w,d]` vaut 1 ssi les quatre jours `d..d+3` sont travaillés,
/// pour `d` dans `1..=N-4`.
fn overlimit(vars: &mut ProblemVariables, grid: &ShiftGrid, out: &mut Vec<Constraint>) -> Expression {
    let full = f64::from(WORKLOAD_WINDOW);
    let mut sum = Expression::from(0.0);
    for w in 0..grid.workers() {
        for start in overlimit_starts(grid.days()) {
            let flag = vars.add(variable().binary());
            let workload = window_workload(grid, w, start);
            out.push(constraint!(workload.clone() >= flag * full));
            out.push(constraint!(workload <= flag + (full - 1.0)));
            sum += flag;
        }
    }
    sum
}

/// Borne supérieure de la charge de toute fenêtre, pour tout membre.
fn max_consecutive(
    vars: &mut ProblemVariables,
    grid: &ShiftGrid,
    out: &mut Vec<Constraint>,
) -> Expression {
    let bound = vars.add(
        variable()
            .integer()
            .min(0.0)
            .max(f64::from(WORKLOAD_WINDOW))
            .name("max_consecutive"),
    );
    for w in 0..grid.workers() {
        for start in window_starts(grid.days(), WORKLOAD_WINDOW) {
            let workload = window_workload(grid, w, start);
            out.push(constraint!(workload <= bound));
        }
    }
    Expression::from(bound)
}

/// `same[w,d,s] = x[w,d-1,s] AND x[w,d,s]`.
fn same_shift(vars: &mut ProblemVariables, grid: &ShiftGrid, out: &mut Vec<Constraint>) -> Expression {
    let mut sum = Expression::from(0.0);
    for w in 0..grid.workers() {
        for day in 2..=grid.days() {
            for kind in ShiftKind::ALL {
                let a = grid.x(w, day - 1, kind);
                let b = grid.x(w, day, kind);
                let same = vars.add(variable().binary());
                out.push(constraint!(same <= a));
                out.push(constraint!(same <= b));
                out.push(constraint!(same + 1.0 >= a + b));
                sum += same;
            }
        }
    }
    sum
}

/// Pénalise chaque fenêtre de cinq jours qui ne suit pas la rotation
/// préférée. Renvoie `Σ (1 - ideal)`.
fn ideal_pattern(
    vars: &mut ProblemVariables,
    grid: &ShiftGrid,
    out: &mut Vec<Constraint>,
) -> Expression {
    let span = IDEAL_ROTATION.len() as u32;
    let mut windows = 0u32;
    let mut matched = Expression::from(0.0);
    for w in 0..grid.workers() {
        for start in window_starts(grid.days(), span) {
            let ideal = vars.add(variable().binary());
            let mut all = Expression::from(0.0);
            for (offset, step) in IDEAL_ROTATION.iter().enumerate() {
                let day = start + offset as u32;
                let term = match step {
                    Some(kind) => Expression::from(grid.x(w, day, *kind)),
                    None => grid.no_shift(w, day),
                };
                out.push(constraint!(ideal <= term.clone()));
                all += term;
            }
            out.push(constraint!(ideal + (f64::from(span) - 1.0) >= all));
            matched += ideal;
            windows += 1;
        }
    }
    Expression::from(f64::from(windows)) - matched
}

/// Écarts absolus aux cibles d'équité, ajustés par le crédit de congés.
/// Le crédit est réparti par division entière entre les trois types :
/// le reste est perdu.
fn fairness(
    vars: &mut ProblemVariables,
    grid: &ShiftGrid,
    input: &PlanningInput,
    out: &mut Vec<Constraint>,
) -> (Expression, Expression) {
    let avg = input.average_shifts();
    let avg_by_type = input.average_shifts_by_type();
    let kinds = ShiftKind::ALL.len() as i64;

    let mut total_sum = Expression::from(0.0);
    let mut type_sum = Expression::from(0.0);
    for (w, worker) in input.workers.iter().enumerate() {
        let credit = input.pto_credit_of(worker);
        let dev = abs_deviation(vars, grid.total(w), credit, avg, out);
        total_sum += dev;

        for kind in ShiftKind::ALL {
            let dev = abs_deviation(vars, grid.count(w, kind), credit / kinds, avg_by_type, out);
            type_sum += dev;
        }
    }
    (total_sum, type_sum)
}

/// `dev ≥ |actual + credit - target|`, minimisé par l'objectif.
fn abs_deviation(
    vars: &mut ProblemVariables,
    actual: Expression,
    credit: i64,
    target: i64,
    out: &mut Vec<Constraint>,
) -> Expression {
    let dev = vars.add(variable().integer().min(0.0));
    let offset = (credit - target) as f64;
    out.push(constraint!(dev >= actual.clone() + offset));
    out.push(constraint!(dev + actual + offset >= 0.0));
    Expression::from(dev)
}
