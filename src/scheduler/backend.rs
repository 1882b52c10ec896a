use super::formulation::Formulation;
use super::score::ObjectiveBreakdown;
use super::{conflicts, decode, hard, SchedError, ScheduleSolver, SolveOutcome, Solved};
use crate::model::{PlanningInput, Schedule, Weights};
use good_lp::solvers::highs::highs;
use good_lp::solvers::SolutionStatus;
use good_lp::{ResolutionError, Solution, SolverModel};
use std::time::Instant;

pub(super) fn solve(solver: &ScheduleSolver<'_>) -> Result<SolveOutcome, SchedError> {
    let input = solver.input;
    let opts = solver.options;

    if let Some(reason) = hard::capacity_shortfall(input) {
        tracing::info!(%reason, "coverage impossible, backend not invoked");
        return Ok(SolveOutcome::Infeasible);
    }

    let Formulation {
        vars,
        grid,
        constraints,
        objective,
    } = Formulation::build(input, &opts.weights);

    // écart relatif nul : `Optimal` signifie réellement prouvé optimal
    let mut problem = vars
        .minimise(objective)
        .using(highs)
        .set_option("time_limit", opts.time_limit.as_secs_f64())
        .set_option("mip_rel_gap", 0.0);
    for c in constraints {
        problem.add_constraint(c);
    }

    let started = Instant::now();
    let solution = match problem.solve() {
        Ok(solution) => solution,
        Err(err) => {
            let outcome = failure_outcome(err);
            if outcome.is_ok() {
                tracing::warn!(elapsed = ?started.elapsed(), "no feasible schedule found");
            }
            return outcome;
        }
    };

    let schedule = decode::decode(&solution, &grid, input);
    let outcome = finish(schedule, input, &opts.weights, is_proven(solution.status()));
    tracing::info!(
        status = outcome.status_str(),
        objective = outcome.solved().map(|s| s.objective.total),
        elapsed = ?started.elapsed(),
        "solve finished"
    );
    Ok(outcome)
}

/// Échec du backend. Infaisabilité prouvée et limite de temps sans solution
/// réalisable donnent toutes deux `Infeasible`.
fn failure_outcome(err: ResolutionError) -> Result<SolveOutcome, SchedError> {
    match err {
        ResolutionError::Infeasible | ResolutionError::Other("NoSolutionFound") => {
            Ok(SolveOutcome::Infeasible)
        }
        other => Err(SchedError::Backend(other.to_string())),
    }
}

fn is_proven(status: SolutionStatus) -> bool {
    matches!(status, SolutionStatus::Optimal | SolutionStatus::GapLimit)
}

/// Vérifie le roster décodé puis calcule son score.
fn finish(schedule: Schedule, input: &PlanningInput, weights: &Weights, proven: bool) -> SolveOutcome {
    let violations = conflicts::detect_violations(&schedule, input);
    if !violations.is_empty() {
        tracing::warn!(
            violations = violations.len(),
            "decoded schedule breaks hard rules, discarded"
        );
        return SolveOutcome::Infeasible;
    }

    let objective = ObjectiveBreakdown::evaluate(&schedule, input, weights);
    let solved = Solved {
        schedule,
        objective,
    };
    if proven {
        SolveOutcome::Optimal(solved)
    } else {
        SolveOutcome::Feasible(solved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DayLabel, WorkerId, WorkerSchedule};

    fn row(worker: &str, pattern: &str) -> WorkerSchedule {
        let labels = pattern
            .chars()
            .map(|c| DayLabel::try_from(c).unwrap())
            .collect();
        WorkerSchedule::from_labels(WorkerId::new(worker), labels)
    }

    #[test]
    fn timeout_without_incumbent_reads_as_infeasible() {
        let outcome = failure_outcome(ResolutionError::Other("NoSolutionFound")).unwrap();
        assert!(matches!(outcome, SolveOutcome::Infeasible));

        let outcome = failure_outcome(ResolutionError::Infeasible).unwrap();
        assert!(matches!(outcome, SolveOutcome::Infeasible));

        let err = failure_outcome(ResolutionError::Unbounded).unwrap_err();
        assert!(matches!(err, SchedError::Backend(_)));
    }

    #[test]
    fn gap_limit_counts_as_proven() {
        assert!(is_proven(SolutionStatus::Optimal));
        assert!(is_proven(SolutionStatus::GapLimit));
        assert!(!is_proven(SolutionStatus::TimeLimit));
    }

    #[test]
    fn broken_incumbent_is_discarded() {
        let input = PlanningInput::new(["a", "b", "c"], 2);
        // a enchaîne deux nuits, c deux Backup
        let schedule = Schedule {
            days: 2,
            rows: vec![row("a", "NN"), row("b", "DD"), row("c", "BB")],
        };
        let outcome = finish(schedule, &input, &Weights::default(), true);
        assert!(matches!(outcome, SolveOutcome::Infeasible));
    }

    #[test]
    fn clean_incumbent_keeps_its_status() {
        let input = PlanningInput::new(["a", "b", "c"], 2);
        let schedule = Schedule {
            days: 2,
            rows: vec![row("a", "DD"), row("b", "NB"), row("c", "BN")],
        };
        let proven = finish(schedule.clone(), &input, &Weights::default(), true);
        assert!(proven.is_optimal());
        let bounded = finish(schedule.clone(), &input, &Weights::default(), false);
        assert!(matches!(&bounded, SolveOutcome::Feasible(s) if s.schedule == schedule));
    }
}
