use super::grid::ShiftGrid;
use crate::model::{DayLabel, PlanningInput, Schedule, ShiftKind, WorkerId, WorkerSchedule};
use good_lp::Solution;

pub(super) fn decode<S: Solution>(solution: &S, grid: &ShiftGrid, input: &PlanningInput) -> Schedule {
    let rows = input
        .workers
        .iter()
        .enumerate()
        .map(|(w, worker)| {
            let labels = (1..=grid.days())
                .map(|day| {
                    let assigned = ShiftKind::ALL
                        .into_iter()
                        .find(|&kind| solution.value(grid.x(w, day, kind)) > 0.5);
                    label_for(assigned, input, worker, day)
                })
                .collect();
            WorkerSchedule::from_labels(worker.clone(), labels)
        })
        .collect();

    Schedule {
        days: grid.days(),
        rows,
    }
}

/// Un créneau assigné prime ; sinon `X` pour un jour non travaillé, `x` pour
/// un jour sans Day autorisé, repos sinon.
pub(super) fn label_for(
    assigned: Option<ShiftKind>,
    input: &PlanningInput,
    worker: &WorkerId,
    day: u32,
) -> DayLabel {
    match assigned {
        Some(kind) => DayLabel::Shift(kind),
        None if input.is_non_working(worker, day) => DayLabel::Off,
        None if input.is_day_shift_restricted(worker, day) => DayLabel::NoDayShift,
        None => DayLabel::Rest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assigned_shift_wins_over_restrictions() {
        let input = PlanningInput::new(["a", "b", "c"], 3)
            .with_non_working("a", [1])
            .with_no_day_shift("a", [1, 2]);
        let a = WorkerId::new("a");

        assert_eq!(label_for(None, &input, &a, 1), DayLabel::Off);
        assert_eq!(label_for(None, &input, &a, 2), DayLabel::NoDayShift);
        assert_eq!(label_for(None, &input, &a, 3), DayLabel::Rest);
        assert_eq!(
            label_for(Some(ShiftKind::Night), &input, &a, 2),
            DayLabel::Shift(ShiftKind::Night)
        );
    }
}
