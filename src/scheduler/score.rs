use super::util::{overlimit_starts, window_starts, IDEAL_ROTATION, WORKLOAD_WINDOW};
use crate::model::{PlanningInput, Schedule, ShiftKind, Weights, WorkerSchedule};
use serde::Serialize;

/// Valeur de chaque terme de l'objectif pour un roster concret.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ObjectiveBreakdown {
    pub total_deviation: i64,
    pub type_deviation: i64,
    pub overlimit_windows: i64,
    pub max_consecutive: i64,
    pub repeated_shifts: i64,
    pub imperfect_windows: i64,
    /// Somme pondérée, identique à l'objectif du modèle
    pub total: i64,
}

impl ObjectiveBreakdown {
    pub fn evaluate(schedule: &Schedule, input: &PlanningInput, weights: &Weights) -> Self {
        let avg = input.average_shifts();
        let avg_by_type = input.average_shifts_by_type();
        let kinds = ShiftKind::ALL.len() as i64;

        let mut b = Self::default();
        for row in &schedule.rows {
            let credit = input.pto_credit_of(&row.worker);
            b.total_deviation += deviation(row.counts.total, credit, avg);
            b.type_deviation += ShiftKind::ALL
                .iter()
                .map(|&k| deviation(row.counts.of(k), credit / kinds, avg_by_type))
                .sum::<i64>();

            b.overlimit_windows += overlimit_starts(schedule.days)
                .filter(|&start| workload(row, start) >= i64::from(WORKLOAD_WINDOW))
                .count() as i64;
            for start in window_starts(schedule.days, WORKLOAD_WINDOW) {
                b.max_consecutive = b.max_consecutive.max(workload(row, start));
            }

            b.repeated_shifts += (2..=schedule.days)
                .filter(|&d| {
                    matches!(row.shift_on(d), Some(k) if row.shift_on(d - 1) == Some(k))
                })
                .count() as i64;

            b.imperfect_windows += window_starts(schedule.days, IDEAL_ROTATION.len() as u32)
                .filter(|&start| !follows_rotation(row, start))
                .count() as i64;
        }

        b.total = [
            (weights.equality, b.total_deviation),
            (weights.equality, b.type_deviation),
            (weights.consecutive, b.overlimit_windows),
            (weights.max_consecutive, b.max_consecutive),
            (weights.variability, b.repeated_shifts),
            (weights.perfection, b.imperfect_windows),
        ]
        .iter()
        .fold(0i64, |acc, &(weight, value)| {
            acc.saturating_add(i64::from(weight).saturating_mul(value))
        });
        b
    }
}

/// `|actual + credit - target|`, saturé pour un crédit non validé.
fn deviation(actual: u32, credit: i64, target: i64) -> i64 {
    i64::from(actual)
        .saturating_add(credit)
        .saturating_sub(target)
        .saturating_abs()
}

fn workload(row: &WorkerSchedule, start: u32) -> i64 {
    (start..start + WORKLOAD_WINDOW)
        .filter(|&d| row.shift_on(d).is_some())
        .count() as i64
}

fn follows_rotation(row: &WorkerSchedule, start: u32) -> bool {
    IDEAL_ROTATION
        .iter()
        .enumerate()
        .all(|(offset, step)| row.shift_on(start + offset as u32) == *step)
}
