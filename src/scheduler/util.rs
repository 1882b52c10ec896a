use super::SchedError;
use crate::model::{PlanningInput, ShiftKind, SolverOptions, WorkerId};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::ops::RangeInclusive;

/// Taille de la fenêtre glissante de charge (jours).
pub(crate) const WORKLOAD_WINDOW: u32 = 4;

/// Rotation préférée : Day, Night, repos, Backup, repos (`None` = repos).
pub(crate) const IDEAL_ROTATION: [Option<ShiftKind>; 5] = [
    Some(ShiftKind::Day),
    Some(ShiftKind::Night),
    None,
    Some(ShiftKind::Backup),
    None,
];

/// Premiers jours des fenêtres complètes de `len` jours dans `1..=days`.
pub(crate) fn window_starts(days: u32, len: u32) -> RangeInclusive<u32> {
    if len == 0 || days < len {
        // plage vide
        return 1..=0;
    }
    1..=days - len + 1
}

/// Fenêtres de 4 jours pénalisées par `overlimit` : la dernière fenêtre
/// complète du mois n'en fait pas partie.
pub(crate) fn overlimit_starts(days: u32) -> RangeInclusive<u32> {
    1..=days.saturating_sub(WORKLOAD_WINDOW)
}

pub(super) fn validate(input: &PlanningInput, opts: &SolverOptions) -> Result<(), SchedError> {
    if input.workers.is_empty() {
        return Err(SchedError::EmptyWorkers);
    }
    if input.days == 0 {
        return Err(SchedError::NoDays);
    }
    if opts.time_limit.is_zero() {
        return Err(SchedError::InvalidTimeLimit);
    }

    let mut seen = HashSet::new();
    for w in &input.workers {
        if !seen.insert(w) {
            return Err(SchedError::DuplicateWorker(w.as_str().to_string()));
        }
    }

    check_day_sets(&input.non_working_days, &seen, input.days)?;
    check_day_sets(&input.no_day_shift, &seen, input.days)?;

    for (worker, credit) in &input.pto_credit {
        if !seen.contains(worker) {
            return Err(SchedError::UnknownWorker(worker.as_str().to_string()));
        }
        if *credit < 0 {
            return Err(SchedError::NegativeCredit(worker.as_str().to_string()));
        }
        if *credit > i64::from(input.days) {
            return Err(SchedError::CreditTooLarge {
                worker: worker.as_str().to_string(),
                credit: *credit,
                days: input.days,
            });
        }
    }
    Ok(())
}

fn check_day_sets(
    sets: &BTreeMap<WorkerId, BTreeSet<u32>>,
    known: &HashSet<&WorkerId>,
    days: u32,
) -> Result<(), SchedError> {
    for (worker, set) in sets {
        if !known.contains(worker) {
            return Err(SchedError::UnknownWorker(worker.as_str().to_string()));
        }
        if let Some(&day) = set.iter().find(|d| !(1..=days).contains(*d)) {
            return Err(SchedError::DayOutOfRange {
                worker: worker.as_str().to_string(),
                day,
                days,
            });
        }
    }
    Ok(())
}
