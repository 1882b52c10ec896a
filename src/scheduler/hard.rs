use super::grid::ShiftGrid;
use crate::model::{PlanningInput, ShiftKind};
use good_lp::{constraint, Constraint, Expression};

/// Chaque créneau de chaque jour est tenu par exactement un membre.
pub(super) fn coverage(grid: &ShiftGrid, out: &mut Vec<Constraint>) {
    for day in 1..=grid.days() {
        for kind in ShiftKind::ALL {
            let holders: Expression = (0..grid.workers()).map(|w| grid.x(w, day, kind)).sum();
            out.push(constraint!(holders == 1.0));
        }
    }
}

/// Au plus un créneau par membre et par jour.
pub(super) fn one_shift_per_day(grid: &ShiftGrid, out: &mut Vec<Constraint>) {
    for w in 0..grid.workers() {
        for day in 1..=grid.days() {
            let work = grid.work(w, day);
            out.push(constraint!(work <= 1.0));
        }
    }
}

pub(super) fn availability(grid: &ShiftGrid, input: &PlanningInput, out: &mut Vec<Constraint>) {
    for (w, worker) in input.workers.iter().enumerate() {
        for day in 1..=grid.days() {
            if input.is_non_working(worker, day) {
                for kind in ShiftKind::ALL {
                    let x = grid.x(w, day, kind);
                    out.push(constraint!(x == 0.0));
                }
            }
            if input.is_day_shift_restricted(worker, day) {
                let x = grid.x(w, day, ShiftKind::Day);
                out.push(constraint!(x == 0.0));
            }
        }
    }
}

/// Pas de Day ni de Night après une Night, pas de Day après un Backup.
pub(super) fn rest_after_night(grid: &ShiftGrid, out: &mut Vec<Constraint>) {
    const FORBIDDEN: [(ShiftKind, ShiftKind); 3] = [
        (ShiftKind::Night, ShiftKind::Day),
        (ShiftKind::Night, ShiftKind::Night),
        (ShiftKind::Backup, ShiftKind::Day),
    ];
    for w in 0..grid.workers() {
        for day in 2..=grid.days() {
            for (before, after) in FORBIDDEN {
                let prev = grid.x(w, day - 1, before);
                let next = grid.x(w, day, after);
                out.push(constraint!(prev + next <= 1.0));
            }
        }
    }
}

/// Au plus un Backup sur toute fenêtre de trois jours.
pub(super) fn backup_repetition(grid: &ShiftGrid, out: &mut Vec<Constraint>) {
    for w in 0..grid.workers() {
        for day in 3..=grid.days() {
            let backups: Expression = (day - 2..=day)
                .map(|d| grid.x(w, d, ShiftKind::Backup))
                .sum();
            out.push(constraint!(backups <= 1.0));
        }
    }
}

/// Condition nécessaire vérifiée avant de construire le modèle : chaque jour
/// demande trois membres disponibles distincts, dont un autorisé en Day.
pub(super) fn capacity_shortfall(input: &PlanningInput) -> Option<String> {
    let needed = ShiftKind::ALL.len();
    for day in 1..=input.days {
        let available: Vec<_> = input
            .workers
            .iter()
            .filter(|w| !input.is_non_working(w, day))
            .collect();
        if available.len() < needed {
            return Some(format!(
                "day {day}: {} worker(s) available, {needed} required",
                available.len()
            ));
        }
        if available
            .iter()
            .all(|w| input.is_day_shift_restricted(w, day))
        {
            return Some(format!("day {day}: nobody may take the Day shift"));
        }
    }
    None
}
