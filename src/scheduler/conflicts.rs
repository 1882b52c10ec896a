use super::{Violation, ViolationKind};
use crate::model::{DayLabel, PlanningInput, Schedule, ShiftKind, WorkerId};

/// Vérifie les règles dures sur un roster décodé (ou rechargé depuis disque).
pub(super) fn detect_violations(schedule: &Schedule, input: &PlanningInput) -> Vec<Violation> {
    let mut out = Vec::new();

    if schedule.days != input.days {
        out.push(shape(None, schedule.days));
    }
    for row in &schedule.rows {
        if !input.workers.contains(&row.worker) || row.labels.len() != input.days as usize {
            out.push(shape(Some(&row.worker), 0));
        }
    }
    if !out.is_empty() {
        return out;
    }

    for day in 1..=input.days {
        for kind in ShiftKind::ALL {
            let holders = schedule
                .rows
                .iter()
                .filter(|r| r.shift_on(day) == Some(kind))
                .count();
            let violation = match holders {
                1 => continue,
                0 => ViolationKind::Uncovered,
                _ => ViolationKind::DoubleCovered,
            };
            out.push(Violation {
                worker: None,
                day,
                kind: Some(kind),
                violation,
            });
        }
    }

    for row in &schedule.rows {
        let mut push = |day: u32, kind: ShiftKind, violation: ViolationKind| {
            out.push(Violation {
                worker: Some(row.worker.clone()),
                day,
                kind: Some(kind),
                violation,
            });
        };

        for (idx, label) in row.labels.iter().enumerate() {
            let day = idx as u32 + 1;
            let Some(kind) = label.shift() else {
                continue;
            };

            if input.is_non_working(&row.worker, day) {
                push(day, kind, ViolationKind::Unavailable);
            }
            if kind == ShiftKind::Day && input.is_day_shift_restricted(&row.worker, day) {
                push(day, kind, ViolationKind::DayShiftRestricted);
            }

            match (day.checked_sub(1).and_then(|d| row.shift_on(d)), kind) {
                (Some(ShiftKind::Night), ShiftKind::Day | ShiftKind::Night) => {
                    push(day, kind, ViolationKind::RestAfterNight)
                }
                (Some(ShiftKind::Backup), ShiftKind::Day) => {
                    push(day, kind, ViolationKind::RestAfterBackup)
                }
                _ => {}
            }

            if kind == ShiftKind::Backup && day >= 3 {
                let backups = row.labels[idx - 2..=idx]
                    .iter()
                    .filter(|l| **l == DayLabel::Shift(ShiftKind::Backup))
                    .count();
                if backups > 1 {
                    push(day, kind, ViolationKind::BackupRepetition);
                }
            }
        }
    }

    out
}

fn shape(worker: Option<&WorkerId>, day: u32) -> Violation {
    Violation {
        worker: worker.cloned(),
        day,
        kind: None,
        violation: ViolationKind::Shape,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WorkerSchedule;

    fn row(worker: &str, pattern: &str) -> WorkerSchedule {
        let labels = pattern
            .chars()
            .map(|c| DayLabel::try_from(c).unwrap())
            .collect();
        WorkerSchedule::from_labels(WorkerId::new(worker), labels)
    }

    fn schedule(rows: Vec<WorkerSchedule>) -> Schedule {
        let days = rows[0].labels.len() as u32;
        Schedule { days, rows }
    }

    #[test]
    fn clean_rotation_has_no_violation() {
        let input = PlanningInput::new(["a", "b", "c", "d"], 8);
        let s = schedule(vec![
            row("a", "DNB DNB "),
            row("b", "NB DNB D"),
            row("c", "B DNB DN"),
            row("d", " DNB DNB"),
        ]);
        assert!(detect_violations(&s, &input).is_empty());
    }

    #[test]
    fn detects_rest_and_coverage_problems() {
        let input = PlanningInput::new(["a", "b", "c"], 2);
        let s = schedule(vec![row("a", "ND"), row("b", "DN"), row("c", "B ")]);
        let found = detect_violations(&s, &input);

        assert!(found.iter().any(|v| v.violation == ViolationKind::RestAfterNight
            && v.worker == Some(WorkerId::new("a"))
            && v.day == 2));
        assert!(found.iter().any(|v| v.violation == ViolationKind::Uncovered
            && v.day == 2
            && v.kind == Some(ShiftKind::Backup)));
    }

    #[test]
    fn detects_availability_and_backup_repetition() {
        let input = PlanningInput::new(["a", "b", "c"], 3)
            .with_non_working("b", [1])
            .with_no_day_shift("c", [2]);
        let s = schedule(vec![row("a", "B B"), row("b", "NDN"), row("c", "DBD")]);
        let found = detect_violations(&s, &input);
        let kinds: Vec<_> = found.iter().map(|v| v.violation.clone()).collect();

        assert!(kinds.contains(&ViolationKind::Unavailable));
        assert!(kinds.contains(&ViolationKind::BackupRepetition));
        assert!(kinds.contains(&ViolationKind::RestAfterBackup));
    }

    #[test]
    fn shape_mismatch_short_circuits() {
        let input = PlanningInput::new(["a", "b", "c"], 3);
        let s = schedule(vec![row("a", "DN"), row("zz", "NB")]);
        let found = detect_violations(&s, &input);
        assert!(found.iter().all(|v| v.violation == ViolationKind::Shape));
        assert!(!found.is_empty());
    }
}
