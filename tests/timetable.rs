#![forbid(unsafe_code)]
use roulement::{DayLabel, Schedule, ShiftKind, TimetableProjector, WorkerId, WorkerSchedule};

fn row(worker: &str, pattern: &str) -> WorkerSchedule {
    let labels = pattern
        .chars()
        .map(|c| DayLabel::try_from(c).unwrap())
        .collect();
    WorkerSchedule::from_labels(WorkerId::new(worker), labels)
}

#[test]
fn single_day_shift_projection() {
    let schedule = Schedule {
        days: 1,
        rows: vec![row("W1", "D")],
    };
    let projector = TimetableProjector::new(2024, 1, 8, 0).unwrap();
    let entries = projector.project(&schedule);

    assert_eq!(entries.len(), 1);
    let e = &entries[0];
    assert_eq!(e.worker, WorkerId::new("W1"));
    assert_eq!(e.start_iso(), "2024-01-01T08:00:00+00:00");
    assert_eq!(e.end_iso(), "2024-01-01T20:00:00+00:00");
    assert!(e.is_primary);
    assert_eq!(e.start_display(), "Mon 01.01 08:00");
}

#[test]
fn entries_are_sorted_and_ties_keep_worker_order() {
    let schedule = Schedule {
        days: 3,
        rows: vec![row("A", "  N"), row("B", "DX "), row("C", "B D"), row("D", "N  ")],
    };
    let projector = TimetableProjector::new(2024, 5, 7, 2).unwrap();
    let entries = projector.project(&schedule);

    let order: Vec<(&str, ShiftKind)> = entries
        .iter()
        .map(|e| (e.worker.as_str(), e.kind))
        .collect();
    assert_eq!(
        order,
        vec![
            ("B", ShiftKind::Day),
            ("C", ShiftKind::Backup),
            ("D", ShiftKind::Night),
            ("C", ShiftKind::Day),
            ("A", ShiftKind::Night),
        ]
    );
    assert!(entries.windows(2).all(|w| w[0].start <= w[1].start));

    let backup = &entries[1];
    assert!(!backup.is_primary);
    assert_eq!(backup.start_iso(), "2024-05-01T19:00:00+02:00");
    assert_eq!(backup.end_iso(), "2024-05-02T07:00:00+02:00");
}

#[test]
fn unassigned_days_produce_nothing() {
    let schedule = Schedule {
        days: 4,
        rows: vec![row("A", "Xx  ")],
    };
    let projector = TimetableProjector::new(2024, 2, 9, 0).unwrap();
    assert!(projector.project(&schedule).is_empty());
}
