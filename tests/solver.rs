#![forbid(unsafe_code)]
use roulement::{
    check_schedule, solve, DayLabel, PlanningInput, SchedError, Schedule, ShiftKind,
    SolveOutcome, SolverOptions, Weights, WorkerId,
};
use std::time::Duration;

fn options(weights: Weights, secs: u64) -> SolverOptions {
    SolverOptions {
        weights,
        time_limit: Duration::from_secs(secs),
    }
}

fn equality_only() -> Weights {
    Weights {
        consecutive: 0,
        equality: 1,
        max_consecutive: 0,
        variability: 0,
        perfection: 0,
    }
}

fn assert_rest_rules(schedule: &Schedule) {
    for row in &schedule.rows {
        for day in 2..=schedule.days {
            let prev = row.shift_on(day - 1);
            let cur = row.shift_on(day);
            if prev == Some(ShiftKind::Night) {
                assert!(
                    !matches!(cur, Some(ShiftKind::Day | ShiftKind::Night)),
                    "{} works {:?} after a night on day {}",
                    row.worker,
                    cur,
                    day
                );
            }
            if prev == Some(ShiftKind::Backup) {
                assert_ne!(cur, Some(ShiftKind::Day), "{} day {}", row.worker, day);
            }
        }
        for day in 3..=schedule.days {
            let backups = (day - 2..=day)
                .filter(|&d| row.shift_on(d) == Some(ShiftKind::Backup))
                .count();
            assert!(backups <= 1, "{} backups around day {}", row.worker, day);
        }
    }
}

fn assert_coverage(schedule: &Schedule) {
    for day in 1..=schedule.days {
        for kind in ShiftKind::ALL {
            let holders = schedule
                .rows
                .iter()
                .filter(|r| r.shift_on(day) == Some(kind))
                .count();
            assert_eq!(holders, 1, "day {day} {kind:?}");
        }
    }
}

#[test]
fn equal_split_when_only_fairness_counts() {
    let input = PlanningInput::new(["W1", "W2", "W3", "W4"], 8);
    let outcome = solve(&input, options(equality_only(), 30)).unwrap();

    let solved = match outcome {
        SolveOutcome::Optimal(solved) => solved,
        other => panic!("expected optimal, got {}", other.status_str()),
    };
    let totals: Vec<u32> = solved.schedule.rows.iter().map(|r| r.counts.total).collect();
    let max = totals.iter().max().unwrap();
    let min = totals.iter().min().unwrap();
    assert!(max - min <= 1, "totals {totals:?}");
    assert_eq!(solved.schedule.total_assigned(), 24);
    // une rotation D N B _ décalée donne 2/2/2 à chacun
    assert_eq!(solved.objective.total, 0);
    assert!(check_schedule(&solved.schedule, &input).is_empty());
}

#[test]
fn hard_rules_hold_with_restrictions() {
    let input = PlanningInput::new(["W1", "W2", "W3", "W4", "W5"], 10)
        .with_non_working("W1", [1, 5])
        .with_non_working("W4", [8, 9, 10])
        .with_no_day_shift("W2", [2, 7])
        .with_no_day_shift("W5", [3])
        .with_pto_credit("W4", 3);
    let outcome = solve(&input, options(Weights::default(), 20)).unwrap();
    let schedule = outcome.schedule().expect("instance admits a rotation");

    assert!(check_schedule(schedule, &input).is_empty());
    assert_coverage(schedule);
    assert_rest_rules(schedule);
    assert_eq!(schedule.total_assigned(), 30);
    assert_eq!(
        schedule.rows.iter().map(|r| r.counts.total).sum::<u32>(),
        input.days * 3
    );

    let w1 = schedule.get(&WorkerId::new("W1")).unwrap();
    assert_eq!(w1.label(1), Some(DayLabel::Off));
    assert_eq!(w1.label(5), Some(DayLabel::Off));
    let w4 = schedule.get(&WorkerId::new("W4")).unwrap();
    assert!((8..=10).all(|d| w4.label(d) == Some(DayLabel::Off)));
    let w2 = schedule.get(&WorkerId::new("W2")).unwrap();
    assert_ne!(w2.shift_on(2), Some(ShiftKind::Day));
    assert_ne!(w2.shift_on(7), Some(ShiftKind::Day));
    if w2.shift_on(2).is_none() {
        assert_eq!(w2.label(2), Some(DayLabel::NoDayShift));
    }
}

#[test]
fn more_time_never_worsens_the_objective() {
    let input = PlanningInput::new(["W1", "W2", "W3", "W4"], 8);
    let short = solve(&input, options(Weights::default(), 1)).unwrap();
    let long = solve(&input, options(Weights::default(), 20)).unwrap();

    let long_total = long.solved().expect("20s is plenty").objective.total;
    if let Some(short) = short.solved() {
        assert!(long_total <= short.objective.total);
    }
    if short.is_optimal() && long.is_optimal() {
        assert_eq!(short.solved().unwrap().objective.total, long_total);
    }
}

#[test]
fn tiny_time_limit_never_surfaces_as_an_error() {
    let input = PlanningInput::new(["W1", "W2", "W3", "W4"], 31);
    let opts = SolverOptions {
        weights: Weights::default(),
        time_limit: Duration::from_millis(1),
    };
    let outcome = solve(&input, opts).expect("a timeout is an outcome, not an error");
    match outcome.schedule() {
        Some(schedule) => assert!(check_schedule(schedule, &input).is_empty()),
        None => assert!(matches!(outcome, SolveOutcome::Infeasible)),
    }
}

#[test]
fn single_worker_fully_off_is_infeasible() {
    let input = PlanningInput::new(["W1"], 2).with_non_working("W1", [1, 2]);
    let outcome = solve(&input, options(Weights::default(), 5)).unwrap();
    assert!(matches!(outcome, SolveOutcome::Infeasible));
    assert!(outcome.schedule().is_none());
}

#[test]
fn two_workers_cannot_hold_three_daily_slots() {
    let weights = Weights {
        consecutive: 1,
        equality: 1,
        max_consecutive: 1,
        variability: 1,
        perfection: 1,
    };
    let input = PlanningInput::new(["W1", "W2"], 4);
    let outcome = solve(&input, options(weights, 5)).unwrap();
    assert!(matches!(outcome, SolveOutcome::Infeasible));
}

#[test]
fn malformed_input_is_rejected_eagerly() {
    let input = PlanningInput::new(["W1", "W2", "W3"], 5).with_non_working("W2", [6]);
    let err = solve(&input, SolverOptions::default()).unwrap_err();
    assert!(matches!(err, SchedError::DayOutOfRange { day: 6, days: 5, .. }));
}
