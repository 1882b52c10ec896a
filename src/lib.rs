#![forbid(unsafe_code)]
//! Roulement — génération d'un planning mensuel Jour / Nuit / Backup.
//!
//! - Modèle MILP (HiGHS via `good_lp`) : couverture, repos, disponibilités.
//! - Objectif pondéré : équité, charge glissante, variété, rotation préférée.
//! - Projection en créneaux horodatés avec décalage UTC fixe.
//! - Fichier de planification JSON ; exports JSON/CSV/Markdown hors du cœur.

pub mod config;
pub mod io;
pub mod model;
pub mod report;
pub mod scheduler;
pub mod timetable;

pub use config::Config;
pub use model::{
    DayLabel, PlanningInput, Schedule, ShiftCounts, ShiftKind, SolverOptions, TimetableEntry,
    Weights, WorkerId, WorkerSchedule,
};
pub use report::{render_timetable_markdown, MarkdownRoster, RosterRenderer, TextRoster};
pub use scheduler::{
    check_schedule, solve, ObjectiveBreakdown, SchedError, ScheduleSolver, SolveOutcome, Solved,
    Violation, ViolationKind,
};
pub use timetable::{days_in_month, TimetableProjector};
