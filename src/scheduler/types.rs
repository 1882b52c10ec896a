use super::score::ObjectiveBreakdown;
use crate::model::{Schedule, ShiftKind, WorkerId};
use thiserror::Error;

/// Résultat d'une résolution réussie
#[derive(Debug, Clone)]
pub struct Solved {
    pub schedule: Schedule,
    pub objective: ObjectiveBreakdown,
}

/// Issue d'une résolution. Les cas attendus sont des valeurs, pas des erreurs.
#[derive(Debug, Clone)]
pub enum SolveOutcome {
    /// Optimum prouvé
    Optimal(Solved),
    /// Budget de temps épuisé, meilleure solution trouvée
    Feasible(Solved),
    /// Contraintes dures insatisfaisables, ou aucune solution dans le budget
    Infeasible,
}

impl SolveOutcome {
    pub fn solved(&self) -> Option<&Solved> {
        match self {
            SolveOutcome::Optimal(s) | SolveOutcome::Feasible(s) => Some(s),
            SolveOutcome::Infeasible => None,
        }
    }

    pub fn schedule(&self) -> Option<&Schedule> {
        self.solved().map(|s| &s.schedule)
    }

    pub fn into_solved(self) -> Option<Solved> {
        match self {
            SolveOutcome::Optimal(s) | SolveOutcome::Feasible(s) => Some(s),
            SolveOutcome::Infeasible => None,
        }
    }

    pub fn is_optimal(&self) -> bool {
        matches!(self, SolveOutcome::Optimal(_))
    }

    pub fn status_str(&self) -> &'static str {
        match self {
            SolveOutcome::Optimal(_) => "optimal",
            SolveOutcome::Feasible(_) => "feasible",
            SolveOutcome::Infeasible => "infeasible",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// Aucun membre sur le créneau
    Uncovered,
    /// Plusieurs membres sur le même créneau
    DoubleCovered,
    /// Créneau assigné un jour non travaillé
    Unavailable,
    /// Day assigné un jour où il est exclu
    DayShiftRestricted,
    /// Day ou Night le lendemain d'une Night
    RestAfterNight,
    /// Day le lendemain d'un Backup
    RestAfterBackup,
    /// Plus d'un Backup sur trois jours consécutifs
    BackupRepetition,
    /// Roster incohérent avec l'entrée (membre inconnu, nombre de jours)
    Shape,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub worker: Option<WorkerId>,
    pub day: u32,
    pub kind: Option<ShiftKind>,
    pub violation: ViolationKind,
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("worker list is empty")]
    EmptyWorkers,
    #[error("duplicate worker: {0}")]
    DuplicateWorker(String),
    #[error("unknown worker: {0}")]
    UnknownWorker(String),
    #[error("planning horizon must contain at least one day")]
    NoDays,
    #[error("day {day} for worker {worker} is outside 1..={days}")]
    DayOutOfRange { worker: String, day: u32, days: u32 },
    #[error("negative days-off credit for worker {0}")]
    NegativeCredit(String),
    #[error("days-off credit {credit} for worker {worker} exceeds the {days} day(s) of the horizon")]
    CreditTooLarge { worker: String, credit: i64, days: u32 },
    #[error("time limit must be positive")]
    InvalidTimeLimit,
    #[error("invalid start hour {0}: expected 0..=23")]
    InvalidStartHour(u32),
    #[error("invalid utc offset {0}h: expected -23..=23")]
    InvalidUtcOffset(i32),
    #[error("invalid month {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },
    #[error("solver backend failed: {0}")]
    Backend(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
