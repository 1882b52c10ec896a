use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::time::Duration;

/// Identifiant fort pour un membre du roulement
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WorkerId(String);

impl WorkerId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Type de créneau. L'ordre sert uniquement à l'itération.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ShiftKind {
    #[serde(rename = "D")]
    Day,
    #[serde(rename = "N")]
    Night,
    #[serde(rename = "B")]
    Backup,
}

impl ShiftKind {
    pub const ALL: [ShiftKind; 3] = [ShiftKind::Day, ShiftKind::Night, ShiftKind::Backup];

    pub fn index(self) -> usize {
        match self {
            ShiftKind::Day => 0,
            ShiftKind::Night => 1,
            ShiftKind::Backup => 2,
        }
    }

    pub fn code(self) -> char {
        match self {
            ShiftKind::Day => 'D',
            ShiftKind::Night => 'N',
            ShiftKind::Backup => 'B',
        }
    }

    /// Day et Night sont des astreintes principales ; Backup est secondaire.
    pub fn is_primary(self) -> bool {
        self != ShiftKind::Backup
    }
}

/// Étiquette d'une journée dans le roster décodé.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "char", try_from = "char")]
pub enum DayLabel {
    Shift(ShiftKind),
    /// Rien d'assigné, aucune restriction
    Rest,
    /// Jour non travaillé (`X`)
    Off,
    /// Jour sans créneau Day autorisé et rien d'assigné (`x`)
    NoDayShift,
}

impl DayLabel {
    pub fn symbol(self) -> char {
        match self {
            DayLabel::Shift(kind) => kind.code(),
            DayLabel::Rest => ' ',
            DayLabel::Off => 'X',
            DayLabel::NoDayShift => 'x',
        }
    }

    pub fn shift(self) -> Option<ShiftKind> {
        match self {
            DayLabel::Shift(kind) => Some(kind),
            _ => None,
        }
    }
}

impl From<DayLabel> for char {
    fn from(label: DayLabel) -> char {
        label.symbol()
    }
}

impl TryFrom<char> for DayLabel {
    type Error = String;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'D' => Ok(DayLabel::Shift(ShiftKind::Day)),
            'N' => Ok(DayLabel::Shift(ShiftKind::Night)),
            'B' => Ok(DayLabel::Shift(ShiftKind::Backup)),
            ' ' => Ok(DayLabel::Rest),
            'X' => Ok(DayLabel::Off),
            'x' => Ok(DayLabel::NoDayShift),
            other => Err(format!("unknown day label {other:?}")),
        }
    }
}

/// Poids de l'objectif. Aucune normalisation : les ordres de grandeur
/// relatifs fixent directement les priorités.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weights {
    #[serde(default)]
    pub consecutive: u32,
    #[serde(default)]
    pub equality: u32,
    #[serde(default)]
    pub max_consecutive: u32,
    #[serde(default)]
    pub variability: u32,
    #[serde(default)]
    pub perfection: u32,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            consecutive: 10,
            equality: 20,
            max_consecutive: 10,
            variability: 5,
            perfection: 5,
        }
    }
}

/// Options de résolution
#[derive(Debug, Clone, Copy)]
pub struct SolverOptions {
    pub weights: Weights,
    pub time_limit: Duration,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            weights: Weights::default(),
            time_limit: Duration::from_secs(30),
        }
    }
}

/// Entrée d'une résolution : équipe, horizon et disponibilités.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanningInput {
    pub workers: Vec<WorkerId>,
    /// Nombre de jours ; les jours vont de 1 à `days` inclus.
    pub days: u32,
    #[serde(default)]
    pub non_working_days: BTreeMap<WorkerId, BTreeSet<u32>>,
    #[serde(default)]
    pub no_day_shift: BTreeMap<WorkerId, BTreeSet<u32>>,
    /// Crédit de congés, utilisé uniquement pour ajuster les cibles d'équité.
    #[serde(default)]
    pub pto_credit: BTreeMap<WorkerId, i64>,
}

impl PlanningInput {
    pub fn new<I, S>(workers: I, days: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            workers: workers.into_iter().map(WorkerId::new).collect(),
            days,
            ..Self::default()
        }
    }

    pub fn with_non_working<I: IntoIterator<Item = u32>>(mut self, worker: &str, days: I) -> Self {
        self.non_working_days
            .entry(WorkerId::new(worker))
            .or_default()
            .extend(days);
        self
    }

    pub fn with_no_day_shift<I: IntoIterator<Item = u32>>(mut self, worker: &str, days: I) -> Self {
        self.no_day_shift
            .entry(WorkerId::new(worker))
            .or_default()
            .extend(days);
        self
    }

    pub fn with_pto_credit(mut self, worker: &str, credit: i64) -> Self {
        self.pto_credit.insert(WorkerId::new(worker), credit);
        self
    }

    pub fn is_non_working(&self, worker: &WorkerId, day: u32) -> bool {
        self.non_working_days
            .get(worker)
            .is_some_and(|set| set.contains(&day))
    }

    pub fn is_day_shift_restricted(&self, worker: &WorkerId, day: u32) -> bool {
        self.no_day_shift
            .get(worker)
            .is_some_and(|set| set.contains(&day))
    }

    pub fn pto_credit_of(&self, worker: &WorkerId) -> i64 {
        self.pto_credit.get(worker).copied().unwrap_or(0)
    }

    /// Nombre total de créneaux à couvrir sur l'horizon.
    pub fn total_slots(&self) -> i64 {
        i64::from(self.days) * ShiftKind::ALL.len() as i64
    }

    /// Cible d'équité globale (division entière).
    pub fn average_shifts(&self) -> i64 {
        match self.workers.len() as i64 {
            0 => 0,
            n => self.total_slots() / n,
        }
    }

    /// Cible d'équité par type de créneau (division entière).
    pub fn average_shifts_by_type(&self) -> i64 {
        self.average_shifts() / ShiftKind::ALL.len() as i64
    }
}

/// Compteurs par type pour un membre
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftCounts {
    pub day: u32,
    pub night: u32,
    pub backup: u32,
    pub total: u32,
}

impl ShiftCounts {
    pub fn record(&mut self, kind: ShiftKind) {
        match kind {
            ShiftKind::Day => self.day += 1,
            ShiftKind::Night => self.night += 1,
            ShiftKind::Backup => self.backup += 1,
        }
        self.total += 1;
    }

    pub fn of(&self, kind: ShiftKind) -> u32 {
        match kind {
            ShiftKind::Day => self.day,
            ShiftKind::Night => self.night,
            ShiftKind::Backup => self.backup,
        }
    }
}

/// Ligne du roster : une étiquette par jour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerSchedule {
    pub worker: WorkerId,
    pub labels: Vec<DayLabel>,
    pub counts: ShiftCounts,
}

impl WorkerSchedule {
    pub fn from_labels(worker: WorkerId, labels: Vec<DayLabel>) -> Self {
        let mut counts = ShiftCounts::default();
        for kind in labels.iter().filter_map(|l| l.shift()) {
            counts.record(kind);
        }
        Self {
            worker,
            labels,
            counts,
        }
    }

    /// Étiquette du jour `day` (1-based).
    pub fn label(&self, day: u32) -> Option<DayLabel> {
        let idx = usize::try_from(day).ok()?.checked_sub(1)?;
        self.labels.get(idx).copied()
    }

    pub fn shift_on(&self, day: u32) -> Option<ShiftKind> {
        self.label(day).and_then(DayLabel::shift)
    }
}

/// Roster décodé, lignes dans l'ordre des membres fourni en entrée.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Schedule {
    pub days: u32,
    pub rows: Vec<WorkerSchedule>,
}

impl Schedule {
    pub fn get(&self, worker: &WorkerId) -> Option<&WorkerSchedule> {
        self.rows.iter().find(|r| &r.worker == worker)
    }

    /// Membre tenant le créneau `kind` le jour `day`, s'il existe.
    pub fn holder(&self, day: u32, kind: ShiftKind) -> Option<&WorkerId> {
        self.rows
            .iter()
            .find(|r| r.shift_on(day) == Some(kind))
            .map(|r| &r.worker)
    }

    pub fn total_assigned(&self) -> u32 {
        self.rows.iter().map(|r| r.counts.total).sum()
    }
}

/// Créneau absolu dérivé du roster (lecture seule).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimetableEntry {
    pub worker: WorkerId,
    pub kind: ShiftKind,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub is_primary: bool,
}

impl TimetableEntry {
    pub fn start_iso(&self) -> String {
        self.start.to_rfc3339()
    }
    pub fn end_iso(&self) -> String {
        self.end.to_rfc3339()
    }
    /// Rendu court, ex. `Mon 01.01 08:00`.
    pub fn start_display(&self) -> String {
        self.start.format(DISPLAY_FORMAT).to_string()
    }
    pub fn end_display(&self) -> String {
        self.end.format(DISPLAY_FORMAT).to_string()
    }
}

const DISPLAY_FORMAT: &str = "%a %d.%m %H:%M";
