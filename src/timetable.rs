//! Projection du roster en créneaux horodatés.

use crate::model::{Schedule, ShiftKind, TimetableEntry};
use crate::scheduler::SchedError;
use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, TimeZone};

/// Durée d'un créneau, Day comme Night/Backup.
pub const SHIFT_HOURS: i64 = 12;

/// Nombre de jours du mois `year-month`.
pub fn days_in_month(year: i32, month: u32) -> Result<u32, SchedError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(SchedError::InvalidMonth { year, month })?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or(SchedError::InvalidMonth { year, month })?;
    Ok(next.signed_duration_since(first).num_days() as u32)
}

/// Convertit un roster en intervalles absolus avec un décalage UTC fixe.
#[derive(Debug, Clone, Copy)]
pub struct TimetableProjector {
    month_start: DateTime<FixedOffset>,
}

impl TimetableProjector {
    pub fn new(
        year: i32,
        month: u32,
        start_hour: u32,
        utc_offset_hours: i32,
    ) -> Result<Self, SchedError> {
        if start_hour > 23 {
            return Err(SchedError::InvalidStartHour(start_hour));
        }
        let offset = (-23..=23)
            .contains(&utc_offset_hours)
            .then(|| FixedOffset::east_opt(utc_offset_hours * 3600))
            .flatten()
            .ok_or(SchedError::InvalidUtcOffset(utc_offset_hours))?;
        let month_start = NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|d| d.and_hms_opt(start_hour, 0, 0))
            .and_then(|naive| offset.from_local_datetime(&naive).single())
            .ok_or(SchedError::InvalidMonth { year, month })?;
        Ok(Self { month_start })
    }

    /// Début du créneau Day du premier jour du mois.
    pub fn month_start(&self) -> DateTime<FixedOffset> {
        self.month_start
    }

    pub fn year(&self) -> i32 {
        self.month_start.year()
    }

    pub fn month(&self) -> u32 {
        self.month_start.month()
    }

    /// Début du créneau `kind` le jour `day` (1-based). Night et Backup
    /// commencent douze heures après Day.
    pub fn shift_start(&self, day: u32, kind: ShiftKind) -> DateTime<FixedOffset> {
        let start = self.month_start + Duration::days(i64::from(day) - 1);
        match kind {
            ShiftKind::Day => start,
            ShiftKind::Night | ShiftKind::Backup => start + Duration::hours(SHIFT_HOURS),
        }
    }

    /// Un créneau par jour assigné, triés par début (tri stable : ordre des
    /// membres puis des jours à égalité).
    pub fn project(&self, schedule: &Schedule) -> Vec<TimetableEntry> {
        let mut entries: Vec<TimetableEntry> = schedule
            .rows
            .iter()
            .flat_map(|row| {
                row.labels.iter().enumerate().filter_map(move |(idx, label)| {
                    let kind = label.shift()?;
                    let start = self.shift_start(idx as u32 + 1, kind);
                    Some(TimetableEntry {
                        worker: row.worker.clone(),
                        kind,
                        start,
                        end: start + Duration::hours(SHIFT_HOURS),
                        is_primary: kind.is_primary(),
                    })
                })
            })
            .collect();
        entries.sort_by_key(|e| e.start);
        entries
    }
}
