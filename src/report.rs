use crate::model::{Schedule, TimetableEntry, WorkerSchedule};
use std::fmt::Write as _;

/// Permet de customiser le rendu du roster (console, Markdown, etc.).
pub trait RosterRenderer {
    fn render(&self, schedule: &Schedule) -> String;
}

/// Une ligne par membre : `W1  D|N| |B  D:1, N:1, B:1, T:3`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextRoster;

impl RosterRenderer for TextRoster {
    fn render(&self, schedule: &Schedule) -> String {
        let width = schedule
            .rows
            .iter()
            .map(|r| r.worker.as_str().chars().count())
            .max()
            .unwrap_or(0);
        let mut out = String::new();
        for row in &schedule.rows {
            let days: Vec<String> = row.labels.iter().map(|l| l.symbol().to_string()).collect();
            let _ = writeln!(
                out,
                "{:<width$}  {}  {}",
                row.worker.as_str(),
                days.join("|"),
                counts(row)
            );
        }
        out
    }
}

/// Tableau Markdown : une colonne par jour puis les compteurs.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownRoster;

impl RosterRenderer for MarkdownRoster {
    fn render(&self, schedule: &Schedule) -> String {
        let mut buf = itoa::Buffer::new();
        let mut header = String::from("| Worker |");
        let mut rule = String::from("|---|");
        for day in 1..=schedule.days {
            let _ = write!(header, " {} |", buf.format(day));
            rule.push_str(":-:|");
        }
        header.push_str(" D | N | B | Total |");
        rule.push_str("--:|--:|--:|--:|");

        let mut out = format!("{header}\n{rule}\n");
        for row in &schedule.rows {
            let _ = write!(out, "| {} |", row.worker.as_str());
            for label in &row.labels {
                let _ = write!(out, " {} |", label.symbol());
            }
            let c = row.counts;
            let _ = writeln!(
                out,
                " {} | {} | {} | {} |",
                c.day, c.night, c.backup, c.total
            );
        }
        out
    }
}

/// Tableau Markdown du planning horodaté.
pub fn render_timetable_markdown(entries: &[TimetableEntry]) -> String {
    let mut out = String::from("| Start | End | Worker | Primary |\n|---|---|---|:-:|\n");
    for e in entries {
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} |",
            e.start_display(),
            e.end_display(),
            e.worker.as_str(),
            if e.is_primary { "yes" } else { "no" }
        );
    }
    out
}

fn counts(row: &WorkerSchedule) -> String {
    let c = row.counts;
    format!("D:{}, N:{}, B:{}, T:{}", c.day, c.night, c.backup, c.total)
}
