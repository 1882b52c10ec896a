use crate::model::{Schedule, TimetableEntry};
use anyhow::Context;
use csv::WriterBuilder;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Écriture atomique : fichier temporaire dans le même dossier puis rename.
pub fn write_atomic<P: AsRef<Path>>(path: P, data: &[u8]) -> anyhow::Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
    tmp.write_all(data)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .with_context(|| format!("atomic rename to {}", path.display()))?;
    Ok(())
}

/// Export JSON du roster (jolie mise en forme)
pub fn export_schedule_json<P: AsRef<Path>>(path: P, schedule: &Schedule) -> anyhow::Result<()> {
    let json = serde_json::to_vec_pretty(schedule)?;
    write_atomic(path, &json)
}

pub fn load_schedule_json<P: AsRef<Path>>(path: P) -> anyhow::Result<Schedule> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let schedule = serde_json::from_slice(&data)
        .with_context(|| format!("parsing schedule {}", path.display()))?;
    Ok(schedule)
}

/// Export CSV du planning: header `login,start,end,is_primary` (RFC3339)
pub fn export_timetable_csv<P: AsRef<Path>>(
    path: P,
    entries: &[TimetableEntry],
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_writer(Vec::new());
    w.write_record(["login", "start", "end", "is_primary"])?;
    for e in entries {
        let start = e.start_iso();
        let end = e.end_iso();
        w.write_record([
            e.worker.as_str(),
            start.as_str(),
            end.as_str(),
            if e.is_primary { "true" } else { "false" },
        ])?;
    }
    let data = w
        .into_inner()
        .map_err(|e| e.into_error())
        .context("flushing csv")?;
    write_atomic(path, &data)
}

pub fn export_markdown<P: AsRef<Path>>(path: P, markdown: &str) -> anyhow::Result<()> {
    write_atomic(path, markdown.as_bytes())
}
