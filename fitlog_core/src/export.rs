//! One-way exports of the ledger and report data.
//!
//! The CSV export appends to an existing file under an exclusive lock; the
//! report JSON is written atomically through a temp file in the target
//! directory.

use crate::ledger::WorkoutLedger;
use crate::report::ReportData;
use crate::{Error, Result, WorkoutEntry, TIMESTAMP_FORMAT};
use fs2::FileExt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    id: u64,
    date: String,
    timestamp: String,
    category: Option<&'static str>,
    exercise: String,
    duration_minutes: u32,
    calories: Option<f64>,
}

impl From<&WorkoutEntry> for CsvRow {
    fn from(entry: &WorkoutEntry) -> Self {
        CsvRow {
            id: entry.id,
            date: entry.timestamp.date().to_string(),
            timestamp: entry.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            category: entry.category.map(|c| c.as_str()),
            exercise: entry.exercise.clone(),
            duration_minutes: entry.duration_minutes,
            calories: entry.calories,
        }
    }
}

/// Append every ledger entry to a CSV file
///
/// Headers are written only when the file is new or empty. Returns the
/// number of rows written.
pub fn write_csv(ledger: &WorkoutLedger, csv_path: &Path) -> Result<usize> {
    if ledger.is_empty() {
        tracing::info!("Ledger is empty, nothing to export");
        return Ok(0);
    }

    // Ensure parent directory exists
    if let Some(parent) = csv_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(csv_path)?;
    file.lock_exclusive()?;

    let needs_headers = file.metadata()?.len() == 0;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(needs_headers)
        .from_writer(&file);

    let mut count = 0;
    for entry in ledger.entries() {
        writer.serialize(CsvRow::from(entry))?;
        count += 1;
    }
    writer.flush()?;
    drop(writer);

    file.sync_all()?;
    file.unlock()?;

    tracing::info!("Exported {} entries to {:?}", count, csv_path);
    Ok(count)
}

/// Atomically write report data as pretty JSON
pub fn write_report_json(report: &ReportData, path: &Path) -> Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent)?;

    let temp = NamedTempFile::new_in(parent)?;
    {
        let mut writer = std::io::BufWriter::new(temp.as_file());
        serde_json::to_writer_pretty(&mut writer, report)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }
    temp.as_file().sync_all()?;

    // Atomically replace any previous report
    temp.persist(path).map_err(|e| Error::Io(e.error))?;

    tracing::info!("Wrote report to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::NewEntry;
    use crate::report::build_report_data;
    use crate::{Gender, UserProfile};
    use chrono::NaiveDate;

    fn seeded() -> (UserProfile, WorkoutLedger) {
        let profile = UserProfile::new("Asha", "R-001", 28, Gender::Male, 180.0, 70.0).unwrap();
        let mut ledger = WorkoutLedger::default();
        for (i, category) in ["Warm-up", "Workout", "Cool-down"].iter().enumerate() {
            let now = NaiveDate::from_ymd_opt(2024, 6, 3)
                .unwrap()
                .and_hms_opt(7, i as u32, 0)
                .unwrap();
            ledger
                .add_entry(
                    NewEntry {
                        category: Some(*category),
                        exercise: "Drill",
                        duration_minutes: 10,
                    },
                    Some(&profile),
                    now,
                )
                .unwrap();
        }
        (profile, ledger)
    }

    #[test]
    fn test_write_csv_creates_file_with_headers() {
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("out").join("workouts.csv");
        let (_, ledger) = seeded();

        let count = write_csv(&ledger, &csv_path).unwrap();
        assert_eq!(count, 3);

        let content = std::fs::read_to_string(&csv_path).unwrap();
        assert!(content.starts_with("id,date,timestamp,category,exercise,duration_minutes,calories"));
        assert!(content.contains("2024-06-03 07:01:00,Workout,Drill,10,73.5"));
    }

    #[test]
    fn test_write_csv_appends_without_repeating_headers() {
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("workouts.csv");
        let (_, ledger) = seeded();

        write_csv(&ledger, &csv_path).unwrap();
        write_csv(&ledger, &csv_path).unwrap();

        let reader = csv::Reader::from_path(&csv_path).unwrap();
        assert_eq!(reader.into_records().count(), 6);
    }

    #[test]
    fn test_write_csv_empty_ledger() {
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("workouts.csv");

        let count = write_csv(&WorkoutLedger::default(), &csv_path).unwrap();
        assert_eq!(count, 0);
        assert!(!csv_path.exists());
    }

    #[test]
    fn test_write_report_json_is_atomic() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("report.json");
        let (profile, ledger) = seeded();

        write_report_json(&build_report_data(Some(&profile), &ledger), &path).unwrap();

        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["total_time"], 30);
        assert_eq!(parsed["profile"]["regn_id"], "R-001");

        let extras: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() != "report.json")
            .collect();
        assert!(extras.is_empty(), "Unexpected files: {:?}", extras);
    }
}
