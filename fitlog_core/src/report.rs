//! Chart statistics and report projections.
//!
//! Everything here is a read-only projection of the ledger and profile,
//! ready to hand to a renderer (JSON, text, or an external PDF layout).

use crate::ledger::WorkoutLedger;
use crate::metrics::{bmi_class, round2};
use crate::{Category, Error, Result, UserProfile, WorkoutEntry};
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::fmt::Write;

/// Chart-ready totals with a fixed category axis
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Stats {
    pub categories: Vec<Category>,
    pub durations: Vec<u64>,
    pub total_time: u64,
}

/// One day of the report
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct DaySection {
    pub date: NaiveDate,
    pub entries: Vec<WorkoutEntry>,
    pub total_minutes: u64,
    pub total_calories: f64,
}

/// Profile snapshot plus per-day entries
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ReportData {
    pub profile: Option<UserProfile>,
    pub days: Vec<DaySection>,
    pub total_time: u64,
    pub total_calories: f64,
}

/// Category totals in chart order: Warm-up, Workout, Cool-down
pub fn build_stats(ledger: &WorkoutLedger) -> Stats {
    let totals = ledger.category_totals();
    let categories = Category::ALL.to_vec();
    let durations = categories
        .iter()
        .map(|c| totals.get(c).copied().unwrap_or(0))
        .collect();

    Stats {
        categories,
        durations,
        total_time: ledger.total_time(),
    }
}

/// Project the whole ledger for a renderer
pub fn build_report_data(profile: Option<&UserProfile>, ledger: &WorkoutLedger) -> ReportData {
    project(profile, ledger, |_| true)
}

/// Project the 7 days ending on `week_ending` (inclusive)
///
/// A report is addressed to someone, so a profile is required.
pub fn build_weekly_report(
    profile: Option<&UserProfile>,
    ledger: &WorkoutLedger,
    week_ending: NaiveDate,
) -> Result<ReportData> {
    if profile.is_none() {
        return Err(Error::PreconditionFailed("profile required".into()));
    }
    let week_start = week_ending - Duration::days(6);
    Ok(project(profile, ledger, |date| {
        *date >= week_start && *date <= week_ending
    }))
}

fn project<F>(profile: Option<&UserProfile>, ledger: &WorkoutLedger, include: F) -> ReportData
where
    F: Fn(&NaiveDate) -> bool,
{
    let days: Vec<DaySection> = ledger
        .days()
        .filter(|(date, _)| include(*date))
        .map(|(date, entries)| DaySection {
            date: *date,
            entries: entries.to_vec(),
            total_minutes: entries.iter().map(|e| u64::from(e.duration_minutes)).sum(),
            total_calories: sum_kcal(entries.iter().filter_map(|e| e.calories)),
        })
        .collect();

    let total_time = days.iter().map(|d| d.total_minutes).sum();
    let total_calories = sum_kcal(days.iter().map(|d| d.total_calories));

    ReportData {
        profile: profile.cloned(),
        days,
        total_time,
        total_calories,
    }
}

// Summing an empty f64 iterator yields -0.0; fold from +0.0 instead
fn sum_kcal(values: impl Iterator<Item = f64>) -> f64 {
    round2(values.fold(0.0, |acc, kcal| acc + kcal))
}

/// Plain-text rendering of a report
pub fn render_text(report: &ReportData) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(out, "Weekly Fitness Report");
    let _ = writeln!(out, "=====================");

    if let Some(ref p) = report.profile {
        let _ = writeln!(out, "Name:    {} ({})", p.name, p.registration_id);
        let _ = writeln!(
            out,
            "Body:    {} yrs, {:.1} cm, {:.1} kg",
            p.age, p.height_cm, p.weight_kg
        );
        let _ = writeln!(
            out,
            "BMI:     {:.2} ({})",
            p.bmi,
            bmi_class(p.bmi).label()
        );
        let _ = writeln!(out, "BMR:     {:.2} kcal/day", p.bmr);
    }

    if report.days.is_empty() {
        let _ = writeln!(out, "\nNo workouts logged.");
    }

    for day in &report.days {
        let _ = writeln!(out, "\n{}", day.date.format("%A %Y-%m-%d"));
        for entry in &day.entries {
            let category = entry.category.map(|c| c.as_str()).unwrap_or("-");
            let _ = write!(
                out,
                "  {} {:<9} {:<20} {:>4} min",
                entry.timestamp.format("%H:%M"),
                category,
                entry.exercise,
                entry.duration_minutes
            );
            match entry.calories {
                Some(kcal) => {
                    let _ = writeln!(out, " {:>8.2} kcal", kcal);
                }
                None => {
                    let _ = writeln!(out);
                }
            }
        }
        let _ = writeln!(
            out,
            "  Day total: {} min, {:.2} kcal",
            day.total_minutes, day.total_calories
        );
    }

    let _ = writeln!(
        out,
        "\nTotal: {} min, {:.2} kcal",
        report.total_time, report.total_calories
    );
    out
}
