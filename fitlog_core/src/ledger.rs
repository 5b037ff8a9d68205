//! In-memory workout ledger.
//!
//! Entries are bucketed by the calendar date of their timestamp and keep
//! insertion order within a bucket. Aggregates are recomputed from the
//! entries on every call.
//!
//! One implementation serves every deployment variant; [`LedgerConfig`]
//! selects whether a profile (and therefore calorie tracking) is required
//! and how [`WorkoutLedger::get_all`] groups its view.

use crate::config::{Bucketing, LedgerConfig};
use crate::metrics::{compute_calories, met_value};
use crate::{Category, Error, Result, UserProfile, WorkoutEntry};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-category duration totals, always holding all three categories
pub type CategoryTotals = BTreeMap<Category, u64>;

/// A workout submission after coercion
#[derive(Clone, Debug)]
pub struct NewEntry<'a> {
    pub category: Option<&'a str>,
    pub exercise: &'a str,
    pub duration_minutes: i64,
}

/// Grouped view of the ledger, shaped by the configured bucketing
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub enum LedgerView {
    Flat(Vec<WorkoutEntry>),
    Categorized(BTreeMap<Category, Vec<WorkoutEntry>>),
    ByDate(BTreeMap<NaiveDate, BTreeMap<Category, Vec<WorkoutEntry>>>),
}

/// Full ledger plus the grand total of minutes
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct LedgerSnapshot {
    pub workouts: LedgerView,
    pub total_time: u64,
}

/// Date-bucketed collection of workout entries
#[derive(Clone, Debug)]
pub struct WorkoutLedger {
    config: LedgerConfig,
    days: BTreeMap<NaiveDate, Vec<WorkoutEntry>>,
    next_id: u64,
}

impl Default for WorkoutLedger {
    fn default() -> Self {
        Self::new(LedgerConfig::default())
    }
}

impl WorkoutLedger {
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            config,
            days: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Whether entries carry calorie estimates
    pub fn is_calorie_aware(&self) -> bool {
        self.config.require_profile_for_calories
    }

    /// Validate and record a workout dated `now`
    ///
    /// Nothing is mutated unless every check passes.
    pub fn add_entry(
        &mut self,
        new: NewEntry<'_>,
        profile: Option<&UserProfile>,
        now: NaiveDateTime,
    ) -> Result<WorkoutEntry> {
        let category = match new.category.map(str::trim).filter(|c| !c.is_empty()) {
            Some(raw) => Some(raw.parse::<Category>()?),
            None if self.config.bucketing == Bucketing::Flat => None,
            None => return Err(Error::validation("category", "is required")),
        };

        let exercise = new.exercise.trim();
        if exercise.is_empty() {
            return Err(Error::validation("exercise", "must not be empty"));
        }

        let duration_minutes = u32::try_from(new.duration_minutes)
            .ok()
            .filter(|d| *d > 0)
            .ok_or_else(|| Error::validation("duration", "must be a positive whole number"))?;

        let calories = if self.is_calorie_aware() {
            let profile =
                profile.ok_or_else(|| Error::PreconditionFailed("profile required".into()))?;
            let met = met_value(category.unwrap_or(Category::Workout));
            Some(compute_calories(met, profile.weight_kg, duration_minutes)?)
        } else {
            None
        };

        let entry = WorkoutEntry {
            id: self.next_id,
            category,
            exercise: exercise.to_string(),
            duration_minutes,
            calories,
            timestamp: now,
        };
        self.next_id += 1;

        self.days
            .entry(now.date())
            .or_default()
            .push(entry.clone());

        tracing::info!(
            "Recorded entry {} ({} min {}) on {}",
            entry.id,
            entry.duration_minutes,
            entry.exercise,
            now.date()
        );
        Ok(entry)
    }

    /// Delete every entry with the given id; flat bucketing only
    ///
    /// Returns how many entries were removed. Removing an unknown id is not
    /// an error.
    pub fn remove_entry(&mut self, id: u64) -> Result<usize> {
        if self.config.bucketing != Bucketing::Flat {
            return Err(Error::PreconditionFailed(
                "deleting entries requires flat bucketing".into(),
            ));
        }

        let mut removed = 0;
        for bucket in self.days.values_mut() {
            let before = bucket.len();
            bucket.retain(|e| e.id != id);
            removed += before - bucket.len();
        }
        self.days.retain(|_, bucket| !bucket.is_empty());

        tracing::info!("Removed {} entries with id {}", removed, id);
        Ok(removed)
    }

    /// The whole ledger in the configured shape, with total minutes
    pub fn get_all(&self) -> LedgerSnapshot {
        let workouts = match self.config.bucketing {
            Bucketing::Flat => {
                let mut flat: Vec<WorkoutEntry> = self.entries().cloned().collect();
                flat.sort_by_key(|e| e.id);
                LedgerView::Flat(flat)
            }
            Bucketing::Categorized => LedgerView::Categorized(group_by_category(self.entries())),
            Bucketing::CategorizedByDate => LedgerView::ByDate(
                self.days
                    .iter()
                    .map(|(date, bucket)| (*date, group_by_category(bucket.iter())))
                    .collect(),
            ),
        };

        LedgerSnapshot {
            workouts,
            total_time: self.total_time(),
        }
    }

    /// Sum of minutes per category across every day
    ///
    /// Uncategorized flat entries count towards Workout.
    pub fn category_totals(&self) -> CategoryTotals {
        let mut totals: CategoryTotals = Category::ALL.iter().map(|c| (*c, 0)).collect();
        for entry in self.entries() {
            let category = entry.category.unwrap_or(Category::Workout);
            *totals.entry(category).or_insert(0) += u64::from(entry.duration_minutes);
        }
        totals
    }

    /// Sum of minutes across every entry
    pub fn total_time(&self) -> u64 {
        self.entries()
            .map(|e| u64::from(e.duration_minutes))
            .sum()
    }

    /// Every entry, day by day, in insertion order within a day
    pub fn entries(&self) -> impl Iterator<Item = &WorkoutEntry> {
        self.days.values().flatten()
    }

    /// Day buckets in date order
    pub fn days(&self) -> impl Iterator<Item = (&NaiveDate, &[WorkoutEntry])> {
        self.days.iter().map(|(date, bucket)| (date, bucket.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Drop every entry and restart ids at 1
    pub fn clear(&mut self) {
        self.days.clear();
        self.next_id = 1;
    }
}

fn group_by_category<'a>(
    entries: impl Iterator<Item = &'a WorkoutEntry>,
) -> BTreeMap<Category, Vec<WorkoutEntry>> {
    let mut grouped: BTreeMap<Category, Vec<WorkoutEntry>> =
        Category::ALL.iter().map(|c| (*c, Vec::new())).collect();
    for entry in entries {
        let category = entry.category.unwrap_or(Category::Workout);
        grouped.entry(category).or_default().push(entry.clone());
    }
    grouped
}
