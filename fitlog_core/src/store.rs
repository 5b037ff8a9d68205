//! Process-owned store for the profile and the ledger.
//!
//! Both live behind a single reader-writer lock: mutations hold the write
//! lock across their whole read-modify-write, readers get a consistent
//! snapshot of profile and entries together.

use crate::config::LedgerConfig;
use crate::input::ProfileInput;
use crate::ledger::{CategoryTotals, LedgerSnapshot, NewEntry, WorkoutLedger};
use crate::profile::ProfileStore;
use crate::report::{self, ReportData, Stats};
use crate::{Error, Result, UserProfile, WorkoutEntry};
use chrono::{NaiveDate, NaiveDateTime};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug)]
struct Inner {
    profile: ProfileStore,
    ledger: WorkoutLedger,
}

/// Shared fitness state for one serving process
#[derive(Debug)]
pub struct FitnessStore {
    inner: RwLock<Inner>,
}

impl Default for FitnessStore {
    fn default() -> Self {
        Self::new(LedgerConfig::default())
    }
}

impl FitnessStore {
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            inner: RwLock::new(Inner {
                profile: ProfileStore::new(),
                ledger: WorkoutLedger::new(config),
            }),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|_| Error::State("fitness store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|_| Error::State("fitness store lock poisoned".into()))
    }

    pub fn set_profile(&self, input: &ProfileInput) -> Result<UserProfile> {
        self.write()?.profile.set_profile(input)
    }

    pub fn profile(&self) -> Result<Option<UserProfile>> {
        Ok(self.read()?.profile.profile().cloned())
    }

    pub fn add_entry(&self, new: NewEntry<'_>, now: NaiveDateTime) -> Result<WorkoutEntry> {
        let mut guard = self.write()?;
        let Inner { profile, ledger } = &mut *guard;
        ledger.add_entry(new, profile.profile(), now)
    }

    pub fn remove_entry(&self, id: u64) -> Result<usize> {
        self.write()?.ledger.remove_entry(id)
    }

    pub fn workouts(&self) -> Result<LedgerSnapshot> {
        Ok(self.read()?.ledger.get_all())
    }

    pub fn category_totals(&self) -> Result<CategoryTotals> {
        Ok(self.read()?.ledger.category_totals())
    }

    pub fn stats(&self) -> Result<Stats> {
        Ok(report::build_stats(&self.read()?.ledger))
    }

    pub fn weekly_report(&self, week_ending: NaiveDate) -> Result<ReportData> {
        let guard = self.read()?;
        report::build_weekly_report(guard.profile.profile(), &guard.ledger, week_ending)
    }

    /// Run `f` against the ledger under the read lock
    pub fn with_ledger<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&WorkoutLedger) -> Result<T>,
    {
        f(&self.read()?.ledger)
    }

    /// Forget the profile and every entry
    pub fn reset(&self) -> Result<()> {
        let mut guard = self.write()?;
        guard.profile.clear();
        guard.ledger.clear();
        tracing::info!("Fitness store reset");
        Ok(())
    }
}
