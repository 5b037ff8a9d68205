#![forbid(unsafe_code)]

//! Core domain model and business logic for the fitlog fitness tracker.
//!
//! This crate provides:
//! - Domain types (categories, profile, workout entries)
//! - Metric calculators (BMI, BMR, MET-based calories)
//! - The in-memory workout ledger and profile store
//! - Report aggregation and exports
//! - The JSON request/response boundary

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod metrics;
pub mod input;
pub mod profile;
pub mod ledger;
pub mod report;
pub mod store;
pub mod reference;
pub mod export;
pub mod api;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::{Bucketing, Config, LedgerConfig};
pub use input::{ProfileInput, WorkoutInput};
pub use ledger::{CategoryTotals, LedgerSnapshot, LedgerView, NewEntry, WorkoutLedger};
pub use profile::ProfileStore;
pub use report::{build_report_data, build_stats, build_weekly_report, ReportData, Stats};
pub use store::FitnessStore;
pub use api::{handle, handle_line, Request, Response};
