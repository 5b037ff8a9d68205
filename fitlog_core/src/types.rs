//! Core domain types for the fitness tracker.
//!
//! This module defines the fundamental types used throughout the system:
//! - Workout categories and the biometric gender codes
//! - The user profile with derived BMI/BMR
//! - Recorded workout entries

use crate::{Error, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Wire format for entry timestamps
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ============================================================================
// Categories
// ============================================================================

/// Workout category
///
/// Variant order is the fixed chart axis order.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    #[serde(rename = "Warm-up")]
    WarmUp,
    #[serde(rename = "Workout")]
    Workout,
    #[serde(rename = "Cool-down")]
    CoolDown,
}

impl Category {
    /// All categories in chart order
    pub const ALL: [Category; 3] = [Category::WarmUp, Category::Workout, Category::CoolDown];

    /// Display name as used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::WarmUp => "Warm-up",
            Category::Workout => "Workout",
            Category::CoolDown => "Cool-down",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "warm-up" | "warmup" | "warm_up" => Ok(Category::WarmUp),
            "workout" => Ok(Category::Workout),
            "cool-down" | "cooldown" | "cool_down" => Ok(Category::CoolDown),
            _ => Err(Error::InvalidCategory(s.to_string())),
        }
    }
}

// ============================================================================
// Profile
// ============================================================================

/// Gender code used by the BMR formula
///
/// Only the two codes the Mifflin-St Jeor constants are defined for.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl FromStr for Gender {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "m" | "male" => Ok(Gender::Male),
            "f" | "female" => Ok(Gender::Female),
            _ => Err(Error::validation(
                "gender",
                format!("'{}' is not one of M, F", s.trim()),
            )),
        }
    }
}

/// The active user's biometric record
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub name: String,
    #[serde(rename = "regn_id")]
    pub registration_id: String,
    pub age: u32,
    pub gender: Gender,
    #[serde(rename = "height")]
    pub height_cm: f64,
    #[serde(rename = "weight")]
    pub weight_kg: f64,
    pub bmi: f64,
    pub bmr: f64,
}

// ============================================================================
// Workout entries
// ============================================================================

/// A recorded workout
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutEntry {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    pub exercise: String,
    #[serde(rename = "duration")]
    pub duration_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
}

/// Serde adapter for `YYYY-MM-DD HH:MM:SS` timestamps
pub mod timestamp_format {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&ts.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}
