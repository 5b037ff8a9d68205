//! Single-user profile store.
//!
//! Holds at most one profile. Each submission is validated in full and then
//! replaces the previous profile wholesale; a rejected submission leaves the
//! old profile in place.

use crate::input::{coerce_float, coerce_int, required_text, ProfileInput};
use crate::metrics::{compute_bmi, compute_bmr};
use crate::{Error, Gender, Result, UserProfile};

impl UserProfile {
    /// Build a profile from typed values, deriving BMI and BMR
    pub fn new(
        name: impl Into<String>,
        registration_id: impl Into<String>,
        age: u32,
        gender: Gender,
        height_cm: f64,
        weight_kg: f64,
    ) -> Result<Self> {
        let bmi = compute_bmi(height_cm, weight_kg)?;
        let bmr = compute_bmr(age, gender, height_cm, weight_kg)?;

        Ok(UserProfile {
            name: name.into(),
            registration_id: registration_id.into(),
            age,
            gender,
            height_cm,
            weight_kg,
            bmi,
            bmr,
        })
    }

    /// Validate and coerce a raw submission
    pub fn from_input(input: &ProfileInput) -> Result<Self> {
        let name = required_text("name", &input.name)?;
        let registration_id = required_text("regn_id", &input.regn_id)?;

        let age = coerce_int("age", &input.age)?;
        let age = u32::try_from(age)
            .ok()
            .filter(|a| *a > 0)
            .ok_or_else(|| Error::validation("age", "must be a positive integer"))?;

        let gender: Gender = required_text("gender", &input.gender)?.parse()?;

        let height_cm = coerce_float("height", &input.height)?;
        if height_cm <= 0.0 {
            return Err(Error::validation("height", "must be greater than zero"));
        }
        let weight_kg = coerce_float("weight", &input.weight)?;
        if weight_kg <= 0.0 {
            return Err(Error::validation("weight", "must be greater than zero"));
        }

        Self::new(name, registration_id, age, gender, height_cm, weight_kg)
    }
}

/// Holder for the active profile
#[derive(Clone, Debug, Default)]
pub struct ProfileStore {
    current: Option<UserProfile>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a submission and replace the active profile with it
    pub fn set_profile(&mut self, input: &ProfileInput) -> Result<UserProfile> {
        let profile = UserProfile::from_input(input)?;
        self.replace(profile.clone());
        Ok(profile)
    }

    /// Replace the active profile with an already-built one
    pub fn replace(&mut self, profile: UserProfile) {
        tracing::info!(
            "Profile set for {} (BMI {:.2}, BMR {:.2})",
            profile.registration_id,
            profile.bmi,
            profile.bmr
        );
        self.current = Some(profile);
    }

    /// The active profile, if one has been set
    pub fn profile(&self) -> Option<&UserProfile> {
        self.current.as_ref()
    }

    /// Forget the active profile
    pub fn clear(&mut self) {
        self.current = None;
    }
}
