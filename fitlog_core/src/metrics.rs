//! Body metrics and energy expenditure.
//!
//! Pure functions for BMI, BMR (Mifflin-St Jeor) and MET-based calorie
//! estimates. Every result is rounded to 2 decimal places.

use crate::{Category, Error, Gender, Result};
use serde::Serialize;

/// Oxygen uptake per MET in ml/kg/min
const ML_O2_PER_MET: f64 = 3.5;

/// Converts ml O2/kg/min × kg into kcal/min
const KCAL_DIVISOR: f64 = 200.0;

/// MET value for a workout category
pub fn met_value(category: Category) -> f64 {
    match category {
        Category::WarmUp => 3.0,
        Category::Workout => 6.0,
        Category::CoolDown => 2.5,
    }
}

/// Round to 2 decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn ensure_positive(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::InvalidInput(format!(
            "{} must be a positive number, got {}",
            name, value
        )));
    }
    Ok(())
}

/// Round a computed result, rejecting overflow to infinity or NaN
fn finite_result(name: &str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(Error::InvalidInput(format!(
            "{} is out of range for the given inputs",
            name
        )));
    }
    Ok(round2(value))
}

/// Body Mass Index from height in centimetres and weight in kilograms
pub fn compute_bmi(height_cm: f64, weight_kg: f64) -> Result<f64> {
    ensure_positive("height", height_cm)?;
    ensure_positive("weight", weight_kg)?;

    let height_m = height_cm / 100.0;
    finite_result("BMI", weight_kg / (height_m * height_m))
}

/// Basal Metabolic Rate (kcal/day) using Mifflin-St Jeor
pub fn compute_bmr(age: u32, gender: Gender, height_cm: f64, weight_kg: f64) -> Result<f64> {
    if age == 0 {
        return Err(Error::InvalidInput("age must be positive".into()));
    }
    ensure_positive("height", height_cm)?;
    ensure_positive("weight", weight_kg)?;

    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age);
    let bmr = match gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    };
    finite_result("BMR", bmr)
}

/// Calories burned for an activity of the given MET over `duration_minutes`
pub fn compute_calories(met: f64, weight_kg: f64, duration_minutes: u32) -> Result<f64> {
    if !met.is_finite() || met < 0.0 {
        return Err(Error::InvalidInput(format!(
            "MET value must be non-negative, got {}",
            met
        )));
    }
    ensure_positive("weight", weight_kg)?;

    let kcal_per_min = met * ML_O2_PER_MET * weight_kg / KCAL_DIVISOR;
    finite_result("calories", kcal_per_min * f64::from(duration_minutes))
}

/// WHO BMI bands
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BmiClass {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiClass {
    pub fn label(&self) -> &'static str {
        match self {
            BmiClass::Underweight => "Underweight",
            BmiClass::Normal => "Normal",
            BmiClass::Overweight => "Overweight",
            BmiClass::Obese => "Obese",
        }
    }
}

/// Classify a BMI value
pub fn bmi_class(bmi: f64) -> BmiClass {
    if bmi < 18.5 {
        BmiClass::Underweight
    } else if bmi < 25.0 {
        BmiClass::Normal
    } else if bmi < 30.0 {
        BmiClass::Overweight
    } else {
        BmiClass::Obese
    }
}
