//! Request records as they arrive from clients.
//!
//! Numeric fields may be JSON numbers or numeric strings; the coercion
//! helpers here turn them into typed values or a `Validation` error naming
//! the field.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Profile submission: `{name, regn_id, age, gender, height, weight}`
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProfileInput {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default, alias = "registration_id")]
    pub regn_id: Option<Value>,
    #[serde(default)]
    pub age: Option<Value>,
    #[serde(default)]
    pub gender: Option<Value>,
    #[serde(default)]
    pub height: Option<Value>,
    #[serde(default)]
    pub weight: Option<Value>,
}

/// Workout submission: `{category, exercise, duration}`
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct WorkoutInput {
    #[serde(default)]
    pub category: Option<Value>,
    #[serde(default, alias = "workout")]
    pub exercise: Option<Value>,
    #[serde(default)]
    pub duration: Option<Value>,
}

fn is_missing(value: &Option<Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        _ => false,
    }
}

/// Required free-text field, trimmed
pub fn required_text(field: &str, value: &Option<Value>) -> Result<String> {
    if is_missing(value) {
        return Err(Error::validation(field, "is required"));
    }
    match value {
        Some(Value::String(s)) => Ok(s.trim().to_string()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => Err(Error::validation(field, "must be text")),
    }
}

/// Optional free-text field; blank counts as absent
pub fn optional_text(field: &str, value: &Option<Value>) -> Result<Option<String>> {
    if is_missing(value) {
        return Ok(None);
    }
    required_text(field, value).map(Some)
}

/// Required whole number; integral floats (`30.0`) are accepted
pub fn coerce_int(field: &str, value: &Option<Value>) -> Result<i64> {
    if is_missing(value) {
        return Err(Error::validation(field, "is required"));
    }
    let not_whole = || Error::validation(field, "must be a whole number");

    match value {
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(f as i64),
                _ => Err(not_whole()),
            }
        }
        Some(Value::String(s)) => s.trim().parse::<i64>().map_err(|_| not_whole()),
        _ => Err(not_whole()),
    }
}

/// Required finite number
pub fn coerce_float(field: &str, value: &Option<Value>) -> Result<f64> {
    if is_missing(value) {
        return Err(Error::validation(field, "is required"));
    }
    let not_number = || Error::validation(field, "must be a number");

    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64().ok_or_else(not_number)?,
        Some(Value::String(s)) => s.trim().parse::<f64>().map_err(|_| not_number())?,
        _ => return Err(not_number()),
    };

    if parsed.is_finite() {
        Ok(parsed)
    } else {
        Err(not_number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_int_accepts_numeric_strings() {
        assert_eq!(coerce_int("age", &Some(json!("28"))).unwrap(), 28);
        assert_eq!(coerce_int("age", &Some(json!(" 28 "))).unwrap(), 28);
        assert_eq!(coerce_int("age", &Some(json!(28))).unwrap(), 28);
        assert_eq!(coerce_int("duration", &Some(json!(30.0))).unwrap(), 30);
    }

    #[test]
    fn test_coerce_int_rejects_garbage() {
        let err = coerce_int("duration", &Some(json!("invalid"))).unwrap_err();
        assert_eq!(err.to_string(), "Invalid duration: must be a whole number");

        assert!(coerce_int("duration", &Some(json!(12.5))).is_err());
        assert!(coerce_int("duration", &Some(json!(true))).is_err());
    }

    #[test]
    fn test_missing_fields_are_required() {
        let err = coerce_int("duration", &None).unwrap_err();
        assert_eq!(err.to_string(), "Invalid duration: is required");

        assert!(required_text("name", &Some(json!("   "))).is_err());
        assert!(required_text("name", &Some(Value::Null)).is_err());
    }

    #[test]
    fn test_coerce_float() {
        assert_eq!(coerce_float("height", &Some(json!("180.5"))).unwrap(), 180.5);
        assert_eq!(coerce_float("weight", &Some(json!(75))).unwrap(), 75.0);
        assert!(coerce_float("weight", &Some(json!("heavy"))).is_err());
        assert!(coerce_float("weight", &Some(json!("NaN"))).is_err());
    }

    #[test]
    fn test_workout_alias() {
        let input: WorkoutInput =
            serde_json::from_value(json!({"workout": "Push-ups", "duration": "30"})).unwrap();
        assert_eq!(
            required_text("exercise", &input.exercise).unwrap(),
            "Push-ups"
        );
        assert_eq!(optional_text("category", &input.category).unwrap(), None);
    }
}
