//! Request/response boundary.
//!
//! Clients send JSON records tagged with an `op`; every request produces a
//! [`Response`] carrying a machine-readable status and a human-readable
//! message. Errors never escape this layer.

use crate::input::{coerce_int, optional_text, required_text, ProfileInput, WorkoutInput};
use crate::ledger::NewEntry;
use crate::store::FitnessStore;
use crate::{reference, report, Category, Error, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A client request
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    SetProfile(ProfileInput),
    GetProfile,
    AddWorkout(WorkoutInput),
    DeleteWorkout {
        #[serde(default)]
        id: Option<Value>,
    },
    GetWorkouts,
    GetStats,
    GetReport {
        #[serde(default)]
        week_ending: Option<NaiveDate>,
    },
    WorkoutChart,
    DietChart,
    Reset,
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Success,
    Error,
}

/// Structured outcome of a request
#[derive(Clone, Debug, Serialize)]
pub struct Response {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
    pub http_status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub data: Value,
}

impl Response {
    fn success(message: Option<String>, data: Value) -> Self {
        Response {
            status: Status::Success,
            code: None,
            http_status: 200,
            message,
            data,
        }
    }

    fn failure(err: &Error) -> Self {
        Response {
            status: Status::Error,
            code: Some(err.code()),
            http_status: err.http_status(),
            message: Some(err.to_string()),
            data: Value::Null,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}

/// Parse one JSON request record
pub fn parse_request(raw: &str) -> Result<Request> {
    serde_json::from_str(raw).map_err(|e| Error::validation("request", e.to_string()))
}

/// Parse and handle one JSON request line
pub fn handle_line(store: &FitnessStore, raw: &str, now: NaiveDateTime) -> Response {
    match parse_request(raw) {
        Ok(request) => handle(store, request, now),
        Err(err) => {
            tracing::warn!("Rejected malformed request: {}", err);
            Response::failure(&err)
        }
    }
}

/// Dispatch a request against the store
pub fn handle(store: &FitnessStore, request: Request, now: NaiveDateTime) -> Response {
    match dispatch(store, request, now) {
        Ok(response) => response,
        Err(err) => {
            if err.is_user_error() {
                tracing::debug!("Request failed: {}", err);
            } else {
                tracing::error!("Request failed: {}", err);
            }
            Response::failure(&err)
        }
    }
}

fn dispatch(store: &FitnessStore, request: Request, now: NaiveDateTime) -> Result<Response> {
    let response = match request {
        Request::SetProfile(input) => {
            let profile = store.set_profile(&input)?;
            Response::success(
                Some(format!("Profile saved for {}", profile.name)),
                serde_json::to_value(&profile)?,
            )
        }

        Request::GetProfile => {
            let profile = store.profile()?;
            let message = profile
                .is_none()
                .then(|| "No profile set".to_string());
            Response::success(message, json!({ "profile": profile }))
        }

        Request::AddWorkout(input) => {
            // Category is checked before the other fields
            let category = optional_text("category", &input.category)?;
            if let Some(ref name) = category {
                name.parse::<Category>()?;
            }
            let exercise = required_text("exercise", &input.exercise)?;
            let duration_minutes = coerce_int("duration", &input.duration)?;

            let entry = store.add_entry(
                NewEntry {
                    category: category.as_deref(),
                    exercise: &exercise,
                    duration_minutes,
                },
                now,
            )?;

            let message = match entry.calories {
                Some(kcal) => format!(
                    "'{}' added successfully! You burned {:.2} calories.",
                    entry.exercise, kcal
                ),
                None => format!("'{}' added successfully!", entry.exercise),
            };
            Response::success(Some(message), json!({ "workout": entry }))
        }

        Request::DeleteWorkout { id } => {
            let id = coerce_int("id", &id)?;
            let id = u64::try_from(id)
                .map_err(|_| Error::validation("id", "must be a positive integer"))?;
            let removed = store.remove_entry(id)?;
            Response::success(
                Some("Workout deleted".to_string()),
                json!({ "removed": removed }),
            )
        }

        Request::GetWorkouts => Response::success(None, serde_json::to_value(store.workouts()?)?),

        Request::GetStats => Response::success(None, serde_json::to_value(store.stats()?)?),

        Request::GetReport { week_ending } => {
            let week_ending = week_ending.unwrap_or_else(|| now.date());
            let data = store.weekly_report(week_ending)?;
            let text = report::render_text(&data);
            Response::success(None, json!({ "report": data, "text": text }))
        }

        Request::WorkoutChart => {
            Response::success(None, serde_json::to_value(reference::workout_chart())?)
        }

        Request::DietChart => Response::success(None, serde_json::to_value(reference::diet_chart())?),

        Request::Reset => {
            store.reset()?;
            Response::success(Some("Store reset".to_string()), Value::Null)
        }
    };
    Ok(response)
}
