use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::Json;
use axum::Router;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::engine::regeneration::regenerate_schedule;
use crate::engine::scheduler::ScheduleRequest;
use crate::error::{AppError, ScheduleError};
use crate::models::schedule::{ScheduleAssignment, ScheduleReport};
use crate::models::worker::Shift;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/schedules", get(get_schedule))
        .route("/schedules/generate", post(generate))
}

/// Date and shift arrive as raw strings so that absent or malformed
/// values surface as `InvalidInput` instead of an extractor rejection.
#[derive(Deserialize)]
pub struct ScheduleParams {
    pub date: Option<String>,
    pub shift: Option<String>,
}

impl ScheduleParams {
    fn into_request(self) -> Result<ScheduleRequest, ScheduleError> {
        let date = self
            .date
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| {
                raw.trim()
                    .parse::<NaiveDate>()
                    .map_err(|err| ScheduleError::InvalidInput(format!("invalid date {raw}: {err}")))
            })
            .transpose()?;
        let shift = self
            .shift
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| raw.parse::<Shift>().map_err(ScheduleError::InvalidInput))
            .transpose()?;

        Ok(ScheduleRequest { date, shift })
    }
}

async fn generate(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ScheduleParams>,
) -> Result<Json<ScheduleReport>, AppError> {
    let request = payload.into_request()?;
    let report = regenerate_schedule(&state, &request)?;
    Ok(Json(report))
}

async fn get_schedule(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ScheduleParams>,
) -> Result<Json<Vec<ScheduleAssignment>>, AppError> {
    let key = params.into_request()?.key()?;

    let assignments = state
        .schedules
        .get(&key)
        .map(|entry| entry.value().clone())
        .unwrap_or_default();

    Ok(Json(assignments))
}
