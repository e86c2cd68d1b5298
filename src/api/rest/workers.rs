use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{patch, post};
use axum::Json;
use axum::Router;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::worker::{Shift, Worker};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/workers", post(create_worker).get(list_workers))
        .route("/workers/:id", patch(update_worker))
}

#[derive(Deserialize)]
pub struct CreateWorkerRequest {
    pub name: String,
    pub shift: Shift,
    #[serde(default)]
    pub priority: i32,
}

#[derive(Deserialize)]
pub struct UpdateWorkerRequest {
    pub priority: Option<i32>,
    pub shift: Option<Shift>,
    pub is_active: Option<bool>,
}

async fn create_worker(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateWorkerRequest>,
) -> Result<Json<Worker>, AppError> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("name cannot be empty".to_string()));
    }

    let worker = Worker {
        id: Uuid::new_v4(),
        name: name.to_string(),
        shift: payload.shift,
        priority: payload.priority,
        is_active: true,
        updated_at: Utc::now(),
    };

    state.workers.insert(worker.id, worker.clone());
    Ok(Json(worker))
}

async fn list_workers(State(state): State<Arc<AppState>>) -> Json<Vec<Worker>> {
    let mut workers: Vec<Worker> = state
        .workers
        .iter()
        .map(|entry| entry.value().clone())
        .collect();
    workers.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
    Json(workers)
}

async fn update_worker(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateWorkerRequest>,
) -> Result<Json<Worker>, AppError> {
    let mut worker = state
        .workers
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("worker {} not found", id)))?;

    if let Some(priority) = payload.priority {
        worker.priority = priority;
    }
    if let Some(shift) = payload.shift {
        worker.shift = shift;
    }
    if let Some(is_active) = payload.is_active {
        worker.is_active = is_active;
    }
    worker.updated_at = Utc::now();

    Ok(Json(worker.clone()))
}
