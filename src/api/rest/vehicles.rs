use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{patch, post};
use axum::Json;
use axum::Router;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::vehicle::Vehicle;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/vehicles", post(create_vehicle).get(list_vehicles))
        .route("/vehicles/:id/availability", patch(update_availability))
}

#[derive(Deserialize)]
pub struct CreateVehicleRequest {
    pub vehicle_number: String,
    pub seats: u16,
}

#[derive(Deserialize)]
pub struct UpdateAvailabilityRequest {
    pub is_available: bool,
}

async fn create_vehicle(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateVehicleRequest>,
) -> Result<Json<Vehicle>, AppError> {
    let vehicle_number = payload.vehicle_number.trim();
    if vehicle_number.is_empty() {
        return Err(AppError::BadRequest(
            "vehicle_number cannot be empty".to_string(),
        ));
    }

    if payload.seats == 0 {
        return Err(AppError::BadRequest("seats must be > 0".to_string()));
    }

    let slot = match state.vehicle_numbers.entry(vehicle_number.to_ascii_uppercase()) {
        Entry::Occupied(_) => {
            return Err(AppError::Conflict(format!(
                "vehicle {vehicle_number} already registered"
            )));
        }
        Entry::Vacant(slot) => slot,
    };

    let vehicle = Vehicle {
        id: Uuid::new_v4(),
        vehicle_number: vehicle_number.to_string(),
        seats: payload.seats,
        is_available: true,
        updated_at: Utc::now(),
    };

    state.vehicles.insert(vehicle.id, vehicle.clone());
    slot.insert(vehicle.id);
    Ok(Json(vehicle))
}

async fn list_vehicles(State(state): State<Arc<AppState>>) -> Json<Vec<Vehicle>> {
    let mut vehicles: Vec<Vehicle> = state
        .vehicles
        .iter()
        .map(|entry| entry.value().clone())
        .collect();
    vehicles.sort_by(|a, b| a.vehicle_number.cmp(&b.vehicle_number));
    Json(vehicles)
}

async fn update_availability(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAvailabilityRequest>,
) -> Result<Json<Vehicle>, AppError> {
    let mut vehicle = state
        .vehicles
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("vehicle {} not found", id)))?;

    vehicle.is_available = payload.is_available;
    vehicle.updated_at = Utc::now();

    Ok(Json(vehicle.clone()))
}
