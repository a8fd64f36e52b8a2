use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::{get, patch, post};
use axum::Json;
use axum::Router;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AppError;
use crate::geo::Coordinate;
use crate::ids::EntityKind;
use crate::models::job::{Job, JobStatus};
use crate::models::technician::Technician;
use crate::models::van::{ServiceArea, Van, VanStatus};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/vans", post(create_van).get(list_vans))
        .route("/vans/:id", get(get_van))
        .route("/vans/:id/status", patch(update_van_status))
        .route("/vans/:id/location", patch(update_van_location))
}

#[derive(Deserialize)]
pub struct CreateVanRequest {
    pub name: String,
    pub plate_number: String,
    pub status: Option<VanStatus>,
    pub current_location: Option<Coordinate>,
    pub service_area: Option<ServiceArea>,
}

#[derive(Deserialize)]
pub struct ListVansQuery {
    pub status: Option<VanStatus>,
}

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: VanStatus,
}

#[derive(Deserialize)]
pub struct UpdateLocationRequest {
    pub location: Coordinate,
}

#[derive(Serialize)]
pub struct VanDetails {
    #[serde(flatten)]
    pub van: Van,
    pub technicians: Vec<Technician>,
    pub active_jobs: Vec<Job>,
}

async fn create_van(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateVanRequest>,
) -> Result<Json<Van>, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("name cannot be empty".to_string()));
    }

    if let Some(area) = &payload.service_area {
        if area.radius_miles.is_nan() || area.radius_miles < 0.0 {
            return Err(AppError::BadRequest(
                "service area radius must be >= 0".to_string(),
            ));
        }
    }

    let now = Utc::now();
    let van = Van {
        id: EntityKind::Van.new_id(),
        name: payload.name,
        plate_number: payload.plate_number,
        status: payload.status.unwrap_or(VanStatus::Available),
        assigned_technician_ids: Vec::new(),
        current_location: payload.current_location,
        service_area: payload.service_area,
        created_at: now,
        updated_at: now,
    };

    state.vans.insert(van.id.clone(), van.clone());
    info!(van_id = %van.id, "van registered");
    Ok(Json(van))
}

async fn list_vans(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListVansQuery>,
) -> Json<Vec<Van>> {
    let vans = state
        .van_list()
        .into_iter()
        .filter(|van| query.status.is_none_or(|status| van.status == status))
        .collect();
    Json(vans)
}

async fn get_van(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<VanDetails>, AppError> {
    let van = state
        .vans
        .get(&id)
        .map(|entry| entry.value().clone())
        .ok_or_else(|| AppError::NotFound(format!("van {} not found", id)))?;

    let technicians = state
        .technician_list()
        .into_iter()
        .filter(|technician| van.carries_technician(&technician.id))
        .collect();

    let active_jobs = state
        .job_list()
        .into_iter()
        .filter(|job| job.van_id == van.id && job.status == JobStatus::InProgress)
        .collect();

    Ok(Json(VanDetails {
        van,
        technicians,
        active_jobs,
    }))
}

async fn update_van_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<Van>, AppError> {
    let mut van = state
        .vans
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("van {} not found", id)))?;

    van.status = payload.status;
    van.updated_at = Utc::now();

    Ok(Json(van.clone()))
}

async fn update_van_location(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateLocationRequest>,
) -> Result<Json<Van>, AppError> {
    let mut van = state
        .vans
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("van {} not found", id)))?;

    van.current_location = Some(payload.location);
    van.updated_at = Utc::now();

    Ok(Json(van.clone()))
}
