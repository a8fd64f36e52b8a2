use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::{get, patch, post};
use axum::Json;
use axum::Router;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::engine::dashboard::{technician_workload, TechnicianWorkload};
use crate::error::AppError;
use crate::ids::EntityKind;
use crate::models::job::Job;
use crate::models::technician::{Technician, TechnicianStatus};
use crate::models::van::Van;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/technicians",
            post(create_technician).get(list_technicians),
        )
        .route("/technicians/:id", get(get_technician))
        .route("/technicians/:id/status", patch(update_technician_status))
        .route("/technicians/:id/van", patch(bind_technician_van))
}

#[derive(Deserialize)]
pub struct CreateTechnicianRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub status: Option<TechnicianStatus>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub rating: Option<f64>,
}

#[derive(Deserialize)]
pub struct ListTechniciansQuery {
    pub status: Option<TechnicianStatus>,
}

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: TechnicianStatus,
}

#[derive(Deserialize)]
pub struct BindVanRequest {
    pub van_id: Option<String>,
}

#[derive(Serialize)]
pub struct TechnicianDetails {
    #[serde(flatten)]
    pub technician: Technician,
    pub van: Option<Van>,
    pub jobs: Vec<Job>,
    pub workload: TechnicianWorkload,
}

async fn create_technician(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateTechnicianRequest>,
) -> Result<Json<Technician>, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("name cannot be empty".to_string()));
    }

    if !payload.email.contains('@') {
        return Err(AppError::BadRequest("email is not valid".to_string()));
    }

    let now = Utc::now();
    let technician = Technician {
        id: EntityKind::Technician.new_id(),
        name: payload.name,
        email: payload.email,
        phone: payload.phone,
        status: payload.status.unwrap_or(TechnicianStatus::Available),
        assigned_van_id: None,
        skills: payload.skills,
        rating: payload.rating.unwrap_or(0.0).clamp(0.0, 5.0),
        created_at: now,
        updated_at: now,
    };

    state
        .technicians
        .insert(technician.id.clone(), technician.clone());
    info!(technician_id = %technician.id, "technician registered");
    Ok(Json(technician))
}

async fn list_technicians(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListTechniciansQuery>,
) -> Json<Vec<Technician>> {
    let technicians = state
        .technician_list()
        .into_iter()
        .filter(|technician| query.status.is_none_or(|status| technician.status == status))
        .collect();
    Json(technicians)
}

async fn get_technician(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<TechnicianDetails>, AppError> {
    let technician = state
        .technicians
        .get(&id)
        .map(|entry| entry.value().clone())
        .ok_or_else(|| AppError::NotFound(format!("technician {} not found", id)))?;

    let van = state
        .van_list()
        .into_iter()
        .find(|van| van.carries_technician(&technician.id));

    let jobs: Vec<Job> = state
        .job_list()
        .into_iter()
        .filter(|job| job.technician_id == technician.id)
        .collect();
    let workload = technician_workload(&technician.id, &jobs);

    Ok(Json(TechnicianDetails {
        technician,
        van,
        jobs,
        workload,
    }))
}

async fn update_technician_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<Technician>, AppError> {
    let mut technician = state
        .technicians
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("technician {} not found", id)))?;

    technician.status = payload.status;
    technician.updated_at = Utc::now();

    Ok(Json(technician.clone()))
}

/// Binds a technician to a van on both sides, dropping them from any van
/// they were on before. A null `van_id` just unbinds.
async fn bind_technician_van(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<BindVanRequest>,
) -> Result<Json<Technician>, AppError> {
    let previous_van_id = state
        .technicians
        .get(&id)
        .map(|entry| entry.assigned_van_id.clone())
        .ok_or_else(|| AppError::NotFound(format!("technician {} not found", id)))?;

    if let Some(van_id) = &payload.van_id {
        if !state.vans.contains_key(van_id) {
            return Err(AppError::NotFound(format!("van {} not found", van_id)));
        }
    }

    let now = Utc::now();

    // Each guard is dropped before the next map access.
    for mut van in state.vans.iter_mut() {
        let keep = payload.van_id.as_deref() == Some(van.id.as_str());
        if !keep && van.carries_technician(&id) {
            van.assigned_technician_ids.retain(|tid| tid != &id);
            van.updated_at = now;
        }
    }

    if let Some(van_id) = &payload.van_id {
        if let Some(mut van) = state.vans.get_mut(van_id) {
            if !van.carries_technician(&id) {
                van.assigned_technician_ids.push(id.clone());
                van.updated_at = now;
            }
        }
    }

    let mut technician = state
        .technicians
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("technician {} not found", id)))?;
    technician.assigned_van_id = payload.van_id.clone();
    technician.updated_at = now;

    info!(
        technician_id = %id,
        previous_van_id = ?previous_van_id,
        van_id = ?payload.van_id,
        "technician van binding updated"
    );

    Ok(Json(technician.clone()))
}
