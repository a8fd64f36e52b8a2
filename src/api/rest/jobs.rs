use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::{get, patch, post};
use axum::Json;
use axum::Router;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{info, warn};

use crate::api::rest::dispatch::evaluate_assignment;
use crate::error::AppError;
use crate::geo::Coordinate;
use crate::ids::EntityKind;
use crate::models::job::{Job, JobStatus, Priority, ProposedAssignment, ServiceType};
use crate::models::notification::{Notification, NotificationKind};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/jobs", post(create_job).get(list_jobs))
        .route("/jobs/:id", get(get_job))
        .route("/jobs/:id/status", patch(update_job_status))
}

#[derive(Deserialize)]
pub struct CreateJobRequest {
    pub client_id: String,
    pub van_id: String,
    pub technician_id: String,
    pub service_type: ServiceType,
    pub priority: Option<Priority>,
    pub location: Coordinate,
    pub address: String,
    pub scheduled_at: DateTime<Utc>,
    pub estimated_duration_minutes: u32,
    pub revenue: f64,
    #[serde(default)]
    pub costs: f64,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct ListJobsQuery {
    pub status: Option<JobStatus>,
}

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: JobStatus,
}

async fn create_job(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateJobRequest>,
) -> Result<Json<Job>, AppError> {
    if !state.clients.contains_key(&payload.client_id) {
        return Err(AppError::NotFound(format!(
            "client {} not found",
            payload.client_id
        )));
    }

    let proposed = ProposedAssignment {
        van_id: payload.van_id,
        technician_id: payload.technician_id,
    };
    let check = evaluate_assignment(&state, &proposed);
    if !check.is_valid() {
        warn!(
            van_id = %proposed.van_id,
            technician_id = %proposed.technician_id,
            errors = ?check.errors(),
            "job rejected"
        );
        return Err(AppError::InvalidAssignment(check.errors()));
    }

    let now = Utc::now();
    let job = Job {
        id: EntityKind::Job.new_id(),
        job_number: state.next_job_number(),
        client_id: payload.client_id,
        van_id: proposed.van_id,
        technician_id: proposed.technician_id,
        service_type: payload.service_type,
        status: JobStatus::Scheduled,
        priority: payload.priority.unwrap_or(Priority::Medium),
        location: payload.location,
        address: payload.address,
        scheduled_at: payload.scheduled_at,
        estimated_duration_minutes: payload.estimated_duration_minutes,
        revenue: payload.revenue,
        costs: payload.costs,
        notes: payload.notes,
        created_at: now,
        updated_at: now,
    };

    state.jobs.insert(job.id.clone(), job.clone());
    state.metrics.jobs_created_total.inc();

    state.publish_notification(Notification {
        id: EntityKind::Notification.new_id(),
        kind: NotificationKind::JobAssignment,
        title: format!("New job {}", job.job_number),
        message: format!(
            "Scheduled for {} at {}",
            job.scheduled_at.format("%Y-%m-%d %H:%M UTC"),
            job.address
        ),
        priority: job.priority,
        recipient_id: Some(job.technician_id.clone()),
        entity_id: Some(job.id.clone()),
        read: false,
        created_at: now,
    });

    info!(
        job_id = %job.id,
        van_id = %job.van_id,
        technician_id = %job.technician_id,
        "job scheduled"
    );

    Ok(Json(job))
}

async fn list_jobs(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListJobsQuery>,
) -> Json<Vec<Job>> {
    let jobs = state
        .job_list()
        .into_iter()
        .filter(|job| query.status.is_none_or(|status| job.status == status))
        .collect();
    Json(jobs)
}

async fn get_job(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Job>, AppError> {
    let job = state
        .jobs
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("job {} not found", id)))?;

    Ok(Json(job.value().clone()))
}

async fn update_job_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<Job>, AppError> {
    let mut job = state
        .jobs
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("job {} not found", id)))?;

    if !job.status.is_open() && job.status != payload.status {
        return Err(AppError::Conflict(format!(
            "job {} is already {:?}",
            id, job.status
        )));
    }

    job.status = payload.status;
    job.updated_at = Utc::now();

    Ok(Json(job.clone()))
}
