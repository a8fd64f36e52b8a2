use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::Json;
use axum::Router;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::geo::Coordinate;
use crate::ids::{generate_id, EntityKind};
use crate::models::client::{Client, ClientKind, ClientLocation};
use crate::models::job::Job;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/clients", post(create_client).get(list_clients))
        .route("/clients/:id", get(get_client))
}

#[derive(Deserialize)]
pub struct NewClientLocation {
    pub name: String,
    pub address: String,
    pub location: Coordinate,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Deserialize)]
pub struct ListClientsQuery {
    pub kind: Option<ClientKind>,
}

#[derive(Deserialize)]
pub struct CreateClientRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: Option<String>,
    pub kind: ClientKind,
    #[serde(default)]
    pub locations: Vec<NewClientLocation>,
}

#[derive(Serialize)]
pub struct ClientDetails {
    #[serde(flatten)]
    pub client: Client,
    pub jobs: Vec<Job>,
}

async fn create_client(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateClientRequest>,
) -> Result<Json<Client>, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("name cannot be empty".to_string()));
    }

    if payload.locations.iter().filter(|l| l.is_default).count() > 1 {
        return Err(AppError::BadRequest(
            "at most one location can be the default".to_string(),
        ));
    }

    let locations = payload
        .locations
        .into_iter()
        .map(|location| ClientLocation {
            id: generate_id("loc"),
            name: location.name,
            address: location.address,
            location: location.location,
            is_default: location.is_default,
        })
        .collect();

    let client = Client {
        id: EntityKind::Client.new_id(),
        name: payload.name,
        email: payload.email,
        phone: payload.phone,
        company: payload.company,
        kind: payload.kind,
        locations,
        created_at: Utc::now(),
    };

    state.clients.insert(client.id.clone(), client.clone());
    Ok(Json(client))
}

async fn list_clients(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListClientsQuery>,
) -> Json<Vec<Client>> {
    let clients = state
        .client_list()
        .into_iter()
        .filter(|client| query.kind.is_none_or(|kind| client.kind == kind))
        .collect();
    Json(clients)
}

async fn get_client(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ClientDetails>, AppError> {
    let client = state
        .clients
        .get(&id)
        .map(|entry| entry.value().clone())
        .ok_or_else(|| AppError::NotFound(format!("client {} not found", id)))?;

    let jobs = state
        .job_list()
        .into_iter()
        .filter(|job| job.client_id == client.id)
        .collect();

    Ok(Json(ClientDetails { client, jobs }))
}
