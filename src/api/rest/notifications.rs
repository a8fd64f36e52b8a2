use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::{get, patch};
use axum::Json;
use axum::Router;
use serde::Deserialize;

use crate::error::AppError;
use crate::models::notification::Notification;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/notifications", get(list_notifications))
        .route("/notifications/:id/read", patch(mark_read))
}

#[derive(Deserialize)]
pub struct ListNotificationsQuery {
    #[serde(default)]
    pub unread: bool,
}

async fn list_notifications(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListNotificationsQuery>,
) -> Json<Vec<Notification>> {
    let notifications = state
        .notification_list()
        .into_iter()
        .filter(|n| !query.unread || !n.read)
        .collect();
    Json(notifications)
}

async fn mark_read(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Notification>, AppError> {
    let mut notification = state
        .notifications
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("notification {} not found", id)))?;

    notification.read = true;

    Ok(Json(notification.clone()))
}
