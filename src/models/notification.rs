use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::job::Priority;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    LowInventory,
    JobAssignment,
    MaintenanceDue,
    General,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub priority: Priority,
    pub recipient_id: Option<String>,
    pub entity_id: Option<String>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}
