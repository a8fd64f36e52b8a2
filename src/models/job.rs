use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    OilChange,
    FilterReplacement,
    Maintenance,
    Inspection,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl JobStatus {
    pub fn is_open(self) -> bool {
        matches!(self, JobStatus::Scheduled | JobStatus::InProgress)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub job_number: String,
    pub client_id: String,
    pub van_id: String,
    pub technician_id: String,
    pub service_type: ServiceType,
    pub status: JobStatus,
    pub priority: Priority,
    pub location: Coordinate,
    pub address: String,
    pub scheduled_at: DateTime<Utc>,
    pub estimated_duration_minutes: u32,
    pub revenue: f64,
    pub costs: f64,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The slice of a job the dispatch evaluator looks at.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProposedAssignment {
    pub van_id: String,
    pub technician_id: String,
}
