use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// Canonical van status. The older dashboard vocabulary (`active`,
/// `inactive`) is still accepted on input and folded into this set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum VanStatus {
    #[serde(alias = "active")]
    Available,
    OnJob,
    Maintenance,
    #[serde(alias = "inactive")]
    Offline,
}

impl VanStatus {
    pub fn is_assignable(self) -> bool {
        self == VanStatus::Available
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ServiceArea {
    pub center: Coordinate,
    pub radius_miles: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Van {
    pub id: String,
    pub name: String,
    pub plate_number: String,
    pub status: VanStatus,
    pub assigned_technician_ids: Vec<String>,
    pub current_location: Option<Coordinate>,
    pub service_area: Option<ServiceArea>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Van {
    /// Where the van is taken to be: its last reported position, else the
    /// middle of its service area.
    pub fn reference_location(&self) -> Option<&Coordinate> {
        self.current_location
            .as_ref()
            .or_else(|| self.service_area.as_ref().map(|area| &area.center))
    }

    pub fn carries_technician(&self, technician_id: &str) -> bool {
        self.assigned_technician_ids
            .iter()
            .any(|id| id == technician_id)
    }
}

#[cfg(test)]
mod tests {
    use super::VanStatus;

    #[test]
    fn legacy_status_names_map_to_canonical_set() {
        let active: VanStatus = serde_json::from_str("\"active\"").unwrap();
        let inactive: VanStatus = serde_json::from_str("\"inactive\"").unwrap();
        let on_job: VanStatus = serde_json::from_str("\"on_job\"").unwrap();

        assert_eq!(active, VanStatus::Available);
        assert_eq!(inactive, VanStatus::Offline);
        assert_eq!(on_job, VanStatus::OnJob);
        assert_eq!(serde_json::to_string(&active).unwrap(), "\"available\"");
    }

    #[test]
    fn only_available_is_assignable() {
        assert!(VanStatus::Available.is_assignable());
        assert!(!VanStatus::OnJob.is_assignable());
        assert!(!VanStatus::Maintenance.is_assignable());
        assert!(!VanStatus::Offline.is_assignable());
    }
}
