use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical technician status. HR-flow states from the older roster
/// (`invited`, `onboarding`, `suspended`, `inactive`) all read as off duty.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TechnicianStatus {
    #[serde(alias = "active")]
    Available,
    #[serde(alias = "on_duty")]
    OnJob,
    OnBreak,
    #[serde(
        alias = "inactive",
        alias = "invited",
        alias = "onboarding",
        alias = "suspended"
    )]
    OffDuty,
}

impl TechnicianStatus {
    pub fn is_assignable(self) -> bool {
        self == TechnicianStatus::Available
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Technician {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub status: TechnicianStatus,
    pub assigned_van_id: Option<String>,
    pub skills: Vec<String>,
    pub rating: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::TechnicianStatus;

    #[test]
    fn roster_states_collapse_to_off_duty() {
        for raw in ["\"inactive\"", "\"invited\"", "\"onboarding\"", "\"suspended\""] {
            let status: TechnicianStatus = serde_json::from_str(raw).unwrap();
            assert_eq!(status, TechnicianStatus::OffDuty, "{raw}");
        }

        let active: TechnicianStatus = serde_json::from_str("\"active\"").unwrap();
        assert_eq!(active, TechnicianStatus::Available);
        assert!(active.is_assignable());
        assert!(!TechnicianStatus::OnBreak.is_assignable());
    }
}
