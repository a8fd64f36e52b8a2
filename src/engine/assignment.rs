use serde::Serialize;
use thiserror::Error;

use crate::engine::snapshot::FleetSnapshot;
use crate::models::job::ProposedAssignment;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignmentViolation {
    #[error("van {0} not found")]
    VanNotFound(String),

    #[error("van {0} is not available")]
    VanUnavailable(String),

    #[error("technician {0} not found")]
    TechnicianNotFound(String),

    #[error("technician {0} is not available")]
    TechnicianUnavailable(String),

    #[error("technician {technician_id} is bound to a different van ({bound_van_id})")]
    TechnicianBoundToOtherVan {
        technician_id: String,
        bound_van_id: String,
    },

    #[error("technician {technician_id} is not assigned to van {van_id}")]
    TechnicianNotOnVan {
        technician_id: String,
        van_id: String,
    },
}

/// Outcome of checking one proposed assignment. Holds every rule the
/// proposal breaks, in rule order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentCheck {
    pub violations: Vec<AssignmentViolation>,
}

impl AssignmentCheck {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn errors(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }

    pub fn report(&self) -> ValidationReport {
        ValidationReport {
            is_valid: self.is_valid(),
            errors: self.errors(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

pub fn validate_assignment(
    proposed: &ProposedAssignment,
    fleet: &FleetSnapshot,
) -> AssignmentCheck {
    let mut violations = Vec::new();

    let van = fleet.find_van_by_id(&proposed.van_id);
    match van {
        None => violations.push(AssignmentViolation::VanNotFound(proposed.van_id.clone())),
        Some(van) if !van.status.is_assignable() => {
            violations.push(AssignmentViolation::VanUnavailable(van.id.clone()))
        }
        Some(_) => {}
    }

    let technician = fleet.find_technician_by_id(&proposed.technician_id);
    match technician {
        None => violations.push(AssignmentViolation::TechnicianNotFound(
            proposed.technician_id.clone(),
        )),
        Some(technician) if !technician.status.is_assignable() => violations.push(
            AssignmentViolation::TechnicianUnavailable(technician.id.clone()),
        ),
        Some(_) => {}
    }

    if let (Some(van), Some(technician)) = (van, technician) {
        if let Some(bound_van_id) = technician.assigned_van_id.as_deref() {
            if bound_van_id != van.id {
                violations.push(AssignmentViolation::TechnicianBoundToOtherVan {
                    technician_id: technician.id.clone(),
                    bound_van_id: bound_van_id.to_string(),
                });
            }
        }

        if !van.carries_technician(&technician.id) {
            violations.push(AssignmentViolation::TechnicianNotOnVan {
                technician_id: technician.id.clone(),
                van_id: van.id.clone(),
            });
        }
    }

    AssignmentCheck { violations }
}

#[cfg(test)]
mod tests {
    use super::{validate_assignment, AssignmentViolation};
    use crate::engine::snapshot::FleetSnapshot;
    use crate::engine::testing::{technician, van};
    use crate::models::job::ProposedAssignment;
    use crate::models::technician::TechnicianStatus;
    use crate::models::van::VanStatus;

    fn proposal(van_id: &str, technician_id: &str) -> ProposedAssignment {
        ProposedAssignment {
            van_id: van_id.to_string(),
            technician_id: technician_id.to_string(),
        }
    }

    #[test]
    fn consistent_pairing_is_valid() {
        let fleet = FleetSnapshot::new(
            vec![van("v1", VanStatus::Available, &["t1"], None)],
            vec![technician("t1", TechnicianStatus::Available, Some("v1"))],
        );

        let check = validate_assignment(&proposal("v1", "t1"), &fleet);

        assert!(check.is_valid());
        assert!(check.errors().is_empty());
    }

    #[test]
    fn missing_van_and_technician_report_two_errors() {
        let fleet = FleetSnapshot::default();

        let check = validate_assignment(&proposal("ghost-van", "ghost-tech"), &fleet);

        assert!(!check.is_valid());
        assert_eq!(
            check.violations,
            vec![
                AssignmentViolation::VanNotFound("ghost-van".to_string()),
                AssignmentViolation::TechnicianNotFound("ghost-tech".to_string()),
            ]
        );
    }

    #[test]
    fn technician_missing_from_van_roster_is_rejected() {
        let fleet = FleetSnapshot::new(
            vec![van("v1", VanStatus::Available, &["t2"], None)],
            vec![technician("t1", TechnicianStatus::Available, None)],
        );

        let check = validate_assignment(&proposal("v1", "t1"), &fleet);

        assert!(!check.is_valid());
        assert_eq!(check.violations.len(), 1);
        assert!(check.errors()[0].contains("not assigned to van v1"));
    }

    #[test]
    fn every_broken_rule_is_reported_at_once() {
        let fleet = FleetSnapshot::new(
            vec![van("v1", VanStatus::Maintenance, &[], None)],
            vec![technician("t1", TechnicianStatus::OnBreak, Some("v9"))],
        );

        let check = validate_assignment(&proposal("v1", "t1"), &fleet);

        assert_eq!(
            check.violations,
            vec![
                AssignmentViolation::VanUnavailable("v1".to_string()),
                AssignmentViolation::TechnicianUnavailable("t1".to_string()),
                AssignmentViolation::TechnicianBoundToOtherVan {
                    technician_id: "t1".to_string(),
                    bound_van_id: "v9".to_string(),
                },
                AssignmentViolation::TechnicianNotOnVan {
                    technician_id: "t1".to_string(),
                    van_id: "v1".to_string(),
                },
            ]
        );
    }

    #[test]
    fn pairing_rules_skipped_when_one_side_is_missing() {
        let fleet = FleetSnapshot::new(
            vec![],
            vec![technician("t1", TechnicianStatus::Available, Some("v9"))],
        );

        let check = validate_assignment(&proposal("v1", "t1"), &fleet);

        assert_eq!(
            check.violations,
            vec![AssignmentViolation::VanNotFound("v1".to_string())]
        );
    }

    #[test]
    fn report_mirrors_check() {
        let fleet = FleetSnapshot::default();
        let report = validate_assignment(&proposal("a", "b"), &fleet).report();

        assert!(!report.is_valid);
        assert_eq!(report.errors, vec!["van a not found", "technician b not found"]);
    }
}
