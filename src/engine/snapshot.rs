use std::collections::HashMap;

use crate::models::technician::Technician;
use crate::models::van::Van;

/// A point-in-time, read-only copy of the fleet with an id index for lookups.
#[derive(Debug, Clone, Default)]
pub struct FleetSnapshot {
    vans: Vec<Van>,
    technicians: Vec<Technician>,
    van_index: HashMap<String, usize>,
    technician_index: HashMap<String, usize>,
}

impl FleetSnapshot {
    pub fn new(vans: Vec<Van>, technicians: Vec<Technician>) -> Self {
        // First occurrence wins when an id repeats.
        let mut van_index = HashMap::with_capacity(vans.len());
        for (position, van) in vans.iter().enumerate() {
            van_index.entry(van.id.clone()).or_insert(position);
        }

        let mut technician_index = HashMap::with_capacity(technicians.len());
        for (position, technician) in technicians.iter().enumerate() {
            technician_index
                .entry(technician.id.clone())
                .or_insert(position);
        }

        Self {
            vans,
            technicians,
            van_index,
            technician_index,
        }
    }

    pub fn find_van_by_id(&self, id: &str) -> Option<&Van> {
        self.van_index.get(id).map(|&position| &self.vans[position])
    }

    pub fn find_technician_by_id(&self, id: &str) -> Option<&Technician> {
        self.technician_index
            .get(id)
            .map(|&position| &self.technicians[position])
    }
}

#[cfg(test)]
mod tests {
    use super::FleetSnapshot;
    use crate::engine::testing::{technician, van};
    use crate::models::technician::TechnicianStatus;
    use crate::models::van::VanStatus;

    #[test]
    fn lookups_find_by_id_and_first_duplicate_wins() {
        let mut shadow = van("v1", VanStatus::Offline, &[], None);
        shadow.name = "shadow".to_string();
        let fleet = FleetSnapshot::new(
            vec![van("v1", VanStatus::Available, &[], None), shadow],
            vec![technician("t1", TechnicianStatus::Available, None)],
        );

        let found = fleet.find_van_by_id("v1").unwrap();
        assert_eq!(found.status, VanStatus::Available);
        assert_ne!(found.name, "shadow");
        assert!(fleet.find_technician_by_id("t1").is_some());
        assert!(fleet.find_van_by_id("t1").is_none());
    }
}
