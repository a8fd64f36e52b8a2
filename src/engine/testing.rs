use chrono::Utc;

use crate::geo::Coordinate;
use crate::models::technician::{Technician, TechnicianStatus};
use crate::models::van::{ServiceArea, Van, VanStatus};

pub fn van(
    id: &str,
    status: VanStatus,
    technicians: &[&str],
    location: Option<Coordinate>,
) -> Van {
    Van {
        id: id.to_string(),
        name: format!("Van {id}"),
        plate_number: "TEST-000".to_string(),
        status,
        assigned_technician_ids: technicians.iter().map(|t| t.to_string()).collect(),
        current_location: location,
        service_area: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn van_at(id: &str, status: VanStatus, location: Coordinate, radius_miles: f64) -> Van {
    let mut van = van(id, status, &[], Some(location));
    van.service_area = Some(ServiceArea {
        center: location,
        radius_miles,
    });
    van
}

pub fn technician(id: &str, status: TechnicianStatus, van_id: Option<&str>) -> Technician {
    Technician {
        id: id.to_string(),
        name: format!("Tech {id}"),
        email: format!("{id}@example.com"),
        phone: "555-0100".to_string(),
        status,
        assigned_van_id: van_id.map(str::to_string),
        skills: Vec::new(),
        rating: 4.5,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}
