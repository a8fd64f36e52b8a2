use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ClientKind {
    Individual,
    Business,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientLocation {
    pub id: String,
    pub name: String,
    pub address: String,
    pub location: Coordinate,
    pub is_default: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: Option<String>,
    pub kind: ClientKind,
    pub locations: Vec<ClientLocation>,
    pub created_at: DateTime<Utc>,
}
