use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InventoryKind {
    Oil,
    Filter,
    Fluid,
    Tools,
    Misc,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: String,
    pub part_id: String,
    pub name: String,
    pub kind: InventoryKind,
    pub unit_cost: f64,
    pub warehouse_quantity: u32,
    pub restock_threshold: u32,
    pub created_at: DateTime<Utc>,
}

impl InventoryItem {
    pub fn needs_restock(&self) -> bool {
        self.warehouse_quantity <= self.restock_threshold
    }
}
