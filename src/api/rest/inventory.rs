use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::Json;
use axum::Router;
use chrono::Utc;
use serde::Deserialize;
use tracing::warn;

use crate::engine::dashboard::low_stock;
use crate::error::AppError;
use crate::ids::EntityKind;
use crate::models::inventory::{InventoryItem, InventoryKind};
use crate::models::job::Priority;
use crate::models::notification::{Notification, NotificationKind};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/inventory", post(create_item).get(list_items))
        .route("/inventory/low-stock", get(list_low_stock))
}

#[derive(Deserialize)]
pub struct CreateItemRequest {
    pub part_id: String,
    pub name: String,
    pub kind: InventoryKind,
    pub unit_cost: f64,
    pub warehouse_quantity: u32,
    pub restock_threshold: u32,
}

impl CreateItemRequest {
    fn validate(&self) -> Result<(), AppError> {
        if self.part_id.trim().is_empty() {
            return Err(AppError::BadRequest("part_id cannot be empty".to_string()));
        }

        if self.unit_cost.is_nan() || self.unit_cost < 0.0 {
            return Err(AppError::BadRequest("unit_cost must be >= 0".to_string()));
        }

        Ok(())
    }
}

async fn create_item(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateItemRequest>,
) -> Result<Json<InventoryItem>, AppError> {
    payload.validate()?;

    let item = InventoryItem {
        id: EntityKind::InventoryItem.new_id(),
        part_id: payload.part_id,
        name: payload.name,
        kind: payload.kind,
        unit_cost: payload.unit_cost,
        warehouse_quantity: payload.warehouse_quantity,
        restock_threshold: payload.restock_threshold,
        created_at: Utc::now(),
    };

    state.inventory.insert(item.id.clone(), item.clone());

    if item.needs_restock() {
        warn!(
            item_id = %item.id,
            quantity = item.warehouse_quantity,
            "item below restock threshold"
        );
        state.publish_notification(Notification {
            id: EntityKind::Notification.new_id(),
            kind: NotificationKind::LowInventory,
            title: "Low inventory".to_string(),
            message: format!(
                "{} ({}) is down to {} units",
                item.name, item.part_id, item.warehouse_quantity
            ),
            priority: Priority::High,
            recipient_id: None,
            entity_id: Some(item.id.clone()),
            read: false,
            created_at: Utc::now(),
        });
    }

    Ok(Json(item))
}

async fn list_items(State(state): State<Arc<AppState>>) -> Json<Vec<InventoryItem>> {
    Json(state.inventory_list())
}

async fn list_low_stock(State(state): State<Arc<AppState>>) -> Json<Vec<InventoryItem>> {
    let items = state.inventory_list();
    Json(low_stock(&items).into_iter().cloned().collect())
}

#[cfg(test)]
mod tests {
    use super::CreateItemRequest;
    use crate::models::inventory::InventoryKind;

    fn request(unit_cost: f64) -> CreateItemRequest {
        CreateItemRequest {
            part_id: "OF-100".to_string(),
            name: "Oil filter".to_string(),
            kind: InventoryKind::Filter,
            unit_cost,
            warehouse_quantity: 10,
            restock_threshold: 2,
        }
    }

    #[test]
    fn unit_cost_must_be_a_non_negative_number() {
        assert!(request(0.0).validate().is_ok());
        assert!(request(12.5).validate().is_ok());
        assert!(request(-0.01).validate().is_err());
        assert!(request(f64::NAN).validate().is_err());
    }

    #[test]
    fn blank_part_id_is_rejected() {
        let mut payload = request(1.0);
        payload.part_id = "   ".to_string();
        assert!(payload.validate().is_err());
    }
}
