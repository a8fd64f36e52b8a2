use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::sync::broadcast;

use crate::engine::snapshot::FleetSnapshot;
use crate::models::client::Client;
use crate::models::inventory::InventoryItem;
use crate::models::job::Job;
use crate::models::notification::Notification;
use crate::models::technician::Technician;
use crate::models::van::Van;
use crate::observability::metrics::Metrics;

pub struct AppState {
    pub vans: DashMap<String, Van>,
    pub technicians: DashMap<String, Technician>,
    pub clients: DashMap<String, Client>,
    pub jobs: DashMap<String, Job>,
    pub inventory: DashMap<String, InventoryItem>,
    pub notifications: DashMap<String, Notification>,
    pub notification_events_tx: broadcast::Sender<Notification>,
    pub metrics: Metrics,
    job_sequence: AtomicU64,
}

impl AppState {
    pub fn new(event_buffer_size: usize) -> Self {
        let (notification_events_tx, _unused_rx) = broadcast::channel(event_buffer_size);

        Self {
            vans: DashMap::new(),
            technicians: DashMap::new(),
            clients: DashMap::new(),
            jobs: DashMap::new(),
            inventory: DashMap::new(),
            notifications: DashMap::new(),
            notification_events_tx,
            metrics: Metrics::new(),
            job_sequence: AtomicU64::new(0),
        }
    }

    pub fn fleet_snapshot(&self) -> FleetSnapshot {
        FleetSnapshot::new(self.van_list(), self.technician_list())
    }

    pub fn van_list(&self) -> Vec<Van> {
        ordered(&self.vans, |van| (van.created_at, van.id.clone()))
    }

    pub fn technician_list(&self) -> Vec<Technician> {
        ordered(&self.technicians, |t| (t.created_at, t.id.clone()))
    }

    pub fn client_list(&self) -> Vec<Client> {
        ordered(&self.clients, |c| (c.created_at, c.id.clone()))
    }

    pub fn job_list(&self) -> Vec<Job> {
        ordered(&self.jobs, |job| (job.created_at, job.id.clone()))
    }

    pub fn inventory_list(&self) -> Vec<InventoryItem> {
        ordered(&self.inventory, |item| (item.created_at, item.id.clone()))
    }

    pub fn notification_list(&self) -> Vec<Notification> {
        ordered(&self.notifications, |n| (n.created_at, n.id.clone()))
    }

    /// Human-facing job number, `J-00001` upwards.
    pub fn next_job_number(&self) -> String {
        let n = self.job_sequence.fetch_add(1, Ordering::Relaxed) + 1;
        format!("J-{n:05}")
    }

    pub fn publish_notification(&self, notification: Notification) {
        self.notifications
            .insert(notification.id.clone(), notification.clone());
        // No subscribers is fine; the record is already stored.
        let _ = self.notification_events_tx.send(notification);
    }
}

/// Copies a map's values out in creation order so callers see a stable
/// sequence regardless of shard layout.
fn ordered<T, F>(map: &DashMap<String, T>, key: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> (DateTime<Utc>, String),
{
    let mut values: Vec<T> = map.iter().map(|entry| entry.value().clone()).collect();
    values.sort_by_cached_key(key);
    values
}
