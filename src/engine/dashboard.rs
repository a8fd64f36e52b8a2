use chrono::NaiveDate;
use serde::Serialize;

use crate::models::inventory::InventoryItem;
use crate::models::job::{Job, JobStatus};
use crate::models::notification::Notification;
use crate::models::technician::Technician;
use crate::models::van::Van;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardMetrics {
    pub total_jobs: usize,
    pub todays_jobs: usize,
    pub available_vans: usize,
    pub available_technicians: usize,
    pub scheduled_jobs: usize,
    pub in_progress_jobs: usize,
    pub completed_jobs: usize,
    pub unread_notifications: usize,
    pub completed_revenue: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TechnicianWorkload {
    pub open_jobs: usize,
    pub scheduled_jobs: usize,
    pub in_progress_jobs: usize,
}

/// `today` is a UTC calendar date.
pub fn dashboard_metrics(
    jobs: &[Job],
    vans: &[Van],
    technicians: &[Technician],
    notifications: &[Notification],
    today: NaiveDate,
) -> DashboardMetrics {
    let mut metrics = DashboardMetrics {
        total_jobs: jobs.len(),
        available_vans: vans.iter().filter(|v| v.status.is_assignable()).count(),
        available_technicians: technicians
            .iter()
            .filter(|t| t.status.is_assignable())
            .count(),
        unread_notifications: notifications.iter().filter(|n| !n.read).count(),
        ..DashboardMetrics::default()
    };

    for job in jobs {
        if job.scheduled_at.date_naive() == today {
            metrics.todays_jobs += 1;
        }

        match job.status {
            JobStatus::Scheduled => metrics.scheduled_jobs += 1,
            JobStatus::InProgress => metrics.in_progress_jobs += 1,
            JobStatus::Completed => {
                metrics.completed_jobs += 1;
                metrics.completed_revenue += job.revenue;
            }
            JobStatus::Cancelled => {}
        }
    }

    metrics
}

pub fn technician_workload(technician_id: &str, jobs: &[Job]) -> TechnicianWorkload {
    jobs.iter()
        .filter(|job| job.technician_id == technician_id && job.status.is_open())
        .fold(TechnicianWorkload::default(), |mut workload, job| {
            workload.open_jobs += 1;
            if job.status == JobStatus::InProgress {
                workload.in_progress_jobs += 1;
            } else {
                workload.scheduled_jobs += 1;
            }
            workload
        })
}

pub fn low_stock(items: &[InventoryItem]) -> Vec<&InventoryItem> {
    items.iter().filter(|item| item.needs_restock()).collect()
}
