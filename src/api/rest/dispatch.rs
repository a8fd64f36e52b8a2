use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::routing::post;
use axum::Json;
use axum::Router;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::engine::assignment::{validate_assignment, AssignmentCheck, ValidationReport};
use crate::engine::selection::{recommend_van, RecommendationReason};
use crate::geo::Coordinate;
use crate::models::job::ProposedAssignment;
use crate::models::van::Van;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/dispatch/validate", post(validate))
        .route("/dispatch/recommend", post(recommend))
}

#[derive(Deserialize)]
pub struct RecommendRequest {
    pub location: Option<Coordinate>,
}

#[derive(Serialize)]
pub struct RecommendResponse {
    pub van: Option<Van>,
    pub distance_miles: Option<f64>,
    pub reason: Option<RecommendationReason>,
}

/// Validates against a fresh snapshot and records the outcome.
pub(crate) fn evaluate_assignment(
    state: &AppState,
    proposed: &ProposedAssignment,
) -> AssignmentCheck {
    let fleet = state.fleet_snapshot();

    let start = Instant::now();
    let check = validate_assignment(proposed, &fleet);
    state
        .metrics
        .record_validation(check.is_valid(), start.elapsed().as_secs_f64());

    debug!(
        van_id = %proposed.van_id,
        technician_id = %proposed.technician_id,
        violations = check.violations.len(),
        "assignment evaluated"
    );

    check
}

async fn validate(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ProposedAssignment>,
) -> Json<ValidationReport> {
    Json(evaluate_assignment(&state, &payload).report())
}

async fn recommend(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RecommendRequest>,
) -> Json<RecommendResponse> {
    let vans = state.van_list();

    let start = Instant::now();
    let recommendation = recommend_van(payload.location.as_ref(), &vans);
    let elapsed = start.elapsed().as_secs_f64();

    let response = match recommendation {
        Some(recommendation) => {
            let outcome = match recommendation.reason {
                RecommendationReason::NearestInRange => "in_range",
                RecommendationReason::FallbackOutOfRange => "fallback",
            };
            state.metrics.record_recommendation(outcome, elapsed);
            info!(
                van_id = %recommendation.van.id,
                distance_miles = recommendation.distance_miles,
                outcome,
                "van recommended"
            );

            RecommendResponse {
                van: Some(recommendation.van.clone()),
                distance_miles: Some(recommendation.distance_miles),
                reason: Some(recommendation.reason),
            }
        }
        None => {
            state.metrics.record_recommendation("none", elapsed);
            info!("no van available to recommend");

            RecommendResponse {
                van: None,
                distance_miles: None,
                reason: None,
            }
        }
    };

    Json(response)
}
