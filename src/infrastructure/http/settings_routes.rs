//! Cost schedule API routes

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use crate::application::ports::outbound::SettingsError;
use crate::infrastructure::state::AppState;
use crate::domain::value_objects::CostSchedule;

pub fn settings_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/settings", get(get_schedule).put(update_schedule))
        .route("/api/settings/reset", post(reset_schedule))
}

async fn get_schedule(State(state): State<Arc<AppState>>) -> Json<CostSchedule> {
    Json(state.settings_service.get().await)
}

/// Replace the cost schedule; takes effect for the next purchase or reset
async fn update_schedule(
    State(state): State<Arc<AppState>>,
    Json(schedule): Json<CostSchedule>,
) -> Result<Json<CostSchedule>, (StatusCode, String)> {
    state
        .settings_service
        .update(schedule)
        .await
        .map_err(|e| {
            let status = match e {
                SettingsError::InvalidSchedule(_) => StatusCode::BAD_REQUEST,
                SettingsError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, e.to_string())
        })?;
    Ok(Json(state.settings_service.get().await))
}

async fn reset_schedule(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CostSchedule>, (StatusCode, String)> {
    state
        .settings_service
        .reset()
        .await
        .map(Json)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}
