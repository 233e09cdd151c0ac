//! HTTP REST API routes

mod prestige_routes;
mod settings_routes;
#[cfg(test)]
mod test_support;

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::infrastructure::state::AppState;

pub use settings_routes::settings_routes;

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Ledger routes
        .route("/api/prestige", get(prestige_routes::list_records))
        .route("/api/ledger/save", post(prestige_routes::save_ledger))
        // Skill routes
        .route(
            "/api/skills/{skill}/prestige",
            get(prestige_routes::get_record).post(prestige_routes::reset_skill),
        )
        // Profession routes
        .route(
            "/api/professions/{id}/purchase",
            post(prestige_routes::purchase_profession),
        )
        // Simulated host routes
        .route(
            "/api/host/skills/{skill}/experience",
            post(prestige_routes::grant_experience),
        )
        .route("/api/host/save", put(prestige_routes::set_host_save))
        .merge(settings_routes())
}
