//! Prestige API routes
//!
//! Endpoints for viewing the ledger, resetting skills and buying
//! professions. These stand in for the in-game prestige menu.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::services::{PurchaseError, PurchaseReceipt, ResetOutcome};
use crate::domain::entities::PrestigeRecord;
use crate::domain::services::LookupFailure;
use crate::domain::value_objects::{ProfessionId, SkillId};
use crate::infrastructure::state::AppState;

/// Request to add experience to the simulated player
#[derive(Debug, Deserialize)]
pub struct GrantExperienceRequest {
    pub amount: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExperienceResponse {
    pub skill: String,
    pub experience: i64,
}

/// Whether the simulated player has a save loaded
#[derive(Debug, Serialize, Deserialize)]
pub struct HostSaveState {
    pub loaded: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SaveLedgerResponse {
    pub saved: usize,
}

fn known_skill(state: &AppState, skill: String) -> Result<SkillId, (StatusCode, String)> {
    let skill = SkillId::from(skill);
    if state.prestige_service.knows_skill(&skill) {
        Ok(skill)
    } else {
        Err((StatusCode::NOT_FOUND, format!("Skill not found: {}", skill)))
    }
}

/// List the prestige records of every skill
pub async fn list_records(State(state): State<Arc<AppState>>) -> Json<Vec<PrestigeRecord>> {
    Json(state.prestige_service.all_records().await)
}

/// Get the prestige record of one skill
pub async fn get_record(
    State(state): State<Arc<AppState>>,
    Path(skill): Path<String>,
) -> Result<Json<PrestigeRecord>, (StatusCode, String)> {
    let skill = known_skill(&state, skill)?;
    Ok(Json(state.prestige_service.get_record(&skill).await))
}

/// Prestige a skill
///
/// A partial failure still returns the report so the caller can see which
/// steps took effect.
pub async fn reset_skill(
    State(state): State<Arc<AppState>>,
    Path(skill): Path<String>,
) -> Result<(StatusCode, Json<ResetOutcome>), (StatusCode, String)> {
    let skill = known_skill(&state, skill)?;
    let outcome = state.prestige_service.reset_skill(&skill).await;

    let status = if outcome.is_completed() {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    Ok((status, Json(outcome)))
}

/// Buy a profession with prestige points
pub async fn purchase_profession(
    State(state): State<Arc<AppState>>,
    Path(profession): Path<i32>,
) -> Result<Json<PurchaseReceipt>, (StatusCode, String)> {
    state
        .prestige_service
        .purchase_profession(ProfessionId::new(profession))
        .await
        .map(Json)
        .map_err(|e| {
            let status = if e.is_recoverable() {
                StatusCode::CONFLICT
            } else if matches!(e, PurchaseError::ProfessionLookup(LookupFailure::NotFound(_))) {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (status, e.to_string())
        })
}

/// Write the ledger to the database
pub async fn save_ledger(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SaveLedgerResponse>, (StatusCode, String)> {
    state
        .prestige_service
        .persist()
        .await
        .map(|saved| Json(SaveLedgerResponse { saved }))
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

/// Give the simulated player experience in a skill
pub async fn grant_experience(
    State(state): State<Arc<AppState>>,
    Path(skill): Path<String>,
    Json(req): Json<GrantExperienceRequest>,
) -> Result<Json<ExperienceResponse>, (StatusCode, String)> {
    let skill = known_skill(&state, skill)?;
    let experience = state
        .host
        .grant_experience(&skill, req.amount)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(ExperienceResponse {
        skill: skill.to_string(),
        experience,
    }))
}

/// Load or unload the simulated player's save
pub async fn set_host_save(
    State(state): State<Arc<AppState>>,
    Json(req): Json<HostSaveState>,
) -> Json<HostSaveState> {
    state.host.set_save_loaded(req.loaded);
    Json(HostSaveState {
        loaded: state.host.is_save_loaded(),
    })
}
