//! Active set endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// GET /api/active
/// Returns the selected set, or null when none is selected
pub async fn get(State(state): State<AppState>) -> Result<Json<Option<LearningSet>>> {
    let active = state.store()?.get_active();
    Ok(Json(active))
}

/// PUT /api/active
pub async fn set(
    State(state): State<AppState>,
    Json(request): Json<SetActiveRequest>,
) -> Result<Json<LearningSet>> {
    let store = state.store()?;
    let set = store
        .find(&request.id)?
        .ok_or_else(|| ApiError::NotFound(format!("Set {}", request.id)))?;

    if !store.set_active(&set.id) {
        return Err(ApiError::Storage("active set was not saved".to_string()));
    }

    Ok(Json(set))
}

/// DELETE /api/active
/// Deselects the current set and ends the running game
pub async fn clear(State(state): State<AppState>) -> Result<StatusCode> {
    let store = state.store()?;
    if !store.clear_active() {
        return Err(ApiError::Storage("active set was not cleared".to_string()));
    }

    state.game()?.end();
    Ok(StatusCode::NO_CONTENT)
}
