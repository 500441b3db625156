//! Game session endpoints

use axum::{extract::State, Json};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// POST /api/game
/// Deals a session from the active set, or demo cards if there is none
pub async fn start(State(state): State<AppState>) -> Result<Json<SessionView>> {
    let store = state.store()?;
    let mut game = state.game()?;
    Ok(Json(game.start(&store).view()))
}

/// GET /api/game
pub async fn current(State(state): State<AppState>) -> Result<Json<SessionView>> {
    let view = state.game()?.current().map(|session| session.view());
    view.map(Json)
        .ok_or_else(|| ApiError::NotFound("No game in progress".to_string()))
}

/// POST /api/game/guess
pub async fn guess(
    State(state): State<AppState>,
    Json(request): Json<GuessRequest>,
) -> Result<Json<GuessResponse>> {
    if request.first == request.second {
        return Err(ApiError::BadRequest(
            "positions must be different".to_string(),
        ));
    }

    let (outcome, session) = state.game()?.guess(request.first, request.second)?;
    Ok(Json(GuessResponse { outcome, session }))
}

/// POST /api/game/reset
pub async fn reset(State(state): State<AppState>) -> Result<Json<SessionView>> {
    let session = state.game()?.reset()?;
    Ok(Json(session))
}
