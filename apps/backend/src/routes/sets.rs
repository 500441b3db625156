//! Learning set endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// GET /api/sets
pub async fn list(State(state): State<AppState>) -> Result<Json<SetListResponse>> {
    let sets = state.store()?.list();
    Ok(Json(SetListResponse { sets }))
}

/// POST /api/sets
pub async fn create(
    State(state): State<AppState>,
    Json(draft): Json<SetDraft>,
) -> Result<(StatusCode, Json<LearningSet>)> {
    let draft = draft.validate()?;
    let set = state
        .store()?
        .create(&draft.name, &draft.description, draft.pairs)
        .ok_or_else(|| ApiError::Storage("set was not saved".to_string()))?;

    Ok((StatusCode::CREATED, Json(set)))
}

/// POST /api/sets/demo
pub async fn seed_demo(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<LearningSet>)> {
    let set = state
        .store()?
        .seed_demo()
        .ok_or_else(|| ApiError::Storage("demo set was not saved".to_string()))?;

    Ok((StatusCode::CREATED, Json(set)))
}

/// DELETE /api/sets
pub async fn reset_all(State(state): State<AppState>) -> Result<StatusCode> {
    let store = state.store()?;
    if !store.reset_all() {
        return Err(ApiError::Storage("sets were not removed".to_string()));
    }

    state.game()?.end();
    tracing::info!("Removed all sets");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/sets/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LearningSet>> {
    let set = state.store()?.find(&id)?;
    set.map(Json).ok_or_else(|| set_not_found(&id))
}

/// PATCH /api/sets/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<SetUpdate>,
) -> Result<Json<LearningSet>> {
    let update = update.validate()?;
    let store = state.store()?;
    store.find(&id)?.ok_or_else(|| set_not_found(&id))?;

    store
        .update(&id, update)
        .map(Json)
        .ok_or_else(|| ApiError::Storage("set was not updated".to_string()))
}

/// DELETE /api/sets/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let deleted = state.store()?.delete(&id);
    if deleted {
        tracing::info!("Deleted set {}", id);
    }
    Ok(Json(DeleteResponse { deleted }))
}

/// POST /api/sets/:id/pairs
pub async fn add_pair(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<AddPairRequest>,
) -> Result<Json<LearningSet>> {
    if Pair::new(&request.question, &request.answer).is_none() {
        return Err(ApiError::BadRequest(
            "question and answer must not be empty".to_string(),
        ));
    }

    let store = state.store()?;
    store.find(&id)?.ok_or_else(|| set_not_found(&id))?;

    store
        .add_pair(&id, &request.question, &request.answer)
        .map(Json)
        .ok_or_else(|| ApiError::Storage("pair was not saved".to_string()))
}

/// DELETE /api/sets/:id/pairs/:index
pub async fn remove_pair(
    State(state): State<AppState>,
    Path((id, index)): Path<(String, usize)>,
) -> Result<Json<LearningSet>> {
    let store = state.store()?;
    let set = store.find(&id)?.ok_or_else(|| set_not_found(&id))?;

    if index >= set.pairs.len() {
        return Err(ApiError::NotFound(format!("Pair {} in set {}", index, id)));
    }

    store
        .remove_pair(&id, index)
        .map(Json)
        .ok_or_else(|| ApiError::Storage("pair was not removed".to_string()))
}

/// POST /api/sets/:id/play
pub async fn play(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>> {
    let store = state.store()?;
    let mut game = state.game()?;
    let session = game.play_set(&store, &id)?;
    Ok(Json(session.view()))
}

fn set_not_found(id: &str) -> ApiError {
    ApiError::NotFound(format!("Set {}", id))
}
