//! API request and response types

use serde::{Deserialize, Serialize};

// Re-export shared types from memory-core
pub use memory_core::{
    GuessOutcome, LearningSet, Pair, SessionView, SetDraft, SetUpdate,
};

// Set types
#[derive(Debug, Serialize, Deserialize)]
pub struct SetListResponse {
    pub sets: Vec<LearningSet>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddPairRequest {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}

// Active set types
#[derive(Debug, Serialize, Deserialize)]
pub struct SetActiveRequest {
    pub id: String,
}

// Game types
#[derive(Debug, Serialize, Deserialize)]
pub struct GuessRequest {
    pub first: u8,
    pub second: u8,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GuessResponse {
    pub outcome: GuessOutcome,
    pub session: SessionView,
}
