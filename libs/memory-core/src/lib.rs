//! Core library for the memory matching game.
//!
//! Provides:
//! - Learning set types (Pair, LearningSet, SetDraft, SetUpdate)
//! - The session engine: dealing, match attempts, win detection
//! - Validation errors for editor input

pub mod error;
pub mod session;
pub mod types;

pub use error::{Result, SetError};
pub use session::{CardView, FoundPair, GuessOutcome, Session, SessionView, DEMO_SYMBOLS};
pub use types::{
    Card, CardKind, LearningSet, Pair, SetDraft, SetUpdate, BOARD_SIZE, PAIRS_PER_SESSION,
};
