//! Core types for the memory game and its learning sets.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SetError};

/// Number of pairs laid out in one session.
pub const PAIRS_PER_SESSION: usize = 3;

/// Number of card positions on the board (1-based).
pub const BOARD_SIZE: u8 = (PAIRS_PER_SESSION * 2) as u8;

/// One question/answer association.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pair {
    pub question: String,
    pub answer: String,
}

impl Pair {
    /// Create a pair from user input, trimming both sides.
    ///
    /// Returns `None` when either side is blank after trimming.
    pub fn new(question: &str, answer: &str) -> Option<Self> {
        let question = question.trim();
        let answer = answer.trim();
        if question.is_empty() || answer.is_empty() {
            return None;
        }
        Some(Self {
            question: question.to_string(),
            answer: answer.to_string(),
        })
    }
}

/// A named, persisted collection of pairs.
///
/// Field names and the `YYYY-MM-DD` date format are part of the stored
/// layout and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningSet {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub pairs: Vec<Pair>,
    pub created_at: NaiveDate,
    #[serde(default)]
    pub last_played: Option<NaiveDate>,
}

impl LearningSet {
    /// Whether the set holds enough pairs to start a session.
    pub fn is_playable(&self) -> bool {
        self.pairs.len() >= PAIRS_PER_SESSION
    }

    /// Merge a partial update into this set.
    pub fn apply(&mut self, update: SetUpdate) {
        if let Some(name) = update.name {
            self.name = name.trim().to_string();
        }
        if let Some(description) = update.description {
            self.description = description.trim().to_string();
        }
        if let Some(pairs) = update.pairs {
            self.pairs = pairs;
        }
        if let Some(last_played) = update.last_played {
            self.last_played = Some(last_played);
        }
    }
}

/// Partial fields for updating a stored set. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pairs: Option<Vec<Pair>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_played: Option<NaiveDate>,
}

impl SetUpdate {
    /// Trim the given fields and reject blank names or pairs.
    ///
    /// The pair count is not checked; an edited set may drop below the
    /// session size and simply stops being playable.
    pub fn validate(self) -> Result<Self> {
        let name = match self.name {
            Some(name) => {
                let name = name.trim();
                if name.is_empty() {
                    return Err(SetError::EmptyName);
                }
                Some(name.to_string())
            }
            None => None,
        };

        let pairs = self.pairs.map(normalize_pairs).transpose()?;

        Ok(Self {
            name,
            description: self.description.map(|d| d.trim().to_string()),
            pairs,
            last_played: self.last_played,
        })
    }
}

/// Trim every pair, failing on the first blank one.
fn normalize_pairs(pairs: Vec<Pair>) -> Result<Vec<Pair>> {
    pairs
        .iter()
        .enumerate()
        .map(|(index, pair)| {
            Pair::new(&pair.question, &pair.answer).ok_or(SetError::EmptyPair { index })
        })
        .collect()
}

/// A set as submitted from the editor, before it is stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub pairs: Vec<Pair>,
}

impl SetDraft {
    /// Trim the draft and check that it describes a playable set.
    pub fn validate(self) -> Result<Self> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(SetError::EmptyName);
        }

        let pairs = normalize_pairs(self.pairs)?;

        if pairs.len() < PAIRS_PER_SESSION {
            return Err(SetError::TooFewPairs {
                required: PAIRS_PER_SESSION,
                actual: pairs.len(),
            });
        }

        Ok(Self {
            name: name.to_string(),
            description: self.description.trim().to_string(),
            pairs,
        })
    }
}

/// What a card shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    Question,
    Answer,
    Emoji,
}

/// One position on the board. Two cards share each `pair_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub position: u8,
    pub content: String,
    pub pair_id: usize,
    pub kind: CardKind,
}
