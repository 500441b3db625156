//! Session engine for one round of the memory game.
//!
//! A session deals [`PAIRS_PER_SESSION`] pairs onto [`BOARD_SIZE`] positions
//! and records which position pairs have been matched. The score is the
//! number of found pairs, so the two can never drift apart.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::types::{Card, CardKind, LearningSet, Pair, BOARD_SIZE, PAIRS_PER_SESSION};

/// Symbols dealt when no playable learning set is active.
pub const DEMO_SYMBOLS: [&str; PAIRS_PER_SESSION] = ["🐱", "🐶", "🐦"];

/// An unordered pair of board positions, stored as `(low, high)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 2]", into = "[u8; 2]")]
pub struct FoundPair {
    low: u8,
    high: u8,
}

impl FoundPair {
    pub fn new(a: u8, b: u8) -> Self {
        Self {
            low: a.min(b),
            high: a.max(b),
        }
    }

    pub fn contains(&self, position: u8) -> bool {
        self.low == position || self.high == position
    }

    pub fn positions(&self) -> (u8, u8) {
        (self.low, self.high)
    }
}

impl From<[u8; 2]> for FoundPair {
    fn from([a, b]: [u8; 2]) -> Self {
        Self::new(a, b)
    }
}

impl From<FoundPair> for [u8; 2] {
    fn from(pair: FoundPair) -> Self {
        [pair.low, pair.high]
    }
}

/// Result of a match attempt. Only `Match` changes session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuessOutcome {
    Match,
    Mismatch,
    AlreadyFound,
    InvalidPosition,
    SamePosition,
}

impl GuessOutcome {
    pub fn is_match(self) -> bool {
        matches!(self, Self::Match)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Origin {
    Set { id: String, name: String },
    Demo,
}

/// Card content before it is assigned a position.
#[derive(Debug, Clone)]
struct Face {
    content: String,
    pair_id: usize,
    kind: CardKind,
}

/// State of one game from dealing to win or reset.
#[derive(Debug, Clone)]
pub struct Session {
    origin: Origin,
    faces: Vec<Face>,
    cards: Vec<Card>,
    found_pairs: Vec<FoundPair>,
}

impl Session {
    /// Deal a new session from `set`, falling back to the demo symbols when
    /// no set is given or it has too few pairs.
    pub fn start(set: Option<&LearningSet>) -> Self {
        Self::start_with_rng(set, &mut rand::thread_rng())
    }

    /// Like [`Session::start`], shuffling with the given RNG.
    pub fn start_with_rng<R: Rng + ?Sized>(set: Option<&LearningSet>, rng: &mut R) -> Self {
        let (origin, faces) = match set.filter(|s| s.is_playable()) {
            Some(set) => (
                Origin::Set {
                    id: set.id.clone(),
                    name: set.name.clone(),
                },
                pair_faces(&set.pairs[..PAIRS_PER_SESSION]),
            ),
            None => (Origin::Demo, demo_faces()),
        };

        let mut session = Self {
            origin,
            faces,
            cards: Vec::with_capacity(BOARD_SIZE as usize),
            found_pairs: Vec::with_capacity(PAIRS_PER_SESSION),
        };
        session.deal(rng);
        session
    }

    /// Reshuffle the same cards and clear all progress.
    pub fn reset(&mut self) {
        self.reset_with_rng(&mut rand::thread_rng());
    }

    pub fn reset_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.deal(rng);
    }

    fn deal<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut order: Vec<&Face> = self.faces.iter().collect();
        order.shuffle(rng);

        self.cards = order
            .into_iter()
            .zip(1..=BOARD_SIZE)
            .map(|(face, position)| Card {
                position,
                content: face.content.clone(),
                pair_id: face.pair_id,
                kind: face.kind,
            })
            .collect();
        self.found_pairs.clear();
    }

    /// Try to match the cards at two positions.
    pub fn submit_guess(&mut self, first: u8, second: u8) -> GuessOutcome {
        let same_pair = match (self.card_at(first), self.card_at(second)) {
            (Some(a), Some(b)) => a.pair_id == b.pair_id,
            _ => return GuessOutcome::InvalidPosition,
        };

        if first == second {
            return GuessOutcome::SamePosition;
        }

        let pair = FoundPair::new(first, second);
        if self.found_pairs.contains(&pair) {
            return GuessOutcome::AlreadyFound;
        }

        if !same_pair {
            return GuessOutcome::Mismatch;
        }

        self.found_pairs.push(pair);
        GuessOutcome::Match
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card_at(&self, position: u8) -> Option<&Card> {
        self.cards.iter().find(|card| card.position == position)
    }

    pub fn found_pairs(&self) -> &[FoundPair] {
        &self.found_pairs
    }

    pub fn score(&self) -> usize {
        self.found_pairs.len()
    }

    pub fn is_matched(&self, position: u8) -> bool {
        self.found_pairs.iter().any(|pair| pair.contains(position))
    }

    pub fn is_won(&self) -> bool {
        self.found_pairs.len() == PAIRS_PER_SESSION
    }

    pub fn remaining_pairs(&self) -> usize {
        PAIRS_PER_SESSION - self.found_pairs.len()
    }

    pub fn is_demo(&self) -> bool {
        self.origin == Origin::Demo
    }

    /// Id of the learning set this session was dealt from.
    pub fn set_id(&self) -> Option<&str> {
        match &self.origin {
            Origin::Set { id, .. } => Some(id),
            Origin::Demo => None,
        }
    }

    pub fn set_name(&self) -> Option<&str> {
        match &self.origin {
            Origin::Set { name, .. } => Some(name),
            Origin::Demo => None,
        }
    }

    /// Snapshot of the session for display.
    pub fn view(&self) -> SessionView {
        SessionView {
            set_id: self.set_id().map(str::to_string),
            set_name: self.set_name().map(str::to_string),
            demo: self.is_demo(),
            cards: self
                .cards
                .iter()
                .map(|card| CardView {
                    card: card.clone(),
                    matched: self.is_matched(card.position),
                })
                .collect(),
            score: self.score(),
            found_pairs: self.found_pairs.clone(),
            total_pairs: PAIRS_PER_SESSION,
            won: self.is_won(),
        }
    }
}

fn pair_faces(pairs: &[Pair]) -> Vec<Face> {
    pairs
        .iter()
        .enumerate()
        .flat_map(|(pair_id, pair)| {
            [
                Face {
                    content: pair.question.clone(),
                    pair_id,
                    kind: CardKind::Question,
                },
                Face {
                    content: pair.answer.clone(),
                    pair_id,
                    kind: CardKind::Answer,
                },
            ]
        })
        .collect()
}

fn demo_faces() -> Vec<Face> {
    DEMO_SYMBOLS
        .iter()
        .enumerate()
        .flat_map(|(pair_id, symbol)| {
            std::iter::repeat_with(move || Face {
                content: symbol.to_string(),
                pair_id,
                kind: CardKind::Emoji,
            })
            .take(2)
        })
        .collect()
}

/// Card as shown on the board, with its matched flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    #[serde(flatten)]
    pub card: Card,
    pub matched: bool,
}

/// Serializable snapshot of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub set_id: Option<String>,
    pub set_name: Option<String>,
    pub demo: bool,
    pub cards: Vec<CardView>,
    pub score: usize,
    pub found_pairs: Vec<FoundPair>,
    pub total_pairs: usize,
    pub won: bool,
}
