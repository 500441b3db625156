//! Test fixtures and factory functions for creating test data.

use serde_json::json;

use advanced_memory_backend::models::{LearningSet, SessionView};

/// The English/German pairs used across scenarios.
pub const GERMAN: [(&str, &str); 3] = [("Hello", "Hallo"), ("Cat", "Katze"), ("Dog", "Hund")];

/// Create a set draft request body.
pub fn set_draft_request(name: &str, description: &str, pairs: &[(&str, &str)]) -> serde_json::Value {
    let pairs: Vec<_> = pairs
        .iter()
        .map(|(q, a)| json!({ "question": q, "answer": a }))
        .collect();
    json!({ "name": name, "description": description, "pairs": pairs })
}

/// Create a guess request body.
pub fn guess_request(first: u8, second: u8) -> serde_json::Value {
    json!({ "first": first, "second": second })
}

/// Create an add pair request body.
pub fn add_pair_request(question: &str, answer: &str) -> serde_json::Value {
    json!({ "question": question, "answer": answer })
}

/// POST a valid set and return it.
pub async fn create_set(server: &axum_test::TestServer, name: &str) -> LearningSet {
    server
        .post("/api/sets")
        .json(&set_draft_request(name, "", &GERMAN))
        .await
        .json::<LearningSet>()
}

/// Position pairs that belong together, sorted.
pub fn partners(view: &SessionView) -> Vec<(u8, u8)> {
    let mut pairs = Vec::new();
    for (i, a) in view.cards.iter().enumerate() {
        for b in &view.cards[i + 1..] {
            if a.card.pair_id == b.card.pair_id {
                pairs.push((a.card.position, b.card.position));
            }
        }
    }
    pairs.sort();
    pairs
}

/// Two positions whose cards do not match.
pub fn mismatch(view: &SessionView) -> (u8, u8) {
    let first = &view.cards[0].card;
    let other = view
        .cards
        .iter()
        .map(|c| &c.card)
        .find(|c| c.pair_id != first.pair_id)
        .unwrap();
    (first.position, other.position)
}
