//! The single game session held by the server.

use memory_core::{GuessOutcome, LearningSet, Session, SessionView, SetError, PAIRS_PER_SESSION};

use crate::error::{ApiError, Result};
use crate::services::collection::CollectionStore;

/// Owns the current session, if any.
#[derive(Debug, Default)]
pub struct GameService {
    session: Option<Session>,
}

impl GameService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deal a new session from the active set, or the demo cards when no
    /// playable set is active. Replaces any session in progress.
    pub fn start(&mut self, store: &CollectionStore) -> &Session {
        let active = store.get_active().filter(LearningSet::is_playable);

        if let Some(set) = &active {
            if store.mark_played(&set.id).is_none() {
                tracing::warn!("Could not record play for set {}", set.id);
            }
            tracing::info!("Starting session with set {}", set.id);
        } else {
            tracing::info!("Starting demo session");
        }

        self.session.insert(Session::start(active.as_ref()))
    }

    /// Make `id` the active set and start a session with it.
    pub fn play_set(&mut self, store: &CollectionStore, id: &str) -> Result<&Session> {
        let set = store
            .find(id)?
            .ok_or_else(|| ApiError::NotFound(format!("Set {}", id)))?;

        if !set.is_playable() {
            return Err(SetError::TooFewPairs {
                required: PAIRS_PER_SESSION,
                actual: set.pairs.len(),
            }
            .into());
        }

        if !store.set_active(id) {
            return Err(ApiError::Storage("active set was not saved".to_string()));
        }

        Ok(self.start(store))
    }

    pub fn current(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn guess(&mut self, first: u8, second: u8) -> Result<(GuessOutcome, SessionView)> {
        let session = self.session.as_mut().ok_or_else(no_session)?;
        let outcome = session.submit_guess(first, second);

        tracing::debug!("Guess {}-{}: {:?}", first, second, outcome);
        if outcome.is_match() && session.is_won() {
            tracing::info!("Session won");
        }

        Ok((outcome, session.view()))
    }

    pub fn reset(&mut self) -> Result<SessionView> {
        let session = self.session.as_mut().ok_or_else(no_session)?;
        session.reset();
        Ok(session.view())
    }

    /// Discard the current session.
    pub fn end(&mut self) {
        self.session = None;
    }
}

fn no_session() -> ApiError {
    ApiError::NotFound("No game in progress".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{FixedClock, SqliteKvStore};
    use chrono::NaiveDate;
    use memory_core::Pair;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 14).unwrap()
    }

    fn store() -> CollectionStore {
        CollectionStore::with_clock(
            Box::new(SqliteKvStore::open_in_memory().unwrap()),
            Box::new(FixedClock(today())),
        )
    }

    fn partner_of(session: &Session, position: u8) -> u8 {
        let card = session.card_at(position).unwrap();
        session
            .cards()
            .iter()
            .find(|c| c.pair_id == card.pair_id && c.position != position)
            .unwrap()
            .position
    }

    #[test]
    fn test_start_without_active_set_is_demo() {
        let store = store();
        let mut game = GameService::new();

        assert!(game.start(&store).is_demo());
    }

    #[test]
    fn test_start_with_active_set_marks_played() {
        let store = store();
        let set = store.seed_demo().unwrap();
        store.set_active(&set.id);

        let mut game = GameService::new();
        let session = game.start(&store);

        assert_eq!(session.set_id(), Some(set.id.as_str()));
        assert_eq!(
            store.get_by_id(&set.id).unwrap().last_played,
            Some(today())
        );
    }

    #[test]
    fn test_start_with_unplayable_active_set_is_demo() {
        let store = store();
        let set = store
            .create("Short", "", vec![Pair::new("a", "b").unwrap()])
            .unwrap();
        store.set_active(&set.id);

        let mut game = GameService::new();
        assert!(game.start(&store).is_demo());
        assert_eq!(store.get_by_id(&set.id).unwrap().last_played, None);
    }

    #[test]
    fn test_play_set() {
        let store = store();
        let set = store.seed_demo().unwrap();
        let mut game = GameService::new();

        let session = game.play_set(&store, &set.id).unwrap();
        assert_eq!(session.set_name(), Some("Demo Englisch Vokabeln"));
        assert_eq!(store.get_active().unwrap().id, set.id);
    }

    #[test]
    fn test_play_set_errors() {
        let store = store();
        let short = store.create("Short", "", Vec::new()).unwrap();
        let mut game = GameService::new();

        assert!(matches!(
            game.play_set(&store, "missing"),
            Err(ApiError::NotFound(_))
        ));
        assert!(matches!(
            game.play_set(&store, &short.id),
            Err(ApiError::Validation(SetError::TooFewPairs { .. }))
        ));
        assert!(store.get_active().is_none());
    }

    #[test]
    fn test_guess_and_reset() {
        let store = store();
        let mut game = GameService::new();
        assert!(matches!(game.guess(1, 2), Err(ApiError::NotFound(_))));
        assert!(matches!(game.reset(), Err(ApiError::NotFound(_))));

        let partner = partner_of(game.start(&store), 1);
        let (outcome, view) = game.guess(1, partner).unwrap();
        assert_eq!(outcome, GuessOutcome::Match);
        assert_eq!(view.score, 1);

        let view = game.reset().unwrap();
        assert_eq!(view.score, 0);
        assert!(view.found_pairs.is_empty());
    }

    #[test]
    fn test_end() {
        let store = store();
        let mut game = GameService::new();
        game.start(&store);
        game.end();
        assert!(game.current().is_none());
    }
}
