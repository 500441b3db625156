pub mod collection;
pub mod game;

pub use collection::{CollectionStore, ACTIVE_SET_KEY, SETS_KEY};
pub use game::GameService;
