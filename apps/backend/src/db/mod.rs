//! Durable key-value storage.

pub mod date_utils;
pub mod error;
pub mod schema;
pub mod sqlite;

pub use date_utils::{Clock, FixedClock, SystemClock};
pub use error::StorageError;
pub use sqlite::SqliteKvStore;

pub type Result<T> = std::result::Result<T, StorageError>;

/// A string-keyed store of string values.
///
/// Implementations are used from one request at a time; the store is not
/// expected to coordinate concurrent writers.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}
