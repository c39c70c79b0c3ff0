//! Read-only access to the `Books` collection, split by backend.

mod error;
mod rest;
mod sqlite;

pub use error::{StoreError, StoreResult};
pub use rest::RestStore;
pub use sqlite::{ensure_schema, SqliteStore};

use crate::models::Book;

/// Name of the collection the viewer reads when nothing else is configured.
pub const DEFAULT_TABLE: &str = "Books";

/// "Select all columns from `Books`". Implementations perform no projection,
/// filtering or ordering; everything past the raw read happens client-side.
///
/// The client is shared with the background fetch threads, hence the
/// `Send + Sync` bound.
#[cfg_attr(test, mockall::automock)]
pub trait BookStore: Send + Sync {
    fn fetch_all(&self) -> StoreResult<Vec<Book>>;

    /// Short human-readable description used in log lines.
    fn describe(&self) -> String;
}
