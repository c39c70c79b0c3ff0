//! Core library surface for the book inventory viewer: a paged, searchable,
//! selectable terminal table over a read-only `Books` collection.
pub mod config;
pub mod fetch;
pub mod logging;
pub mod models;
pub mod pagination;
pub mod store;
pub mod ui;
pub mod view;

pub use config::AppConfig;
pub use fetch::Fetcher;
pub use models::Book;
pub use store::{BookStore, RestStore, SqliteStore, StoreError, StoreResult};
pub use ui::{run_app, App};
pub use view::{filter_books, BookListView, FetchOutcome, FetchRequest};
