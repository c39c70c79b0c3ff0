//! Ratatui front-end for the book list: a search box, the paged table with its
//! checkbox column, and a footer holding the page control.

mod app;
mod helpers;
mod terminal;

pub use app::App;
pub use terminal::run_app;
