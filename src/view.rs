//! State of the book list screen and the derivations rendered from it.
//!
//! The filtered set and the visible page are recomputed from
//! `(books, search, page)` on every call instead of being cached, so the view
//! holds no derived state that could drift from its inputs.

use std::collections::HashSet;

use tracing::{error, info};

use crate::models::Book;
use crate::pagination::{page_slice, total_pages, PAGE_SIZE};
use crate::store::StoreResult;

/// Sequence number handed out for every fetch the view starts.
pub type FetchTicket = u64;

/// A fetch the view asked for. The requested page is carried along because the
/// post-fetch page correction compares against the page the fetch was issued
/// for, not whatever the page is when the answer arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub ticket: FetchTicket,
    pub page: usize,
}

/// The answer to a [`FetchRequest`].
#[derive(Debug)]
pub struct FetchOutcome {
    pub request: FetchRequest,
    pub result: StoreResult<Vec<Book>>,
}

#[derive(Debug)]
pub struct BookListView {
    books: Vec<Book>,
    loading: bool,
    selected_ids: HashSet<i64>,
    search: String,
    page: usize,
    next_ticket: FetchTicket,
}

impl Default for BookListView {
    fn default() -> Self {
        Self::new()
    }
}

impl BookListView {
    /// A freshly mounted view: no books, first page, loading until the mount
    /// fetch answers.
    pub fn new() -> Self {
        Self {
            books: Vec::new(),
            loading: true,
            selected_ids: HashSet::new(),
            search: String::new(),
            page: 1,
            next_ticket: 0,
        }
    }

    /// Mark a fetch for the current page as outstanding.
    pub fn begin_fetch(&mut self) -> FetchRequest {
        self.loading = true;
        self.next_ticket += 1;
        FetchRequest {
            ticket: self.next_ticket,
            page: self.page,
        }
    }

    /// Apply a fetch answer. Failures are logged and leave `books` untouched.
    ///
    /// Returns the follow-up fetch to run when the page correction moved the
    /// view back to page 1.
    pub fn complete_fetch(&mut self, outcome: FetchOutcome) -> Option<FetchRequest> {
        let FetchOutcome { request, result } = outcome;
        let mut out_of_range = false;

        match result {
            Ok(books) => {
                info!(ticket = request.ticket, rows = books.len(), "books fetched");
                self.books = books;

                let pages = total_pages(self.books.len());
                out_of_range = request.page > pages && pages > 0;
            }
            Err(err) => {
                error!(ticket = request.ticket, "book fetch failed: {err}");
            }
        }

        // Any answer clears the indicator, even with a slower fetch in flight.
        self.loading = false;

        if out_of_range {
            self.set_page(1)
        } else {
            None
        }
    }

    /// Move to `page` (1-based). A change of value starts a new fetch, which is
    /// returned for the caller to run.
    pub fn set_page(&mut self, page: usize) -> Option<FetchRequest> {
        let page = page.max(1);
        if page == self.page {
            return None;
        }
        self.page = page;
        Some(self.begin_fetch())
    }

    /// Page-control "next": only moves within the pages of the filtered set.
    pub fn next_page(&mut self) -> Option<FetchRequest> {
        if self.page < self.filtered_total_pages() {
            self.set_page(self.page + 1)
        } else {
            None
        }
    }

    /// Page-control "previous".
    pub fn previous_page(&mut self) -> Option<FetchRequest> {
        if self.page > 1 {
            self.set_page(self.page - 1)
        } else {
            None
        }
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn push_search_char(&mut self, ch: char) {
        self.search.push(ch);
    }

    pub fn pop_search_char(&mut self) {
        self.search.pop();
    }

    /// Records whose title or author contains the search text, ignoring case.
    /// An empty search keeps everything in fetch order.
    pub fn filtered(&self) -> Vec<&Book> {
        filter_books(&self.books, &self.search)
    }

    /// The records on the current page of the filtered set.
    pub fn visible(&self) -> Vec<&Book> {
        page_slice(&self.filtered(), self.page).to_vec()
    }

    /// Size of the filtered set, as reported to the page control.
    pub fn total_records(&self) -> usize {
        self.filtered().len()
    }

    pub fn filtered_total_pages(&self) -> usize {
        total_pages(self.total_records())
    }

    /// Flip the checkbox of one row.
    pub fn toggle_selected(&mut self, id: i64) {
        if !self.selected_ids.remove(&id) {
            self.selected_ids.insert(id);
        }
    }

    /// Header checkbox. Checking selects every fetched book, not only the
    /// filtered or visible ones; unchecking clears the selection.
    pub fn set_all_selected(&mut self, checked: bool) {
        if checked {
            self.selected_ids = self.books.iter().map(|book| book.id).collect();
        } else {
            self.selected_ids.clear();
        }
    }

    /// Toggle the header checkbox from its current displayed state.
    pub fn toggle_all_selected(&mut self) {
        let checked = self.all_selected();
        self.set_all_selected(!checked);
    }

    /// Displayed state of the header checkbox: selection count equals the
    /// number of fetched books.
    pub fn all_selected(&self) -> bool {
        self.selected_ids.len() == self.books.len()
    }

    pub fn is_selected(&self, id: i64) -> bool {
        self.selected_ids.contains(&id)
    }

    pub fn selected_ids(&self) -> &HashSet<i64> {
        &self.selected_ids
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        PAGE_SIZE
    }
}

/// Case-insensitive substring match on title or author.
pub fn filter_books<'a>(books: &'a [Book], search: &str) -> Vec<&'a Book> {
    let needle = search.to_lowercase();
    if needle.is_empty() {
        return books.iter().collect();
    }
    books
        .iter()
        .filter(|book| book.matches_lowercase(&needle))
        .collect()
}
