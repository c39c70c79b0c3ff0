//! Background fetching. Each request runs the store query on its own thread
//! and posts the outcome back over a channel that the draw loop drains, so the
//! interface thread never blocks on the store.
//!
//! Requests are never cancelled: overlapping fetches all finish and their
//! outcomes come out of [`Fetcher::poll`] in the order they resolved.

use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use crate::store::{BookStore, StoreError};
use crate::view::{FetchOutcome, FetchRequest};

pub struct Fetcher {
    store: Arc<dyn BookStore>,
    tx: Sender<FetchOutcome>,
    rx: Receiver<FetchOutcome>,
}

impl Fetcher {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self { store, tx, rx }
    }

    /// Run `request` against the store in the background.
    pub fn spawn(&self, request: FetchRequest) {
        let store = Arc::clone(&self.store);
        let tx = self.tx.clone();
        debug!(
            ticket = request.ticket,
            page = request.page,
            store = %store.describe(),
            "starting book fetch"
        );

        let spawned = thread::Builder::new()
            .name(format!("book-fetch-{}", request.ticket))
            .spawn(move || {
                let result = store.fetch_all();
                // The receiver only goes away when the app is shutting down.
                let _ = tx.send(FetchOutcome { request, result });
            });

        if let Err(err) = spawned {
            self.report_spawn_failure(request, err);
        }
    }

    /// A fetch that never started still owes the view an answer, otherwise the
    /// loader would stay up for good.
    fn report_spawn_failure(&self, request: FetchRequest, err: io::Error) {
        warn!(ticket = request.ticket, "could not start fetch thread: {err}");
        let _ = self.tx.send(FetchOutcome {
            request,
            result: Err(StoreError::Io(err)),
        });
    }

    /// Every outcome that has arrived since the last call, oldest first.
    pub fn poll(&self) -> Vec<FetchOutcome> {
        self.rx.try_iter().collect()
    }

    /// Wait up to `timeout` for the next outcome.
    pub fn wait(&self, timeout: Duration) -> Option<FetchOutcome> {
        self.rx.recv_timeout(timeout).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Book;
    use crate::store::MockBookStore;
    use crate::view::BookListView;

    fn book(id: i64) -> Book {
        Book {
            id,
            created_at: String::new(),
            title: format!("Title {id}"),
            author: "Someone".into(),
            category: String::new(),
            status: "Available".into(),
            issued_to: None,
            issued_on: None,
        }
    }

    #[test]
    fn outcome_carries_the_request_back() {
        let mut store = MockBookStore::new();
        store
            .expect_fetch_all()
            .times(1)
            .returning(|| Ok(vec![book(1), book(2)]));
        store.expect_describe().return_const("mock".to_string());

        let fetcher = Fetcher::new(Arc::new(store));
        let request = FetchRequest { ticket: 4, page: 2 };
        fetcher.spawn(request);

        let outcome = fetcher.wait(Duration::from_secs(5)).expect("fetch finished");
        assert_eq!(outcome.request, request);
        assert_eq!(outcome.result.unwrap().len(), 2);
    }

    #[test]
    fn errors_are_delivered_not_raised() {
        let mut store = MockBookStore::new();
        store.expect_fetch_all().returning(|| {
            Err(StoreError::Status {
                status: 401,
                body: "invalid api key".into(),
            })
        });
        store.expect_describe().return_const("mock".to_string());

        let fetcher = Fetcher::new(Arc::new(store));
        fetcher.spawn(FetchRequest { ticket: 1, page: 1 });

        let outcome = fetcher.wait(Duration::from_secs(5)).expect("fetch finished");
        assert!(matches!(
            outcome.result,
            Err(StoreError::Status { status: 401, .. })
        ));
    }

    #[test]
    fn poll_is_empty_before_any_request() {
        let store = MockBookStore::new();
        let fetcher = Fetcher::new(Arc::new(store));
        assert!(fetcher.poll().is_empty());
    }

    #[test]
    fn thread_start_failure_still_clears_the_loader() {
        let fetcher = Fetcher::new(Arc::new(MockBookStore::new()));
        let mut view = BookListView::new();
        let request = view.begin_fetch();
        assert!(view.loading());

        fetcher.report_spawn_failure(request, io::Error::other("too many threads"));

        let outcomes = fetcher.poll();
        assert_eq!(outcomes.len(), 1);
        assert!(matches!(outcomes[0].result, Err(StoreError::Io(_))));
        for outcome in outcomes {
            assert!(view.complete_fetch(outcome).is_none());
        }
        assert!(!view.loading());
        assert!(view.books().is_empty());
    }
}
