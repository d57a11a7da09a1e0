//! The central coordinator: owns the canonical [`QueryState`], issues
//! fetches for it, and guarantees that slow or out-of-order responses
//! never overwrite the results of a more recent query.

use crate::backend::CatalogBackend;
use crate::categories::CategoryIndex;
use crate::debounce::Debouncer;
use crate::pagination;
use crate::pagination::PageToken;
use crate::query::QueryState;
use crate::url_state;
use log::debug;
use log::warn;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;
use std::time::Duration;
use storefront_backend_client::ClientError;
use storefront_backend_client::Product;
use storefront_backend_client::SearchPage;
use tokio::sync::watch;

const SEARCH_FAILED_BANNER: &str = "Failed to load search results.";
const CATEGORIES_FAILED_BANNER: &str = "Failed to load categories.";

/// Lifecycle of the most recently issued query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchPhase {
    Idle,
    Fetching(u64),
    Settled(u64),
    Failed(u64),
}

/// Read-only projection handed to the rendering layer.
///
/// Rendering code never mutates this; all writes go through the
/// orchestrator's mutators.
#[derive(Clone, Debug)]
pub struct BrowseSnapshot {
    pub query: QueryState,
    /// The canonical state encoded for the address bar.
    pub url_query: String,
    pub phase: FetchPhase,
    pub products: Vec<Product>,
    pub total: u64,
    pub total_pages: u32,
    pub pagination: Vec<PageToken>,
    /// Heading for the current filter: a category name, or `"All"`.
    pub category_label: String,
    pub loading: bool,
    /// Banner for a failed product fetch. Products from the last settled
    /// query stay visible alongside it.
    pub error: Option<String>,
    pub categories: Arc<CategoryIndex>,
    /// Non-fatal banner for a failed category fetch.
    pub categories_error: Option<String>,
}

struct Inner {
    query: QueryState,
    latest_seq: u64,
    phase: FetchPhase,
    products: Vec<Product>,
    total: u64,
    total_pages: u32,
    categories: Arc<CategoryIndex>,
    categories_error: Option<String>,
    error: Option<String>,
}

impl Default for Inner {
    fn default() -> Self {
        Self {
            query: QueryState::default(),
            latest_seq: 0,
            phase: FetchPhase::Idle,
            products: Vec::new(),
            total: 0,
            total_pages: 1,
            categories: Arc::new(CategoryIndex::default()),
            categories_error: None,
            error: None,
        }
    }
}

impl Inner {
    fn category_label(&self) -> String {
        if self.query.search.is_empty()
            && let Some(id) = self.query.category_id
        {
            self.categories.name_of(id).to_string()
        } else {
            "All".to_string()
        }
    }

    fn snapshot(&self) -> BrowseSnapshot {
        BrowseSnapshot {
            query: self.query.clone(),
            url_query: url_state::encode(&self.query),
            phase: self.phase,
            products: self.products.clone(),
            total: self.total,
            total_pages: self.total_pages,
            pagination: pagination::plan(self.query.page, self.total_pages),
            category_label: self.category_label(),
            loading: matches!(self.phase, FetchPhase::Fetching(_)),
            error: self.error.clone(),
            categories: Arc::clone(&self.categories),
            categories_error: self.categories_error.clone(),
        }
    }
}

struct Shared<B> {
    backend: B,
    inner: Mutex<Inner>,
    snapshot: watch::Sender<BrowseSnapshot>,
}

/// The query state machine. Cheap to clone; all clones share one state.
///
/// Superseded requests are never cancelled. Instead every issued query
/// carries a strictly increasing sequence number, and a completion only
/// takes effect if its number still matches the latest issued one. The
/// increment and the comparison both happen under the same lock, so two
/// completions can never interleave their checks.
pub struct QueryOrchestrator<B: CatalogBackend> {
    shared: Arc<Shared<B>>,
}

impl<B: CatalogBackend> Clone for QueryOrchestrator<B> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<B: CatalogBackend> QueryOrchestrator<B> {
    pub fn new(backend: B) -> Self {
        let inner = Inner::default();
        let (snapshot, _) = watch::channel(inner.snapshot());
        Self {
            shared: Arc::new(Shared {
                backend,
                inner: Mutex::new(inner),
                snapshot,
            }),
        }
    }

    /// Restore state from a URL query string (if any), load the category
    /// index, and dispatch the initial fetch. A categories failure is
    /// non-fatal: browsing proceeds with an empty index and a banner.
    pub async fn start(&self, initial_query: Option<&str>) {
        match self.shared.backend.categories().await {
            Ok(categories) => {
                let mut inner = self.lock();
                inner.categories = Arc::new(CategoryIndex::new(categories));
                inner.categories_error = None;
            }
            Err(err) => {
                warn!("category fetch failed: {err}");
                let mut inner = self.lock();
                inner.categories_error = Some(CATEGORIES_FAILED_BANNER.to_string());
            }
        }
        let initial = initial_query.map(url_state::decode).unwrap_or_default();
        self.dispatch(initial);
    }

    /// Category click: clears the search text and resets to page 1.
    pub fn select_category(&self, category_id: i64) {
        let next = self.lock().query.with_category(category_id);
        self.dispatch(next);
    }

    /// "All" click: drops the category filter and resets to page 1.
    pub fn clear_category(&self) {
        let next = self.lock().query.without_category();
        self.dispatch(next);
    }

    /// Debounced search emission. An emission equal to the current text is
    /// dropped; anything else resets to page 1 and refetches. The stored
    /// category survives but stays out of the filter while text is active.
    pub fn set_search(&self, text: impl Into<String>) {
        let text = text.into();
        let next = {
            let inner = self.lock();
            if inner.query.search == text {
                return;
            }
            inner.query.with_search(text)
        };
        self.dispatch(next);
    }

    /// Page click, clamped to `[1, total_pages]` as last reported by the
    /// server. A stale bound still dispatches; the server is the final
    /// authority on page validity.
    pub fn set_page(&self, requested: i64) {
        let next = {
            let inner = self.lock();
            let page = pagination::clamp_page(requested, inner.total_pages);
            if page == inner.query.page {
                return;
            }
            inner.query.with_page(page)
        };
        self.dispatch(next);
    }

    /// Spawn a [`Debouncer`] whose settled emissions feed
    /// [`set_search`](Self::set_search).
    ///
    /// A category click does not flush a pending emission: if non-empty
    /// text settles after the click it dispatches a newer query and wins.
    pub fn search_input(&self, window: Duration) -> Debouncer {
        let (debouncer, mut settled) = Debouncer::new(window);
        let this = self.clone();
        tokio::spawn(async move {
            while let Some(text) = settled.recv().await {
                this.set_search(text);
            }
        });
        debouncer
    }

    pub fn subscribe(&self) -> watch::Receiver<BrowseSnapshot> {
        self.shared.snapshot.subscribe()
    }

    pub fn snapshot(&self) -> BrowseSnapshot {
        self.shared.snapshot.borrow().clone()
    }

    fn dispatch(&self, next: QueryState) {
        let (seq, request) = {
            let mut inner = self.lock();
            inner.latest_seq += 1;
            let seq = inner.latest_seq;
            inner.query = next;
            inner.phase = FetchPhase::Fetching(seq);
            inner.error = None;
            self.publish(&inner);
            (seq, inner.query.to_request())
        };
        debug!("dispatching query {seq}: {request:?}");
        let this = self.clone();
        tokio::spawn(async move {
            let outcome = this.shared.backend.product_search(&request).await;
            this.complete(seq, outcome);
        });
    }

    fn complete(&self, seq: u64, outcome: Result<SearchPage, ClientError>) {
        let mut inner = self.lock();
        if seq != inner.latest_seq {
            // Belongs to a superseded query; never allowed to touch state.
            debug!(
                "discarding stale response for query {seq} (latest is {})",
                inner.latest_seq
            );
            return;
        }
        match outcome {
            Ok(page) => {
                inner.products = page.results;
                inner.total = page.total;
                inner.total_pages = page.pages.max(1);
                inner.phase = FetchPhase::Settled(seq);
                inner.error = None;
            }
            Err(err) => {
                warn!("product search failed for query {seq}: {err}");
                inner.phase = FetchPhase::Failed(seq);
                inner.error = Some(SEARCH_FAILED_BANNER.to_string());
            }
        }
        self.publish(&inner);
    }

    fn publish(&self, inner: &Inner) {
        self.shared.snapshot.send_replace(inner.snapshot());
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.shared
            .inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
