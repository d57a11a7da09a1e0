//! Query State Synchronization Engine for the storefront browsing surface.
//!
//! Reconciles three independently-changing inputs (debounced free-text
//! search, category selection, and page number) into one canonical
//! [`QueryState`], keeps the URL query string in sync with it, and drives
//! catalog fetches whose responses are consumed under a sequence-number
//! gate so a slow response can never clobber a newer query's results.
//!
//! The rendering layer is a collaborator, not a subject: it subscribes to
//! [`BrowseSnapshot`]s and calls the orchestrator's mutators, nothing else.

mod backend;
mod categories;
mod debounce;
mod orchestrator;
mod pagination;
mod query;
mod session;
pub mod url_state;

pub use backend::CatalogBackend;
pub use categories::CategoryIndex;
pub use debounce::DEFAULT_DEBOUNCE_WINDOW;
pub use debounce::Debouncer;
pub use orchestrator::BrowseSnapshot;
pub use orchestrator::FetchPhase;
pub use orchestrator::QueryOrchestrator;
pub use pagination::PageToken;
pub use pagination::clamp_page;
pub use pagination::plan;
pub use query::EffectiveFilter;
pub use query::QueryState;
pub use session::AuthState;
pub use session::SessionStore;

// Errors end at the engine boundary: fetch failures surface as a `Failed`
// phase in the snapshot, so callers match on the client error only when
// talking to the backend directly.
pub use storefront_backend_client::ClientError;
