//! Typed client for the storefront catalog API.
//!
//! Exposes the two read endpoints the browsing engine consumes:
//! `GET categories/` and the paginated `GET product_search/`.

mod client;
mod error;
mod model;

pub use client::BackendClient;
pub use error::ClientError;
pub use error::Result;
pub use model::Category;
pub use model::Product;
pub use model::ProductQuery;
pub use model::SearchPage;
pub use reqwest::StatusCode;
