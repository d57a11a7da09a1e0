use crate::error::ClientError;
use crate::error::Result;
use crate::model::Category;
use crate::model::ProductQuery;
use crate::model::SearchPage;
use log::debug;
use reqwest::header::AUTHORIZATION;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use std::time::Duration;
use tokio::sync::watch;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Typed client for the catalog REST API.
///
/// The client is read-only glue: it encodes exactly the parameters it is
/// handed and maps non-2xx responses to [`ClientError::Status`]. Request
/// precedence rules live with the caller.
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    access_token: Option<watch::Receiver<Option<String>>>,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url,
            access_token: None,
        })
    }

    /// Attach an observable access-token source. When the current value is
    /// `Some`, requests carry it as a bearer `Authorization` header.
    pub fn with_token_source(mut self, source: watch::Receiver<Option<String>>) -> Self {
        self.access_token = Some(source);
        self
    }

    pub async fn categories(&self) -> Result<Vec<Category>> {
        let url = format!("{}/api/categories/", self.base_url);
        let resp = self
            .http
            .get(url)
            .headers(self.auth_headers())
            .send()
            .await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, body });
        }
        Ok(resp.json().await?)
    }

    pub async fn product_search(&self, query: &ProductQuery) -> Result<SearchPage> {
        let url = format!("{}/api/product_search/", self.base_url);
        debug!("product_search {:?}", query.pairs());
        let resp = self
            .http
            .get(url)
            .headers(self.auth_headers())
            .query(&query.pairs())
            .send()
            .await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, body });
        }
        Ok(resp.json().await?)
    }

    fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let token = self
            .access_token
            .as_ref()
            .and_then(|source| source.borrow().clone());
        if let Some(token) = token
            && let Ok(value) = HeaderValue::from_str(&format!("Bearer {token}"))
        {
            headers.insert(AUTHORIZATION, value);
        }
        headers
    }
}
