use async_trait::async_trait;
use storefront_backend_client::BackendClient;
use storefront_backend_client::Category;
use storefront_backend_client::ProductQuery;
use storefront_backend_client::Result;
use storefront_backend_client::SearchPage;

/// The read side of the catalog API, as the engine sees it.
///
/// The orchestrator is generic over this seam so its ordering behavior can
/// be exercised with stub backends that complete out of order.
#[async_trait]
pub trait CatalogBackend: Send + Sync + 'static {
    async fn categories(&self) -> Result<Vec<Category>>;

    async fn product_search(&self, query: &ProductQuery) -> Result<SearchPage>;
}

#[async_trait]
impl<T: CatalogBackend> CatalogBackend for std::sync::Arc<T> {
    async fn categories(&self) -> Result<Vec<Category>> {
        (**self).categories().await
    }

    async fn product_search(&self, query: &ProductQuery) -> Result<SearchPage> {
        (**self).product_search(query).await
    }
}

#[async_trait]
impl CatalogBackend for BackendClient {
    async fn categories(&self) -> Result<Vec<Category>> {
        BackendClient::categories(self).await
    }

    async fn product_search(&self, query: &ProductQuery) -> Result<SearchPage> {
        BackendClient::product_search(self, query).await
    }
}
