use pretty_assertions::assert_eq;
use serde_json::json;
use storefront_backend_client::BackendClient;
use storefront_backend_client::ClientError;
use storefront_backend_client::ProductQuery;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;
use wiremock::matchers::method;
use wiremock::matchers::path;
use wiremock::matchers::query_param;
use wiremock::matchers::query_param_is_missing;

#[tokio::test]
async fn categories_decodes_server_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/categories/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 2, "name": "Shoes", "image_url": "http://img/2.png", "description": null },
            { "id": 1, "name": "Bags" }
        ])))
        .mount(&server)
        .await;

    let client = BackendClient::new(server.uri()).expect("client should build");
    let categories = client.categories().await.expect("categories should load");

    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].id, 2);
    assert_eq!(categories[0].name, "Shoes");
    assert_eq!(categories[1].id, 1);
    assert_eq!(categories[1].image_url, None);
}

#[tokio::test]
async fn product_search_sends_category_and_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/product_search/"))
        .and(query_param("category_id", "7"))
        .and(query_param("page", "1"))
        .and(query_param_is_missing("q"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{
                "product_id": 42,
                "name": "Trail Runner",
                "description": "Lightweight trail shoe",
                "price": 129.99,
                "quantity": 3,
                "image_url": null,
                "category_id": 7
            }],
            "total": 1,
            "page": 1,
            "pages": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = BackendClient::new(server.uri()).expect("client should build");
    let page = client
        .product_search(&ProductQuery {
            q: None,
            category_id: Some(7),
            page: 1,
        })
        .await
        .expect("search should succeed");

    assert_eq!(page.total, 1);
    assert_eq!(page.pages, 1);
    assert_eq!(page.results[0].product_id, 42);
}

#[tokio::test]
async fn search_text_never_travels_with_category_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/product_search/"))
        .and(query_param("q", "running shoes"))
        .and(query_param("page", "2"))
        .and(query_param_is_missing("category_id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [],
            "total": 0,
            "page": 2,
            "pages": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = BackendClient::new(server.uri()).expect("client should build");
    let page = client
        .product_search(&ProductQuery {
            q: Some("running shoes".to_string()),
            category_id: Some(7),
            page: 2,
        })
        .await
        .expect("search should succeed");

    assert!(page.results.is_empty());
}

#[tokio::test]
async fn non_success_status_maps_to_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/product_search/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("search backend down"))
        .mount(&server)
        .await;

    let client = BackendClient::new(server.uri()).expect("client should build");
    let err = client
        .product_search(&ProductQuery::default())
        .await
        .expect_err("500 should surface as an error");

    match err {
        ClientError::Status { status, body } => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "search backend down");
        }
        other => panic!("unexpected error variant: {other:?}"),
    }
}

#[tokio::test]
async fn bearer_token_is_attached_when_signed_in() {
    use wiremock::matchers::header;

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/categories/"))
        .and(header("authorization", "Bearer token-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let (tx, rx) = tokio::sync::watch::channel(Some("token-123".to_string()));
    let client = BackendClient::new(server.uri())
        .expect("client should build")
        .with_token_source(rx);
    client.categories().await.expect("categories should load");
    drop(tx);
}
