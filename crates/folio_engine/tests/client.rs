use folio_engine::{ApiClient, ApiError, BlogQuery, ClientSettings, PublicationSource};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(&server.uri(), ClientSettings::default()).expect("client")
}

#[tokio::test]
async fn publication_is_normalized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/magazines/summer-2025"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "title": "Summer 2025",
                "dateOfPublish": "2025-06-05",
                "author": "Ana",
                "publisher": "Folio House",
                "coverSummary": "Bright interiors.",
                "keywords": ["design", "summer"],
                "pages": [{"url": "https://cdn/p1.jpg"}, {"url": ""}, {}, {"url": "https://cdn/p2.jpg"}]
            }
        })))
        .mount(&server)
        .await;

    let publication = client(&server)
        .fetch_publication("summer-2025")
        .await
        .expect("publication");
    assert_eq!(publication.id, "summer-2025");
    assert_eq!(publication.title, "Summer 2025");
    assert_eq!(publication.page_count(), 2);
    assert_eq!(publication.page(1).map(|p| p.index), Some(1));
    assert_eq!(
        publication.page(1).map(|p| p.image_url.as_str()),
        Some("https://cdn/p2.jpg")
    );
    assert_eq!(publication.keywords, vec!["design", "summer"]);
}

#[tokio::test]
async fn empty_pages_is_a_valid_publication() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/magazines/modern-living-magazine"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"title": "Modern Living", "pages": []}})),
        )
        .mount(&server)
        .await;

    let publication = client(&server)
        .fetch_publication("modern-living-magazine")
        .await
        .expect("publication");
    assert_eq!(publication.page_count(), 0);
}

#[tokio::test]
async fn null_keywords_still_load() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/magazines/winter-2024"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "title": "Winter 2024",
                "keywords": null,
                "pages": [{"url": "https://cdn/w1.jpg"}]
            }
        })))
        .mount(&server)
        .await;

    let publication = client(&server)
        .fetch_publication("winter-2024")
        .await
        .expect("publication");
    assert_eq!(publication.page_count(), 1);
    assert!(publication.keywords.is_empty());
}

#[tokio::test]
async fn missing_pages_field_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/magazines/broken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"title": "x"}})))
        .mount(&server)
        .await;

    let err = client(&server).fetch_publication("broken").await.unwrap_err();
    assert!(matches!(err, ApiError::Malformed { .. }), "{err:?}");
}

#[tokio::test]
async fn not_found_carries_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/magazines/nope"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"message": "Magazine not found"})),
        )
        .mount(&server)
        .await;

    let err = client(&server).fetch_publication("nope").await.unwrap_err();
    assert_eq!(err.user_message("Failed to load magazine"), "Magazine not found");
    assert!(matches!(err, ApiError::Http { status: 404, .. }));
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let api = ApiClient::new("http://127.0.0.1:1", ClientSettings::default()).unwrap();
    let err = api.fetch_publication("any").await.unwrap_err();
    assert!(matches!(err, ApiError::Network { .. }), "{err:?}");
    assert_eq!(err.user_message("Failed to load magazine"), "Failed to load magazine");
}

#[tokio::test]
async fn magazine_listing_reads_pagination() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/magazines"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"slug": "a", "title": "A", "pages": [{"url": "https://cdn/a1.jpg"}]}],
            "pagination": {"page": 2, "limit": 5, "total": 6, "totalPages": 2, "hasNextPage": false, "hasPrevPage": true}
        })))
        .mount(&server)
        .await;

    let listing = client(&server).list_magazines(2, 5).await.unwrap();
    assert_eq!(listing.items.len(), 1);
    assert_eq!(listing.items[0].cover_image.as_deref(), Some("https://cdn/a1.jpg"));
    assert_eq!(listing.items[0].page_count, 1);
    assert_eq!(listing.pagination.total_pages, 2);
    assert!(listing.pagination.has_prev_page);
}

#[tokio::test]
async fn search_sends_only_present_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/blogs/search"))
        .and(query_param("q", "lamp design"))
        .and(query_param("tag", "lighting"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "blogs": [{"_id": "1", "slug": "lamps", "title": "Lamps", "tags": ["lighting"]}]
        })))
        .mount(&server)
        .await;

    let query = BlogQuery {
        q: Some("lamp design".to_string()),
        tag: Some("lighting".to_string()),
        category: Some("  ".to_string()),
        ..BlogQuery::default()
    };
    let page = client(&server).search_blogs(&query).await.unwrap();
    assert_eq!(page.posts.len(), 1);
    assert_eq!(page.posts[0].slug, "lamps");

    let requests = server.received_requests().await.unwrap();
    let url = &requests[0].url;
    assert!(url.query_pairs().all(|(key, _)| key != "category"));
}

#[tokio::test]
async fn older_blogs_accept_data_wrapper() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/blogs/older"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"slug": "old", "title": "Old"}],
            "previousPage": 2
        })))
        .mount(&server)
        .await;

    let query = BlogQuery {
        page: Some(3),
        ..BlogQuery::default()
    };
    let page = client(&server).older_blogs(&query).await.unwrap();
    assert_eq!(page.posts[0].title, "Old");
    assert_eq!(page.previous_page, Some(2));
    assert_eq!(page.next_page, None);
}

#[tokio::test]
async fn login_reads_nested_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/admin/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"token": "t0k"}})))
        .mount(&server)
        .await;

    let credentials = folio_core::LoginForm {
        email: "admin@folio.test".to_string(),
        password: "secret".to_string(),
    }
    .validate()
    .unwrap();
    let token = client(&server).login(&credentials).await.unwrap();
    assert_eq!(token, "t0k");
}

#[tokio::test]
async fn categories_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"_id": "c1", "name": "Interiors", "color": "#aa0000"}]
        })))
        .mount(&server)
        .await;

    let categories = client(&server).list_categories().await.unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].id, "c1");
    assert_eq!(categories[0].name, "Interiors");
}

#[test]
fn rejects_non_http_base() {
    let err = ApiClient::new("ftp://example.com", ClientSettings::default()).unwrap_err();
    assert!(matches!(err, ApiError::Network { .. }));
}
