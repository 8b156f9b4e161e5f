use folio_core::{BlogDraft, CategoryDraft};
use folio_engine::{AdminClient, ApiClient, ApiError, ClientSettings, MemoryTokenStore, Session};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(&server.uri(), ClientSettings::default()).expect("client")
}

fn logged_in() -> Session {
    Session::init(Box::new(MemoryTokenStore::with_token("t0k")))
}

fn draft() -> BlogDraft {
    BlogDraft {
        title: "Lighting a small room".to_string(),
        content: "A long enough body of text that easily clears the fifty character bar."
            .to_string(),
        tags: "a, b ,c".to_string(),
        featured_image: "https://cdn/lamp.jpg".to_string(),
        author: "Ana".to_string(),
        ..BlogDraft::default()
    }
}

#[tokio::test]
async fn update_sends_trimmed_tags_with_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/blogs/b1"))
        .and(header("authorization", "Bearer t0k"))
        .and(body_json(json!({
            "title": "Lighting a small room",
            "content": "A long enough body of text that easily clears the fifty character bar.",
            "tags": ["a", "b", "c"],
            "featuredImage": "https://cdn/lamp.jpg",
            "status": "draft",
            "contentType": "html",
            "author": "Ana",
            "likesCount": 0,
            "savesCount": 0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Blog updated"})))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server);
    let mut session = logged_in();
    let payload = draft().validate().unwrap();
    let ack = AdminClient::new(&api, &mut session)
        .update_blog("b1", &payload)
        .await
        .unwrap();
    assert_eq!(ack.status, 200);
    assert_eq!(ack.message.as_deref(), Some("Blog updated"));
}

#[tokio::test]
async fn missing_token_fails_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let api = client(&server);
    let mut session = Session::init(Box::new(MemoryTokenStore::default()));
    let payload = CategoryDraft {
        name: "Interiors".to_string(),
        ..CategoryDraft::default()
    }
    .validate()
    .unwrap();
    let err = AdminClient::new(&api, &mut session)
        .create_category(&payload)
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn rejected_token_tears_session_down() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/blogs/b1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Token expired"})))
        .mount(&server)
        .await;

    let api = client(&server);
    let mut session = logged_in();
    let err = AdminClient::new(&api, &mut session)
        .delete_blog("b1")
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ApiError::Unauthorized {
            message: "Token expired".to_string()
        }
    );
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn server_validation_errors_keep_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/blogs"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "Validation failed",
            "details": [{"message": "Slug already exists"}]
        })))
        .mount(&server)
        .await;

    let api = client(&server);
    let mut session = logged_in();
    let payload = draft().validate().unwrap();
    let err = AdminClient::new(&api, &mut session)
        .create_blog(&payload)
        .await
        .unwrap_err();
    assert_eq!(err.user_message("Failed to save blog"), "Validation failed");
    assert_eq!(err.details(), ["Slug already exists"]);
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn verify_accepts_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/admin/verify"))
        .and(header("authorization", "Bearer t0k"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let api = client(&server);
    let mut session = logged_in();
    let ack = AdminClient::new(&api, &mut session).verify().await.unwrap();
    assert_eq!(ack.status, 204);
    assert_eq!(ack.message, None);
}

#[tokio::test]
async fn image_upload_returns_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/blogs/upload"))
        .and(header("authorization", "Bearer t0k"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"url": "https://bucket/lamp.jpg"})),
        )
        .mount(&server)
        .await;

    let api = client(&server);
    let mut session = logged_in();
    let url = AdminClient::new(&api, &mut session)
        .upload_image("lamp.jpg", b"\x89PNG fake".to_vec())
        .await
        .unwrap();
    assert_eq!(url, "https://bucket/lamp.jpg");

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"image\""));
    assert!(body.contains("filename=\"lamp.jpg\""));
    assert!(body.contains("Content-Type: image/jpeg"), "{body}");
}

#[tokio::test]
async fn magazine_pdf_goes_to_slug_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/magazines/summer-2025/pdf"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"message": "Uploaded"})))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server);
    let mut session = logged_in();
    let ack = AdminClient::new(&api, &mut session)
        .upload_magazine_pdf("summer-2025", "issue.pdf", b"%PDF-1.7".to_vec())
        .await
        .unwrap();
    assert_eq!(ack.status, 201);

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"pdf\""));
    assert!(body.contains("Content-Type: application/pdf"), "{body}");
}
