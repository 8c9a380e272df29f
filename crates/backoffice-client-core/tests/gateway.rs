//! Exercises the API gateway client against a mock HTTP server

use backoffice_client_core::Client;
use backoffice_shared::req_args::api::auth::{ForgotPasswordReqArgs, LoginReqArgs};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn no_notify() {}

fn sample_user_json() -> serde_json::Value {
    serde_json::json!({
        "id": 7,
        "email": "admin@example.com",
        "name": "Admin",
        "role": "admin",
        "status": "active",
    })
}

fn login_args() -> LoginReqArgs {
    LoginReqArgs::new("admin@example.com", "admin123".to_string().into())
}

async fn mount_login_success(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login-json"))
        .and(body_json(serde_json::json!({
            "email": "admin@example.com",
            "password": "admin123",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": token,
            "token_type": "bearer",
            "user": sample_user_json(),
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn login_stores_session_and_attaches_bearer_token() {
    // Arrange
    let server = MockServer::start().await;
    mount_login_success(&server, "tok-1").await;
    Mock::given(method("GET"))
        .and(path("/api/v1/auth/me"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_user_json()))
        .mount(&server)
        .await;
    let client = Client::new(server.uri());
    assert!(!client.is_logged_in());

    // Act
    let user = client
        .login(login_args(), no_notify)
        .await
        .expect("channel closed")
        .expect("login failed");

    // Assert - session holds exactly what the server returned
    assert_eq!(user.email.as_str(), "admin@example.com");
    assert!(client.is_logged_in());
    let session = client.session_snapshot().expect("session missing");
    assert_eq!(session.token, "tok-1");
    assert_eq!(session.user, user);

    // Assert - subsequent request carries the token (mock only matches with it)
    client
        .current_user(no_notify)
        .await
        .expect("channel closed")
        .expect("expected the authorized request to succeed");

    // Assert - logout clears both fields
    client.logout();
    assert!(!client.is_logged_in());
    assert!(client.session_snapshot().is_none());
    assert!(client.session_user().is_none());
}

#[tokio::test]
async fn login_failure_surfaces_server_detail_and_leaves_session_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login-json"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "detail": "Invalid email or password",
        })))
        .mount(&server)
        .await;
    let client = Client::new(server.uri());

    let err = client
        .login(login_args(), no_notify)
        .await
        .expect("channel closed")
        .expect_err("expected login to fail");

    assert_eq!(err.to_string(), "Invalid email or password");
    assert!(!client.is_logged_in());
}

#[tokio::test]
async fn non_json_error_body_degrades_to_default_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/products"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>boom</html>"))
        .mount(&server)
        .await;
    let client = Client::new(server.uri());

    let err = client
        .list_products(no_notify)
        .await
        .expect("channel closed")
        .expect_err("expected failure");

    assert_eq!(err.to_string(), "An error occurred");
}

#[tokio::test]
async fn logged_out_requests_omit_the_authorization_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;
    let client = Client::new(server.uri());

    client
        .list_products(no_notify)
        .await
        .expect("channel closed")
        .expect("request failed");

    let requests = server
        .received_requests()
        .await
        .expect("request recording is on by default");
    assert_eq!(requests.len(), 1);
    assert!(
        requests[0].headers.get("authorization").is_none(),
        "header must be omitted entirely when logged out"
    );
}

#[tokio::test]
async fn trailing_slashes_on_the_base_url_are_harmless() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;
    let client = Client::new(format!("{}///", server.uri()));

    let products = client
        .list_products(no_notify)
        .await
        .expect("channel closed")
        .expect("request failed");

    assert!(products.is_empty());
}

#[tokio::test]
async fn otp_request_returns_dev_echo_when_present() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/forgot-password"))
        .and(body_json(serde_json::json!({ "email": "user@example.com" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "sent",
            "dev_otp": "482913",
        })))
        .mount(&server)
        .await;
    let client = Client::new(server.uri());

    let ack = client
        .request_otp(
            ForgotPasswordReqArgs {
                email: "user@example.com".to_string(),
            },
            no_notify,
        )
        .await
        .expect("channel closed")
        .expect("request failed");

    assert_eq!(ack.message, "sent");
    assert_eq!(ack.dev_otp.as_deref(), Some("482913"));
}

#[tokio::test]
async fn otp_request_failure_carries_the_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/forgot-password"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "detail": "Email not found",
        })))
        .mount(&server)
        .await;
    let client = Client::new(server.uri());

    let err = client
        .request_otp(
            ForgotPasswordReqArgs {
                email: "ghost@example.com".to_string(),
            },
            no_notify,
        )
        .await
        .expect("channel closed")
        .expect_err("expected failure");

    assert_eq!(err.to_string(), "Email not found");
}

#[tokio::test]
async fn import_sends_multipart_and_parses_the_summary() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/products/import"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": 3,
            "failed": 1,
            "errors": ["row 4: missing name"],
        })))
        .mount(&server)
        .await;
    let client = Client::new(server.uri());

    let outcome = client
        .import_products(
            "products.xlsx".to_string(),
            b"not really a spreadsheet".to_vec(),
            no_notify,
        )
        .await
        .expect("channel closed")
        .expect("import failed");

    assert_eq!(outcome.success, 3);
    assert_eq!(outcome.failed, 1);
    assert_eq!(outcome.errors, vec!["row 4: missing name".to_string()]);

    let requests = server.received_requests().await.expect("recording on");
    let content_type = requests[0]
        .headers
        .get("content-type")
        .expect("content type missing")
        .to_str()
        .expect("non ascii content type");
    assert!(
        content_type.starts_with("multipart/form-data; boundary="),
        "transport should set the multipart boundary, got: {content_type}"
    );
}

#[tokio::test]
async fn import_error_uses_the_import_specific_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/products/import"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;
    let client = Client::new(server.uri());

    let err = client
        .import_products("products.xlsx".to_string(), Vec::new(), no_notify)
        .await
        .expect("channel closed")
        .expect_err("expected failure");

    assert_eq!(err.to_string(), "An error occurred during import");
}
