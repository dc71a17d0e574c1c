//! REST surface tests against a server bound to an ephemeral port.

use contact_book::client::{AsyncContactClient, AsyncContactClientImpl, ContactClient};
use contact_book::domain::ContactId;
use contact_book::error::ClientError;
use contact_book::models::ContactPayload;
use contact_book::repositories::DocumentContactRepository;
use contact_book::server::{build_router, AppState};
use contact_book::services::ContactServiceImpl;
use contact_book::store::{MemoryStore, SqliteStore};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;

async fn serve(service: ContactServiceImpl) -> String {
    let app = build_router(AppState::new(Arc::new(service)));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", address)
}

async fn spawn_app() -> String {
    let repository = DocumentContactRepository::new(Arc::new(MemoryStore::new()));
    serve(ContactServiceImpl::new(Arc::new(repository))).await
}

enum Body {
    None,
    Json(Value),
    Raw(&'static str),
}

/// Send a request and return the status with the body parsed as JSON.
async fn request(method: &'static str, url: String, body: Body) -> (u16, Value) {
    tokio::task::spawn_blocking(move || {
        let request = ureq::request(method, &url);
        let result = match body {
            Body::None => request.call(),
            Body::Json(value) => request.send_json(value),
            Body::Raw(text) => request
                .set("Content-Type", "application/json")
                .send_string(text),
        };

        let response = match result {
            Ok(response) => response,
            Err(ureq::Error::Status(_, response)) => response,
            Err(e) => panic!("transport error: {}", e),
        };

        let status = response.status();
        let text = response.into_string().unwrap();
        let value = serde_json::from_str(&text).unwrap_or(Value::String(text));
        (status, value)
    })
    .await
    .unwrap()
}

fn john(id: i64) -> Value {
    json!({
        "id": id,
        "FirstName": "John",
        "LastName": "Doe",
        "Email": "john@doe.com",
        "Phone": "1234567890"
    })
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_then_get() {
    let base = spawn_app().await;

    let (status, created) =
        request("POST", format!("{base}/contact"), Body::Json(john(1))).await;
    assert_eq!(status, 201);
    assert_eq!(created["FirstName"], "John");
    assert_eq!(created["LastName"], "Doe");
    assert_eq!(created["Email"], "john@doe.com");
    assert_eq!(created["Phone"], "1234567890");
    assert!(created["_id"].is_string());

    let (status, fetched) = request("GET", format!("{base}/contact/1"), Body::None).await;
    assert_eq!(status, 200);
    assert_eq!(fetched, created);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_short_phone_is_bad_request() {
    let base = spawn_app().await;

    let mut payload = john(1);
    payload["Phone"] = json!("12345");

    let (status, body) = request("POST", format!("{base}/contact"), Body::Json(payload)).await;
    assert_eq!(status, 400);
    assert_eq!(
        body,
        json!({
            "statusCode": 400,
            "message": ["Phone must be a string of 10 digits"],
            "error": "Bad Request"
        })
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_bad_email_is_bad_request() {
    let base = spawn_app().await;

    let mut payload = john(1);
    payload["Email"] = json!("not-an-email");

    let (status, body) = request("POST", format!("{base}/contact"), Body::Json(payload)).await;
    assert_eq!(status, 400);
    assert_eq!(
        body["message"],
        json!(["Email must be a valid email address and it should not be empty"])
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_malformed_json_is_bad_request() {
    let base = spawn_app().await;

    let (status, body) = request("POST", format!("{base}/contact"), Body::Raw("{not json")).await;
    assert_eq!(status, 400);
    assert_eq!(body["statusCode"], 400);
    assert!(body["message"].is_string());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_missing_is_not_found() {
    let base = spawn_app().await;

    let (status, body) = request("GET", format!("{base}/contact/404"), Body::None).await;
    assert_eq!(status, 404);
    assert_eq!(
        body,
        json!({ "statusCode": 404, "message": "Not Found", "error": "Not Found" })
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_non_integer_id_is_bad_request() {
    let base = spawn_app().await;

    for method in ["GET", "DELETE", "PUT"] {
        let (status, _) = request(method, format!("{base}/contact/abc"), Body::None).await;
        assert_eq!(status, 400, "{} /contact/abc", method);
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete() {
    let base = spawn_app().await;
    request("POST", format!("{base}/contact"), Body::Json(john(1))).await;

    let (status, body) = request("DELETE", format!("{base}/contact/1"), Body::None).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "acknowledged": true, "deletedCount": 1 }));

    let (status, _) = request("DELETE", format!("{base}/contact/1"), Body::None).await;
    assert_eq!(status, 404);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_put_phone_changes_only_phone() {
    let base = spawn_app().await;
    let (_, created) = request("POST", format!("{base}/contact"), Body::Json(john(1))).await;

    let (status, updated) = request(
        "PUT",
        format!("{base}/contact/1?property_name=Phone&property_value=0987654321"),
        Body::None,
    )
    .await;
    assert_eq!(status, 200);

    let mut expected = created;
    expected["Phone"] = json!("0987654321");
    assert_eq!(updated, expected);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_put_id_is_rejected() {
    let base = spawn_app().await;
    request("POST", format!("{base}/contact"), Body::Json(john(1))).await;

    let (status, body) = request(
        "PUT",
        format!("{base}/contact/1?property_name=id&property_value=2"),
        Body::None,
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Bad Request");

    let (status, _) = request("GET", format!("{base}/contact/1"), Body::None).await;
    assert_eq!(status, 200);
    let (status, _) = request("GET", format!("{base}/contact/2"), Body::None).await;
    assert_eq!(status, 404);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_put_requires_property_name_and_valid_value() {
    let base = spawn_app().await;
    request("POST", format!("{base}/contact"), Body::Json(john(1))).await;

    let (status, _) = request(
        "PUT",
        format!("{base}/contact/1?property_value=x"),
        Body::None,
    )
    .await;
    assert_eq!(status, 400);

    let (status, body) = request(
        "PUT",
        format!("{base}/contact/1?property_name=Phone&property_value=123"),
        Body::None,
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["message"], json!(["Phone must be a string of 10 digits"]));

    let (status, _) = request(
        "PUT",
        format!("{base}/contact/9?property_name=Phone&property_value=0987654321"),
        Body::None,
    )
    .await;
    assert_eq!(status, 404);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_empty_policy() {
    let base = spawn_app().await;
    let (status, _) = request("GET", format!("{base}/contact"), Body::None).await;
    assert_eq!(status, 404);

    let repository = DocumentContactRepository::new(Arc::new(MemoryStore::new()));
    let base = serve(
        ContactServiceImpl::new(Arc::new(repository)).with_empty_list_not_found(false),
    )
    .await;
    let (status, body) = request("GET", format!("{base}/contact"), Body::None).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!([]));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cors_preflight() {
    let base = spawn_app().await;

    let headers = tokio::task::spawn_blocking(move || {
        let response = ureq::request("OPTIONS", &format!("{base}/contact"))
            .set("Origin", "http://localhost:3000")
            .set("Access-Control-Request-Method", "POST")
            .set("Access-Control-Request-Headers", "content-type")
            .call()
            .unwrap();
        (
            response.header("access-control-allow-origin").map(str::to_string),
            response.header("access-control-allow-methods").map(str::to_string),
        )
    })
    .await
    .unwrap();

    assert_eq!(headers.0.as_deref(), Some("*"));
    assert!(headers.1.unwrap_or_default().contains("PUT"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_client_against_sqlite_backed_server() {
    let store = SqliteStore::open_in_memory("contacts").unwrap();
    let repository = DocumentContactRepository::new(Arc::new(store));
    let base = serve(ContactServiceImpl::new(Arc::new(repository))).await;

    let client = AsyncContactClientImpl::new(ContactClient::with_base_url(base));

    assert!(matches!(client.list_contacts().await, Err(ClientError::NotFound)));

    let payload = ContactPayload::new("Jane", "Roe", "jane@roe.org", "5551234567").with_id(7);
    let created = client.create_contact(&payload).await.unwrap();
    assert_eq!(created.id, Some(ContactId::new(7)));

    let updated = client
        .update_property(ContactId::new(7), "LastName", "Smith")
        .await
        .unwrap();
    assert_eq!(updated.last_name.as_str(), "Smith");
    assert_eq!(updated.first_name.as_str(), "Jane");

    let rejected = client
        .update_property(ContactId::new(7), "Email", "jane at roe")
        .await;
    match rejected {
        Err(ClientError::BadRequest(messages)) => assert_eq!(
            messages,
            vec!["Email must be a valid email address and it should not be empty"]
        ),
        other => panic!("Expected BadRequest, got: {:?}", other),
    }

    assert_eq!(client.list_contacts().await.unwrap().len(), 1);

    let result = client.delete_contact(ContactId::new(7)).await.unwrap();
    assert_eq!(result.deleted_count, 1);
    assert!(matches!(
        client.get_contact(ContactId::new(7)).await,
        Err(ClientError::NotFound)
    ));

    assert!(client.inner().metrics().http_requests_total() >= 6);
    assert!(client.inner().metrics().http_errors_total() >= 2);
}
