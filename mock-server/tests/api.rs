use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mock_server::{app, app_with, MockAccount};
use serde_json::{json, Value};
use tower::ServiceExt;

// base64("jane:hunter2")
const BASIC: &str = "Basic amFuZTpodW50ZXIy";
const SHIPMENTS: &str = "/v2/shipments/ACME";

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn request(method: &str, uri: &str, authorization: &str, body: Option<&str>) -> Request<String> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::AUTHORIZATION, authorization);
    if body.is_some() {
        builder = builder.header(http::header::CONTENT_TYPE, "application/json");
    }
    builder.body(body.unwrap_or_default().to_string()).unwrap()
}

async fn login(app: &Router) -> String {
    let resp = app
        .clone()
        .oneshot(request("GET", "/login", BASIC, None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    body["token"].as_str().unwrap().to_string()
}

async fn call(
    app: &Router,
    method: &str,
    uri: &str,
    token: &str,
    body: Option<&str>,
) -> axum::response::Response {
    app.clone()
        .oneshot(request(method, uri, &format!("Bearer {token}"), body))
        .await
        .unwrap()
}

// --- login ---

#[tokio::test]
async fn login_issues_token() {
    let app = app();
    let token = login(&app).await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn login_rejects_wrong_password() {
    let app = app();
    // base64("jane:wrong")
    let resp = app
        .oneshot(request("GET", "/login", "Basic amFuZTp3cm9uZw==", None))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = body_json(resp).await;
    assert!(body.get("token").is_none());
}

#[tokio::test]
async fn login_uses_configured_account() {
    let app = app_with(MockAccount {
        account: "OTHER".to_string(),
        username: "bob".to_string(),
        password: "pw".to_string(),
    });
    let resp = app
        .clone()
        .oneshot(request("GET", "/login", BASIC, None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // base64("bob:pw")
    let resp = app
        .oneshot(request("GET", "/login", "Basic Ym9iOnB3", None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

// --- authorization ---

#[tokio::test]
async fn shipments_require_token() {
    let app = app();
    let resp = call(&app, "GET", &format!("{SHIPMENTS}/"), "not-issued", None).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn shipments_reject_foreign_account() {
    let app = app();
    let token = login(&app).await;
    let resp = call(&app, "GET", "/v2/shipments/OTHER/", &token, None).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

// --- shipments ---

#[tokio::test]
async fn create_assigns_reference_and_status() {
    let app = app();
    let token = login(&app).await;
    let uri = format!("{SHIPMENTS}/");
    let resp = call(&app, "POST", &uri, &token, Some(r#"{"carrier":"DHL"}"#)).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let shipment: Value = body_json(resp).await;
    assert_eq!(shipment["reference"], "PNL-1717597661");
    assert_eq!(shipment["status"], "NEW");
    assert_eq!(shipment["carrier"], "DHL");
}

#[tokio::test]
async fn create_duplicate_reference_conflicts() {
    let app = app();
    let token = login(&app).await;
    let body = Some(r#"{"reference":"ORD-1"}"#);
    let resp = call(&app, "POST", &format!("{SHIPMENTS}/"), &token, body).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let resp = call(&app, "POST", &format!("{SHIPMENTS}/"), &token, body).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn create_rejects_non_object() {
    let app = app();
    let token = login(&app).await;
    let resp = call(&app, "POST", &format!("{SHIPMENTS}/"), &token, Some("[1,2]")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_unknown_shipment_is_404_with_json_body() {
    let app = app();
    let token = login(&app).await;
    let resp = call(&app, "GET", &format!("{SHIPMENTS}/PNL-0"), &token, None).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = body_json(resp).await;
    assert!(body["message"].as_str().unwrap().contains("PNL-0"));
}

#[tokio::test]
async fn cancel_requires_post() {
    let app = app();
    let token = login(&app).await;
    call(&app, "POST", &format!("{SHIPMENTS}/"), &token, Some(r#"{"reference":"X"}"#)).await;

    let resp = call(&app, "GET", &format!("{SHIPMENTS}/X/cancel"), &token, None).await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);

    let resp = call(&app, "POST", &format!("{SHIPMENTS}/X/cancel"), &token, None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let shipment: Value = body_json(resp).await;
    assert_eq!(shipment["status"], "CANCELLED");
}

#[tokio::test]
async fn carriers_are_not_mistaken_for_a_shipment() {
    let app = app();
    let token = login(&app).await;
    let resp = call(&app, "GET", &format!("{SHIPMENTS}/carriers"), &token, None).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let carriers: Vec<Value> = body_json(resp).await;
    assert!(carriers.iter().any(|c| c["code"] == "DHL"));
}

// --- full lifecycle ---

#[tokio::test]
async fn shipment_lifecycle() {
    let app = app();
    let token = login(&app).await;

    // create
    let resp = call(
        &app,
        "POST",
        &format!("{SHIPMENTS}/"),
        &token,
        Some(r#"{"reference":"ORD-9","carrier":"DHL","status":"open"}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = body_json(resp).await;
    assert_eq!(created["reference"], "ORD-9");

    // list, filtered
    let resp = call(&app, "GET", &format!("{SHIPMENTS}/?status=open"), &token, None).await;
    let shipments: Vec<Value> = body_json(resp).await;
    assert_eq!(shipments, vec![created.clone()]);
    let resp = call(&app, "GET", &format!("{SHIPMENTS}/?status=closed"), &token, None).await;
    let shipments: Vec<Value> = body_json(resp).await;
    assert!(shipments.is_empty());

    // update keeps the reference
    let resp = call(
        &app,
        "PUT",
        &format!("{SHIPMENTS}/ORD-9"),
        &token,
        Some(r#"{"carrier":"UPS","reference":"HIJACK"}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = body_json(resp).await;
    assert_eq!(updated["carrier"], "UPS");
    assert_eq!(updated["reference"], "ORD-9");

    // sub-resources
    for suffix in ["labels", "documents"] {
        let resp = call(&app, "GET", &format!("{SHIPMENTS}/ORD-9/{suffix}"), &token, None).await;
        assert_eq!(resp.status(), StatusCode::OK, "{suffix}");
        let items: Vec<Value> = body_json(resp).await;
        assert_eq!(items[0]["reference"], "ORD-9", "{suffix}");
    }
    let resp = call(&app, "GET", &format!("{SHIPMENTS}/ORD-9/status"), &token, None).await;
    let status: Value = body_json(resp).await;
    assert_eq!(status, json!({"reference": "ORD-9", "status": "open"}));
    let resp = call(&app, "GET", &format!("{SHIPMENTS}/ORD-9/trackandtrace"), &token, None).await;
    let trace: Value = body_json(resp).await;
    assert_eq!(trace["events"][0]["code"], "open");

    // delete
    let resp = call(&app, "DELETE", &format!("{SHIPMENTS}/ORD-9"), &token, None).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // gone
    let resp = call(&app, "GET", &format!("{SHIPMENTS}/ORD-9/status"), &token, None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let resp = call(&app, "DELETE", &format!("{SHIPMENTS}/ORD-9"), &token, None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
