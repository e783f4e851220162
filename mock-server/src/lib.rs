//! In-memory imitation of the Transsmart shipment API.
//!
//! One account is configured up front. `GET /login` checks HTTP Basic
//! credentials and hands out a random bearer token; every shipment route
//! requires one of those tokens and the configured account in the path.

use std::{
    collections::{BTreeMap, HashMap, HashSet},
    sync::Arc,
};

use axum::{
    extract::{Path, Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const ACCOUNT: &str = "ACME";
pub const USERNAME: &str = "jane";
pub const PASSWORD: &str = "hunter2";

/// The single account the server accepts.
#[derive(Clone, Debug)]
pub struct MockAccount {
    pub account: String,
    pub username: String,
    pub password: String,
}

impl Default for MockAccount {
    fn default() -> Self {
        Self {
            account: ACCOUNT.to_string(),
            username: USERNAME.to_string(),
            password: PASSWORD.to_string(),
        }
    }
}

#[derive(Debug)]
pub struct MockState {
    account: MockAccount,
    tokens: HashSet<String>,
    shipments: BTreeMap<String, Value>,
    next_id: u64,
}

pub type Db = Arc<RwLock<MockState>>;

type Rejection = (StatusCode, Json<Value>);

pub fn app() -> Router {
    app_with(MockAccount::default())
}

pub fn app_with(account: MockAccount) -> Router {
    let db: Db = Arc::new(RwLock::new(MockState {
        account,
        tokens: HashSet::new(),
        shipments: BTreeMap::new(),
        next_id: 1_717_597_661,
    }));
    Router::new()
        .route("/login", get(login))
        .route("/v2/shipments/{account}", get(list_shipments).post(create_shipment))
        .route("/v2/shipments/{account}/", get(list_shipments).post(create_shipment))
        .route("/v2/shipments/{account}/carriers", get(list_carriers))
        .route(
            "/v2/shipments/{account}/{id}",
            get(get_shipment).put(update_shipment).delete(delete_shipment),
        )
        .route("/v2/shipments/{account}/{id}/cancel", post(cancel_shipment))
        .route("/v2/shipments/{account}/{id}/labels", get(get_labels))
        .route("/v2/shipments/{account}/{id}/documents", get(get_documents))
        .route("/v2/shipments/{account}/{id}/status", get(get_status))
        .route("/v2/shipments/{account}/{id}/trackandtrace", get(get_track_and_trace))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn reject(status: StatusCode, message: &str) -> Rejection {
    (status, Json(json!({ "message": message })))
}

fn not_found(id: &str) -> Rejection {
    reject(StatusCode::NOT_FOUND, &format!("Shipment {id} not found"))
}

/// Decode `Authorization: Basic ...` into `(username, password)`.
fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let encoded = value.strip_prefix("Basic ")?;
    let decoded = String::from_utf8(STANDARD.decode(encoded).ok()?).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

fn authorize(state: &MockState, headers: &HeaderMap, account: &str) -> Result<(), Rejection> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    match token {
        Some(token) if state.tokens.contains(token) => {}
        _ => return Err(reject(StatusCode::UNAUTHORIZED, "Invalid or missing token")),
    }
    if account != state.account.account {
        return Err(reject(StatusCode::FORBIDDEN, "No access to account"));
    }
    Ok(())
}

async fn login(State(db): State<Db>, headers: HeaderMap) -> Result<Json<Value>, Rejection> {
    let mut state = db.write().await;
    match basic_credentials(&headers) {
        Some((username, password))
            if username == state.account.username && password == state.account.password =>
        {
            let token = Uuid::new_v4().simple().to_string();
            state.tokens.insert(token.clone());
            Ok(Json(json!({ "token": token })))
        }
        _ => Err(reject(StatusCode::UNAUTHORIZED, "Invalid credentials")),
    }
}

async fn list_shipments(
    State(db): State<Db>,
    Path(account): Path<String>,
    Query(filters): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Value>>, Rejection> {
    let state = db.read().await;
    authorize(&state, &headers, &account)?;
    let shipments = state
        .shipments
        .values()
        .filter(|shipment| {
            filters.iter().all(|(key, value)| {
                shipment.get(key).and_then(Value::as_str) == Some(value.as_str())
            })
        })
        .cloned()
        .collect();
    Ok(Json(shipments))
}

async fn create_shipment(
    State(db): State<Db>,
    Path(account): Path<String>,
    headers: HeaderMap,
    Json(input): Json<Value>,
) -> Result<(StatusCode, Json<Value>), Rejection> {
    let mut state = db.write().await;
    authorize(&state, &headers, &account)?;
    let Value::Object(mut shipment) = input else {
        return Err(reject(StatusCode::BAD_REQUEST, "Shipment must be a JSON object"));
    };
    let id = match shipment.get("reference").and_then(Value::as_str) {
        Some(reference) => reference.to_string(),
        None => {
            let id = format!("PNL-{}", state.next_id);
            state.next_id += 1;
            id
        }
    };
    if state.shipments.contains_key(&id) {
        return Err(reject(StatusCode::CONFLICT, "Shipment already exists"));
    }
    shipment.insert("reference".to_string(), json!(id));
    shipment.entry("status").or_insert_with(|| json!("NEW"));
    let shipment = Value::Object(shipment);
    state.shipments.insert(id, shipment.clone());
    Ok((StatusCode::CREATED, Json(shipment)))
}

async fn get_shipment(
    State(db): State<Db>,
    Path((account, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<Value>, Rejection> {
    let state = db.read().await;
    authorize(&state, &headers, &account)?;
    state.shipments.get(&id).cloned().map(Json).ok_or_else(|| not_found(&id))
}

async fn update_shipment(
    State(db): State<Db>,
    Path((account, id)): Path<(String, String)>,
    headers: HeaderMap,
    Json(input): Json<Value>,
) -> Result<Json<Value>, Rejection> {
    let mut state = db.write().await;
    authorize(&state, &headers, &account)?;
    let Value::Object(changes) = input else {
        return Err(reject(StatusCode::BAD_REQUEST, "Shipment must be a JSON object"));
    };
    let shipment = state.shipments.get_mut(&id).ok_or_else(|| not_found(&id))?;
    if let Some(fields) = shipment.as_object_mut() {
        for (key, value) in changes {
            // The reference is the identity of the shipment.
            if key != "reference" {
                fields.insert(key, value);
            }
        }
    }
    Ok(Json(shipment.clone()))
}

async fn delete_shipment(
    State(db): State<Db>,
    Path((account, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<StatusCode, Rejection> {
    let mut state = db.write().await;
    authorize(&state, &headers, &account)?;
    state
        .shipments
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| not_found(&id))
}

async fn cancel_shipment(
    State(db): State<Db>,
    Path((account, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<Value>, Rejection> {
    let mut state = db.write().await;
    authorize(&state, &headers, &account)?;
    let shipment = state.shipments.get_mut(&id).ok_or_else(|| not_found(&id))?;
    shipment["status"] = json!("CANCELLED");
    Ok(Json(shipment.clone()))
}

/// Look up a shipment for one of the read-only sub-resources.
async fn read_shipment(
    db: &Db,
    headers: &HeaderMap,
    account: &str,
    id: &str,
) -> Result<Value, Rejection> {
    let state = db.read().await;
    authorize(&state, headers, account)?;
    state.shipments.get(id).cloned().ok_or_else(|| not_found(id))
}

fn status_of(shipment: &Value) -> &str {
    shipment["status"].as_str().unwrap_or("NEW")
}

async fn get_labels(
    State(db): State<Db>,
    Path((account, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<Value>, Rejection> {
    read_shipment(&db, &headers, &account, &id).await?;
    Ok(Json(json!([{
        "reference": id,
        "labelType": "PDF",
        "data": STANDARD.encode(format!("%PDF-1.4 label {id}")),
    }])))
}

async fn get_documents(
    State(db): State<Db>,
    Path((account, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<Value>, Rejection> {
    read_shipment(&db, &headers, &account, &id).await?;
    Ok(Json(json!([{
        "reference": id,
        "documentType": "PACKINGLIST",
        "data": STANDARD.encode(format!("%PDF-1.4 packing list {id}")),
    }])))
}

async fn get_status(
    State(db): State<Db>,
    Path((account, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<Value>, Rejection> {
    let shipment = read_shipment(&db, &headers, &account, &id).await?;
    Ok(Json(json!({ "reference": id, "status": status_of(&shipment) })))
}

async fn get_track_and_trace(
    State(db): State<Db>,
    Path((account, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<Value>, Rejection> {
    let shipment = read_shipment(&db, &headers, &account, &id).await?;
    Ok(Json(json!({
        "reference": id,
        "events": [{ "code": status_of(&shipment), "description": "Status update" }],
    })))
}

async fn list_carriers(
    State(db): State<Db>,
    Path(account): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Value>, Rejection> {
    let state = db.read().await;
    authorize(&state, &headers, &account)?;
    Ok(Json(json!([
        { "code": "DHL", "name": "DHL Parcel" },
        { "code": "UPS", "name": "UPS" },
        { "code": "PNL", "name": "PostNL" },
    ])))
}
