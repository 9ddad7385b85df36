//! Throwaway users collection served over axum

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Map, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub struct Collection {
    pub records: Vec<Value>,
    pub next_id: u64,
    /// Every request as "METHOD /path"
    pub requests: Vec<String>,
    /// Answer every request with this status instead
    pub fail_with: Option<u16>,
}

pub type Shared = Arc<Mutex<Collection>>;

pub struct TestServer {
    pub addr: SocketAddr,
    pub base_url: String,
    pub state: Shared,
}

impl TestServer {
    pub async fn new() -> Self {
        Self::with_records(vec![]).await
    }

    pub async fn with_records(records: Vec<Value>) -> Self {
        let state: Shared = Arc::new(Mutex::new(Collection {
            next_id: records.len() as u64 + 1,
            records,
            ..Default::default()
        }));

        let app = Router::new()
            .route("/users", get(list).post(create))
            .route("/users/:id", axum::routing::put(update).delete(remove))
            .with_state(state.clone());

        // Start server on random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}/users", addr);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        TestServer {
            addr,
            base_url,
            state,
        }
    }

    pub fn fail_with(&self, status: u16) {
        self.state.lock().unwrap().fail_with = Some(status);
    }

    pub fn requests(&self) -> Vec<String> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn records(&self) -> Vec<Value> {
        self.state.lock().unwrap().records.clone()
    }
}

pub fn user(id: &str, first: &str, last: &str) -> Value {
    json!({
        "id": id,
        "firstName": first,
        "lastName": last,
        "phone": "555-123-4567",
        "email": format!("{}@example.com", first.to_lowercase()),
        "createdAt": "2024-01-01T00:00:00.000Z"
    })
}

fn record(state: &Shared, line: String) -> Result<(), Response> {
    let mut collection = state.lock().unwrap();
    collection.requests.push(line);
    match collection.fail_with {
        Some(status) => Err(StatusCode::from_u16(status).unwrap().into_response()),
        None => Ok(()),
    }
}

async fn list(State(state): State<Shared>) -> Response {
    if let Err(response) = record(&state, "GET /users".into()) {
        return response;
    }
    let records = state.lock().unwrap().records.clone();
    Json(Value::Array(records)).into_response()
}

async fn create(State(state): State<Shared>, Json(body): Json<Map<String, Value>>) -> Response {
    if let Err(response) = record(&state, "POST /users".into()) {
        return response;
    }
    let mut collection = state.lock().unwrap();
    let mut body = body;
    body.insert("id".into(), Value::String(collection.next_id.to_string()));
    collection.next_id += 1;
    let created = Value::Object(body);
    collection.records.push(created.clone());
    (StatusCode::CREATED, Json(created)).into_response()
}

async fn update(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(body): Json<Map<String, Value>>,
) -> Response {
    if let Err(response) = record(&state, format!("PUT /users/{id}")) {
        return response;
    }
    let mut collection = state.lock().unwrap();
    let Some(slot) = collection.records.iter_mut().find(|r| r["id"] == id.as_str()) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let mut body = body;
    body.insert("id".into(), Value::String(id));
    *slot = Value::Object(body);
    Json(slot.clone()).into_response()
}

async fn remove(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    if let Err(response) = record(&state, format!("DELETE /users/{id}")) {
        return response;
    }
    let mut collection = state.lock().unwrap();
    let before = collection.records.len();
    collection.records.retain(|r| r["id"] != id.as_str());
    if collection.records.len() == before {
        return StatusCode::NOT_FOUND.into_response();
    }
    StatusCode::NO_CONTENT.into_response()
}
