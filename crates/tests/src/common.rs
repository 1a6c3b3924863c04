use axum::{
    extract::{Multipart, Path, State},
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use client::ApiClient;
use serde_json::{json, Value};
use shared_types::{ApiConfig, ReferenceData};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

/// File part of a captured multipart request.
#[derive(Debug, Clone, PartialEq)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub content_type: Option<String>,
    pub size: usize,
}

/// One write request as the backend saw it.
#[derive(Debug, Clone)]
pub struct Captured {
    pub method: Method,
    pub path: String,
    pub fields: BTreeMap<String, String>,
    pub files: Vec<FilePart>,
}

/// In-memory stand-in for the content API.
#[derive(Debug, Default)]
pub struct Backend {
    /// Response bodies of `GET /api/{collection}`.
    pub collections: HashMap<String, Value>,
    /// Collections that answer 500.
    pub failing: Vec<String>,
    /// Records keyed by `"{collection}/{id}"`.
    pub records: HashMap<String, Value>,
    /// Stored images keyed by `"{collection}/{id}"`.
    pub images: HashMap<String, Vec<u8>>,
    /// Preset files served under `/presets/{file}`.
    pub presets: HashMap<String, Vec<u8>>,
    /// Pause before answering a preset request.
    pub preset_delay: Option<Duration>,
    /// Status and body returned for every write instead of success.
    pub reject: Option<(StatusCode, Value)>,
    /// Pause before answering a write.
    pub write_delay: Option<Duration>,
    /// Role handed out by `POST /api/auth/login`; `editor` when unset.
    pub login_role: Option<String>,
    /// User behind `GET /api/auth/me`.
    pub session: Option<Value>,
    pub captured: Vec<Captured>,
}

type Shared = Arc<Mutex<Backend>>;

pub struct MockServer {
    pub root_url: String,
    state: Shared,
}

impl MockServer {
    pub async fn start(backend: Backend) -> Self {
        let state: Shared = Arc::new(Mutex::new(backend));
        let app = Router::new()
            .route("/api/auth/login", post(login))
            .route("/api/auth/me", get(me))
            .route("/api/auth/logout", post(logout))
            .route("/api/{collection}", get(list).post(create))
            .route(
                "/api/{collection}/{id}",
                get(record).put(update).patch(update).delete(remove),
            )
            .route("/api/{collection}/image/{id}", get(image))
            .route("/presets/{file}", get(preset))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock server");
        let addr = listener.local_addr().expect("Mock server has no address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock server stopped");
        });

        Self {
            root_url: format!("http://{addr}"),
            state,
        }
    }

    pub fn api(&self) -> ApiClient {
        ApiClient::new(&ApiConfig {
            base_url: format!("{}/api", self.root_url),
            timeout_secs: 5,
        })
        .expect("Failed to build API client")
    }

    pub fn captured(&self) -> Vec<Captured> {
        self.state.lock().expect("backend lock").captured.clone()
    }

    pub fn with_backend(&self, f: impl FnOnce(&mut Backend)) {
        f(&mut self.state.lock().expect("backend lock"));
    }
}

/// API client for an address nothing listens on.
pub async fn unreachable_api() -> ApiClient {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    ApiClient::new(&ApiConfig {
        base_url: format!("http://{addr}/api"),
        timeout_secs: 2,
    })
    .expect("Failed to build API client")
}

/// Backend seeded with the five lookup lists, in the envelope shapes the
/// real API mixes.
pub fn seeded_backend() -> Backend {
    let mut backend = Backend::default();
    backend.collections.insert(
        "topics".into(),
        json!([{"_id": "t1", "topic": "Fiqh"}, {"_id": "t2", "topic": "Seerah"}]),
    );
    backend
        .collections
        .insert("languages".into(), json!([{"_id": "l1", "language": "English"}]));
    backend.collections.insert(
        "writers".into(),
        json!({"data": [
            {"_id": "w1", "name": "Mufti Ahmed", "designation": "Mufti"},
            {"_id": "w2", "name": "Dr. Sana"}
        ]}),
    );
    backend
        .collections
        .insert("translators".into(), json!([{"_id": "tr1", "name": "Bilal"}]));
    backend
        .collections
        .insert("tags".into(), json!({"tags": [{"_id": "g1", "tag": "Ramadan"}]}));
    backend
}

/// Reference lists matching [`seeded_backend`], for building forms.
pub async fn seeded_refs(api: &ApiClient) -> ReferenceData {
    let load = client::reference::load_reference_data(api).await;
    assert!(load.is_complete(), "seeded reference lists should all load");
    load.data
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"message": "Not found"}))).into_response()
}

async fn list(State(state): State<Shared>, Path(collection): Path<String>) -> Response {
    let backend = state.lock().expect("backend lock");
    if backend.failing.contains(&collection) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"message": "Database unavailable"})),
        )
            .into_response();
    }
    let body = backend
        .collections
        .get(&collection)
        .cloned()
        .unwrap_or_else(|| json!([]));
    Json(body).into_response()
}

async fn record(
    State(state): State<Shared>,
    Path((collection, id)): Path<(String, String)>,
) -> Response {
    let backend = state.lock().expect("backend lock");
    match backend.records.get(&format!("{collection}/{id}")) {
        Some(record) => Json(json!({"data": record})).into_response(),
        None => not_found(),
    }
}

async fn image(
    State(state): State<Shared>,
    Path((collection, id)): Path<(String, String)>,
) -> Response {
    let backend = state.lock().expect("backend lock");
    match backend.images.get(&format!("{collection}/{id}")) {
        Some(bytes) => ([(header::CONTENT_TYPE, "image/png")], bytes.clone()).into_response(),
        None => not_found(),
    }
}

async fn preset(State(state): State<Shared>, Path(file): Path<String>) -> Response {
    let (delay, found) = {
        let backend = state.lock().expect("backend lock");
        (backend.preset_delay, backend.presets.get(&file).cloned())
    };
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    match found {
        Some(bytes) => ([(header::CONTENT_TYPE, "image/jpeg")], bytes).into_response(),
        None => (StatusCode::NOT_FOUND, "missing").into_response(),
    }
}

async fn create(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    Path(collection): Path<String>,
    multipart: Multipart,
) -> Response {
    let (fields, files) = read_multipart(multipart).await;
    let id = format!("{collection}-new");
    let body = json!({"message": "Created", "data": {"_id": id}});
    write_response(&state, method, uri, fields, files, body).await
}

async fn update(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    Path((_collection, id)): Path<(String, String)>,
    multipart: Multipart,
) -> Response {
    let (fields, files) = read_multipart(multipart).await;
    let body = json!({"message": "Updated", "data": {"_id": id}});
    write_response(&state, method, uri, fields, files, body).await
}

async fn remove(State(state): State<Shared>, method: Method, uri: Uri) -> Response {
    let body = json!({"message": "Deleted"});
    write_response(&state, method, uri, BTreeMap::new(), Vec::new(), body).await
}

async fn write_response(
    state: &Shared,
    method: Method,
    uri: Uri,
    fields: BTreeMap<String, String>,
    files: Vec<FilePart>,
    success: Value,
) -> Response {
    let (delay, reject) = {
        let mut backend = state.lock().expect("backend lock");
        backend.captured.push(Captured {
            method,
            path: uri.path().to_string(),
            fields,
            files,
        });
        (backend.write_delay, backend.reject.clone())
    };
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    match reject {
        Some((status, body)) => (status, Json(body)).into_response(),
        None => Json(success).into_response(),
    }
}

async fn read_multipart(mut multipart: Multipart) -> (BTreeMap<String, String>, Vec<FilePart>) {
    let mut fields = BTreeMap::new();
    let mut files = Vec::new();
    while let Some(field) = multipart.next_field().await.expect("multipart field") {
        let name = field.name().unwrap_or_default().to_string();
        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.expect("file part");
                files.push(FilePart {
                    field: name,
                    file_name,
                    content_type,
                    size: bytes.len(),
                });
            }
            None => {
                let value = field.text().await.expect("text part");
                fields.insert(name, value);
            }
        }
    }
    (fields, files)
}

async fn login(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    if body["password"] != "secret" {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid email or password"})),
        )
            .into_response();
    }
    let role = state
        .lock()
        .expect("backend lock")
        .login_role
        .clone()
        .unwrap_or_else(|| "editor".to_string());
    Json(json!({"user": {
        "uid": "u1",
        "email": body["email"],
        "role": role,
        "fname": "Sana"
    }}))
    .into_response()
}

async fn me(State(state): State<Shared>) -> Response {
    match state.lock().expect("backend lock").session.clone() {
        Some(user) => Json(json!({"data": user})).into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Not signed in"})),
        )
            .into_response(),
    }
}

async fn logout() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "logout failed").into_response()
}
