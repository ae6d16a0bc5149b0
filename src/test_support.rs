//! Shared fixtures: an in-process stand-in for the backend API and some sample records.

use crate::{
    config::ApiConfig,
    data::{FieldValues, Persisted, RecordFields, RecordId, course::Course, student::Student},
    error::RosterResult,
    gateway::{ApiClient, SharedToken},
    session::TokenStore,
};
use async_trait::async_trait;
use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header::AUTHORIZATION},
    response::{IntoResponse, Response},
};
use percent_encoding::percent_decode_str;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Map, Value, json};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex as StdMutex},
    time::Duration,
};
use tokio::{net::TcpListener, sync::Mutex};

pub const GOOD_TOKEN: &str = "good-token";

#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: Option<Value>,
    pub bearer: Option<String>,
}

#[derive(Default)]
struct FakeStore {
    collections: HashMap<String, Vec<Value>>,
    requests: Vec<RecordedRequest>,
    next_failure: Option<StatusCode>,
    next_reply: Option<Value>,
}

type SharedFakeStore = Arc<Mutex<FakeStore>>;

pub struct FakeBackend {
    pub base: String,
    store: SharedFakeStore,
}

impl FakeBackend {
    pub async fn spawn() -> Self {
        let store = SharedFakeStore::default();
        let app = Router::new().fallback(handle).with_state(store.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("unable to bind fake backend");
        let addr = listener.local_addr().expect("fake backend has no address");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base: format!("http://{addr}"),
            store,
        }
    }

    pub fn api(&self) -> ApiClient {
        self.api_with_token(SharedToken::default())
    }

    pub fn api_with_token(&self, token: SharedToken) -> ApiClient {
        ApiClient::new(
            &ApiConfig {
                base_url: self.base.clone(),
                request_timeout: Duration::from_secs(5),
            },
            token,
        )
        .expect("unable to build api client")
    }

    pub async fn fail_next(&self, status: StatusCode) {
        self.store.lock().await.next_failure = Some(status);
    }

    pub async fn reply_next(&self, body: Value) {
        self.store.lock().await.next_reply = Some(body);
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.store.lock().await.requests.clone()
    }

    pub async fn last_request(&self) -> Option<RecordedRequest> {
        self.store.lock().await.requests.last().cloned()
    }

    pub async fn forget_requests(&self) {
        self.store.lock().await.requests.clear();
    }

    /// Inserts a record behind the console's back, returning its new id.
    pub async fn seed<T: RecordFields>(&self, fields: &T) -> RecordId {
        self.seed_as(&uuid::Uuid::new_v4().to_string(), fields).await
    }

    pub async fn seed_as<T: RecordFields>(&self, id: &str, fields: &T) -> RecordId {
        let mut record = serde_json::to_value(fields).expect("fields always serialise");
        record["_id"] = Value::String(id.to_string());
        self.store
            .lock()
            .await
            .collections
            .entry(T::KIND.segment().to_string())
            .or_default()
            .push(record);
        RecordId::new(id)
    }

    pub async fn delete_behind_the_scenes<T: RecordFields>(&self, id: &RecordId) {
        if let Some(records) = self
            .store
            .lock()
            .await
            .collections
            .get_mut(T::KIND.segment())
        {
            records.retain(|record| record["_id"] != id.as_str());
        }
    }
}

async fn handle(
    State(store): State<SharedFakeStore>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let mut store = store.lock().await;

    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string);
    let body = serde_json::from_slice::<Value>(&body).ok();
    store.requests.push(RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        body: body.clone(),
        bearer: bearer.clone(),
    });

    if let Some(status) = store.next_failure.take() {
        return (status, "forced failure").into_response();
    }
    if let Some(reply) = store.next_reply.take() {
        return Json(reply).into_response();
    }

    let decoded: Vec<String> = uri
        .path()
        .trim_matches('/')
        .split('/')
        .map(|segment| percent_decode_str(segment).decode_utf8_lossy().into_owned())
        .collect();
    let segments: Vec<&str> = decoded.iter().map(String::as_str).collect();
    match (method.as_str(), segments.as_slice()) {
        ("GET", ["users", "self"]) => {
            if bearer.as_deref() == Some(GOOD_TOKEN) {
                Json(json!({"_id": "u1", "name": "Admin", "email": "admin@example.com"}))
                    .into_response()
            } else {
                (StatusCode::UNAUTHORIZED, "no session").into_response()
            }
        }
        ("GET", ["api", kind]) => {
            let records = store.collections.get(*kind).cloned().unwrap_or_default();
            let mut wrapper = Map::new();
            wrapper.insert((*kind).to_string(), Value::Array(records));
            Json(Value::Object(wrapper)).into_response()
        }
        ("POST", ["api", kind]) => {
            let Some(mut record) = body.filter(Value::is_object) else {
                return (StatusCode::BAD_REQUEST, "expected an object").into_response();
            };
            record["_id"] = Value::String(uuid::Uuid::new_v4().to_string());
            store
                .collections
                .entry((*kind).to_string())
                .or_default()
                .push(record.clone());
            (StatusCode::CREATED, Json(record)).into_response()
        }
        ("PUT", ["api", kind, id]) => {
            let Some(mut replacement) = body.filter(Value::is_object) else {
                return (StatusCode::BAD_REQUEST, "expected an object").into_response();
            };
            let existing = store
                .collections
                .get_mut(*kind)
                .and_then(|records| records.iter_mut().find(|r| r["_id"] == *id));
            match existing {
                Some(existing) => {
                    replacement["_id"] = Value::String((*id).to_string());
                    *existing = replacement.clone();
                    Json(replacement).into_response()
                }
                None => (StatusCode::NOT_FOUND, "no such record").into_response(),
            }
        }
        ("DELETE", ["api", kind, id]) => {
            let Some(records) = store.collections.get_mut(*kind) else {
                return (StatusCode::NOT_FOUND, "no such record").into_response();
            };
            let before = records.len();
            records.retain(|r| r["_id"] != *id);
            if records.len() == before {
                (StatusCode::NOT_FOUND, "no such record").into_response()
            } else {
                StatusCode::NO_CONTENT.into_response()
            }
        }
        _ => (StatusCode::NOT_FOUND, "no route").into_response(),
    }
}

#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: StdMutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: &str) -> Self {
        Self {
            token: StdMutex::new(Some(token.to_string())),
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> RosterResult<Option<SecretString>> {
        Ok(self.raw().map(SecretString::from))
    }

    async fn save(&self, token: &SecretString) -> RosterResult<()> {
        *self.token.lock().unwrap() = Some(token.expose_secret().to_string());
        Ok(())
    }

    async fn clear(&self) -> RosterResult<()> {
        *self.token.lock().unwrap() = None;
        Ok(())
    }
}

pub fn sample_student(name: &str, student_id: &str) -> Student {
    Student {
        name: name.to_string(),
        student_id: student_id.to_string(),
        dob: jiff::civil::date(2000, 1, 1),
        address: "X".to_string(),
        phone_number: "555".to_string(),
        prefix: "Ms".to_string(),
        subject_type: "CS".to_string(),
        field_of_study: "CS".to_string(),
        field_of_work: "SWE".to_string(),
        class_room: "101".to_string(),
        year: "2024".to_string(),
    }
}

pub fn student_values(name: &str, student_id: &str) -> FieldValues {
    sample_student(name, student_id).to_values()
}

pub fn sample_course(name: &str, code: &str) -> Course {
    Course {
        name: name.to_string(),
        code: code.to_string(),
        credit: 3.0,
        hours: 45.0,
    }
}

pub fn persisted<T>(id: &str, fields: T) -> Persisted<T> {
    Persisted {
        id: RecordId::new(id),
        fields,
    }
}
