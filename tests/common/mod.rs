//! In-memory store and request helpers shared by the router tests.
#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use reg_system::model::Entity;
use reg_system::sql::SqlValue;
use reg_system::{app, AppError, AppState, BookStorage, HealthCheck, Repository};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Rows kept as JSON per table name. Reads come back ordered by primary key, as `PgStore` returns them.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<&'static str, Vec<Value>>>,
    next_id: Mutex<HashMap<&'static str, i64>>,
}

fn decode<E: Entity>(row: &Value) -> Result<E, AppError> {
    serde_json::from_value(row.clone()).map_err(|e| AppError::BadRequest(e.to_string()))
}

fn encode<E: Entity>(row: &E) -> Result<Value, AppError> {
    serde_json::to_value(row).map_err(|e| AppError::BadRequest(e.to_string()))
}

fn by_primary_key<E: Entity>(rows: &mut [&Value]) {
    let pk = E::table().primary_key;
    rows.sort_by(|a, b| match (&a[pk], &b[pk]) {
        (Value::Number(x), Value::Number(y)) => x.as_i64().cmp(&y.as_i64()),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => Ordering::Equal,
    });
}

fn key_json<E: Entity>(key: &E::Key) -> Value {
    let key: SqlValue = key.clone().into();
    key.to_json()
}

impl MemoryStore {
    pub fn row_count(&self, table: &str) -> usize {
        self.tables
            .lock()
            .unwrap()
            .get(table)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for MemoryStore {
    async fn create(&self, row: E) -> Result<E, AppError> {
        row.check()?;
        let table = E::table();
        let pk = table.primary_key;
        let mut value = encode(&row)?;
        if table.has_generated_key() {
            let mut ids = self.next_id.lock().unwrap();
            let id = ids.entry(table.name).or_insert(0);
            *id += 1;
            value[pk] = Value::from(*id);
        }
        let mut tables = self.tables.lock().unwrap();
        let rows = tables.entry(table.name).or_default();
        if rows.iter().any(|r| r[pk] == value[pk]) {
            return Err(AppError::BadRequest(format!("duplicate key {} in {}", value[pk], table.name)));
        }
        rows.push(value.clone());
        decode(&value)
    }

    async fn find(&self, key: &E::Key) -> Result<Option<E>, AppError> {
        let key = key_json::<E>(key);
        let tables = self.tables.lock().unwrap();
        let pk = E::table().primary_key;
        match tables.get(E::table().name).and_then(|rows| rows.iter().find(|r| r[pk] == key)) {
            Some(row) => Ok(Some(decode(row)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<E>, AppError> {
        let tables = self.tables.lock().unwrap();
        let mut rows: Vec<&Value> = tables.get(E::table().name).map(|r| r.iter().collect()).unwrap_or_default();
        by_primary_key::<E>(&mut rows);
        rows.into_iter().map(decode::<E>).collect()
    }

    async fn list_by(&self, column: &'static str, value: SqlValue) -> Result<Vec<E>, AppError> {
        let wanted = value.to_json();
        let tables = self.tables.lock().unwrap();
        let mut rows: Vec<&Value> = tables
            .get(E::table().name)
            .map(|r| r.iter().filter(|row| row[column] == wanted).collect())
            .unwrap_or_default();
        by_primary_key::<E>(&mut rows);
        rows.into_iter().map(decode::<E>).collect()
    }

    async fn update(&self, key: &E::Key, patch: E::Patch) -> Result<Option<E>, AppError> {
        let key = key_json::<E>(key);
        let table = E::table();
        let mut tables = self.tables.lock().unwrap();
        let Some(slot) = tables
            .get_mut(table.name)
            .and_then(|rows| rows.iter_mut().find(|r| r[table.primary_key] == key))
        else {
            return Ok(None);
        };
        let mut row: E = decode(slot)?;
        row.apply(patch);
        row.check()?;
        *slot = encode(&row)?;
        Ok(Some(row))
    }

    async fn delete(&self, key: &E::Key) -> Result<u64, AppError> {
        let key = key_json::<E>(key);
        let table = E::table();
        let mut tables = self.tables.lock().unwrap();
        for (child, column) in table.cascade_children() {
            if let Some(rows) = tables.get_mut(child.name) {
                rows.retain(|r| r[column] != key);
            }
        }
        let Some(rows) = tables.get_mut(table.name) else {
            return Ok(0);
        };
        let before = rows.len();
        rows.retain(|r| r[table.primary_key] != key);
        Ok((before - rows.len()) as u64)
    }
}

#[async_trait]
impl HealthCheck for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

pub struct TestApp {
    pub store: Arc<MemoryStore>,
    pub state: AppState,
    pub router: Router,
    pub books_dir: tempfile::TempDir,
}

pub fn test_app() -> TestApp {
    test_app_with_upload_limit(1024 * 1024)
}

pub fn test_app_with_upload_limit(max_upload_bytes: usize) -> TestApp {
    let books_dir = tempfile::tempdir().unwrap();
    let store = Arc::new(MemoryStore::default());
    let state = AppState::new(store.clone(), BookStorage::new(books_dir.path(), max_upload_bytes));
    let router = app(state.clone());
    TestApp {
        store,
        state,
        router,
        books_dir,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
        };
        (status, body)
    }

    pub async fn json(&self, method: Method, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::builder().method(Method::DELETE).uri(uri).body(Body::empty()).unwrap())
            .await
    }
}

pub fn subject_body(id: &str, credit: i32) -> Value {
    serde_json::json!({
        "subject_id": id,
        "subject_name": format!("Subject {}", id),
        "credit": credit,
        "major_id": "CPE",
    })
}
