//! Response shaping helpers.

use axum::Json;
use serde::Serialize;

/// A list item annotated with its 1-based position in the response. Not stored.
#[derive(Serialize)]
pub struct Numbered<T> {
    pub no: usize,
    #[serde(flatten)]
    pub item: T,
}

/// Number items in enumeration order, starting at 1.
pub fn numbered<T>(items: impl IntoIterator<Item = T>) -> Vec<Numbered<T>> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| Numbered { no: i + 1, item })
        .collect()
}

pub fn message(text: &str) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": text }))
}
