use super::Entity;
use crate::config::schema::{TableDef, BOOKS};
use crate::sql::SqlValue;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;

/// Metadata of an uploaded curriculum document; the bytes live in the books directory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Book {
    pub id: i64,
    pub original_name: String,
    pub stored_name: String,
    pub path: String,
    pub public_path: String,
    pub mime_type: String,
    pub size: i64,
    /// SHA-256, lowercase hex.
    pub checksum: String,
    pub note: Option<String>,
}

impl Entity for Book {
    type Key = i64;
    type Patch = Infallible;
    const NAME: &'static str = "book";

    fn table() -> &'static TableDef {
        &BOOKS
    }

    fn key(&self) -> i64 {
        self.id
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.original_name.clone().into(),
            self.stored_name.clone().into(),
            self.path.clone().into(),
            self.public_path.clone().into(),
            self.mime_type.clone().into(),
            self.size.into(),
            self.checksum.clone().into(),
            self.note.clone().into(),
        ]
    }

    fn apply(&mut self, patch: Infallible) {
        match patch {}
    }
}
