//! Typed records, their create requests and their patch values.

mod book;
mod curriculum;
mod lookup;
mod people;
mod subject;

pub use book::*;
pub use curriculum::*;
pub use lookup::*;
pub use people::*;
pub use subject::*;

use crate::config::schema::TableDef;
use crate::error::AppError;
use crate::sql::SqlValue;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A persisted record. Column order of `values()` follows `table().columns`.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + Unpin + 'static {
    type Key: Clone + fmt::Display + Into<SqlValue> + Send + Sync + 'static;
    /// Partial update accepted by PUT; `Infallible` for read/create-only families.
    type Patch: Send + 'static;

    /// Singular name used in error messages.
    const NAME: &'static str;

    fn table() -> &'static TableDef;

    fn key(&self) -> Self::Key;

    fn values(&self) -> Vec<SqlValue>;

    fn apply(&mut self, patch: Self::Patch);

    /// Row-level invariants checked before every write.
    fn check(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// A patch field: either absent from the request body or present with a value.
/// Use `Field<Option<T>>` for nullable columns so an explicit `null` clears them;
/// NOT NULL columns use `deserialize_with = "null_as_absent"` so `null` leaves them untouched.
#[derive(Clone, Debug, PartialEq)]
pub enum Field<T> {
    Absent,
    Present(T),
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Absent
    }
}

impl<T> Field<T> {
    pub fn is_present(&self) -> bool {
        matches!(self, Field::Present(_))
    }

    /// Overwrite `target` when present.
    pub fn merge_into(self, target: &mut T) {
        if let Field::Present(v) = self {
            *target = v;
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Field::Present)
    }
}

/// `null` on a NOT NULL column means "leave unchanged".
pub fn null_as_absent<'de, D, T>(deserializer: D) -> Result<Field<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.map_or(Field::Absent, Field::Present))
}
