//! Request extractors that reject with `AppError` instead of axum's defaults.

pub mod json;
pub use json::ApiJson;
