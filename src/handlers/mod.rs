//! HTTP handlers, one module per resource family.

pub mod book;
pub mod curriculum;
pub mod lookup;
pub mod people;
pub mod study_time;
pub mod subject;

use crate::error::AppError;

/// Generated numeric ids arrive as path segments.
fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid id: {}", id_str)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert!(matches!(parse_id("abc"), Err(AppError::BadRequest(_))));
    }
}
