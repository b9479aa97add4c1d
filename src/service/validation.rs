//! Request validation for create bodies and for rows about to be written.

use crate::error::AppError;

pub struct RequestValidator;

impl RequestValidator {
    /// Present, non-null and not blank.
    pub fn required_text(field: &str, value: Option<String>) -> Result<String, AppError> {
        match value {
            Some(s) if !s.trim().is_empty() => Ok(s),
            _ => Err(AppError::BadRequest(format!("{} is required", field))),
        }
    }

    pub fn required<T>(field: &str, value: Option<T>) -> Result<T, AppError> {
        value.ok_or_else(|| AppError::BadRequest(format!("{} is required", field)))
    }

    /// Present and greater than zero; zero counts as missing.
    pub fn required_positive(field: &str, value: Option<i32>) -> Result<i32, AppError> {
        match value {
            None | Some(0) => Err(AppError::BadRequest(format!("{} is required", field))),
            Some(n) if n < 0 => Err(AppError::BadRequest(format!("{} must be positive", field))),
            Some(n) => Ok(n),
        }
    }

    pub fn required_email(field: &str, value: Option<String>) -> Result<String, AppError> {
        let s = Self::required_text(field, value)?;
        Self::email(field, &s)?;
        Ok(s)
    }

    /// Not blank. Used on stored rows, where the value is always present.
    pub fn non_blank(field: &str, value: &str) -> Result<(), AppError> {
        if value.trim().is_empty() {
            return Err(AppError::BadRequest(format!("{} must not be empty", field)));
        }
        Ok(())
    }

    pub fn positive(field: &str, value: i32) -> Result<(), AppError> {
        if value <= 0 {
            return Err(AppError::BadRequest(format!("{} must be positive", field)));
        }
        Ok(())
    }

    pub fn email(field: &str, value: &str) -> Result<(), AppError> {
        if !value.contains('@') || value.len() < 3 {
            return Err(AppError::BadRequest(format!("{} must be a valid email", field)));
        }
        Ok(())
    }

    /// Blank strings become `None`.
    pub fn optional_text(value: Option<String>) -> Option<String> {
        value.filter(|s| !s.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text() {
        assert!(RequestValidator::required_text("subject_id", None).is_err());
        assert!(RequestValidator::required_text("subject_id", Some("  ".into())).is_err());
        assert_eq!(RequestValidator::required_text("subject_id", Some("CS101".into())).unwrap(), "CS101");
    }

    #[test]
    fn zero_credit_counts_as_missing() {
        let err = RequestValidator::required_positive("credit", Some(0)).unwrap_err();
        assert_eq!(err.to_string(), "credit is required");
        assert!(RequestValidator::required_positive("credit", Some(-1)).is_err());
        assert_eq!(RequestValidator::required_positive("credit", Some(3)).unwrap(), 3);
    }

    #[test]
    fn email() {
        assert!(RequestValidator::required_email("email", Some("nope".into())).is_err());
        assert!(RequestValidator::required_email("email", Some("a@b.ac.th".into())).is_ok());
    }

    #[test]
    fn stored_values() {
        assert!(RequestValidator::non_blank("subject_name", "").is_err());
        assert!(RequestValidator::non_blank("subject_name", "Intro").is_ok());
        assert_eq!(
            RequestValidator::positive("credit", -5).unwrap_err().to_string(),
            "credit must be positive"
        );
        assert!(RequestValidator::positive("credit", 0).is_err());
        assert!(RequestValidator::email("email", "nope").is_err());
    }

    #[test]
    fn optional() {
        assert_eq!(RequestValidator::optional_text(Some("".into())), None);
        assert_eq!(RequestValidator::optional_text(Some("x".into())), Some("x".into()));
    }
}
