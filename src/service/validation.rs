//! Required-field checks on raw request bodies.

use crate::error::AppError;
use serde_json::{Map, Value};

pub struct RequestValidator;

impl RequestValidator {
    /// Every field in `required` must be present; string values must also be non-blank.
    /// Other value types (numbers, booleans, null) only need to be present.
    /// All fields are checked and every violation is reported, in `required` order.
    pub fn missing_fields(body: &Map<String, Value>, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|field| match body.get(**field) {
                None => true,
                Some(Value::String(s)) => s.trim().is_empty(),
                Some(_) => false,
            })
            .map(|field| format!("No {} specified.", field))
            .collect()
    }

    pub fn validate(body: &Map<String, Value>, required: &[&str]) -> Result<(), AppError> {
        let errors = Self::missing_fields(body, required);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors))
        }
    }
}
