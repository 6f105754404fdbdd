// validation/mod.rs - Request body schemas for post mutations
//
// Each schema exposes `safe_parse`: serde decodes the raw JSON body into the
// typed struct, then the `validator` rules run on it. Decode failures are
// reported per field. Unknown fields are ignored, so a client-supplied `authorId`
// never reaches the handlers.

use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use std::collections::HashMap;
use validator::Validate;

pub type FieldErrors = HashMap<String, String>;

/// Outcome of checking a request body against a schema
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult<T> {
    Accepted(T),
    Rejected(FieldErrors),
}

impl<T> ValidationResult<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, ValidationResult::Accepted(_))
    }
}

/// Body of `POST /`
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct CreatePostInput {
    pub title: String,
    pub content: String,
}

/// Body of `PUT /`
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct UpdatePostInput {
    #[validate(length(min = 1, message = "id must not be empty"))]
    pub id: String,
    pub title: String,
    pub content: String,
}

pub trait SafeParse: DeserializeOwned + Validate + Sized {
    /// Fields the schema declares as strings, used to name the culprit of a decode failure
    const STRING_FIELDS: &'static [&'static str];

    fn safe_parse(body: &Value) -> ValidationResult<Self> {
        let parsed: Self = match serde_json::from_value(body.clone()) {
            Ok(parsed) => parsed,
            Err(e) => return ValidationResult::Rejected(Self::explain_rejection(body, &e)),
        };

        if let Err(e) = parsed.validate() {
            let mut errors = FieldErrors::new();
            for (field, field_errors) in e.field_errors() {
                let message = field_errors
                    .first()
                    .map(|err| {
                        err.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| err.code.to_string())
                    })
                    .unwrap_or_else(|| "Invalid".to_string());
                errors.insert(field.to_string(), message);
            }
            return ValidationResult::Rejected(errors);
        }

        ValidationResult::Accepted(parsed)
    }

    /// Attribute a deserialization failure to the fields that caused it. serde reports
    /// only the first problem and does not name the field on type mismatches, so the
    /// body is inspected against `STRING_FIELDS`.
    fn explain_rejection(body: &Value, error: &serde_json::Error) -> FieldErrors {
        let mut errors = FieldErrors::new();

        match body.as_object() {
            None => {
                errors.insert("body".to_string(), "Expected object".to_string());
            }
            Some(object) => {
                for field in Self::STRING_FIELDS {
                    match object.get(*field) {
                        Some(Value::String(_)) => {}
                        Some(_) => {
                            errors.insert(field.to_string(), "Expected string".to_string());
                        }
                        None => {
                            errors.insert(field.to_string(), "Required".to_string());
                        }
                    }
                }
            }
        }

        if errors.is_empty() {
            errors.insert("body".to_string(), error.to_string());
        }
        errors
    }
}

impl SafeParse for CreatePostInput {
    const STRING_FIELDS: &'static [&'static str] = &["title", "content"];
}

impl SafeParse for UpdatePostInput {
    const STRING_FIELDS: &'static [&'static str] = &["id", "title", "content"];
}
