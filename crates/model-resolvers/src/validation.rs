//! Document validation ahead of any write.
//!
//! Validation never stops at the first problem: every field is checked and every
//! failure reported, and a batch reports on every document in input order.

use runtime::JsonMap;
use serde::ser::SerializeStruct;
use serde_json::Value;

use crate::{names::VALIDATION_ERROR_TYPE, schema::EntitySchema};

/// One failing path.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ValidatorError {
    pub path: String,
    pub message: String,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub message: String,
    pub errors: Vec<ValidatorError>,
}

impl ValidationError {
    /// Summarizes the failures as `{Model} validation failed: path: message, ...`.
    pub fn new(model: &str, errors: Vec<ValidatorError>) -> Self {
        let details = errors
            .iter()
            .map(|error| format!("{}: {}", error.path, error.message))
            .collect::<Vec<_>>()
            .join(", ");

        ValidationError {
            message: format!("{model} validation failed: {details}"),
            errors,
        }
    }
}

impl serde::Serialize for ValidationError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct(VALIDATION_ERROR_TYPE, 3)?;
        state.serialize_field("name", VALIDATION_ERROR_TYPE)?;
        state.serialize_field("message", &self.message)?;
        state.serialize_field("errors", &self.errors)?;
        state.end()
    }
}

/// Failures of a batch. `errors` has one slot per document, `None` for valid ones.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ManyValidationError {
    pub message: String,
    pub errors: Vec<Option<ValidationError>>,
}

impl ManyValidationError {
    pub fn failed(&self) -> usize {
        self.errors.iter().filter(|error| error.is_some()).count()
    }

    #[must_use]
    pub fn with_message(self, message: impl Into<String>) -> Self {
        ManyValidationError {
            message: message.into(),
            ..self
        }
    }
}

pub fn validate_document(schema: &EntitySchema, document: &JsonMap) -> Result<(), ValidationError> {
    let mut errors = Vec::new();

    for field in schema.fields() {
        let path = field.name.as_str();

        let Some(value) = document.get(path).filter(|value| !is_missing(value)) else {
            if field.required.evaluate(document) {
                errors.push(ValidatorError {
                    path: path.to_string(),
                    message: format!("Path `{path}` is required."),
                    value: document.get(path).cloned().unwrap_or(Value::Null),
                });
            }

            continue;
        };

        if !field.ty.accepts(value) {
            errors.push(ValidatorError {
                path: path.to_string(),
                message: format!(
                    "Cast to {} failed for value \"{}\" (type {}) at path \"{path}\"",
                    field.ty.cast_name(),
                    display_value(value),
                    value_type(value)
                ),
                value: value.clone(),
            });

            continue;
        }

        if let Some(message) = field
            .constraints
            .iter()
            .find_map(|constraint| constraint.check(path, value))
        {
            errors.push(ValidatorError {
                path: path.to_string(),
                message,
                value: value.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new(schema.name(), errors))
    }
}

pub fn validate_many(schema: &EntitySchema, documents: &[JsonMap]) -> Result<(), ManyValidationError> {
    let errors: Vec<Option<ValidationError>> = documents
        .iter()
        .map(|document| validate_document(schema, document).err())
        .collect();

    let failed = errors.iter().filter(|error| error.is_some()).count();

    if failed == 0 {
        return Ok(());
    }

    Err(ManyValidationError {
        message: format!(
            "{} validation failed for {failed} of {} documents",
            schema.name(),
            documents.len()
        ),
        errors,
    })
}

fn is_missing(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        _ => false,
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn value_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "Array",
        Value::Object(_) => "Object",
    }
}
