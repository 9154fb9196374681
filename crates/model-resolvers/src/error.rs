pub(crate) mod channel;

use std::borrow::Cow;

use runtime::storage::StorageError;
use serde_json::Value;

use crate::validation::{ManyValidationError, ValidationError};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, strum::Display, strum::AsRefStr, strum::IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    BadUserInput,
    ValidationError,
    StorageError,
    HookError,
    InternalServerError,
}

#[derive(Debug, thiserror::Error)]
pub enum ResolverError {
    /// The call itself is malformed. Raised before anything else happens.
    #[error("{0}")]
    Argument(String),
    #[error("{}", .0.message)]
    Validation(ValidationError),
    #[error("{}", .0.message)]
    ManyValidation(ManyValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("{0}")]
    Hook(String),
    /// Building descriptors failed, e.g. options naming unknown fields.
    #[error("{0}")]
    Schema(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ResolverError {
    pub fn argument(message: impl Into<String>) -> Self {
        ResolverError::Argument(message.into())
    }

    pub fn hook(message: impl Into<String>) -> Self {
        ResolverError::Hook(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ResolverError::Argument(_) => ErrorCode::BadUserInput,
            ResolverError::Validation(_) | ResolverError::ManyValidation(_) => ErrorCode::ValidationError,
            ResolverError::Storage(_) => ErrorCode::StorageError,
            ResolverError::Hook(_) => ErrorCode::HookError,
            ResolverError::Schema(_) | ResolverError::Internal(_) => ErrorCode::InternalServerError,
        }
    }

    /// Structured details for the `extensions` entry of an error response.
    pub fn extensions(&self) -> Vec<(Cow<'static, str>, Value)> {
        let mut extensions = vec![("code".into(), Value::String(self.code().to_string()))];

        match self {
            ResolverError::Validation(error) => {
                extensions.push(("validationErrors".into(), serde_json::to_value(&error.errors).unwrap_or_default()));
            }
            ResolverError::ManyValidation(error) => {
                extensions.push(("validationErrors".into(), serde_json::to_value(&error.errors).unwrap_or_default()));
            }
            _ => {}
        }

        extensions
    }
}

impl From<ValidationError> for ResolverError {
    fn from(error: ValidationError) -> Self {
        ResolverError::Validation(error)
    }
}

impl From<ManyValidationError> for ResolverError {
    fn from(error: ManyValidationError) -> Self {
        ResolverError::ManyValidation(error)
    }
}

impl From<serde_json::Error> for ResolverError {
    fn from(error: serde_json::Error) -> Self {
        ResolverError::Internal(error.to_string())
    }
}
