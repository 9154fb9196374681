use std::{fmt, sync::Arc};

use runtime::JsonMap;
use serde_json::Value;

/// The value type of a schema field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    String,
    Int,
    Float,
    Boolean,
    Id,
    /// An RFC 3339 timestamp, or milliseconds since the epoch.
    Date,
    Json,
    List(Box<FieldType>),
}

impl FieldType {
    pub fn list(inner: FieldType) -> Self {
        FieldType::List(Box::new(inner))
    }

    /// The name of the underlying scalar, ignoring list wrapping.
    pub fn scalar_name(&self) -> &'static str {
        match self {
            FieldType::String => "String",
            FieldType::Int => "Int",
            FieldType::Float => "Float",
            FieldType::Boolean => "Boolean",
            FieldType::Id => crate::names::ID_SCALAR,
            FieldType::Date => "Date",
            FieldType::Json => "JSON",
            FieldType::List(inner) => inner.scalar_name(),
        }
    }

    /// The type reference as it appears in SDL, e.g. `[String]`.
    pub fn type_ref(&self) -> String {
        match self {
            FieldType::List(inner) => format!("[{}]", inner.type_ref()),
            other => other.scalar_name().to_string(),
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, FieldType::List(_))
    }

    /// Whether the field can be compared with `gt`, `lt` and friends, or sorted on.
    pub(crate) fn is_ordered(&self) -> bool {
        match self {
            FieldType::Json | FieldType::Boolean => false,
            FieldType::List(inner) => inner.is_ordered(),
            _ => true,
        }
    }

    /// The name used in cast failures.
    pub(crate) fn cast_name(&self) -> String {
        match self {
            FieldType::String => "string".to_string(),
            FieldType::Int | FieldType::Float => "Number".to_string(),
            FieldType::Boolean => "Boolean".to_string(),
            FieldType::Id => "ObjectId".to_string(),
            FieldType::Date => "date".to_string(),
            FieldType::Json => "Mixed".to_string(),
            FieldType::List(inner) => format!("[{}]", inner.cast_name()),
        }
    }

    pub(crate) fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) | (FieldType::Json, _) => true,
            (FieldType::String, Value::String(_)) => true,
            (FieldType::Id, Value::String(id)) => !id.is_empty(),
            (FieldType::Id, Value::Number(_)) => true,
            (FieldType::Int, Value::Number(number)) => {
                number.is_i64() || number.is_u64() || number.as_f64().is_some_and(|n| n.fract() == 0.0)
            }
            (FieldType::Float, Value::Number(_)) => true,
            (FieldType::Boolean, Value::Bool(_)) => true,
            (FieldType::Date, Value::String(date)) => chrono::DateTime::parse_from_rfc3339(date).is_ok(),
            (FieldType::Date, Value::Number(number)) => number.is_i64(),
            (FieldType::List(inner), Value::Array(items)) => items.iter().all(|item| inner.accepts(item)),
            _ => false,
        }
    }
}

pub type RequiredPredicate = Arc<dyn Fn(&JsonMap) -> bool + Send + Sync>;

/// Whether a field must carry a value.
#[derive(Clone)]
pub enum Required {
    Static(bool),
    /// Evaluated against the whole document at validation time.
    Computed(RequiredPredicate),
}

impl Required {
    pub fn computed(predicate: impl Fn(&JsonMap) -> bool + Send + Sync + 'static) -> Self {
        Required::Computed(Arc::new(predicate))
    }

    /// True only for fields that are always required.
    pub fn is_static(&self) -> bool {
        matches!(self, Required::Static(true))
    }

    pub fn evaluate(&self, document: &JsonMap) -> bool {
        match self {
            Required::Static(required) => *required,
            Required::Computed(predicate) => predicate(document),
        }
    }
}

impl Default for Required {
    fn default() -> Self {
        Required::Static(false)
    }
}

impl fmt::Debug for Required {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Required::Static(required) => f.debug_tuple("Static").field(required).finish(),
            Required::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

pub type ConstraintCheck = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

#[derive(Clone)]
pub enum FieldConstraint {
    Min(f64),
    Max(f64),
    MinLength(usize),
    MaxLength(usize),
    Enum(Vec<String>),
    /// A user check, failing with `message` when it returns false.
    Custom { message: String, check: ConstraintCheck },
}

impl FieldConstraint {
    pub fn custom(message: impl Into<String>, check: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        FieldConstraint::Custom {
            message: message.into(),
            check: Arc::new(check),
        }
    }

    /// Returns the failure message, if the value breaks the constraint.
    pub(crate) fn check(&self, path: &str, value: &Value) -> Option<String> {
        match self {
            FieldConstraint::Min(min) => value.as_f64().filter(|number| number < min).map(|number| {
                format!("Path `{path}` ({number}) is less than minimum allowed value ({min}).")
            }),
            FieldConstraint::Max(max) => value.as_f64().filter(|number| number > max).map(|number| {
                format!("Path `{path}` ({number}) is more than maximum allowed value ({max}).")
            }),
            FieldConstraint::MinLength(min) => value
                .as_str()
                .filter(|text| text.chars().count() < *min)
                .map(|text| {
                    format!("Path `{path}` (`{text}`) is shorter than the minimum allowed length ({min}).")
                }),
            FieldConstraint::MaxLength(max) => value
                .as_str()
                .filter(|text| text.chars().count() > *max)
                .map(|text| {
                    format!("Path `{path}` (`{text}`) is longer than the maximum allowed length ({max}).")
                }),
            FieldConstraint::Enum(allowed) => value
                .as_str()
                .filter(|text| !allowed.iter().any(|allowed| allowed == text))
                .map(|text| format!("`{text}` is not a valid enum value for path `{path}`.")),
            FieldConstraint::Custom { message, check } => (!check(value)).then(|| message.clone()),
        }
    }
}

impl fmt::Debug for FieldConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldConstraint::Min(min) => f.debug_tuple("Min").field(min).finish(),
            FieldConstraint::Max(max) => f.debug_tuple("Max").field(max).finish(),
            FieldConstraint::MinLength(min) => f.debug_tuple("MinLength").field(min).finish(),
            FieldConstraint::MaxLength(max) => f.debug_tuple("MaxLength").field(max).finish(),
            FieldConstraint::Enum(allowed) => f.debug_tuple("Enum").field(allowed).finish(),
            FieldConstraint::Custom { message, .. } => f.debug_struct("Custom").field("message", message).finish(),
        }
    }
}

/// One field of an entity. `name` is the storage name, `alias` the optional external one.
#[derive(Debug, Clone)]
pub struct FieldDefinition {
    pub name: String,
    pub ty: FieldType,
    pub required: Required,
    pub default_value: Option<Value>,
    pub alias: Option<String>,
    pub description: Option<String>,
    pub constraints: Vec<FieldConstraint>,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        FieldDefinition {
            name: name.into(),
            ty,
            required: Required::default(),
            default_value: None,
            alias: None,
            description: None,
            constraints: Vec::new(),
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = Required::Static(true);
        self
    }

    #[must_use]
    pub fn required_if(mut self, predicate: impl Fn(&JsonMap) -> bool + Send + Sync + 'static) -> Self {
        self.required = Required::computed(predicate);
        self
    }

    #[must_use]
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_constraint(mut self, constraint: FieldConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// The name callers use for this field.
    pub fn external_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}
