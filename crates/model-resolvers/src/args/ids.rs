use serde_json::Value;

use crate::{
    error::ResolverError,
    names::{ID_SCALAR, INPUT_ARG_ID, INPUT_ARG_IDS},
    registry::{id_type, MetaInputValue},
};

pub(crate) fn ids_argument() -> MetaInputValue {
    MetaInputValue::new(INPUT_ARG_IDS, format!("[{ID_SCALAR}]!"))
}

pub(crate) fn id_argument() -> MetaInputValue {
    MetaInputValue::new(INPUT_ARG_ID, id_type(true))
}

/// The non-null ids of an `_ids` argument. A single id counts as a list of one.
pub(crate) fn parse_ids(value: Option<&Value>) -> Result<Vec<Value>, ResolverError> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(ids)) => Ok(ids.iter().filter(|id| !id.is_null()).cloned().collect()),
        Some(id @ (Value::String(_) | Value::Number(_))) => Ok(vec![id.clone()]),
        Some(other) => Err(ResolverError::argument(format!(
            "{INPUT_ARG_IDS} must be a list of ids, got {other}."
        ))),
    }
}
