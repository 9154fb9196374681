use runtime::query::Query;
use serde_json::Value;

use crate::{error::ResolverError, names::INPUT_ARG_SKIP, registry::MetaInputValue};

pub(crate) fn argument() -> MetaInputValue {
    MetaInputValue::new(INPUT_ARG_SKIP, "Int")
}

/// Non-positive values skip nothing.
pub(crate) fn apply(query: &mut Query, value: Option<&Value>) -> Result<(), ResolverError> {
    let skip = match value {
        None | Some(Value::Null) => return Ok(()),
        Some(value) => value
            .as_i64()
            .ok_or_else(|| ResolverError::argument(format!("Int cannot represent non-integer value: {value}")))?,
    };

    if let Some(skip) = u64::try_from(skip).ok().filter(|skip| *skip > 0) {
        query.set_skip(skip);
    }

    Ok(())
}
