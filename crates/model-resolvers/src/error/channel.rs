//! Validation failures reach the caller one of two ways: as an error, or as the
//! `error` field of the payload when the caller selected it.

use serde::Serialize;
use serde_json::Value;

use crate::{error::ResolverError, names::OUTPUT_FIELD_ERROR, projection::Projection};

pub(crate) fn reject<E, P>(
    failure: E,
    projection: &Projection,
    into_payload: impl FnOnce(E) -> P,
) -> Result<Value, ResolverError>
where
    E: Into<ResolverError>,
    P: Serialize,
{
    if projection.contains(OUTPUT_FIELD_ERROR) {
        return to_value(into_payload(failure));
    }

    Err(failure.into())
}

pub(crate) fn to_value(payload: impl Serialize) -> Result<Value, ResolverError> {
    Ok(serde_json::to_value(payload)?)
}
