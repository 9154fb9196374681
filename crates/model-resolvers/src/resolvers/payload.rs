use std::sync::Arc;

use runtime::JsonMap;
use serde_json::Value;

use crate::{
    error::ResolverError,
    model::ModelContext,
    names::{
        ID_SCALAR, OUTPUT_FIELD_CREATE_COUNT, OUTPUT_FIELD_ERROR, OUTPUT_FIELD_RECORD, OUTPUT_FIELD_RECORDS,
        OUTPUT_FIELD_RECORD_ID, OUTPUT_FIELD_RECORD_IDS, VALIDATION_ERROR_TYPE,
    },
    registry::{kind_mismatch, MetaField, MetaType, ObjectType},
    validation::{ManyValidationError, ValidationError},
};

/// The payload of createOne and updateOne.
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RecordPayload {
    record_id: Option<Value>,
    record: Option<JsonMap>,
    error: Option<ValidationError>,
}

impl RecordPayload {
    pub(crate) fn saved(ctx: &ModelContext, record: JsonMap) -> Self {
        RecordPayload {
            record_id: ctx.schema.record_id(&record),
            record: Some(record),
            error: None,
        }
    }

    pub(crate) fn rejected(error: ValidationError) -> Self {
        RecordPayload {
            record_id: None,
            record: None,
            error: Some(error),
        }
    }

    /// Registers `{prefix}{Type}Payload`, e.g. `UpdateOneUserPayload`.
    pub(crate) fn register(ctx: &ModelContext, name: &str, verb: &str) -> Result<Arc<MetaType>, ResolverError> {
        let payload = ctx.registry.get_or_create(name, |_| {
            Ok::<_, ResolverError>(
                ObjectType::new(
                    name,
                    [
                        MetaField::new(OUTPUT_FIELD_RECORD_ID, ID_SCALAR).with_description(format!("{verb} document ID")),
                        MetaField::new(OUTPUT_FIELD_RECORD, ctx.type_name()).with_description(format!("{verb} document")),
                        MetaField::new(OUTPUT_FIELD_ERROR, VALIDATION_ERROR_TYPE)
                            .with_description("Error that may occur during operation."),
                    ],
                )
                .into(),
            )
        })?;

        ensure_object(payload)
    }
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateManyPayload {
    record_ids: Option<Vec<Value>>,
    records: Option<Vec<JsonMap>>,
    create_count: usize,
    error: Option<Vec<Option<ValidationError>>>,
}

impl CreateManyPayload {
    pub(crate) fn created(ctx: &ModelContext, records: Vec<JsonMap>) -> Self {
        CreateManyPayload {
            record_ids: Some(
                records
                    .iter()
                    .map(|record| ctx.schema.record_id(record).unwrap_or(Value::Null))
                    .collect(),
            ),
            create_count: records.len(),
            records: Some(records),
            error: None,
        }
    }

    /// `create_count` is the number of records attempted, not written.
    pub(crate) fn rejected(error: ManyValidationError, attempted: usize) -> Self {
        CreateManyPayload {
            record_ids: None,
            records: None,
            create_count: attempted,
            error: Some(error.errors),
        }
    }

    pub(crate) fn register(ctx: &ModelContext, name: &str) -> Result<Arc<MetaType>, ResolverError> {
        let payload = ctx.registry.get_or_create(name, |_| {
            Ok::<_, ResolverError>(
                ObjectType::new(
                    name,
                    [
                        MetaField::new(OUTPUT_FIELD_RECORD_IDS, format!("[{ID_SCALAR}!]"))
                            .with_description("Documents IDs"),
                        MetaField::new(OUTPUT_FIELD_RECORDS, format!("[{}!]", ctx.type_name()))
                            .with_description("Created documents"),
                        MetaField::new(OUTPUT_FIELD_CREATE_COUNT, "Int!")
                            .with_description("Number of created documents"),
                        MetaField::new(OUTPUT_FIELD_ERROR, format!("[{VALIDATION_ERROR_TYPE}]"))
                            .with_description("Errors that may occur, one per record."),
                    ],
                )
                .into(),
            )
        })?;

        ensure_object(payload)
    }
}

fn ensure_object(ty: Arc<MetaType>) -> Result<Arc<MetaType>, ResolverError> {
    match ty.as_object() {
        Some(_) => Ok(ty),
        None => Err(kind_mismatch(&ty, "object")),
    }
}
