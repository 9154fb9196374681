use std::sync::Arc;

use futures_util::future::try_join_all;
use runtime::JsonMap;
use serde_json::Value;

use crate::{
    args::{
        argument_map,
        record::{self, RecordDefaults},
    },
    config::ResolverOpts,
    document,
    error::{channel, ResolverError},
    model::ModelContext,
    names::{MetaNames, INPUT_ARG_RECORDS, RESOLVER_CREATE_MANY},
    params::ResolveParams,
    registry::MetaInputValue,
    resolver::{OperationKind, Resolver},
    resolvers::{payload::CreateManyPayload, Operation},
    validation,
};

pub(crate) struct CreateMany {
    pub(crate) ctx: Arc<ModelContext>,
}

pub(crate) fn build(ctx: &Arc<ModelContext>, opts: &ResolverOpts) -> Result<Resolver, ResolverError> {
    let prefix = MetaNames::prefix(RESOLVER_CREATE_MANY);

    let record = record::build(
        ctx,
        &opts.record,
        RecordDefaults {
            prefix: &prefix,
            is_required: true,
            all_fields_nullable: false,
        },
    )?;

    let records_type = if record.is_required {
        format!("[{}!]!", record.type_name)
    } else {
        format!("[{}!]", record.type_name)
    };

    let payload_name = MetaNames::payload(&prefix, ctx.type_name());
    let payload = CreateManyPayload::register(ctx, &payload_name)?;

    Ok(Resolver {
        name: RESOLVER_CREATE_MANY.to_string(),
        kind: OperationKind::Mutation,
        description: Some(format!(
            "Create many {} documents, applying defaults, the before-record-mutate hook and validation",
            ctx.type_name()
        )),
        args: argument_map([MetaInputValue::new(INPUT_ARG_RECORDS, records_type)]),
        ty: payload_name,
        output_type: Some(payload),
        operation: Operation::CreateMany(CreateMany { ctx: Arc::clone(ctx) }),
    })
}

impl CreateMany {
    pub(crate) async fn execute(&self, params: ResolveParams) -> Result<Value, ResolverError> {
        let ctx = &self.ctx;
        let records = self.records(&params)?;
        let attempted = records.len();

        let params = &params;
        let documents = try_join_all(records.into_iter().map(|record| async move {
            let document = document::new_document(&ctx.schema, record);

            match &params.before_record_mutate {
                Some(hook) => hook.before_record_mutate(document, params).await,
                None => Ok(document),
            }
        }))
        .await?;

        if let Err(error) = validation::validate_many(&ctx.schema, &documents) {
            tracing::warn!(
                model = ctx.type_name(),
                failed = error.failed(),
                attempted,
                "documents failed validation, nothing written"
            );

            let error = error.with_message("Cannot createMany some documents contain errors");
            return channel::reject(error, &params.projection, |error| {
                CreateManyPayload::rejected(error, attempted)
            });
        }

        let created = ctx.storage.insert_many(ctx.collection(), documents).await?;

        channel::to_value(CreateManyPayload::created(ctx, created))
    }

    fn records(&self, params: &ResolveParams) -> Result<Vec<JsonMap>, ResolverError> {
        let type_name = self.ctx.type_name();

        let records = match params.arg(INPUT_ARG_RECORDS) {
            Some(Value::Array(records)) if !records.is_empty() => records,
            _ => {
                return Err(ResolverError::argument(format!(
                    "{type_name}.createMany resolver requires args.records to be an Array and must contain at least one record"
                )))
            }
        };

        records
            .iter()
            .map(|record| match record {
                Value::Object(record) if !record.is_empty() => Ok(record.clone()),
                _ => Err(ResolverError::argument(format!(
                    "{type_name}.createMany resolver requires args.records to contain non-empty records, with at least one value"
                ))),
            })
            .collect()
    }
}
