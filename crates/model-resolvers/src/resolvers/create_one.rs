use std::sync::Arc;

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
    names::{MetaNames, INPUT_ARG_RECORD, RESOLVER_CREATE_ONE},
    params::ResolveParams,
    registry::MetaInputValue,
    resolver::{OperationKind, Resolver},
    resolvers::{payload::RecordPayload, Operation},
    validation,
};

pub(crate) struct CreateOne {
    pub(crate) ctx: Arc<ModelContext>,
}

pub(crate) fn build(ctx: &Arc<ModelContext>, opts: &ResolverOpts) -> Result<Resolver, ResolverError> {
    let prefix = MetaNames::prefix(RESOLVER_CREATE_ONE);

    let record = record::build(
        ctx,
        &opts.record,
        RecordDefaults {
            prefix: &prefix,
            is_required: true,
            all_fields_nullable: false,
        },
    )?;

    let record_type = if record.is_required {
        format!("{}!", record.type_name)
    } else {
        record.type_name
    };

    let payload_name = MetaNames::payload(&prefix, ctx.type_name());
    let payload = RecordPayload::register(ctx, &payload_name, "Created")?;

    Ok(Resolver {
        name: RESOLVER_CREATE_ONE.to_string(),
        kind: OperationKind::Mutation,
        description: Some(format!(
            "Create one {} document, applying defaults, the before-record-mutate hook and validation",
            ctx.type_name()
        )),
        args: argument_map([MetaInputValue::new(INPUT_ARG_RECORD, record_type)]),
        ty: payload_name,
        output_type: Some(payload),
        operation: Operation::CreateOne(CreateOne { ctx: Arc::clone(ctx) }),
    })
}

impl CreateOne {
    pub(crate) async fn execute(&self, params: ResolveParams) -> Result<Value, ResolverError> {
        let ctx = &self.ctx;

        let record = match params.arg(INPUT_ARG_RECORD) {
            Some(Value::Object(record)) if !record.is_empty() => record.clone(),
            _ => {
                return Err(ResolverError::argument(format!(
                    "{}.createOne resolver requires at least one value in args.record",
                    ctx.type_name()
                )))
            }
        };

        let mut document = document::new_document(&ctx.schema, record);

        if let Some(hook) = &params.before_record_mutate {
            document = hook.before_record_mutate(document, &params).await?;
        }

        if let Err(error) = validation::validate_document(&ctx.schema, &document) {
            tracing::warn!(model = ctx.type_name(), failures = error.errors.len(), "document failed validation");
            return channel::reject(error, &params.projection, RecordPayload::rejected);
        }

        let created = ctx.storage.insert_one(ctx.collection(), document).await?;

        channel::to_value(RecordPayload::saved(ctx, created))
    }
}
