use std::sync::Arc;

use serde_json::Value;

use crate::{
    args::{
        argument_map, filter,
        record::{self, RecordDefaults},
        skip, sort,
    },
    config::ResolverOpts,
    document,
    error::{channel, ResolverError},
    model::ModelContext,
    names::{MetaNames, INPUT_ARG_FILTER, INPUT_ARG_RECORD, RESOLVER_UPDATE_ONE},
    params::ResolveParams,
    projection::Projection,
    registry::MetaInputValue,
    resolver::{OperationKind, Resolver},
    resolvers::{find_one::FindOne, payload::RecordPayload, Operation},
    validation,
};

pub(crate) struct UpdateOne {
    pub(crate) ctx: Arc<ModelContext>,
    lookup: FindOne,
}

pub(crate) fn build(ctx: &Arc<ModelContext>, opts: &ResolverOpts) -> Result<Resolver, ResolverError> {
    let prefix = MetaNames::prefix(RESOLVER_UPDATE_ONE);

    let record = record::build(
        ctx,
        &opts.record,
        RecordDefaults {
            prefix: &prefix,
            is_required: true,
            all_fields_nullable: true,
        },
    )?;

    let record_type = if record.is_required {
        format!("{}!", record.type_name)
    } else {
        record.type_name
    };

    let filter_type = opts
        .filter
        .type_name
        .clone()
        .unwrap_or_else(|| MetaNames::filter_input(&prefix, ctx.type_name()));

    let sort_type = opts
        .sort
        .type_name
        .clone()
        .unwrap_or_else(|| MetaNames::sort_input(&prefix, ctx.type_name()));

    let (sort_argument, sort) = sort::build(ctx, &sort_type, &opts.sort)?;

    let payload_name = MetaNames::payload(&prefix, ctx.type_name());
    let payload = RecordPayload::register(ctx, &payload_name, "Updated")?;

    Ok(Resolver {
        name: RESOLVER_UPDATE_ONE.to_string(),
        kind: OperationKind::Mutation,
        description: Some(format!(
            "Update one {} document: finds it, applies the changes, validates and saves it",
            ctx.type_name()
        )),
        args: argument_map([
            MetaInputValue::new(INPUT_ARG_RECORD, record_type),
            filter::build(ctx, &filter_type, &opts.filter)?,
            sort_argument,
            skip::argument(),
        ]),
        ty: payload_name,
        output_type: Some(payload),
        operation: Operation::UpdateOne(UpdateOne {
            ctx: Arc::clone(ctx),
            lookup: FindOne {
                ctx: Arc::clone(ctx),
                sort,
            },
        }),
    })
}

impl UpdateOne {
    pub(crate) async fn execute(&self, mut params: ResolveParams) -> Result<Value, ResolverError> {
        let ctx = &self.ctx;

        if !matches!(params.arg(INPUT_ARG_FILTER), Some(Value::Object(filter)) if !filter.is_empty()) {
            return Err(ResolverError::argument(format!(
                "{}.updateOne resolver requires at least one value in args.filter",
                ctx.type_name()
            )));
        }

        let record = match params.arg(INPUT_ARG_RECORD) {
            None => None,
            Some(Value::Object(record)) => Some(record.clone()),
            Some(_) => {
                return Err(ResolverError::argument(format!(
                    "{}.updateOne resolver requires args.record to be an object",
                    ctx.type_name()
                )))
            }
        };

        // Hooks and validation need the whole stored document, not the requested fields.
        let mut lookup = ResolveParams {
            projection: Projection::new(),
            ..params.clone()
        };

        let found = self.lookup.find(&mut lookup).await?;
        params.query = lookup.query;

        let Some(mut document) = found else {
            return Ok(Value::Null);
        };

        if let Some(hook) = &params.before_record_mutate {
            document = hook.before_record_mutate(document, &params).await?;
        }

        // Without record data the found document is returned as is, unvalidated and unsaved.
        let Some(record) = record else {
            return channel::to_value(RecordPayload::saved(ctx, document));
        };

        document::merge(&ctx.schema, &mut document, record);

        if let Err(error) = validation::validate_document(&ctx.schema, &document) {
            tracing::warn!(model = ctx.type_name(), failures = error.errors.len(), "update failed validation");
            return channel::reject(error, &params.projection, RecordPayload::rejected);
        }

        let saved = ctx.storage.save(ctx.collection(), document).await?;

        channel::to_value(RecordPayload::saved(ctx, saved))
    }
}
