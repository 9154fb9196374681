use std::sync::Arc;

use runtime::{query::Query, JsonMap};
use serde_json::Value;

use crate::{
    args::{argument_map, filter, skip, sort},
    config::ResolverOpts,
    error::ResolverError,
    model::ModelContext,
    names::{MetaNames, INPUT_ARG_FILTER, INPUT_ARG_SKIP, INPUT_ARG_SORT, RESOLVER_FIND_ONE},
    params::ResolveParams,
    pipeline,
    registry::MetaType,
    resolver::{OperationKind, Resolver},
    resolvers::Operation,
};

/// Finds the first document matching filter, skip and sort. Also runs the lookup of
/// updateOne.
pub(crate) struct FindOne {
    pub(crate) ctx: Arc<ModelContext>,
    pub(crate) sort: Arc<MetaType>,
}

pub(crate) fn build(ctx: &Arc<ModelContext>, opts: &ResolverOpts) -> Result<Resolver, ResolverError> {
    let prefix = MetaNames::prefix(RESOLVER_FIND_ONE);

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

    Ok(Resolver {
        name: RESOLVER_FIND_ONE.to_string(),
        kind: OperationKind::Query,
        description: Some(format!("Find the first {} document matching the filter", ctx.type_name())),
        args: argument_map([
            filter::build(ctx, &filter_type, &opts.filter)?,
            skip::argument(),
            sort_argument,
        ]),
        ty: ctx.type_name().to_string(),
        output_type: Some(Arc::clone(&ctx.output_type)),
        operation: Operation::FindOne(FindOne {
            ctx: Arc::clone(ctx),
            sort,
        }),
    })
}

impl FindOne {
    pub(crate) async fn execute(&self, mut params: ResolveParams) -> Result<Value, ResolverError> {
        Ok(self.find(&mut params).await?.map(Value::Object).unwrap_or(Value::Null))
    }

    pub(crate) async fn find(&self, params: &mut ResolveParams) -> Result<Option<JsonMap>, ResolverError> {
        let mut query = Query::find_one(self.ctx.collection());

        filter::apply(&self.ctx, &mut query, params.arg(INPUT_ARG_FILTER))?;
        skip::apply(&mut query, params.arg(INPUT_ARG_SKIP))?;
        sort::apply(&self.ctx, &self.sort, &mut query, params.arg(INPUT_ARG_SORT))?;
        pipeline::project(&self.ctx, &mut query, &params.projection);

        params.query = Some(query);

        Ok(pipeline::execute(&self.ctx, params).await?.into_document())
    }
}
