use std::sync::Arc;

use runtime::query::Query;
use serde_json::Value;

use crate::{
    args::{argument_map, filter, limit::LimitPolicy, skip, sort},
    config::ResolverOpts,
    error::ResolverError,
    model::ModelContext,
    names::{MetaNames, INPUT_ARG_FILTER, INPUT_ARG_LIMIT, INPUT_ARG_SKIP, INPUT_ARG_SORT, RESOLVER_FIND_MANY},
    params::ResolveParams,
    pipeline,
    registry::MetaType,
    resolver::{OperationKind, Resolver},
    resolvers::Operation,
};

pub(crate) struct FindMany {
    pub(crate) ctx: Arc<ModelContext>,
    sort: Arc<MetaType>,
    limit: LimitPolicy,
}

pub(crate) fn build(ctx: &Arc<ModelContext>, opts: &ResolverOpts) -> Result<Resolver, ResolverError> {
    let prefix = MetaNames::prefix(RESOLVER_FIND_MANY);

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
    let limit = LimitPolicy::new(&opts.limit);

    Ok(Resolver {
        name: RESOLVER_FIND_MANY.to_string(),
        kind: OperationKind::Query,
        description: Some(format!("Find {} documents matching the filter", ctx.type_name())),
        args: argument_map([
            filter::build(ctx, &filter_type, &opts.filter)?,
            skip::argument(),
            limit.argument(),
            sort_argument,
        ]),
        ty: format!("[{}!]!", ctx.type_name()),
        output_type: Some(Arc::clone(&ctx.output_type)),
        operation: Operation::FindMany(FindMany {
            ctx: Arc::clone(ctx),
            sort,
            limit,
        }),
    })
}

impl FindMany {
    pub(crate) async fn execute(&self, mut params: ResolveParams) -> Result<Value, ResolverError> {
        let mut query = Query::find(self.ctx.collection());

        filter::apply(&self.ctx, &mut query, params.arg(INPUT_ARG_FILTER))?;
        skip::apply(&mut query, params.arg(INPUT_ARG_SKIP))?;
        self.limit.apply(&mut query, params.arg(INPUT_ARG_LIMIT))?;
        sort::apply(&self.ctx, &self.sort, &mut query, params.arg(INPUT_ARG_SORT))?;
        pipeline::project(&self.ctx, &mut query, &params.projection);

        params.query = Some(query);

        Ok(pipeline::execute(&self.ctx, &mut params).await?.into_value())
    }
}
