use std::sync::Arc;

use runtime::{filter::Condition, query::Query, ID_FIELD};
use serde_json::Value;

use crate::{
    args::{argument_map, ids, limit::LimitPolicy, sort},
    config::ResolverOpts,
    error::ResolverError,
    model::ModelContext,
    names::{MetaNames, INPUT_ARG_IDS, INPUT_ARG_LIMIT, INPUT_ARG_SORT, RESOLVER_FIND_BY_IDS},
    params::ResolveParams,
    pipeline,
    registry::MetaType,
    resolver::{OperationKind, Resolver},
    resolvers::Operation,
};

pub(crate) struct FindByIds {
    pub(crate) ctx: Arc<ModelContext>,
    sort: Arc<MetaType>,
    limit: LimitPolicy,
}

pub(crate) fn build(ctx: &Arc<ModelContext>, opts: &ResolverOpts) -> Result<Resolver, ResolverError> {
    let sort_type = opts
        .sort
        .type_name
        .clone()
        .unwrap_or_else(|| MetaNames::sort_input(&MetaNames::prefix(RESOLVER_FIND_BY_IDS), ctx.type_name()));

    let (sort_argument, sort) = sort::build(ctx, &sort_type, &opts.sort)?;
    let limit = LimitPolicy::new(&opts.limit);

    Ok(Resolver {
        name: RESOLVER_FIND_BY_IDS.to_string(),
        kind: OperationKind::Query,
        description: Some(format!("Find {} documents by their ids", ctx.type_name())),
        args: argument_map([ids::ids_argument(), limit.argument(), sort_argument]),
        ty: format!("[{}!]!", ctx.type_name()),
        output_type: Some(Arc::clone(&ctx.output_type)),
        operation: Operation::FindByIds(FindByIds {
            ctx: Arc::clone(ctx),
            sort,
            limit,
        }),
    })
}

impl FindByIds {
    pub(crate) async fn execute(&self, mut params: ResolveParams) -> Result<Value, ResolverError> {
        let ids = ids::parse_ids(params.arg(INPUT_ARG_IDS))?;

        if ids.is_empty() {
            return Ok(Value::Array(Vec::new()));
        }

        let mut query = Query::find(self.ctx.collection());
        query.push_condition(Condition::is_in(ID_FIELD, ids));

        self.limit.apply(&mut query, params.arg(INPUT_ARG_LIMIT))?;
        sort::apply(&self.ctx, &self.sort, &mut query, params.arg(INPUT_ARG_SORT))?;
        pipeline::project(&self.ctx, &mut query, &params.projection);

        params.query = Some(query);

        Ok(pipeline::execute(&self.ctx, &mut params).await?.into_value())
    }
}
