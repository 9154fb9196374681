use std::sync::Arc;

use runtime::query::Query;
use serde_json::Value;

use crate::{
    args::{argument_map, filter},
    config::ResolverOpts,
    error::ResolverError,
    model::ModelContext,
    names::{MetaNames, INPUT_ARG_FILTER, RESOLVER_COUNT},
    params::ResolveParams,
    pipeline,
    resolver::{OperationKind, Resolver},
    resolvers::Operation,
};

pub(crate) struct Count {
    pub(crate) ctx: Arc<ModelContext>,
}

pub(crate) fn build(ctx: &Arc<ModelContext>, opts: &ResolverOpts) -> Result<Resolver, ResolverError> {
    let filter_type = opts
        .filter
        .type_name
        .clone()
        .unwrap_or_else(|| MetaNames::filter_input("", ctx.type_name()));

    Ok(Resolver {
        name: RESOLVER_COUNT.to_string(),
        kind: OperationKind::Query,
        description: Some(format!("Count {} documents matching the filter", ctx.type_name())),
        args: argument_map([filter::build(ctx, &filter_type, &opts.filter)?]),
        ty: "Int".to_string(),
        output_type: None,
        operation: Operation::Count(Count { ctx: Arc::clone(ctx) }),
    })
}

impl Count {
    pub(crate) async fn execute(&self, mut params: ResolveParams) -> Result<Value, ResolverError> {
        let mut query = Query::count(self.ctx.collection());
        filter::apply(&self.ctx, &mut query, params.arg(INPUT_ARG_FILTER))?;

        params.query = Some(query);

        Ok(pipeline::execute(&self.ctx, &mut params).await?.into_value())
    }
}
