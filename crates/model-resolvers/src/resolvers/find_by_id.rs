use std::sync::Arc;

use runtime::{filter::Condition, query::Query, ID_FIELD};
use serde_json::Value;

use crate::{
    args::{argument_map, ids},
    config::ResolverOpts,
    error::ResolverError,
    model::ModelContext,
    names::{INPUT_ARG_ID, RESOLVER_FIND_BY_ID},
    params::ResolveParams,
    pipeline,
    resolver::{OperationKind, Resolver},
    resolvers::Operation,
};

pub(crate) struct FindById {
    pub(crate) ctx: Arc<ModelContext>,
}

pub(crate) fn build(ctx: &Arc<ModelContext>, _opts: &ResolverOpts) -> Result<Resolver, ResolverError> {
    Ok(Resolver {
        name: RESOLVER_FIND_BY_ID.to_string(),
        kind: OperationKind::Query,
        description: Some(format!("Find a {} document by its id", ctx.type_name())),
        args: argument_map([ids::id_argument()]),
        ty: ctx.type_name().to_string(),
        output_type: Some(Arc::clone(&ctx.output_type)),
        operation: Operation::FindById(FindById { ctx: Arc::clone(ctx) }),
    })
}

impl FindById {
    pub(crate) async fn execute(&self, mut params: ResolveParams) -> Result<Value, ResolverError> {
        let Some(id) = params.arg(INPUT_ARG_ID).cloned() else {
            return Ok(Value::Null);
        };

        let mut query = Query::find_one(self.ctx.collection());
        query.push_condition(Condition::eq(ID_FIELD, id));
        pipeline::project(&self.ctx, &mut query, &params.projection);

        params.query = Some(query);

        Ok(pipeline::execute(&self.ctx, &mut params).await?.into_value())
    }
}
