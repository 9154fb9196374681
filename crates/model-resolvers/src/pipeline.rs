//! The read path: projection push-down, the before-query hook and storage execution.

use runtime::query::{Query, QueryOutput};

use crate::{error::ResolverError, model::ModelContext, params::ResolveParams, projection::Projection};

/// Selects only the requested top-level fields, in storage names. An empty projection
/// selects everything.
pub(crate) fn project(ctx: &ModelContext, query: &mut Query, projection: &Projection) {
    if projection.is_empty() {
        query.select_all();
        return;
    }

    let fields: Vec<String> = projection
        .fields()
        .filter(|field| !field.starts_with("__"))
        .map(|field| ctx.aliases().to_storage_name(field).to_string())
        .collect();

    query.select(fields);
}

/// Runs the query attached to `params`, after giving the before-query hook a chance to
/// rewrite it. The executed query stays on `params`.
pub(crate) async fn execute(ctx: &ModelContext, params: &mut ResolveParams) -> Result<QueryOutput, ResolverError> {
    let mut query = params
        .query
        .take()
        .ok_or_else(|| ResolverError::Internal(format!("no query attached for {}", ctx.type_name())))?;

    if let Some(hook) = params.before_query.clone() {
        query = hook.before_query(query, params).await?;
    }

    tracing::debug!(
        model = ctx.type_name(),
        collection = query.collection(),
        kind = %query.kind(),
        limit = query.limit(),
        skip = query.skip(),
        "executing query"
    );

    let output = ctx.storage.execute(query.clone()).await?;
    params.query = Some(query);

    Ok(output)
}
