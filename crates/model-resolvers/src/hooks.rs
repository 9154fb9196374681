use runtime::{query::Query, JsonMap};

use crate::{error::ResolverError, params::ResolveParams};

/// Runs on each document right before it is validated and written. Create operations
/// hand over the freshly built document, updateOne the stored one before the update is
/// merged in. Returning an error aborts the operation.
#[async_trait::async_trait]
pub trait BeforeRecordMutate: Send + Sync {
    async fn before_record_mutate(&self, document: JsonMap, params: &ResolveParams) -> Result<JsonMap, ResolverError>;
}

/// Runs right before a read query reaches storage, and may rewrite it.
#[async_trait::async_trait]
pub trait BeforeQuery: Send + Sync {
    async fn before_query(&self, query: Query, params: &ResolveParams) -> Result<Query, ResolverError>;
}
