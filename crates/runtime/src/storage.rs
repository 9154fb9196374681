use serde_json::Value;

use crate::{
    query::{Query, QueryOutput},
    JsonMap,
};

pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StorageError {
    #[error("duplicate key error collection: {collection} index: {index} dup key: {{ {index}: {value} }}")]
    DuplicateKey {
        collection: String,
        index: String,
        value: Value,
    },
    #[error("No document found for query {{ _id: {id} }} on collection {collection}")]
    DocumentNotFound { collection: String, id: Value },
    #[error("{0}")]
    Backend(String),
}

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// Runs a read query. The shape of the output follows [`Query::kind`].
    async fn execute(&self, query: Query) -> Result<QueryOutput>;

    /// Persists a batch of new documents. Either every document is written or none is.
    /// Returns the documents as stored, identity included, in input order.
    async fn insert_many(&self, collection: &str, documents: Vec<JsonMap>) -> Result<Vec<JsonMap>>;

    /// Replaces an existing document, matched by its identity.
    async fn save(&self, collection: &str, document: JsonMap) -> Result<JsonMap>;

    async fn insert_one(&self, collection: &str, document: JsonMap) -> Result<JsonMap> {
        self.insert_many(collection, vec![document])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StorageError::Backend(format!("insert into {collection} returned no document")))
    }
}
