use std::{
    collections::HashMap,
    sync::atomic::{AtomicU64, Ordering::Relaxed},
};

use futures_util::lock::Mutex;
use runtime::{
    query::{Query, QueryKind, QueryOutput, SortDirection},
    storage::{Result, Storage, StorageError},
    JsonMap, ID_FIELD,
};
use serde_json::Value;

use crate::{filter, order};

/// Keeps every collection in memory, in insertion order.
///
/// Documents without an identity get a ULID on insert. Unique indexes are opt-in per
/// collection and field, the identity field is always unique.
pub struct InMemoryStorage {
    inner: Mutex<StorageInner>,
    operations: AtomicU64,
}

#[derive(Default)]
struct StorageInner {
    collections: HashMap<String, Collection>,
}

#[derive(Default)]
struct Collection {
    documents: Vec<JsonMap>,
    unique_indexes: Vec<String>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_unique_index(mut self, collection: &str, field: &str) -> Self {
        self.inner
            .get_mut()
            .collections
            .entry(collection.to_string())
            .or_default()
            .unique_indexes
            .push(field.to_string());

        self
    }

    /// A snapshot of a collection, in insertion order.
    pub async fn documents(&self, collection: &str) -> Vec<JsonMap> {
        self.inner
            .lock()
            .await
            .collections
            .get(collection)
            .map(|collection| collection.documents.clone())
            .unwrap_or_default()
    }

    /// How many calls reached this storage so far.
    pub fn operation_count(&self) -> u64 {
        self.operations.load(Relaxed)
    }

    fn record_operation(&self) {
        self.operations.fetch_add(1, Relaxed);
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        InMemoryStorage {
            inner: Mutex::new(StorageInner::default()),
            operations: AtomicU64::new(0),
        }
    }
}

impl Collection {
    fn indexes(&self) -> impl Iterator<Item = &str> + '_ {
        std::iter::once(ID_FIELD).chain(self.unique_indexes.iter().map(String::as_str))
    }

    /// Checks `document` against every unique index, ignoring the documents at `skip`.
    fn check_unique(
        &self,
        name: &str,
        document: &JsonMap,
        pending: &[JsonMap],
        skip: Option<usize>,
    ) -> Result<()> {
        for index in self.indexes() {
            let Some(value) = document.get(index).filter(|value| !value.is_null()) else {
                continue;
            };

            let existing = self
                .documents
                .iter()
                .enumerate()
                .filter(|(position, _)| Some(*position) != skip)
                .map(|(_, existing)| existing)
                .chain(pending);

            for other in existing {
                if other.get(index).is_some_and(|other| order::values_equal(other, value)) {
                    return Err(StorageError::DuplicateKey {
                        collection: name.to_string(),
                        index: index.to_string(),
                        value: value.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl Storage for InMemoryStorage {
    async fn execute(&self, query: Query) -> Result<QueryOutput> {
        self.record_operation();

        let inner = self.inner.lock().await;

        let mut documents: Vec<&JsonMap> = inner
            .collections
            .get(query.collection())
            .map(|collection| {
                collection
                    .documents
                    .iter()
                    .filter(|document| filter::matches_all(document, query.conditions()))
                    .collect()
            })
            .unwrap_or_default();

        if !query.sort().is_empty() {
            documents.sort_by(|left, right| {
                query.sort().iter().fold(std::cmp::Ordering::Equal, |ordering, sort| {
                    ordering.then_with(|| {
                        let ordering = order::sort_order(
                            filter::lookup(left, &sort.field),
                            filter::lookup(right, &sort.field),
                        );

                        match sort.direction {
                            SortDirection::Asc => ordering,
                            SortDirection::Desc => ordering.reverse(),
                        }
                    })
                })
            });
        }

        let skip = query.skip().unwrap_or(0) as usize;
        let limit = match query.kind() {
            QueryKind::FindOne => 1,
            _ => query.limit().map(|limit| limit as usize).unwrap_or(usize::MAX),
        };

        let selected = documents.into_iter().skip(skip).take(limit);

        tracing::debug!(
            collection = query.collection(),
            kind = %query.kind(),
            "executing in-memory query"
        );

        let output = match query.kind() {
            QueryKind::Count => QueryOutput::Count(selected.count() as u64),
            QueryKind::FindOne => QueryOutput::One(selected.map(|doc| project(doc, query.projection())).next()),
            QueryKind::Find => QueryOutput::Many(selected.map(|doc| project(doc, query.projection())).collect()),
        };

        Ok(output)
    }

    async fn insert_many(&self, collection: &str, documents: Vec<JsonMap>) -> Result<Vec<JsonMap>> {
        self.record_operation();

        let mut inner = self.inner.lock().await;
        let target = inner.collections.entry(collection.to_string()).or_default();

        let mut pending: Vec<JsonMap> = Vec::with_capacity(documents.len());

        for mut document in documents {
            if document.get(ID_FIELD).map_or(true, Value::is_null) {
                document.insert(ID_FIELD.to_string(), Value::String(ulid::Ulid::new().to_string()));
            }

            target.check_unique(collection, &document, &pending, None)?;
            pending.push(document);
        }

        target.documents.extend(pending.iter().cloned());

        Ok(pending)
    }

    async fn save(&self, collection: &str, document: JsonMap) -> Result<JsonMap> {
        self.record_operation();

        let id = document.get(ID_FIELD).cloned().unwrap_or(Value::Null);
        let mut inner = self.inner.lock().await;

        let not_found = || StorageError::DocumentNotFound {
            collection: collection.to_string(),
            id: id.clone(),
        };

        let target = inner.collections.get_mut(collection).ok_or_else(not_found)?;

        let position = target
            .documents
            .iter()
            .position(|existing| existing.get(ID_FIELD).is_some_and(|existing| order::values_equal(existing, &id)))
            .ok_or_else(not_found)?;

        target.check_unique(collection, &document, &[], Some(position))?;
        target.documents[position] = document.clone();

        Ok(document)
    }
}

fn project(document: &JsonMap, projection: Option<&[String]>) -> JsonMap {
    match projection {
        None => document.clone(),
        Some(fields) => fields
            .iter()
            .filter_map(|field| document.get(field).map(|value| (field.clone(), value.clone())))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use runtime::{
        filter::{ComparisonOperator, Condition},
        query::SortField,
    };
    use serde_json::json;

    use super::*;

    fn doc(value: Value) -> JsonMap {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    async fn seeded() -> InMemoryStorage {
        let storage = InMemoryStorage::new();

        storage
            .insert_many(
                "users",
                vec![
                    doc(json!({ "_id": "1", "n": "Ann", "age": 30 })),
                    doc(json!({ "_id": "2", "n": "Bob", "age": 20 })),
                    doc(json!({ "_id": "3", "n": "Cid", "age": 40 })),
                ],
            )
            .await
            .unwrap();

        storage
    }

    #[tokio::test]
    async fn insert_assigns_identity() {
        let storage = InMemoryStorage::new();
        let inserted = storage.insert_one("users", doc(json!({ "n": "Ann" }))).await.unwrap();

        assert!(inserted.get("_id").and_then(Value::as_str).is_some());
        assert_eq!(storage.documents("users").await, vec![inserted]);
    }

    #[tokio::test]
    async fn find_with_filter_sort_skip_limit_and_projection() {
        let storage = seeded().await;

        let mut query = Query::find("users");
        query
            .push_condition(Condition::compare("age", ComparisonOperator::Gte, 20))
            .push_sort(SortField::new("age", SortDirection::Desc))
            .set_skip(1)
            .set_limit(1)
            .select(["n"]);

        let output = storage.execute(query).await.unwrap();

        assert_eq!(output, QueryOutput::Many(vec![doc(json!({ "_id": "1", "n": "Ann" }))]));
    }

    #[tokio::test]
    async fn count_and_find_one() {
        let storage = seeded().await;

        let mut count = Query::count("users");
        count.push_condition(Condition::compare("age", ComparisonOperator::Lt, 35));
        assert_eq!(storage.execute(count).await.unwrap(), QueryOutput::Count(2));

        let mut find_one = Query::find_one("users");
        find_one.push_condition(Condition::eq("n", "Cid"));

        let found = storage.execute(find_one).await.unwrap().into_document().unwrap();
        assert_eq!(found.get("_id"), Some(&json!("3")));

        assert_eq!(storage.execute(Query::count("nothing")).await.unwrap(), QueryOutput::Count(0));
    }

    #[tokio::test]
    async fn batch_insert_is_all_or_nothing() {
        let storage = InMemoryStorage::new().with_unique_index("users", "email");

        storage
            .insert_one("users", doc(json!({ "email": "ann@example.com" })))
            .await
            .unwrap();

        let error = storage
            .insert_many(
                "users",
                vec![
                    doc(json!({ "email": "bob@example.com" })),
                    doc(json!({ "email": "ann@example.com" })),
                ],
            )
            .await
            .unwrap_err();

        assert!(matches!(error, StorageError::DuplicateKey { ref index, .. } if index == "email"));
        assert_eq!(storage.documents("users").await.len(), 1);
    }

    #[tokio::test]
    async fn save_replaces_existing_document() {
        let storage = seeded().await;

        let saved = storage
            .save("users", doc(json!({ "_id": "2", "n": "Bobby", "age": 21 })))
            .await
            .unwrap();

        assert_eq!(saved.get("n"), Some(&json!("Bobby")));
        assert_eq!(storage.documents("users").await[1], saved);

        let missing = storage.save("users", doc(json!({ "_id": "9" }))).await.unwrap_err();
        assert!(matches!(missing, StorageError::DocumentNotFound { .. }));
        assert_eq!(storage.operation_count(), 3);
    }
}
