#![allow(dead_code)]

use std::sync::Arc;

use indexmap::IndexMap;
use model_resolvers::{
    EntitySchema, FieldConstraint, FieldDefinition, FieldType, GenResolverOpts, Model, Projection, ResolveParams,
    Resolver, ResolverError, TypeRegistry,
};
use runtime::{storage::Storage, JsonMap};
use runtime_local::InMemoryStorage;
use serde_json::Value;

pub fn user_schema() -> EntitySchema {
    EntitySchema::builder("User")
        .collection("users")
        .field(FieldDefinition::new("n", FieldType::String).with_alias("name").required())
        .field(FieldDefinition::new("email", FieldType::String).required())
        .field(FieldDefinition::new("age", FieldType::Int).with_constraint(FieldConstraint::Min(0.0)))
        .field(
            FieldDefinition::new("role", FieldType::String)
                .with_default("user")
                .with_constraint(FieldConstraint::Enum(vec!["admin".into(), "user".into()])),
        )
        .build()
        .unwrap()
}

pub struct TestModel {
    pub storage: Arc<InMemoryStorage>,
    pub registry: Arc<TypeRegistry>,
    pub model: Model,
    pub resolvers: IndexMap<String, Resolver>,
}

impl TestModel {
    pub fn new() -> Self {
        Self::with_storage(InMemoryStorage::new().with_unique_index("users", "email"))
    }

    pub fn with_storage(storage: InMemoryStorage) -> Self {
        let storage = Arc::new(storage);
        let registry = Arc::new(TypeRegistry::new());
        let model = Model::new(user_schema(), storage.clone(), registry.clone()).unwrap();
        let resolvers = model.generate(&GenResolverOpts::default()).unwrap();

        TestModel {
            storage,
            registry,
            model,
            resolvers,
        }
    }

    pub fn resolver(&self, name: &str) -> &Resolver {
        &self.resolvers[name]
    }

    pub async fn resolve(&self, name: &str, args: Value) -> Result<Value, ResolverError> {
        self.resolve_with(name, ResolveParams::new(args)).await
    }

    /// Resolves with the given output selection, e.g. `["record", "error"]`.
    pub async fn resolve_selecting(&self, name: &str, args: Value, paths: &[&str]) -> Result<Value, ResolverError> {
        let params = ResolveParams::new(args).with_projection(Projection::from_paths(paths));
        self.resolve_with(name, params).await
    }

    pub async fn resolve_with(&self, name: &str, params: ResolveParams) -> Result<Value, ResolverError> {
        self.resolver(name).resolve(params).await
    }

    /// Writes documents straight to storage, keys being storage names.
    #[allow(clippy::panic)]
    pub async fn seed(&self, documents: Value) -> Vec<JsonMap> {
        let Value::Array(documents) = documents else {
            panic!("seed expects a list of documents");
        };

        let documents = documents
            .into_iter()
            .map(|document| document.as_object().cloned().unwrap())
            .collect();

        self.storage.insert_many("users", documents).await.unwrap()
    }

    pub async fn stored(&self) -> Vec<JsonMap> {
        self.storage.documents("users").await
    }
}

pub async fn seeded() -> TestModel {
    let model = TestModel::new();

    model
        .seed(serde_json::json!([
            { "_id": "u1", "n": "Ann", "email": "ann@example.com", "age": 30, "role": "admin" },
            { "_id": "u2", "n": "Bob", "email": "bob@example.com", "age": 20, "role": "user" },
            { "_id": "u3", "n": "Cid", "email": "cid@example.com", "age": 40, "role": "user" },
        ]))
        .await;

    model
}
