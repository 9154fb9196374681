use std::{fmt, sync::Arc};

use runtime::{query::Query, JsonMap};
use serde_json::Value;

use crate::{
    hooks::{BeforeQuery, BeforeRecordMutate},
    projection::Projection,
};

/// Everything a single resolver call gets: arguments, the requested output shape and
/// optional hooks. Built fresh for every call.
#[derive(Clone, Default)]
pub struct ResolveParams {
    pub args: JsonMap,
    pub projection: Projection,
    /// The query handle the resolver built, once it has one.
    pub query: Option<Query>,
    pub before_record_mutate: Option<Arc<dyn BeforeRecordMutate>>,
    pub before_query: Option<Arc<dyn BeforeQuery>>,
}

impl ResolveParams {
    /// Takes the arguments from a JSON object. Anything else gives no arguments.
    pub fn new(args: Value) -> Self {
        ResolveParams {
            args: match args {
                Value::Object(args) => args,
                _ => JsonMap::new(),
            },
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_projection(self, projection: Projection) -> Self {
        ResolveParams { projection, ..self }
    }

    #[must_use]
    pub fn with_before_record_mutate(self, hook: impl BeforeRecordMutate + 'static) -> Self {
        ResolveParams {
            before_record_mutate: Some(Arc::new(hook)),
            ..self
        }
    }

    #[must_use]
    pub fn with_before_query(self, hook: impl BeforeQuery + 'static) -> Self {
        ResolveParams {
            before_query: Some(Arc::new(hook)),
            ..self
        }
    }

    /// An argument, treating `null` as absent.
    pub fn arg(&self, name: &str) -> Option<&Value> {
        self.args.get(name).filter(|value| !value.is_null())
    }
}

impl fmt::Debug for ResolveParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolveParams")
            .field("args", &self.args)
            .field("projection", &self.projection)
            .field("query", &self.query)
            .field("before_record_mutate", &self.before_record_mutate.is_some())
            .field("before_query", &self.before_query.is_some())
            .finish()
    }
}
