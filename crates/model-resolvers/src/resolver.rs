use std::{fmt, sync::Arc};

use futures_util::future::BoxFuture;
use serde_json::Value;
use tracing::Instrument;

use crate::{
    args::ArgumentMap,
    error::ResolverError,
    params::ResolveParams,
    registry::{MetaInputValue, MetaType},
    resolvers::Operation,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum OperationKind {
    Query,
    Mutation,
}

/// A generated operation: its signature, for the schema, and the means to run it.
pub struct Resolver {
    pub name: String,
    pub kind: OperationKind,
    pub description: Option<String>,
    pub args: ArgumentMap,
    /// The output type reference, e.g. `[User!]!`.
    pub ty: String,
    /// The named type behind `ty`, when it is one the registry synthesized.
    pub output_type: Option<Arc<MetaType>>,
    pub(crate) operation: Operation,
}

impl Resolver {
    pub fn arg(&self, name: &str) -> Option<&MetaInputValue> {
        self.args.get(name)
    }

    pub fn resolve(&self, params: ResolveParams) -> BoxFuture<'_, Result<Value, ResolverError>> {
        let span = tracing::debug_span!("resolve", resolver = %self.name, model = self.operation.model());
        Box::pin(self.operation.execute(params).instrument(span))
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("description", &self.description)
            .field("args", &self.args)
            .field("ty", &self.ty)
            .finish_non_exhaustive()
    }
}

/// The field signature, e.g. `count(filter: FilterUserInput): Int`.
impl fmt::Display for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;

        if !self.args.is_empty() {
            let args = self.args.values().map(ToString::to_string).collect::<Vec<_>>().join(", ");
            write!(f, "({args})")?;
        }

        write!(f, ": {}", self.ty)
    }
}
