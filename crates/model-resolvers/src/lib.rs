#![deny(clippy::future_not_send)]

//! Generated CRUD resolvers for document models.
//!
//! A [`Model`] wraps an [`EntitySchema`], a [`runtime::storage::Storage`] and a shared
//! [`TypeRegistry`]. From those it builds [`Resolver`]s for `count`, `createOne`,
//! `createMany`, `updateOne`, `findByIds`, `findOne`, `findMany` and `findById`, each
//! with its argument definitions, its synthesized input and payload types and an
//! async entry point.
//!
//! ```ignore
//! let registry = Arc::new(TypeRegistry::new());
//! let model = Model::new(schema, storage, registry)?;
//! let resolvers = model.generate(&GenResolverOpts::default())?;
//!
//! let payload = resolvers["createOne"]
//!     .resolve(ResolveParams::new(json!({ "record": { "name": "Ann" } })))
//!     .await?;
//! ```
//!
//! Validation failures of mutations are raised as [`ResolverError::Validation`] unless
//! the caller selected the `error` field of the payload, in which case they are
//! returned as data.

pub mod alias;
mod args;
pub mod config;
mod document;
pub mod error;
pub mod hooks;
mod model;
pub mod names;
mod params;
mod pipeline;
pub mod projection;
pub mod registry;
mod resolver;
mod resolvers;
pub mod schema;
pub mod validation;

pub use alias::AliasTable;
pub use args::ArgumentMap;
pub use config::{ConfigError, GenResolverOpts, ResolverOpts};
pub use error::{ErrorCode, ResolverError};
pub use hooks::{BeforeQuery, BeforeRecordMutate};
pub use model::Model;
pub use params::ResolveParams;
pub use projection::Projection;
pub use registry::{MetaType, TypeRegistry};
pub use resolver::{OperationKind, Resolver};
pub use schema::{EntitySchema, FieldConstraint, FieldDefinition, FieldType, Required};
pub use validation::{ManyValidationError, ValidationError, ValidatorError};
