//! Memoized type synthesis.
//!
//! Every type an operation needs (filter inputs, sort enums, payloads...) is created on
//! first use under its synthesized name and shared afterwards. Models of the same
//! process share one registry, so the same name always resolves to the same descriptor.

mod sdl;
mod types;

use std::sync::Arc;

use dashmap::DashMap;

pub use types::{EnumType, InputObjectType, MetaEnumValue, MetaField, MetaInputValue, MetaType, ObjectType};

use crate::{
    error::ResolverError,
    names::{ID_SCALAR, VALIDATION_ERROR_TYPE, VALIDATOR_ERROR_TYPE},
};

#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: DashMap<String, Arc<MetaType>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<Arc<MetaType>> {
        self.types.get(name).map(|entry| Arc::clone(entry.value()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Registered type names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.types.iter().map(|entry| entry.key().clone()).collect();
        names.sort();
        names
    }

    /// Returns the type registered under `name`, building and registering it first if
    /// needed.
    ///
    /// The builder runs without any lock held and may register other types itself. When
    /// two callers race on the same name, the first insert wins and both get the same
    /// descriptor. A failing builder leaves the registry untouched.
    pub fn get_or_create<E>(
        &self,
        name: &str,
        builder: impl FnOnce(&TypeRegistry) -> Result<MetaType, E>,
    ) -> Result<Arc<MetaType>, E> {
        if let Some(existing) = self.get(name) {
            return Ok(existing);
        }

        let built = Arc::new(builder(self)?);
        debug_assert_eq!(built.name(), name);

        let entry = self.types.entry(name.to_string()).or_insert_with(|| Arc::clone(&built));
        let canonical = Arc::clone(entry.value());
        drop(entry);

        if Arc::ptr_eq(&canonical, &built) {
            tracing::debug!(type_name = name, kind = canonical.kind(), "synthesized type");
        }

        Ok(canonical)
    }

    /// Renders every registered type, sorted by name.
    pub fn export_sdl(&self) -> String {
        self.names()
            .iter()
            .filter_map(|name| self.get(name))
            .map(|ty| ty.to_string())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Registers the types validation failures are reported with in payloads.
    pub(crate) fn register_validation_types(&self) -> Result<Arc<MetaType>, ResolverError> {
        self.get_or_create(VALIDATION_ERROR_TYPE, |registry| {
            registry.get_or_create(VALIDATOR_ERROR_TYPE, |_| {
                Ok::<_, ResolverError>(
                    ObjectType::new(
                        VALIDATOR_ERROR_TYPE,
                        [
                            MetaField::new("message", "String").with_description("Validation error message"),
                            MetaField::new("path", "String").with_description("Source of the validation error"),
                            MetaField::new("value", "JSON").with_description("Invalid value"),
                        ],
                    )
                    .into(),
                )
            })?;

            Ok(ObjectType::new(
                VALIDATION_ERROR_TYPE,
                [
                    MetaField::new("name", "String"),
                    MetaField::new("message", "String").with_description("Combined error message"),
                    MetaField::new("errors", format!("[{VALIDATOR_ERROR_TYPE}!]"))
                        .with_description("List of validator errors"),
                ],
            )
            .into())
        })
    }
}

pub(crate) fn kind_mismatch(ty: &MetaType, expected: &str) -> ResolverError {
    ResolverError::Schema(format!(
        "Type '{}' is already registered as an {}, expected an {expected}.",
        ty.name(),
        ty.kind()
    ))
}

/// The identity argument type, e.g. `MongoID!`.
pub(crate) fn id_type(required: bool) -> String {
    if required {
        format!("{ID_SCALAR}!")
    } else {
        ID_SCALAR.to_string()
    }
}
