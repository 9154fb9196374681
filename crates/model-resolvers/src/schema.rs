//! Entity schemas, as handed over by whatever describes the models.

mod field;

use std::{fmt, sync::Arc};

use heck::{ToSnakeCase, ToUpperCamelCase};
use runtime::{JsonMap, ID_FIELD};
use serde_json::Value;

pub use field::{ConstraintCheck, FieldConstraint, FieldDefinition, FieldType, Required, RequiredPredicate};

use crate::{
    alias::AliasTable,
    error::ResolverError,
    names::{INPUT_FIELD_FILTER_AND, INPUT_FIELD_FILTER_OR, INPUT_FIELD_OPERATORS},
};

const RESERVED_FIELDS: [&str; 3] = [INPUT_FIELD_FILTER_AND, INPUT_FIELD_FILTER_OR, INPUT_FIELD_OPERATORS];

pub type RecordIdFn = Arc<dyn Fn(&JsonMap) -> Option<Value> + Send + Sync>;

/// An immutable description of one entity: its name, the collection it lives in and
/// its fields in declaration order. The identity field always comes first.
#[derive(Clone)]
pub struct EntitySchema {
    name: String,
    collection: String,
    fields: Vec<FieldDefinition>,
    aliases: AliasTable,
    record_id: RecordIdFn,
}

impl EntitySchema {
    pub fn builder(name: impl Into<String>) -> EntitySchemaBuilder {
        EntitySchemaBuilder {
            name: name.into(),
            collection: None,
            fields: Vec::new(),
            record_id: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    /// Looks a field up by its storage name.
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Looks a field up by either of its names.
    pub fn find_field(&self, name: &str) -> Option<&FieldDefinition> {
        self.field(self.aliases.to_storage_name(name))
    }

    /// Storage names of the fields that are always required. Fields with computed
    /// requiredness are left out, they are only known per document.
    pub fn required_fields(&self) -> Vec<String> {
        self.fields
            .iter()
            .filter(|field| field.required.is_static())
            .map(|field| field.name.clone())
            .collect()
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn record_id(&self, document: &JsonMap) -> Option<Value> {
        (self.record_id)(document)
    }
}

impl fmt::Debug for EntitySchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntitySchema")
            .field("name", &self.name)
            .field("collection", &self.collection)
            .field("fields", &self.fields)
            .field("aliases", &self.aliases)
            .finish_non_exhaustive()
    }
}

pub struct EntitySchemaBuilder {
    name: String,
    collection: Option<String>,
    fields: Vec<FieldDefinition>,
    record_id: Option<RecordIdFn>,
}

impl EntitySchemaBuilder {
    /// Defaults to the snake-cased model name.
    #[must_use]
    pub fn collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    #[must_use]
    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn fields(mut self, fields: impl IntoIterator<Item = FieldDefinition>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Overrides how the id of a stored document is read. Defaults to its `_id`.
    #[must_use]
    pub fn record_id(mut self, record_id: impl Fn(&JsonMap) -> Option<Value> + Send + Sync + 'static) -> Self {
        self.record_id = Some(Arc::new(record_id));
        self
    }

    pub fn build(self) -> Result<EntitySchema, ResolverError> {
        let type_name = self.name.to_upper_camel_case();

        if self.name != type_name {
            return Err(ResolverError::Schema(format!(
                "Models must be named in PascalCase.  Try renaming {} to {type_name}.",
                self.name
            )));
        }

        let mut fields = Vec::with_capacity(self.fields.len() + 1);

        if !self.fields.iter().any(|field| field.name == ID_FIELD) {
            fields.push(FieldDefinition::new(ID_FIELD, FieldType::Id));
        }

        for field in self.fields {
            let external = field.external_name();

            if RESERVED_FIELDS.contains(&field.name.as_str()) || RESERVED_FIELDS.contains(&external) {
                return Err(ResolverError::Schema(format!(
                    "Field name '{external}' is reserved and cannot be used."
                )));
            }

            if fields.iter().any(|existing| existing.name == field.name) {
                return Err(ResolverError::Schema(format!(
                    "Field '{}' is defined more than once on {}.",
                    field.name, self.name
                )));
            }

            fields.push(field);
        }

        let aliases = AliasTable::from_fields(&fields)?;

        Ok(EntitySchema {
            collection: self.collection.unwrap_or_else(|| self.name.to_snake_case()),
            name: self.name,
            fields,
            aliases,
            record_id: self.record_id.unwrap_or_else(|| -> RecordIdFn {
                Arc::new(|document: &JsonMap| document.get(ID_FIELD).cloned())
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn user() -> EntitySchema {
        EntitySchema::builder("User")
            .collection("users")
            .field(FieldDefinition::new("n", FieldType::String).with_alias("name").required())
            .field(FieldDefinition::new("age", FieldType::Int))
            .field(FieldDefinition::new("vat", FieldType::String).required_if(|doc| doc.contains_key("company")))
            .build()
            .unwrap()
    }

    #[test]
    fn identity_field_comes_first() {
        let schema = user();
        let names: Vec<_> = schema.fields().iter().map(|field| field.name.as_str()).collect();

        assert_eq!(names, vec!["_id", "n", "age", "vat"]);
    }

    #[test]
    fn only_static_requiredness_is_listed() {
        assert_eq!(user().required_fields(), vec!["n".to_string()]);
    }

    #[test]
    fn fields_by_either_name() {
        let schema = user();

        assert_eq!(schema.find_field("name").map(|field| field.name.as_str()), Some("n"));
        assert_eq!(schema.find_field("n").map(|field| field.name.as_str()), Some("n"));
        assert!(schema.find_field("nope").is_none());
    }

    #[test]
    fn default_record_id_and_collection() {
        let schema = EntitySchema::builder("BlogPost").build().unwrap();
        let mut doc = JsonMap::new();
        doc.insert("_id".into(), json!("abc"));

        assert_eq!(schema.collection(), "blog_post");
        assert_eq!(schema.record_id(&doc), Some(json!("abc")));
    }

    #[test]
    fn rejects_bad_names() {
        let error = EntitySchema::builder("user").build().unwrap_err();
        assert_eq!(
            error.to_string(),
            "Models must be named in PascalCase.  Try renaming user to User."
        );

        let error = EntitySchema::builder("User")
            .field(FieldDefinition::new("OR", FieldType::String))
            .build()
            .unwrap_err();
        assert_eq!(error.to_string(), "Field name 'OR' is reserved and cannot be used.");

        let error = EntitySchema::builder("User")
            .field(FieldDefinition::new("a", FieldType::String))
            .field(FieldDefinition::new("a", FieldType::Int))
            .build()
            .unwrap_err();
        assert!(matches!(error, ResolverError::Schema(_)));
    }
}
