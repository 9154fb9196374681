use std::collections::HashMap;

use runtime::JsonMap;

use crate::{error::ResolverError, schema::FieldDefinition};

/// Two-way mapping between the names callers use and the names fields are stored under.
/// Fields without an alias map to themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    to_storage: HashMap<String, String>,
    to_external: HashMap<String, String>,
}

impl AliasTable {
    pub fn from_fields<'a>(fields: impl IntoIterator<Item = &'a FieldDefinition>) -> Result<Self, ResolverError> {
        let fields: Vec<&FieldDefinition> = fields.into_iter().collect();
        let mut table = AliasTable::default();

        for field in &fields {
            let Some(alias) = field.alias.as_deref().filter(|alias| *alias != field.name) else {
                continue;
            };

            let taken_by_field = fields.iter().any(|other| other.name == alias);

            if taken_by_field || table.to_storage.contains_key(alias) {
                return Err(ResolverError::Schema(format!(
                    "Alias '{alias}' of field '{}' is already in use.",
                    field.name
                )));
            }

            table.to_storage.insert(alias.to_string(), field.name.clone());
            table.to_external.insert(field.name.clone(), alias.to_string());
        }

        Ok(table)
    }

    pub fn is_empty(&self) -> bool {
        self.to_storage.is_empty()
    }

    pub fn len(&self) -> usize {
        self.to_storage.len()
    }

    pub fn to_storage_name<'a>(&'a self, external: &'a str) -> &'a str {
        self.to_storage.get(external).map(String::as_str).unwrap_or(external)
    }

    pub fn to_external_name<'a>(&'a self, storage: &'a str) -> &'a str {
        self.to_external.get(storage).map(String::as_str).unwrap_or(storage)
    }

    /// Renames the top-level keys of a record to their storage names.
    pub fn translate_keys(&self, record: JsonMap) -> JsonMap {
        if self.is_empty() {
            return record;
        }

        record
            .into_iter()
            .map(|(key, value)| (self.to_storage_name(&key).to_string(), value))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    use super::*;
    use crate::schema::FieldType;

    fn fields() -> Vec<FieldDefinition> {
        vec![
            FieldDefinition::new("n", FieldType::String).with_alias("name"),
            FieldDefinition::new("age", FieldType::Int),
        ]
    }

    #[test]
    fn translates_both_ways() {
        let table = AliasTable::from_fields(&fields()).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.to_storage_name("name"), "n");
        assert_eq!(table.to_external_name("n"), "name");
        assert_eq!(table.to_storage_name("age"), "age");
        assert_eq!(table.to_external_name("age"), "age");
    }

    #[test]
    fn translates_record_keys() {
        let table = AliasTable::from_fields(&fields()).unwrap();
        let record = json!({ "name": "Ann", "age": 3 }).as_object().cloned().unwrap();

        assert_eq!(
            Value::Object(table.translate_keys(record)),
            json!({ "n": "Ann", "age": 3 })
        );
    }

    #[test]
    fn rejects_colliding_aliases() {
        let mut fields = fields();
        fields.push(FieldDefinition::new("nm", FieldType::String).with_alias("name"));
        assert!(AliasTable::from_fields(&fields).is_err());

        let fields = vec![
            FieldDefinition::new("n", FieldType::String).with_alias("age"),
            FieldDefinition::new("age", FieldType::Int),
        ];
        assert!(AliasTable::from_fields(&fields).is_err());
    }
}
