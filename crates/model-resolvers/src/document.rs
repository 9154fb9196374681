use runtime::{JsonMap, ID_FIELD};

use crate::schema::EntitySchema;

/// Builds a new document from caller data. Keys are translated to storage names,
/// unknown keys dropped and defaults filled in for fields that were not given.
pub(crate) fn new_document(schema: &EntitySchema, record: JsonMap) -> JsonMap {
    let mut record = schema.aliases().translate_keys(record);
    let mut document = JsonMap::new();

    for field in schema.fields() {
        match record.remove(&field.name) {
            Some(value) => {
                document.insert(field.name.clone(), value);
            }
            None => {
                if let Some(default_value) = &field.default_value {
                    document.insert(field.name.clone(), default_value.clone());
                }
            }
        }
    }

    document
}

/// Applies a partial update. Fields not mentioned keep their value, the identity
/// cannot be changed.
pub(crate) fn merge(schema: &EntitySchema, document: &mut JsonMap, record: JsonMap) {
    for (key, value) in schema.aliases().translate_keys(record) {
        if key == ID_FIELD || schema.field(&key).is_none() {
            continue;
        }

        document.insert(key, value);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    use super::*;
    use crate::schema::{FieldDefinition, FieldType};

    fn schema() -> EntitySchema {
        EntitySchema::builder("User")
            .field(FieldDefinition::new("n", FieldType::String).with_alias("name"))
            .field(FieldDefinition::new("role", FieldType::String).with_default("user"))
            .field(FieldDefinition::new("age", FieldType::Int))
            .build()
            .unwrap()
    }

    fn map(value: Value) -> JsonMap {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn new_documents_use_storage_names_and_defaults() {
        let document = new_document(&schema(), map(json!({ "name": "Ann", "unknown": 1 })));
        assert_eq!(Value::Object(document), json!({ "n": "Ann", "role": "user" }));

        let document = new_document(&schema(), map(json!({ "n": "Ann", "role": null })));
        assert_eq!(Value::Object(document), json!({ "n": "Ann", "role": null }));
    }

    #[test]
    fn merge_keeps_unmentioned_fields() {
        let mut document = map(json!({ "_id": "1", "n": "Ann", "age": 3 }));
        merge(&schema(), &mut document, map(json!({ "name": "Anna", "_id": "2", "nope": true })));

        assert_eq!(Value::Object(document), json!({ "_id": "1", "n": "Anna", "age": 3 }));
    }
}
