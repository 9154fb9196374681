use std::sync::Arc;

use runtime::{
    query::{Query, SortDirection, SortField},
    JsonMap, ID_FIELD,
};
use serde_json::Value;

use crate::{
    config::SortOpts,
    error::ResolverError,
    model::ModelContext,
    names::{MetaNames, INPUT_ARG_SORT, SORT_ASC, SORT_DESC},
    registry::{kind_mismatch, EnumType, MetaEnumValue, MetaInputValue, MetaType},
    schema::FieldDefinition,
};

/// Registers the sort enum `type_name`. Returns the `sort` argument and the enum,
/// which [`apply`] needs to map values back to sort specs.
pub(crate) fn build(
    ctx: &ModelContext,
    type_name: &str,
    opts: &SortOpts,
) -> Result<(MetaInputValue, Arc<MetaType>), ResolverError> {
    let fields: Vec<&FieldDefinition> = ctx
        .fields_except(&opts.remove_fields, "sort.remove_fields")?
        .into_iter()
        .filter(|field| field.name != ID_FIELD && is_sortable(field))
        .collect();

    let id_field = ctx.schema.field(ID_FIELD);

    let sort = ctx.registry.get_or_create(type_name, |_| {
        let values = id_field.into_iter().chain(fields).flat_map(|field| {
            let external = field.external_name();

            [(SORT_ASC, SortDirection::Asc), (SORT_DESC, SortDirection::Desc)].map(|(suffix, direction)| {
                let mut spec = JsonMap::new();
                spec.insert(external.to_string(), Value::from(direction.as_number()));

                MetaEnumValue::new(MetaNames::sort_value(external, suffix), Value::Object(spec))
            })
        });

        Ok::<_, ResolverError>(EnumType::new(type_name, values).into())
    })?;

    if sort.as_enum().is_none() {
        return Err(kind_mismatch(&sort, "enum"));
    }

    Ok((MetaInputValue::new(INPUT_ARG_SORT, type_name), sort))
}

fn is_sortable(field: &FieldDefinition) -> bool {
    !field.ty.is_list() && field.ty.is_ordered()
}

/// Applies a `sort` argument: one enum value or a list of them.
pub(crate) fn apply(
    ctx: &ModelContext,
    sort_type: &MetaType,
    query: &mut Query,
    value: Option<&Value>,
) -> Result<(), ResolverError> {
    let Some(enum_type) = sort_type.as_enum() else {
        return Err(kind_mismatch(sort_type, "enum"));
    };

    let values: Vec<&Value> = match value {
        None | Some(Value::Null) => return Ok(()),
        Some(Value::Array(values)) => values.iter().collect(),
        Some(value) => vec![value],
    };

    for value in values {
        let spec = match value {
            Value::String(name) => enum_type
                .value(name)
                .map(|value| &value.value)
                .ok_or_else(|| {
                    ResolverError::argument(format!(
                        "Value '{name}' does not exist in '{}' enum.",
                        enum_type.name
                    ))
                })?,
            _ => {
                return Err(ResolverError::argument(format!(
                    "Sort values must be one of the '{}' enum values.",
                    enum_type.name
                )))
            }
        };

        let Value::Object(spec) = spec else {
            continue;
        };

        for (field, direction) in spec {
            let direction = direction.as_i64().map(SortDirection::from_number).unwrap_or(SortDirection::Asc);
            query.push_sort(SortField::new(ctx.aliases().to_storage_name(field), direction));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::{
        model::test_context,
        schema::{EntitySchema, FieldType},
    };

    fn schema() -> EntitySchema {
        EntitySchema::builder("User")
            .field(FieldDefinition::new("n", FieldType::String).with_alias("name"))
            .field(FieldDefinition::new("tags", FieldType::list(FieldType::String)))
            .field(FieldDefinition::new("createdAt", FieldType::Date))
            .build()
            .unwrap()
    }

    #[test]
    fn enum_values() {
        let ctx = test_context(schema());
        let opts = SortOpts {
            remove_fields: vec!["createdAt".into()],
            ..Default::default()
        };

        let (argument, sort) = build(&ctx, "SortFindManyUserInput", &opts).unwrap();

        assert_eq!(argument.to_string(), "sort: SortFindManyUserInput");

        let expected = indoc! {"
            enum SortFindManyUserInput {
              _ID_ASC
              _ID_DESC
              NAME_ASC
              NAME_DESC
            }"};

        assert_eq!(sort.to_string(), expected);
        assert_eq!(
            sort.as_enum().and_then(|sort| sort.value("NAME_DESC")).map(|value| &value.value),
            Some(&json!({ "name": -1 }))
        );
    }

    #[test]
    fn applies_single_and_listed_values() {
        let ctx = test_context(schema());
        let (_, sort) = build(&ctx, "SortFindManyUserInput", &SortOpts::default()).unwrap();

        let mut query = Query::find("users");
        apply(&ctx, &sort, &mut query, Some(&json!("NAME_DESC"))).unwrap();
        assert_eq!(query.sort(), &[SortField::new("n", SortDirection::Desc)]);

        let mut query = Query::find("users");
        apply(&ctx, &sort, &mut query, Some(&json!(["CREATED_AT_ASC", "_ID_DESC"]))).unwrap();
        assert_eq!(
            query.sort(),
            &[
                SortField::new("createdAt", SortDirection::Asc),
                SortField::new("_id", SortDirection::Desc)
            ]
        );

        let mut query = Query::find("users");
        let error = apply(&ctx, &sort, &mut query, Some(&json!("TAGS_ASC"))).unwrap_err();
        assert_eq!(
            error.to_string(),
            "Value 'TAGS_ASC' does not exist in 'SortFindManyUserInput' enum."
        );
    }
}
