use runtime::{
    filter::{ComparisonOperator, Condition},
    query::Query,
};
use serde_json::Value;

use crate::{
    config::FilterOpts,
    error::ResolverError,
    model::ModelContext,
    names::{
        MetaNames, INPUT_ARG_FILTER, INPUT_FIELD_FILTER_AND, INPUT_FIELD_FILTER_OR, INPUT_FIELD_OPERATORS,
        INPUT_FIELD_OP_EXISTS, INPUT_FIELD_OP_GT, INPUT_FIELD_OP_GTE, INPUT_FIELD_OP_IN, INPUT_FIELD_OP_LT,
        INPUT_FIELD_OP_LTE, INPUT_FIELD_OP_NE, INPUT_FIELD_OP_NIN,
    },
    registry::{kind_mismatch, InputObjectType, MetaInputValue},
    schema::{FieldDefinition, FieldType},
};

/// Registers the filter input `type_name` and returns the `filter` argument.
pub(crate) fn build(ctx: &ModelContext, type_name: &str, opts: &FilterOpts) -> Result<MetaInputValue, ResolverError> {
    let fields = ctx.fields_except(&opts.remove_fields, "filter.remove_fields")?;

    let operators = if opts.operators {
        Some(build_operators(ctx, type_name, &fields)?)
    } else {
        None
    };

    let input = ctx.registry.get_or_create(type_name, |_| {
        let mut input_fields: Vec<MetaInputValue> = fields
            .iter()
            .map(|field| {
                MetaInputValue::new(field.external_name(), field.ty.scalar_name())
                    .with_rename(field.alias.as_ref().map(|_| field.name.clone()))
            })
            .collect();

        if let Some(operators) = operators {
            input_fields.push(
                MetaInputValue::new(INPUT_FIELD_OPERATORS, operators)
                    .with_description("List of *indexed* fields that can be filtered via operators."),
            );
        }

        input_fields.push(MetaInputValue::new(INPUT_FIELD_FILTER_OR, format!("[{type_name}!]")));
        input_fields.push(MetaInputValue::new(INPUT_FIELD_FILTER_AND, format!("[{type_name}!]")));

        Ok::<_, ResolverError>(
            InputObjectType::new(type_name, input_fields)
                .with_description(format!("Filter for {} documents", ctx.type_name()))
                .into(),
        )
    })?;

    if input.as_input_object().is_none() {
        return Err(kind_mismatch(&input, "input object"));
    }

    let ty = if opts.is_required {
        format!("{type_name}!")
    } else {
        type_name.to_string()
    };

    Ok(MetaInputValue::new(INPUT_ARG_FILTER, ty).with_description("Filter by fields"))
}

fn build_operators(
    ctx: &ModelContext,
    filter_type_name: &str,
    fields: &[&FieldDefinition],
) -> Result<String, ResolverError> {
    let name = MetaNames::filter_operators_input(filter_type_name);

    ctx.registry.get_or_create(&name, |registry| {
        let mut input_fields = Vec::new();

        for field in fields.iter().filter(|field| !matches!(field.ty, FieldType::Json)) {
            let field_type_name = MetaNames::filter_field_operators_input(filter_type_name, field.external_name());
            let scalar = field.ty.scalar_name();

            registry.get_or_create(&field_type_name, |_| {
                let ordered = if field.ty.is_ordered() {
                    vec![INPUT_FIELD_OP_GT, INPUT_FIELD_OP_GTE, INPUT_FIELD_OP_LT, INPUT_FIELD_OP_LTE]
                } else {
                    Vec::new()
                };

                let operators = ordered
                    .into_iter()
                    .chain([INPUT_FIELD_OP_NE])
                    .map(|operator| MetaInputValue::new(operator, scalar))
                    .chain([
                        MetaInputValue::new(INPUT_FIELD_OP_IN, format!("[{scalar}]")),
                        MetaInputValue::new(INPUT_FIELD_OP_NIN, format!("[{scalar}]")),
                        MetaInputValue::new(INPUT_FIELD_OP_EXISTS, "Boolean"),
                    ]);

                Ok::<_, ResolverError>(InputObjectType::new(&field_type_name, operators).into())
            })?;

            input_fields.push(MetaInputValue::new(field.external_name(), field_type_name));
        }

        Ok::<_, ResolverError>(InputObjectType::new(&name, input_fields).into())
    })?;

    Ok(name)
}

/// Translates a `filter` argument into query conditions, in storage names.
pub(crate) fn apply(ctx: &ModelContext, query: &mut Query, filter: Option<&Value>) -> Result<(), ResolverError> {
    let Some(filter) = filter.filter(|filter| !filter.is_null()) else {
        return Ok(());
    };

    for condition in conditions(ctx, filter)? {
        query.push_condition(condition);
    }

    Ok(())
}

fn conditions(ctx: &ModelContext, filter: &Value) -> Result<Vec<Condition>, ResolverError> {
    let Value::Object(filter) = filter else {
        return Err(ResolverError::argument(format!(
            "{} filter must be an object.",
            ctx.type_name()
        )));
    };

    let mut output = Vec::with_capacity(filter.len());

    for (key, value) in filter {
        match key.as_str() {
            INPUT_FIELD_FILTER_AND | INPUT_FIELD_FILTER_OR => {
                let nested = match value {
                    Value::Null => continue,
                    Value::Array(items) => items
                        .iter()
                        .map(|item| conditions(ctx, item).map(Condition::And))
                        .collect::<Result<Vec<_>, _>>()?,
                    _ => {
                        return Err(ResolverError::argument(format!(
                            "{key} in the {} filter must be a list.",
                            ctx.type_name()
                        )))
                    }
                };

                if nested.is_empty() {
                    continue;
                }

                output.push(if key == INPUT_FIELD_FILTER_AND {
                    Condition::And(nested)
                } else {
                    Condition::Or(nested)
                });
            }
            INPUT_FIELD_OPERATORS => operator_conditions(ctx, value, &mut output)?,
            _ => {
                let field = field(ctx, key)?;
                output.push(Condition::eq(field.name.clone(), value.clone()));
            }
        }
    }

    Ok(output)
}

fn operator_conditions(ctx: &ModelContext, value: &Value, output: &mut Vec<Condition>) -> Result<(), ResolverError> {
    let fields = match value {
        Value::Null => return Ok(()),
        Value::Object(fields) => fields,
        _ => return Err(ResolverError::argument("_operators must be an object.")),
    };

    for (key, operators) in fields {
        let field = field(ctx, key)?;

        let operators = match operators {
            Value::Null => continue,
            Value::Object(operators) => operators,
            _ => {
                return Err(ResolverError::argument(format!(
                    "Operators of '{key}' must be an object."
                )))
            }
        };

        for (operator, operand) in operators.iter().filter(|(_, operand)| !operand.is_null()) {
            let name = field.name.clone();

            let condition = match operator.as_str() {
                INPUT_FIELD_OP_IN => Condition::is_in(name, list(operator, operand)?),
                INPUT_FIELD_OP_NIN => Condition::NotIn {
                    field: name,
                    values: list(operator, operand)?,
                },
                INPUT_FIELD_OP_EXISTS => Condition::Exists {
                    field: name,
                    exists: operand
                        .as_bool()
                        .ok_or_else(|| ResolverError::argument(format!("'{operator}' expects a boolean.")))?,
                },
                other => {
                    let operator = other
                        .parse::<ComparisonOperator>()
                        .map_err(|_| ResolverError::argument(format!("Unknown filter operator '{other}'.")))?;

                    Condition::compare(name, operator, operand.clone())
                }
            };

            output.push(condition);
        }
    }

    Ok(())
}

fn field<'a>(ctx: &'a ModelContext, name: &str) -> Result<&'a FieldDefinition, ResolverError> {
    ctx.schema.find_field(name).ok_or_else(|| {
        ResolverError::argument(format!(
            "Field '{name}' is not defined by type '{}'.",
            ctx.type_name()
        ))
    })
}

fn list(operator: &str, operand: &Value) -> Result<Vec<Value>, ResolverError> {
    match operand {
        Value::Array(values) => Ok(values.clone()),
        _ => Err(ResolverError::argument(format!("'{operator}' expects a list."))),
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::{model::test_context, schema::EntitySchema};

    fn schema() -> EntitySchema {
        EntitySchema::builder("User")
            .field(FieldDefinition::new("n", FieldType::String).with_alias("name"))
            .field(FieldDefinition::new("age", FieldType::Int))
            .field(FieldDefinition::new("meta", FieldType::Json))
            .build()
            .unwrap()
    }

    fn conditions_of(filter: Value) -> Vec<Condition> {
        let ctx = test_context(schema());
        let mut query = Query::find("users");
        apply(&ctx, &mut query, Some(&filter)).unwrap();
        query.conditions().to_vec()
    }

    #[test]
    fn input_type() {
        let ctx = test_context(schema());
        let opts = FilterOpts {
            remove_fields: vec!["meta".into()],
            ..Default::default()
        };

        let argument = build(&ctx, "FilterUserInput", &opts).unwrap();
        assert_eq!(argument.to_string(), "filter: FilterUserInput");

        let expected = indoc! {r#"
            "Filter for User documents"
            input FilterUserInput {
              _id: MongoID
              name: String
              age: Int
              "List of *indexed* fields that can be filtered via operators."
              _operators: FilterUserOperatorsInput
              OR: [FilterUserInput!]
              AND: [FilterUserInput!]
            }"#};

        let input = ctx.registry.get("FilterUserInput").unwrap();
        assert_eq!(input.to_string(), expected);
        assert_eq!(
            input.as_input_object().and_then(|input| input.field("name")).and_then(|field| field.rename.as_deref()),
            Some("n")
        );

        let expected = indoc! {"
            input FilterUserAgeOperatorsInput {
              gt: Int
              gte: Int
              lt: Int
              lte: Int
              ne: Int
              in: [Int]
              nin: [Int]
              exists: Boolean
            }"};

        assert_eq!(ctx.registry.get("FilterUserAgeOperatorsInput").unwrap().to_string(), expected);
        assert!(!ctx.registry.contains("FilterUserMetaOperatorsInput"));
    }

    #[test]
    fn unknown_removed_field() {
        let ctx = test_context(schema());
        let opts = FilterOpts {
            remove_fields: vec!["nope".into()],
            ..Default::default()
        };

        assert!(matches!(build(&ctx, "FilterUserInput", &opts), Err(ResolverError::Schema(_))));
    }

    #[test]
    fn aliases_translate_to_storage_names() {
        assert_eq!(conditions_of(json!({ "name": "Ann" })), vec![Condition::eq("n", "Ann")]);
        assert_eq!(conditions_of(json!({ "n": "Ann" })), vec![Condition::eq("n", "Ann")]);
    }

    #[test]
    fn combinators_and_operators() {
        let conditions = conditions_of(json!({
            "OR": [{ "name": "Ann" }, { "age": 3 }],
            "_operators": { "age": { "gte": 18, "in": [18, 21], "exists": true } }
        }));

        assert_eq!(
            conditions,
            vec![
                Condition::Or(vec![
                    Condition::And(vec![Condition::eq("n", "Ann")]),
                    Condition::And(vec![Condition::eq("age", 3)]),
                ]),
                Condition::compare("age", ComparisonOperator::Gte, 18),
                Condition::is_in("age", [json!(18), json!(21)]),
                Condition::Exists {
                    field: "age".into(),
                    exists: true
                },
            ]
        );
    }

    #[test]
    fn malformed_filters() {
        let ctx = test_context(schema());

        for filter in [
            json!({ "nope": 1 }),
            json!({ "AND": { "name": "Ann" } }),
            json!({ "_operators": { "age": { "between": [1, 2] } } }),
            json!({ "_operators": { "age": { "in": 3 } } }),
        ] {
            let mut query = Query::find("users");
            let error = apply(&ctx, &mut query, Some(&filter)).unwrap_err();
            assert!(matches!(error, ResolverError::Argument(_)), "{filter}");
        }
    }
}
