use std::cmp::Ordering;

use runtime::{
    filter::{ComparisonOperator, Condition},
    JsonMap,
};
use serde_json::Value;

use crate::order::{compare_values, values_equal};

pub(crate) fn matches_all(document: &JsonMap, conditions: &[Condition]) -> bool {
    conditions.iter().all(|condition| matches(document, condition))
}

pub(crate) fn matches(document: &JsonMap, condition: &Condition) -> bool {
    match condition {
        Condition::Eq { field, value } => equals(lookup(document, field), value),
        Condition::Compare { field, operator, value } => compare(lookup(document, field), *operator, value),
        Condition::In { field, values } => {
            let actual = lookup(document, field);
            values.iter().any(|value| equals(actual, value))
        }
        Condition::NotIn { field, values } => {
            let actual = lookup(document, field);
            !values.iter().any(|value| equals(actual, value))
        }
        Condition::Exists { field, exists } => lookup(document, field).is_some() == *exists,
        Condition::And(conditions) => matches_all(document, conditions),
        Condition::Or(conditions) => conditions.iter().any(|condition| matches(document, condition)),
    }
}

/// Resolves a dotted path, e.g. `address.city`.
pub(crate) fn lookup<'a>(document: &'a JsonMap, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = document.get(segments.next()?)?;

    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }

    Some(current)
}

fn equals(actual: Option<&Value>, expected: &Value) -> bool {
    match (actual, expected) {
        (None | Some(Value::Null), Value::Null) => true,
        (None, _) => false,
        (Some(Value::Array(items)), expected) if !expected.is_array() => {
            items.iter().any(|item| values_equal(item, expected))
        }
        (Some(actual), expected) => values_equal(actual, expected),
    }
}

fn compare(actual: Option<&Value>, operator: ComparisonOperator, expected: &Value) -> bool {
    if operator == ComparisonOperator::Ne {
        return !equals(actual, expected);
    }

    let Some(actual) = actual else { return false };

    if let Value::Array(items) = actual {
        return items.iter().any(|item| compare(Some(item), operator, expected));
    }

    match (operator, compare_values(actual, expected)) {
        (ComparisonOperator::Gt, Some(Ordering::Greater)) => true,
        (ComparisonOperator::Gte, Some(Ordering::Greater | Ordering::Equal)) => true,
        (ComparisonOperator::Lt, Some(Ordering::Less)) => true,
        (ComparisonOperator::Lte, Some(Ordering::Less | Ordering::Equal)) => true,
        _ => false,
    }
}
