use std::cmp::Ordering;

use serde_json::Value;

/// Compares two values of the same kind. Numbers compare numerically, strings
/// lexicographically. Values of different kinds are not comparable.
pub(crate) fn compare_values(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Number(left), Value::Number(right)) => left.as_f64()?.partial_cmp(&right.as_f64()?),
        (Value::String(left), Value::String(right)) => Some(left.cmp(right)),
        (Value::Bool(left), Value::Bool(right)) => Some(left.cmp(right)),
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        _ => None,
    }
}

pub(crate) fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(_), Value::Number(_)) => compare_values(left, right) == Some(Ordering::Equal),
        _ => left == right,
    }
}

/// A total order for sorting, following the cross-type ordering of document databases:
/// missing and null first, then numbers, strings, objects, arrays and booleans.
pub(crate) fn sort_order(left: Option<&Value>, right: Option<&Value>) -> Ordering {
    let left = left.unwrap_or(&Value::Null);
    let right = right.unwrap_or(&Value::Null);

    type_rank(left)
        .cmp(&type_rank(right))
        .then_with(|| compare_values(left, right).unwrap_or(Ordering::Equal))
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Number(_) => 1,
        Value::String(_) => 2,
        Value::Object(_) => 3,
        Value::Array(_) => 4,
        Value::Bool(_) => 5,
    }
}
