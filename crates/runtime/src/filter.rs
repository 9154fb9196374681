use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::AsRefStr, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ComparisonOperator {
    Gt,
    Gte,
    Lt,
    Lte,
    Ne,
}

/// A condition on stored documents. Field names are always storage names.
///
/// A query holds a list of these which must all match. Disjunctions and nested
/// conjunctions are expressed with [`Condition::Or`] and [`Condition::And`].
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// The field equals the value. For array fields, any element equal to the value
    /// matches. A `null` value also matches a missing field.
    Eq { field: String, value: Value },
    Compare {
        field: String,
        operator: ComparisonOperator,
        value: Value,
    },
    In { field: String, values: Vec<Value> },
    NotIn { field: String, values: Vec<Value> },
    Exists { field: String, exists: bool },
    And(Vec<Condition>),
    Or(Vec<Condition>),
}

impl Condition {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn compare(field: impl Into<String>, operator: ComparisonOperator, value: impl Into<Value>) -> Self {
        Self::Compare {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    pub fn is_in(field: impl Into<String>, values: impl IntoIterator<Item = Value>) -> Self {
        Self::In {
            field: field.into(),
            values: values.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_names() {
        assert_eq!(ComparisonOperator::Gte.to_string(), "gte");
        assert_eq!("ne".parse::<ComparisonOperator>().unwrap(), ComparisonOperator::Ne);
    }
}
