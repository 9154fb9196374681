use runtime::query::Query;
use serde_json::Value;

use crate::{config::LimitOpts, error::ResolverError, names::INPUT_ARG_LIMIT, registry::MetaInputValue};

/// The `limit` argument. Missing values take the default, values above `max` are
/// clamped and non-positive ones mean no limit at all, unless a `max` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LimitPolicy {
    default_value: i64,
    max: Option<i64>,
}

impl LimitPolicy {
    pub(crate) fn new(opts: &LimitOpts) -> Self {
        LimitPolicy {
            default_value: opts.default_value,
            max: opts.max.filter(|max| *max > 0),
        }
    }

    pub(crate) fn argument(&self) -> MetaInputValue {
        MetaInputValue::new(INPUT_ARG_LIMIT, "Int").with_default(self.default_value)
    }

    pub(crate) fn resolve(&self, value: Option<&Value>) -> Result<Option<u64>, ResolverError> {
        let requested = match value {
            None | Some(Value::Null) => self.default_value,
            Some(value) => value
                .as_i64()
                .ok_or_else(|| ResolverError::argument(format!("Int cannot represent non-integer value: {value}")))?,
        };

        let limit = match self.max {
            Some(max) if requested <= 0 || requested > max => max,
            _ => requested,
        };

        Ok(u64::try_from(limit).ok().filter(|limit| *limit > 0))
    }

    pub(crate) fn apply(&self, query: &mut Query, value: Option<&Value>) -> Result<(), ResolverError> {
        if let Some(limit) = self.resolve(value)? {
            query.set_limit(limit);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[case(None, None, Some(100))]
    #[case(Some(json!(5)), None, Some(5))]
    #[case(Some(json!(0)), None, None)]
    #[case(Some(json!(-3)), None, None)]
    #[case(Some(json!(500)), Some(50), Some(50))]
    #[case(Some(json!(0)), Some(50), Some(50))]
    #[case(Some(json!(null)), Some(50), Some(50))]
    fn resolves_limits(#[case] value: Option<Value>, #[case] max: Option<i64>, #[case] expected: Option<u64>) {
        let policy = LimitPolicy::new(&LimitOpts {
            default_value: 100,
            max,
        });

        assert_eq!(policy.resolve(value.as_ref()).unwrap(), expected);
    }

    #[test]
    fn rejects_non_integers() {
        let policy = LimitPolicy::new(&LimitOpts::default());
        assert!(policy.resolve(Some(&json!("ten"))).is_err());
    }

    #[test]
    fn argument_carries_the_default() {
        let policy = LimitPolicy::new(&LimitOpts::default());
        assert_eq!(policy.argument().to_string(), "limit: Int = 100");
    }
}
