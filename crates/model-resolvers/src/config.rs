//! Options for resolver generation, loadable from TOML:
//!
//! ```toml
//! disabled = ["findMany"]
//!
//! [find_by_ids.limit]
//! default_value = 20
//! max = 50
//!
//! [update_one.filter]
//! remove_fields = ["secret"]
//! ```

use crate::names::{
    RESOLVER_COUNT, RESOLVER_CREATE_MANY, RESOLVER_CREATE_ONE, RESOLVER_FIND_BY_ID, RESOLVER_FIND_BY_IDS,
    RESOLVER_FIND_MANY, RESOLVER_FIND_ONE, RESOLVER_UPDATE_ONE,
};

const DEFAULT_LIMIT: i64 = 100;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid resolver configuration: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("unknown resolver '{0}' in the disabled list")]
    UnknownResolver(String),
}

/// Options for every generated resolver.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenResolverOpts {
    pub count: ResolverOpts,
    pub create_one: ResolverOpts,
    pub create_many: ResolverOpts,
    pub update_one: ResolverOpts,
    pub find_by_ids: ResolverOpts,
    pub find_one: ResolverOpts,
    pub find_many: ResolverOpts,
    pub find_by_id: ResolverOpts,
    /// Resolver names not to generate, e.g. `createMany`.
    pub disabled: Vec<String>,
}

impl GenResolverOpts {
    pub const RESOLVERS: [&'static str; 8] = [
        RESOLVER_COUNT,
        RESOLVER_CREATE_ONE,
        RESOLVER_CREATE_MANY,
        RESOLVER_UPDATE_ONE,
        RESOLVER_FIND_BY_IDS,
        RESOLVER_FIND_ONE,
        RESOLVER_FIND_MANY,
        RESOLVER_FIND_BY_ID,
    ];

    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let opts: GenResolverOpts = toml::from_str(input)?;

        if let Some(unknown) = opts.disabled.iter().find(|name| !Self::RESOLVERS.contains(&name.as_str())) {
            return Err(ConfigError::UnknownResolver(unknown.clone()));
        }

        Ok(opts)
    }

    pub fn is_enabled(&self, resolver: &str) -> bool {
        !self.disabled.iter().any(|disabled| disabled == resolver)
    }

    /// The options of a resolver, by resolver name.
    pub fn resolver(&self, resolver: &str) -> Option<&ResolverOpts> {
        match resolver {
            RESOLVER_COUNT => Some(&self.count),
            RESOLVER_CREATE_ONE => Some(&self.create_one),
            RESOLVER_CREATE_MANY => Some(&self.create_many),
            RESOLVER_UPDATE_ONE => Some(&self.update_one),
            RESOLVER_FIND_BY_IDS => Some(&self.find_by_ids),
            RESOLVER_FIND_ONE => Some(&self.find_one),
            RESOLVER_FIND_MANY => Some(&self.find_many),
            RESOLVER_FIND_BY_ID => Some(&self.find_by_id),
            _ => None,
        }
    }
}

/// Options of one resolver. Each resolver only looks at the parts it has arguments for.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverOpts {
    pub filter: FilterOpts,
    pub sort: SortOpts,
    pub limit: LimitOpts,
    pub record: RecordOpts,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterOpts {
    pub type_name: Option<String>,
    pub is_required: bool,
    /// External field names to leave out of the filter input.
    pub remove_fields: Vec<String>,
    /// Adds the `_operators` input with comparison operators per field.
    pub operators: bool,
}

impl Default for FilterOpts {
    fn default() -> Self {
        FilterOpts {
            type_name: None,
            is_required: false,
            remove_fields: Vec::new(),
            operators: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SortOpts {
    pub type_name: Option<String>,
    pub remove_fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LimitOpts {
    /// Applied when the caller passes no limit. Defaults to 100.
    pub default_value: i64,
    /// Larger requested limits are clamped to this.
    pub max: Option<i64>,
}

impl Default for LimitOpts {
    fn default() -> Self {
        LimitOpts {
            default_value: DEFAULT_LIMIT,
            max: None,
        }
    }
}

/// Unset options fall back to what suits the resolver: create resolvers require the
/// statically required fields, updateOne makes every field nullable.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecordOpts {
    pub type_name: Option<String>,
    /// Defaults to the identity field.
    pub remove_fields: Option<Vec<String>>,
    /// Defaults to the statically required fields of the schema.
    pub required_fields: Option<Vec<String>>,
    pub is_required: Option<bool>,
    pub all_fields_nullable: Option<bool>,
}
