//! Argument builders shared by the resolvers.
//!
//! Each builder contributes argument definitions, registering the input types they
//! refer to, and knows how to apply the matching runtime value to a query.

pub(crate) mod filter;
pub(crate) mod ids;
pub(crate) mod limit;
pub(crate) mod record;
pub(crate) mod skip;
pub(crate) mod sort;

use indexmap::IndexMap;

use crate::registry::MetaInputValue;

pub type ArgumentMap = IndexMap<String, MetaInputValue>;

pub(crate) fn argument_map(arguments: impl IntoIterator<Item = MetaInputValue>) -> ArgumentMap {
    arguments
        .into_iter()
        .map(|argument| (argument.name.clone(), argument))
        .collect()
}
