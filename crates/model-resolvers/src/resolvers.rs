//! The generated operations.

pub(crate) mod count;
pub(crate) mod create_many;
pub(crate) mod create_one;
pub(crate) mod find_by_id;
pub(crate) mod find_by_ids;
pub(crate) mod find_many;
pub(crate) mod find_one;
mod payload;
pub(crate) mod update_one;

use serde_json::Value;

use crate::{error::ResolverError, params::ResolveParams};

pub(crate) enum Operation {
    Count(count::Count),
    CreateOne(create_one::CreateOne),
    CreateMany(create_many::CreateMany),
    UpdateOne(update_one::UpdateOne),
    FindByIds(find_by_ids::FindByIds),
    FindOne(find_one::FindOne),
    FindMany(find_many::FindMany),
    FindById(find_by_id::FindById),
}

impl Operation {
    pub(crate) fn model(&self) -> &str {
        match self {
            Operation::Count(op) => op.ctx.type_name(),
            Operation::CreateOne(op) => op.ctx.type_name(),
            Operation::CreateMany(op) => op.ctx.type_name(),
            Operation::UpdateOne(op) => op.ctx.type_name(),
            Operation::FindByIds(op) => op.ctx.type_name(),
            Operation::FindOne(op) => op.ctx.type_name(),
            Operation::FindMany(op) => op.ctx.type_name(),
            Operation::FindById(op) => op.ctx.type_name(),
        }
    }

    pub(crate) async fn execute(&self, params: ResolveParams) -> Result<Value, ResolverError> {
        match self {
            Operation::Count(op) => op.execute(params).await,
            Operation::CreateOne(op) => op.execute(params).await,
            Operation::CreateMany(op) => op.execute(params).await,
            Operation::UpdateOne(op) => op.execute(params).await,
            Operation::FindByIds(op) => op.execute(params).await,
            Operation::FindOne(op) => op.execute(params).await,
            Operation::FindMany(op) => op.execute(params).await,
            Operation::FindById(op) => op.execute(params).await,
        }
    }
}
