use heck::{ToShoutySnakeCase, ToUpperCamelCase};

pub const ID_SCALAR: &str = "MongoID";

pub const INPUT_ARG_FILTER: &str = "filter";
pub const INPUT_ARG_SORT: &str = "sort";
pub const INPUT_ARG_LIMIT: &str = "limit";
pub const INPUT_ARG_SKIP: &str = "skip";
pub const INPUT_ARG_RECORD: &str = "record";
pub const INPUT_ARG_RECORDS: &str = "records";
pub const INPUT_ARG_IDS: &str = "_ids";
pub const INPUT_ARG_ID: &str = "_id";

pub const INPUT_FIELD_FILTER_AND: &str = "AND";
pub const INPUT_FIELD_FILTER_OR: &str = "OR";
pub const INPUT_FIELD_OPERATORS: &str = "_operators";

pub const INPUT_FIELD_OP_GT: &str = "gt";
pub const INPUT_FIELD_OP_GTE: &str = "gte";
pub const INPUT_FIELD_OP_LT: &str = "lt";
pub const INPUT_FIELD_OP_LTE: &str = "lte";
pub const INPUT_FIELD_OP_NE: &str = "ne";
pub const INPUT_FIELD_OP_IN: &str = "in";
pub const INPUT_FIELD_OP_NIN: &str = "nin";
pub const INPUT_FIELD_OP_EXISTS: &str = "exists";

pub const OUTPUT_FIELD_RECORD: &str = "record";
pub const OUTPUT_FIELD_RECORD_ID: &str = "recordId";
pub const OUTPUT_FIELD_RECORDS: &str = "records";
pub const OUTPUT_FIELD_RECORD_IDS: &str = "recordIds";
pub const OUTPUT_FIELD_CREATE_COUNT: &str = "createCount";
pub const OUTPUT_FIELD_ERROR: &str = "error";

pub const VALIDATION_ERROR_TYPE: &str = "ValidationError";
pub const VALIDATOR_ERROR_TYPE: &str = "ValidatorError";

pub const RESOLVER_COUNT: &str = "count";
pub const RESOLVER_CREATE_ONE: &str = "createOne";
pub const RESOLVER_CREATE_MANY: &str = "createMany";
pub const RESOLVER_UPDATE_ONE: &str = "updateOne";
pub const RESOLVER_FIND_BY_IDS: &str = "findByIds";
pub const RESOLVER_FIND_ONE: &str = "findOne";
pub const RESOLVER_FIND_MANY: &str = "findMany";
pub const RESOLVER_FIND_BY_ID: &str = "findById";

pub const SORT_ASC: &str = "ASC";
pub const SORT_DESC: &str = "DESC";

pub struct MetaNames;

/// CONVENTIONS:
///     - Inputs are suffixed by "Input", payloads by "Payload"
///     - The operation prefix comes before the model name
///     - All types/inputs must be PascalCase, all fields camelCase.
impl MetaNames {
    /// An operation name as a type prefix, `updateOne` becoming `UpdateOne`.
    pub fn prefix(operation: &str) -> String {
        operation.to_upper_camel_case()
    }

    //
    // FILTER
    //
    pub fn filter_input(prefix: &str, type_name: &str) -> String {
        format!("Filter{prefix}{type_name}Input")
    }

    pub fn filter_operators_input(filter_type_name: &str) -> String {
        format!("{}OperatorsInput", Self::strip_input(filter_type_name))
    }

    pub fn filter_field_operators_input(filter_type_name: &str, field: &str) -> String {
        format!(
            "{}{}OperatorsInput",
            Self::strip_input(filter_type_name),
            field.to_upper_camel_case()
        )
    }

    //
    // SORT
    //
    pub fn sort_input(prefix: &str, type_name: &str) -> String {
        format!("Sort{prefix}{type_name}Input")
    }

    /// `_id` and `ASC` give `_ID_ASC`, `createdAt` and `DESC` give `CREATED_AT_DESC`.
    pub fn sort_value(field: &str, direction: &str) -> String {
        let underscore = if field.starts_with('_') { "_" } else { "" };
        format!("{underscore}{}_{direction}", field.to_shouty_snake_case())
    }

    //
    // RECORD
    //
    pub fn record_input(prefix: &str, type_name: &str) -> String {
        format!("{prefix}{type_name}Input")
    }

    pub fn payload(prefix: &str, type_name: &str) -> String {
        format!("{prefix}{type_name}Payload")
    }

    fn strip_input(type_name: &str) -> &str {
        type_name.strip_suffix("Input").unwrap_or(type_name)
    }
}
