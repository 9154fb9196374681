use runtime::ID_FIELD;

use crate::{
    config::RecordOpts,
    error::ResolverError,
    model::ModelContext,
    names::MetaNames,
    registry::{kind_mismatch, InputObjectType, MetaInputValue},
};

/// What a resolver falls back to for record options left unset.
pub(crate) struct RecordDefaults<'a> {
    pub(crate) prefix: &'a str,
    pub(crate) is_required: bool,
    pub(crate) all_fields_nullable: bool,
}

pub(crate) struct RecordInput {
    pub(crate) type_name: String,
    pub(crate) is_required: bool,
}

/// Registers the record input type of a create or update resolver.
pub(crate) fn build(
    ctx: &ModelContext,
    opts: &RecordOpts,
    defaults: RecordDefaults<'_>,
) -> Result<RecordInput, ResolverError> {
    let type_name = opts
        .type_name
        .clone()
        .unwrap_or_else(|| MetaNames::record_input(defaults.prefix, ctx.type_name()));

    let removed = opts.remove_fields.clone().unwrap_or_else(|| vec![ID_FIELD.to_string()]);
    let fields = ctx.fields_except(&removed, "record.remove_fields")?;

    let required: Vec<String> = match &opts.required_fields {
        Some(required) => {
            ctx.check_fields(required, "record.required_fields")?;

            required
                .iter()
                .filter_map(|name| ctx.schema.find_field(name))
                .map(|field| field.name.clone())
                .collect()
        }
        None => ctx.schema.required_fields(),
    };

    let all_fields_nullable = opts.all_fields_nullable.unwrap_or(defaults.all_fields_nullable);

    let input = ctx.registry.get_or_create(&type_name, |_| {
        let input_fields = fields.iter().map(|field| {
            let mut ty = field.ty.type_ref();

            if !all_fields_nullable && required.contains(&field.name) {
                ty.push('!');
            }

            let mut input = MetaInputValue::new(field.external_name(), ty)
                .with_rename(field.alias.as_ref().map(|_| field.name.clone()));
            input.description = field.description.clone();

            input
        });

        Ok::<_, ResolverError>(InputObjectType::new(&type_name, input_fields).into())
    })?;

    if input.as_input_object().is_none() {
        return Err(kind_mismatch(&input, "input object"));
    }

    Ok(RecordInput {
        type_name,
        is_required: opts.is_required.unwrap_or(defaults.is_required),
    })
}
