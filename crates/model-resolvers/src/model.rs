use std::sync::Arc;

use indexmap::IndexMap;
use runtime::{storage::Storage, ID_FIELD};

use crate::{
    alias::AliasTable,
    config::{GenResolverOpts, ResolverOpts},
    error::ResolverError,
    names::{
        RESOLVER_COUNT, RESOLVER_CREATE_MANY, RESOLVER_CREATE_ONE, RESOLVER_FIND_BY_ID, RESOLVER_FIND_BY_IDS,
        RESOLVER_FIND_MANY, RESOLVER_FIND_ONE, RESOLVER_UPDATE_ONE,
    },
    registry::{self, MetaField, MetaType, ObjectType, TypeRegistry},
    resolver::Resolver,
    resolvers,
    schema::{EntitySchema, FieldDefinition},
};

/// What every resolver of one model shares.
pub(crate) struct ModelContext {
    pub(crate) schema: Arc<EntitySchema>,
    pub(crate) registry: Arc<TypeRegistry>,
    pub(crate) storage: Arc<dyn Storage>,
    pub(crate) output_type: Arc<MetaType>,
}

impl ModelContext {
    pub(crate) fn type_name(&self) -> &str {
        self.schema.name()
    }

    pub(crate) fn collection(&self) -> &str {
        self.schema.collection()
    }

    pub(crate) fn aliases(&self) -> &AliasTable {
        self.schema.aliases()
    }

    /// Fails on names that are not fields of the model.
    pub(crate) fn check_fields(&self, names: &[String], option: &str) -> Result<(), ResolverError> {
        match names.iter().find(|name| self.schema.find_field(name).is_none()) {
            Some(unknown) => Err(ResolverError::Schema(format!(
                "Unknown field '{unknown}' in {option} of {}.",
                self.type_name()
            ))),
            None => Ok(()),
        }
    }

    /// The fields of the model minus `removed`, given by either name.
    pub(crate) fn fields_except<'a>(
        &'a self,
        removed: &[String],
        option: &str,
    ) -> Result<Vec<&'a FieldDefinition>, ResolverError> {
        self.check_fields(removed, option)?;

        Ok(self
            .schema
            .fields()
            .iter()
            .filter(|field| {
                !removed
                    .iter()
                    .any(|name| name == &field.name || name == field.external_name())
            })
            .collect())
    }
}

/// Generates resolvers for one entity.
///
/// Creating a model registers its output type, named after the entity, in the shared
/// registry. Each resolver method then synthesizes the input and payload types it needs
/// and returns a self-contained [`Resolver`].
pub struct Model {
    ctx: Arc<ModelContext>,
}

impl Model {
    pub fn new(
        schema: EntitySchema,
        storage: Arc<dyn Storage>,
        registry: Arc<TypeRegistry>,
    ) -> Result<Self, ResolverError> {
        let output_type = registry.get_or_create(schema.name(), |_| Ok::<_, ResolverError>(entity_type(&schema).into()))?;

        if output_type.as_object().is_none() {
            return Err(registry::kind_mismatch(&output_type, "object"));
        }

        registry.register_validation_types()?;

        tracing::debug!(model = schema.name(), collection = schema.collection(), "model ready");

        Ok(Model {
            ctx: Arc::new(ModelContext {
                schema: Arc::new(schema),
                registry,
                storage,
                output_type,
            }),
        })
    }

    pub fn type_name(&self) -> &str {
        self.ctx.type_name()
    }

    pub fn schema(&self) -> &EntitySchema {
        &self.ctx.schema
    }

    pub fn output_type(&self) -> &Arc<MetaType> {
        &self.ctx.output_type
    }

    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.ctx.registry
    }

    pub fn count(&self, opts: &ResolverOpts) -> Result<Resolver, ResolverError> {
        self.built(resolvers::count::build(&self.ctx, opts))
    }

    pub fn create_one(&self, opts: &ResolverOpts) -> Result<Resolver, ResolverError> {
        self.built(resolvers::create_one::build(&self.ctx, opts))
    }

    pub fn create_many(&self, opts: &ResolverOpts) -> Result<Resolver, ResolverError> {
        self.built(resolvers::create_many::build(&self.ctx, opts))
    }

    pub fn update_one(&self, opts: &ResolverOpts) -> Result<Resolver, ResolverError> {
        self.built(resolvers::update_one::build(&self.ctx, opts))
    }

    pub fn find_by_ids(&self, opts: &ResolverOpts) -> Result<Resolver, ResolverError> {
        self.built(resolvers::find_by_ids::build(&self.ctx, opts))
    }

    pub fn find_one(&self, opts: &ResolverOpts) -> Result<Resolver, ResolverError> {
        self.built(resolvers::find_one::build(&self.ctx, opts))
    }

    pub fn find_many(&self, opts: &ResolverOpts) -> Result<Resolver, ResolverError> {
        self.built(resolvers::find_many::build(&self.ctx, opts))
    }

    pub fn find_by_id(&self, opts: &ResolverOpts) -> Result<Resolver, ResolverError> {
        self.built(resolvers::find_by_id::build(&self.ctx, opts))
    }

    /// Every resolver not disabled in `opts`, keyed by name, in a fixed order.
    pub fn generate(&self, opts: &GenResolverOpts) -> Result<IndexMap<String, Resolver>, ResolverError> {
        type Builder = fn(&Model, &ResolverOpts) -> Result<Resolver, ResolverError>;

        let builders: [(&str, Builder, &ResolverOpts); 8] = [
            (RESOLVER_COUNT, Model::count, &opts.count),
            (RESOLVER_CREATE_ONE, Model::create_one, &opts.create_one),
            (RESOLVER_CREATE_MANY, Model::create_many, &opts.create_many),
            (RESOLVER_UPDATE_ONE, Model::update_one, &opts.update_one),
            (RESOLVER_FIND_BY_IDS, Model::find_by_ids, &opts.find_by_ids),
            (RESOLVER_FIND_ONE, Model::find_one, &opts.find_one),
            (RESOLVER_FIND_MANY, Model::find_many, &opts.find_many),
            (RESOLVER_FIND_BY_ID, Model::find_by_id, &opts.find_by_id),
        ];

        let mut resolvers = IndexMap::new();

        for (name, build, resolver_opts) in builders {
            if opts.is_enabled(name) {
                resolvers.insert(name.to_string(), build(self, resolver_opts)?);
            }
        }

        Ok(resolvers)
    }

    fn built(&self, resolver: Result<Resolver, ResolverError>) -> Result<Resolver, ResolverError> {
        if let Ok(resolver) = &resolver {
            tracing::debug!(model = self.type_name(), resolver = %resolver.name, ty = %resolver.ty, "built resolver");
        }

        resolver
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
pub(crate) fn test_context(schema: EntitySchema) -> Arc<ModelContext> {
    let storage = Arc::new(runtime_local::InMemoryStorage::new());

    match Model::new(schema, storage, Arc::new(TypeRegistry::new())) {
        Ok(model) => model.ctx,
        Err(error) => panic!("invalid test schema: {error}"),
    }
}

fn entity_type(schema: &EntitySchema) -> ObjectType {
    ObjectType::new(
        schema.name(),
        schema.fields().iter().map(|field| {
            let mut ty = field.ty.type_ref();

            if field.name == ID_FIELD || field.required.is_static() {
                ty.push('!');
            }

            MetaField {
                name: field.external_name().to_string(),
                mapped_name: field.alias.as_ref().map(|_| field.name.clone()),
                description: field.description.clone(),
                ty,
            }
        }),
    )
}
