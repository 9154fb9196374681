mod common;

use std::sync::Arc;

use common::user_schema;
use model_resolvers::{GenResolverOpts, Model, ResolverOpts, TypeRegistry};
use runtime::storage::Storage;
use runtime_local::InMemoryStorage;

#[test]
fn concurrent_models_share_synthesized_types() {
    let registry = Arc::new(TypeRegistry::new());
    let storage: Arc<dyn Storage> = Arc::new(InMemoryStorage::new());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = registry.clone();
            let storage = storage.clone();

            std::thread::spawn(move || {
                let model = Model::new(user_schema(), storage, registry).unwrap();
                let update_one = model.update_one(&ResolverOpts::default()).unwrap();

                (model.output_type().clone(), update_one.output_type.unwrap())
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|handle| handle.join().unwrap()).collect();
    let (user, payload) = &results[0];

    for (other_user, other_payload) in &results {
        assert!(Arc::ptr_eq(user, other_user));
        assert!(Arc::ptr_eq(payload, other_payload));
    }

    assert!(Arc::ptr_eq(payload, &registry.get("UpdateOneUserPayload").unwrap()));
}

#[test]
fn generated_types() {
    let registry = Arc::new(TypeRegistry::new());
    let model = Model::new(user_schema(), Arc::new(InMemoryStorage::new()), registry.clone()).unwrap();

    model.generate(&GenResolverOpts::default()).unwrap();

    for name in [
        "User",
        "ValidationError",
        "ValidatorError",
        "FilterUserInput",
        "FilterUpdateOneUserInput",
        "FilterFindOneUserInput",
        "FilterFindManyUserInput",
        "FilterUserOperatorsInput",
        "FilterUserAgeOperatorsInput",
        "SortFindByIdsUserInput",
        "SortUpdateOneUserInput",
        "CreateOneUserInput",
        "CreateManyUserInput",
        "UpdateOneUserInput",
        "CreateOneUserPayload",
        "CreateManyUserPayload",
        "UpdateOneUserPayload",
    ] {
        assert!(registry.contains(name), "{name} is missing");
    }

    let expected = indoc::indoc! {r#"
        type UpdateOneUserPayload {
          "Updated document ID"
          recordId: MongoID
          "Updated document"
          record: User
          "Error that may occur during operation."
          error: ValidationError
        }"#};

    assert_eq!(registry.get("UpdateOneUserPayload").unwrap().to_string(), expected);
    assert!(registry.export_sdl().contains("input CreateManyUserInput {"));
}

#[test]
fn configured_type_names_and_options() {
    let registry = Arc::new(TypeRegistry::new());
    let model = Model::new(user_schema(), Arc::new(InMemoryStorage::new()), registry.clone()).unwrap();

    let opts = GenResolverOpts::from_toml_str(indoc::indoc! {r#"
        [count.filter]
        type_name = "UserCountFilter"
        is_required = true
        operators = false

        [find_by_ids.limit]
        default_value = 10

        [create_one.record]
        remove_fields = ["_id", "role"]
    "#})
    .unwrap();

    let resolvers = model.generate(&opts).unwrap();

    assert_eq!(
        resolvers["count"].to_string(),
        "count(filter: UserCountFilter!): Int"
    );
    assert!(!registry.contains("UserCountFilterOperatorsInput"));
    assert_eq!(
        resolvers["findByIds"].arg("limit").and_then(|limit| limit.default_value.clone()),
        Some(serde_json::json!(10))
    );

    let create_input = registry.get("CreateOneUserInput").unwrap();
    assert!(create_input.as_input_object().unwrap().field("role").is_none());
}

#[test]
fn unknown_option_fields_fail_the_build() {
    let model = Model::new(user_schema(), Arc::new(InMemoryStorage::new()), Arc::new(TypeRegistry::new())).unwrap();

    let opts = GenResolverOpts::from_toml_str("[find_many.sort]\nremove_fields = [\"missing\"]").unwrap();

    let error = model.generate(&opts).unwrap_err();
    assert_eq!(error.to_string(), "Unknown field 'missing' in sort.remove_fields of User.");
}
