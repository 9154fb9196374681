mod common;

use common::TestModel;
use model_resolvers::ResolverError;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};

#[rstest]
#[case::missing(json!({}))]
#[case::null(json!({ "records": null }))]
#[case::empty(json!({ "records": [] }))]
#[case::not_a_list(json!({ "records": { "name": "Ann" } }))]
#[tokio::test]
async fn records_must_be_a_non_empty_list(#[case] args: Value) {
    let model = TestModel::new();

    let error = model.resolve("createMany", args).await.unwrap_err();

    assert_eq!(
        error.to_string(),
        "User.createMany resolver requires args.records to be an Array and must contain at least one record"
    );
    assert_eq!(model.storage.operation_count(), 0);
}

#[rstest]
#[case::empty_record(json!([{ "name": "Ann", "email": "a@example.com" }, {}]))]
#[case::not_an_object(json!([{ "name": "Ann", "email": "a@example.com" }, 42]))]
#[tokio::test]
async fn records_must_be_non_empty_objects(#[case] records: Value) {
    let model = TestModel::new();

    let error = model.resolve("createMany", json!({ "records": records })).await.unwrap_err();

    assert!(matches!(error, ResolverError::Argument(_)));
    assert_eq!(
        error.to_string(),
        "User.createMany resolver requires args.records to contain non-empty records, with at least one value"
    );
    assert_eq!(model.storage.operation_count(), 0);
}

#[tokio::test]
async fn records_with_only_null_values_pass_the_argument_check() {
    let model = TestModel::new();

    let error = model
        .resolve("createMany", json!({ "records": [{ "name": null }] }))
        .await
        .unwrap_err();

    assert!(matches!(error, ResolverError::ManyValidation(_)));
}

#[tokio::test]
async fn creates_every_record_in_order() {
    let model = TestModel::new();

    let payload = model
        .resolve(
            "createMany",
            json!({ "records": [
                { "name": "Ann", "email": "ann@example.com" },
                { "name": "Bob", "email": "bob@example.com", "role": "admin" },
                { "name": "Cid", "email": "cid@example.com", "age": 7 },
            ] }),
        )
        .await
        .unwrap();

    let stored = model.stored().await;
    let stored_ids: Vec<Value> = stored.iter().map(|doc| doc["_id"].clone()).collect();

    assert_eq!(payload["createCount"], json!(3));
    assert_eq!(payload["recordIds"], Value::Array(stored_ids));
    assert_eq!(
        payload["records"]
            .as_array()
            .unwrap()
            .iter()
            .map(|record| record["n"].clone())
            .collect::<Vec<_>>(),
        vec![json!("Ann"), json!("Bob"), json!("Cid")]
    );
    assert_eq!(stored[0]["role"], json!("user"));
    assert_eq!(stored[1]["role"], json!("admin"));
}

fn one_invalid_batch() -> Value {
    json!({ "records": [
        { "name": "Ann", "email": "ann@example.com" },
        { "name": "Bob", "role": "root" },
        { "name": "Cid", "email": "cid@example.com" },
    ] })
}

#[tokio::test]
async fn one_invalid_record_reported_in_the_payload() {
    let model = TestModel::new();

    let payload = model
        .resolve_selecting("createMany", one_invalid_batch(), &["createCount", "error"])
        .await
        .unwrap();

    assert_eq!(payload["createCount"], json!(3));
    assert_eq!(payload["records"], json!(null));
    assert_eq!(payload["recordIds"], json!(null));

    let errors = payload["error"].as_array().unwrap();
    assert_eq!(errors.len(), 3);
    assert_eq!(errors.iter().filter(|error| !error.is_null()).count(), 1);
    assert_eq!(
        errors[1]["message"],
        json!("User validation failed: email: Path `email` is required., role: `root` is not a valid enum value for path `role`.")
    );

    assert!(model.stored().await.is_empty());
}

#[tokio::test]
#[allow(clippy::panic)]
async fn one_invalid_record_raised_without_error_selection() {
    let model = TestModel::new();

    let error = model
        .resolve_selecting("createMany", one_invalid_batch(), &["records"])
        .await
        .unwrap_err();

    let ResolverError::ManyValidation(validation) = &error else {
        panic!("expected a batch validation error, got {error:?}");
    };

    assert_eq!(error.to_string(), "Cannot createMany some documents contain errors");
    assert_eq!(validation.errors.len(), 3);
    assert_eq!(validation.failed(), 1);
    assert!(model.stored().await.is_empty());
    assert_eq!(model.storage.operation_count(), 0);
}

#[tokio::test]
async fn duplicate_keys_abort_the_whole_batch() {
    let model = TestModel::new();

    let error = model
        .resolve(
            "createMany",
            json!({ "records": [
                { "name": "Ann", "email": "same@example.com" },
                { "name": "Bob", "email": "same@example.com" },
            ] }),
        )
        .await
        .unwrap_err();

    assert!(matches!(error, ResolverError::Storage(_)));
    assert!(model.stored().await.is_empty());
}

#[tokio::test]
async fn signature() {
    let model = TestModel::new();

    assert_eq!(
        model.resolver("createMany").to_string(),
        "createMany(records: [CreateManyUserInput!]!): CreateManyUserPayload"
    );
    assert_eq!(
        model.resolver("createMany").description.as_deref(),
        Some("Create many User documents, applying defaults, the before-record-mutate hook and validation")
    );
}
