mod common;

use common::seeded;
use rstest::rstest;
use serde_json::{json, Value};

#[tokio::test]
async fn counts_everything_without_a_filter() {
    let model = seeded().await;

    assert_eq!(model.resolve("count", json!({})).await.unwrap(), json!(3));
    assert_eq!(model.resolve("count", json!({ "filter": null })).await.unwrap(), json!(3));
}

#[rstest]
#[case(json!({ "role": "user" }), 2)]
#[case(json!({ "name": "Ann" }), 1)]
#[case(json!({ "n": "Ann" }), 1)]
#[case(json!({ "_operators": { "age": { "gt": 25 } } }), 2)]
#[case(json!({ "OR": [{ "name": "Ann" }, { "name": "Bob" }] }), 2)]
#[case(json!({ "AND": [{ "role": "user" }, { "_operators": { "age": { "lt": 30 } } }] }), 1)]
#[case(json!({ "name": "Nobody" }), 0)]
#[tokio::test]
async fn counts_matches(#[case] filter: Value, #[case] expected: u64) {
    let model = seeded().await;

    let count = model.resolve("count", json!({ "filter": filter })).await.unwrap();

    assert_eq!(count, json!(expected));
}

#[tokio::test]
async fn signature() {
    let model = seeded().await;

    assert_eq!(model.resolver("count").to_string(), "count(filter: FilterUserInput): Int");
}
