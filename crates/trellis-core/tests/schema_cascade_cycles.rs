use serde_json::json;
use trellis_core::schema::{app, Schema};

fn schema(value: serde_json::Value) -> app::Schema {
    serde_json::from_value(value).unwrap()
}

/// A table with one relationship field per `(name, related, on_delete)`.
fn table(id: u64, name: &str, relations: &[(&str, &str, &str)]) -> serde_json::Value {
    let fields: Vec<_> = relations
        .iter()
        .enumerate()
        .map(|(i, (field, related, on_delete))| {
            json!({
                "id": i + 1,
                "name": field,
                "type": "relationship",
                "relatedTable": related,
                "onDelete": on_delete
            })
        })
        .collect();

    json!({ "id": id, "name": name, "fields": fields })
}

#[test]
fn two_table_cycle_is_rejected() {
    let err = schema(json!({
        "tables": [
            table(1, "a", &[("b_id", "b", "cascade")]),
            table(2, "b", &[("a_id", "a", "cascade")]),
        ]
    }))
    .verify()
    .unwrap_err();

    assert!(err.is_cascade_cycle());
    assert_eq!(err.to_string(), "circular cascade delete detected: a -> b -> a");
    assert_eq!(err.cascade_cycle_path(), Some(&["a", "b", "a"].map(String::from)[..]));
}

#[test]
fn three_table_cycle_is_rejected() {
    let err = schema(json!({
        "tables": [
            table(1, "projects", &[("owner", "teams", "cascade")]),
            table(2, "teams", &[("org", "orgs", "cascade")]),
            table(3, "orgs", &[("flagship", "projects", "cascade")]),
        ]
    }))
    .verify()
    .unwrap_err();

    assert_eq!(
        err.to_string(),
        "circular cascade delete detected: projects -> teams -> orgs -> projects"
    );
}

#[test]
fn cycle_is_rejected_before_compiling() {
    let res = Schema::builder().build(schema(json!({
        "tables": [
            table(1, "a", &[("b_id", "b", "cascade")]),
            table(2, "b", &[("a_id", "a", "cascade")]),
        ]
    })));

    assert!(res.unwrap_err().is_cascade_cycle());
}

#[test]
fn self_reference_is_accepted() {
    let schema = schema(json!({
        "tables": [table(1, "categories", &[("parent", "categories", "cascade")])]
    }));

    assert!(schema.verify().is_ok());
}

#[test]
fn restrict_breaks_the_cycle() {
    let schema = schema(json!({
        "tables": [
            table(1, "a", &[("b_id", "b", "cascade")]),
            table(2, "b", &[("a_id", "a", "restrict")]),
        ]
    }));

    assert!(schema.verify().is_ok());
}

#[test]
fn set_null_breaks_the_cycle() {
    let schema = schema(json!({
        "tables": [
            table(1, "a", &[("b_id", "b", "cascade")]),
            table(2, "b", &[("a_id", "a", "set-null")]),
        ]
    }));

    assert!(schema.verify().is_ok());
}

#[test]
fn cycle_through_self_reference_and_another_table() {
    let err = schema(json!({
        "tables": [
            table(1, "a", &[("parent", "a", "cascade"), ("b_id", "b", "cascade")]),
            table(2, "b", &[("a_id", "a", "cascade")]),
        ]
    }))
    .verify()
    .unwrap_err();

    assert_eq!(err.to_string(), "circular cascade delete detected: a -> b -> a");
}

#[test]
fn many_to_many_does_not_form_a_cycle() {
    let schema = schema(json!({
        "tables": [
            {
                "id": 1,
                "name": "students",
                "fields": [{
                    "id": 1,
                    "name": "courses",
                    "type": "relationship",
                    "relatedTable": "courses",
                    "relationType": "many-to-many"
                }]
            },
            {
                "id": 2,
                "name": "courses",
                "fields": [{
                    "id": 1,
                    "name": "students",
                    "type": "relationship",
                    "relatedTable": "students",
                    "relationType": "many-to-many"
                }]
            }
        ]
    }));

    assert!(schema.verify().is_ok());
}

#[test]
fn table_level_foreign_keys_take_part() {
    let err = schema(json!({
        "tables": [
            table(1, "a", &[("b_id", "b", "cascade")]),
            {
                "id": 2,
                "name": "b",
                "fields": [{ "id": 1, "name": "a_ref", "type": "integer" }],
                "foreignKeys": [{
                    "fields": ["a_ref"],
                    "relatedTable": "a",
                    "relatedFields": ["id"],
                    "onDelete": "cascade"
                }]
            }
        ]
    }))
    .verify()
    .unwrap_err();

    assert!(err.is_cascade_cycle());
}
