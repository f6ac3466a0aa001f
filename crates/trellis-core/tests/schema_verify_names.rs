use serde_json::json;
use trellis_core::schema::app;

fn schema(value: serde_json::Value) -> app::Schema {
    serde_json::from_value(value).unwrap()
}

fn single_table(name: &str) -> app::Schema {
    schema(json!({
        "tables": [{
            "id": 1,
            "name": name,
            "fields": [{ "id": 1, "name": "title", "type": "single-line-text" }]
        }]
    }))
}

#[test]
fn valid_table_names_are_accepted() {
    for name in ["products_123", "a", "order_items", "t1"] {
        assert!(single_table(name).verify().is_ok(), "{name}");
    }
}

#[test]
fn invalid_table_names_are_rejected() {
    for name in ["InvalidTable", "123_table", "table with spaces", "", "_x", "tablé"] {
        let err = single_table(name).verify().unwrap_err();
        assert!(err.is_schema_validation(), "{name}: {err}");
        assert_eq!(err.failures()[0].table.as_deref(), Some(name));
    }
}

#[test]
fn duplicate_table_names_and_ids() {
    let err = schema(json!({
        "tables": [
            { "id": 1, "name": "users" },
            { "id": 1, "name": "users" }
        ]
    }))
    .verify()
    .unwrap_err();

    let messages: Vec<_> = err.failures().iter().map(|f| f.to_string()).collect();
    assert_eq!(
        messages,
        ["table `users`: duplicate table name", "duplicate table id 1"]
    );
}

#[test]
fn field_names_ids_and_reserved_id() {
    let err = schema(json!({
        "tables": [{
            "id": 1,
            "name": "users",
            "fields": [
                { "id": 0, "name": "email", "type": "email" },
                { "id": 2, "name": "Email", "type": "email" },
                { "id": 2, "name": "email", "type": "email" }
            ]
        }]
    }))
    .verify()
    .unwrap_err();

    let messages: Vec<_> = err.failures().iter().map(|f| f.to_string()).collect();
    assert_eq!(
        messages,
        [
            "field `users.email`: field id 0 is reserved",
            "field `users.Email`: field name must match ^[a-z][a-z0-9_]*$",
            "field `users.email`: duplicate field name",
            "table `users`: duplicate field id 2",
        ]
    );
}

#[test]
fn every_failure_is_reported() {
    let err = schema(json!({
        "tables": [
            {
                "id": 1,
                "name": "Bad",
                "fields": [{ "id": 1, "name": "n", "type": "integer", "min": 10, "max": 1 }]
            },
            {
                "id": 2,
                "name": "items",
                "fields": [
                    { "id": 1, "name": "size", "type": "single-select", "options": [] },
                    { "id": 2, "name": "price", "type": "decimal", "precision": 4, "scale": 6 }
                ]
            }
        ]
    }))
    .verify()
    .unwrap_err();

    assert_eq!(err.failures().len(), 4);
    assert_eq!(
        err.to_string(),
        "schema validation failed: table `Bad`: table name must match ^[a-z][a-z0-9_]*$; \
         field `Bad.n`: max (1) is less than min (10); \
         field `items.size`: options must not be empty; \
         field `items.price`: scale (6) exceeds precision (4)"
    );
}

#[test]
fn unknown_field_type_fails_to_parse() {
    let res = serde_json::from_value::<app::Schema>(json!({
        "tables": [{
            "id": 1,
            "name": "users",
            "fields": [{ "id": 1, "name": "x", "type": "hologram" }]
        }]
    }));

    assert!(res.is_err());
}

#[test]
fn autonumber_at_most_once() {
    let err = schema(json!({
        "tables": [{
            "id": 1,
            "name": "tickets",
            "fields": [
                { "id": 1, "name": "number", "type": "autonumber" },
                { "id": 2, "name": "other", "type": "autonumber" }
            ]
        }]
    }))
    .verify()
    .unwrap_err();

    assert_eq!(
        err.failures()[0].to_string(),
        "table `tickets`: at most one autonumber field per table (found 2)"
    );
}

#[test]
fn permission_rules_reference_fields() {
    let err = schema(json!({
        "tables": [{
            "id": 1,
            "name": "notes",
            "fields": [{ "id": 1, "name": "body", "type": "long-text" }],
            "permissions": {
                "read": { "type": "owner", "field": "owner_id" },
                "update": { "type": "roles", "roles": [] },
                "fields": [{ "field": "missing", "read": { "type": "authenticated" } }]
            }
        }]
    }))
    .verify()
    .unwrap_err();

    let messages: Vec<_> = err.failures().iter().map(|f| f.to_string()).collect();
    assert_eq!(
        messages,
        [
            "table `notes`: permission rule references unknown field `owner_id`",
            "table `notes`: roles rule must list at least one role",
            "table `notes`: permission for unknown field `missing`",
        ]
    );
}
