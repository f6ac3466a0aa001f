use serde_json::json;
use trellis_core::schema::app;

fn tasks(views: serde_json::Value) -> app::Schema {
    serde_json::from_value(json!({
        "tables": [{
            "id": 1,
            "name": "tasks",
            "fields": [
                { "id": 1, "name": "title", "type": "single-line-text" },
                { "id": 2, "name": "status", "type": "status", "options": ["todo", "done"] },
                { "id": 3, "name": "tags", "type": "multi-select", "options": ["red", "blue"] },
                { "id": 4, "name": "estimate", "type": "integer" }
            ],
            "views": views
        }]
    }))
    .unwrap()
}

fn messages(schema: &app::Schema) -> Vec<String> {
    match schema.verify() {
        Ok(()) => vec![],
        Err(err) => err.failures().iter().map(|f| f.message.clone()).collect(),
    }
}

#[test]
fn well_formed_views() {
    let schema = tasks(json!([
        {
            "id": "open",
            "name": "Open tasks",
            "filters": { "and": [
                { "field": "status", "operator": "notEquals", "value": "done" },
                { "field": "tags", "operator": "contains", "value": "red" },
                { "field": "title", "operator": "isNotEmpty" }
            ]},
            "sorts": [{ "field": "estimate", "direction": "desc" }],
            "fields": ["title", "status"],
            "isDefault": true
        },
        {
            "id": 2,
            "name": "By status",
            "groupBy": { "field": "status" },
            "filters": { "field": "status", "operator": "in", "value": ["todo"] }
        }
    ]));

    assert_eq!(messages(&schema), Vec::<String>::new());
}

#[test]
fn at_most_one_default_view() {
    let schema = tasks(json!([
        { "id": "a", "name": "A", "isDefault": true },
        { "id": "b", "name": "B", "isDefault": true }
    ]));

    assert_eq!(
        messages(&schema),
        ["at most one default view per table (found 2)"]
    );
}

#[test]
fn duplicate_and_unnamed_views() {
    let schema = tasks(json!([
        { "id": "All Tasks", "name": "All" },
        { "id": "all-tasks", "name": " " }
    ]));

    assert_eq!(
        messages(&schema),
        [
            "duplicate view id `all_tasks`",
            "view `all-tasks`: view name must not be empty",
        ]
    );
}

#[test]
fn filter_operator_value_mismatches() {
    let schema = tasks(json!([{
        "id": "broken",
        "name": "Broken",
        "filters": { "or": [
            { "field": "title", "operator": "isEmpty", "value": "x" },
            { "field": "status", "operator": "in", "value": "todo" },
            { "field": "title", "operator": "startsWith", "value": 3 },
            { "field": "estimate", "operator": "greaterThan" },
            { "field": "missing", "operator": "equals", "value": 1 }
        ]}
    }]));

    assert_eq!(
        messages(&schema),
        [
            "view `broken`: operator IsEmpty on `title` takes no value",
            "view `broken`: operator In on `status` requires an array value",
            "view `broken`: operator StartsWith on `title` requires a text value",
            "view `broken`: operator GreaterThan on `estimate` requires a value",
            "view `broken`: filter field `missing` does not exist",
        ]
    );
}

#[test]
fn sort_and_projection_fields_must_exist() {
    let schema = tasks(json!([{
        "id": "v",
        "name": "V",
        "sorts": [{ "field": "priority" }],
        "fields": ["title", "title", "owner"]
    }]));

    assert_eq!(
        messages(&schema),
        [
            "view `v`: sort field `priority` does not exist",
            "view `v`: field `owner` does not exist",
            "view `v`: field `title` listed more than once",
        ]
    );
}

fn typed(conditions: serde_json::Value) -> app::Schema {
    serde_json::from_value(json!({
        "tables": [{
            "id": 1,
            "name": "invoices",
            "fields": [
                { "id": 1, "name": "number", "type": "single-line-text" },
                { "id": 2, "name": "total", "type": "decimal" },
                { "id": 3, "name": "paid", "type": "checkbox" },
                { "id": 4, "name": "due", "type": "date" },
                { "id": 5, "name": "labels", "type": "multi-select", "options": ["urgent"] }
            ],
            "views": [{ "id": "v", "name": "V", "filters": { "and": conditions } }]
        }]
    }))
    .unwrap()
}

#[test]
fn text_operators_need_text_fields() {
    let schema = typed(json!([
        { "field": "total", "operator": "contains", "value": "5" },
        { "field": "due", "operator": "startsWith", "value": "2024" },
        { "field": "paid", "operator": "endsWith", "value": "e" },
        { "field": "id", "operator": "notContains", "value": "1" },
        { "field": "number", "operator": "contains", "value": "INV" },
        { "field": "labels", "operator": "contains", "value": "urgent" }
    ]));

    assert_eq!(
        messages(&schema),
        [
            "view `v`: operator Contains requires a text field; `total` is not text",
            "view `v`: operator StartsWith requires a text field; `due` is not text",
            "view `v`: operator EndsWith requires a text field; `paid` is not text",
            "view `v`: operator NotContains requires a text field; `id` is not text",
        ]
    );
}

#[test]
fn values_must_fit_the_column() {
    let schema = typed(json!([
        { "field": "total", "operator": "greaterThan", "value": "abc" },
        { "field": "id", "operator": "equals", "value": "7" },
        { "field": "number", "operator": "lessThan", "value": 10 },
        { "field": "paid", "operator": "equals", "value": "yes" },
        { "field": "paid", "operator": "greaterThan", "value": true },
        { "field": "total", "operator": "in", "value": [1, "two"] },
        { "field": "due", "operator": "greaterThanOrEqual", "value": "2024-01-01" },
        { "field": "total", "operator": "lessThanOrEqual", "value": 99.5 },
        { "field": "paid", "operator": "equals", "value": false },
        { "field": "number", "operator": "in", "value": ["INV-1", "INV-2"] }
    ]));

    assert_eq!(
        messages(&schema),
        [
            "view `v`: value abc does not match the type of `total`",
            "view `v`: value 7 does not match the type of `id`",
            "view `v`: value 10 does not match the type of `number`",
            "view `v`: value yes does not match the type of `paid`",
            "view `v`: operator GreaterThan cannot order `paid`",
            "view `v`: value [1, two] does not match the type of `total`",
        ]
    );
}

#[test]
fn mismatched_filter_fails_before_compiling() {
    let err = trellis_core::Schema::builder()
        .build(typed(json!([
            { "field": "total", "operator": "contains", "value": "5" }
        ])))
        .unwrap_err();

    assert!(err.is_schema_validation());
}
