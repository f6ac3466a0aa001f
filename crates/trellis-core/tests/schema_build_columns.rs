use pretty_assertions::assert_eq;
use serde_json::json;
use trellis_core::{
    schema::{
        app,
        db::{ColumnDefault, Type},
        Schema,
    },
    stmt::{Expr, Value},
};

fn build(value: serde_json::Value) -> Schema {
    let app: app::Schema = serde_json::from_value(value).unwrap();
    Schema::builder().build(app).unwrap()
}

fn single_table(fields: serde_json::Value) -> Schema {
    build(json!({
        "tables": [{ "id": 1, "name": "items", "fields": fields }]
    }))
}

#[test]
fn type_map() {
    let schema = single_table(json!([
        { "id": 1, "name": "title", "type": "single-line-text", "maxLength": 80 },
        { "id": 2, "name": "body", "type": "long-text" },
        { "id": 3, "name": "notes", "type": "rich-text" },
        { "id": 4, "name": "contact", "type": "email" },
        { "id": 5, "name": "site", "type": "url" },
        { "id": 6, "name": "phone", "type": "phone-number" },
        { "id": 7, "name": "qty", "type": "integer" },
        { "id": 8, "name": "price", "type": "currency", "precision": 12, "scale": 2 },
        { "id": 9, "name": "ratio", "type": "decimal" },
        { "id": 10, "name": "discount", "type": "percentage" },
        { "id": 11, "name": "stars", "type": "rating" },
        { "id": 12, "name": "active", "type": "checkbox" },
        { "id": 13, "name": "due", "type": "date" },
        { "id": 14, "name": "starts", "type": "datetime" },
        { "id": 15, "name": "alarm", "type": "time" },
        { "id": 16, "name": "ref", "type": "uuid" },
        { "id": 17, "name": "kind", "type": "single-select", "options": ["a", "b"] },
        { "id": 18, "name": "labels", "type": "multi-select", "options": ["x"] },
        { "id": 19, "name": "state", "type": "status", "options": ["open"] },
        { "id": 20, "name": "photo", "type": "single-attachment" },
        { "id": 21, "name": "files", "type": "multiple-attachments" },
        { "id": 22, "name": "meta", "type": "json" },
        { "id": 23, "name": "created", "type": "created-at" },
        { "id": 24, "name": "updated", "type": "updated-at" },
        { "id": 25, "name": "deleted", "type": "deleted-at" },
        { "id": 26, "name": "number", "type": "autonumber" }
    ]));

    let table = &schema.db.tables[0];
    let types: Vec<_> = table
        .columns
        .iter()
        .map(|column| (column.name.as_str(), column.ty.clone()))
        .collect();

    assert_eq!(
        types,
        [
            ("id", Type::Integer(8)),
            ("title", Type::VarChar(80)),
            ("body", Type::Text),
            ("notes", Type::Text),
            ("contact", Type::VarChar(255)),
            ("site", Type::VarChar(255)),
            ("phone", Type::VarChar(255)),
            ("qty", Type::Integer(4)),
            ("price", Type::Numeric(Some((12, 2)))),
            ("ratio", Type::Numeric(Some((10, 2)))),
            ("discount", Type::Numeric(Some((5, 2)))),
            ("stars", Type::Integer(2)),
            ("active", Type::Boolean),
            ("due", Type::Date),
            ("starts", Type::TimestampTz),
            ("alarm", Type::Time),
            ("ref", Type::Uuid),
            ("kind", Type::VarChar(255)),
            ("labels", Type::TextArray),
            ("state", Type::VarChar(255)),
            ("photo", Type::Jsonb),
            ("files", Type::Jsonb),
            ("meta", Type::Jsonb),
            ("created", Type::TimestampTz),
            ("updated", Type::TimestampTz),
            ("deleted", Type::TimestampTz),
            ("number", Type::Integer(4)),
        ]
    );
}

#[test]
fn implicit_id_is_identity_primary_key() {
    let schema = single_table(json!([{ "id": 1, "name": "title", "type": "long-text" }]));
    let table = &schema.db.tables[0];
    let id = table.column_by_name("id").unwrap();

    assert!(id.identity);
    assert!(id.primary_key);
    assert!(id.read_only);
    assert!(!id.nullable);
    assert_eq!(table.primary_key.name, "pk_items");
    assert_eq!(table.primary_key.columns, [id.id]);
}

#[test]
fn defaults_and_nullability() {
    let schema = single_table(json!([
        { "id": 1, "name": "active", "type": "checkbox" },
        { "id": 2, "name": "archived", "type": "checkbox", "default": true },
        { "id": 3, "name": "created", "type": "created-at" },
        { "id": 4, "name": "deleted", "type": "deleted-at" },
        { "id": 5, "name": "ref", "type": "uuid" },
        { "id": 6, "name": "title", "type": "single-line-text", "required": true, "default": "untitled" },
        { "id": 7, "name": "number", "type": "autonumber" }
    ]));
    let table = &schema.db.tables[0];
    let column = |name| table.column_by_name(name).unwrap();

    assert_eq!(column("active").default, Some(ColumnDefault::Value(Value::Bool(false))));
    assert!(!column("active").nullable);
    assert_eq!(column("archived").default, Some(ColumnDefault::Value(Value::Bool(true))));
    assert_eq!(column("created").default, Some(ColumnDefault::Now));
    assert!(column("created").read_only);
    assert!(column("deleted").nullable);
    assert_eq!(column("deleted").default, None);
    assert_eq!(column("ref").default, Some(ColumnDefault::RandomUuid));
    assert!(!column("title").nullable);
    assert_eq!(column("title").default, Some(ColumnDefault::Value(Value::from("untitled"))));
    assert!(column("number").identity);
    assert!(column("number").read_only);
}

#[test]
fn checks_unique_and_indexes() {
    let schema = single_table(json!([
        { "id": 1, "name": "email", "type": "email", "unique": true, "indexed": true },
        { "id": 2, "name": "qty", "type": "integer", "min": 0, "max": 10 },
        { "id": 3, "name": "stars", "type": "rating", "max": 3 },
        { "id": 4, "name": "kind", "type": "single-select", "options": ["a", "b"] },
        { "id": 5, "name": "number", "type": "autonumber" }
    ]));
    let table = &schema.db.tables[0];

    let checks: Vec<_> = table.checks.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        checks,
        [
            "ck_items_email_format",
            "ck_items_qty_range",
            "ck_items_stars_range",
            "ck_items_kind_options",
        ]
    );

    assert_eq!(
        table.checks[1].expr,
        Expr::and_from_vec(vec![
            Expr::ge(Expr::column("qty"), 0i64),
            Expr::le(Expr::column("qty"), 10i64),
        ])
    );
    assert_eq!(
        table.checks[3].expr,
        Expr::in_list(Expr::column("kind"), vec![Value::from("a"), Value::from("b")])
    );

    let uniques: Vec<_> = table.uniques.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(uniques, ["uq_items_email", "uq_items_number"]);

    let indices: Vec<_> = table.indices.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(indices, ["idx_items_email"]);
}

#[test]
fn declared_keys_and_prefix() {
    let app: app::Schema = serde_json::from_value(json!({
        "tables": [{
            "id": 1,
            "name": "members",
            "fields": [
                { "id": 1, "name": "org", "type": "integer" },
                { "id": 2, "name": "login", "type": "single-line-text" },
                { "id": 3, "name": "team", "type": "single-line-text" }
            ],
            "primaryKey": { "fields": ["org", "login"] },
            "indexes": [{ "fields": ["team", "login"] }],
            "uniqueConstraints": [{ "fields": ["org", "team"] }]
        }]
    }))
    .unwrap();

    let schema = Schema::builder().table_name_prefix("app_").build(app).unwrap();
    let table = &schema.db.tables[0];

    assert_eq!(table.name, "app_members");
    assert!(table.column_by_name("id").is_none());
    assert_eq!(table.primary_key.name, "pk_app_members");

    let pk: Vec<_> = table.primary_key_columns().map(|c| c.name.as_str()).collect();
    assert_eq!(pk, ["org", "login"]);
    assert!(!table.column_by_name("org").unwrap().nullable);

    assert_eq!(table.indices[0].name, "idx_app_members_team_login");
    assert_eq!(table.uniques[0].name, "uq_app_members_org_team");
}

#[test]
fn long_generated_names_are_rejected() {
    let long = "a".repeat(60);
    let app: app::Schema = serde_json::from_value(json!({
        "tables": [{
            "id": 1,
            "name": "t",
            "fields": [{ "id": 1, "name": long, "type": "email", "unique": true }]
        }]
    }))
    .unwrap();

    let err = Schema::builder().build(app).unwrap_err();
    assert!(err.is_invalid_schema());
    assert!(err.to_string().contains("exceeds 63 characters"));
}

#[test]
fn view_and_table_names_collide() {
    let app: app::Schema = serde_json::from_value(json!({
        "tables": [
            {
                "id": 1,
                "name": "tasks",
                "fields": [{ "id": 1, "name": "title", "type": "long-text" }],
                "views": [{ "id": "open", "name": "Open" }]
            },
            { "id": 2, "name": "tasks_open" }
        ]
    }))
    .unwrap();

    let err = Schema::builder().build(app).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid schema: view name `tasks_open` collides with another table, view, or index"
    );
}
