use pretty_assertions::assert_eq;
use serde_json::json;
use trellis_core::schema::{
    app,
    db::{ReferentialAction, TableId, Type},
    Schema,
};

fn build(value: serde_json::Value) -> Schema {
    let app: app::Schema = serde_json::from_value(value).unwrap();
    Schema::builder().build(app).unwrap()
}

#[test]
fn many_to_one_adds_column_and_foreign_key() {
    let schema = build(json!({
        "tables": [
            { "id": 1, "name": "customers", "fields": [{ "id": 1, "name": "name", "type": "long-text" }] },
            {
                "id": 2,
                "name": "orders",
                "fields": [{
                    "id": 1,
                    "name": "customer",
                    "type": "relationship",
                    "relatedTable": "customers",
                    "onDelete": "cascade",
                    "required": true
                }]
            }
        ]
    }));

    let orders = schema.db.table_by_name("orders").unwrap();
    let customer = orders.column_by_name("customer").unwrap();
    assert_eq!(customer.ty, Type::Integer(8));
    assert!(!customer.nullable);

    let fk = &orders.foreign_keys[0];
    assert_eq!(fk.name, "fk_orders_customer");
    assert_eq!(fk.references, TableId::Declared(1));
    assert_eq!(fk.columns, [customer.id]);
    let customers = schema.db.table_by_name("customers").unwrap();
    assert_eq!(fk.referenced_columns, [customers.column_by_name("id").unwrap().id]);
    assert_eq!(fk.on_delete, ReferentialAction::Cascade);
    assert_eq!(fk.on_update, ReferentialAction::Restrict);
}

#[test]
fn relationship_takes_type_of_referenced_column() {
    let schema = build(json!({
        "tables": [
            {
                "id": 1,
                "name": "accounts",
                "fields": [{ "id": 1, "name": "code", "type": "single-line-text", "maxLength": 12, "unique": true }]
            },
            {
                "id": 2,
                "name": "invoices",
                "fields": [{
                    "id": 1,
                    "name": "account",
                    "type": "relationship",
                    "relatedTable": "accounts",
                    "relatedField": "code",
                    "onDelete": "set-null"
                }]
            }
        ]
    }));

    let invoices = schema.db.table_by_name("invoices").unwrap();
    assert_eq!(invoices.column_by_name("account").unwrap().ty, Type::VarChar(12));
    assert!(invoices.column_by_name("account").unwrap().nullable);
    assert_eq!(invoices.foreign_keys[0].on_delete, ReferentialAction::SetNull);
}

#[test]
fn one_to_one_is_unique() {
    let schema = build(json!({
        "tables": [
            { "id": 1, "name": "users" },
            {
                "id": 2,
                "name": "profiles",
                "fields": [{
                    "id": 1,
                    "name": "user",
                    "type": "relationship",
                    "relatedTable": "users",
                    "relationType": "one-to-one"
                }]
            }
        ]
    }));

    let profiles = schema.db.table_by_name("profiles").unwrap();
    assert_eq!(profiles.uniques[0].name, "uq_profiles_user");
}

#[test]
fn many_to_many_builds_junction_table() {
    let schema = build(json!({
        "tables": [
            { "id": 1, "name": "students" },
            {
                "id": 2,
                "name": "courses",
                "fields": [{
                    "id": 5,
                    "name": "students",
                    "type": "relationship",
                    "relatedTable": "students",
                    "relationType": "many-to-many"
                }]
            }
        ]
    }));

    // No column on either side
    assert_eq!(schema.db.table_by_name("courses").unwrap().columns.len(), 1);

    let junction = schema.db.table(TableId::Junction { table: 2, field: 5 });
    assert!(junction.is_junction());
    assert_eq!(junction.name, "courses_students");

    let columns: Vec<_> = junction.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(columns, ["courses_id", "students_id"]);
    assert!(junction.columns.iter().all(|c| !c.nullable && c.ty == Type::Integer(8)));
    assert_eq!(junction.primary_key.columns.len(), 2);

    let fks: Vec<_> = junction
        .foreign_keys
        .iter()
        .map(|fk| (fk.name.as_str(), fk.references, fk.on_delete))
        .collect();
    assert_eq!(
        fks,
        [
            ("fk_courses_students_courses_id", TableId::Declared(2), ReferentialAction::Cascade),
            ("fk_courses_students_students_id", TableId::Declared(1), ReferentialAction::Cascade),
        ]
    );

    assert_eq!(junction.indices[0].name, "idx_courses_students_students_id");
}

#[test]
fn self_referencing_many_to_many() {
    let schema = build(json!({
        "tables": [{
            "id": 1,
            "name": "people",
            "fields": [{
                "id": 1,
                "name": "friends",
                "type": "relationship",
                "relatedTable": "people",
                "relationType": "many-to-many",
                "junctionTable": "friendships"
            }]
        }]
    }));

    let junction = schema.db.table_by_name("friendships").unwrap();
    let columns: Vec<_> = junction.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(columns, ["people_id", "related_people_id"]);
}

#[test]
fn table_level_composite_foreign_key() {
    let schema = build(json!({
        "tables": [
            {
                "id": 1,
                "name": "regions",
                "fields": [
                    { "id": 1, "name": "country", "type": "single-line-text", "maxLength": 2 },
                    { "id": 2, "name": "code", "type": "single-line-text", "maxLength": 8 }
                ],
                "primaryKey": { "fields": ["country", "code"] }
            },
            {
                "id": 2,
                "name": "stores",
                "fields": [
                    { "id": 1, "name": "country", "type": "single-line-text", "maxLength": 2 },
                    { "id": 2, "name": "region", "type": "single-line-text", "maxLength": 8 }
                ],
                "foreignKeys": [{
                    "fields": ["country", "region"],
                    "relatedTable": "regions",
                    "relatedFields": ["country", "code"],
                    "onDelete": "cascade"
                }]
            }
        ]
    }));

    let fk = &schema.db.table_by_name("stores").unwrap().foreign_keys[0];
    assert_eq!(fk.name, "fk_stores_country_region");
    assert_eq!(fk.columns.len(), 2);
    let regions = schema.db.table_by_name("regions").unwrap();
    assert_eq!(fk.referenced_columns, regions.primary_key.columns);
}
