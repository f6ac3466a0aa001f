#![allow(dead_code)]

use serde_json::json;
use std::sync::Arc;
use trellis_access::{Enforcer, PolicySet, Principal, RoleHierarchy};
use trellis_core::{record, schema::app, stmt::Record, Schema};

/// `employees` carries every kind of rule; `notes` declares no permissions;
/// `audit` only allows reads.
pub fn schema() -> Schema {
    let app: app::Schema = serde_json::from_value(json!({
        "tables": [
            {
                "id": 1,
                "name": "employees",
                "fields": [
                    { "id": 1, "name": "name", "type": "single-line-text" },
                    { "id": 2, "name": "salary", "type": "integer" },
                    { "id": 3, "name": "owner_id", "type": "single-line-text" },
                    { "id": 4, "name": "organization_id", "type": "single-line-text" },
                    { "id": 5, "name": "status", "type": "status", "options": ["active", "left"] },
                    { "id": 6, "name": "created_at", "type": "created-at" }
                ],
                "views": [{
                    "id": "active",
                    "name": "Active",
                    "filters": { "field": "status", "operator": "equals", "value": "active" },
                    "sorts": [{ "field": "name", "direction": "asc" }],
                    "fields": ["name", "salary"]
                }],
                "permissions": {
                    "read": { "type": "organization-scoped" },
                    "create": { "type": "roles", "roles": ["member"] },
                    "update": { "type": "owner", "field": "owner_id" },
                    "delete": { "type": "roles", "roles": ["admin"] },
                    "fields": [
                        {
                            "field": "salary",
                            "read": { "type": "roles", "roles": ["admin"] },
                            "write": { "type": "roles", "roles": ["admin"] }
                        }
                    ]
                }
            },
            {
                "id": 2,
                "name": "notes",
                "fields": [
                    { "id": 1, "name": "body", "type": "long-text" }
                ]
            },
            {
                "id": 3,
                "name": "audit",
                "fields": [
                    { "id": 1, "name": "message", "type": "long-text" }
                ],
                "permissions": {
                    "read": { "type": "roles", "roles": ["admin"] }
                }
            }
        ]
    }))
    .unwrap();

    Schema::builder().build(app).unwrap()
}

pub fn policies() -> PolicySet {
    PolicySet::compile(&schema(), &RoleHierarchy::default())
}

pub fn enforcer() -> Enforcer {
    Enforcer::new(Arc::new(policies()))
}

pub fn enforcer_with_partial_writes() -> Enforcer {
    let mut schema = schema();
    schema.app.tables[0]
        .permissions
        .as_mut()
        .unwrap()
        .allow_partial_field_writes = true;
    Enforcer::new(Arc::new(PolicySet::compile(&schema, &RoleHierarchy::default())))
}

pub fn member() -> Principal {
    Principal::new("u1")
        .with_role("member")
        .with_organization("acme")
}

pub fn admin() -> Principal {
    Principal::new("u9")
        .with_role("admin")
        .with_organization("acme")
}

pub fn employee(id: i64, name: &str, owner: &str, organization: &str) -> Record {
    record! {
        "id" => id,
        "name" => name,
        "salary" => 5000,
        "owner_id" => owner,
        "organization_id" => organization,
        "status" => "active",
    }
}
