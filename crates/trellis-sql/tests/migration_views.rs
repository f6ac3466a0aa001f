use pretty_assertions::assert_eq;
use serde_json::json;
use trellis_core::schema::{app, db, Schema};
use trellis_sql::{MigrationPlan, Phase};

fn tasks(fields: serde_json::Value, views: serde_json::Value) -> Schema {
    let app: app::Schema = serde_json::from_value(json!({
        "tables": [{ "id": 1, "name": "tasks", "fields": fields, "views": views }]
    }))
    .unwrap();
    Schema::builder().build(app).unwrap()
}

fn fields() -> serde_json::Value {
    json!([
        { "id": 1, "name": "title", "type": "single-line-text" },
        { "id": 2, "name": "status", "type": "status", "options": ["active", "done"] },
        { "id": 3, "name": "priority", "type": "integer" }
    ])
}

fn active() -> serde_json::Value {
    json!([{
        "id": "active",
        "name": "Active",
        "filters": { "field": "status", "operator": "equals", "value": "active" },
        "sorts": [{ "field": "priority", "direction": "desc" }],
        "fields": ["title", "priority"]
    }])
}

fn plan(previous: &db::Schema, next: &db::Schema) -> Vec<(Phase, String)> {
    let diff = db::SchemaDiff::from(previous, next);
    MigrationPlan::from_diff(&diff)
        .iter()
        .map(|stmt| (stmt.phase(), stmt.to_sql()))
        .collect()
}

#[test]
fn view_is_created_last() {
    let next = tasks(fields(), active());
    let statements = plan(&db::Schema::default(), &next.db);

    assert_eq!(
        statements.last().unwrap(),
        &(
            Phase::CreateViews,
            "CREATE OR REPLACE VIEW \"tasks_active\" AS SELECT \"title\", \"priority\" \
             FROM \"tasks\" WHERE \"status\" = 'active' ORDER BY \"priority\" DESC;"
                .to_string()
        )
    );
}

#[test]
fn view_without_query_selects_every_column() {
    let next = tasks(fields(), json!([{ "id": 7, "name": "Everything" }]));
    let statements = plan(&db::Schema::default(), &next.db);

    assert_eq!(
        statements.last().unwrap().1,
        "CREATE OR REPLACE VIEW \"tasks_7\" AS SELECT \"id\", \"title\", \"status\", \"priority\" \
         FROM \"tasks\";"
    );
}

#[test]
fn compound_filters_and_grouping() {
    let next = tasks(
        fields(),
        json!([{
            "id": "Open Sale",
            "name": "Open sale",
            "filters": { "and": [
                { "field": "status", "operator": "notEquals", "value": "done" },
                { "or": [
                    { "field": "title", "operator": "contains", "value": "50%_off" },
                    { "field": "title", "operator": "isEmpty" }
                ]}
            ]},
            "groupBy": { "field": "status" },
            "sorts": [{ "field": "title" }]
        }]),
    );
    let statements = plan(&db::Schema::default(), &next.db);

    assert_eq!(
        statements.last().unwrap().1,
        "CREATE OR REPLACE VIEW \"tasks_open_sale\" AS SELECT \"id\", \"title\", \"status\", \"priority\" \
         FROM \"tasks\" WHERE (\"status\" <> 'done' AND (\"title\" LIKE '%50\\%\\_off%' \
         OR \"title\" IS NULL OR \"title\" = '')) ORDER BY \"status\" ASC, \"title\" ASC;"
    );
}

#[test]
fn column_change_rebuilds_views_around_it() {
    let previous = tasks(fields(), active());

    let mut next_fields = fields();
    next_fields
        .as_array_mut()
        .unwrap()
        .push(json!({ "id": 4, "name": "due", "type": "date" }));
    let next = tasks(next_fields, active());

    let statements = plan(&previous.db, &next.db);
    let phases: Vec<_> = statements.iter().map(|(phase, _)| *phase).collect();

    assert_eq!(
        phases,
        [Phase::DropViews, Phase::AddColumns, Phase::CreateViews]
    );
    assert_eq!(statements[0].1, "DROP VIEW IF EXISTS \"tasks_active\";");
}

#[test]
fn removed_view_is_dropped() {
    let previous = tasks(fields(), active());
    let next = tasks(fields(), json!([]));

    assert_eq!(
        plan(&previous.db, &next.db),
        [(Phase::DropViews, "DROP VIEW IF EXISTS \"tasks_active\";".to_string())]
    );
}

#[test]
fn renamed_view_display_name_changes_nothing() {
    let previous = tasks(fields(), active());

    let mut renamed = active();
    renamed[0]["name"] = json!("Currently active");
    let next = tasks(fields(), renamed);

    assert!(plan(&previous.db, &next.db).is_empty());
}
