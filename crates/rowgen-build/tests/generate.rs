use rowgen_build::{
    Error, INDEX_FILE,
    config::Config,
    diagnostics::{MISSING_MODEL_COLUMN, UPSERT_AFTER_SELECTIVE},
    emit, generate,
};
use rowgen_core::{
    criteria::Criteria, error::StatementError, resolve::StatementKind, runtime::SelectivePolicy,
};
use std::{env, fs, process};

const TB_TABLE: &str = r#"
    [[tables]]
    name = "tb"

    [[tables.columns]]
    sql_name = "id"
    kind = "integer"
    role = "primary-key"

    [[tables.columns]]
    sql_name = "field_1"
    kind = "text"

    [[tables.columns]]
    sql_name = "inc_f1"
    kind = "integer"
    role = "incrementing"

    [[tables.columns]]
    sql_name = "inc_f2"
    name = "tsIncF2"
    kind = "integer"
    role = "incrementing"

    [[tables.columns]]
    sql_name = "inc_f3"
    kind = "integer"
    role = "incrementing"

    [[tables]]
    name = "audit_log"

    [[tables.columns]]
    sql_name = "message"
    kind = "text"
"#;

fn config(plugins: &[&str]) -> Config {
    let mut text = String::new();
    for plugin in plugins {
        text.push_str(&format!("[[plugins]]\nname = \"{plugin}\"\n\n"));
    }
    text.push_str(TB_TABLE);

    Config::from_toml_str(&text).unwrap()
}

fn full_chain() -> Config {
    config(&["ModelColumnPlugin", "UpsertPlugin", "SelectiveEnhancedPlugin"])
}

#[test]
fn well_ordered_chain_prepares_selective_statements() {
    let generation = generate(&full_chain()).unwrap();
    assert!(generation.warnings().is_empty());

    let tb = generation.table("tb").unwrap();
    assert_eq!(tb.statements.policy(), SelectivePolicy::ENHANCED);
    assert_eq!(
        tb.statements.kinds().collect::<Vec<_>>(),
        StatementKind::ALL.to_vec()
    );

    let mut snapshot = tb.statements.snapshot();
    snapshot.row_mut().set_named("incF3", 10).unwrap();
    snapshot.row_mut().set_named("tsIncF2", 5).unwrap();
    snapshot.select_names(["field_1", "inc_f2"]).unwrap();

    assert_eq!(
        tb.statements.insert(&snapshot).unwrap().sql(),
        "insert into tb ( field_1, inc_f2 )  values ( 'null', 5 )"
    );
}

#[test]
fn tables_without_a_key_skip_key_statements() {
    let generation = generate(&full_chain()).unwrap();
    let audit = generation.table("audit_log").unwrap();

    assert!(!audit.statements.supports(StatementKind::UpdateByKey));
    assert!(!audit.statements.supports(StatementKind::UpsertByKey));
    assert!(audit.statements.supports(StatementKind::UpsertByCriteria));

    let snapshot = audit.statements.snapshot();
    assert!(matches!(
        audit.statements.update_by_key(&snapshot),
        Err(StatementError::NotGenerated { .. })
    ));
}

#[test]
fn upserts_need_the_upsert_plugin() {
    let generation =
        generate(&config(&["ModelColumnPlugin", "SelectiveEnhancedPlugin"])).unwrap();
    let tb = generation.table("tb").unwrap();

    assert!(!tb.statements.supports(StatementKind::UpsertByKey));
    assert!(!tb.statements.supports(StatementKind::UpsertByCriteria));
}

#[test]
fn missing_model_column_plugin_degrades_to_presence() {
    let generation = generate(&config(&["UpsertPlugin", "SelectiveEnhancedPlugin"])).unwrap();
    assert_eq!(generation.warnings(), [MISSING_MODEL_COLUMN]);

    let tb = generation.table("tb").unwrap();
    assert!(tb.column_enum.is_none());

    let mut snapshot = tb.statements.snapshot();
    snapshot.row_mut().set_named("incF3", 10).unwrap();
    snapshot.row_mut().set_named("tsIncF2", 5).unwrap();
    snapshot.select_names(["field_1", "inc_f2"]).unwrap();

    assert_eq!(
        tb.statements.insert(&snapshot).unwrap().sql(),
        "insert into tb ( inc_f2, inc_f3 )  values ( 5, 10 )"
    );
}

#[test]
fn misordered_upsert_plugin_keeps_upserts_on_presence() {
    let generation = generate(&config(&[
        "ModelColumnPlugin",
        "SelectiveEnhancedPlugin",
        "UpsertPlugin",
    ]))
    .unwrap();
    assert_eq!(generation.warnings(), [UPSERT_AFTER_SELECTIVE]);

    let tb = generation.table("tb").unwrap();
    let mut snapshot = tb.statements.snapshot();
    snapshot.row_mut().set_named("id", 99).unwrap();
    snapshot.row_mut().set_named("incF3", 10).unwrap();
    snapshot.select_names(["id", "field_1"]).unwrap();

    let id = tb.statements.model().column_id("id").unwrap();
    let criteria = Criteria::raw("id = '99'", [id]);
    let upsert = tb.statements.upsert_by_criteria(&snapshot, &criteria).unwrap();

    assert_eq!(
        upsert.to_sql(),
        "insert into tb ( id, inc_f3 )  select 99, 10  from dual where not exists ( select 1 from tb WHERE (  id = '99' )  ) ; update tb set inc_f3 = 10  WHERE (  id = '99' )"
    );
    assert_eq!(
        tb.statements.insert(&snapshot).unwrap().sql(),
        "insert into tb ( id, field_1 )  values ( 99, 'null' )"
    );
}

#[test]
fn invalid_models_fail_generation() {
    let config = Config::from_toml_str(
        r#"
        [[tables]]
        name = "tb"

        [[tables.columns]]
        sql_name = "id"
        kind = "integer"

        [[tables.columns]]
        sql_name = "id"
        name = "other"
        kind = "integer"
        "#,
    )
    .unwrap();

    assert!(matches!(generate(&config), Err(Error::Model(_))));
}

#[test]
fn emit_writes_column_enums_and_index() {
    let dir = env::temp_dir().join(format!("rowgen-emit-{}", process::id()));
    fs::create_dir_all(&dir).unwrap();

    let config_path = dir.join("rowgen.toml");
    let mut text = String::from(
        "[[plugins]]\nname = \"ModelColumnPlugin\"\n\n[[plugins]]\nname = \"SelectiveEnhancedPlugin\"\n\n",
    );
    text.push_str(TB_TABLE);
    fs::write(&config_path, text).unwrap();

    let generation = emit(&config_path, &dir).unwrap();
    assert_eq!(generation.column_enums().count(), 2);

    let tb = fs::read_to_string(dir.join("tb_column.rs")).unwrap();
    let file = syn::parse_file(&tb).unwrap();
    assert_eq!(file.items.len(), 2, "enum and its TableColumn impl");

    let index = fs::read_to_string(dir.join(INDEX_FILE)).unwrap();
    assert!(index.contains("/tb_column.rs"));
    assert!(index.contains("/audit_log_column.rs"));

    fs::remove_dir_all(&dir).unwrap();
}
