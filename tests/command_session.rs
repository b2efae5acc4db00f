use flatdb::{
    database::conditions, ColumnDef, ColumnType, DbConfig, Dispatcher, JsonFileStorage, MemoryStorage, Record,
    RecordEngine, Reply, SchemaStore, Storage, Value,
};
use serde_json::json;
use tempfile::TempDir;

fn message(reply: Reply) -> String {
    match reply {
        Reply::Message(m) => m,
        other => panic!("expected a message, got {other:?}"),
    }
}

fn memory_db() -> Dispatcher<MemoryStorage> {
    Dispatcher::new(MemoryStorage::new(), DbConfig::default().with_confirmation(false))
}

fn ids(records: &[Record]) -> Vec<i64> {
    records.iter().filter_map(|r| r.get("ID").and_then(Value::as_int)).collect()
}

#[test]
fn create_then_info_reports_identity_first() {
    let mut db = memory_db();
    db.execute("create_table users name:str age:int active:bool");

    let schema = db.storage().load_schema().unwrap();
    let info = RecordEngine::get_table_info(&schema, "users", &[]).unwrap();
    assert_eq!(
        info.columns,
        vec![
            ColumnDef::identity(),
            ColumnDef::new("name", ColumnType::Str),
            ColumnDef::new("age", ColumnType::Int),
            ColumnDef::new("active", ColumnType::Bool),
        ]
    );
    assert_eq!(
        message(db.execute("info users")),
        "Table: users\nColumns: ID:int, name:str, age:int, active:bool\nRecords: 0"
    );
}

#[test]
fn second_create_is_rejected_and_schema_unchanged() {
    let mut db = memory_db();
    db.execute("create_table users name:str");
    let before: SchemaStore = db.storage().load_schema().unwrap();

    assert_eq!(
        message(db.execute("create_table users other:int")),
        "Error: table \"users\" already exists."
    );
    assert_eq!(db.storage().load_schema().unwrap(), before);
}

#[test]
fn insert_select_round_trip() {
    let mut db = memory_db();
    db.execute("create_table users name:str age:int active:bool");
    db.execute("insert into users values (\"Alice\", \"30\", \"true\")");

    let stored = &db.storage().tables["users"];
    assert_eq!(
        stored[0],
        conditions([
            ("ID", Value::Int(1)),
            ("name", Value::from("Alice")),
            ("age", Value::Int(30)),
            ("active", Value::Bool(true)),
        ])
    );

    assert!(message(db.execute("select from users where active = true")).contains("Alice"));
    assert_eq!(message(db.execute("select from users where active = false")), "No records found.");
}

#[test]
fn identity_reuses_deleted_maximum() {
    let mut db = memory_db();
    db.execute("create_table items label:str");
    assert_eq!(message(db.execute("insert into items values (a)")), "Record with ID=1 added to table \"items\".");
    assert_eq!(message(db.execute("insert into items values (b)")), "Record with ID=2 added to table \"items\".");

    db.execute("delete from items where ID = 2");
    assert_eq!(message(db.execute("insert into items values (c)")), "Record with ID=2 added to table \"items\".");
    assert_eq!(ids(&db.storage().tables["items"]), vec![1, 2]);
}

#[test]
fn update_without_match_is_a_no_op() {
    let mut db = memory_db();
    db.execute("create_table users name:str");
    db.execute("insert into users values (Alice)");
    let before = db.storage().tables["users"].clone();
    let writes = db.storage().writes;

    assert_eq!(
        message(db.execute("update users set name = Bob where name = Zed")),
        "No records found in table \"users\"."
    );
    assert_eq!(db.storage().tables["users"], before);
    assert_eq!(db.storage().writes, writes);
}

#[test]
fn delete_by_id_keeps_relative_order() {
    let mut db = memory_db();
    db.execute("create_table users name:str");
    for name in ["a", "b", "c"] {
        db.execute(&format!("insert into users values ({name})"));
    }

    assert_eq!(
        message(db.execute("delete from users where ID = 3")),
        "Record with ID=3 deleted from table \"users\"."
    );
    assert_eq!(ids(&db.storage().tables["users"]), vec![1, 2]);
}

#[test]
fn string_column_with_numeric_filter_does_not_match() {
    let mut db = memory_db();
    db.execute("create_table codes code:str");
    db.execute("insert into codes values (\"30\")");

    assert_eq!(db.storage().tables["codes"][0]["code"], Value::from("30"));
    assert_eq!(message(db.execute("select from codes where code = \"30\"")), "No records found.");
}

#[test]
fn errors_are_reported_and_loop_continues() {
    let mut db = memory_db();
    assert_eq!(message(db.execute("select from ghost")), "Error: table \"ghost\" does not exist.");
    assert_eq!(
        message(db.execute("insert into ghost values (1)")),
        "Error: table \"ghost\" does not exist."
    );
    assert_eq!(
        message(db.execute("create_table t a:int b:float")),
        "Invalid value: b:float. Please try again."
    );
    assert!(message(db.execute("select from \"ghost")).starts_with("Invalid value: unterminated quote"));
    assert!(message(db.execute("frobnicate")).starts_with("Unknown command: frobnicate"));
    assert_eq!(message(db.execute("list_tables")), "No tables created.");
}

#[test]
fn declined_drop_keeps_everything() {
    let mut db = Dispatcher::new(MemoryStorage::new(), DbConfig::default());
    db.execute("create_table users name:str");
    db.execute("insert into users values (Alice)");

    let reply = db.run("drop_table users", &mut |_: &str| false);
    assert_eq!(reply, Reply::Cancelled);
    assert!(db.storage().schema.contains("users"));
    assert_eq!(db.storage().tables["users"].len(), 1);

    let reply = db.run("drop_table users", &mut |_: &str| true);
    assert_eq!(message(reply), "Table \"users\" dropped.");
    assert!(!db.storage().schema.contains("users"));
    assert!(!db.storage().tables.contains_key("users"));
}

#[test]
fn json_files_survive_a_restart() {
    let tmp = TempDir::new().unwrap();
    let config = DbConfig::rooted_at(tmp.path()).with_confirmation(false);

    {
        let mut db = Dispatcher::new(JsonFileStorage::new(&config), config.clone());
        db.execute("create_table users name:str active:bool");
        db.execute("insert into users values ('Ann Lee', true)");
        db.execute("insert into users values (\"Lee, Bo\", false)");
    }

    let table_file = tmp.path().join("data").join("users.json");
    let on_disk: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&table_file).unwrap()).unwrap();
    assert_eq!(
        on_disk,
        json!([
            { "ID": 1, "name": "Ann Lee", "active": true },
            { "ID": 2, "name": "Lee, Bo", "active": false }
        ])
    );

    let mut db = Dispatcher::new(JsonFileStorage::new(&config), config.clone());
    assert_eq!(message(db.execute("list_tables")), "- users");
    assert!(message(db.execute("select from users where name = \"Lee, Bo\"")).contains("Lee, Bo"));

    db.execute("drop_table users");
    assert!(!table_file.exists());
    assert_eq!(message(db.execute("list_tables")), "No tables created.");
}

#[test]
fn backslash_escapes_reach_stored_and_filtered_values() {
    let mut db = memory_db();
    db.execute("create_table people name:str");
    db.execute(r"insert into people values (O\'Brien)");
    db.execute("insert into people values ('Ann Lee')");

    let stored = &db.storage().tables["people"];
    assert_eq!(stored[0]["name"], Value::from("O'Brien"));
    assert_eq!(stored[1]["name"], Value::from("Ann Lee"));

    assert!(message(db.execute(r"select from people where name = Ann\ Lee")).contains("Ann Lee"));
    assert!(message(db.execute(r"select from people where name = O\'Brien")).contains("O'Brien"));
}

#[test]
fn table_names_cannot_leave_the_data_dir() {
    let tmp = TempDir::new().unwrap();
    let config = DbConfig::rooted_at(tmp.path()).with_confirmation(false);
    let mut db = Dispatcher::new(JsonFileStorage::new(&config), config.clone());

    assert_eq!(
        message(db.execute("create_table ../escape a:int")),
        "Invalid value: ../escape. Please try again."
    );
    assert_eq!(
        message(db.execute("insert into ../escape values (1)")),
        "Error: table \"../escape\" does not exist."
    );
    assert!(!tmp.path().join("escape.json").exists());
}
