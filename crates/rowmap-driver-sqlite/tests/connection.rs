use pretty_assertions::assert_eq;
use rowmap_core::{
    schema::ColumnInfo,
    stmt::{Param, Value},
    Connection as _, Driver,
};
use rowmap_driver_sqlite::{Connection, Sqlite};

fn connection() -> Connection {
    let mut conn = Connection::in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE car (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            length INTEGER,
            width INTEGER,
            area INTEGER GENERATED ALWAYS AS (length * width) STORED
        );
        CREATE TABLE department_person (
            person_id INTEGER,
            department_id INTEGER,
            PRIMARY KEY (department_id, person_id)
        );",
    )
    .unwrap();
    conn
}

#[test]
fn parses_urls() {
    assert!(matches!(
        Sqlite::new("sqlite::memory:").unwrap(),
        Sqlite::InMemory
    ));

    let Sqlite::File(path) = Sqlite::new("sqlite:///tmp/rowmap.db").unwrap() else {
        panic!("expected a file database");
    };
    assert_eq!(path.to_str(), Some("/tmp/rowmap.db"));

    let err = Sqlite::new("postgresql://localhost/db").unwrap_err();
    assert!(err.is_invalid_connection_url());

    assert_eq!(Sqlite::in_memory().url(), "sqlite::memory:");
}

#[test]
fn lists_tables() {
    let mut conn = connection();
    assert_eq!(conn.tables().unwrap(), ["car", "department_person"]);
}

#[test]
fn primary_key_in_key_order() {
    let mut conn = connection();
    assert_eq!(conn.primary_key("car").unwrap(), ["id"]);
    assert_eq!(
        conn.primary_key("department_person").unwrap(),
        ["department_id", "person_id"]
    );
}

#[test]
fn columns_flag_generated() {
    let mut conn = connection();
    assert_eq!(
        conn.columns("car").unwrap(),
        [
            ColumnInfo::new("id"),
            ColumnInfo::new("length"),
            ColumnInfo::new("width"),
            ColumnInfo::generated("area"),
        ]
    );
}

#[test]
fn named_and_positional_params() {
    let mut conn = connection();

    let count = conn
        .execute(
            "INSERT INTO car (length, width) VALUES (:length, :width)",
            &[
                Param::named("width", Value::I64(3)),
                Param::named("length", Value::I64(4)),
            ],
        )
        .unwrap();
    assert_eq!(count, 1);

    let mut rows = conn
        .query(
            "SELECT * FROM car WHERE length = ?",
            &[Param::positional(Value::I64(4))],
        )
        .unwrap();

    assert_eq!(rows.row_count(), None);
    assert_eq!(rows.columns(), ["id", "length", "width", "area"]);

    let row = rows.next().unwrap();
    assert_eq!(row.get("id"), Some(&Value::I64(1)));
    assert_eq!(row.get("area"), Some(&Value::I64(12)));
    assert!(rows.next().is_none());
}

#[test]
fn driver_errors_pass_through() {
    let mut conn = connection();
    let err = conn
        .execute("INSERT INTO car (area) VALUES (1)", &[])
        .unwrap_err();
    assert!(err.is_driver());
    assert!(err.driver_error().is_some());
}
