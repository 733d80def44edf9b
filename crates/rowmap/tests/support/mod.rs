#![allow(dead_code)]

use rowmap::{db::Builder, Db, Field, Record, Table, Value};

const SCHEMA: &str = "
CREATE TABLE person (
    id INTEGER PRIMARY KEY,
    name TEXT,
    other INTEGER,
    manager_id INTEGER REFERENCES person(id),
    car_id INTEGER REFERENCES car(id)
);
CREATE TABLE department (
    id INTEGER PRIMARY KEY,
    name TEXT
);
CREATE TABLE person_department (
    person_id INTEGER REFERENCES person(id),
    department_id INTEGER REFERENCES department(id),
    PRIMARY KEY (person_id, department_id)
);
CREATE TABLE car (
    id INTEGER PRIMARY KEY,
    license_plate TEXT,
    name TEXT,
    person_id INTEGER REFERENCES person(id),
    length INTEGER,
    width INTEGER,
    area INTEGER GENERATED ALWAYS AS (length * width) STORED
);
CREATE TABLE no_pk (foo TEXT);
CREATE TABLE station (person_id INTEGER);
CREATE TABLE possession (
    id INTEGER PRIMARY KEY,
    person_id INTEGER,
    description JSON
);
";

/// An in-memory database with the test schema.
pub fn db() -> Db {
    connect(&mut Db::builder())
}

pub fn connect(builder: &mut Builder) -> Db {
    let _ = env_logger::builder().is_test(true).try_init();

    let db = builder.connect("sqlite::memory:").unwrap();
    db.execute_batch(SCHEMA).unwrap();
    db.refresh_tables().unwrap();
    db
}

/// Creates and flushes a record.
pub fn insert<const N: usize>(table: &Table, values: [(&str, Value); N]) -> Record {
    let mut record = table.record(values).unwrap();
    record.flush().unwrap();
    record
}

pub fn id(record: &Record) -> i64 {
    record.value("id").and_then(Value::as_i64).unwrap()
}

pub fn names(records: &[Record]) -> Vec<String> {
    records
        .iter()
        .map(|record| record.value("name").and_then(Value::as_str).unwrap().to_string())
        .collect()
}

/// The records of a resolved relation, whatever its shape.
pub fn related(field: &mut Field) -> Vec<Record> {
    match field {
        Field::Record(record) => vec![(**record).clone()],
        Field::Stream(stream) => stream.records().unwrap(),
        Field::List(items) => items.iter_mut().flat_map(related).collect(),
        Field::Value(value) => {
            assert!(value.is_null(), "not a relation: {value:?}");
            vec![]
        }
    }
}
