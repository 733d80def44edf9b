mod support;

use pretty_assertions::assert_eq;
use rowmap::{err, Db};
use support::{db, insert};

fn people(db: &Db) -> u64 {
    db.table("person").unwrap().count().unwrap()
}

#[test]
fn closure_commits_on_success() {
    let db = db();

    let id = db
        .transaction(|db| {
            let mut alice = db.table("person")?.record([("name", "Alice")])?;
            alice.flush()?;
            Ok(alice.value("id").cloned())
        })
        .unwrap();

    assert!(id.is_some());
    assert_eq!(people(&db), 1);
}

#[test]
fn closure_rolls_back_on_error() {
    let db = db();
    let person = db.table("person").unwrap();
    insert(&person, [("name", "Alice".into())]);

    let err = db
        .transaction(|db| {
            insert(&db.table("person")?, [("name", "Bob".into())]);
            Err::<(), _>(err!("changed my mind"))
        })
        .unwrap_err();

    assert_eq!(err.to_string(), "changed my mind");
    assert_eq!(people(&db), 1);
}

#[test]
fn explicit_commit_and_rollback() {
    let db = db();
    let person = db.table("person").unwrap();

    let tx = db.begin().unwrap();
    insert(&person, [("name", "Alice".into())]);
    tx.commit().unwrap();
    assert_eq!(people(&db), 1);

    let tx = db.begin().unwrap();
    insert(&tx.table("person").unwrap(), [("name", "Bob".into())]);
    assert_eq!(people(&tx), 2);
    tx.rollback().unwrap();
    assert_eq!(people(&db), 1);
}

#[test]
fn dropped_transaction_rolls_back() {
    let db = db();
    let person = db.table("person").unwrap();

    {
        let _tx = db.begin().unwrap();
        insert(&person, [("name", "Alice".into())]);
    }

    assert_eq!(people(&db), 0);

    // The connection is usable for a new transaction afterwards.
    db.transaction(|_| Ok(insert(&person, [("name", "Bob".into())]))).unwrap();
    assert_eq!(people(&db), 1);
}

#[test]
fn failed_commit_rolls_back() {
    let db = db();
    db.execute_batch(
        "PRAGMA foreign_keys = ON;
         CREATE TABLE parent (id INTEGER PRIMARY KEY);
         CREATE TABLE child (
             id INTEGER PRIMARY KEY,
             parent_id INTEGER REFERENCES parent(id) DEFERRABLE INITIALLY DEFERRED
         );",
    )
    .unwrap();
    db.refresh_tables().unwrap();
    let child = db.table("child").unwrap();

    // The dangling reference is only checked at COMMIT.
    let err = db
        .transaction(|_| Ok(insert(&child, [("parent_id", 99.into())])))
        .unwrap_err();
    assert!(err.is_driver(), "{err}");

    assert_eq!(child.count().unwrap(), 0);
    db.begin().unwrap().commit().unwrap();
}
