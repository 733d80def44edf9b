mod support;

use pretty_assertions::assert_eq;
use rowmap::{Db, Table};
use support::{connect, db, insert, names};

fn people(db: &Db) -> Table {
    let person = db.table("person").unwrap();
    for name in ["Alice", "Bob", "Carol", "Dave", "Eve"] {
        insert(&person, [("name", name.into())]);
    }
    person
}

#[test]
fn nothing_runs_until_read() {
    let db = db();
    let person = people(&db);

    let mut stream = person.all();
    assert!(!stream.is_executed());

    stream.execute().unwrap();
    assert!(stream.is_executed());
    assert_eq!(names(&stream.records().unwrap()), ["Alice", "Bob", "Carol", "Dave", "Eve"]);
}

#[test]
fn cached_records_are_replayed() {
    let db = db();
    let person = people(&db);

    let mut stream = person.all();
    let first = stream.records().unwrap();

    // Rows written afterwards are not seen by the executed stream.
    insert(&person, [("name", "Frank".into())]);
    assert_eq!(stream.records().unwrap(), first);
    assert_eq!(stream.len().unwrap(), 5);

    let mut fresh = person.all();
    assert_eq!(fresh.len().unwrap(), 6);
}

#[test]
fn cached_records_do_not_see_later_updates() {
    let db = db();
    let person = people(&db);

    let mut stream = person.all();
    assert_eq!(stream.len().unwrap(), 5);

    let name = person.column("name").unwrap();
    let mut bob = person.get_one(name.eq("Bob")).unwrap().unwrap();
    bob.set("name", "Robert").unwrap();
    bob.flush().unwrap();

    assert_eq!(names(&stream.records().unwrap()), ["Alice", "Bob", "Carol", "Dave", "Eve"]);
    assert_eq!(names(&[stream.get(1).unwrap()]), ["Bob"]);

    let mut fresh = person.all();
    assert_eq!(names(&fresh.records().unwrap()), ["Alice", "Robert", "Carol", "Dave", "Eve"]);
}

#[test]
fn partial_reads_resume() {
    let db = db();
    let person = people(&db);

    let mut stream = person.all();
    let mut iter = stream.iter();
    iter.next().unwrap().unwrap();
    iter.next().unwrap().unwrap();
    drop(iter);

    assert_eq!(names(&stream.records().unwrap()), ["Alice", "Bob", "Carol", "Dave", "Eve"]);
}

#[test]
fn records_are_independent_copies() {
    let db = db();
    let person = people(&db);

    let mut stream = person.all();
    let mut alice = stream.first().unwrap().unwrap();
    alice.set("name", "Alicia").unwrap();

    assert_eq!(names(&[stream.get(0).unwrap()]), ["Alice"]);
}

#[test]
fn indexing() {
    let db = db();
    let person = people(&db);
    let mut stream = person.all();

    assert_eq!(names(&[stream.get(0).unwrap()]), ["Alice"]);
    assert_eq!(names(&[stream.get(3).unwrap()]), ["Dave"]);
    assert_eq!(names(&[stream.get(-1).unwrap()]), ["Eve"]);
    assert_eq!(names(&[stream.get(-5).unwrap()]), ["Alice"]);

    assert!(stream.get(5).unwrap_err().is_index_out_of_range());
    assert!(stream.get(-6).unwrap_err().is_index_out_of_range());
}

#[test]
fn slicing() {
    let db = db();
    let person = people(&db);
    let mut stream = person.all();

    assert_eq!(names(&stream.slice(1..3).unwrap()), ["Bob", "Carol"]);
    assert_eq!(names(&stream.slice(..2).unwrap()), ["Alice", "Bob"]);
    assert_eq!(names(&stream.slice(3..).unwrap()), ["Dave", "Eve"]);
    assert_eq!(names(&stream.slice(-2..).unwrap()), ["Dave", "Eve"]);
    assert_eq!(names(&stream.slice(1..=2).unwrap()), ["Bob", "Carol"]);
    assert_eq!(names(&stream.slice(..-3).unwrap()), ["Alice", "Bob"]);
    assert_eq!(stream.slice(..).unwrap().len(), 5);

    // Bounds past either end are clamped.
    assert_eq!(names(&stream.slice(3..100).unwrap()), ["Dave", "Eve"]);
    assert_eq!(stream.slice(-100..1).unwrap().len(), 1);
    assert!(stream.slice(4..2).unwrap().is_empty());
    assert!(stream.slice(10..).unwrap().is_empty());
}

#[test]
fn refine_builds_a_new_stream() {
    let db = db();
    let person = people(&db);
    let name = person.column("name").unwrap();

    let mut all = person.all();
    let mut some = all.refine(name.gt("Bob")).unwrap();
    assert!(!some.is_executed());
    assert_eq!(names(&some.records().unwrap()), ["Carol", "Dave", "Eve"]);

    // Refining an executed stream starts over as well.
    all.execute().unwrap();
    let mut fewer = some.refine(name.lt("Eve")).unwrap();
    assert!(!fewer.is_executed());
    assert_eq!(names(&fewer.records().unwrap()), ["Carol", "Dave"]);

    assert_eq!(all.len().unwrap(), 5);
    assert_eq!(some.len().unwrap(), 3);
}

#[test]
fn order_limit_offset() {
    let db = db();
    let person = people(&db);
    let all = person.all();

    let mut reversed = all.order_by("name DESC").unwrap();
    assert_eq!(names(&reversed.records().unwrap()), ["Eve", "Dave", "Carol", "Bob", "Alice"]);

    let mut page = all.offset(1).unwrap().limit(2).unwrap();
    assert_eq!(page.query().limit, Some(2));
    assert_eq!(page.query().offset, Some(1));
    assert_eq!(names(&page.records().unwrap()), ["Bob", "Carol"]);

    let mut last = reversed.limit(1).unwrap();
    assert_eq!(names(&last.records().unwrap()), ["Eve"]);

    assert!(all.order_by("name; DROP TABLE person").is_err());
    assert!(all.query().limit.is_none());
}

#[test]
fn uncached_streams_are_read_once() {
    let db = db();
    let person = people(&db);

    let mut stream = person.all().nocache();
    assert!(!stream.is_cached());
    assert_eq!(stream.records().unwrap().len(), 5);

    let mut iter = stream.iter();
    assert!(iter.next().unwrap().unwrap_err().is_no_cache());
    assert!(iter.next().is_none());

    assert!(stream.get(0).unwrap_err().is_no_cache());
    assert!(stream.slice(..).unwrap_err().is_no_cache());
    assert!(stream.len().unwrap_err().is_no_cache());
}

#[test]
fn caching_can_be_disabled_per_database() {
    let db = connect(Db::builder().cache_results(false));
    let person = people(&db);

    let mut stream = person.all();
    assert!(!stream.is_cached());
    assert!(stream.is_empty().unwrap_err().is_no_cache());

    // Iteration still works, once.
    assert_eq!(stream.records().unwrap().len(), 5);
    assert!(stream.records().unwrap_err().is_no_cache());
}

#[test]
fn counting() {
    let db = db();
    let person = people(&db);

    assert_eq!(person.count().unwrap(), 5);
    assert_eq!(person.all().len().unwrap(), 5);

    // SQLite reports no row count for reads.
    assert_eq!(person.all().count().unwrap(), 0);
}

#[test]
fn raw_queries() {
    let db = db();
    let person = people(&db);

    let mut stream = person.get_raw("SELECT * FROM person WHERE name LIKE ? ORDER BY id", ["%e"]);
    assert_eq!(names(&stream.records().unwrap()), ["Alice", "Dave", "Eve"]);

    let name = person.column("name").unwrap();
    assert!(stream.refine(name.eq("Eve")).unwrap_err().is_invalid_statement());
    assert!(stream.limit(1).unwrap_err().is_invalid_statement());
    assert!(stream.order_by("name").unwrap_err().is_invalid_statement());

    let mut empty = person.get_raw("SELECT * FROM person WHERE id < ?", [0]);
    assert!(empty.is_empty().unwrap());
    assert_eq!(empty.len().unwrap(), 0);
    assert!(empty.first().unwrap().is_none());
}

#[test]
fn raw_query_errors_surface_on_read() {
    let db = db();
    let person = people(&db);

    let mut stream = person.get_raw("SELECT * FROM nowhere", Vec::<i64>::new());
    assert!(stream.records().unwrap_err().is_driver());
}
