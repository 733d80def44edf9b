mod delete;
pub use delete::Delete;

mod insert;
pub use insert::Insert;

mod last_insert;
pub use last_insert::LastInsert;

mod transaction;
pub use transaction::Transaction;

mod update;
pub use update::Update;

use rowmap_core::stmt::Query;

/// A statement the serializer knows how to write.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `SELECT * ...` for a table or raw query
    Query(Query),

    /// `SELECT COUNT(*) ...` over the query's rows
    Count(Query),

    Insert(Insert),
    Update(Update),
    Delete(Delete),

    /// Re-read the row written by the last insert on this connection
    LastInsert(LastInsert),
}

impl Statement {
    pub fn query(query: Query) -> Statement {
        Statement::Query(query)
    }

    pub fn count(query: Query) -> Statement {
        Statement::Count(query)
    }

    /// Returns `true` if the statement produces rows.
    pub fn returns_rows(&self) -> bool {
        match self {
            Statement::Query(_) | Statement::Count(_) | Statement::LastInsert(_) => true,
            Statement::Insert(insert) => insert.returning,
            Statement::Update(update) => update.returning,
            Statement::Delete(_) => false,
        }
    }
}

impl From<Query> for Statement {
    fn from(value: Query) -> Self {
        Statement::Query(value)
    }
}
