use super::Statement;

/// Reads back the row written by the most recent insert through its `rowid`.
/// Used when the dialect does not write with `RETURNING`.
#[derive(Debug, Clone, PartialEq)]
pub struct LastInsert {
    pub table: String,
}

impl From<LastInsert> for Statement {
    fn from(value: LastInsert) -> Self {
        Statement::LastInsert(value)
    }
}
