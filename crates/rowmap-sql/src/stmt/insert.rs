use super::Statement;

use rowmap_core::stmt::{Ident, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub table: String,

    /// Column values. Serialized in column name order; an empty list inserts
    /// a row of defaults.
    pub values: Vec<(Ident, Value)>,

    /// Append `RETURNING *`
    pub returning: bool,
}

impl From<Insert> for Statement {
    fn from(value: Insert) -> Self {
        Statement::Insert(value)
    }
}
