use super::Statement;

use rowmap_core::stmt::{Expr, Ident, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub table: String,

    /// `SET` assignments, serialized in column name order. Must not be empty.
    pub assignments: Vec<(Ident, Value)>,

    pub filter: Expr,

    /// Append `RETURNING *`
    pub returning: bool,
}

impl From<Update> for Statement {
    fn from(value: Update) -> Self {
        Statement::Update(value)
    }
}
