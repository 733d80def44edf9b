use super::{Expr, Ident};

#[derive(Debug, Clone, PartialEq)]
pub struct ExprLike {
    pub column: Ident,
    pub pattern: String,

    /// `ILIKE` where the dialect has it. SQLite's `LIKE` already ignores
    /// ASCII case.
    pub case_insensitive: bool,
}

impl From<ExprLike> for Expr {
    fn from(value: ExprLike) -> Self {
        Expr::Like(value)
    }
}
