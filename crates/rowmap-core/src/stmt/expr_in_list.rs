use super::{Expr, Ident, Value};

/// Membership test. Rendered as an expanded `IN (...)` list or as
/// `= ANY(...)` over a single array parameter, depending on the dialect.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprInList {
    pub column: Ident,
    pub list: Vec<Value>,
}

impl From<ExprInList> for Expr {
    fn from(value: ExprInList) -> Self {
        Expr::InList(value)
    }
}
