use super::{Expr, Ident};

#[derive(Debug, Clone, PartialEq)]
pub struct ExprIsNull {
    pub column: Ident,

    /// When `true`, renders `IS NOT NULL`.
    pub negate: bool,
}

impl From<ExprIsNull> for Expr {
    fn from(value: ExprIsNull) -> Self {
        Expr::IsNull(value)
    }
}
