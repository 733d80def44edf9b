use super::{BinaryOp, Expr, Ident, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct ExprBinaryOp {
    pub column: Ident,
    pub op: BinaryOp,
    pub value: Value,
}

impl From<ExprBinaryOp> for Expr {
    fn from(value: ExprBinaryOp) -> Self {
        Expr::BinaryOp(value)
    }
}
