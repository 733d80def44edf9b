use super::{BinaryOp, Expr, Ident, Value};
use crate::Result;

/// A reference to a table column, used to build filter conditions.
///
/// ```
/// # use rowmap_core::stmt::Column;
/// # fn main() -> rowmap_core::Result<()> {
/// let name = Column::new("name")?;
/// let id = Column::new("id")?;
/// let filter = name.eq("Bob").and(id.gt(0));
/// # let _ = filter;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: Ident,
}

impl Column {
    pub fn new(name: impl Into<String>) -> Result<Column> {
        Ok(Column {
            name: Ident::new(name)?,
        })
    }

    pub fn name(&self) -> &Ident {
        &self.name
    }

    pub fn eq(&self, value: impl Into<Value>) -> Expr {
        Expr::binary_op(self.name.clone(), BinaryOp::Eq, value)
    }

    pub fn ne(&self, value: impl Into<Value>) -> Expr {
        Expr::binary_op(self.name.clone(), BinaryOp::Ne, value)
    }

    pub fn gt(&self, value: impl Into<Value>) -> Expr {
        Expr::binary_op(self.name.clone(), BinaryOp::Gt, value)
    }

    pub fn ge(&self, value: impl Into<Value>) -> Expr {
        Expr::binary_op(self.name.clone(), BinaryOp::Ge, value)
    }

    pub fn lt(&self, value: impl Into<Value>) -> Expr {
        Expr::binary_op(self.name.clone(), BinaryOp::Lt, value)
    }

    pub fn le(&self, value: impl Into<Value>) -> Expr {
        Expr::binary_op(self.name.clone(), BinaryOp::Le, value)
    }

    pub fn in_list<T: Into<Value>>(&self, list: impl IntoIterator<Item = T>) -> Expr {
        Expr::in_list(self.name.clone(), list)
    }

    pub fn is_null(&self) -> Expr {
        Expr::is_null(self.name.clone())
    }

    pub fn is_not_null(&self) -> Expr {
        Expr::is_not_null(self.name.clone())
    }

    pub fn like(&self, pattern: impl Into<String>) -> Expr {
        Expr::like(self.name.clone(), pattern)
    }

    pub fn ilike(&self, pattern: impl Into<String>) -> Expr {
        Expr::ilike(self.name.clone(), pattern)
    }
}
