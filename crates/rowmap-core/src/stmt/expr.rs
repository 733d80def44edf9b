use super::*;
use crate::Result;

use std::collections::BTreeMap;

/// A filter condition rendered into a WHERE clause.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// AND a set of conditions. An empty `And` matches every row.
    And(ExprAnd),

    /// Compare a column to a value
    BinaryOp(ExprBinaryOp),

    /// Column membership in a list of values
    InList(ExprInList),

    /// `IS NULL` / `IS NOT NULL`
    IsNull(ExprIsNull),

    /// Pattern match
    Like(ExprLike),

    /// OR a set of conditions
    Or(ExprOr),
}

impl Expr {
    /// The condition that matches every row.
    pub fn all() -> Expr {
        Expr::And(ExprAnd { operands: vec![] })
    }

    /// Builds a filter from column/value pairs.
    ///
    /// Columns are ordered lexicographically so the rendered SQL is stable. A
    /// list value becomes a membership test; any other value an equality test.
    /// When a column is given twice the last value wins.
    pub fn matching<I, K, V>(pairs: I) -> Result<Expr>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let mut columns = BTreeMap::new();

        for (column, value) in pairs {
            columns.insert(Ident::new(column.as_ref())?, value.into());
        }

        let operands = columns
            .into_iter()
            .map(|(column, value)| match value {
                Value::List(list) => Expr::InList(ExprInList { column, list }),
                value => Expr::BinaryOp(ExprBinaryOp {
                    column,
                    op: BinaryOp::Eq,
                    value,
                }),
            })
            .collect();

        Ok(Expr::And(ExprAnd { operands }))
    }

    pub fn binary_op(column: Ident, op: BinaryOp, value: impl Into<Value>) -> Expr {
        Expr::BinaryOp(ExprBinaryOp {
            column,
            op,
            value: value.into(),
        })
    }

    pub fn in_list<T: Into<Value>>(column: Ident, list: impl IntoIterator<Item = T>) -> Expr {
        Expr::InList(ExprInList {
            column,
            list: list.into_iter().map(Into::into).collect(),
        })
    }

    pub fn is_null(column: Ident) -> Expr {
        Expr::IsNull(ExprIsNull {
            column,
            negate: false,
        })
    }

    pub fn is_not_null(column: Ident) -> Expr {
        Expr::IsNull(ExprIsNull {
            column,
            negate: true,
        })
    }

    pub fn like(column: Ident, pattern: impl Into<String>) -> Expr {
        Expr::Like(ExprLike {
            column,
            pattern: pattern.into(),
            case_insensitive: false,
        })
    }

    pub fn ilike(column: Ident, pattern: impl Into<String>) -> Expr {
        Expr::Like(ExprLike {
            column,
            pattern: pattern.into(),
            case_insensitive: true,
        })
    }

    /// Returns `true` if the expression places no condition on the rows.
    pub fn is_empty(&self) -> bool {
        match self {
            Expr::And(and) => and.operands.iter().all(Expr::is_empty),
            _ => false,
        }
    }

    /// AND-combine `other` onto this condition.
    pub fn and(self, other: impl Into<Expr>) -> Expr {
        let other = other.into();

        if other.is_empty() {
            return self;
        }

        if self.is_empty() {
            return other;
        }

        let mut operands = match self {
            Expr::And(and) => and.operands,
            expr => vec![expr],
        };

        match other {
            Expr::And(and) => operands.extend(and.operands),
            expr => operands.push(expr),
        }

        Expr::And(ExprAnd { operands })
    }

    /// OR-combine `other` with this condition.
    pub fn or(self, other: impl Into<Expr>) -> Expr {
        let mut operands = match self {
            Expr::Or(or) => or.operands,
            expr => vec![expr],
        };

        match other.into() {
            Expr::Or(or) => operands.extend(or.operands),
            expr => operands.push(expr),
        }

        Expr::Or(ExprOr { operands })
    }

    /// Every column the condition refers to, in the order they appear.
    pub fn columns(&self) -> Vec<&Ident> {
        let mut ret = vec![];
        self.collect_columns(&mut ret);
        ret
    }

    fn collect_columns<'a>(&'a self, dst: &mut Vec<&'a Ident>) {
        match self {
            Expr::And(ExprAnd { operands }) | Expr::Or(ExprOr { operands }) => {
                for operand in operands {
                    operand.collect_columns(dst);
                }
            }
            Expr::BinaryOp(expr) => dst.push(&expr.column),
            Expr::InList(expr) => dst.push(&expr.column),
            Expr::IsNull(expr) => dst.push(&expr.column),
            Expr::Like(expr) => dst.push(&expr.column),
        }
    }
}

impl Default for Expr {
    fn default() -> Self {
        Expr::all()
    }
}
