use super::{params::Bind, Comma, Delimited, Params, ToSql};

use rowmap_core::stmt::{self, BinaryOp, Expr};

impl ToSql for &Expr {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        use Expr::*;

        match self {
            And(expr) => {
                let operands = expr.operands.iter().filter(|operand| !operand.is_empty());
                fmt!(f, Delimited(operands.map(Grouped), " AND "));
            }
            BinaryOp(expr) => expr.to_sql(f),
            InList(expr) => expr.to_sql(f),
            IsNull(expr) => {
                let op = if expr.negate {
                    " IS NOT NULL"
                } else {
                    " IS NULL"
                };
                fmt!(f, &expr.column op);
            }
            Like(expr) => {
                let op = if expr.case_insensitive && f.serializer.capability.ilike {
                    " ILIKE "
                } else {
                    " LIKE "
                };
                let pattern = stmt::Value::String(expr.pattern.clone());
                let bind = Bind {
                    column: expr.column.as_str(),
                    value: &pattern,
                };
                fmt!(f, &expr.column op bind);
            }
            Or(expr) => {
                fmt!(f, Delimited(expr.operands.iter().map(Grouped), " OR "));
            }
        }
    }
}

impl ToSql for &stmt::ExprBinaryOp {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        // `col = NULL` never matches; compare against NULL the SQL way.
        if self.value.is_null() {
            match self.op {
                BinaryOp::Eq => return fmt!(f, &self.column " IS NULL"),
                BinaryOp::Ne => return fmt!(f, &self.column " IS NOT NULL"),
                _ => {}
            }
        }

        let bind = Bind {
            column: self.column.as_str(),
            value: &self.value,
        };

        fmt!(f, &self.column self.op.as_str() bind);
    }
}

impl ToSql for &stmt::ExprInList {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let column = self.column.as_str();

        // Membership in an empty list matches no row.
        if self.list.is_empty() {
            return fmt!(f, "1=0");
        }

        if f.serializer.capability.list_any {
            let list = stmt::Value::List(self.list.clone());
            let bind = Bind {
                column,
                value: &list,
            };
            fmt!(f, &self.column " = ANY(" bind ")");
        } else {
            let binds = Comma(self.list.iter().map(|value| Bind { column, value }));
            fmt!(f, &self.column " IN (" binds ")");
        }
    }
}

/// Parenthesizes an operand whose precedence differs from the surrounding
/// AND/OR group.
struct Grouped<'a>(&'a Expr);

impl ToSql for Grouped<'_> {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        match self.0 {
            Expr::And(and) => match and.operands.iter().filter(|e| !e.is_empty()).count() {
                0 => fmt!(f, "1=1"),
                1 => fmt!(f, self.0),
                _ => fmt!(f, "(" self.0 ")"),
            },
            Expr::Or(_) => fmt!(f, "(" self.0 ")"),
            expr => fmt!(f, expr),
        }
    }
}
