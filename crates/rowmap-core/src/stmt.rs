mod column;
pub use column::Column;

mod expr;
pub use expr::Expr;

mod expr_and;
pub use expr_and::ExprAnd;

mod expr_binary_op;
pub use expr_binary_op::ExprBinaryOp;

mod expr_in_list;
pub use expr_in_list::ExprInList;

mod expr_is_null;
pub use expr_is_null::ExprIsNull;

mod expr_like;
pub use expr_like::ExprLike;

mod expr_or;
pub use expr_or::ExprOr;

mod ident;
pub use ident::Ident;

mod op_binary;
pub use op_binary::BinaryOp;

mod order_by;
pub use order_by::OrderBy;

mod order_by_expr;
pub use order_by_expr::{Direction, Nulls, OrderByExpr};

mod param;
pub use param::Param;

mod query;
pub use query::Query;

mod source;
pub use source::{Raw, Source};

mod value;
pub use value::Value;
