#[macro_use]
mod fmt;
use fmt::ToSql;

mod delim;
use delim::{Comma, Delimited};

mod expr;

mod flavor;
use flavor::Flavor;

mod ident;
use ident::TableName;

mod params;
pub use params::{Params, Placeholder};

mod statement;

use crate::stmt::{Statement, Transaction};

use rowmap_core::{
    driver::Capability,
    stmt::{Expr, Ident, Value},
};

/// Serialize a statement to a SQL string
#[derive(Debug, Clone, Copy)]
pub struct Serializer {
    /// The database flavor handles the differences between placeholder
    /// syntax.
    flavor: Flavor,

    /// Dialect features that change the shape of generated SQL.
    capability: &'static Capability,
}

struct Formatter<'a, T> {
    /// Handle to the serializer
    serializer: &'a Serializer,

    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut T,
}

impl Serializer {
    pub fn serialize(&self, stmt: &Statement, params: &mut impl Params) -> String {
        let mut ret = String::new();

        let mut fmt = Formatter {
            serializer: self,
            dst: &mut ret,
            params,
        };

        stmt.to_sql(&mut fmt);

        ret.push(';');
        ret
    }

    /// Serializes a filter condition without the `WHERE` keyword:
    /// `col1=<p1> AND col2 IN <p2>`. An empty condition serializes to an
    /// empty string.
    pub fn where_fragment(&self, expr: &Expr, params: &mut impl Params) -> String {
        self.fragment(params, |f| {
            if !expr.is_empty() {
                fmt!(f, expr);
            }
        })
    }

    /// Serializes `col1=<p1>, col2=<p2>`, columns in name order.
    pub fn set_fragment(&self, assignments: &[(Ident, Value)], params: &mut impl Params) -> String {
        self.fragment(params, |f| fmt!(f, statement::Assignments(assignments)))
    }

    /// Serializes `(col1, col2) VALUES (<p1>, <p2>)`, columns in name order.
    /// No columns serializes to an empty string.
    pub fn insert_fragment(&self, values: &[(Ident, Value)], params: &mut impl Params) -> String {
        self.fragment(params, |f| {
            if !values.is_empty() {
                fmt!(f, statement::InsertValues(values));
            }
        })
    }

    /// Serialize a transaction control operation to a SQL string.
    pub fn serialize_transaction(&self, op: Transaction) -> String {
        match op {
            Transaction::Begin => "BEGIN",
            Transaction::Commit => "COMMIT",
            Transaction::Rollback => "ROLLBACK",
        }
        .to_string()
    }

    pub fn capability(&self) -> &'static Capability {
        self.capability
    }

    fn fragment<P: Params>(&self, params: &mut P, body: impl FnOnce(&mut Formatter<'_, P>)) -> String {
        let mut ret = String::new();

        let mut fmt = Formatter {
            serializer: self,
            dst: &mut ret,
            params,
        };

        body(&mut fmt);
        ret
    }
}
