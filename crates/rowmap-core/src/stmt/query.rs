use super::{Expr, OrderBy, Raw, Source, Value};

/// A read statement template.
///
/// Queries are immutable once handed to a result stream. Refining one
/// produces a new query.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub source: Source,
    pub filter: Expr,
    pub order_by: Option<OrderBy>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl Query {
    pub fn table(name: impl Into<String>) -> Query {
        Query {
            source: Source::Table(name.into()),
            filter: Expr::all(),
            order_by: None,
            limit: None,
            offset: None,
        }
    }

    pub fn raw<T: Into<Value>>(sql: impl Into<String>, params: impl IntoIterator<Item = T>) -> Query {
        Query {
            source: Source::Raw(Raw {
                sql: sql.into(),
                params: params
                    .into_iter()
                    .map(|value| super::Param::positional(value.into()))
                    .collect(),
            }),
            filter: Expr::all(),
            order_by: None,
            limit: None,
            offset: None,
        }
    }

    pub fn filter(mut self, filter: impl Into<Expr>) -> Query {
        self.filter = filter.into();
        self
    }

    /// AND-combines `filter` onto the current filter.
    pub fn and(mut self, filter: impl Into<Expr>) -> Query {
        let current = std::mem::take(&mut self.filter);
        self.filter = current.and(filter);
        self
    }

    pub fn is_raw(&self) -> bool {
        self.source.is_raw()
    }
}
