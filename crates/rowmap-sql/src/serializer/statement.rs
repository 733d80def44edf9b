use super::{params::Bind, Comma, Params, TableName, ToSql};

use crate::stmt::{self, Statement};

use rowmap_core::stmt::{Expr, Ident, OrderBy, OrderByExpr, Query, Source, Value};

/// `SET` assignments in column name order
pub(super) struct Assignments<'a>(pub(super) &'a [(Ident, Value)]);

/// `(cols) VALUES (placeholders)` in column name order
pub(super) struct InsertValues<'a>(pub(super) &'a [(Ident, Value)]);

struct Filter<'a>(&'a Expr);

struct Returning(bool);

fn sorted(pairs: &[(Ident, Value)]) -> Vec<&(Ident, Value)> {
    let mut pairs: Vec<_> = pairs.iter().collect();
    pairs.sort_by(|a, b| a.0.cmp(&b.0));
    pairs
}

impl ToSql for &Statement {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        match self {
            Statement::Query(stmt) => stmt.to_sql(f),
            Statement::Count(stmt) => match &stmt.source {
                Source::Table(table) => {
                    fmt!(f, "SELECT COUNT(*) FROM " TableName(table) Filter(&stmt.filter));
                }
                Source::Raw(raw) => {
                    fmt!(f, "SELECT COUNT(*) FROM (" raw ") AS " TableName("raw"));
                }
            },
            Statement::Insert(stmt) => stmt.to_sql(f),
            Statement::Update(stmt) => stmt.to_sql(f),
            Statement::Delete(stmt) => stmt.to_sql(f),
            Statement::LastInsert(stmt) => {
                fmt!(f, "SELECT * FROM " TableName(&stmt.table) " WHERE rowid = last_insert_rowid()");
            }
        }
    }
}

impl ToSql for &Query {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let table = match &self.source {
            Source::Table(table) => table,
            Source::Raw(raw) => {
                debug_assert!(
                    self.filter.is_empty()
                        && self.order_by.is_none()
                        && self.limit.is_none()
                        && self.offset.is_none(),
                    "raw queries cannot be refined; query={self:#?}"
                );
                return fmt!(f, raw);
            }
        };

        let order_by = self.order_by.as_ref().map(|order_by| (" ", order_by));

        let limit = match (self.limit, self.offset) {
            (Some(limit), _) => Some((" LIMIT ", limit)),
            (None, Some(_)) if f.serializer.capability.offset_requires_limit => {
                Some((" LIMIT ", u64::MAX))
            }
            (None, _) => None,
        };
        let offset = self.offset.map(|offset| (" OFFSET ", offset));

        fmt!(f, "SELECT * FROM " TableName(table) Filter(&self.filter) order_by);

        // SQLite spells "no limit" as a negative limit.
        match limit {
            Some((_, u64::MAX)) if f.serializer.is_sqlite() => fmt!(f, " LIMIT -1"),
            limit => fmt!(f, limit),
        }

        fmt!(f, offset);
    }
}

impl ToSql for &rowmap_core::stmt::Raw {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let sql = self.sql.trim().trim_end_matches(';').trim_end();
        fmt!(f, sql);

        for param in &self.params {
            f.params.push_positional(&param.value);
        }
    }
}

impl ToSql for Filter<'_> {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        if !self.0.is_empty() {
            fmt!(f, " WHERE " self.0);
        }
    }
}

impl ToSql for &OrderBy {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        fmt!(f, "ORDER BY " Comma(&self.exprs));
    }
}

impl ToSql for &OrderByExpr {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let direction = self.direction.map(|direction| (" ", direction.as_str()));
        let nulls = self.nulls.map(|nulls| (" ", nulls.as_str()));

        fmt!(f, &self.column direction nulls);
    }
}

impl ToSql for &stmt::Insert {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let table = TableName(&self.table);

        if self.values.is_empty() {
            fmt!(f, "INSERT INTO " table " DEFAULT VALUES");
        } else {
            fmt!(f, "INSERT INTO " table " " InsertValues(&self.values));
        }

        fmt!(f, Returning(self.returning));
    }
}

impl ToSql for &stmt::Update {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        assert!(
            !self.assignments.is_empty(),
            "UPDATE requires at least one assignment; table={}",
            self.table
        );

        fmt!(
            f, "UPDATE " TableName(&self.table) " SET " Assignments(&self.assignments) Filter(&self.filter) Returning(self.returning)
        );
    }
}

impl ToSql for &stmt::Delete {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        fmt!(f, "DELETE FROM " TableName(&self.table) Filter(&self.filter));
    }
}

impl ToSql for Assignments<'_> {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let assignments = Comma(sorted(self.0).into_iter().map(|(column, value)| {
            (
                (column, "="),
                Bind {
                    column: column.as_str(),
                    value,
                },
            )
        }));

        fmt!(f, assignments);
    }
}

impl ToSql for InsertValues<'_> {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let pairs = sorted(self.0);
        let columns = Comma(pairs.iter().map(|(column, _)| column));
        let values = Comma(pairs.iter().map(|(column, value)| Bind {
            column: column.as_str(),
            value,
        }));

        fmt!(f, "(" columns ") VALUES (" values ")");
    }
}

impl ToSql for Returning {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        if self.0 {
            fmt!(f, " RETURNING *");
        }
    }
}
