/// Describes what a storage backend's SQL dialect supports.
#[derive(Debug, PartialEq, Eq)]
pub struct Capability {
    pub dialect: Dialect,

    /// Supports `INSERT ... RETURNING *` and `UPDATE ... RETURNING *`. When
    /// false, written rows are fetched with a follow-up select.
    pub returning: bool,

    /// The number of rows matched by a read is known before the rows are
    /// consumed. When false, a result stream reports zero for `count()`.
    pub select_row_count: bool,

    /// Supports the `ILIKE` operator.
    pub ilike: bool,

    /// List membership is written `col = ANY(<array>)` with the list bound as
    /// a single parameter, instead of an expanded `IN (...)` list.
    pub list_any: bool,

    /// `OFFSET` is only valid after a `LIMIT`.
    pub offset_requires_limit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Named `:name` placeholders.
    Sqlite,

    /// Sequential `$N` placeholders.
    Postgresql,
}

impl Capability {
    /// SQLite capabilities.
    pub const SQLITE: Self = Self {
        dialect: Dialect::Sqlite,
        returning: false,
        select_row_count: false,
        ilike: false,
        list_any: false,
        offset_requires_limit: true,
    };

    /// PostgreSQL capabilities
    pub const POSTGRESQL: Self = Self {
        dialect: Dialect::Postgresql,
        returning: true,
        select_row_count: true,
        ilike: true,
        list_any: true,
        offset_requires_limit: false,
    };

    pub fn is_sqlite(&self) -> bool {
        self.dialect == Dialect::Sqlite
    }

    pub fn is_postgresql(&self) -> bool {
        self.dialect == Dialect::Postgresql
    }
}
