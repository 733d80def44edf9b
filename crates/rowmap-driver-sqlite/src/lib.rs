mod value;
pub(crate) use value::Value;

use rusqlite::Connection as RusqliteConnection;
use rowmap_core::{
    driver::{Capability, Driver, Rows},
    schema::ColumnInfo,
    stmt::Param,
    Error, Result,
};
use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};
use url::Url;

#[derive(Debug)]
pub enum Sqlite {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Create a new SQLite driver with an arbitrary connection URL
    ///
    /// `sqlite::memory:` opens an in-memory database; any other path is
    /// opened as a file.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(|err| {
            Error::invalid_connection_url(format!("{err}; url={url_str}"))
        })?;

        if url.scheme() != "sqlite" {
            return Err(Error::invalid_connection_url(format!(
                "connection URL does not have a `sqlite` scheme; url={url_str}"
            )));
        }

        match url.path() {
            ":memory:" => Ok(Self::InMemory),
            "" => Err(Error::invalid_connection_url(format!(
                "missing database path; url={url_str}"
            ))),
            path => Ok(Self::File(PathBuf::from(path))),
        }
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }
}

impl Driver for Sqlite {
    fn capability(&self) -> &'static Capability {
        &Capability::SQLITE
    }

    fn url(&self) -> Cow<'_, str> {
        match self {
            Sqlite::InMemory => Cow::Borrowed("sqlite::memory:"),
            Sqlite::File(path) => Cow::Owned(format!("sqlite:{}", path.display())),
        }
    }

    fn connect(&self) -> Result<Box<dyn rowmap_core::Connection>> {
        let connection = match self {
            Sqlite::File(path) => Connection::open(path)?,
            Sqlite::InMemory => Connection::in_memory()?,
        };
        Ok(Box::new(connection))
    }
}

#[derive(Debug)]
pub struct Connection {
    connection: RusqliteConnection,
}

impl Connection {
    pub fn in_memory() -> Result<Self> {
        let connection = RusqliteConnection::open_in_memory().map_err(Error::driver)?;
        Ok(Self { connection })
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = RusqliteConnection::open(path).map_err(Error::driver)?;
        Ok(Self { connection })
    }

    fn prepare(&self, sql: &str, params: &[Param]) -> Result<rusqlite::CachedStatement<'_>> {
        let mut stmt = self.connection.prepare_cached(sql).map_err(Error::driver)?;

        for (i, param) in params.iter().enumerate() {
            let index = match &param.name {
                Some(name) => stmt
                    .parameter_index(&format!(":{name}"))
                    .map_err(Error::driver)?
                    .ok_or_else(|| {
                        Error::invalid_statement(format!("no placeholder `:{name}` in `{sql}`"))
                    })?,
                None => i + 1,
            };

            stmt.raw_bind_parameter(index, Value::from(param.value.clone()))
                .map_err(Error::driver)?;
        }

        Ok(stmt)
    }

    /// One row per column of `table`: (name, primary key ordinal, hidden).
    fn table_xinfo(&self, table: &str) -> Result<Vec<(String, i64, i64)>> {
        let mut stmt = self
            .connection
            .prepare_cached("SELECT name, pk, hidden FROM pragma_table_xinfo(?1) ORDER BY cid")
            .map_err(Error::driver)?;

        let rows = stmt
            .query_map([table], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))
            .map_err(Error::driver)?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(Error::driver)
    }
}

impl rowmap_core::Connection for Connection {
    fn query(&mut self, sql: &str, params: &[Param]) -> Result<Rows> {
        let mut stmt = self.prepare(sql, params)?;

        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let width = columns.len();

        let mut rows = stmt.raw_query();
        let mut values = vec![];

        while let Some(row) = rows.next().map_err(Error::driver)? {
            let mut record = Vec::with_capacity(width);

            for index in 0..width {
                let value = row.get_ref(index).map_err(Error::driver)?;
                record.push(Value::from_sql(value)?.into_inner());
            }

            values.push(record);
        }

        // SQLite does not report how many rows a read matched
        Ok(Rows::new(columns, values, None))
    }

    fn execute(&mut self, sql: &str, params: &[Param]) -> Result<u64> {
        let mut stmt = self.prepare(sql, params)?;
        let count = stmt.raw_execute().map_err(Error::driver)?;
        Ok(count as u64)
    }

    fn execute_batch(&mut self, sql: &str) -> Result<()> {
        self.connection.execute_batch(sql).map_err(Error::driver)
    }

    fn tables(&mut self) -> Result<Vec<String>> {
        let mut stmt = self
            .connection
            .prepare_cached(
                "SELECT name FROM sqlite_master \
                 WHERE type = 'table' AND name NOT LIKE 'sqlite_%' \
                 ORDER BY name",
            )
            .map_err(Error::driver)?;

        let rows = stmt
            .query_map([], |row| row.get(0))
            .map_err(Error::driver)?;

        rows.collect::<rusqlite::Result<Vec<String>>>()
            .map_err(Error::driver)
    }

    fn primary_key(&mut self, table: &str) -> Result<Vec<String>> {
        let mut pk: Vec<_> = self
            .table_xinfo(table)?
            .into_iter()
            .filter(|(_, ordinal, _)| *ordinal > 0)
            .collect();

        pk.sort_by_key(|(_, ordinal, _)| *ordinal);

        Ok(pk.into_iter().map(|(name, _, _)| name).collect())
    }

    fn columns(&mut self, table: &str) -> Result<Vec<ColumnInfo>> {
        Ok(self
            .table_xinfo(table)?
            .into_iter()
            // hidden: 1 = virtual table column, 2 = generated VIRTUAL,
            // 3 = generated STORED
            .filter(|(_, _, hidden)| *hidden != 1)
            .map(|(name, _, hidden)| ColumnInfo {
                name,
                generated: matches!(hidden, 2 | 3),
            })
            .collect())
    }
}
