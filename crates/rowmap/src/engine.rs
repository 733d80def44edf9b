use crate::Result;

use log::debug;
use rowmap_core::{
    driver::{Capability, Connection, Driver, Rows},
    schema::ColumnInfo,
    stmt::Param,
};
use rowmap_sql::{stmt::Transaction, Serializer, Statement};

use std::{
    fmt,
    sync::{Mutex, MutexGuard, PoisonError},
};

/// Serializes statements and runs them on the database connection.
///
/// Shared by the [`Db`](crate::Db) handle and every table in its catalog.
pub(crate) struct Engine {
    driver: Box<dyn Driver>,

    /// Statement serializer for the driver's dialect
    serializer: Serializer,

    connection: Mutex<Box<dyn Connection>>,

    /// Default caching policy for new result streams
    pub(crate) cache_results: bool,
}

impl Engine {
    pub(crate) fn new(driver: Box<dyn Driver>, cache_results: bool) -> Result<Engine> {
        let connection = driver.connect()?;
        let serializer = Serializer::new(driver.capability());

        Ok(Engine {
            driver,
            serializer,
            connection: Mutex::new(connection),
            cache_results,
        })
    }

    pub(crate) fn capability(&self) -> &'static Capability {
        self.driver.capability()
    }

    pub(crate) fn driver(&self) -> &dyn Driver {
        &*self.driver
    }

    /// Runs a statement that produces rows and buffers them.
    pub(crate) fn query(&self, stmt: &Statement) -> Result<Rows> {
        let mut params = Vec::<Param>::new();
        let sql = self.serializer.serialize(stmt, &mut params);

        debug!("query; sql={sql}; params={}", params.len());
        self.connection().query(&sql, &params)
    }

    /// Runs a statement and returns the number of affected rows.
    pub(crate) fn execute(&self, stmt: &Statement) -> Result<u64> {
        let mut params = Vec::<Param>::new();
        let sql = self.serializer.serialize(stmt, &mut params);

        debug!("execute; sql={sql}; params={}", params.len());
        self.connection().execute(&sql, &params)
    }

    pub(crate) fn execute_batch(&self, sql: &str) -> Result<()> {
        debug!("execute batch; sql={sql}");
        self.connection().execute_batch(sql)
    }

    pub(crate) fn transaction(&self, op: Transaction) -> Result<()> {
        let sql = self.serializer.serialize_transaction(op);
        self.connection().execute_batch(&sql)
    }

    pub(crate) fn tables(&self) -> Result<Vec<String>> {
        self.connection().tables()
    }

    pub(crate) fn primary_key(&self, table: &str) -> Result<Vec<String>> {
        self.connection().primary_key(table)
    }

    pub(crate) fn columns(&self, table: &str) -> Result<Vec<ColumnInfo>> {
        self.connection().columns(table)
    }

    fn connection(&self) -> MutexGuard<'_, Box<dyn Connection>> {
        self.connection
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("url", &self.driver.url())
            .field("cache_results", &self.cache_results)
            .finish()
    }
}
