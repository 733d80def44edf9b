mod builder;
pub use builder::Builder;

mod connect;
pub use connect::Connect;

mod transaction;
pub use transaction::Transaction;

use crate::{engine::Engine, Table};

use indexmap::IndexMap;
use log::debug;
use rowmap_core::{driver::Capability, Error, Result};

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Shared state between all `Db` clones.
#[derive(Debug)]
struct Shared {
    engine: Arc<Engine>,

    /// Tables by name, in the order the catalog listed them
    tables: Mutex<IndexMap<String, Table>>,
}

/// A database handle and its schema catalog.
///
/// Cloning is cheap; every clone refers to the same connection and catalog.
#[derive(Debug, Clone)]
pub struct Db {
    shared: Arc<Shared>,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Connects with the default settings.
    pub fn connect(url: &str) -> Result<Db> {
        Db::builder().connect(url)
    }

    pub(crate) fn new(engine: Engine) -> Result<Db> {
        let db = Db {
            shared: Arc::new(Shared {
                engine: Arc::new(engine),
                tables: Mutex::new(IndexMap::new()),
            }),
        };

        db.refresh_tables()?;
        Ok(db)
    }

    /// Returns the catalog entry for `name`.
    pub fn table(&self, name: &str) -> Result<Table> {
        self.tables_lock()
            .get(name)
            .cloned()
            .ok_or_else(|| Error::table_not_found(name))
    }

    /// Every table in the catalog.
    pub fn tables(&self) -> Vec<Table> {
        self.tables_lock().values().cloned().collect()
    }

    pub fn table_names(&self) -> Vec<String> {
        self.tables_lock().keys().cloned().collect()
    }

    /// Rebuilds the catalog from the database.
    ///
    /// Every table is replaced, dropping the relations registered on it.
    /// `Table` handles obtained earlier keep their old metadata.
    pub fn refresh_tables(&self) -> Result<()> {
        let engine = &self.shared.engine;
        let mut tables = IndexMap::new();

        for name in engine.tables()? {
            let primary_key = engine.primary_key(&name)?;
            let table = Table::new(name.clone(), primary_key, engine.clone());
            tables.insert(name, table);
        }

        debug!("refreshed catalog; tables={}", tables.len());
        *self.tables_lock() = tables;
        Ok(())
    }

    /// Runs one or more statements, without parameters, outside of any
    /// table. Does not refresh the catalog.
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        self.shared.engine.execute_batch(sql)
    }

    pub fn capability(&self) -> &'static Capability {
        self.shared.engine.capability()
    }

    /// The URL of the underlying driver.
    pub fn url(&self) -> String {
        self.shared.engine.driver().url().into_owned()
    }

    pub(crate) fn engine(&self) -> &Engine {
        &self.shared.engine
    }

    fn tables_lock(&self) -> MutexGuard<'_, IndexMap<String, Table>> {
        self.shared
            .tables
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
