use crate::{engine::Engine, Record, Relation, ResultStream};

use indexmap::IndexMap;
use log::debug;
use rowmap_core::{
    stmt::{Column, Expr, Ident, OrderBy, Query, Value},
    Error, Result,
};
use rowmap_sql::Statement;

use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
};

/// One table of the catalog.
///
/// Handles are cheap to clone and compare by identity: two handles are equal
/// when they refer to the same catalog entry.
#[derive(Clone)]
pub struct Table {
    inner: Arc<TableInner>,
}

pub(crate) struct TableInner {
    name: String,
    engine: Arc<Engine>,
    state: Mutex<TableState>,
}

#[derive(Debug, Default)]
struct TableState {
    /// Authoritative unless overridden with `set_primary_key`
    primary_key: Vec<String>,

    /// Fetched on first use
    columns: Option<Columns>,

    /// Ordering for queries that set none
    order_by: Option<OrderBy>,

    relations: IndexMap<String, Relation>,
}

#[derive(Debug, Clone)]
struct Columns {
    all: Vec<String>,
    computed: Vec<String>,
}

impl Table {
    pub(crate) fn new(name: String, primary_key: Vec<String>, engine: Arc<Engine>) -> Table {
        Table {
            inner: Arc::new(TableInner {
                name,
                engine,
                state: Mutex::new(TableState {
                    primary_key,
                    ..TableState::default()
                }),
            }),
        }
    }

    pub(crate) fn downgrade(&self) -> Weak<TableInner> {
        Arc::downgrade(&self.inner)
    }

    pub(crate) fn upgrade(inner: &Weak<TableInner>) -> Option<Table> {
        inner.upgrade().map(|inner| Table { inner })
    }

    pub(crate) fn engine(&self) -> &Engine {
        &self.inner.engine
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Primary key columns, in key order. Empty when the table has none.
    pub fn primary_key(&self) -> Vec<String> {
        self.state().primary_key.clone()
    }

    /// Replaces the primary key read from storage.
    pub fn set_primary_key<I, S>(&self, columns: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns = columns
            .into_iter()
            .map(|column| Ident::new(column).map(Ident::into_string))
            .collect::<Result<Vec<_>>>()?;

        self.state().primary_key = columns;
        Ok(())
    }

    /// Every column name, in declaration order.
    pub fn columns(&self) -> Result<Vec<String>> {
        Ok(self.load_columns()?.all)
    }

    /// Columns computed by the database, which cannot be written.
    pub fn computed_columns(&self) -> Result<Vec<String>> {
        Ok(self.load_columns()?.computed)
    }

    /// Drops the cached column names; the next use reads them again.
    pub fn refresh_columns(&self) {
        self.state().columns = None;
    }

    pub fn order_by(&self) -> Option<OrderBy> {
        self.state().order_by.clone()
    }

    /// Sets the ordering of queries that do not order themselves. `None`
    /// falls back to the first primary key column.
    pub fn set_order_by(&self, clause: Option<&str>) -> Result<()> {
        let order_by = clause.map(OrderBy::parse).transpose()?;
        self.state().order_by = order_by;
        Ok(())
    }

    /// A handle to build conditions on column `name`.
    pub fn column(&self, name: &str) -> Result<Column> {
        Column::new(name)
    }

    /// A new record, not yet written.
    pub fn record<I, K, V>(&self, values: I) -> Result<Record>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let mut record = Record::new(self.clone());

        for (name, value) in values {
            record.set(name.as_ref(), value)?;
        }

        Ok(record)
    }

    /// Rows matching `filter`.
    ///
    /// Nothing runs until the stream is read. Rows are ordered by the
    /// table's ordering, or else by its first primary key column.
    pub fn get_where(&self, filter: impl Into<Expr>) -> ResultStream {
        let mut query = Query::table(self.name()).filter(filter);
        query.order_by = self.default_order_by();
        ResultStream::new(self.clone(), query)
    }

    pub fn all(&self) -> ResultStream {
        self.get_where(Expr::all())
    }

    /// Rows matching the primary key `values`, given in key order.
    pub fn get_where_pk<I, V>(&self, values: I) -> Result<ResultStream>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let primary_key = self.primary_key();
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();

        if primary_key.is_empty() {
            return Err(Error::no_primary_key(format!("table={}", self.name())));
        }

        if primary_key.len() != values.len() {
            return Err(Error::no_primary_key(format!(
                "table={}; expected {} key values, got {}",
                self.name(),
                primary_key.len(),
                values.len()
            )));
        }

        let filter = Expr::matching(primary_key.iter().zip(values))?;
        Ok(self.get_where(filter))
    }

    /// The single row matching `filter`, if any.
    ///
    /// Fails with an `unexpected row count` error when more than one row
    /// matches.
    pub fn get_one(&self, filter: impl Into<Expr>) -> Result<Option<Record>> {
        let mut records = self.get_where(filter).limit(2)?.records()?;

        if records.len() > 1 {
            return Err(Error::unexpected_row_count(format!(
                "expected at most 1 row, found more; table={}",
                self.name()
            )));
        }

        Ok(records.pop())
    }

    /// Number of rows in the table.
    pub fn count(&self) -> Result<u64> {
        let stmt = Statement::count(Query::table(self.name()));
        let mut rows = self.engine().query(&stmt)?;

        let count = rows
            .next()
            .and_then(|row| row.values().first().and_then(Value::as_i64))
            .ok_or_else(|| rowmap_core::err!("COUNT(*) returned no value; table={}", self.name()))?;

        Ok(count.unsigned_abs())
    }

    /// Rows of caller written SQL, bound with positional parameters.
    ///
    /// Records keep every selected column. Only this table's columns are
    /// written back on flush. The stream cannot be refined.
    pub fn get_raw<I, V>(&self, sql: &str, params: I) -> ResultStream
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        ResultStream::new(self.clone(), Query::raw(sql, params))
    }

    /// Returns `true` if `record` belongs to this table.
    pub fn contains(&self, record: &Record) -> bool {
        record.table() == self
    }

    /// Registers `relation` under `name`, replacing any previous one.
    ///
    /// Records that already resolved `name` keep the cached result.
    pub fn relate(&self, name: &str, relation: Relation) -> Result<()> {
        let name = Ident::new(name)?.into_string();
        debug!("relate; table={}; name={name}; relation={relation:?}", self.name());
        self.state().relations.insert(name, relation);
        Ok(())
    }

    /// Relates each record to at most one `target` row whose
    /// `target_column` equals the record's `column`.
    pub fn relate_one(&self, name: &str, column: &str, target: &Table, target_column: &str) -> Result<()> {
        self.relate(name, Relation::one(column, target, target_column)?)
    }

    /// Relates each record to every `target` row whose `target_column`
    /// equals the record's `column`.
    pub fn relate_many(&self, name: &str, column: &str, target: &Table, target_column: &str) -> Result<()> {
        self.relate(name, Relation::many(column, target, target_column)?)
    }

    /// Relates each record to `field` of the records relation `base`
    /// resolves to.
    pub fn substratum(&self, name: &str, base: &str, field: &str) -> Result<()> {
        self.relate(name, Relation::substratum(base, field))
    }

    /// Relates each record to the results of relation `target` on every
    /// record relation `base` resolves to.
    pub fn aggregate(&self, name: &str, base: &str, target: &str) -> Result<()> {
        self.relate(name, Relation::aggregate(base, target))
    }

    pub fn relation(&self, name: &str) -> Option<Relation> {
        self.state().relations.get(name).cloned()
    }

    pub fn relation_names(&self) -> Vec<String> {
        self.state().relations.keys().cloned().collect()
    }

    pub fn remove_relation(&self, name: &str) -> Option<Relation> {
        self.state().relations.shift_remove(name)
    }

    fn default_order_by(&self) -> Option<OrderBy> {
        let state = self.state();

        state.order_by.clone().or_else(|| {
            let column = state.primary_key.first()?;
            Ident::new(column.as_str()).ok().map(OrderBy::column)
        })
    }

    fn load_columns(&self) -> Result<Columns> {
        if let Some(columns) = &self.state().columns {
            return Ok(columns.clone());
        }

        let mut columns = Columns {
            all: vec![],
            computed: vec![],
        };

        for column in self.engine().columns(self.name())? {
            if column.generated {
                columns.computed.push(column.name.clone());
            }
            columns.all.push(column.name);
        }

        self.state().columns = Some(columns.clone());
        Ok(columns)
    }

    fn state(&self) -> MutexGuard<'_, TableState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Table) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Table {}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("name", &self.inner.name)
            .field("primary_key", &self.state().primary_key)
            .finish()
    }
}
