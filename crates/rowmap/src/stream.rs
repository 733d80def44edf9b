use crate::{Record, Table};

use rowmap_core::{
    driver::Rows,
    stmt::{Expr, OrderBy, Query},
    Error, Result,
};
use rowmap_sql::Statement;

use std::ops::{Bound, RangeBounds};

/// A lazily executed query over one table.
///
/// The query runs on first access, at most once. Records are kept as they
/// are yielded, so the stream can be walked again and indexed without
/// querying again; the kept records do not see later writes. A stream
/// created with [`nocache`](ResultStream::nocache) can be walked once and
/// cannot be indexed.
///
/// [`refine`](ResultStream::refine), [`order_by`](ResultStream::order_by),
/// [`limit`](ResultStream::limit) and [`offset`](ResultStream::offset)
/// never change a stream: they return a new, unexecuted one built from the
/// same query, whether or not this stream has run.
#[derive(Debug, Clone)]
pub struct ResultStream {
    table: Table,
    query: Query,

    cache_enabled: bool,

    /// Rows not yet turned into records. `None` until executed.
    rows: Option<Rows>,

    /// Records yielded so far, when caching
    cache: Vec<Record>,

    /// Set once an uncached stream has yielded its last record
    drained: bool,
}

/// Iterator over the records of a [`ResultStream`].
///
/// Replays cached records first, then continues with rows not yet read.
#[derive(Debug)]
pub struct Iter<'a> {
    stream: &'a mut ResultStream,
    position: usize,
    done: bool,
}

impl ResultStream {
    pub(crate) fn new(table: Table, query: Query) -> ResultStream {
        let cache_enabled = table.engine().cache_results;

        ResultStream {
            table,
            query,
            cache_enabled,
            rows: None,
            cache: vec![],
            drained: false,
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Stops keeping yielded records.
    pub fn nocache(mut self) -> ResultStream {
        self.cache_enabled = false;
        self.cache.clear();
        self
    }

    pub fn is_cached(&self) -> bool {
        self.cache_enabled
    }

    pub fn is_executed(&self) -> bool {
        self.rows.is_some()
    }

    /// Runs the query unless it already ran.
    pub fn execute(&mut self) -> Result<()> {
        if self.rows.is_none() {
            let stmt = Statement::query(self.query.clone());
            self.rows = Some(self.table.engine().query(&stmt)?);
        }

        Ok(())
    }

    pub fn iter(&mut self) -> Iter<'_> {
        Iter {
            stream: self,
            position: 0,
            done: false,
        }
    }

    /// Every record, in order.
    pub fn records(&mut self) -> Result<Vec<Record>> {
        self.iter().collect()
    }

    pub fn first(&mut self) -> Result<Option<Record>> {
        self.iter().next().transpose()
    }

    /// Number of records, reading every row.
    pub fn len(&mut self) -> Result<usize> {
        self.require_cache()?;
        self.fill(None)?;
        Ok(self.cache.len())
    }

    pub fn is_empty(&mut self) -> Result<bool> {
        self.require_cache()?;
        self.fill(Some(1))?;
        Ok(self.cache.is_empty())
    }

    /// Returns the record at `index`. Negative indices count from the end.
    pub fn get(&mut self, index: isize) -> Result<Record> {
        self.require_cache()?;

        let position = if index < 0 {
            self.fill(None)?;
            usize::try_from(self.cache.len() as isize + index).ok()
        } else {
            let position = index.unsigned_abs();
            self.fill(Some(position + 1))?;
            Some(position)
        };

        position
            .and_then(|position| self.cache.get(position))
            .cloned()
            .ok_or_else(|| Error::index_out_of_range(index, self.cache.len()))
    }

    /// Returns the records in `range`.
    ///
    /// Negative bounds count from the end. Bounds past either end are
    /// clamped, so the result may be empty but never fails for range.
    pub fn slice(&mut self, range: impl RangeBounds<isize>) -> Result<Vec<Record>> {
        self.require_cache()?;

        let start = range.start_bound().cloned();
        let end = range.end_bound().cloned();

        match end {
            Bound::Included(end) if end >= 0 && !is_negative(start) => {
                self.fill(Some(end.unsigned_abs() + 1))?
            }
            Bound::Excluded(end) if end >= 0 && !is_negative(start) => {
                self.fill(Some(end.unsigned_abs()))?
            }
            _ => self.fill(None)?,
        }

        let len = self.cache.len();
        let resolve = |index: isize| {
            if index < 0 {
                len.saturating_sub(index.unsigned_abs())
            } else {
                index.unsigned_abs().min(len)
            }
        };

        let start = match start {
            Bound::Included(start) => resolve(start),
            Bound::Excluded(start) => (resolve(start) + 1).min(len),
            Bound::Unbounded => 0,
        };

        let end = match end {
            Bound::Included(end) => (resolve(end) + 1).min(len),
            Bound::Excluded(end) => resolve(end),
            Bound::Unbounded => len,
        };

        Ok(self.cache.get(start..end).unwrap_or_default().to_vec())
    }

    /// Number of rows the database reported for the query.
    ///
    /// Runs the query if needed without reading its rows. A dialect that
    /// reports no row count for reads (SQLite) returns 0; use
    /// [`Table::count`] or [`len`](ResultStream::len) there.
    pub fn count(&mut self) -> Result<u64> {
        self.execute()?;

        if !self.table.engine().capability().select_row_count {
            return Ok(0);
        }

        Ok(self.rows.as_ref().and_then(Rows::row_count).unwrap_or(0))
    }

    /// A new stream that also requires `filter`.
    pub fn refine(&self, filter: impl Into<Expr>) -> Result<ResultStream> {
        let filter = filter.into();
        self.derive(|query| query.and(filter))
    }

    /// A new stream with the ordering replaced by `clause`, such as
    /// `"name DESC, id"`.
    pub fn order_by(&self, clause: &str) -> Result<ResultStream> {
        let order_by = OrderBy::parse(clause)?;
        self.derive(|query| Query {
            order_by: Some(order_by),
            ..query
        })
    }

    pub fn limit(&self, limit: u64) -> Result<ResultStream> {
        self.derive(|query| Query {
            limit: Some(limit),
            ..query
        })
    }

    pub fn offset(&self, offset: u64) -> Result<ResultStream> {
        self.derive(|query| Query {
            offset: Some(offset),
            ..query
        })
    }

    fn derive(&self, f: impl FnOnce(Query) -> Query) -> Result<ResultStream> {
        if self.query.is_raw() {
            return Err(Error::invalid_statement(format!(
                "a raw query cannot be refined; table={}",
                self.table.name()
            )));
        }

        Ok(ResultStream {
            table: self.table.clone(),
            query: f(self.query.clone()),
            cache_enabled: self.cache_enabled,
            rows: None,
            cache: vec![],
            drained: false,
        })
    }

    fn require_cache(&self) -> Result<()> {
        if self.cache_enabled {
            Ok(())
        } else {
            Err(Error::no_cache())
        }
    }

    /// Reads rows into the cache until it holds `len` records, or every row
    /// when `len` is `None`.
    fn fill(&mut self, len: Option<usize>) -> Result<()> {
        while len.map_or(true, |len| self.cache.len() < len) {
            if self.next_row()?.is_none() {
                break;
            }
        }

        Ok(())
    }

    fn next_row(&mut self) -> Result<Option<Record>> {
        self.execute()?;

        let Some(row) = self.rows.as_mut().and_then(Iterator::next) else {
            if !self.cache_enabled {
                self.drained = true;
            }
            return Ok(None);
        };

        let record = Record::from_row(self.table.clone(), row);

        if self.cache_enabled {
            self.cache.push(record.clone());
        }

        Ok(Some(record))
    }
}

impl Iterator for Iter<'_> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Result<Record>> {
        if self.done {
            return None;
        }

        if self.stream.cache_enabled {
            if let Some(record) = self.stream.cache.get(self.position) {
                self.position += 1;
                return Some(Ok(record.clone()));
            }
        } else if self.stream.drained {
            self.done = true;
            return Some(Err(Error::no_cache()));
        }

        match self.stream.next_row() {
            Ok(Some(record)) => {
                self.position += 1;
                Some(Ok(record))
            }
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl<'a> IntoIterator for &'a mut ResultStream {
    type Item = Result<Record>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

fn is_negative(bound: Bound<isize>) -> bool {
    matches!(bound, Bound::Included(index) | Bound::Excluded(index) if index < 0)
}
