mod capability;
pub use capability::{Capability, Dialect};

mod rows;
pub use rows::{Row, Rows};

use crate::{schema::ColumnInfo, stmt::Param, Result};

use std::{borrow::Cow, fmt::Debug};

/// A storage backend that can open connections.
pub trait Driver: Debug + Send + Sync + 'static {
    /// Describes the dialect spoken by the driver, which informs the
    /// serializer and the write path.
    fn capability(&self) -> &'static Capability;

    /// The connection URL the driver was built from.
    fn url(&self) -> Cow<'_, str>;

    /// Opens a new connection.
    fn connect(&self) -> Result<Box<dyn Connection>>;
}

/// One open connection to the storage backend.
///
/// Every call is a blocking round-trip. Read results are fully buffered so a
/// caller can interleave writes while still walking an earlier result.
pub trait Connection: Debug + Send {
    /// Runs a statement that produces rows.
    fn query(&mut self, sql: &str, params: &[Param]) -> Result<Rows>;

    /// Runs a statement and returns the number of affected rows.
    fn execute(&mut self, sql: &str, params: &[Param]) -> Result<u64>;

    /// Runs one or more statements without parameters.
    fn execute_batch(&mut self, sql: &str) -> Result<()>;

    /// Names of the user tables in the database.
    fn tables(&mut self) -> Result<Vec<String>>;

    /// Primary key columns of `table`, in key order. Empty when the table
    /// has no primary key.
    fn primary_key(&mut self, table: &str) -> Result<Vec<String>>;

    /// Every column of `table`, in declaration order.
    fn columns(&mut self, table: &str) -> Result<Vec<ColumnInfo>>;
}
