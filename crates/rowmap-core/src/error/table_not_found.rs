use super::Error;

/// Error when a table name is not present in the schema catalog.
#[derive(Debug)]
pub(super) struct TableNotFoundError {
    name: Box<str>,
}

impl std::error::Error for TableNotFoundError {}

impl core::fmt::Display for TableNotFoundError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "table not found: {}", self.name)
    }
}

impl Error {
    /// Creates a table not found error.
    pub fn table_not_found(name: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::TableNotFound(TableNotFoundError {
            name: name.into().into(),
        }))
    }

    /// Returns `true` if this error is a table not found error.
    pub fn is_table_not_found(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::TableNotFound(_))
    }
}
