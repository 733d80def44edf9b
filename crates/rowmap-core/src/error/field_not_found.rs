use super::Error;

/// Error when a record has neither a stored value nor a relationship under
/// the requested name.
#[derive(Debug)]
pub(super) struct FieldNotFoundError {
    table: Box<str>,
    field: Box<str>,
}

impl std::error::Error for FieldNotFoundError {}

impl core::fmt::Display for FieldNotFoundError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "field not found: table={}; field={}", self.table, self.field)
    }
}

impl Error {
    /// Creates a field not found error.
    pub fn field_not_found(table: impl Into<String>, field: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::FieldNotFound(FieldNotFoundError {
            table: table.into().into(),
            field: field.into().into(),
        }))
    }

    /// Returns `true` if this error is a field not found error.
    pub fn is_field_not_found(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::FieldNotFound(_))
    }
}
