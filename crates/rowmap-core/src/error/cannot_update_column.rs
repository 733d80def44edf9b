use super::Error;

/// Error when a value is assigned to a column that cannot be written.
///
/// This occurs when:
/// - The column is generated (computed) by the database
/// - The column name fails identifier validation and could not be placed in
///   SQL text safely
#[derive(Debug)]
pub(super) struct CannotUpdateColumnError {
    column: Box<str>,
    reason: Box<str>,
}

impl std::error::Error for CannotUpdateColumnError {}

impl core::fmt::Display for CannotUpdateColumnError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "cannot update column `{}`: {}", self.column, self.reason)
    }
}

impl Error {
    /// Creates a cannot update column error.
    pub fn cannot_update_column(column: impl Into<String>, reason: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::CannotUpdateColumn(CannotUpdateColumnError {
            column: column.into().into(),
            reason: reason.into().into(),
        }))
    }

    /// Returns `true` if this error is a cannot update column error.
    pub fn is_cannot_update_column(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::CannotUpdateColumn(_))
    }
}
