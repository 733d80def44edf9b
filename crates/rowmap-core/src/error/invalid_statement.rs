use super::Error;

/// Error when a statement cannot be built from the caller's input.
///
/// This occurs when:
/// - An ordering clause contains anything other than column names and directions
/// - A raw SQL query is refined, ordered, limited, or offset
/// - Relationship definitions refer to each other in a cycle
#[derive(Debug)]
pub(super) struct InvalidStatementError {
    message: Box<str>,
}

impl std::error::Error for InvalidStatementError {}

impl core::fmt::Display for InvalidStatementError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid statement: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid statement error.
    pub fn invalid_statement(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidStatement(InvalidStatementError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid statement error.
    pub fn is_invalid_statement(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidStatement(_))
    }
}
