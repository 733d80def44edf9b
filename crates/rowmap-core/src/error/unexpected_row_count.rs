use super::Error;

/// Error when a single-row fetch matches more than one row.
#[derive(Debug)]
pub(super) struct UnexpectedRowCountError {
    context: Option<Box<str>>,
}

impl std::error::Error for UnexpectedRowCountError {}

impl core::fmt::Display for UnexpectedRowCountError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("unexpected row count")?;
        if let Some(ref ctx) = self.context {
            write!(f, ": {}", ctx)?;
        }
        Ok(())
    }
}

impl Error {
    /// Creates an unexpected row count error.
    ///
    /// The context parameter provides information about the operation.
    pub fn unexpected_row_count(context: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnexpectedRowCount(UnexpectedRowCountError {
            context: Some(context.into().into()),
        }))
    }

    /// Returns `true` if this error is an unexpected row count error.
    pub fn is_unexpected_row_count(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnexpectedRowCount(_))
    }
}
