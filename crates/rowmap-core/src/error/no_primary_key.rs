use super::Error;

/// Error when an identity-based operation runs against a table without a
/// usable primary key.
///
/// This occurs when:
/// - A persisted record is flushed or deleted and its table has no primary key
/// - Rows are fetched by positional key values that do not match the key arity
#[derive(Debug)]
pub(super) struct NoPrimaryKeyError {
    context: Option<Box<str>>,
}

impl std::error::Error for NoPrimaryKeyError {}

impl core::fmt::Display for NoPrimaryKeyError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("no primary key")?;
        if let Some(ref ctx) = self.context {
            write!(f, ": {}", ctx)?;
        }
        Ok(())
    }
}

impl Error {
    /// Creates a no primary key error.
    pub fn no_primary_key(context: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::NoPrimaryKey(NoPrimaryKeyError {
            context: Some(context.into().into()),
        }))
    }

    /// Returns `true` if this error is a no primary key error.
    pub fn is_no_primary_key(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::NoPrimaryKey(_))
    }
}
