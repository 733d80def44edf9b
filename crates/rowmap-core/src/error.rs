mod adhoc;
mod cannot_update_column;
mod driver;
mod field_not_found;
mod index_out_of_range;
mod invalid_connection_url;
mod invalid_statement;
mod no_cache;
mod no_primary_key;
mod record_not_found;
mod table_not_found;
mod unexpected_row_count;

use adhoc::AdhocError;
use cannot_update_column::CannotUpdateColumnError;
use driver::DriverError;
use field_not_found::FieldNotFoundError;
use index_out_of_range::IndexOutOfRangeError;
use invalid_connection_url::InvalidConnectionUrlError;
use invalid_statement::InvalidStatementError;
use no_cache::NoCacheError;
use no_primary_key::NoPrimaryKeyError;
use record_not_found::RecordNotFoundError;
use std::sync::Arc;
use table_not_found::TableNotFoundError;
use unexpected_row_count::UnexpectedRowCountError;

/// Returns early with an ad-hoc error built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Builds an ad-hoc error from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error that can occur in rowmap.
#[derive(Clone)]
pub struct Error {
    inner: Option<Arc<ErrorInner>>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Adds context to this error.
    ///
    /// Context is displayed in reverse order: the most recently added context is shown first,
    /// followed by earlier context, ending with the root cause.
    #[inline(always)]
    pub fn context(self, consequent: impl IntoError) -> Error {
        self.context_impl(consequent.into_error())
    }

    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let kind = match consequent.inner {
            Some(inner) => match Arc::try_unwrap(inner) {
                Ok(inner) => inner.kind,
                Err(shared) => ErrorKind::Adhoc(AdhocError::new(shared.kind.to_string())),
            },
            None => ErrorKind::Unknown,
        };

        Error {
            inner: Some(Arc::new(ErrorInner {
                kind,
                cause: Some(self),
            })),
        }
    }

    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.as_ref().and_then(|inner| inner.cause.as_ref())?;
            Some(err)
        }))
    }

    fn kind(&self) -> &ErrorKind {
        self.inner
            .as_ref()
            .map(|inner| &inner.kind)
            .unwrap_or(&ErrorKind::Unknown)
    }

    /// Returns the innermost error of a context chain.
    fn root(&self) -> &Error {
        let mut root = self;
        for err in self.chain() {
            root = err;
        }
        root
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.root().kind() {
            ErrorKind::Driver(err) => Some(err),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            let Some(ref inner) = self.inner else {
                return f.debug_struct("Error").field("kind", &"None").finish();
            };
            f.debug_struct("Error")
                .field("kind", &inner.kind)
                .field("cause", &inner.cause)
                .finish()
        }
    }
}

#[derive(Debug)]
enum ErrorKind {
    Adhoc(AdhocError),
    Driver(DriverError),
    NoPrimaryKey(NoPrimaryKeyError),
    UnexpectedRowCount(UnexpectedRowCountError),
    CannotUpdateColumn(CannotUpdateColumnError),
    NoCache(NoCacheError),
    FieldNotFound(FieldNotFoundError),
    TableNotFound(TableNotFoundError),
    RecordNotFound(RecordNotFoundError),
    IndexOutOfRange(IndexOutOfRangeError),
    InvalidStatement(InvalidStatementError),
    InvalidConnectionUrl(InvalidConnectionUrlError),
    Unknown,
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Adhoc(err) => core::fmt::Display::fmt(err, f),
            Driver(err) => core::fmt::Display::fmt(err, f),
            NoPrimaryKey(err) => core::fmt::Display::fmt(err, f),
            UnexpectedRowCount(err) => core::fmt::Display::fmt(err, f),
            CannotUpdateColumn(err) => core::fmt::Display::fmt(err, f),
            NoCache(err) => core::fmt::Display::fmt(err, f),
            FieldNotFound(err) => core::fmt::Display::fmt(err, f),
            TableNotFound(err) => core::fmt::Display::fmt(err, f),
            RecordNotFound(err) => core::fmt::Display::fmt(err, f),
            IndexOutOfRange(err) => core::fmt::Display::fmt(err, f),
            InvalidStatement(err) => core::fmt::Display::fmt(err, f),
            InvalidConnectionUrl(err) => core::fmt::Display::fmt(err, f),
            Unknown => f.write_str("unknown rowmap error"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Some(Arc::new(ErrorInner { kind, cause: None })),
        }
    }
}

/// Trait for types that can be converted into an Error.
pub trait IntoError {
    /// Converts this type into an Error.
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_size() {
        let expected_size = core::mem::size_of::<usize>();
        assert_eq!(expected_size, core::mem::size_of::<Error>());
    }

    #[test]
    fn error_from_args() {
        let err = Error::from_args(format_args!("test error: {}", 42));
        assert_eq!(err.to_string(), "test error: 42");
    }

    #[test]
    fn error_chain_display() {
        let root = Error::from_args(format_args!("root cause"));
        let mid = Error::from_args(format_args!("middle context"));
        let top = Error::from_args(format_args!("top context"));

        let chained = root.context(mid).context(top);
        assert_eq!(
            chained.to_string(),
            "top context: middle context: root cause"
        );
    }

    #[test]
    fn predicates_check_outermost_kind() {
        let err = Error::no_primary_key("person").context(err!("flush failed"));
        assert_eq!(err.to_string(), "flush failed: no primary key: person");
        assert!(!err.is_no_primary_key());
        assert!(err.root().is_no_primary_key());
    }

    #[test]
    fn no_primary_key() {
        let err = Error::no_primary_key("table=no_pk");
        assert_eq!(err.to_string(), "no primary key: table=no_pk");
        assert!(err.is_no_primary_key());
    }

    #[test]
    fn unexpected_row_count() {
        let err = Error::unexpected_row_count("expected at most 1 row, found more");
        assert_eq!(
            err.to_string(),
            "unexpected row count: expected at most 1 row, found more"
        );
        assert!(err.is_unexpected_row_count());
    }

    #[test]
    fn cannot_update_column() {
        let err = Error::cannot_update_column("area", "generated column");
        assert_eq!(
            err.to_string(),
            "cannot update column `area`: generated column"
        );
        assert!(err.is_cannot_update_column());
    }

    #[test]
    fn no_cache() {
        let err = Error::no_cache();
        assert_eq!(err.to_string(), "results are not cached");
        assert!(err.is_no_cache());
    }

    #[test]
    fn driver_error_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let err = Error::driver(io_err);
        assert!(err.is_driver());
        assert_eq!(err.to_string(), "disk on fire");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn index_out_of_range() {
        let err = Error::index_out_of_range(-4, 3);
        assert_eq!(
            err.to_string(),
            "index out of range: index -4, length 3"
        );
    }
}
