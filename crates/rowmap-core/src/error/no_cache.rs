use super::Error;

/// Error when a result stream with caching disabled is indexed or replayed.
#[derive(Debug)]
pub(super) struct NoCacheError;

impl std::error::Error for NoCacheError {}

impl core::fmt::Display for NoCacheError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("results are not cached")
    }
}

impl Error {
    /// Creates a no cache error.
    pub fn no_cache() -> Error {
        Error::from(super::ErrorKind::NoCache(NoCacheError))
    }

    /// Returns `true` if this error is a no cache error.
    pub fn is_no_cache(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::NoCache(_))
    }
}
