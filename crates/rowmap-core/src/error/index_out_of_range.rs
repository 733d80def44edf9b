use super::Error;

#[derive(Debug)]
pub(super) struct IndexOutOfRangeError {
    index: isize,
    len: usize,
}

impl std::error::Error for IndexOutOfRangeError {}

impl core::fmt::Display for IndexOutOfRangeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "index out of range: index {}, length {}",
            self.index, self.len
        )
    }
}

impl Error {
    /// Creates an index out of range error for a result stream of `len` rows.
    pub fn index_out_of_range(index: isize, len: usize) -> Error {
        Error::from(super::ErrorKind::IndexOutOfRange(IndexOutOfRangeError {
            index,
            len,
        }))
    }

    /// Returns `true` if this error is an index out of range error.
    pub fn is_index_out_of_range(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::IndexOutOfRange(_))
    }
}
