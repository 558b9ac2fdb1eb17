/// Errors raised while decoding STL data.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StlError {
    #[error("buffer of {len} bytes is too small for a binary STL header (need 84)")]
    TooShort { len: usize },

    #[error("line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },
}

pub type StlResult<T> = Result<T, StlError>;
