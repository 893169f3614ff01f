use thiserror::Error;

/// Errors from reading a patch or replaying one against a source buffer.
///
/// Computing, compacting and applying edit lists never fails; only the patch
/// format and checked replay of records that came from outside do.
#[derive(Debug, Error)]
pub enum PatchError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid patch magic: expected BDLT, got {actual}")]
    InvalidMagic { actual: String },

    #[error("unsupported patch version: {0}")]
    UnsupportedVersion(u8),

    #[error("patch checksum mismatch")]
    ChecksumMismatch,

    #[error("patch truncated while reading {what}")]
    Truncated { what: &'static str },

    #[error("{0} unexpected bytes after the last record")]
    TrailingBytes(usize),

    #[error("varint overflow while reading {what}")]
    VarintOverflow { what: &'static str },

    #[error("patch was made for a different source ({expected_len} bytes), got {actual_len} bytes")]
    SourceMismatch {
        expected_len: usize,
        actual_len: usize,
    },

    #[error("record {index} has offset {offset} past the end of a {len}-byte buffer")]
    OffsetOutOfRange {
        index: usize,
        offset: usize,
        len: usize,
    },

    #[error("patched output is {actual} bytes, expected {expected}")]
    TargetLengthMismatch { expected: usize, actual: usize },
}

pub type PatchResult<T> = Result<T, PatchError>;
