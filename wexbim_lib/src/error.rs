use thiserror::Error;

/// Structural failures. Always abort the decode.
#[derive(Debug, Clone, Error)]
pub enum FormatError {
    #[error("bad magic number: expected {expected}, found {found}")]
    BadMagic { expected: i32, found: i32 },

    #[error("unsupported version {found} (supported: 1..=4)")]
    UnsupportedVersion { found: u8 },

    #[error("unexpected end of stream")]
    UnexpectedEof,

    #[error("header declares a negative {field} count: {value}")]
    NegativeCount { field: &'static str, value: i32 },
}

impl From<binrw::Error> for FormatError {
    fn from(_: binrw::Error) -> Self {
        // Every binrw error surfaced through `Cursor`'s typed reads comes from
        // a plain little-endian scalar read over an in-memory slice, so the
        // only failure mode that can reach here is running off the end.
        FormatError::UnexpectedEof
    }
}

/// Failures local to a single geometry block. Caught by the decode loop,
/// turned into a dropped block plus a [`Diagnostic`].
#[derive(Debug, Clone, Error)]
pub enum BlockError {
    #[error("unexpected end of stream while reading block")]
    UnexpectedEof,

    #[error("index {index} out of range for {bound} vertices")]
    IndexOutOfRange { index: u32, bound: u32 },

    #[error("triangle index count mismatch: wrote {written}, expected {expected}")]
    CountMismatch { written: usize, expected: usize },
}

impl From<FormatError> for BlockError {
    fn from(e: FormatError) -> Self {
        match e {
            FormatError::UnexpectedEof => BlockError::UnexpectedEof,
            // None of these can occur mid-block; treat defensively as eof
            // rather than unwrap/panic.
            FormatError::BadMagic { .. }
            | FormatError::UnsupportedVersion { .. }
            | FormatError::NegativeCount { .. } => BlockError::UnexpectedEof,
        }
    }
}

/// Non-fatal conditions surfaced alongside the decoded scene.
#[derive(Debug, Clone, Error)]
pub enum Diagnostic {
    #[error("geometry block {block_index} dropped: {reason}")]
    CorruptBlock {
        block_index: usize,
        #[source]
        reason: BlockError,
    },

    #[error("geometry block {block_index} left {unread} unread bytes in its sub-region")]
    TrailingBytes { block_index: usize, unread: usize },

    #[error("shape instance referenced unknown product label {product_label}")]
    UnknownProduct { product_label: i32 },

    #[error("file left {unread} unread bytes after the last region")]
    TrailingFileBytes { unread: usize },
}
