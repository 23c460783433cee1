//! NDR error types

use thiserror::Error;

/// NDR encoding/decoding errors
#[derive(Debug, Error)]
pub enum NdrError {
    /// Buffer underflow - the stub ended before the layout was complete
    #[error("buffer underflow: needed {needed} bytes, have {have}")]
    BufferUnderflow { needed: usize, have: usize },

    /// Buffer overflow - not enough space in a fixed-size sink
    #[error("buffer overflow: needed {needed} bytes, have {have}")]
    BufferOverflow { needed: usize, have: usize },

    /// Bytes left over after a complete decode
    #[error("trailing data: {remaining} bytes left after decode")]
    TrailingData { remaining: usize },

    /// Failure writing encoded bytes to an I/O sink
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for NDR operations
pub type Result<T> = std::result::Result<T, NdrError>;
