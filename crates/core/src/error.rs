//! Error types for the huffpress codec.
//!
//! All operations return structured errors rather than panicking.
//! A format error is fatal to the compress or decompress call that raised it;
//! any output written before the error must be discarded by the caller.

use thiserror::Error;

/// Top-level error type for all codec operations.
///
/// Each variant corresponds to a specific failure domain:
/// - Bit I/O: misuse of the bit-level reader/writer
/// - Format: the compressed container is malformed, truncated or foreign
/// - I/O: the underlying byte source or sink failed
#[derive(Debug, Error)]
pub enum Error {
    /// Bit I/O operation was invalid (e.g., requesting more than 64 bits)
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),

    /// Compressed container is not valid
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// Underlying reader or writer failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Bit-level I/O errors.
///
/// Running out of input is not an error at this level: readers return
/// `Ok(None)` and the caller decides whether that is fatal.
#[derive(Debug, Error)]
pub enum BitIoError {
    /// Invalid bit count (more than 64 bits in one call)
    #[error("invalid bit count: {0}")]
    InvalidBitCount(usize),
}

/// Container format errors.
#[derive(Debug, Error)]
pub enum FormatError {
    /// Leading magic number doesn't identify a huffpress container
    #[error("illegal header: expected magic {expected:#010x}, got {actual:#010x}")]
    BadMagic { expected: u32, actual: u32 },

    /// Stream ended before the 32-bit magic number was complete
    #[error("stream ended inside the magic number")]
    TruncatedMagic,

    /// Stream ended before the tree header was fully reconstructed
    #[error("stream ended inside the tree header")]
    TruncatedTree,

    /// Leaf symbol in the tree header is outside the alphabet
    #[error("tree header contains invalid symbol {0}")]
    InvalidSymbol(u16),

    /// Tree header nests deeper than any tree built from this alphabet
    #[error("tree header exceeds maximum depth {max}")]
    TreeTooDeep { max: usize },

    /// Tree header is a single leaf, which cannot assign a non-empty code
    #[error("tree header has no internal nodes")]
    DegenerateTree,

    /// Payload ended before the end-of-stream code was reached
    #[error("bad input, no end-of-stream marker after {decoded} symbols")]
    MissingEndOfStream { decoded: u64 },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
