//! huffpress-core: lossless Huffman compression with a self-describing header
//!
//! This library compresses a byte stream into a container holding the
//! Huffman tree and the encoded data, and restores the exact original bytes
//! from that container alone.
//!
//! # Architecture
//!
//! The codec is split along its pipeline stages:
//! - `bitio`: bit-level reading/writing over `Read`/`Write`
//! - `symbol`: alphabet constants, including the end-of-stream symbol
//! - `frequency`: single-pass symbol counting
//! - `tree`: Huffman tree construction with deterministic tie-breaking
//! - `codes`: code table derivation
//! - `header`: magic number and pre-order tree serialization
//! - `payload`: code emission and tree-walk decoding
//! - `codec`: compress/decompress orchestration
//! - `stats`: per-run counters
//!
//! # Container
//!
//! ```text
//! magic (32 bits) | tree (pre-order) | codes ... | end-of-stream code | pad
//! ```
//!
//! # Example
//! ```
//! let compressed = huffpress_core::compress_bytes(b"AAAAB").unwrap();
//! let restored = huffpress_core::decompress_bytes(&compressed).unwrap();
//! assert_eq!(restored, b"AAAAB");
//! ```

pub mod bitio;
pub mod codec;
pub mod codes;
pub mod error;
pub mod frequency;
pub mod header;
pub mod payload;
pub mod stats;
pub mod symbol;
pub mod tree;

// Re-export commonly used types
pub use codec::{compress, compress_bytes, decompress, decompress_bytes};
pub use error::{Error, FormatError, Result};
pub use stats::CodecStats;
