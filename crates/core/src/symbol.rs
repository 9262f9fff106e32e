//! Alphabet constants shared by every stage of the codec.

/// One alphabet unit: a byte value 0-255, or [`END_OF_STREAM`].
pub type Symbol = u16;

/// Width of one input unit in bits.
pub const BITS_PER_WORD: usize = 8;

/// Number of real (byte) symbols.
pub const ALPHABET_SIZE: usize = 1 << BITS_PER_WORD;

/// Synthetic end-of-stream symbol, one past the last byte value.
pub const END_OF_STREAM: Symbol = ALPHABET_SIZE as Symbol;

/// Number of symbols including the end-of-stream marker.
pub const SYMBOL_COUNT: usize = ALPHABET_SIZE + 1;

/// Width of a leaf's symbol field in the tree header.
pub const SYMBOL_BITS: usize = BITS_PER_WORD + 1;

/// Whether `symbol` belongs to the alphabet (bytes plus end-of-stream).
pub fn is_valid(symbol: Symbol) -> bool {
    (symbol as usize) < SYMBOL_COUNT
}
