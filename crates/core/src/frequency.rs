//! Single-pass symbol frequency counting.

use std::io::Read;

use log::debug;

use crate::bitio::BitReader;
use crate::error::Result;
use crate::symbol::{Symbol, BITS_PER_WORD, END_OF_STREAM, SYMBOL_COUNT};

/// Occurrence counts for every byte value plus the end-of-stream marker.
///
/// # Invariants
/// - `counts[END_OF_STREAM]` is always exactly 1
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; SYMBOL_COUNT],
}

impl FrequencyTable {
    /// Table for an empty input: only the end-of-stream marker is counted.
    pub fn new() -> Self {
        let mut counts = [0u64; SYMBOL_COUNT];
        counts[END_OF_STREAM as usize] = 1;
        Self { counts }
    }

    /// Count every byte remaining in `reader`.
    ///
    /// The reader is left at end of stream; the caller resets it before the
    /// encoding pass.
    pub fn from_reader<R: Read>(reader: &mut BitReader<R>) -> Result<Self> {
        let mut table = Self::new();
        while let Some(word) = reader.read_bits(BITS_PER_WORD)? {
            table.counts[word as usize] += 1;
        }
        debug!(
            "counted {} input bytes, {} distinct symbols",
            table.input_len(),
            table.distinct_symbols()
        );
        Ok(table)
    }

    /// Count the bytes of an in-memory slice.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        for &byte in data {
            table.counts[byte as usize] += 1;
        }
        table
    }

    /// Occurrence count of `symbol` (0 for symbols outside the alphabet).
    pub fn count(&self, symbol: Symbol) -> u64 {
        self.counts.get(symbol as usize).copied().unwrap_or(0)
    }

    /// Symbols with non-zero count, in ascending symbol order.
    pub fn nonzero(&self) -> impl Iterator<Item = (Symbol, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as Symbol, count))
    }

    /// Number of symbols with non-zero count, end-of-stream included.
    pub fn distinct_symbols(&self) -> usize {
        self.counts.iter().filter(|&&count| count > 0).count()
    }

    /// Number of real input bytes counted.
    pub fn input_len(&self) -> u64 {
        self.counts.iter().sum::<u64>() - 1
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}
