//! Statistics for a single compress or decompress run.
//!
//! Every codec call owns a fresh `CodecStats`; nothing is shared between
//! runs. Byte counts are exact, bit counts exclude the final padding.

use std::time::{Duration, Instant};

/// Which direction a run went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Compress,
    Decompress,
}

/// Counts and timing for one codec run.
#[derive(Debug, Clone)]
pub struct CodecStats {
    // === Timing ===
    /// When the run started
    pub start_time: Instant,

    /// When the run ended (set on completion)
    pub end_time: Option<Instant>,

    pub direction: Direction,

    // === Input/Output ===
    /// Bytes consumed from the source
    pub input_bytes: u64,

    /// Bytes written to the sink, padding included
    pub output_bytes: u64,

    // === Container ===
    /// Bits of magic number plus serialized tree
    pub header_bits: u64,

    /// Bits of encoded symbols plus the end-of-stream code
    pub payload_bits: u64,

    // === Tree ===
    /// Symbols that occur, end-of-stream included (compress), or leaves
    /// in the decoded tree (decompress)
    pub distinct_symbols: usize,

    /// Longest code length
    pub tree_depth: usize,

    /// Original (uncompressed) byte count
    pub symbols: u64,
}

impl CodecStats {
    /// Create new stats with start time set to now.
    pub fn new(direction: Direction) -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            direction,
            input_bytes: 0,
            output_bytes: 0,
            header_bits: 0,
            payload_bits: 0,
            distinct_symbols: 0,
            tree_depth: 0,
            symbols: 0,
        }
    }

    /// Mark the run as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Get total duration (or current elapsed if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Size of the container relative to the original data.
    ///
    /// Returns 0.0 if there was no original data.
    pub fn compression_ratio(&self) -> f64 {
        let (raw, packed) = self.raw_and_packed();
        if raw == 0 {
            0.0
        } else {
            packed as f64 / raw as f64
        }
    }

    /// Average payload bits per original byte.
    pub fn bits_per_symbol(&self) -> f64 {
        if self.symbols == 0 {
            0.0
        } else {
            self.payload_bits as f64 / self.symbols as f64
        }
    }

    /// Throughput over the original data in bytes/second.
    pub fn throughput_bps(&self) -> f64 {
        let duration_secs = self.duration().as_secs_f64();
        if duration_secs == 0.0 {
            0.0
        } else {
            self.symbols as f64 / duration_secs
        }
    }

    fn raw_and_packed(&self) -> (u64, u64) {
        match self.direction {
            Direction::Compress => (self.input_bytes, self.output_bytes),
            Direction::Decompress => (self.output_bytes, self.input_bytes),
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        let (raw, packed) = self.raw_and_packed();
        let title = match self.direction {
            Direction::Compress => "Compression",
            Direction::Decompress => "Decompression",
        };

        println!("\n=== {} Summary ===", title);
        println!("Duration: {} ms", self.duration().as_millis());
        println!("Original:   {} bytes", raw);
        println!("Compressed: {} bytes", packed);
        println!("Ratio: {:.1}%", self.compression_ratio() * 100.0);
        println!();
        println!("=== Container ===");
        println!("Header bits: {}", self.header_bits);
        println!("Payload bits: {}", self.payload_bits);
        println!("Distinct symbols: {}", self.distinct_symbols);
        println!("Tree depth: {}", self.tree_depth);
        println!("Bits per symbol: {:.3}", self.bits_per_symbol());
        println!();
        println!("Throughput: {:.2} MB/s", self.throughput_bps() / 1_000_000.0);
    }

    /// Export stats as a simple key=value text format.
    pub fn export_text(&self) -> String {
        format!(
            "duration_ms={}\n\
             input_bytes={}\n\
             output_bytes={}\n\
             header_bits={}\n\
             payload_bits={}\n\
             distinct_symbols={}\n\
             tree_depth={}\n\
             compression_ratio={:.4}\n",
            self.duration().as_millis(),
            self.input_bytes,
            self.output_bytes,
            self.header_bits,
            self.payload_bits,
            self.distinct_symbols,
            self.tree_depth,
            self.compression_ratio(),
        )
    }
}
