//! Bit-level I/O over byte streams.
//!
//! This module provides BitWriter and BitReader, the bit stream used by both
//! the header codec and the payload codec. Both operate in MSB-first (most
//! significant bit first) order.
//!
//! # Padding Rules
//! - BitWriter: pads the final incomplete byte with trailing zeros on `close`
//! - BitReader: cannot tell padding from data; the payload is self-terminating
//!   so the decoder never reads into the padding
//!
//! # End of Stream
//! Reads return `Ok(None)` when the source runs dry, mirroring the end marker
//! of the classic bit stream contract. Bits consumed by a read that runs out
//! part-way are discarded.
//!
//! # Example
//! ```
//! use huffpress_core::bitio::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new(Vec::new());
//! writer.write_bits(0b101, 3).unwrap();  // Write 3 bits: 1, 0, 1
//! writer.write_bits(0b11, 2).unwrap();   // Write 2 bits: 1, 1
//! // Total: 10111 -> padded to 10111000
//!
//! let bytes = writer.close().unwrap();
//! let mut reader = BitReader::new(bytes.as_slice());
//! assert_eq!(reader.read_bits(3).unwrap(), Some(0b101));
//! assert_eq!(reader.read_bits(2).unwrap(), Some(0b11));
//! ```

use std::io::{self, Read, Seek, SeekFrom, Write};

use crate::error::{BitIoError, Result};

/// Largest group of bits transferred by one call.
pub const MAX_BITS: usize = 64;

/// Writes bits MSB-first into an underlying byte sink.
///
/// Accumulates bits in a one-byte buffer and writes each completed byte to
/// the sink. Wrap unbuffered sinks (files, sockets) in `BufWriter`.
///
/// Dropping a writer without calling [`BitWriter::close`] loses any bits
/// still held in the partial byte.
///
/// # Invariants
/// - `bit_count` is always < 8
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    inner: W,
    /// Accumulator for the current partial byte (MSB-aligned)
    bit_buffer: u8,
    /// Number of bits in bit_buffer (0-7)
    bit_count: u8,
    bits_written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Create a new BitWriter on top of `inner`.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            bit_buffer: 0,
            bit_count: 0,
            bits_written: 0,
        }
    }

    /// Write up to 64 bits to the output.
    ///
    /// Bits are written MSB-first. For example, writing value=0b101 with count=3
    /// writes bits 1, 0, 1 in that order. Leading zeros within `count` are
    /// written as zeros.
    ///
    /// # Arguments
    /// - `value`: the bits to write (only the lowest `count` bits are used)
    /// - `count`: number of bits to write (0-64)
    ///
    /// # Errors
    /// - `BitIoError::InvalidBitCount` if count > 64
    /// - `Error::Io` if the sink rejects a completed byte
    pub fn write_bits(&mut self, value: u64, count: usize) -> Result<()> {
        if count > MAX_BITS {
            return Err(BitIoError::InvalidBitCount(count).into());
        }

        let mut remaining = count;
        let mut val = value;

        while remaining > 0 {
            // How many bits fit in the current byte?
            let bits_to_write = remaining.min(8 - self.bit_count as usize);

            // Extract the top bits_to_write bits of the remaining field
            let shift = remaining - bits_to_write;
            let bits = ((val >> shift) & ((1u64 << bits_to_write) - 1)) as u8;

            self.bit_buffer |= bits << (8 - self.bit_count as usize - bits_to_write);
            self.bit_count += bits_to_write as u8;

            if self.bit_count == 8 {
                self.inner.write_all(&[self.bit_buffer])?;
                self.bit_buffer = 0;
                self.bit_count = 0;
            }

            // Clear the bits we just wrote from val
            val &= (1u64 << shift) - 1;
            remaining -= bits_to_write;
        }

        self.bits_written += count as u64;
        Ok(())
    }

    /// Write a single bit.
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.write_bits(bit as u64, 1)
    }

    /// Total number of bits written so far, excluding padding.
    pub fn bits_written(&self) -> u64 {
        self.bits_written
    }

    /// Pad the final partial byte with zeros, flush, and return the sink.
    ///
    /// This consumes the writer.
    pub fn close(mut self) -> Result<W> {
        if self.bit_count > 0 {
            self.inner.write_all(&[self.bit_buffer])?;
            self.bit_buffer = 0;
            self.bit_count = 0;
        }
        self.inner.flush()?;
        Ok(self.inner)
    }
}

/// Reads bits MSB-first from an underlying byte source.
///
/// Pulls one byte at a time from the source; wrap unbuffered sources in
/// `BufReader`.
///
/// # Invariants
/// - `bits_left` is in 0..=8 and counts the unread low bits of `current`
#[derive(Debug)]
pub struct BitReader<R: Read> {
    inner: R,
    current: u8,
    bits_left: u8,
    bits_read: u64,
}

impl<R: Read> BitReader<R> {
    /// Create a new BitReader over `inner`.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            current: 0,
            bits_left: 0,
            bits_read: 0,
        }
    }

    /// Read up to 64 bits from the input.
    ///
    /// Bits are read MSB-first. For example, reading 3 bits from byte 0b10110000
    /// returns 0b101.
    ///
    /// # Returns
    /// - `Ok(Some(value))` with the bits as an unsigned integer
    /// - `Ok(None)` if the source ran out before `count` bits were read
    ///
    /// # Errors
    /// - `BitIoError::InvalidBitCount` if count > 64
    /// - `Error::Io` if the source fails
    pub fn read_bits(&mut self, count: usize) -> Result<Option<u64>> {
        if count > MAX_BITS {
            return Err(BitIoError::InvalidBitCount(count).into());
        }

        let mut result = 0u64;
        let mut remaining = count;

        while remaining > 0 {
            if self.bits_left == 0 && !self.fill()? {
                return Ok(None);
            }

            let bits_to_read = remaining.min(self.bits_left as usize);
            let shift = self.bits_left as usize - bits_to_read;
            let mask = ((1u16 << bits_to_read) - 1) as u8;
            let bits = (self.current >> shift) & mask;

            result = (result << bits_to_read) | bits as u64;

            self.bits_left -= bits_to_read as u8;
            self.bits_read += bits_to_read as u64;
            remaining -= bits_to_read;
        }

        Ok(Some(result))
    }

    /// Read a single bit, or `None` at end of stream.
    pub fn read_bit(&mut self) -> Result<Option<bool>> {
        Ok(self.read_bits(1)?.map(|bit| bit == 1))
    }

    /// Total number of bits consumed so far.
    pub fn bits_read(&self) -> u64 {
        self.bits_read
    }

    /// Load the next byte; returns false at end of source.
    fn fill(&mut self) -> Result<bool> {
        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => return Ok(false),
                Ok(_) => {
                    self.current = byte[0];
                    self.bits_left = 8;
                    return Ok(true);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl<R: Read + Seek> BitReader<R> {
    /// Reposition the source to its start and drop any buffered bits.
    ///
    /// The bit counter is kept, so it reports the total across passes.
    pub fn reset(&mut self) -> Result<()> {
        self.inner.seek(SeekFrom::Start(0))?;
        self.current = 0;
        self.bits_left = 0;
        Ok(())
    }
}
