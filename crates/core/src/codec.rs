//! Top-level compress and decompress.
//!
//! Compression makes two passes over its input: one to count symbols and one
//! to encode them, so the source must be seekable. Decompression is a single
//! forward pass.

use std::io::{Cursor, Read, Seek, Write};

use log::debug;

use crate::bitio::{BitReader, BitWriter};
use crate::codes::CodeTable;
use crate::error::Result;
use crate::frequency::FrequencyTable;
use crate::header::{read_header, write_header};
use crate::payload::{decode_payload, encode_payload};
use crate::stats::{CodecStats, Direction};
use crate::tree::HuffmanTree;

/// Compress all of `input` into `output`.
///
/// Steps: count, build tree, derive codes, write magic and tree, rewind the
/// input, write the payload, pad and flush.
pub fn compress<R: Read + Seek, W: Write>(input: R, output: W) -> Result<CodecStats> {
    let mut stats = CodecStats::new(Direction::Compress);
    let mut reader = BitReader::new(input);
    let mut writer = BitWriter::new(output);

    let freqs = FrequencyTable::from_reader(&mut reader)?;
    let tree = HuffmanTree::from_frequencies(&freqs);
    let codes = CodeTable::from_tree(&tree);
    stats.distinct_symbols = freqs.distinct_symbols();
    stats.tree_depth = codes.max_code_len();

    write_header(&tree, &mut writer)?;
    stats.header_bits = writer.bits_written();
    debug!("wrote header: {} bits", stats.header_bits);

    reader.reset()?;
    stats.symbols = encode_payload(&codes, &mut reader, &mut writer)?;
    stats.payload_bits = writer.bits_written() - stats.header_bits;
    debug!(
        "wrote payload: {} symbols in {} bits",
        stats.symbols, stats.payload_bits
    );

    let total_bits = writer.bits_written();
    writer.close()?;

    stats.input_bytes = freqs.input_len();
    stats.output_bytes = total_bits.div_ceil(8);
    stats.complete();
    Ok(stats)
}

/// Decompress a container from `input` into `output`.
///
/// On error, whatever was already written to `output` is incomplete and must
/// be discarded.
pub fn decompress<R: Read, W: Write>(input: R, output: W) -> Result<CodecStats> {
    let mut stats = CodecStats::new(Direction::Decompress);
    let mut reader = BitReader::new(input);
    let mut writer = BitWriter::new(output);

    let tree = read_header(&mut reader)?;
    stats.header_bits = reader.bits_read();
    stats.distinct_symbols = tree.leaf_count();
    stats.tree_depth = tree.depth();
    debug!(
        "read header: {} bits, {} leaves",
        stats.header_bits, stats.distinct_symbols
    );

    stats.symbols = decode_payload(&tree, &mut reader, &mut writer)?;
    stats.payload_bits = reader.bits_read() - stats.header_bits;
    debug!(
        "decoded {} symbols from {} payload bits",
        stats.symbols, stats.payload_bits
    );

    writer.close()?;

    stats.input_bytes = reader.bits_read().div_ceil(8);
    stats.output_bytes = stats.symbols;
    stats.complete();
    Ok(stats)
}

/// Compress an in-memory buffer.
pub fn compress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    compress(Cursor::new(data), &mut output)?;
    Ok(output)
}

/// Decompress an in-memory container.
pub fn decompress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    decompress(data, &mut output)?;
    Ok(output)
}
