//! Payload encoding and decoding.
//!
//! The payload is the concatenation of the code of every input byte, in
//! order, followed by the code of the end-of-stream symbol. Decoding walks
//! the tree one bit at a time and stops at the end-of-stream leaf, so the
//! zero padding after it is never read.

use std::io::{Read, Write};

use crate::bitio::{BitReader, BitWriter};
use crate::codes::{Code, CodeTable};
use crate::error::{FormatError, Result};
use crate::symbol::{Symbol, BITS_PER_WORD, END_OF_STREAM};
use crate::tree::{HuffmanTree, Node};

/// Encode every byte remaining in `reader`, then the end-of-stream code.
///
/// Returns the number of input bytes encoded.
///
/// # Errors
/// `FormatError::InvalidSymbol` if a byte has no code, which only happens
/// when `codes` was derived from a different input.
pub fn encode_payload<R: Read, W: Write>(
    codes: &CodeTable,
    reader: &mut BitReader<R>,
    writer: &mut BitWriter<W>,
) -> Result<u64> {
    let mut encoded = 0u64;
    while let Some(word) = reader.read_bits(BITS_PER_WORD)? {
        lookup(codes, word as Symbol)?.write_to(writer)?;
        encoded += 1;
    }
    lookup(codes, END_OF_STREAM)?.write_to(writer)?;
    Ok(encoded)
}

fn lookup(codes: &CodeTable, symbol: Symbol) -> Result<&Code> {
    codes
        .get(symbol)
        .ok_or_else(|| FormatError::InvalidSymbol(symbol).into())
}

/// Decode symbols from `reader` until the end-of-stream code.
///
/// Each decoded byte is written to `writer`. Returns the number of bytes
/// decoded.
///
/// # Errors
/// - `FormatError::MissingEndOfStream` if the input runs out first
/// - `FormatError::DegenerateTree` if `tree` has a leaf at its root
pub fn decode_payload<R: Read, W: Write>(
    tree: &HuffmanTree,
    reader: &mut BitReader<R>,
    writer: &mut BitWriter<W>,
) -> Result<u64> {
    let root = tree.root();
    let mut current = root;
    let mut decoded = 0u64;

    loop {
        let bit = reader
            .read_bit()?
            .ok_or(FormatError::MissingEndOfStream { decoded })?;
        current = current.child(bit).ok_or(FormatError::DegenerateTree)?;

        if let Node::Leaf { symbol, .. } = current {
            if *symbol == END_OF_STREAM {
                return Ok(decoded);
            }
            writer.write_bits(*symbol as u64, BITS_PER_WORD)?;
            decoded += 1;
            current = root;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::frequency::FrequencyTable;

    fn encode(data: &[u8]) -> (HuffmanTree, Vec<u8>, u64) {
        let tree = HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(data));
        let codes = CodeTable::from_tree(&tree);
        let mut reader = BitReader::new(data);
        let mut writer = BitWriter::new(Vec::new());
        encode_payload(&codes, &mut reader, &mut writer).unwrap();
        let bits = writer.bits_written();
        (tree, writer.close().unwrap(), bits)
    }

    fn decode(tree: &HuffmanTree, payload: &[u8]) -> Result<Vec<u8>> {
        let mut reader = BitReader::new(payload);
        let mut writer = BitWriter::new(Vec::new());
        decode_payload(tree, &mut reader, &mut writer)?;
        writer.close()
    }

    #[test]
    fn test_aaaab_payload_bits() {
        let (tree, payload, bits) = encode(b"AAAAB");
        // A=1 x4, B=00, EOF=01
        assert_eq!(bits, 8);
        assert_eq!(payload, vec![0b11110001]);
        assert_eq!(decode(&tree, &payload).unwrap(), b"AAAAB");
    }

    #[test]
    fn test_empty_payload_is_sentinel_only() {
        let (tree, payload, bits) = encode(b"");
        assert_eq!(bits, 1);
        assert_eq!(payload, vec![0]);
        assert!(decode(&tree, &payload).unwrap().is_empty());
    }

    #[test]
    fn test_decode_ignores_trailing_bytes() {
        let (tree, mut payload, _) = encode(b"abracadabra");
        payload.extend_from_slice(&[0xFF, 0x00, 0xAA]);
        assert_eq!(decode(&tree, &payload).unwrap(), b"abracadabra");
    }

    #[test]
    fn test_missing_end_of_stream() {
        let (tree, payload, _) = encode(b"abracadabra");
        let result = decode(&tree, &payload[..payload.len() - 1]);
        assert!(matches!(
            result,
            Err(Error::Format(FormatError::MissingEndOfStream { .. }))
        ));
    }

    #[test]
    fn test_unknown_symbol_rejected() {
        let tree = HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(b"abc"));
        let codes = CodeTable::from_tree(&tree);
        let mut reader = BitReader::new(&b"abz"[..]);
        let mut writer = BitWriter::new(Vec::new());
        assert!(matches!(
            encode_payload(&codes, &mut reader, &mut writer),
            Err(Error::Format(FormatError::InvalidSymbol(s))) if s == b'z' as Symbol
        ));
    }

    #[test]
    fn test_decoded_count() {
        let data = b"count me please";
        let (tree, payload, _) = encode(data);
        let mut reader = BitReader::new(payload.as_slice());
        let mut writer = BitWriter::new(Vec::new());
        let decoded = decode_payload(&tree, &mut reader, &mut writer).unwrap();
        assert_eq!(decoded, data.len() as u64);
    }
}
