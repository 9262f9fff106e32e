//! Container header: magic number and serialized tree.
//!
//! # Header Format
//!
//! ```text
//! +------------------+
//! | Magic (32 bits)  |  0xFACE8201, MSB-first
//! +------------------+
//! | Tree (variable)  |  pre-order, bit-packed:
//! |                  |    0           internal node, then left, then right
//! |                  |    1 + 9 bits  leaf holding that symbol
//! +------------------+
//! ```
//!
//! The tree needs no length prefix: pre-order with one marker bit per node
//! is self-delimiting. Weights are not stored; the decoder only needs shape.

use std::io::{Read, Write};

use crate::bitio::{BitReader, BitWriter};
use crate::error::{FormatError, Result};
use crate::symbol::{self, Symbol, SYMBOL_BITS, SYMBOL_COUNT};
use crate::tree::{HuffmanTree, Node};

/// Base format number.
pub const HUFF_NUMBER: u32 = 0xface_8200;

/// Magic number of a container whose header is a serialized tree.
pub const HUFF_TREE: u32 = HUFF_NUMBER | 1;

/// Width of the magic number in bits.
pub const MAGIC_BITS: usize = 32;

/// Deepest leaf in any tree over this alphabet: a fully skewed tree.
pub const MAX_TREE_DEPTH: usize = SYMBOL_COUNT - 1;

/// Write the magic number followed by the tree.
pub fn write_header<W: Write>(tree: &HuffmanTree, writer: &mut BitWriter<W>) -> Result<()> {
    writer.write_bits(HUFF_TREE as u64, MAGIC_BITS)?;
    write_tree(tree.root(), writer)
}

/// Read and validate the magic number, then read the tree.
///
/// # Errors
/// - `FormatError::TruncatedMagic` if fewer than 32 bits are available
/// - `FormatError::BadMagic` if the number is not [`HUFF_TREE`]
/// - any error from [`read_tree`]
pub fn read_header<R: Read>(reader: &mut BitReader<R>) -> Result<HuffmanTree> {
    let magic = reader
        .read_bits(MAGIC_BITS)?
        .ok_or(FormatError::TruncatedMagic)? as u32;
    if magic != HUFF_TREE {
        return Err(FormatError::BadMagic {
            expected: HUFF_TREE,
            actual: magic,
        }
        .into());
    }
    read_tree(reader)
}

/// Serialize the subtree at `node` in pre-order.
pub fn write_tree<W: Write>(node: &Node, writer: &mut BitWriter<W>) -> Result<()> {
    match node {
        Node::Leaf { symbol, .. } => {
            writer.write_bit(true)?;
            writer.write_bits(*symbol as u64, SYMBOL_BITS)
        }
        Node::Internal { left, right, .. } => {
            writer.write_bit(false)?;
            write_tree(left, writer)?;
            write_tree(right, writer)
        }
    }
}

/// Rebuild a tree written by [`write_tree`].
///
/// # Errors
/// - `FormatError::TruncatedTree` if the stream ends before the tree is complete
/// - `FormatError::InvalidSymbol` if a leaf holds a value outside the alphabet
/// - `FormatError::TreeTooDeep` if nesting exceeds [`MAX_TREE_DEPTH`]
/// - `FormatError::DegenerateTree` if the whole tree is one leaf
pub fn read_tree<R: Read>(reader: &mut BitReader<R>) -> Result<HuffmanTree> {
    let root = read_node(reader, 0)?;
    if root.is_leaf() {
        return Err(FormatError::DegenerateTree.into());
    }
    Ok(HuffmanTree::from_root(root))
}

fn read_node<R: Read>(reader: &mut BitReader<R>, depth: usize) -> Result<Node> {
    if depth > MAX_TREE_DEPTH {
        return Err(FormatError::TreeTooDeep {
            max: MAX_TREE_DEPTH,
        }
        .into());
    }

    let is_leaf = reader.read_bit()?.ok_or(FormatError::TruncatedTree)?;
    if is_leaf {
        let value = reader
            .read_bits(SYMBOL_BITS)?
            .ok_or(FormatError::TruncatedTree)? as Symbol;
        if !symbol::is_valid(value) {
            return Err(FormatError::InvalidSymbol(value).into());
        }
        Ok(Node::leaf(value, 0))
    } else {
        let left = read_node(reader, depth + 1)?;
        let right = read_node(reader, depth + 1)?;
        Ok(Node::internal(left, right))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::frequency::FrequencyTable;
    use crate::symbol::END_OF_STREAM;

    fn header_bytes(tree: &HuffmanTree) -> Vec<u8> {
        let mut writer = BitWriter::new(Vec::new());
        write_header(tree, &mut writer).unwrap();
        writer.close().unwrap()
    }

    fn tree_for(data: &[u8]) -> HuffmanTree {
        HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(data))
    }

    #[test]
    fn test_header_round_trip() {
        let tree = tree_for(b"mississippi river banks");
        let bytes = header_bytes(&tree);

        let mut reader = BitReader::new(bytes.as_slice());
        let decoded = read_header(&mut reader).unwrap();
        assert!(decoded.same_shape(&tree));
        assert_eq!(decoded.leaf_count(), tree.leaf_count());
    }

    #[test]
    fn test_aaaab_tree_bits() {
        let mut writer = BitWriter::new(Vec::new());
        write_tree(tree_for(b"AAAAB").root(), &mut writer).unwrap();
        // 0 0 1+B 1+EOF 1+A
        assert_eq!(writer.bits_written(), 2 + 3 * 10);

        let bytes = writer.close().unwrap();
        let mut reader = BitReader::new(bytes.as_slice());
        assert_eq!(reader.read_bits(3).unwrap(), Some(0b001));
        assert_eq!(reader.read_bits(9).unwrap(), Some(b'B' as u64));
        assert_eq!(reader.read_bit().unwrap(), Some(true));
        assert_eq!(reader.read_bits(9).unwrap(), Some(END_OF_STREAM as u64));
        assert_eq!(reader.read_bit().unwrap(), Some(true));
        assert_eq!(reader.read_bits(9).unwrap(), Some(b'A' as u64));
    }

    #[test]
    fn test_empty_input_header() {
        let tree = tree_for(b"");
        let mut writer = BitWriter::new(Vec::new());
        write_header(&tree, &mut writer).unwrap();
        assert_eq!(writer.bits_written(), 32 + 21);
    }

    #[test]
    fn test_bad_magic() {
        let bytes = [0xCA, 0xFE, 0xBA, 0xBE, 0x00];
        let mut reader = BitReader::new(&bytes[..]);
        let result = read_header(&mut reader);
        assert!(matches!(
            result,
            Err(Error::Format(FormatError::BadMagic {
                expected: HUFF_TREE,
                actual: 0xCAFEBABE
            }))
        ));
    }

    #[test]
    fn test_truncated_magic() {
        let bytes = [0xFA, 0xCE];
        let mut reader = BitReader::new(&bytes[..]);
        assert!(matches!(
            read_header(&mut reader),
            Err(Error::Format(FormatError::TruncatedMagic))
        ));
    }

    #[test]
    fn test_truncated_tree() {
        let bytes = header_bytes(&tree_for(b"hello world"));
        for len in 4..bytes.len() {
            let mut reader = BitReader::new(&bytes[..len]);
            assert!(
                matches!(
                    read_header(&mut reader),
                    Err(Error::Format(FormatError::TruncatedTree))
                ),
                "header cut to {} bytes was accepted",
                len
            );
        }
    }

    #[test]
    fn test_invalid_symbol() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bit(false).unwrap();
        writer.write_bit(true).unwrap();
        writer.write_bits(300, SYMBOL_BITS).unwrap();
        writer.write_bit(true).unwrap();
        writer.write_bits(1, SYMBOL_BITS).unwrap();
        let bytes = writer.close().unwrap();

        let mut reader = BitReader::new(bytes.as_slice());
        assert!(matches!(
            read_tree(&mut reader),
            Err(Error::Format(FormatError::InvalidSymbol(300)))
        ));
    }

    #[test]
    fn test_single_leaf_rejected() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bit(true).unwrap();
        writer.write_bits(END_OF_STREAM as u64, SYMBOL_BITS).unwrap();
        let bytes = writer.close().unwrap();

        let mut reader = BitReader::new(bytes.as_slice());
        assert!(matches!(
            read_tree(&mut reader),
            Err(Error::Format(FormatError::DegenerateTree))
        ));
    }

    #[test]
    fn test_unbounded_nesting_rejected() {
        // All-zero input describes an endless chain of internal nodes.
        let bytes = vec![0u8; 64];
        let mut reader = BitReader::new(bytes.as_slice());
        assert!(matches!(
            read_tree(&mut reader),
            Err(Error::Format(FormatError::TreeTooDeep { .. }))
        ));
    }
}
