//! Code table derivation: symbol to root-to-leaf bit path.
//!
//! Codes are stored as bit sequences, not integers, so a code's length is
//! always explicit and leading zeros survive.

use std::fmt;
use std::io::Write;

use bitvec::prelude::*;
use log::{log_enabled, trace, Level};

use crate::bitio::{BitWriter, MAX_BITS};
use crate::error::Result;
use crate::symbol::{Symbol, SYMBOL_COUNT};
use crate::tree::{HuffmanTree, Node};

/// The code of one symbol, 0 = left, 1 = right.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Code {
    bits: BitVec<u8, Msb0>,
}

impl Code {
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn bits(&self) -> &BitSlice<u8, Msb0> {
        &self.bits
    }

    /// Whether this code is a prefix of `other` (or equal to it).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(self.bits.as_bitslice())
    }

    /// Write this code to `writer`, most significant (root-side) bit first.
    pub fn write_to<W: Write>(&self, writer: &mut BitWriter<W>) -> Result<()> {
        for chunk in self.bits.chunks(MAX_BITS) {
            let value = chunk
                .iter()
                .by_vals()
                .fold(0u64, |acc, bit| (acc << 1) | bit as u64);
            writer.write_bits(value, chunk.len())?;
        }
        Ok(())
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits.iter().by_vals() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Mapping from every symbol in a tree to its code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<Option<Code>>,
}

impl CodeTable {
    /// Derive the code of every leaf in `tree`.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut table = Self {
            codes: vec![None; SYMBOL_COUNT],
        };
        let mut path = BitVec::new();
        table.collect(tree.root(), &mut path);

        if log_enabled!(Level::Trace) {
            for (symbol, code) in table.iter() {
                trace!("code {:3} -> {}", symbol, code);
            }
        }
        table
    }

    fn collect(&mut self, node: &Node, path: &mut BitVec<u8, Msb0>) {
        match node {
            Node::Leaf { symbol, .. } => {
                if let Some(slot) = self.codes.get_mut(*symbol as usize) {
                    *slot = Some(Code { bits: path.clone() });
                }
            }
            Node::Internal { left, right, .. } => {
                path.push(false);
                self.collect(left, path);
                path.pop();

                path.push(true);
                self.collect(right, path);
                path.pop();
            }
        }
    }

    /// Code of `symbol`, if the symbol occurs in the tree.
    pub fn get(&self, symbol: Symbol) -> Option<&Code> {
        self.codes.get(symbol as usize).and_then(Option::as_ref)
    }

    /// All codes in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.as_ref().map(|c| (symbol as Symbol, c)))
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.iter().filter(|code| code.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Length of the longest code.
    pub fn max_code_len(&self) -> usize {
        self.iter().map(|(_, code)| code.len()).max().unwrap_or(0)
    }
}
