//! Huffman tree construction by greedy weight merging.
//!
//! # Tie-breaking
//!
//! The priority queue is keyed on `(weight, sequence)`, smallest first.
//! Leaves get `sequence = symbol`, so they enter in ascending symbol order;
//! each merged node gets the next number after the last symbol. Equal-weight
//! nodes therefore always leave the queue in the same order, and the same
//! frequency table always produces the same tree.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::debug;

use crate::frequency::FrequencyTable;
use crate::symbol::{Symbol, END_OF_STREAM, SYMBOL_COUNT};

/// Symbol paired with a lone end-of-stream leaf so the tree has two leaves.
const FILLER_SYMBOL: Symbol = 0;

/// A node in the Huffman tree.
///
/// Trees read back from a header carry no weights; their nodes have weight 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A leaf holds exactly one symbol.
    Leaf { symbol: Symbol, weight: u64 },
    /// An internal node always has two children.
    Internal {
        weight: u64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    /// Create a leaf.
    pub fn leaf(symbol: Symbol, weight: u64) -> Self {
        Node::Leaf { symbol, weight }
    }

    /// Create an internal node whose weight is the sum of its children.
    pub fn internal(left: Node, right: Node) -> Self {
        Node::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Combined weight of all leaves below this node.
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } => *weight,
            Node::Internal { weight, .. } => *weight,
        }
    }

    /// Symbol held by a leaf, `None` for internal nodes.
    pub fn symbol(&self) -> Option<Symbol> {
        match self {
            Node::Leaf { symbol, .. } => Some(*symbol),
            Node::Internal { .. } => None,
        }
    }

    /// Child reached by following `bit` (false = left, true = right).
    ///
    /// Returns `None` on a leaf.
    pub fn child(&self, bit: bool) -> Option<&Node> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => Some(if bit { right } else { left }),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    fn same_shape(&self, other: &Node) -> bool {
        match (self, other) {
            (Node::Leaf { symbol: a, .. }, Node::Leaf { symbol: b, .. }) => a == b,
            (
                Node::Internal {
                    left: left1,
                    right: right1,
                    ..
                },
                Node::Internal {
                    left: left2,
                    right: right2,
                    ..
                },
            ) => left1.same_shape(left2) && right1.same_shape(right2),
            _ => false,
        }
    }
}

/// Queue entry ordered so that `BinaryHeap` pops the lightest, oldest node.
#[derive(Debug)]
struct QueueEntry {
    sequence: usize,
    node: Node,
}

impl QueueEntry {
    fn key(&self) -> (u64, usize) {
        (self.node.weight(), self.sequence)
    }
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse: lower (weight, sequence) comes first.
        other.key().cmp(&self.key())
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A complete Huffman tree with at least two leaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    /// Wrap an existing root.
    ///
    /// Callers are responsible for the root being an internal node; the
    /// builder and the header reader both guarantee it.
    pub(crate) fn from_root(root: Node) -> Self {
        Self { root }
    }

    /// Build the tree for `freqs`.
    ///
    /// Every symbol with a non-zero count becomes a leaf. The end-of-stream
    /// count is always 1, so there is at least one leaf; when it is the only
    /// one, it is paired with a zero-weight filler leaf so its code is one bit.
    pub fn from_frequencies(freqs: &FrequencyTable) -> Self {
        let mut heap = BinaryHeap::new();
        for (symbol, count) in freqs.nonzero() {
            heap.push(QueueEntry {
                sequence: symbol as usize,
                node: Node::leaf(symbol, count),
            });
        }

        let mut sequence = SYMBOL_COUNT;
        while heap.len() > 1 {
            let (Some(left), Some(right)) = (heap.pop(), heap.pop()) else {
                break;
            };
            heap.push(QueueEntry {
                sequence,
                node: Node::internal(left.node, right.node),
            });
            sequence += 1;
        }

        let root = match heap.pop() {
            Some(QueueEntry {
                node: root @ Node::Internal { .. },
                ..
            }) => root,
            Some(QueueEntry { node: lone, .. }) => {
                Node::internal(lone, Node::leaf(FILLER_SYMBOL, 0))
            }
            // Unreachable while end-of-stream is always counted.
            None => Node::internal(
                Node::leaf(END_OF_STREAM, 1),
                Node::leaf(FILLER_SYMBOL, 0),
            ),
        };

        let tree = Self { root };
        debug!(
            "built tree: {} leaves, depth {}, weight {}",
            tree.leaf_count(),
            tree.depth(),
            tree.root.weight()
        );
        tree
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Number of leaves, i.e. symbols with a code.
    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Structural equality: same shape and same leaf symbols, weights ignored.
    pub fn same_shape(&self, other: &HuffmanTree) -> bool {
        self.root.same_shape(&other.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf_symbol(node: Option<&Node>) -> Option<Symbol> {
        node.and_then(Node::symbol)
    }

    #[test]
    fn test_aaaab_shape() {
        let tree = HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(b"AAAAB"));
        assert_eq!(tree.leaf_count(), 3);
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.root().weight(), 6);

        // B and end-of-stream (weight 1 each) merge first, then join A.
        let root = tree.root();
        assert_eq!(leaf_symbol(root.child(true)), Some(b'A' as Symbol));
        let pair = root.child(false).unwrap();
        assert_eq!(leaf_symbol(pair.child(false)), Some(b'B' as Symbol));
        assert_eq!(leaf_symbol(pair.child(true)), Some(END_OF_STREAM));
    }

    #[test]
    fn test_empty_input_wraps_sentinel() {
        let tree = HuffmanTree::from_frequencies(&FrequencyTable::new());
        assert_eq!(tree.leaf_count(), 2);
        assert_eq!(tree.depth(), 1);
        assert_eq!(leaf_symbol(tree.root().child(false)), Some(END_OF_STREAM));
        assert_eq!(tree.root().child(true).map(Node::weight), Some(0));
    }

    #[test]
    fn test_single_byte_value() {
        let tree = HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(&[7u8; 100]));
        assert_eq!(tree.leaf_count(), 2);
        assert_eq!(tree.depth(), 1);
        assert_eq!(leaf_symbol(tree.root().child(false)), Some(END_OF_STREAM));
        assert_eq!(leaf_symbol(tree.root().child(true)), Some(7));
    }

    #[test]
    fn test_leaf_count_matches_distinct_symbols() {
        let freqs = FrequencyTable::from_bytes(b"the quick brown fox jumps over the lazy dog");
        let tree = HuffmanTree::from_frequencies(&freqs);
        assert_eq!(tree.leaf_count(), freqs.distinct_symbols());
        assert_eq!(tree.root().weight(), freqs.input_len() + 1);
    }

    #[test]
    fn test_deterministic_shape() {
        let data: Vec<u8> = (0..=255u8).chain(b"abcabcabc".iter().copied()).collect();
        let freqs = FrequencyTable::from_bytes(&data);
        let first = HuffmanTree::from_frequencies(&freqs);
        let second = HuffmanTree::from_frequencies(&freqs);
        assert_eq!(first, second);
        assert!(first.same_shape(&second));
    }

    #[test]
    fn test_same_shape_ignores_weights() {
        let a = Node::internal(Node::leaf(1, 5), Node::leaf(2, 9));
        let b = Node::internal(Node::leaf(1, 0), Node::leaf(2, 0));
        let c = Node::internal(Node::leaf(2, 0), Node::leaf(1, 0));
        assert!(HuffmanTree::from_root(a.clone()).same_shape(&HuffmanTree::from_root(b)));
        assert!(!HuffmanTree::from_root(a).same_shape(&HuffmanTree::from_root(c)));
    }

    #[test]
    fn test_child_of_leaf_is_none() {
        assert!(Node::leaf(3, 1).child(false).is_none());
        assert!(Node::leaf(3, 1).is_leaf());
    }
}
