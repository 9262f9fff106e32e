//! Property-based testing for the codec
//!
//! Uses proptest to check round-trip, prefix-freedom and determinism over
//! arbitrary byte strings and skewed distributions.

use proptest::prelude::*;
use huffpress_core::{
    codes::CodeTable, compress_bytes, decompress_bytes, frequency::FrequencyTable,
    tree::HuffmanTree,
};

// =============================================================================
// GENERATORS
// =============================================================================

/// Byte strings drawn from a small alphabet, so some symbols dominate
fn skewed_bytes_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(
        prop_oneof![
            8 => Just(b'e'),
            4 => Just(b't'),
            2 => Just(b'a'),
            1 => any::<u8>(),
        ],
        0..4096,
    )
}

// =============================================================================
// ROUND TRIP
// =============================================================================

proptest! {
    #[test]
    fn prop_round_trip_arbitrary(data in prop::collection::vec(any::<u8>(), 0..2048)) {
        let compressed = compress_bytes(&data).unwrap();
        let restored = decompress_bytes(&compressed).unwrap();
        prop_assert_eq!(restored, data);
    }

    #[test]
    fn prop_round_trip_skewed(data in skewed_bytes_strategy()) {
        let compressed = compress_bytes(&data).unwrap();
        let restored = decompress_bytes(&compressed).unwrap();
        prop_assert_eq!(restored, data);
    }

    #[test]
    fn prop_truncation_never_succeeds(
        data in prop::collection::vec(any::<u8>(), 0..256),
        cut in any::<prop::sample::Index>(),
    ) {
        let compressed = compress_bytes(&data).unwrap();
        let len = cut.index(compressed.len());
        prop_assert!(decompress_bytes(&compressed[..len]).is_err());
    }
}

// =============================================================================
// CODE TABLE PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn prop_codes_prefix_free(data in skewed_bytes_strategy()) {
        let tree = HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(&data));
        let codes = CodeTable::from_tree(&tree);
        prop_assert_eq!(codes.len(), tree.leaf_count());

        for (a, code_a) in codes.iter() {
            prop_assert!(!code_a.is_empty());
            for (b, code_b) in codes.iter() {
                if a != b {
                    prop_assert!(!code_a.is_prefix_of(code_b));
                }
            }
        }
    }

    #[test]
    fn prop_tree_shape_repeatable(data in prop::collection::vec(any::<u8>(), 0..1024)) {
        let freqs = FrequencyTable::from_bytes(&data);
        let first = HuffmanTree::from_frequencies(&freqs);
        let second = HuffmanTree::from_frequencies(&freqs);
        prop_assert!(first.same_shape(&second));
        prop_assert_eq!(
            CodeTable::from_tree(&first),
            CodeTable::from_tree(&second)
        );
    }

    #[test]
    fn prop_frequent_symbols_get_shorter_codes(data in skewed_bytes_strategy()) {
        let freqs = FrequencyTable::from_bytes(&data);
        let codes = CodeTable::from_tree(&HuffmanTree::from_frequencies(&freqs));

        for (a, code_a) in codes.iter() {
            for (b, code_b) in codes.iter() {
                if freqs.count(a) > freqs.count(b) {
                    prop_assert!(code_a.len() <= code_b.len());
                }
            }
        }
    }
}
