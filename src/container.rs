//! The self-describing compressed container format.
//!
//! Layout (all multi-bit fields packed MSB first within each byte):
//!
//! | field             | width                     | meaning                          |
//! |-------------------|---------------------------|----------------------------------|
//! | `tree_present`    | 1 byte                    | 0x00 = empty input, 0x01 = tree  |
//! | `tree_padding`    | 1 byte                    | padding bits (0-7) in tree_bits  |
//! | `tree_bits`       | variable, byte-padded     | pre-order tree, see [`tree`]     |
//! | `payload_padding` | 1 byte                    | padding bits (0-7) in payload    |
//! | `payload_bits`    | variable, byte-padded     | Huffman-coded input symbols      |
//!
//! If `tree_present` is 0x00 the container is exactly one byte and decodes
//! to the empty byte sequence; all later fields are absent.
//!
//! [`tree`]: crate::tree

use crate::bits::{BitReader, BitWriter};
use crate::frequency::FrequencyTable;
use crate::tree::HuffmanTree;
use crate::{HuffError, HuffResult};

/// `tree_present` value for an empty-input container.
const TREE_ABSENT: u8 = 0x00;
/// `tree_present` value when a serialized tree follows.
const TREE_PRESENT: u8 = 0x01;

/// Compress a byte sequence into a self-describing container.
///
/// Never fails: every byte sequence, including the empty one, is valid
/// input. Identical input always yields identical output bytes.
pub fn compress(input: &[u8]) -> Vec<u8> {
    let mut freq = FrequencyTable::new();
    freq.count(input);

    let tree = match HuffmanTree::from_frequency_table(&freq) {
        Some(tree) => tree,
        None => return vec![TREE_ABSENT],
    };

    let mut output = vec![TREE_PRESENT];

    // Tree preamble: pre-order bits, padded to a byte boundary
    let mut tree_bits = BitWriter::new();
    tree.serialize_into(&mut tree_bits);
    output.push(tree_bits.pad_to_byte());
    output.extend_from_slice(&tree_bits.into_bytes());

    // Payload: one codeword per input symbol, padded to a byte boundary
    let mut payload_bits = BitWriter::new();
    for &byte in input {
        let (code, bits) = tree.code(byte);
        payload_bits.push_bits(code, bits);
    }
    output.push(payload_bits.pad_to_byte());
    output.extend_from_slice(&payload_bits.into_bytes());

    output
}

/// Decompress a container produced by [`compress`].
///
/// Fails with [`HuffError::MalformedContainer`] on any structural
/// inconsistency; no partial output is ever returned.
pub fn decompress(input: &[u8]) -> HuffResult<Vec<u8>> {
    let (&tree_present, rest) = input.split_first().ok_or(HuffError::MalformedContainer)?;

    match tree_present {
        TREE_ABSENT => {
            // An empty-input container is exactly one byte
            if rest.is_empty() {
                Ok(Vec::new())
            } else {
                Err(HuffError::MalformedContainer)
            }
        }
        TREE_PRESENT => {
            let (&tree_padding, tree_region) =
                rest.split_first().ok_or(HuffError::MalformedContainer)?;
            if tree_padding >= 8 {
                return Err(HuffError::MalformedContainer);
            }

            // The tree bit stream is self-delimiting: replay it, then check
            // the declared padding matches the bit position it ended at.
            let mut reader = BitReader::new(tree_region, tree_region.len() * 8);
            let tree = HuffmanTree::deserialize_from(&mut reader)?;
            let tree_bit_len = reader.bits_consumed();
            if tree_padding as usize != (8 - tree_bit_len % 8) % 8 {
                return Err(HuffError::MalformedContainer);
            }

            let tree_byte_len = (tree_bit_len + tree_padding as usize) / 8;
            let payload_region = &tree_region[tree_byte_len..];
            let (&payload_padding, payload) = payload_region
                .split_first()
                .ok_or(HuffError::MalformedContainer)?;
            if payload_padding >= 8 || (payload_padding as usize) > payload.len() * 8 {
                return Err(HuffError::MalformedContainer);
            }

            let payload_bit_len = payload.len() * 8 - payload_padding as usize;
            let mut reader = BitReader::new(payload, payload_bit_len);
            tree.decode_bits(&mut reader)
        }
        _ => Err(HuffError::MalformedContainer),
    }
}
