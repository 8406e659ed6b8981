//! Huffman tree construction, code assignment, and tree serialization.
//!
//! The tree is stored as an arena of nodes indexed by integer handles, so
//! ownership stays strictly hierarchical and no cycles are possible. All
//! traversals (code generation, serialization, deserialization, payload
//! decoding) use explicit work stacks rather than call recursion, so a
//! pathologically skewed tree cannot exhaust the call stack.
//!
//! Construction is deterministic: leaves get sequence numbers in the order
//! their byte value first appears in the input, merged nodes continue the
//! numbering in merge order, and the build heap is keyed by
//! `(weight, sequence)` ascending. Equal-weight ties therefore always
//! resolve the same way, and identical input yields identical trees.

use crate::bits::{BitReader, BitWriter};
use crate::frequency::FrequencyTable;
use crate::pqueue::MinHeap;
use crate::{HuffError, HuffResult};

/// A node in the Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanNode {
    /// Frequency weight of this node (or subtree).
    pub weight: u32,
    /// Creation-order sequence number, the tie-break key.
    pub seq: u32,
    /// Byte value (only meaningful for leaf nodes).
    pub value: u8,
    /// Left child index (None for leaves).
    pub left: Option<usize>,
    /// Right child index (None for leaves).
    pub right: Option<usize>,
}

impl HuffmanNode {
    fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// A Huffman tree for encoding and decoding byte streams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    /// All nodes stored in a flat vector: leaves first (in first-seen
    /// order), then internal nodes in merge order.
    nodes: Vec<HuffmanNode>,
    /// Index of the root node in `nodes`.
    root: usize,
    /// Lookup table: for each byte value, (codeword, code_bits).
    /// `code_bits == 0` means the byte does not occur.
    lookup: [(u64, u8); 256],
    /// Number of distinct symbols in the tree.
    pub leaf_count: u32,
}

impl HuffmanTree {
    /// Build a Huffman tree from input data.
    ///
    /// Returns `None` for empty input (no tree).
    pub fn from_data(input: &[u8]) -> Option<Self> {
        let mut freq = FrequencyTable::new();
        freq.count(input);
        Self::from_frequency_table(&freq)
    }

    /// Build a Huffman tree from a pre-computed frequency table.
    ///
    /// Leaves are created in the table's first-seen order; internal nodes
    /// are created by repeatedly merging the two minimum `(weight, seq)`
    /// nodes, with the first extraction becoming the left child.
    pub fn from_frequency_table(freq: &FrequencyTable) -> Option<Self> {
        if freq.used == 0 {
            return None;
        }

        let mut nodes: Vec<HuffmanNode> = Vec::with_capacity(2 * freq.order.len());
        let mut heap: MinHeap<usize> = MinHeap::new();

        for (seq, &value) in freq.order.iter().enumerate() {
            let idx = nodes.len();
            nodes.push(HuffmanNode {
                weight: freq.byte[value as usize],
                seq: seq as u32,
                value,
                left: None,
                right: None,
            });
            heap.push((nodes[idx].weight, nodes[idx].seq), idx);
        }

        let mut next_seq = nodes.len() as u32;

        // Merge until one node remains. A single distinct symbol skips the
        // loop entirely: the root is that leaf.
        while heap.len() > 1 {
            let first = heap.pop()?;
            let second = heap.pop()?;

            let merged = HuffmanNode {
                weight: nodes[first].weight + nodes[second].weight,
                seq: next_seq,
                value: 0,
                left: Some(first),
                right: Some(second),
            };
            next_seq += 1;

            let idx = nodes.len();
            heap.push((merged.weight, merged.seq), idx);
            nodes.push(merged);
        }

        let root = heap.pop()?;
        let leaf_count = freq.used;
        let lookup = Self::generate_codes(&nodes, root);

        Some(HuffmanTree {
            nodes,
            root,
            lookup,
            leaf_count,
        })
    }

    /// Assign codewords to all leaves via an iterative pre-order walk.
    ///
    /// Left edges append 0, right edges append 1. A root that is itself a
    /// leaf (single-symbol tree) gets the one-bit codeword 0, since a
    /// traversal cannot emit an empty code.
    fn generate_codes(nodes: &[HuffmanNode], root: usize) -> [(u64, u8); 256] {
        let mut lookup = [(0u64, 0u8); 256];

        if nodes[root].is_leaf() {
            lookup[nodes[root].value as usize] = (0, 1);
            return lookup;
        }

        let mut stack: Vec<(usize, u64, usize)> = vec![(root, 0, 0)];
        while let Some((idx, prefix, depth)) = stack.pop() {
            match (nodes[idx].left, nodes[idx].right) {
                (Some(left), Some(right)) => {
                    stack.push((right, (prefix << 1) | 1, depth + 1));
                    stack.push((left, prefix << 1, depth + 1));
                }
                _ => {
                    // Codewords longer than 64 bits only arise from crafted
                    // containers; such leaves keep a zero entry. Decoding
                    // walks the node arena and never consults the table.
                    if depth <= 64 {
                        lookup[nodes[idx].value as usize] = (prefix, depth as u8);
                    }
                }
            }
        }

        lookup
    }

    /// Get the codeword and number of bits for a given byte value.
    ///
    /// A bit count of 0 means the byte does not occur in the tree.
    pub fn code(&self, byte: u8) -> (u64, u8) {
        self.lookup[byte as usize]
    }

    /// Serialize the tree shape and leaf values into a bit stream.
    ///
    /// Pre-order: one flag bit per node (0 = internal, 1 = leaf), each leaf
    /// flag followed by the raw 8-bit symbol value.
    pub fn serialize_into(&self, w: &mut BitWriter) {
        let mut stack = vec![self.root];
        while let Some(idx) = stack.pop() {
            match (self.nodes[idx].left, self.nodes[idx].right) {
                (Some(left), Some(right)) => {
                    w.push_bit(false);
                    stack.push(right);
                    stack.push(left);
                }
                _ => {
                    w.push_bit(true);
                    w.push_byte(self.nodes[idx].value);
                }
            }
        }
    }

    /// Reconstruct a tree from a pre-order bit stream produced by
    /// [`serialize_into`](Self::serialize_into).
    ///
    /// Weights and sequence numbers are synthesized; only the tree shape
    /// and leaf values matter for decoding. Fails with
    /// [`HuffError::MalformedContainer`] if the bit stream ends before the
    /// tree is complete.
    pub fn deserialize_from(r: &mut BitReader<'_>) -> HuffResult<Self> {
        let mut nodes: Vec<HuffmanNode> = Vec::new();

        let (root, root_is_leaf) = Self::read_node(r, &mut nodes)?;
        // Internal nodes still waiting for children; the top of the stack
        // is the parent of the next node in the stream. Freshly read
        // internal nodes have no children wired yet, so membership is
        // decided by the flag bit, not by node shape.
        let mut pending: Vec<usize> = Vec::new();
        if !root_is_leaf {
            pending.push(root);
        }

        while let Some(&parent) = pending.last() {
            let (child, child_is_leaf) = Self::read_node(r, &mut nodes)?;
            if nodes[parent].left.is_none() {
                nodes[parent].left = Some(child);
            } else {
                nodes[parent].right = Some(child);
                pending.pop();
            }
            if !child_is_leaf {
                pending.push(child);
            }
        }

        let leaf_count = nodes.iter().filter(|n| n.is_leaf()).count() as u32;
        let lookup = Self::generate_codes(&nodes, root);

        Ok(HuffmanTree {
            nodes,
            root,
            lookup,
            leaf_count,
        })
    }

    /// Read one node record (flag bit, plus the symbol value for leaves).
    ///
    /// Returns the arena index and whether the flag marked a leaf.
    fn read_node(
        r: &mut BitReader<'_>,
        nodes: &mut Vec<HuffmanNode>,
    ) -> HuffResult<(usize, bool)> {
        let is_leaf = r.read_bit().ok_or(HuffError::MalformedContainer)?;
        let value = if is_leaf {
            r.read_u8().ok_or(HuffError::MalformedContainer)?
        } else {
            0
        };
        let idx = nodes.len();
        nodes.push(HuffmanNode {
            weight: 0,
            seq: idx as u32,
            value,
            left: None,
            right: None,
        });
        Ok((idx, is_leaf))
    }

    /// Decode a Huffman-coded bit stream back into bytes.
    ///
    /// Walks the tree bit by bit (left on 0, right on 1), emitting the leaf
    /// value and restarting at the root each time a leaf is reached. Fails
    /// with [`HuffError::MalformedContainer`] if the stream ends in the
    /// middle of a codeword.
    pub fn decode_bits(&self, r: &mut BitReader<'_>) -> HuffResult<Vec<u8>> {
        let mut output = Vec::new();

        // Single-leaf tree: the only codeword is the one-bit 0.
        if self.nodes[self.root].is_leaf() {
            while let Some(bit) = r.read_bit() {
                if bit {
                    return Err(HuffError::MalformedContainer);
                }
                output.push(self.nodes[self.root].value);
            }
            return Ok(output);
        }

        let mut idx = self.root;
        while let Some(bit) = r.read_bit() {
            let next = if bit {
                self.nodes[idx].right
            } else {
                self.nodes[idx].left
            };
            idx = next.ok_or(HuffError::MalformedContainer)?;
            if self.nodes[idx].is_leaf() {
                output.push(self.nodes[idx].value);
                idx = self.root;
            }
        }

        // A partial codeword at the end means the payload is corrupt.
        if idx != self.root {
            return Err(HuffError::MalformedContainer);
        }

        Ok(output)
    }
}
