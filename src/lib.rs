//! huffpack: lossless Huffman compression with a self-describing container.
//!
//! The codec operates on in-memory byte slices and produces in-memory byte
//! vectors. Each compressed container embeds a pre-order serialization of
//! the Huffman tree, so decompression needs nothing beyond the container
//! bytes themselves.
//!
//! ```
//! let data = b"abracadabra";
//! let packed = huffpack::compress(data);
//! let unpacked = huffpack::decompress(&packed).unwrap();
//! assert_eq!(unpacked, data);
//! ```

pub mod bits;
pub mod container;
pub mod frequency;
pub mod pqueue;
pub mod tree;

#[cfg(test)]
mod validation;

pub use container::{compress, decompress};
pub use tree::HuffmanTree;

/// Error type for huffpack operations.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HuffError {
    /// The container bytes cannot be parsed consistently: truncated tree
    /// description, truncated payload, leftover partial codeword, or an
    /// out-of-range header field. The output must not be trusted.
    MalformedContainer,
}

impl std::fmt::Display for HuffError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedContainer => write!(f, "malformed container"),
        }
    }
}

impl std::error::Error for HuffError {}

pub type HuffResult<T> = Result<T, HuffError>;
