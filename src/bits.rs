//! Bit-level packing primitives.
//!
//! All multi-bit values are packed most-significant-bit first within each
//! byte, matching the container format. `BitWriter` grows a byte vector one
//! bit at a time; `BitReader` replays a bounded bit sequence from a slice.

/// Append-only bit buffer, MSB first.
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    bytes: Vec<u8>,
    bit_len: usize,
}

impl BitWriter {
    /// Create a new, empty bit buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bits written so far.
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Append a single bit.
    pub fn push_bit(&mut self, bit: bool) {
        if self.bit_len % 8 == 0 {
            self.bytes.push(0);
        }
        if bit {
            let byte_idx = self.bit_len / 8;
            let bit_offset = 7 - (self.bit_len % 8);
            self.bytes[byte_idx] |= 1 << bit_offset;
        }
        self.bit_len += 1;
    }

    /// Append the low `bits` bits of `value`, most significant first.
    pub fn push_bits(&mut self, value: u64, bits: u8) {
        for bit_idx in (0..bits).rev() {
            self.push_bit((value >> bit_idx) & 1 == 1);
        }
    }

    /// Append a full byte, most significant bit first.
    pub fn push_byte(&mut self, value: u8) {
        self.push_bits(value as u64, 8);
    }

    /// Pad the buffer to a byte boundary with zero bits.
    ///
    /// Returns the number of padding bits appended (0-7).
    pub fn pad_to_byte(&mut self) -> u8 {
        let padding = ((8 - self.bit_len % 8) % 8) as u8;
        for _ in 0..padding {
            self.push_bit(false);
        }
        padding
    }

    /// Consume the writer and return the packed bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Bounded bit cursor over a byte slice, MSB first.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    bit_len: usize,
}

impl<'a> BitReader<'a> {
    /// Create a reader over the first `bit_len` bits of `bytes`.
    ///
    /// `bit_len` must not exceed `bytes.len() * 8`.
    pub fn new(bytes: &'a [u8], bit_len: usize) -> Self {
        debug_assert!(bit_len <= bytes.len() * 8);
        Self {
            bytes,
            pos: 0,
            bit_len,
        }
    }

    /// Number of bits consumed so far.
    pub fn bits_consumed(&self) -> usize {
        self.pos
    }

    /// Number of bits left to read.
    pub fn remaining(&self) -> usize {
        self.bit_len - self.pos
    }

    /// Read one bit, or `None` if the sequence is exhausted.
    pub fn read_bit(&mut self) -> Option<bool> {
        if self.pos >= self.bit_len {
            return None;
        }
        let byte_idx = self.pos / 8;
        let bit_offset = 7 - (self.pos % 8);
        self.pos += 1;
        Some((self.bytes[byte_idx] >> bit_offset) & 1 == 1)
    }

    /// Read eight bits as a byte, or `None` if fewer than eight remain.
    pub fn read_u8(&mut self) -> Option<u8> {
        if self.remaining() < 8 {
            return None;
        }
        let mut value = 0u8;
        for _ in 0..8 {
            value = (value << 1) | self.read_bit()? as u8;
        }
        Some(value)
    }
}
