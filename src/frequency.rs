//! Frequency analysis for byte streams.
//!
//! Counts the occurrence of each byte value (0-255) in an input buffer,
//! records the order in which distinct values first appear, and computes
//! Shannon entropy.

/// A frequency table that tracks byte occurrence counts.
#[derive(Debug, Clone)]
pub struct FrequencyTable {
    /// Count of each byte value (index = byte value, value = count).
    pub byte: [u32; 256],
    /// Sum of all counts.
    pub total: u64,
    /// Number of distinct byte values with nonzero count.
    pub used: u32,
    /// Distinct byte values in order of first appearance in the input.
    ///
    /// Tree construction assigns leaf sequence numbers from this order,
    /// which is what makes the produced tree (and the container bytes)
    /// deterministic for a given input.
    pub order: Vec<u8>,
}

impl FrequencyTable {
    /// Create a new, zeroed frequency table.
    pub fn new() -> Self {
        Self {
            byte: [0u32; 256],
            total: 0,
            used: 0,
            order: Vec::new(),
        }
    }

    /// Count byte frequencies in the input buffer.
    ///
    /// Populates `self.byte` with per-byte counts, `self.order` with the
    /// first-appearance order, and computes `self.total` and `self.used`.
    pub fn count(&mut self, input: &[u8]) {
        for &b in input {
            if self.byte[b as usize] == 0 {
                self.order.push(b);
            }
            self.byte[b as usize] += 1;
        }
        self.total += input.len() as u64;
        self.used = self.order.len() as u32;
    }

    /// Compute the Shannon entropy of the distribution (in bits per symbol).
    ///
    /// Returns 0.0 if the table is empty.
    pub fn entropy(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        let total = self.total as f32;
        self.byte
            .iter()
            .filter(|&&c| c > 0)
            .map(|&c| {
                let prob = c as f32 / total;
                -prob * prob.log2()
            })
            .sum()
    }

    /// Get the count for a specific byte value.
    pub fn get(&self, byte: u8) -> u32 {
        self.byte[byte as usize]
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function: compute a frequency table from input.
pub fn get_frequency(input: &[u8]) -> FrequencyTable {
    let mut table = FrequencyTable::new();
    table.count(input);
    table
}
