//! Cross-module validation tests.
//!
//! These tests verify:
//! 1. **Round-trip correctness** over diverse data shapes
//! 2. **Determinism** of the container bytes
//! 3. **Algorithmic properties** - entropy bounds, prefix-freedom
//! 4. **Edge cases** - empty input, single symbol, full alphabet
//! 5. **Corruption rejection** - every structural error surfaces
use crate::container::{compress, decompress};
use crate::frequency::get_frequency;
use crate::tree::HuffmanTree;
use crate::HuffError;

// ---------------------------------------------------------------
// Helper: generate diverse test vectors
// ---------------------------------------------------------------

/// Highly compressible: single byte repeated.
fn data_all_zeros(n: usize) -> Vec<u8> {
    vec![0u8; n]
}

/// Incompressible: every byte value once (uniform distribution, 8 bits entropy).
fn data_uniform() -> Vec<u8> {
    (0..=255u8).collect()
}

/// Skewed distribution: 90% one byte, 10% another.
fn data_skewed(n: usize) -> Vec<u8> {
    let mut v = Vec::with_capacity(n);
    for i in 0..n {
        v.push(if i % 10 == 0 { 1 } else { 0 });
    }
    v
}

/// Repetitive text with structure.
fn data_repeating_text() -> Vec<u8> {
    let pattern = b"the quick brown fox jumps over the lazy dog. ";
    let mut v = Vec::new();
    for _ in 0..100 {
        v.extend_from_slice(pattern);
    }
    v
}

/// Binary data with some structure (sawtooth).
fn data_sawtooth(n: usize) -> Vec<u8> {
    (0..n).map(|i| (i % 256) as u8).collect()
}

/// Run-heavy data.
fn data_runs() -> Vec<u8> {
    let mut v = Vec::new();
    for i in 0..50u8 {
        for _ in 0..(256 - i as usize * 4).max(1) {
            v.push(i);
        }
    }
    v
}

/// Fibonacci-weighted symbols: produces a maximally skewed tree.
fn data_fibonacci_weights() -> Vec<u8> {
    let mut v = Vec::new();
    let (mut a, mut b) = (1usize, 1usize);
    for sym in 0..20u8 {
        v.extend(std::iter::repeat(sym).take(a));
        let next = a + b;
        a = b;
        b = next;
    }
    v
}

// ---------------------------------------------------------------
// 1. Round-trip validation
// ---------------------------------------------------------------

macro_rules! round_trip_test {
    ($name:ident, $data:expr) => {
        #[test]
        fn $name() {
            let input = $data;
            let container = compress(&input);
            let decompressed = decompress(&container).unwrap();
            assert_eq!(decompressed, input, "round-trip failed");
        }
    };
}

round_trip_test!(round_trip_empty, Vec::<u8>::new());
round_trip_test!(round_trip_one_byte, vec![0x42]);
round_trip_test!(round_trip_all_zeros, data_all_zeros(4096));
round_trip_test!(round_trip_uniform, data_uniform());
round_trip_test!(round_trip_skewed, data_skewed(4096));
round_trip_test!(round_trip_text, data_repeating_text());
round_trip_test!(round_trip_sawtooth, data_sawtooth(10_000));
round_trip_test!(round_trip_runs, data_runs());
round_trip_test!(round_trip_fibonacci, data_fibonacci_weights());

// ---------------------------------------------------------------
// 2. Determinism
// ---------------------------------------------------------------

#[test]
fn identical_input_identical_container() {
    for input in [
        data_uniform(),
        data_skewed(1000),
        data_repeating_text(),
        data_fibonacci_weights(),
    ] {
        assert_eq!(compress(&input), compress(&input));
    }
}

// ---------------------------------------------------------------
// 3. Algorithmic properties
// ---------------------------------------------------------------

/// The Huffman payload cannot beat the entropy lower bound.
#[test]
fn payload_respects_entropy_bound() {
    for input in [data_skewed(4096), data_repeating_text(), data_runs()] {
        let table = get_frequency(&input);
        let entropy_bits = table.entropy() as f64 * input.len() as f64;
        let container = compress(&input);
        // Container overhead: headers plus the serialized tree, at most
        // 3 + ceil((2k-1 + 8k) / 8) + 1 bytes for k distinct symbols.
        let k = table.used as f64;
        let overhead = 4.0 + ((10.0 * k - 1.0) / 8.0).ceil();
        let payload_bits = (container.len() as f64 - overhead) * 8.0;
        assert!(
            payload_bits + 8.0 >= entropy_bits,
            "payload {} bits beats entropy bound {} bits",
            payload_bits,
            entropy_bits
        );
    }
}

/// Huffman spends at most one extra bit per symbol over the entropy.
#[test]
fn payload_within_one_bit_per_symbol() {
    for input in [data_skewed(4096), data_repeating_text()] {
        let table = get_frequency(&input);
        let entropy_bits = table.entropy() as f64 * input.len() as f64;
        let container = compress(&input);
        let max_bits = entropy_bits + input.len() as f64 + 8.0;
        let payload_bits = (container.len() * 8) as f64;
        let k = table.used as f64;
        let overhead_bits = 32.0 + 10.0 * k;
        assert!(
            payload_bits <= max_bits + overhead_bits,
            "payload {} bits exceeds H+1 bound {} bits",
            payload_bits,
            max_bits + overhead_bits
        );
    }
}

#[test]
fn codes_are_prefix_free_on_diverse_data() {
    for input in [data_repeating_text(), data_runs(), data_fibonacci_weights()] {
        let tree = HuffmanTree::from_data(&input).unwrap();
        let codes: Vec<(u64, u8)> = (0..=255u8)
            .map(|b| tree.code(b))
            .filter(|&(_, bits)| bits > 0)
            .collect();
        for (i, &(cw_i, bits_i)) in codes.iter().enumerate() {
            for (j, &(cw_j, bits_j)) in codes.iter().enumerate() {
                if i != j && bits_i <= bits_j {
                    assert_ne!(cw_j >> (bits_j - bits_i), cw_i);
                }
            }
        }
    }
}

// ---------------------------------------------------------------
// 4. Edge cases
// ---------------------------------------------------------------

#[test]
fn empty_container_is_exactly_one_zero_byte() {
    assert_eq!(compress(&[]), vec![0x00]);
    assert_eq!(decompress(&[0x00]).unwrap(), Vec::<u8>::new());
}

#[test]
fn single_symbol_container_shape() {
    let container = compress(b"aaaa");
    // tree_present, tree_padding, 2 tree bytes, payload_padding, 1 payload byte
    assert_eq!(container.len(), 6);
    assert_eq!(container[0], 0x01);
}

#[test]
fn maximally_skewed_tree_round_trips() {
    // Deep tree exercises the explicit-stack traversals
    let input = data_fibonacci_weights();
    let tree = HuffmanTree::from_data(&input).unwrap();
    assert_eq!(tree.leaf_count, 20);
    // Fibonacci weights give the deepest possible tree: 19-bit max code
    let max_bits = (0..=255u8).map(|b| tree.code(b).1).max().unwrap();
    assert_eq!(max_bits, 19);
    assert_eq!(decompress(&compress(&input)).unwrap(), input);
}

// ---------------------------------------------------------------
// 5. Corruption rejection
// ---------------------------------------------------------------

#[test]
fn every_prefix_truncation_fails_or_round_trips_shorter() {
    // No prefix of a valid container may decode to the original input,
    // and none may panic.
    let input = data_repeating_text();
    let container = compress(&input);
    for len in 0..container.len() {
        match decompress(&container[..len]) {
            Ok(output) => assert_ne!(output, input),
            Err(HuffError::MalformedContainer) => {}
        }
    }
}

#[test]
fn corrupt_tree_present_byte_fails() {
    let mut container = compress(b"some data");
    container[0] = 0x7F;
    assert_eq!(decompress(&container), Err(HuffError::MalformedContainer));
}

#[test]
fn truncated_text_payload_fails() {
    // Five distinct symbols with codes of mixed length: dropping the
    // final payload byte leaves the bit stream mid-codeword.
    let input = b"aaabbbccc ddd";
    let container = compress(input);
    assert_eq!(decompress(&container).unwrap(), input);

    let mut truncated = container.clone();
    truncated.pop();
    assert_eq!(decompress(&truncated), Err(HuffError::MalformedContainer));
}

#[test]
fn truncated_single_symbol_payload_decodes_short() {
    // A single-leaf tree has the one-bit codeword 0, so every bit of a
    // truncated payload is still a whole codeword and the declared
    // padding stays in range. The container carries no symbol count, so
    // this truncation is undetectable: it decodes to fewer symbols
    // rather than failing. 30 symbols pack into 4 payload bytes with 2
    // padding bits; dropping one byte leaves 22 decodable bits.
    let mut container = compress(&vec![b'z'; 30]);
    container.pop();
    assert_eq!(decompress(&container).unwrap(), vec![b'z'; 22]);
}
