//! MGF-TP-1 mask generation (IEEE P1363.1 section 8.4.1.1).
//!
//! Expands a byte seed into a ternary mask polynomial: SHA-512 output
//! blocks are concatenated, truncated, and decoded as a trit stream.

use crate::hash::sha512_with_counter;
use trellis_core::poly::IntegerPolynomial;
use zeroize::Zeroize;

/// Generates the length-`n` ternary mask polynomial for `input`.
pub fn generate_mask(input: &[u8], n: usize, min_calls_mask: usize) -> IntegerPolynomial {
    let num_bytes = (3 * n + 2) / 2;
    let num_calls = num_bytes.div_ceil(64).max(min_calls_mask);
    let mut buf = Vec::with_capacity(num_calls * 64);
    for counter in 0..num_calls {
        buf.extend_from_slice(&sha512_with_counter(input, counter as u32));
    }
    buf.truncate(num_bytes);
    let mask = IntegerPolynomial::from_binary3(&buf, n);
    buf.zeroize();
    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic() {
        let a = generate_mask(b"mask seed", 439, 9);
        let b = generate_mask(b"mask seed", 439, 9);
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_inputs_differ() {
        let a = generate_mask(b"mask seed", 439, 9);
        let b = generate_mask(b"mask seed 2", 439, 9);
        assert_ne!(a, b);
    }

    #[test]
    fn test_output_is_ternary() {
        let mask = generate_mask(b"ternary check", 743, 14);
        for &c in &mask.coeffs {
            assert!((-1..=1).contains(&c));
        }
        // the trit decoder fills coefficients pairwise, so for odd n the
        // final coefficient stays zero
        assert_eq!(mask.coeffs[742], 0);
    }

    #[test]
    fn test_fills_most_coefficients() {
        let mask = generate_mask(b"density check", 439, 9);
        let nonzero = mask.coeffs.iter().filter(|&&c| c != 0).count();
        // roughly 5 of 8 bit-triples decode to a pair with a nonzero trit
        assert!(nonzero > 150, "mask too sparse: {nonzero}");
    }
}
