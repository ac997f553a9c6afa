//! Bit-exact binary codecs for integer polynomials.
//!
//! Four formats, all defined down to the bit:
//!
//! - **base-q**: each coefficient as `log2(q)` bits, coefficient bits
//!   emitted least-significant first into a bit stream that fills each byte
//!   from bit 0 upward.
//! - **tight base-3**: five trits per byte, `d = t0 + 3*t1 + 9*t2 + 27*t3 +
//!   81*t4` with the trit mapping `0 -> 0`, `1 -> 1`, `-1 -> 2`.
//! - **arithmetic base-3**: two bits per trit, packed most-significant first
//!   within each byte; `00 -> 0`, `01 -> 1`, `10 -> -1`, `11` reserved.
//! - **message trits**: three stream bits per coefficient pair, the encoding
//!   used for SVES message buffers and mask generation. Every 3-bit pattern
//!   is a valid pair, so the decoder digests arbitrary bytes; the pair
//!   `(-1, -1)` has no encoding and cannot be produced by the decoder.

use crate::error::{Error, Result};
use crate::poly::IntegerPolynomial;

/// Reads one bit from a byte stream filled from bit 0 upward.
#[inline]
fn get_bit(data: &[u8], bit_index: usize) -> i64 {
    ((data[bit_index >> 3] >> (bit_index & 7)) & 1) as i64
}

/// Sets one bit in a byte stream filled from bit 0 upward.
#[inline]
fn set_bit(data: &mut [u8], bit_index: usize) {
    data[bit_index >> 3] |= 1 << (bit_index & 7);
}

/// Number of bits needed per coefficient in `[0, q)` for a power of two `q`.
#[inline]
fn bits_per_coeff(q: i64) -> usize {
    (63 - (q as u64).leading_zeros() as usize).max(1)
}

/// First trit of the pair encoded by each 3-bit index.
const PAIR_TRIT1: [i64; 8] = [0, 0, 0, 1, 1, 1, -1, -1];
/// Second trit of the pair encoded by each 3-bit index.
const PAIR_TRIT2: [i64; 8] = [0, 1, -1, 0, 1, -1, 0, 1];

impl IntegerPolynomial {
    /// Packs all coefficients at `log2(q)` bits each.
    ///
    /// Coefficients must already be reduced into `[0, q)`; `q` must be a
    /// power of two. The final byte is zero-padded.
    pub fn to_binary(&self, q: i64) -> Vec<u8> {
        let bits = bits_per_coeff(q);
        let mut data = vec![0u8; (self.coeffs.len() * bits + 7) / 8];
        let mut bit_index = 0;
        for &c in &self.coeffs {
            debug_assert!((0..q).contains(&c));
            for j in 0..bits {
                if (c >> j) & 1 == 1 {
                    set_bit(&mut data, bit_index);
                }
                bit_index += 1;
            }
        }
        data
    }

    /// Inverse of [`to_binary`](Self::to_binary): reads `n` coefficients of
    /// `log2(q)` bits each.
    pub fn from_binary(data: &[u8], n: usize, q: i64) -> Result<IntegerPolynomial> {
        let bits = bits_per_coeff(q);
        if data.len() * 8 < n * bits {
            return Err(Error::InvalidEncoding("not enough bytes for base-q decoding"));
        }
        let mut poly = IntegerPolynomial::new(n);
        let mut bit_index = 0;
        for c in &mut poly.coeffs {
            let mut v = 0i64;
            for j in 0..bits {
                v |= get_bit(data, bit_index) << j;
                bit_index += 1;
            }
            *c = v;
        }
        Ok(poly)
    }

    /// Packs ternary coefficients at five trits per byte.
    ///
    /// Byte value `d = t0 + 3*t1 + 9*t2 + 27*t3 + 81*t4` with trits mapped
    /// `0 -> 0`, `1 -> 1`, `-1 -> 2`; a final group of fewer than five trits
    /// packs the same way with the missing high trits zero.
    pub fn to_binary3_tight(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity((self.coeffs.len() + 4) / 5);
        for group in self.coeffs.chunks(5) {
            let mut d = 0u16;
            let mut weight = 1u16;
            for &c in group {
                d += trit_value(c) as u16 * weight;
                weight *= 3;
            }
            data.push(d as u8);
        }
        data
    }

    /// Inverse of [`to_binary3_tight`](Self::to_binary3_tight).
    ///
    /// Rejects bytes whose value cannot arise from the group they encode
    /// (`>= 243` for a full group, `>= 3^k` for a final group of `k` trits).
    pub fn from_binary3_tight(data: &[u8], n: usize) -> Result<IntegerPolynomial> {
        let num_bytes = (n + 4) / 5;
        if data.len() < num_bytes {
            return Err(Error::InvalidEncoding(
                "not enough bytes for tight base-3 decoding",
            ));
        }
        let mut poly = IntegerPolynomial::new(n);
        for (i, &byte) in data[..num_bytes].iter().enumerate() {
            let group_len = (n - 5 * i).min(5);
            let limit = 3u16.pow(group_len as u32);
            let mut d = byte as u16;
            if d >= limit {
                return Err(Error::InvalidEncoding("tight base-3 byte out of range"));
            }
            for j in 0..group_len {
                let t = d % 3;
                poly.coeffs[5 * i + j] = trit_from_value(t as u8);
                d /= 3;
            }
        }
        Ok(poly)
    }

    /// Packs ternary coefficients at two bits per trit, most-significant
    /// pair first within each byte.
    ///
    /// # Panics
    ///
    /// Panics if a coefficient is outside `{-1, 0, 1}`.
    pub fn to_binary3_arith(&self) -> Vec<u8> {
        let mut data = vec![0u8; (self.coeffs.len() + 3) / 4];
        for (i, &c) in self.coeffs.iter().enumerate() {
            let v: u8 = match c {
                0 => 0b00,
                1 => 0b01,
                -1 => 0b10,
                _ => panic!("coefficient {c} is not ternary"),
            };
            data[i / 4] |= v << (6 - 2 * (i % 4));
        }
        data
    }

    /// Inverse of [`to_binary3_arith`](Self::to_binary3_arith).
    ///
    /// The pair `11` is reserved and rejected.
    pub fn from_binary3_arith(data: &[u8], n: usize) -> Result<IntegerPolynomial> {
        if data.len() * 4 < n {
            return Err(Error::InvalidEncoding(
                "not enough bytes for arithmetic base-3 decoding",
            ));
        }
        let mut poly = IntegerPolynomial::new(n);
        for i in 0..n {
            let v = (data[i / 4] >> (6 - 2 * (i % 4))) & 0b11;
            poly.coeffs[i] = match v {
                0b00 => 0,
                0b01 => 1,
                0b10 => -1,
                _ => return Err(Error::InvalidEncoding("reserved trit pair 11")),
            };
        }
        Ok(poly)
    }

    /// Packs ternary coefficients pairwise at three bits per pair.
    ///
    /// Iterates over `floor(N/2)` coefficient pairs; for odd `N` the last
    /// coefficient carries no data and must be zero. Fails with
    /// [`Error::InvalidEncoding`] on a `(-1, -1)` pair, which has no 3-bit
    /// index (such a pair is never produced by
    /// [`from_binary3`](Self::from_binary3)).
    pub fn to_binary3(&self) -> Result<Vec<u8>> {
        let n = self.coeffs.len();
        let num_pairs = n / 2;
        let mut data = vec![0u8; (3 * num_pairs + 7) / 8];
        let mut bit_index = 0;
        for pair in self.coeffs[..2 * num_pairs].chunks(2) {
            let v = match (pair[0], pair[1]) {
                (0, 0) => 0,
                (0, 1) => 1,
                (0, -1) => 2,
                (1, 0) => 3,
                (1, 1) => 4,
                (1, -1) => 5,
                (-1, 0) => 6,
                (-1, 1) => 7,
                _ => return Err(Error::InvalidEncoding("coefficient pair has no encoding")),
            };
            for shift in [2, 1, 0] {
                if (v >> shift) & 1 == 1 {
                    set_bit(&mut data, bit_index);
                }
                bit_index += 1;
            }
        }
        Ok(data)
    }

    /// Decodes a byte stream into `n` ternary coefficients, two per 3-bit
    /// group.
    ///
    /// Consumes groups while at least two coefficient slots and three stream
    /// bits remain; any unfilled coefficients stay zero. Because every 3-bit
    /// pattern maps to a pair, this decoder accepts arbitrary input bytes
    /// (it is also used to turn hash output into a mask polynomial).
    pub fn from_binary3(data: &[u8], n: usize) -> IntegerPolynomial {
        let mut poly = IntegerPolynomial::new(n);
        let total_bits = data.len() * 8;
        let mut bit_index = 0;
        let mut i = 0;
        while i + 2 <= n && bit_index + 3 <= total_bits {
            let v = (get_bit(data, bit_index) << 2)
                | (get_bit(data, bit_index + 1) << 1)
                | get_bit(data, bit_index + 2);
            poly.coeffs[i] = PAIR_TRIT1[v as usize];
            poly.coeffs[i + 1] = PAIR_TRIT2[v as usize];
            bit_index += 3;
            i += 2;
        }
        poly
    }
}

/// Maps a ternary coefficient to its base-3 digit: `0 -> 0`, `1 -> 1`,
/// `-1 -> 2`.
fn trit_value(c: i64) -> u8 {
    match c {
        0 => 0,
        1 => 1,
        -1 => 2,
        _ => panic!("coefficient {c} is not ternary"),
    }
}

/// Inverse of [`trit_value`].
fn trit_from_value(t: u8) -> i64 {
    match t {
        0 => 0,
        1 => 1,
        _ => -1,
    }
}
