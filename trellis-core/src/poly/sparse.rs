//! Sparse ternary polynomials.
//!
//! When only `d` of the `N` coefficients are nonzero, storing the +1 and -1
//! positions as index lists turns multiplication by a dense polynomial into
//! `O(N*d)` additions, a large win for the blinding and key polynomials
//! whose weight is far below `N`.

use crate::error::{Error, Result};
use crate::poly::IntegerPolynomial;
use rand_core::CryptoRng;
use zeroize::Zeroize;

/// A ternary polynomial stored as two sorted, disjoint index lists.
#[derive(Debug, Clone, PartialEq, Eq, Zeroize)]
pub struct SparseTernaryPolynomial {
    n: usize,
    ones: Vec<u16>,
    neg_ones: Vec<u16>,
}

impl SparseTernaryPolynomial {
    /// Creates a polynomial from index lists. Both lists are sorted; the
    /// caller must ensure they are disjoint and their values are below `n`.
    pub fn new(n: usize, mut ones: Vec<u16>, mut neg_ones: Vec<u16>) -> Self {
        debug_assert!(n < (1 << 16));
        ones.sort_unstable();
        neg_ones.sort_unstable();
        debug_assert!(ones.iter().all(|&i| (i as usize) < n));
        debug_assert!(neg_ones.iter().all(|&i| (i as usize) < n));
        SparseTernaryPolynomial { n, ones, neg_ones }
    }

    /// Extracts the nonzero positions of a ternary coefficient slice.
    pub fn from_coefficients(coeffs: &[i64]) -> Self {
        let mut ones = Vec::new();
        let mut neg_ones = Vec::new();
        for (i, &c) in coeffs.iter().enumerate() {
            match c {
                1 => ones.push(i as u16),
                -1 => neg_ones.push(i as u16),
                _ => debug_assert_eq!(c, 0),
            }
        }
        SparseTernaryPolynomial {
            n: coeffs.len(),
            ones,
            neg_ones,
        }
    }

    /// Converts a dense ternary [`IntegerPolynomial`] to sparse form.
    pub fn from_integer_polynomial(poly: &IntegerPolynomial) -> Self {
        Self::from_coefficients(&poly.coeffs)
    }

    /// Generates a random polynomial with the given numbers of +1 and -1
    /// coefficients.
    ///
    /// Indices are drawn uniformly without replacement: 16-bit values from
    /// the RNG byte stream are rejection-sampled into `[0, n)` and already
    /// occupied positions are skipped.
    pub fn generate_random(
        n: usize,
        num_ones: usize,
        num_neg_ones: usize,
        rng: &mut impl CryptoRng,
    ) -> Self {
        debug_assert!(num_ones + num_neg_ones <= n);
        let limit = (1u32 << 16) - ((1u32 << 16) % n as u32);
        let mut used = vec![false; n];
        let mut draw = |used: &mut Vec<bool>| loop {
            let mut buf = [0u8; 2];
            rng.fill_bytes(&mut buf);
            let v = u32::from(u16::from_be_bytes(buf));
            if v >= limit {
                continue;
            }
            let idx = v as usize % n;
            if !used[idx] {
                used[idx] = true;
                return idx as u16;
            }
        };
        let ones: Vec<u16> = (0..num_ones).map(|_| draw(&mut used)).collect();
        let neg_ones: Vec<u16> = (0..num_neg_ones).map(|_| draw(&mut used)).collect();
        Self::new(n, ones, neg_ones)
    }

    /// Number of coefficients.
    pub fn len(&self) -> usize {
        self.n
    }

    /// Whether the polynomial has no coefficients.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// The sorted +1 positions.
    pub fn ones(&self) -> &[u16] {
        &self.ones
    }

    /// The sorted -1 positions.
    pub fn neg_ones(&self) -> &[u16] {
        &self.neg_ones
    }

    /// Multiplies by a dense polynomial without reduction.
    ///
    /// `c[k] = sum over ones i of b[(k-i) mod N] - sum over neg-ones i of
    /// b[(k-i) mod N]`, computed as shifted adds so the inner loops carry no
    /// modulo.
    pub fn mult(&self, b: &IntegerPolynomial) -> IntegerPolynomial {
        let n = self.n;
        debug_assert_eq!(n, b.coeffs.len());
        let mut c = vec![0i64; n];
        for &i in &self.ones {
            let i = i as usize;
            for j in 0..n - i {
                c[i + j] += b.coeffs[j];
            }
            for j in n - i..n {
                c[i + j - n] += b.coeffs[j];
            }
        }
        for &i in &self.neg_ones {
            let i = i as usize;
            for j in 0..n - i {
                c[i + j] -= b.coeffs[j];
            }
            for j in n - i..n {
                c[i + j - n] -= b.coeffs[j];
            }
        }
        IntegerPolynomial::from_coeffs(c)
    }

    /// Multiplies by a dense polynomial and reduces coefficients into
    /// `[0, modulus)`.
    pub fn mult_mod(&self, b: &IntegerPolynomial, modulus: i64) -> IntegerPolynomial {
        let mut c = self.mult(b);
        c.mod_positive(modulus);
        c
    }

    /// Converts to the dense integer representation.
    pub fn to_integer_polynomial(&self) -> IntegerPolynomial {
        let mut poly = IntegerPolynomial::new(self.n);
        for &i in &self.ones {
            poly.coeffs[i as usize] = 1;
        }
        for &i in &self.neg_ones {
            poly.coeffs[i as usize] = -1;
        }
        poly
    }

    /// Number of bits per packed index for ring degree `n`.
    fn index_bits(n: usize) -> usize {
        (usize::BITS - (n - 1).leading_zeros()) as usize
    }

    /// Encoded length in bytes for a polynomial with the given weights.
    pub fn binary_length(n: usize, num_ones: usize, num_neg_ones: usize) -> usize {
        (Self::index_bits(n) * (num_ones + num_neg_ones) + 7) / 8
    }

    /// Packs the index lists, ones first, at `ceil(log2 N)` bits per index.
    pub fn to_binary(&self) -> Vec<u8> {
        let bits = Self::index_bits(self.n);
        let mut data = vec![0u8; Self::binary_length(self.n, self.ones.len(), self.neg_ones.len())];
        let mut bit_index = 0;
        for &idx in self.ones.iter().chain(&self.neg_ones) {
            for j in 0..bits {
                if (idx >> j) & 1 == 1 {
                    data[bit_index >> 3] |= 1 << (bit_index & 7);
                }
                bit_index += 1;
            }
        }
        data
    }

    /// Inverse of [`to_binary`](Self::to_binary); the weights are supplied
    /// by the parameter set.
    pub fn from_binary(
        data: &[u8],
        n: usize,
        num_ones: usize,
        num_neg_ones: usize,
    ) -> Result<Self> {
        let bits = Self::index_bits(n);
        if data.len() < Self::binary_length(n, num_ones, num_neg_ones) {
            return Err(Error::InvalidEncoding(
                "not enough bytes for sparse ternary decoding",
            ));
        }
        let mut bit_index = 0;
        let mut read_index = || {
            let mut v = 0u16;
            for j in 0..bits {
                let bit = (data[bit_index >> 3] >> (bit_index & 7)) & 1;
                v |= u16::from(bit) << j;
                bit_index += 1;
            }
            v
        };
        let ones: Vec<u16> = (0..num_ones).map(|_| read_index()).collect();
        let neg_ones: Vec<u16> = (0..num_neg_ones).map(|_| read_index()).collect();
        if ones
            .iter()
            .chain(&neg_ones)
            .any(|&idx| (idx as usize) >= n)
        {
            return Err(Error::InvalidEncoding("sparse index out of range"));
        }
        Ok(Self::new(n, ones, neg_ones))
    }

    /// Overwrites the index arrays with zeros.
    pub fn clear(&mut self) {
        self.ones.zeroize();
        self.neg_ones.zeroize();
        self.ones.clear();
        self.neg_ones.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poly::DenseTernaryPolynomial;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_mult_matches_dense() {
        let mut rng = StdRng::from_seed([31u8; 32]);
        let sparse = SparseTernaryPolynomial::generate_random(439, 50, 40, &mut rng);
        let b = DenseTernaryPolynomial::generate_random(439, 146, 146, &mut rng)
            .to_integer_polynomial();
        let dense_product = sparse.to_integer_polynomial().mult(&b);
        assert_eq!(sparse.mult(&b), dense_product);
    }

    #[test]
    fn test_generate_random_disjoint() {
        let mut rng = StdRng::from_seed([32u8; 32]);
        let p = SparseTernaryPolynomial::generate_random(1000, 100, 101, &mut rng);
        assert_eq!(p.ones().len(), 100);
        assert_eq!(p.neg_ones().len(), 101);
        for &i in p.ones() {
            assert!(!p.neg_ones().contains(&i));
        }
    }

    #[test]
    fn test_binary_roundtrip() {
        let mut rng = StdRng::from_seed([33u8; 32]);
        let p = SparseTernaryPolynomial::generate_random(1000, 100, 101, &mut rng);
        let data = p.to_binary();
        assert_eq!(
            data.len(),
            SparseTernaryPolynomial::binary_length(1000, 100, 101)
        );
        let decoded = SparseTernaryPolynomial::from_binary(&data, 1000, 100, 101).unwrap();
        assert_eq!(p, decoded);
    }

    #[test]
    fn test_from_binary_short_input() {
        assert!(SparseTernaryPolynomial::from_binary(&[0u8; 4], 1000, 100, 101).is_err());
    }

    #[test]
    fn test_clear() {
        let mut rng = StdRng::from_seed([34u8; 32]);
        let mut p = SparseTernaryPolynomial::generate_random(439, 10, 10, &mut rng);
        p.clear();
        assert!(p.ones().is_empty());
        assert!(p.neg_ones().is_empty());
    }
}
