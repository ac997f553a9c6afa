//! Product-form ternary polynomials.

use crate::error::Result;
use crate::poly::{IntegerPolynomial, SparseTernaryPolynomial};
use rand_core::CryptoRng;
use zeroize::Zeroize;

/// A polynomial of the form `f1*f2 + f3` where `f1`, `f2`, `f3` are very
/// sparsely populated ternary polynomials.
///
/// The product `f1*f2` is itself not ternary, so the polynomial is never
/// materialized into a single ternary representation; multiplication by a
/// dense `b` is always composed as `f2*(f1*b) + f3*b`.
#[derive(Debug, Clone, PartialEq, Eq, Zeroize)]
pub struct ProductFormPolynomial {
    f1: SparseTernaryPolynomial,
    f2: SparseTernaryPolynomial,
    f3: SparseTernaryPolynomial,
}

impl ProductFormPolynomial {
    /// Creates a polynomial from its three sparse factors.
    pub fn new(
        f1: SparseTernaryPolynomial,
        f2: SparseTernaryPolynomial,
        f3: SparseTernaryPolynomial,
    ) -> Self {
        ProductFormPolynomial { f1, f2, f3 }
    }

    /// Generates three independent random sparse factors.
    pub fn generate_random(
        n: usize,
        df1: usize,
        df2: usize,
        df3_ones: usize,
        df3_neg_ones: usize,
        rng: &mut impl CryptoRng,
    ) -> Self {
        ProductFormPolynomial {
            f1: SparseTernaryPolynomial::generate_random(n, df1, df1, rng),
            f2: SparseTernaryPolynomial::generate_random(n, df2, df2, rng),
            f3: SparseTernaryPolynomial::generate_random(n, df3_ones, df3_neg_ones, rng),
        }
    }

    /// Number of coefficients.
    pub fn len(&self) -> usize {
        self.f1.len()
    }

    /// Whether the polynomial has no coefficients.
    pub fn is_empty(&self) -> bool {
        self.f1.is_empty()
    }

    /// Multiplies by a dense polynomial without reduction.
    ///
    /// Intermediate values can leave `{-1, 0, 1}`; nothing is reduced until
    /// the caller supplies a modulus.
    pub fn mult(&self, b: &IntegerPolynomial) -> IntegerPolynomial {
        let y = self.f1.mult(b);
        let mut z = self.f2.mult(&y);
        let w = self.f3.mult(b);
        z.add(&w);
        z
    }

    /// Multiplies by a dense polynomial and reduces coefficients into
    /// `[0, modulus)`.
    pub fn mult_mod(&self, b: &IntegerPolynomial, modulus: i64) -> IntegerPolynomial {
        let mut c = self.mult(b);
        c.mod_positive(modulus);
        c
    }

    /// Converts to the dense integer representation `f1*f2 + f3`.
    pub fn to_integer_polynomial(&self) -> IntegerPolynomial {
        let mut p = self.f1.mult(&self.f2.to_integer_polynomial());
        p.add(&self.f3.to_integer_polynomial());
        p
    }

    /// Encoded length in bytes for the given weights.
    pub fn binary_length(
        n: usize,
        df1: usize,
        df2: usize,
        df3_ones: usize,
        df3_neg_ones: usize,
    ) -> usize {
        SparseTernaryPolynomial::binary_length(n, df1, df1)
            + SparseTernaryPolynomial::binary_length(n, df2, df2)
            + SparseTernaryPolynomial::binary_length(n, df3_ones, df3_neg_ones)
    }

    /// Concatenates the sparse encodings of `f1`, `f2`, `f3` in that order.
    pub fn to_binary(&self) -> Vec<u8> {
        let mut data = self.f1.to_binary();
        data.extend_from_slice(&self.f2.to_binary());
        data.extend_from_slice(&self.f3.to_binary());
        data
    }

    /// Inverse of [`to_binary`](Self::to_binary); the weights are supplied
    /// by the parameter set.
    pub fn from_binary(
        data: &[u8],
        n: usize,
        df1: usize,
        df2: usize,
        df3_ones: usize,
        df3_neg_ones: usize,
    ) -> Result<Self> {
        let len1 = SparseTernaryPolynomial::binary_length(n, df1, df1);
        let len2 = SparseTernaryPolynomial::binary_length(n, df2, df2);
        let f1 = SparseTernaryPolynomial::from_binary(data, n, df1, df1)?;
        let f2 = SparseTernaryPolynomial::from_binary(&data[len1..], n, df2, df2)?;
        let f3 = SparseTernaryPolynomial::from_binary(
            &data[len1 + len2..],
            n,
            df3_ones,
            df3_neg_ones,
        )?;
        Ok(ProductFormPolynomial { f1, f2, f3 })
    }

    /// Overwrites all three factors with zeros.
    pub fn clear(&mut self) {
        self.f1.clear();
        self.f2.clear();
        self.f3.clear();
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
        let mut rng = StdRng::from_seed([41u8; 32]);
        let p = ProductFormPolynomial::generate_random(439, 9, 8, 5, 5, &mut rng);
        let b = DenseTernaryPolynomial::generate_random(439, 146, 146, &mut rng)
            .to_integer_polynomial();
        let dense_product = p.to_integer_polynomial().mult(&b);
        assert_eq!(p.mult(&b), dense_product);
    }

    #[test]
    fn test_mult_composition() {
        let mut rng = StdRng::from_seed([42u8; 32]);
        let f1 = SparseTernaryPolynomial::generate_random(101, 5, 5, &mut rng);
        let f2 = SparseTernaryPolynomial::generate_random(101, 4, 4, &mut rng);
        let f3 = SparseTernaryPolynomial::generate_random(101, 3, 3, &mut rng);
        let p = ProductFormPolynomial::new(f1.clone(), f2.clone(), f3.clone());
        let b = DenseTernaryPolynomial::generate_random(101, 30, 30, &mut rng)
            .to_integer_polynomial();

        let mut expected = f2.mult(&f1.mult(&b));
        expected.add(&f3.mult(&b));
        assert_eq!(p.mult(&b), expected);
    }

    #[test]
    fn test_binary_roundtrip() {
        let mut rng = StdRng::from_seed([43u8; 32]);
        let p = ProductFormPolynomial::generate_random(743, 11, 11, 15, 15, &mut rng);
        let data = p.to_binary();
        assert_eq!(
            data.len(),
            ProductFormPolynomial::binary_length(743, 11, 11, 15, 15)
        );
        let decoded = ProductFormPolynomial::from_binary(&data, 743, 11, 11, 15, 15).unwrap();
        assert_eq!(p, decoded);
    }
}
