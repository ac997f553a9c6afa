//! Dense ternary polynomials.

use crate::poly::IntegerPolynomial;
use rand::seq::SliceRandom;
use rand_core::CryptoRng;
use zeroize::Zeroize;

/// An [`IntegerPolynomial`] whose coefficients are restricted to
/// `{-1, 0, 1}`.
#[derive(Debug, Clone, PartialEq, Eq, Zeroize)]
pub struct DenseTernaryPolynomial {
    poly: IntegerPolynomial,
}

impl DenseTernaryPolynomial {
    /// Wraps an integer polynomial.
    ///
    /// Debug builds verify that every coefficient is ternary.
    pub fn new(poly: IntegerPolynomial) -> Self {
        debug_assert!(poly.coeffs.iter().all(|c| (-1..=1).contains(c)));
        DenseTernaryPolynomial { poly }
    }

    /// Creates a polynomial from a ternary coefficient vector.
    pub fn from_coeffs(coeffs: Vec<i64>) -> Self {
        Self::new(IntegerPolynomial::from_coeffs(coeffs))
    }

    /// Generates a uniformly random ternary polynomial with `num_ones`
    /// coefficients equal to 1 and `num_neg_ones` equal to -1.
    ///
    /// A vector of the required coefficient counts is shuffled with a
    /// Fisher-Yates pass over the supplied RNG.
    pub fn generate_random(
        n: usize,
        num_ones: usize,
        num_neg_ones: usize,
        rng: &mut impl CryptoRng,
    ) -> Self {
        debug_assert!(num_ones + num_neg_ones <= n);
        let mut coeffs = vec![0i64; n];
        for c in coeffs.iter_mut().take(num_ones) {
            *c = 1;
        }
        for c in coeffs.iter_mut().skip(num_ones).take(num_neg_ones) {
            *c = -1;
        }
        coeffs.shuffle(rng);
        DenseTernaryPolynomial {
            poly: IntegerPolynomial::from_coeffs(coeffs),
        }
    }

    /// Number of coefficients.
    pub fn len(&self) -> usize {
        self.poly.len()
    }

    /// Whether the polynomial has no coefficients.
    pub fn is_empty(&self) -> bool {
        self.poly.is_empty()
    }

    /// The coefficient slice.
    pub fn coeffs(&self) -> &[i64] {
        &self.poly.coeffs
    }

    /// Multiplies by `b` and reduces coefficients into `[0, modulus)`.
    pub fn mult(&self, b: &IntegerPolynomial, modulus: i64) -> IntegerPolynomial {
        self.poly.mult_mod(b, modulus)
    }

    /// Converts to the dense integer representation.
    pub fn to_integer_polynomial(&self) -> IntegerPolynomial {
        self.poly.clone()
    }

    /// Overwrites all coefficients with zeros.
    pub fn clear(&mut self) {
        self.poly.coeffs.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_random_counts() {
        let mut rng = StdRng::from_seed([21u8; 32]);
        let p = DenseTernaryPolynomial::generate_random(439, 146, 145, &mut rng);
        let poly = p.to_integer_polynomial();
        assert_eq!(poly.count(1), 146);
        assert_eq!(poly.count(-1), 145);
        assert_eq!(poly.count(0), 439 - 146 - 145);
    }

    #[test]
    fn test_generate_random_varies() {
        let mut rng = StdRng::from_seed([22u8; 32]);
        let a = DenseTernaryPolynomial::generate_random(439, 146, 145, &mut rng);
        let b = DenseTernaryPolynomial::generate_random(439, 146, 145, &mut rng);
        assert_ne!(a, b);
    }

    #[test]
    fn test_clear() {
        let mut rng = StdRng::from_seed([23u8; 32]);
        let mut p = DenseTernaryPolynomial::generate_random(101, 30, 30, &mut rng);
        p.clear();
        assert!(p.coeffs().iter().all(|&c| c == 0));
    }
}
