//! Polynomials with arbitrary-precision decimal coefficients.
//!
//! The inverse-resultant step of lattice basis construction divides a
//! big-integer polynomial by the resultant and needs the quotient to more
//! fractional digits than any fixed-width float provides.

use crate::poly::BigIntPolynomial;
use bigdecimal::{BigDecimal, RoundingMode};
use num_traits::Zero;

/// A polynomial with [`BigDecimal`] coefficients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BigDecimalPolynomial {
    /// The coefficient vector.
    pub coeffs: Vec<BigDecimal>,
}

impl BigDecimalPolynomial {
    /// Creates a zero polynomial with `n` coefficients.
    pub fn new(n: usize) -> Self {
        BigDecimalPolynomial {
            coeffs: vec![BigDecimal::zero(); n],
        }
    }

    /// Creates a polynomial from a coefficient vector.
    pub fn from_coeffs(coeffs: Vec<BigDecimal>) -> Self {
        BigDecimalPolynomial { coeffs }
    }

    /// Number of coefficients.
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    /// Whether the polynomial has no coefficients.
    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Divides all coefficients by 2.
    pub fn halve(&mut self) {
        let one_half = BigDecimal::new(5.into(), 1);
        for c in &mut self.coeffs {
            *c = &*c * &one_half;
        }
    }

    /// Karatsuba multiplication, folded modulo `X^N - 1`.
    pub fn mult(&self, b: &BigDecimalPolynomial) -> BigDecimalPolynomial {
        let n = self.coeffs.len();
        debug_assert_eq!(n, b.coeffs.len());
        let mut c = mult_recursive(&self.coeffs, &b.coeffs);
        for k in n..c.len() {
            let high = std::mem::take(&mut c[k]);
            c[k - n] += high;
        }
        c.truncate(n);
        BigDecimalPolynomial::from_coeffs(c)
    }

    /// Adds `b` in place, growing to `b`'s length if needed.
    pub fn add(&mut self, b: &BigDecimalPolynomial) {
        if b.coeffs.len() > self.coeffs.len() {
            self.coeffs.resize(b.coeffs.len(), BigDecimal::zero());
        }
        for (c, v) in self.coeffs.iter_mut().zip(&b.coeffs) {
            *c += v;
        }
    }

    /// Subtracts `b` in place, growing to `b`'s length if needed.
    pub fn sub(&mut self, b: &BigDecimalPolynomial) {
        if b.coeffs.len() > self.coeffs.len() {
            self.coeffs.resize(b.coeffs.len(), BigDecimal::zero());
        }
        for (c, v) in self.coeffs.iter_mut().zip(&b.coeffs) {
            *c -= v;
        }
    }

    /// Rounds all coefficients to the nearest integer, ties to even.
    pub fn round(&self) -> BigIntPolynomial {
        let coeffs = self
            .coeffs
            .iter()
            .map(|c| {
                c.with_scale_round(0, RoundingMode::HalfEven)
                    .into_bigint_and_exponent()
                    .0
            })
            .collect();
        BigIntPolynomial::from_coeffs(coeffs)
    }
}

impl From<&BigIntPolynomial> for BigDecimalPolynomial {
    fn from(poly: &BigIntPolynomial) -> Self {
        BigDecimalPolynomial {
            coeffs: poly
                .coeffs
                .iter()
                .map(|c| BigDecimal::from(c.clone()))
                .collect(),
        }
    }
}

/// Karatsuba product of two equal-length slices, length `2n - 1`.
fn mult_recursive(a: &[BigDecimal], b: &[BigDecimal]) -> Vec<BigDecimal> {
    debug_assert_eq!(a.len(), b.len());
    let n = a.len();
    if n <= 1 {
        return if n == 0 {
            Vec::new()
        } else {
            vec![&a[0] * &b[0]]
        };
    }

    let n1 = n / 2;
    let (a1, a2) = a.split_at(n1);
    let (b1, b2) = b.split_at(n1);

    let mut a_sum = a2.to_vec();
    for (s, v) in a_sum.iter_mut().zip(a1) {
        *s += v;
    }
    let mut b_sum = b2.to_vec();
    for (s, v) in b_sum.iter_mut().zip(b1) {
        *s += v;
    }

    let c1 = mult_recursive(a1, b1);
    let c2 = mult_recursive(a2, b2);
    let mut c3 = mult_recursive(&a_sum, &b_sum);
    for (v, low) in c3.iter_mut().zip(&c1) {
        *v -= low;
    }
    for (v, high) in c3.iter_mut().zip(&c2) {
        *v -= high;
    }

    let mut c = vec![BigDecimal::zero(); 2 * n - 1];
    for (i, v) in c1.into_iter().enumerate() {
        c[i] += v;
    }
    for (i, v) in c3.into_iter().enumerate() {
        c[n1 + i] += v;
    }
    for (i, v) in c2.into_iter().enumerate() {
        c[2 * n1 + i] += v;
    }
    c
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    fn from_i64(coeffs: &[i64]) -> BigIntPolynomial {
        BigIntPolynomial::from_coeffs(coeffs.iter().map(|&c| BigInt::from(c)).collect())
    }

    #[test]
    fn test_mult_matches_bigint() {
        let a = from_i64(&[4, -1, 9, 2, 1, -5, 12, -7, 0, -9, 5]);
        let b = from_i64(&[-6, 0, 0, 13, 3, -2, -4, 10, 11, 2, -1]);
        let expected = a.mult_small(&b);

        let prod = BigDecimalPolynomial::from(&a).mult(&BigDecimalPolynomial::from(&b));
        assert_eq!(prod.round(), expected);
    }

    #[test]
    fn test_halve_and_round() {
        let mut p = BigDecimalPolynomial::from(&from_i64(&[3, -5, 4, 1]));
        p.halve();
        // 1.5 -> 2, -2.5 -> -2, 2 -> 2, 0.5 -> 0 with ties to even
        assert_eq!(p.round(), from_i64(&[2, -2, 2, 0]));
    }

    #[test]
    fn test_add_growing() {
        let mut a = BigDecimalPolynomial::from(&from_i64(&[1, 2]));
        let b = BigDecimalPolynomial::from(&from_i64(&[10, 20, 30]));
        a.add(&b);
        assert_eq!(a.round(), from_i64(&[11, 22, 30]));
    }
}
