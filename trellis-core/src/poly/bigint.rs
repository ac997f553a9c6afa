//! Polynomials with arbitrary-precision integer coefficients.
//!
//! Used by the resultant pipeline, where coefficients outgrow `i64` after a
//! handful of CRT combinations. Multiplication switches to Karatsuba, whose
//! three-way recursion keeps the cost of huge-coefficient products down.

use crate::poly::{BigDecimalPolynomial, IntegerPolynomial};
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};

/// A polynomial in `Z[X]` with [`BigInt`] coefficients.
///
/// Lengths may grow during additions; the multiplication entry points fold
/// the result back modulo `X^N - 1` where `N` is the operand length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BigIntPolynomial {
    /// The coefficient vector.
    pub coeffs: Vec<BigInt>,
}

impl BigIntPolynomial {
    /// Creates a zero polynomial with `n` coefficients.
    pub fn new(n: usize) -> Self {
        BigIntPolynomial {
            coeffs: vec![BigInt::zero(); n],
        }
    }

    /// Creates a polynomial from a coefficient vector.
    pub fn from_coeffs(coeffs: Vec<BigInt>) -> Self {
        BigIntPolynomial { coeffs }
    }

    /// Number of coefficients.
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    /// Whether the polynomial has no coefficients.
    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Schoolbook multiplication, folded modulo `X^N - 1`.
    pub fn mult_small(&self, b: &BigIntPolynomial) -> BigIntPolynomial {
        let n = self.coeffs.len();
        debug_assert_eq!(n, b.coeffs.len());
        let mut c = BigIntPolynomial::new(n);
        for i in 0..n {
            if self.coeffs[i].is_zero() {
                continue;
            }
            for j in 0..n {
                let mut k = i + j;
                if k >= n {
                    k -= n;
                }
                c.coeffs[k] += &self.coeffs[i] * &b.coeffs[j];
            }
        }
        c
    }

    /// Karatsuba multiplication, folded modulo `X^N - 1`.
    pub fn mult_big(&self, b: &BigIntPolynomial) -> BigIntPolynomial {
        let n = self.coeffs.len();
        debug_assert_eq!(n, b.coeffs.len());
        let mut c = mult_recursive(&self.coeffs, &b.coeffs);
        // fold the upper half back into the ring
        for k in n..c.len() {
            let high = std::mem::take(&mut c[k]);
            c[k - n] += high;
        }
        c.truncate(n);
        BigIntPolynomial::from_coeffs(c)
    }

    /// Adds `b` in place, growing to `b`'s length if needed.
    pub fn add(&mut self, b: &BigIntPolynomial) {
        if b.coeffs.len() > self.coeffs.len() {
            self.coeffs.resize(b.coeffs.len(), BigInt::zero());
        }
        for (c, v) in self.coeffs.iter_mut().zip(&b.coeffs) {
            *c += v;
        }
    }

    /// Subtracts `b` in place, growing to `b`'s length if needed.
    pub fn sub(&mut self, b: &BigIntPolynomial) {
        if b.coeffs.len() > self.coeffs.len() {
            self.coeffs.resize(b.coeffs.len(), BigInt::zero());
        }
        for (c, v) in self.coeffs.iter_mut().zip(&b.coeffs) {
            *c -= v;
        }
    }

    /// Multiplies all coefficients by a scalar.
    pub fn mult_scalar(&mut self, factor: &BigInt) {
        for c in &mut self.coeffs {
            *c *= factor;
        }
    }

    /// Reduces all coefficients into `[0, modulus)`.
    pub fn mod_positive(&mut self, modulus: &BigInt) {
        for c in &mut self.coeffs {
            *c = ((&*c % modulus) + modulus) % modulus;
        }
    }

    /// Bit length of the largest coefficient magnitude.
    pub fn max_coeff_bits(&self) -> u64 {
        self.coeffs.iter().map(|c| c.bits()).max().unwrap_or(0)
    }

    /// Divides all coefficients by `divisor`, keeping `decimal_places`
    /// fractional digits, rounding half-to-even.
    pub fn div_round(&self, divisor: &BigInt, decimal_places: u64) -> BigDecimalPolynomial {
        let scale = num_traits::pow(BigInt::from(10), decimal_places as usize);
        let coeffs = self
            .coeffs
            .iter()
            .map(|c| BigDecimal::new(div_round_half_even(&(c * &scale), divisor), decimal_places as i64))
            .collect();
        BigDecimalPolynomial::from_coeffs(coeffs)
    }

    /// Converts back to an `i64`-coefficient polynomial, or `None` if any
    /// coefficient is out of range.
    pub fn to_integer_polynomial(&self) -> Option<IntegerPolynomial> {
        let coeffs: Option<Vec<i64>> = self.coeffs.iter().map(|c| c.to_i64()).collect();
        Some(IntegerPolynomial::from_coeffs(coeffs?))
    }
}

impl From<&IntegerPolynomial> for BigIntPolynomial {
    fn from(poly: &IntegerPolynomial) -> Self {
        BigIntPolynomial {
            coeffs: poly.coeffs.iter().map(|&c| BigInt::from(c)).collect(),
        }
    }
}

/// Karatsuba product of two equal-length slices, length `2n - 1`, degrees
/// not folded.
fn mult_recursive(a: &[BigInt], b: &[BigInt]) -> Vec<BigInt> {
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

    // (a1 + a2) and (b1 + b2), padded to the longer half
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

    let mut c = vec![BigInt::zero(); 2 * n - 1];
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

/// `round(num / den)` with ties to even; `den` must be nonzero.
pub(crate) fn div_round_half_even(num: &BigInt, den: &BigInt) -> BigInt {
    let negative = num.is_negative() != den.is_negative();
    let num_abs = num.abs();
    let den_abs = den.abs();
    let mut q = &num_abs / &den_abs;
    let r = &num_abs % &den_abs;
    let twice_r = &r * 2;
    let q_is_odd = (&q % BigInt::from(2)) == BigInt::from(1);
    if twice_r > den_abs || (twice_r == den_abs && q_is_odd) {
        q += 1;
    }
    if negative {
        -q
    } else {
        q
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn from_i64(coeffs: &[i64]) -> BigIntPolynomial {
        BigIntPolynomial::from_coeffs(coeffs.iter().map(|&c| BigInt::from(c)).collect())
    }

    #[test]
    fn test_mult_known_product() {
        let a = from_i64(&[4, -1, 9, 2, 1, -5, 12, -7, 0, -9, 5]);
        let b = from_i64(&[-6, 0, 0, 13, 3, -2, -4, 10, 11, 2, -1]);
        let expected = from_i64(&[2, -189, 77, 124, -29, 0, -75, 124, -49, 267, 34]);
        assert_eq!(a.mult_small(&b), expected);
        assert_eq!(a.mult_big(&b), expected);
    }

    #[test]
    fn test_karatsuba_matches_schoolbook() {
        let mut rng = StdRng::from_seed([51u8; 32]);
        for _ in 0..5 {
            let n = rng.random_range(1..=100);
            let a = from_i64(&(0..n).map(|_| rng.random_range(-500..500)).collect::<Vec<_>>());
            let b = from_i64(&(0..n).map(|_| rng.random_range(-500..500)).collect::<Vec<_>>());
            assert_eq!(a.mult_small(&b), a.mult_big(&b), "n={n}");
        }
    }

    #[test]
    fn test_div_round_half_even() {
        let cases = [
            (7, 2, 4),
            (5, 2, 2),
            (-7, 2, -4),
            (-5, 2, -2),
            (9, 3, 3),
            (10, 4, 2),  // 2.5 rounds to even 2
            (14, 4, 4),  // 3.5 rounds to even 4
            (-10, 4, -2),
        ];
        for (num, den, expected) in cases {
            assert_eq!(
                div_round_half_even(&BigInt::from(num), &BigInt::from(den)),
                BigInt::from(expected),
                "{num}/{den}"
            );
        }
    }

    #[test]
    fn test_div_round_polynomial() {
        let p = from_i64(&[10, -7, 3]);
        let dec = p.div_round(&BigInt::from(4), 2);
        let rounded = dec.round();
        assert_eq!(rounded, from_i64(&[2, -2, 1]));
    }

    #[test]
    fn test_max_coeff_bits() {
        let p = from_i64(&[3, -8, 0]);
        assert_eq!(p.max_coeff_bits(), 4);
    }
}
