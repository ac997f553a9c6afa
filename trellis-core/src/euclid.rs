//! Extended-Euclidean helpers.
//!
//! Both variants compute Bezout coefficients `x`, `y` with
//! `a*x + b*y = gcd(a, b)`; they are the basis for every modular inversion in
//! the polynomial engine and for the CRT combination of resultants.

use num_bigint::BigInt;
use num_traits::{One, Zero};

/// Extended-Euclidean result over machine integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntEuclidean {
    /// Bezout coefficient of `a`.
    pub x: i64,
    /// Bezout coefficient of `b`.
    pub y: i64,
    /// Greatest common divisor of `a` and `b`.
    pub gcd: i64,
}

impl IntEuclidean {
    /// Runs the extended Euclidean algorithm on `a` and `b`.
    pub fn calculate(a: i64, b: i64) -> Self {
        let (mut a, mut b) = (a, b);
        let (mut x, mut last_x) = (0i64, 1i64);
        let (mut y, mut last_y) = (1i64, 0i64);
        while b != 0 {
            let quotient = a / b;
            let r = a % b;
            a = b;
            b = r;

            let tmp = x;
            x = last_x - quotient * x;
            last_x = tmp;

            let tmp = y;
            y = last_y - quotient * y;
            last_y = tmp;
        }
        IntEuclidean {
            x: last_x,
            y: last_y,
            gcd: a,
        }
    }
}

/// Computes the inverse of `n` modulo `modulus`, normalized into
/// `[0, modulus)`. The caller must ensure `gcd(n, modulus) = 1`.
pub(crate) fn invert_mod(n: i64, modulus: i64) -> i64 {
    let n = n.rem_euclid(modulus);
    IntEuclidean::calculate(n, modulus).x.rem_euclid(modulus)
}

/// Extended-Euclidean result over arbitrary-precision integers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BigIntEuclidean {
    /// Bezout coefficient of `a`.
    pub x: BigInt,
    /// Bezout coefficient of `b`.
    pub y: BigInt,
    /// Greatest common divisor of `a` and `b`.
    pub gcd: BigInt,
}

impl BigIntEuclidean {
    /// Runs the extended Euclidean algorithm on `a` and `b`.
    pub fn calculate(a: &BigInt, b: &BigInt) -> Self {
        let (mut a, mut b) = (a.clone(), b.clone());
        let (mut x, mut last_x) = (BigInt::zero(), BigInt::one());
        let (mut y, mut last_y) = (BigInt::one(), BigInt::zero());
        while !b.is_zero() {
            let quotient = &a / &b;
            let r = &a % &b;
            a = std::mem::replace(&mut b, r);

            let tmp = x.clone();
            x = last_x - &quotient * x;
            last_x = tmp;

            let tmp = y.clone();
            y = last_y - &quotient * y;
            last_y = tmp;
        }
        BigIntEuclidean {
            x: last_x,
            y: last_y,
            gcd: a,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::FromPrimitive;

    #[test]
    fn test_int_euclidean() {
        let r = IntEuclidean::calculate(120, 23);
        assert_eq!(r.gcd, 1);
        assert_eq!(120 * r.x + 23 * r.y, 1);

        let r = IntEuclidean::calculate(126, 231);
        assert_eq!(r.gcd, 21);
        assert_eq!(126 * r.x + 231 * r.y, 21);
    }

    #[test]
    fn test_invert_mod() {
        for modulus in [2i64, 3, 11, 2048, 10007] {
            for n in 1..modulus.min(50) {
                if IntEuclidean::calculate(n, modulus).gcd != 1 {
                    continue;
                }
                let inv = invert_mod(n, modulus);
                assert_eq!((n * inv).rem_euclid(modulus), 1, "n={n} mod {modulus}");
            }
        }
    }

    #[test]
    fn test_big_int_euclidean() {
        let a = BigInt::from_i64(3 * 5 * 7 * 11).unwrap();
        let b = BigInt::from_i64(5 * 13 * 17).unwrap();
        let r = BigIntEuclidean::calculate(&a, &b);
        assert_eq!(r.gcd, BigInt::from_i64(5).unwrap());
        assert_eq!(&a * &r.x + &b * &r.y, r.gcd);
    }
}
