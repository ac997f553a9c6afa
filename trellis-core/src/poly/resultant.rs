//! Resultants of a polynomial with `X^N - 1`.
//!
//! The resultant and its cofactor rho (with `f * rho = res` in
//! `Z[X]/(X^N - 1)`) are computed one odd prime at a time with the Euclidean
//! algorithm in `GF(p)[X]`, then combined by CRT until the running modulus
//! clears a Hadamard-type bound on the true resultant, and finally
//! center-lifted to `Z`.

use crate::euclid::{invert_mod, BigIntEuclidean};
use crate::poly::{BigIntPolynomial, IntegerPolynomial};
use num_bigint::BigInt;
use num_traits::{One, Zero};

/// A resultant over `Z`: `res = Res(f, X^N - 1)` together with rho such
/// that `f * rho = res (mod X^N - 1)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resultant {
    /// Cofactor polynomial.
    pub rho: BigIntPolynomial,
    /// Resultant value.
    pub res: BigInt,
}

/// A resultant modulo `modulus`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subresultant {
    /// Cofactor polynomial modulo `modulus`.
    pub rho: BigIntPolynomial,
    /// Resultant value modulo `modulus`.
    pub res: BigInt,
    /// The modulus this pair is valid under.
    pub modulus: BigInt,
}

impl Subresultant {
    /// Combines two subresultants into one modulo the product of their
    /// (coprime) moduli.
    pub fn combine(a: &Subresultant, b: &Subresultant) -> Subresultant {
        let prod = &a.modulus * &b.modulus;
        let er = BigIntEuclidean::calculate(&b.modulus, &a.modulus);
        // er.x * b.modulus = 1 mod a.modulus and 0 mod b.modulus; er.y * a.modulus the reverse
        let c_a = &er.x * &b.modulus;
        let c_b = &er.y * &a.modulus;

        let res = (&a.res * &c_a + &b.res * &c_b) % &prod;
        let res = (res + &prod) % &prod;

        let mut rho = a.rho.clone();
        rho.mult_scalar(&c_a);
        let mut rho_b = b.rho.clone();
        rho_b.mult_scalar(&c_b);
        rho.add(&rho_b);
        rho.mod_positive(&prod);

        Subresultant {
            rho,
            res,
            modulus: prod,
        }
    }
}

impl IntegerPolynomial {
    /// Computes the resultant of this polynomial with `X^N - 1` over `Z`,
    /// with the cofactor satisfying `f * rho = res (mod X^N - 1)`.
    ///
    /// Primes start above 10 000 (larger than any supported ring degree, so
    /// they never divide `N` and `X^N - 1` stays squarefree) and are taken
    /// in increasing order. A prime that happens to divide the resultant
    /// carries no cofactor information and is skipped; after
    /// `ZERO_RES_LIMIT` consecutive such primes the resultant itself is
    /// zero and `(0, 0)` is returned.
    pub fn resultant(&self) -> Resultant {
        const ZERO_RES_LIMIT: usize = 10;

        let n = self.coeffs.len();
        // Hadamard-type bound: |res| <= (sum of squares)^((N+1)/2) * 2^((deg+1)/2)
        let mut bound = num_traits::pow(BigInt::from(self.square_sum()), (n + 1) / 2);
        bound *= num_traits::pow(BigInt::from(2), (self.degree() + 1) / 2);
        let target = &bound * 2;

        let mut prime = 10_000i64;
        let mut zero_streak = 0usize;
        let mut acc: Option<Subresultant> = None;
        let mut p_prod = BigInt::one();
        while p_prod < target {
            prime = next_prime(prime);
            let sub = self.resultant_mod(prime);
            if sub.res.is_zero() {
                zero_streak += 1;
                if zero_streak >= ZERO_RES_LIMIT {
                    return Resultant {
                        rho: BigIntPolynomial::new(n),
                        res: BigInt::zero(),
                    };
                }
                continue;
            }
            zero_streak = 0;
            p_prod *= &sub.modulus;
            acc = Some(match acc {
                None => sub,
                Some(prev) => Subresultant::combine(&prev, &sub),
            });
        }

        // center-lift into (-p_prod/2, p_prod/2]
        let Some(mut acc) = acc else {
            // target < first prime, only possible for trivially small inputs
            return Resultant {
                rho: BigIntPolynomial::new(n),
                res: BigInt::zero(),
            };
        };
        let half = &p_prod / 2;
        if acc.res > half {
            acc.res -= &p_prod;
        }
        for c in &mut acc.rho.coeffs {
            if *c > half {
                *c -= &p_prod;
            }
        }
        Resultant {
            rho: acc.rho,
            res: acc.res,
        }
    }

    /// Computes the resultant of this polynomial with `X^N - 1` modulo an
    /// odd prime, with the cofactor satisfying `f * rho = res` in
    /// `GF(p)[X]/(X^N - 1)`.
    ///
    /// Runs the Euclidean algorithm on `(X^N - 1, f)` with working arrays
    /// one entry longer than the ring degree, eliminating the leading
    /// coefficient of the larger-degree side each step. `v2` tracks the
    /// cofactor of `f`; the accumulated leading-coefficient powers and the
    /// odd-degree swap signs reconstruct the true resultant residue.
    pub fn resultant_mod(&self, modulus: i64) -> Subresultant {
        let n = self.coeffs.len();
        let len = n + 1;

        // a = X^N - 1, b = f
        let mut a = vec![0i64; len];
        a[0] = (-1i64).rem_euclid(modulus);
        a[len - 1] = 1;
        let mut b = vec![0i64; len];
        for (w, &c) in b.iter_mut().zip(&self.coeffs) {
            *w = c.rem_euclid(modulus);
        }
        let mut v1 = vec![0i64; len];
        let mut v2 = vec![0i64; len];
        v2[0] = 1;

        let mut da = degree(&a);
        let mut db = degree(&b);
        let mut ta = da;
        let mut r = 1i64;
        while db > 0 {
            let c = mul_mod(invert_mod(b[db], modulus), a[da], modulus);
            mult_shift_sub(&mut a, &b, c, da - db, modulus);
            mult_shift_sub(&mut v1, &v2, c, da - db, modulus);
            da = degree(&a);
            if da < db {
                r = mul_mod(r, pow_mod(b[db], (ta - da) as u64, modulus), modulus);
                if ta % 2 == 1 && db % 2 == 1 {
                    r = (modulus - r) % modulus;
                }
                std::mem::swap(&mut a, &mut b);
                std::mem::swap(&mut v1, &mut v2);
                ta = db;
                std::mem::swap(&mut da, &mut db);
            }
        }
        r = mul_mod(r, pow_mod(b[0], da as u64, modulus), modulus);

        // rho = v2 * r / b[0], truncated back to N coefficients
        let scale = mul_mod(invert_mod(b[0], modulus), r, modulus);
        let rho_coeffs: Vec<BigInt> = v2[..n]
            .iter()
            .map(|&c| BigInt::from(mul_mod(c, scale, modulus)))
            .collect();

        Subresultant {
            rho: BigIntPolynomial::from_coeffs(rho_coeffs),
            res: BigInt::from(r),
            modulus: BigInt::from(modulus),
        }
    }
}

/// Degree of a working array: index of the highest nonzero entry.
fn degree(p: &[i64]) -> usize {
    let mut d = p.len() - 1;
    while d > 0 && p[d] == 0 {
        d -= 1;
    }
    d
}

/// `target -= c * src * X^shift`, coefficient-wise modulo `modulus`.
fn mult_shift_sub(target: &mut [i64], src: &[i64], c: i64, shift: usize, modulus: i64) {
    for i in shift..target.len() {
        target[i] = (target[i] - mul_mod(c, src[i - shift], modulus)).rem_euclid(modulus);
    }
}

/// `a * b mod modulus` without intermediate overflow.
#[inline]
fn mul_mod(a: i64, b: i64, modulus: i64) -> i64 {
    ((a as i128 * b as i128) % modulus as i128) as i64
}

/// `base^exp mod modulus` by square-and-multiply.
fn pow_mod(base: i64, exp: u64, modulus: i64) -> i64 {
    let mut result = 1i64;
    let mut base = base.rem_euclid(modulus);
    let mut exp = exp;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_mod(result, base, modulus);
        }
        base = mul_mod(base, base, modulus);
        exp >>= 1;
    }
    result
}

/// Smallest prime strictly greater than `after`.
fn next_prime(after: i64) -> i64 {
    let mut candidate = after + 1;
    if candidate <= 2 {
        return 2;
    }
    if candidate % 2 == 0 {
        candidate += 1;
    }
    while !is_prime(candidate) {
        candidate += 2;
    }
    candidate
}

/// Deterministic Miller-Rabin, exact for all 64-bit inputs with this base
/// set.
fn is_prime(n: i64) -> bool {
    const BASES: [i64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];
    if n < 2 {
        return false;
    }
    for &p in &BASES {
        if n == p {
            return true;
        }
        if n % p == 0 {
            return false;
        }
    }
    let mut d = n - 1;
    let mut s = 0;
    while d % 2 == 0 {
        d /= 2;
        s += 1;
    }
    'bases: for &base in &BASES {
        let mut x = pow_mod(base, d as u64, n);
        if x == 1 || x == n - 1 {
            continue;
        }
        for _ in 0..s - 1 {
            x = mul_mod(x, x, n);
            if x == n - 1 {
                continue 'bases;
            }
        }
        return false;
    }
    true
}
