//! NTRUSign basis construction.
//!
//! A basis is built from two random short polynomials `f`, `g`: their
//! resultants with `X^N - 1` yield cofactors that solve
//! `f*G - g*F = q` over the ring, and the oversized initial `(F, G)` pair
//! is shrunk by subtracting its projection onto the module generated by
//! `(f, g)` — the high-precision inverse-resultant step — followed by a
//! size-reduction sweep against the rotations of `(f, g)`.

use crate::basis::{
    Basis, BasisPolynomial, SignatureKeyPair, SignaturePrivateKey, SignaturePublicKey,
};
use crate::params::{BasisType, SignatureParams};
use num_bigint::BigInt;
use num_traits::{One, Zero};
use rand_core::CryptoRng;
use trellis_core::poly::{
    BigIntPolynomial, DenseTernaryPolynomial, IntegerPolynomial, SparseTernaryPolynomial,
    TernaryPolynomial,
};
use trellis_core::{BigIntEuclidean, Error, Result};
use zeroize::Zeroize;

/// Cap on the candidate-resampling loop.
const MAX_ATTEMPTS: usize = 100;

/// Fractional digits kept in the inverse-resultant division. The identity
/// `f*G - g*F = q` holds for any integer quotient; precision only affects
/// how short the reduced basis comes out.
const DECIMAL_PLACES: u64 = 10;

/// Generates an NTRUSign key pair: `b + 1` bases, the zeroth of which
/// provides the public polynomial.
pub fn generate_key_pair(
    params: &SignatureParams,
    rng: &mut impl CryptoRng,
) -> Result<SignatureKeyPair> {
    let mut bases = Vec::with_capacity(params.b + 1);
    for _ in 0..=params.b {
        bases.push(create_basis(params, rng)?.basis);
    }
    let h = match &bases[0].h {
        Some(h) => h.clone(),
        None => return Err(Error::KeygenFailure),
    };
    Ok(SignatureKeyPair {
        private: SignaturePrivateKey { bases },
        public: SignaturePublicKey { h },
    })
}

/// A freshly constructed basis together with the long vectors `(F, G)`,
/// which satisfy `f*G - g*F = q`.
pub(crate) struct BasisMaterial {
    pub(crate) basis: Basis,
    pub(crate) f: IntegerPolynomial,
    pub(crate) g: IntegerPolynomial,
    pub(crate) big_f: IntegerPolynomial,
    pub(crate) big_g: IntegerPolynomial,
}

pub(crate) fn create_basis(
    params: &SignatureParams,
    rng: &mut impl CryptoRng,
) -> Result<BasisMaterial> {
    let n = params.n;
    let q = params.q;
    let d = params.d;
    let q_big = BigInt::from(q);

    for _ in 0..MAX_ATTEMPTS {
        let f = DenseTernaryPolynomial::generate_random(n, d + 1, d, rng);
        let f_int = f.to_integer_polynomial();
        let Some(mut fq) = f_int.invert_fq(q) else {
            continue;
        };
        let g = DenseTernaryPolynomial::generate_random(n, d + 1, d, rng);
        let g_int = g.to_integer_polynomial();

        let rf = f_int.resultant();
        if rf.res.is_zero() {
            continue;
        }
        let rg = g_int.resultant();
        if rg.res.is_zero() {
            continue;
        }
        let er = BigIntEuclidean::calculate(&rf.res, &rg.res);
        let (x, y) = if er.gcd.is_one() {
            (er.x, er.y)
        } else if er.gcd == BigInt::from(-1) {
            (-er.x, -er.y)
        } else {
            continue;
        };

        // x*rf.res + y*rg.res = 1, so with G0 = x*q*rho_f and
        // F0 = -y*q*rho_g the identity f*G0 - g*F0 = q holds
        let mut big_g = rf.rho.clone();
        big_g.mult_scalar(&(&x * &q_big));
        let mut big_f = rg.rho.clone();
        big_f.mult_scalar(&(-&y * &q_big));

        // C = round((F*f~ + G*g~) * rho_t / res_t), the projection of
        // (F, G) onto the module generated by (f, g); f~ is the index
        // reversal, t = f*f~ + g*g~
        let f_rev = reverse(&f_int);
        let g_rev = reverse(&g_int);
        let mut t = f_int.mult(&f_rev);
        t.add(&g_int.mult(&g_rev));
        let rt = t.resultant();
        if rt.res.is_zero() {
            continue;
        }

        let mut c = BigIntPolynomial::from(&f_rev).mult_big(&big_f);
        c.add(&BigIntPolynomial::from(&g_rev).mult_big(&big_g));
        let c = c.mult_big(&rt.rho);
        let c_round = c.div_round(&rt.res, DECIMAL_PLACES).round();

        big_f.sub(&c_round.mult_big(&BigIntPolynomial::from(&f_int)));
        big_g.sub(&c_round.mult_big(&BigIntPolynomial::from(&g_int)));

        let Some(mut big_f_int) = big_f.to_integer_polynomial() else {
            continue;
        };
        let Some(mut big_g_int) = big_g.to_integer_polynomial() else {
            continue;
        };
        reduce_fg(&f_int, &g_int, &mut big_f_int, &mut big_g_int);

        let h = g.mult(&fq, q);
        fq.zeroize();

        let f_stored = if params.sparse {
            TernaryPolynomial::Sparse(SparseTernaryPolynomial::from_integer_polynomial(&f_int))
        } else {
            TernaryPolynomial::Dense(f)
        };
        let f_prime = match params.basis_type {
            BasisType::Standard => BasisPolynomial::Modq(big_f_int.clone()),
            BasisType::Transpose => {
                let g_stored = if params.sparse {
                    TernaryPolynomial::Sparse(SparseTernaryPolynomial::from_integer_polynomial(
                        &g_int,
                    ))
                } else {
                    TernaryPolynomial::Dense(g)
                };
                BasisPolynomial::Ternary(g_stored)
            }
        };

        return Ok(BasisMaterial {
            basis: Basis {
                f: f_stored,
                f_prime,
                h: Some(h),
            },
            f: f_int,
            g: g_int,
            big_f: big_f_int,
            big_g: big_g_int,
        });
    }
    Err(Error::KeygenFailure)
}

/// Index reversal: the adjoint of a polynomial under the cyclic
/// convolution inner product.
fn reverse(p: &IntegerPolynomial) -> IntegerPolynomial {
    let n = p.len();
    let mut r = IntegerPolynomial::new(n);
    r.coeffs[0] = p.coeffs[0];
    for i in 1..n {
        r.coeffs[i] = p.coeffs[n - i];
    }
    r
}

/// Size-reduces `(F, G)` against the rotations of `(f, g)`: whenever the
/// projection onto a rotation exceeds half its norm, that rotation is
/// subtracted. Each adjustment preserves `f*G - g*F`.
fn reduce_fg(
    f: &IntegerPolynomial,
    g: &IntegerPolynomial,
    big_f: &mut IntegerPolynomial,
    big_g: &mut IntegerPolynomial,
) {
    let n = f.len();
    let norm = f.square_sum() + g.square_sum();
    let mut u = f.clone();
    let mut v = g.clone();
    let mut adjustments = 0;
    let mut j = 0;
    while adjustments < n && j < n {
        let d = dot(big_f, &u) + dot(big_g, &v);
        if 2 * d > norm {
            big_f.sub(&u);
            big_g.sub(&v);
            adjustments += 1;
            j = 0;
        } else if 2 * d < -norm {
            big_f.add(&u);
            big_g.add(&v);
            adjustments += 1;
            j = 0;
        } else {
            j += 1;
            u.rotate1();
            v.rotate1();
        }
    }
}

fn dot(a: &IntegerPolynomial, b: &IntegerPolynomial) -> i64 {
    a.coeffs.iter().zip(&b.coeffs).map(|(&x, &y)| x * y).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// `f*G - g*F` folded into the ring must be the constant `q`.
    fn assert_lattice_identity(m: &BasisMaterial, q: i64) {
        let f = BigIntPolynomial::from(&m.f);
        let g = BigIntPolynomial::from(&m.g);
        let big_f = BigIntPolynomial::from(&m.big_f);
        let big_g = BigIntPolynomial::from(&m.big_g);

        let mut lhs = f.mult_small(&big_g);
        lhs.sub(&g.mult_small(&big_f));
        assert_eq!(lhs.coeffs[0], BigInt::from(q));
        for c in &lhs.coeffs[1..] {
            assert!(c.is_zero(), "nonconstant remainder: {c}");
        }
    }

    #[test]
    fn test_lattice_identity_t157() {
        let params = SignatureParams::T157;
        let mut rng = StdRng::from_seed([111u8; 32]);
        let material = create_basis(&params, &mut rng).unwrap();
        assert_lattice_identity(&material, params.q);
    }

    #[test]
    fn test_reduced_vectors_fit_modulus() {
        // after reduction the long vectors must be nowhere near the
        // resultant-sized trivial solution
        let params = SignatureParams::T157;
        let mut rng = StdRng::from_seed([112u8; 32]);
        let material = create_basis(&params, &mut rng).unwrap();
        let bound = 16 * params.q; // loose sanity bound
        for &c in material.big_f.coeffs.iter().chain(&material.big_g.coeffs) {
            assert!(c.abs() <= bound, "coefficient {c} unexpectedly large");
        }
    }

    #[test]
    fn test_public_key_matches_basis() {
        // h*f = g (mod q)
        let params = SignatureParams::T157;
        let mut rng = StdRng::from_seed([113u8; 32]);
        let material = create_basis(&params, &mut rng).unwrap();
        let h = material.basis.h.as_ref().unwrap();

        let mut lhs = h.mult_mod(&material.f, params.q);
        let mut rhs = material.g.clone();
        rhs.mod_positive(params.q);
        lhs.mod_positive(params.q);
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn test_keygen_roundtrip_encoding() {
        let params = SignatureParams::T157;
        let mut rng = StdRng::from_seed([114u8; 32]);
        let kp = generate_key_pair(&params, &mut rng).unwrap();
        assert_eq!(kp.private.bases.len(), params.b + 1);

        let encoded = kp.private.to_bytes(&params).unwrap();
        let decoded = SignaturePrivateKey::from_bytes(&encoded, &params).unwrap();
        assert_eq!(decoded, kp.private);

        let pub_encoded = kp.public.to_bytes(&params);
        let pub_decoded = SignaturePublicKey::from_bytes(&pub_encoded, &params).unwrap();
        assert_eq!(pub_decoded, kp.public);
    }
}
