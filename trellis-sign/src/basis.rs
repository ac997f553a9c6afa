//! NTRUSign basis and key types with their bit-exact encodings.

use crate::params::{BasisType, SignatureParams};
use trellis_core::poly::{
    DenseTernaryPolynomial, IntegerPolynomial, SparseTernaryPolynomial, TernaryPolynomial,
};
use trellis_core::{Error, Result};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// The second basis vector `f'`, whose representation depends on the basis
/// type.
#[derive(Debug, Clone, PartialEq, Eq, Zeroize)]
pub enum BasisPolynomial {
    /// A ternary polynomial (transpose bases, where `f' = g`).
    Ternary(TernaryPolynomial),
    /// A polynomial with coefficients in `[-q/2, q/2)` (standard bases,
    /// where `f' = F`).
    Modq(IntegerPolynomial),
}

impl BasisPolynomial {
    /// Converts to the dense integer representation.
    pub fn to_integer_polynomial(&self) -> IntegerPolynomial {
        match self {
            BasisPolynomial::Ternary(p) => p.to_integer_polynomial(),
            BasisPolynomial::Modq(p) => p.clone(),
        }
    }
}

/// One NTRUSign basis: the polynomials `f`, `f'` and `h`.
///
/// `h` is `None` on a decoded zeroth basis, whose public polynomial is
/// carried by the public key instead of the private encoding.
#[derive(Debug, Clone, PartialEq, Eq, Zeroize)]
pub struct Basis {
    /// The short private polynomial.
    pub f: TernaryPolynomial,
    /// The second basis vector.
    pub f_prime: BasisPolynomial,
    /// The public polynomial, when present.
    pub h: Option<IntegerPolynomial>,
}

/// Encoded length in bytes of one mod-q polynomial.
fn modq_len(params: &SignatureParams) -> usize {
    let bits = 63 - (params.q as u64).leading_zeros() as usize;
    (params.n * bits + 7) / 8
}

/// Encoded length in bytes of one ternary polynomial (two bits per trit).
fn ternary_len(params: &SignatureParams) -> usize {
    (params.n + 3) / 4
}

impl Basis {
    /// Encoded length in bytes of one basis.
    pub fn encoded_len(params: &SignatureParams, include_h: bool) -> usize {
        let f_prime_len = match params.basis_type {
            BasisType::Standard => modq_len(params),
            BasisType::Transpose => ternary_len(params),
        };
        ternary_len(params) + f_prime_len + if include_h { modq_len(params) } else { 0 }
    }

    /// Encodes the basis: `f` at two bits per trit, then `f'` (shifted by
    /// `q/2` into `[0, q)` for standard bases), then `h` when `include_h`.
    pub fn encode(&self, params: &SignatureParams, include_h: bool) -> Result<Vec<u8>> {
        let q = params.q;
        let mut out = self.f.to_integer_polynomial().to_binary3_arith();
        match (&self.f_prime, params.basis_type) {
            (BasisPolynomial::Modq(fp), BasisType::Standard) => {
                let mut shifted = fp.clone();
                for c in &mut shifted.coeffs {
                    *c += q / 2;
                }
                shifted.mod_positive(q);
                out.extend_from_slice(&shifted.to_binary(q));
            }
            (BasisPolynomial::Ternary(fp), BasisType::Transpose) => {
                out.extend_from_slice(&fp.to_integer_polynomial().to_binary3_arith());
            }
            _ => {
                return Err(Error::InvalidParameters(
                    "basis polynomial representation does not match the basis type",
                ))
            }
        }
        if include_h {
            let h = self
                .h
                .as_ref()
                .ok_or(Error::InvalidParameters("basis has no public polynomial"))?;
            out.extend_from_slice(&h.to_binary(q));
        }
        Ok(out)
    }

    /// Decodes a basis encoded by [`encode`](Self::encode).
    pub fn decode(data: &[u8], params: &SignatureParams, include_h: bool) -> Result<Basis> {
        let n = params.n;
        let q = params.q;
        if data.len() < Self::encoded_len(params, include_h) {
            return Err(Error::InvalidEncoding("not enough bytes for a basis"));
        }

        let f_int = IntegerPolynomial::from_binary3_arith(data, n)?;
        let f = if params.sparse {
            TernaryPolynomial::Sparse(SparseTernaryPolynomial::from_integer_polynomial(&f_int))
        } else {
            TernaryPolynomial::Dense(DenseTernaryPolynomial::new(f_int))
        };
        let mut offset = ternary_len(params);

        let f_prime = match params.basis_type {
            BasisType::Standard => {
                let mut fp = IntegerPolynomial::from_binary(&data[offset..], n, q)?;
                for c in &mut fp.coeffs {
                    *c -= q / 2;
                }
                offset += modq_len(params);
                BasisPolynomial::Modq(fp)
            }
            BasisType::Transpose => {
                let fp_int = IntegerPolynomial::from_binary3_arith(&data[offset..], n)?;
                offset += ternary_len(params);
                let fp = if params.sparse {
                    TernaryPolynomial::Sparse(SparseTernaryPolynomial::from_integer_polynomial(
                        &fp_int,
                    ))
                } else {
                    TernaryPolynomial::Dense(DenseTernaryPolynomial::new(fp_int))
                };
                BasisPolynomial::Ternary(fp)
            }
        };

        let h = if include_h {
            Some(IntegerPolynomial::from_binary(&data[offset..], n, q)?)
        } else {
            None
        };

        Ok(Basis { f, f_prime, h })
    }
}

/// An NTRUSign private key: `b + 1` bases, the zeroth of which omits `h`
/// from its encoding.
#[derive(Debug, Clone, Zeroize, ZeroizeOnDrop)]
pub struct SignaturePrivateKey {
    /// The bases: index 0 is the signing basis, the rest are perturbation
    /// bases.
    pub bases: Vec<Basis>,
}

impl SignaturePrivateKey {
    /// Encodes all bases back to back.
    pub fn to_bytes(&self, params: &SignatureParams) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        for (i, basis) in self.bases.iter().enumerate() {
            out.extend_from_slice(&basis.encode(params, i != 0)?);
        }
        Ok(out)
    }

    /// Decodes `b + 1` bases.
    pub fn from_bytes(data: &[u8], params: &SignatureParams) -> Result<Self> {
        let mut bases = Vec::with_capacity(params.b + 1);
        let mut offset = 0;
        for i in 0..=params.b {
            let include_h = i != 0;
            if data.len() < offset {
                return Err(Error::InvalidEncoding("truncated private key"));
            }
            let basis = Basis::decode(&data[offset..], params, include_h)?;
            offset += Basis::encoded_len(params, include_h);
            bases.push(basis);
        }
        Ok(SignaturePrivateKey { bases })
    }
}

impl PartialEq for SignaturePrivateKey {
    fn eq(&self, other: &Self) -> bool {
        if self.bases.len() != other.bases.len() {
            return false;
        }
        self.bases.iter().zip(&other.bases).enumerate().all(|(i, (a, b))| {
            // the zeroth basis omits h from its encoding, so a decoded key
            // legitimately differs from the generated one there
            a.f == b.f
                && a.f_prime == b.f_prime
                && (i == 0 || a.h == b.h)
        })
    }
}

/// An NTRUSign public key: the polynomial `h`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignaturePublicKey {
    /// The public polynomial.
    pub h: IntegerPolynomial,
}

impl SignaturePublicKey {
    /// Encodes the key as `h.to_binary(q)`.
    pub fn to_bytes(&self, params: &SignatureParams) -> Vec<u8> {
        self.h.to_binary(params.q)
    }

    /// Decodes a key previously encoded with [`to_bytes`](Self::to_bytes).
    pub fn from_bytes(data: &[u8], params: &SignatureParams) -> Result<Self> {
        Ok(SignaturePublicKey {
            h: IntegerPolynomial::from_binary(data, params.n, params.q)?,
        })
    }
}

/// A matching private/public signature key pair.
#[derive(Debug, Clone)]
pub struct SignatureKeyPair {
    /// The private key.
    pub private: SignaturePrivateKey,
    /// The public key.
    pub public: SignaturePublicKey,
}
