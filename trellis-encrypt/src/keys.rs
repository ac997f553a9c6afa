//! NTRUEncrypt key types and their bit-exact encodings.

use crate::params::{EncryptionParams, TernaryPolynomialType};
use trellis_core::poly::{
    DenseTernaryPolynomial, IntegerPolynomial, ProductFormPolynomial, SparseTernaryPolynomial,
    TernaryPolynomial,
};
use trellis_core::{Error, Result};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// An NTRUEncrypt public key: the polynomial `h = 3*g*fq (mod q)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptionPublicKey {
    h: IntegerPolynomial,
    params: EncryptionParams,
}

impl EncryptionPublicKey {
    pub(crate) fn new(h: IntegerPolynomial, params: EncryptionParams) -> Self {
        EncryptionPublicKey { h, params }
    }

    /// The public polynomial.
    pub(crate) fn h(&self) -> &IntegerPolynomial {
        &self.h
    }

    /// Encodes the key as `h.to_binary(q)`.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.h.to_binary(self.params.q)
    }

    /// Decodes a key previously encoded with [`to_bytes`](Self::to_bytes).
    pub fn from_bytes(data: &[u8], params: EncryptionParams) -> Result<Self> {
        let h = IntegerPolynomial::from_binary(data, params.n, params.q)?;
        Ok(EncryptionPublicKey { h, params })
    }
}

/// An NTRUEncrypt private key.
///
/// Holds the polynomial `t` that determines `f` (if `fast_fp`,
/// `f = 1 + 3t`; otherwise `f = t`) and the precomputed inverse
/// `fp = f^-1 (mod 3)`, which is the constant 1 in the `fast_fp` case.
#[derive(Debug, Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct EncryptionPrivateKey {
    t: TernaryPolynomial,
    fp: IntegerPolynomial,
    #[zeroize(skip)]
    params: EncryptionParams,
}

impl EncryptionPrivateKey {
    pub(crate) fn new(
        t: TernaryPolynomial,
        fp: IntegerPolynomial,
        params: EncryptionParams,
    ) -> Self {
        EncryptionPrivateKey { t, fp, params }
    }

    pub(crate) fn t(&self) -> &TernaryPolynomial {
        &self.t
    }

    pub(crate) fn fp(&self) -> &IntegerPolynomial {
        &self.fp
    }

    /// Encodes the key: the three sparse factors for product form, the
    /// tight base-3 packing of `t` otherwise.
    pub fn to_bytes(&self) -> Vec<u8> {
        match &self.t {
            TernaryPolynomial::Product(p) => p.to_binary(),
            t => t.to_integer_polynomial().to_binary3_tight(),
        }
    }

    /// Decodes a key previously encoded with [`to_bytes`](Self::to_bytes),
    /// re-deriving `fp` from `t`.
    pub fn from_bytes(data: &[u8], params: EncryptionParams) -> Result<Self> {
        let t = match params.poly_type {
            TernaryPolynomialType::Product => {
                let df3_neg_ones = if params.fast_fp {
                    params.df3
                } else {
                    params.df3 - 1
                };
                TernaryPolynomial::Product(ProductFormPolynomial::from_binary(
                    data,
                    params.n,
                    params.df1,
                    params.df2,
                    params.df3,
                    df3_neg_ones,
                )?)
            }
            TernaryPolynomialType::Simple => {
                let f = IntegerPolynomial::from_binary3_tight(data, params.n)?;
                if params.sparse {
                    TernaryPolynomial::Sparse(SparseTernaryPolynomial::from_integer_polynomial(&f))
                } else {
                    TernaryPolynomial::Dense(DenseTernaryPolynomial::new(f))
                }
            }
        };
        let fp = if params.fast_fp {
            IntegerPolynomial::one(params.n)
        } else {
            t.to_integer_polynomial()
                .invert_f3()
                .ok_or(Error::InvalidEncoding("private key is not invertible mod 3"))?
        };
        Ok(EncryptionPrivateKey { t, fp, params })
    }
}

/// A matching private/public key pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptionKeyPair {
    private: EncryptionPrivateKey,
    public: EncryptionPublicKey,
}

impl EncryptionKeyPair {
    pub(crate) fn new(private: EncryptionPrivateKey, public: EncryptionPublicKey) -> Self {
        EncryptionKeyPair { private, public }
    }

    /// Assembles a key pair from separately transported keys.
    pub fn from_parts(private: EncryptionPrivateKey, public: EncryptionPublicKey) -> Self {
        EncryptionKeyPair { private, public }
    }

    /// The private key.
    pub fn private(&self) -> &EncryptionPrivateKey {
        &self.private
    }

    /// The public key.
    pub fn public(&self) -> &EncryptionPublicKey {
        &self.public
    }
}
