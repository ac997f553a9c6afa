//! Polynomial types over the truncated ring `Z[X]/(X^N - 1)`.
//!
//! All index arithmetic is circular: multiplying by `X` rotates the
//! coefficient vector. The module provides one dense integer representation
//! plus three ternary representations (dense, sparse index lists, and the
//! `f1*f2 + f3` product form), arbitrary-precision integer and decimal
//! representations for the resultant pipeline, and bit-exact binary codecs.

mod bigdec;
mod bigint;
mod dense;
mod encode;
mod integer;
mod product;
mod resultant;
mod sparse;

pub use bigdec::BigDecimalPolynomial;
pub use bigint::BigIntPolynomial;
pub use dense::DenseTernaryPolynomial;
pub use integer::IntegerPolynomial;
pub use product::ProductFormPolynomial;
pub use resultant::{Resultant, Subresultant};
pub use sparse::SparseTernaryPolynomial;

use zeroize::Zeroize;

/// A polynomial with coefficients in `{-1, 0, 1}`, in one of the three
/// concrete representations.
///
/// The set of representations is closed; dispatch is a three-arm match, not
/// a trait object. Every arm can multiply by a dense polynomial, convert to
/// a dense polynomial, and wipe its contents.
#[derive(Debug, Clone, PartialEq, Eq, Zeroize)]
pub enum TernaryPolynomial {
    /// Dense coefficient vector.
    Dense(DenseTernaryPolynomial),
    /// Sorted index lists of the +1 and -1 positions.
    Sparse(SparseTernaryPolynomial),
    /// Product form `f1*f2 + f3` of three sparse ternary polynomials.
    Product(ProductFormPolynomial),
}

impl TernaryPolynomial {
    /// Multiplies by a dense polynomial, reducing coefficients into
    /// `[0, modulus)`.
    pub fn mult(&self, b: &IntegerPolynomial, modulus: i64) -> IntegerPolynomial {
        match self {
            TernaryPolynomial::Dense(p) => p.mult(b, modulus),
            TernaryPolynomial::Sparse(p) => p.mult_mod(b, modulus),
            TernaryPolynomial::Product(p) => p.mult_mod(b, modulus),
        }
    }

    /// Converts to the dense integer representation.
    pub fn to_integer_polynomial(&self) -> IntegerPolynomial {
        match self {
            TernaryPolynomial::Dense(p) => p.to_integer_polynomial(),
            TernaryPolynomial::Sparse(p) => p.to_integer_polynomial(),
            TernaryPolynomial::Product(p) => p.to_integer_polynomial(),
        }
    }

    /// Overwrites all coefficient data with zeros.
    pub fn clear(&mut self) {
        match self {
            TernaryPolynomial::Dense(p) => p.clear(),
            TernaryPolynomial::Sparse(p) => p.clear(),
            TernaryPolynomial::Product(p) => p.clear(),
        }
    }
}
