//! # Trellis Core
//!
//! Polynomial arithmetic over the truncated ring `R = Z[X]/(X^N - 1)` for the
//! trellis NTRU lattice library.
//!
//! This crate provides:
//! - Common error types
//! - Extended-Euclidean helpers for modular inversion
//! - Dense integer, dense/sparse ternary and product-form polynomials
//! - Inversion modulo 2, 3 and prime powers of 2
//! - Resultant computation over Z via a CRT moduli chain
//! - Bit-exact binary codecs for polynomials

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod euclid;
pub mod poly;

pub use error::{Error, Result};
pub use euclid::{BigIntEuclidean, IntEuclidean};

/// Re-export zeroize for convenience.
pub use zeroize::{Zeroize, ZeroizeOnDrop};
