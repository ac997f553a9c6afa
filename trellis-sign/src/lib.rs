//! # NTRUSign key material
//!
//! Lattice basis construction and key codecs for the NTRUSign signature
//! scheme: a private key is one or more bases `(f, f', h)` over
//! `Z[X]/(X^N - 1)` with `f*G - g*F = q` linking the short and long basis
//! vectors.
//!
//! Signature generation and verification are deliberately not provided:
//! the published NTRUSign construction is broken (signatures leak the
//! private basis), so this crate stops at the key material — the basis
//! construction pipeline (resultants, CRT combination, high-precision
//! inverse-resultant reduction) and the bit-exact key encodings.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod basis;
mod keygen;
mod params;

pub use basis::{Basis, BasisPolynomial, SignatureKeyPair, SignaturePrivateKey, SignaturePublicKey};
pub use keygen::generate_key_pair;
pub use params::{BasisType, SignatureParams};
pub use trellis_core::{Error, Result};
