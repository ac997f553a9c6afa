//! # Trellis
//!
//! An NTRU lattice cryptography library.
//!
//! ## Features
//!
//! - `encrypt` (default): NTRUEncrypt public-key encryption (IEEE 1363.1
//!   SVES)
//! - `sign` (default): NTRUSign lattice basis generation and key codecs
//!   (no signing — the published scheme is broken)
//!
//! The polynomial engine over `Z[X]/(X^N - 1)` is always available under
//! [`poly`].
//!
//! ## Example
//!
//! ```ignore
//! use trellis::encrypt::{EncryptionParams, NtruEncrypt};
//! use rand::rngs::OsRng;
//!
//! let ntru = NtruEncrypt::new(EncryptionParams::APR2011_439_FAST);
//! let kp = ntru.generate_key_pair(&mut OsRng)?;
//! let ciphertext = ntru.encrypt(b"hello world", kp.public(), &mut OsRng)?;
//! let plaintext = ntru.decrypt(&ciphertext, &kp)?;
//! assert_eq!(&plaintext, b"hello world");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub use trellis_core::{Error, Result};

/// Polynomial arithmetic over the truncated ring `Z[X]/(X^N - 1)`.
pub mod poly {
    pub use trellis_core::poly::*;
}

/// Extended-Euclidean helpers.
pub mod euclid {
    pub use trellis_core::{BigIntEuclidean, IntEuclidean};
}

/// NTRUEncrypt public-key encryption.
#[cfg(feature = "encrypt")]
pub mod encrypt {
    pub use trellis_encrypt::*;
}

/// NTRUSign key material and basis construction.
#[cfg(feature = "sign")]
pub mod sign {
    pub use trellis_sign::*;
}
