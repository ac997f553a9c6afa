//! # NTRUEncrypt
//!
//! Public-key encryption over the NTRU lattice, following the IEEE 1363.1
//! SVES construction: messages are padded with a random prefix, converted to
//! ternary form, masked with an MGF derived from the blinded public key, and
//! checked for trit balance on both ends.
//!
//! ## Parameter Sets
//!
//! | Parameter Set | Security | N    | q    | Private key form  |
//! |---------------|----------|------|------|-------------------|
//! | `EES1087EP2`  | 256-bit  | 1087 | 2048 | ternary           |
//! | `EES1171EP1`  | 256-bit  | 1171 | 2048 | ternary           |
//! | `EES1499EP1`  | 256-bit  | 1499 | 2048 | ternary           |
//! | `APR2011_439` | 128-bit  | 439  | 2048 | ternary           |
//! | `APR2011_439_FAST` | 128-bit | 439 | 2048 | product form, f = 1 + 3F |
//! | `APR2011_743` | 256-bit  | 743  | 2048 | ternary           |
//! | `APR2011_743_FAST` | 256-bit | 743 | 2048 | product form, f = 1 + 3F |
//!
//! ## Example
//!
//! ```ignore
//! use trellis_encrypt::{EncryptionParams, NtruEncrypt};
//! use rand::rngs::OsRng;
//!
//! let ntru = NtruEncrypt::new(EncryptionParams::APR2011_439_FAST);
//! let kp = ntru.generate_key_pair(&mut OsRng)?;
//! let ct = ntru.encrypt(b"hello world", kp.public(), &mut OsRng)?;
//! let pt = ntru.decrypt(&ct, &kp)?;
//! assert_eq!(&pt, b"hello world");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod encrypt;
mod hash;
mod igf;
mod keys;
mod mgf;
mod params;

pub use encrypt::NtruEncrypt;
pub use igf::IndexGenerator;
pub use keys::{EncryptionKeyPair, EncryptionPrivateKey, EncryptionPublicKey};
pub use params::{EncryptionParams, TernaryPolynomialType};
pub use trellis_core::{Error, Result};
