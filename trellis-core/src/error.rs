//! Error types for trellis cryptographic operations.

use core::fmt;

/// Result type alias using [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur during key generation, encryption, decryption and
/// encoding.
///
/// Recoverable internal failures (a polynomial that turns out not to be
/// invertible, an unbalanced message representative) are signalled with
/// `Option`/retry loops inside the library and never reach the caller;
/// these variants are the caller-visible surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Plaintext exceeds the maximum length for the parameter set.
    MessageTooLong {
        /// Length of the message in bytes.
        len: usize,
        /// Maximum allowed length in bytes.
        max: usize,
    },

    /// A parameter set is internally inconsistent or unsupported.
    InvalidParameters(&'static str),

    /// An encoded polynomial, key or parameter record could not be decoded.
    InvalidEncoding(&'static str),

    /// A ciphertext failed one of the SVES validity checks.
    InvalidCiphertext(&'static str),

    /// Key generation did not find an invertible candidate within the retry
    /// limit.
    KeygenFailure,

    /// Encryption did not find a balanced message representative within the
    /// retry limit.
    EncryptFailure,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MessageTooLong { len, max } => {
                write!(f, "message too long: {len} > {max}")
            }
            Error::InvalidParameters(reason) => write!(f, "invalid parameters: {reason}"),
            Error::InvalidEncoding(reason) => write!(f, "invalid encoding: {reason}"),
            Error::InvalidCiphertext(reason) => write!(f, "invalid ciphertext: {reason}"),
            Error::KeygenFailure => write!(f, "key generation retry limit exceeded"),
            Error::EncryptFailure => write!(f, "encryption retry limit exceeded"),
        }
    }
}

impl std::error::Error for Error {}
