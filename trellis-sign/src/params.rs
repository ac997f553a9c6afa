//! NTRUSign parameter sets.

/// How the second basis vector is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasisType {
    /// `f' = F`, stored modulo `q`.
    Standard,
    /// `f' = g`, stored in ternary form; signing would use the two short
    /// vectors directly.
    Transpose,
}

/// An immutable set of NTRUSign parameters.
///
/// Values follow the IEEE P1363.1 working-group parameter proposals. The
/// norm-bound fields describe the signing distribution and are carried for
/// completeness; nothing in this crate consumes them.
#[derive(Debug, Clone, PartialEq)]
pub struct SignatureParams {
    /// Ring degree (a prime).
    pub n: usize,
    /// Large modulus (a power of two).
    pub q: i64,
    /// Number of -1 coefficients in `f` and `g`; both carry `d+1` ones.
    pub d: usize,
    /// Number of perturbation bases; the private key holds `b + 1` bases.
    pub b: usize,
    /// Basis layout.
    pub basis_type: BasisType,
    /// Squared balancing factor of the signing distribution.
    pub beta_sq: f64,
    /// Squared norm bound for signature acceptance.
    pub norm_bound_sq: f64,
    /// Whether `N` and `2N+1` are both required to be prime.
    pub prime_check: bool,
    /// Whether ternary polynomials use the sparse representation.
    pub sparse: bool,
    /// Maximum bits needed to encode one coefficient of `F`.
    pub bits_f: usize,
}

impl SignatureParams {
    /// Gives less than 80 bits of security; useful for tests and
    /// interoperability experiments only.
    pub const T157: SignatureParams = SignatureParams {
        n: 157,
        q: 256,
        d: 29,
        b: 1,
        basis_type: BasisType::Transpose,
        beta_sq: 0.38407 * 0.38407,
        norm_bound_sq: 150.02 * 150.02,
        prime_check: false,
        sparse: true,
        bits_f: 6,
    };

    /// Gives less than 256 bits of security.
    pub const T349: SignatureParams = SignatureParams {
        n: 349,
        q: 512,
        d: 75,
        b: 1,
        basis_type: BasisType::Transpose,
        beta_sq: 0.18543 * 0.18543,
        norm_bound_sq: 368.62 * 368.62,
        prime_check: false,
        sparse: true,
        bits_f: 6,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predefined_sets() {
        assert_eq!(SignatureParams::T157.n, 157);
        assert_eq!(SignatureParams::T157.q, 256);
        assert_eq!(SignatureParams::T349.d, 75);
        assert_eq!(SignatureParams::T349.basis_type, BasisType::Transpose);
    }
}
