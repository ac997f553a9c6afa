//! NTRUEncrypt key generation, encryption and decryption.
//!
//! The scheme follows the SVES construction of IEEE 1363.1: the plaintext is
//! framed as `b || len || m || padding`, converted to trits, and masked with
//! MGF output derived from `r*h`; the blinding polynomial `r` itself is
//! derived deterministically from the message and public key through the
//! IGF, which is what lets decryption re-derive and verify it.

use crate::igf::IndexGenerator;
use crate::keys::{EncryptionKeyPair, EncryptionPrivateKey, EncryptionPublicKey};
use crate::mgf::generate_mask;
use crate::params::{EncryptionParams, TernaryPolynomialType};
use rand_core::CryptoRng;
use subtle::ConstantTimeEq;
use trellis_core::poly::{
    DenseTernaryPolynomial, IntegerPolynomial, ProductFormPolynomial, SparseTernaryPolynomial,
    TernaryPolynomial,
};
use trellis_core::{Error, Result};
use zeroize::Zeroize;

/// Cap on the keygen and encrypt resampling loops. Hitting it means the
/// parameter set is adversarial; healthy sets succeed within a few tries.
const MAX_ATTEMPTS: usize = 100;

/// Encrypts and decrypts data and generates key pairs. The small modulus
/// `p` is hardcoded to 3.
pub struct NtruEncrypt {
    params: EncryptionParams,
}

impl NtruEncrypt {
    /// Creates an instance for a parameter set.
    pub fn new(params: EncryptionParams) -> Self {
        NtruEncrypt { params }
    }

    /// The parameter set in use.
    pub fn params(&self) -> &EncryptionParams {
        &self.params
    }

    /// Generates a new key pair.
    ///
    /// Candidates for `f` are resampled until both required inverses exist;
    /// with `fast_fp` the inverse modulo 3 is the constant 1 by
    /// construction, so only invertibility modulo `q` can fail.
    pub fn generate_key_pair(&self, rng: &mut impl CryptoRng) -> Result<EncryptionKeyPair> {
        let p = &self.params;
        for _ in 0..MAX_ATTEMPTS {
            let (t, mut f, fp) = match self.sample_private_candidate(rng) {
                Some(candidate) => candidate,
                None => continue,
            };
            let Some(mut fq) = f.invert_fq(p.q) else {
                f.zeroize();
                continue;
            };

            let mut g = self.random_ternary(p.dg, p.dg, rng);
            let mut h = g.mult(&fq, p.q);
            h.mult3_mod(p.q);
            h.ensure_positive(p.q);
            g.clear();
            fq.zeroize();
            f.zeroize();

            let fp = fp.unwrap_or_else(|| IntegerPolynomial::one(p.n));
            return Ok(EncryptionKeyPair::new(
                EncryptionPrivateKey::new(t, fp, p.clone()),
                EncryptionPublicKey::new(h, p.clone()),
            ));
        }
        Err(Error::KeygenFailure)
    }

    /// Samples `t`, the corresponding `f`, and `fp` when it must be
    /// computed; `None` means the candidate was not invertible modulo 3.
    fn sample_private_candidate(
        &self,
        rng: &mut impl CryptoRng,
    ) -> Option<(TernaryPolynomial, IntegerPolynomial, Option<IntegerPolynomial>)> {
        let p = &self.params;
        let t = match p.poly_type {
            TernaryPolynomialType::Simple => {
                let neg_ones = if p.fast_fp { p.df } else { p.df - 1 };
                self.random_ternary(p.df, neg_ones, rng)
            }
            TernaryPolynomialType::Product => {
                let df3_neg_ones = if p.fast_fp { p.df3 } else { p.df3 - 1 };
                TernaryPolynomial::Product(ProductFormPolynomial::generate_random(
                    p.n,
                    p.df1,
                    p.df2,
                    p.df3,
                    df3_neg_ones,
                    rng,
                ))
            }
        };
        let mut f = t.to_integer_polynomial();
        if p.fast_fp {
            // f = 1 + 3t is congruent to 1 mod 3, always invertible there
            f.mult_scalar(3);
            f.coeffs[0] += 1;
            Some((t, f, None))
        } else {
            let fp = f.invert_f3()?;
            Some((t, f, Some(fp)))
        }
    }

    /// Encrypts a message with the SVES padding scheme.
    ///
    /// Fails with [`Error::MessageTooLong`] if the plaintext exceeds the
    /// parameter set's capacity, and with [`Error::EncryptFailure`] if no
    /// trit-balanced representative is found within the retry limit.
    pub fn encrypt(
        &self,
        m: &[u8],
        pub_key: &EncryptionPublicKey,
        rng: &mut impl CryptoRng,
    ) -> Result<Vec<u8>> {
        let p = &self.params;
        if p.max_msg_len_bytes > 255 {
            return Err(Error::InvalidParameters(
                "message length fields larger than one byte are not supported",
            ));
        }
        if m.len() > p.max_msg_len_bytes {
            return Err(Error::MessageTooLong {
                len: m.len(),
                max: p.max_msg_len_bytes,
            });
        }

        let h_bin = pub_key.h().to_binary(p.q);
        for _ in 0..MAX_ATTEMPTS {
            // M = b || len(m) || m || zero padding
            let mut b = vec![0u8; p.db / 8];
            rng.fill_bytes(&mut b);
            let mut msg_buf = Vec::with_capacity(p.buffer_len_bits / 8);
            msg_buf.extend_from_slice(&b);
            msg_buf.push(m.len() as u8);
            msg_buf.extend_from_slice(m);
            msg_buf.resize(p.buffer_len_bits / 8, 0);
            let mut m_trin = IntegerPolynomial::from_binary3(&msg_buf, p.n);

            // sData = OID || m || b || truncated public key
            let mut s_data = Vec::with_capacity(3 + m.len() + b.len() + p.pk_len / 8);
            s_data.extend_from_slice(&p.oid);
            s_data.extend_from_slice(m);
            s_data.extend_from_slice(&b);
            s_data.extend_from_slice(&h_bin[..p.pk_len / 8]);

            let mut r = self.generate_blinding_poly(&s_data);
            let big_r = r.mult(pub_key.h(), p.q);
            r.clear();
            s_data.zeroize();

            let mut r4 = big_r.clone();
            r4.mod_positive(4);
            let mask = generate_mask(&r4.to_binary(4), p.n, p.min_calls_mask);
            m_trin.add(&mask);
            m_trin.mod3();

            let balanced = m_trin.count(-1) >= p.dm0
                && m_trin.count(0) >= p.dm0
                && m_trin.count(1) >= p.dm0;
            if !balanced {
                b.zeroize();
                msg_buf.zeroize();
                continue;
            }

            let mut e = big_r;
            e.add_mod(&m_trin, p.q);
            let out = e.to_binary(p.q);

            b.zeroize();
            msg_buf.zeroize();
            m_trin.zeroize();
            return Ok(out);
        }
        Err(Error::EncryptFailure)
    }

    /// Decrypts a ciphertext produced by [`encrypt`](Self::encrypt).
    ///
    /// Every SVES validity condition is checked: trit balance of the
    /// decrypted representative, the message length field, all-zero
    /// padding, and re-derivation of the blinding polynomial from the
    /// recovered message.
    pub fn decrypt(&self, data: &[u8], kp: &EncryptionKeyPair) -> Result<Vec<u8>> {
        let p = &self.params;
        if p.max_msg_len_bytes > 255 {
            return Err(Error::InvalidParameters(
                "message length fields larger than one byte are not supported",
            ));
        }
        let b_len = p.db / 8;

        let e = IntegerPolynomial::from_binary(data, p.n, p.q)?;
        let ci = self.decrypt_poly(&e, kp.private().t(), kp.private().fp());

        if ci.count(-1) < p.dm0 {
            return Err(Error::InvalidCiphertext("fewer than dm0 coefficients equal -1"));
        }
        if ci.count(0) < p.dm0 {
            return Err(Error::InvalidCiphertext("fewer than dm0 coefficients equal 0"));
        }
        if ci.count(1) < p.dm0 {
            return Err(Error::InvalidCiphertext("fewer than dm0 coefficients equal 1"));
        }

        // reconstruct the mask from R = e - m'
        let mut c_r4 = e.clone();
        c_r4.sub_mod(&ci, p.q);
        c_r4.mod_positive(4);
        let mask = generate_mask(&c_r4.to_binary(4), p.n, p.min_calls_mask);

        let mut c_m_trin = ci.clone();
        c_m_trin.sub(&mask);
        c_m_trin.mod3();
        let mut c_m = c_m_trin
            .to_binary3()
            .map_err(|_| Error::InvalidCiphertext("undecodable message representative"))?;

        // parse b || len || m || padding
        let cb = &c_m[..b_len];
        let cl = c_m[b_len] as usize;
        if cl > p.max_msg_len_bytes {
            return Err(Error::InvalidCiphertext("message length field out of range"));
        }
        let cm = &c_m[b_len + 1..b_len + 1 + cl];
        let padding = &c_m[b_len + 1 + cl..];
        if padding.iter().any(|&x| x != 0) {
            return Err(Error::InvalidCiphertext("nonzero padding after message"));
        }

        // re-derive the blinding polynomial and check it reproduces e
        let h_bin = kp.public().h().to_binary(p.q);
        let mut s_data = Vec::with_capacity(3 + cl + b_len + p.pk_len / 8);
        s_data.extend_from_slice(&p.oid);
        s_data.extend_from_slice(cm);
        s_data.extend_from_slice(cb);
        s_data.extend_from_slice(&h_bin[..p.pk_len / 8]);

        let mut cr = self.generate_blinding_poly(&s_data);
        let mut e_check = cr.mult(kp.public().h(), p.q);
        cr.clear();
        s_data.zeroize();
        e_check.add_mod(&ci, p.q);
        let consistent: bool = e_check.to_binary(p.q).ct_eq(data).into();
        if !consistent {
            return Err(Error::InvalidCiphertext(
                "blinding polynomial consistency check failed",
            ));
        }

        let m = cm.to_vec();
        c_m.zeroize();
        Ok(m)
    }

    /// Core decryption: recovers the message representative `m'` from `e`.
    fn decrypt_poly(
        &self,
        e: &IntegerPolynomial,
        t: &TernaryPolynomial,
        fp: &IntegerPolynomial,
    ) -> IntegerPolynomial {
        let p = &self.params;
        let mut a = t.mult(e, p.q);
        if p.fast_fp {
            // f*e = (1 + 3t)*e = e + 3*(t*e)
            a.mult_scalar(3);
            a.add(e);
        }
        a.center0(p.q);
        a.mod3();

        let mut ci = if p.fast_fp { a } else { a.mult_mod(fp, 3) };
        ci.center0(3);
        ci
    }

    /// Derives the blinding polynomial from a seed through the IGF: the +1
    /// positions are drawn first, then the -1 positions, skipping occupied
    /// slots.
    fn generate_blinding_poly(&self, seed: &[u8]) -> TernaryPolynomial {
        let p = &self.params;
        let mut ig = IndexGenerator::new(seed, p);
        match p.poly_type {
            TernaryPolynomialType::Product => {
                let r1 = blinding_coeffs(&mut ig, p.n, p.df1);
                let r2 = blinding_coeffs(&mut ig, p.n, p.df2);
                let r3 = blinding_coeffs(&mut ig, p.n, p.df3);
                TernaryPolynomial::Product(ProductFormPolynomial::new(
                    SparseTernaryPolynomial::from_coefficients(&r1),
                    SparseTernaryPolynomial::from_coefficients(&r2),
                    SparseTernaryPolynomial::from_coefficients(&r3),
                ))
            }
            TernaryPolynomialType::Simple => {
                let coeffs = blinding_coeffs(&mut ig, p.n, p.dr);
                if p.sparse {
                    TernaryPolynomial::Sparse(SparseTernaryPolynomial::from_coefficients(&coeffs))
                } else {
                    TernaryPolynomial::Dense(DenseTernaryPolynomial::from_coeffs(coeffs))
                }
            }
        }
    }

    /// Samples a ternary polynomial in the representation the parameter set
    /// asks for.
    fn random_ternary(
        &self,
        num_ones: usize,
        num_neg_ones: usize,
        rng: &mut impl CryptoRng,
    ) -> TernaryPolynomial {
        let p = &self.params;
        if p.sparse {
            TernaryPolynomial::Sparse(SparseTernaryPolynomial::generate_random(
                p.n,
                num_ones,
                num_neg_ones,
                rng,
            ))
        } else {
            TernaryPolynomial::Dense(DenseTernaryPolynomial::generate_random(
                p.n,
                num_ones,
                num_neg_ones,
                rng,
            ))
        }
    }
}

/// Fills a coefficient vector with `dr` ones and `dr` negative ones at
/// IGF-chosen positions.
fn blinding_coeffs(ig: &mut IndexGenerator, n: usize, dr: usize) -> Vec<i64> {
    let mut r = vec![0i64; n];
    for coeff in [1i64, -1] {
        let mut placed = 0;
        while placed < dr {
            let i = ig.next_index();
            if r[i] == 0 {
                r[i] = coeff;
                placed += 1;
            }
        }
    }
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_blinding_poly_deterministic() {
        let ntru = NtruEncrypt::new(EncryptionParams::APR2011_439);
        let a = ntru.generate_blinding_poly(b"seed");
        let b = ntru.generate_blinding_poly(b"seed");
        assert_eq!(a.to_integer_polynomial(), b.to_integer_polynomial());
    }

    #[test]
    fn test_blinding_poly_weights() {
        let ntru = NtruEncrypt::new(EncryptionParams::APR2011_439);
        let r = ntru.generate_blinding_poly(b"weight check").to_integer_polynomial();
        assert_eq!(r.count(1), 146);
        assert_eq!(r.count(-1), 146);
    }

    #[test]
    fn test_decrypt_poly_inverts_raw_encryption() {
        // without any padding: e = r*h + m' must decrypt back to m'
        let ntru = NtruEncrypt::new(EncryptionParams::APR2011_439_FAST);
        let mut rng = StdRng::from_seed([71u8; 32]);
        let kp = ntru.generate_key_pair(&mut rng).unwrap();
        let p = ntru.params();

        let m_trin = DenseTernaryPolynomial::generate_random(p.n, 130, 130, &mut rng)
            .to_integer_polynomial();
        let r = ntru.generate_blinding_poly(b"raw encryption seed");
        let mut e = r.mult(kp.public().h(), p.q);
        e.add_mod(&m_trin, p.q);

        let ci = ntru.decrypt_poly(&e, kp.private().t(), kp.private().fp());
        assert_eq!(ci, m_trin);
    }

    #[test]
    fn test_encrypt_rejects_long_message() {
        let ntru = NtruEncrypt::new(EncryptionParams::APR2011_439_FAST);
        let mut rng = StdRng::from_seed([72u8; 32]);
        let kp = ntru.generate_key_pair(&mut rng).unwrap();
        let long = vec![0u8; ntru.params().max_msg_len_bytes + 1];
        assert!(matches!(
            ntru.encrypt(&long, kp.public(), &mut rng),
            Err(Error::MessageTooLong { .. })
        ));
    }

    #[test]
    fn test_roundtrip_simple_form() {
        let ntru = NtruEncrypt::new(EncryptionParams::APR2011_439);
        let mut rng = StdRng::from_seed([73u8; 32]);
        let kp = ntru.generate_key_pair(&mut rng).unwrap();
        let m = b"the quick brown fox";
        let ct = ntru.encrypt(m, kp.public(), &mut rng).unwrap();
        assert_eq!(ntru.decrypt(&ct, &kp).unwrap(), m);
    }

    #[test]
    fn test_roundtrip_product_form() {
        let ntru = NtruEncrypt::new(EncryptionParams::APR2011_439_FAST);
        let mut rng = StdRng::from_seed([74u8; 32]);
        let kp = ntru.generate_key_pair(&mut rng).unwrap();
        let m = b"product form roundtrip";
        let ct = ntru.encrypt(m, kp.public(), &mut rng).unwrap();
        assert_eq!(ntru.decrypt(&ct, &kp).unwrap(), m);
    }
}
