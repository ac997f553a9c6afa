//! Property-based tests for NTRUEncrypt using proptest.
//!
//! These tests verify fundamental properties across random inputs:
//! - Roundtrip: decrypt(encrypt(m)) == m for arbitrary message lengths
//! - Determinism: the same RNG seed produces the same key pair
//! - Key codecs: encode/decode is the identity on generated keys

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use trellis_encrypt::{EncryptionParams, EncryptionPrivateKey, EncryptionPublicKey, NtruEncrypt};

/// Generate arbitrary 32-byte seeds for testing
fn arb_seed() -> impl Strategy<Value = [u8; 32]> {
    prop::array::uniform32(any::<u8>())
}

macro_rules! ntru_proptest {
    ($mod_name:ident, $params:expr, $cases:expr) => {
        mod $mod_name {
            use super::*;

            proptest! {
                #![proptest_config(ProptestConfig::with_cases($cases))]

                /// Roundtrip: any message up to the capacity decrypts back.
                #[test]
                fn roundtrip(
                    seed in arb_seed(),
                    msg in prop::collection::vec(any::<u8>(), 0..=$params.max_msg_len_bytes),
                ) {
                    let ntru = NtruEncrypt::new($params);
                    let mut rng = StdRng::from_seed(seed);
                    let kp = ntru.generate_key_pair(&mut rng).unwrap();
                    let ct = ntru.encrypt(&msg, kp.public(), &mut rng).unwrap();
                    prop_assert_eq!(ntru.decrypt(&ct, &kp).unwrap(), msg);
                }

                /// Determinism: the same seed produces the same key pair.
                #[test]
                fn keygen_determinism(seed in arb_seed()) {
                    let ntru = NtruEncrypt::new($params);
                    let mut rng1 = StdRng::from_seed(seed);
                    let mut rng2 = StdRng::from_seed(seed);
                    let kp1 = ntru.generate_key_pair(&mut rng1).unwrap();
                    let kp2 = ntru.generate_key_pair(&mut rng2).unwrap();
                    prop_assert_eq!(kp1.public().to_bytes(), kp2.public().to_bytes());
                    prop_assert_eq!(kp1.private().to_bytes(), kp2.private().to_bytes());
                }

                /// Key codecs: encode then decode is the identity.
                #[test]
                fn key_codec_identity(seed in arb_seed()) {
                    let ntru = NtruEncrypt::new($params);
                    let mut rng = StdRng::from_seed(seed);
                    let kp = ntru.generate_key_pair(&mut rng).unwrap();

                    let public =
                        EncryptionPublicKey::from_bytes(&kp.public().to_bytes(), $params).unwrap();
                    prop_assert_eq!(&public, kp.public());

                    let private =
                        EncryptionPrivateKey::from_bytes(&kp.private().to_bytes(), $params)
                            .unwrap();
                    prop_assert_eq!(&private, kp.private());
                }
            }
        }
    };
}

ntru_proptest!(apr2011_439_fast_props, EncryptionParams::APR2011_439_FAST, 8);
ntru_proptest!(apr2011_439_props, EncryptionParams::APR2011_439, 4);
