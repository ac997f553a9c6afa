//! NTRUEncrypt parameter sets.
//!
//! A parameter set fixes the ring degree, moduli, polynomial weights and the
//! hash-call counts of the IGF and mask generator. Several predefined sets
//! are provided and new ones can be constructed.

use trellis_core::{Error, Result};

/// Representation of the private polynomial family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TernaryPolynomialType {
    /// One ternary polynomial of weight `df`.
    Simple,
    /// Product form `f1*f2 + f3` with weights `df1`, `df2`, `df3`.
    Product,
}

/// An immutable set of NTRUEncrypt parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptionParams {
    /// Ring degree (a prime).
    pub n: usize,
    /// Large modulus (a power of two).
    pub q: i64,
    /// Number of ones in the private polynomial `f` (simple form).
    pub df: usize,
    /// Weight of `f1` (product form).
    pub df1: usize,
    /// Weight of `f2` (product form).
    pub df2: usize,
    /// Weight of `f3` (product form).
    pub df3: usize,
    /// Number of +1 and -1 coefficients in the blinding polynomial `r`.
    pub dr: usize,
    /// Number of +1 and -1 coefficients in the mask polynomial `g`.
    pub dg: usize,
    /// Minimum count of each of -1, 0, 1 in the message representative.
    pub dm0: usize,
    /// Bit length of the random prefix `b` (a multiple of 8).
    pub db: usize,
    /// Bit width of one IGF index extraction.
    pub c: usize,
    /// Minimum number of hash calls seeding the IGF.
    pub min_calls_r: usize,
    /// Minimum number of hash calls for mask generation.
    pub min_calls_mask: usize,
    /// Three bytes identifying the parameter set.
    pub oid: [u8; 3],
    /// Whether ternary polynomials use the sparse representation.
    pub sparse: bool,
    /// Whether `f = 1 + 3*F` (making `fp = 1`) instead of `f` ternary.
    pub fast_fp: bool,
    /// Private polynomial representation.
    pub poly_type: TernaryPolynomialType,
    /// Length of the message-length field in bytes (always 1).
    pub llen: usize,
    /// Maximum plaintext length in bytes.
    pub max_msg_len_bytes: usize,
    /// Size of the SVES message buffer in bits.
    pub buffer_len_bits: usize,
    /// Number of data-bearing trits in the message representative.
    pub buffer_len_trits: usize,
    /// Number of public-key bits mixed into the blinding seed.
    pub pk_len: usize,
    /// Reserved bytes carried through serialization.
    pub reserved: [u8; 16],
}

impl EncryptionParams {
    /// A conservative parameter set giving 256 bits of security, optimized
    /// for key size.
    pub const EES1087EP2: EncryptionParams =
        EncryptionParams::simple(1087, 2048, 120, 120, 256, 13, 25, 14, [0, 6, 3], true, false);

    /// A conservative parameter set giving 256 bits of security, a tradeoff
    /// between key size and speed.
    pub const EES1171EP1: EncryptionParams =
        EncryptionParams::simple(1171, 2048, 106, 106, 256, 13, 20, 15, [0, 6, 4], true, false);

    /// A conservative parameter set giving 256 bits of security, optimized
    /// for speed.
    pub const EES1499EP1: EncryptionParams =
        EncryptionParams::simple(1499, 2048, 79, 79, 256, 13, 17, 19, [0, 6, 5], true, false);

    /// A parameter set giving 128 bits of security.
    pub const APR2011_439: EncryptionParams =
        EncryptionParams::simple(439, 2048, 146, 130, 128, 9, 32, 9, [0, 7, 101], true, false);

    /// Like [`APR2011_439`](Self::APR2011_439) but with a product-form
    /// private key and `f = 1 + 3*F`, the fastest 128-bit variant.
    pub const APR2011_439_FAST: EncryptionParams =
        EncryptionParams::product(439, 2048, 9, 8, 5, 130, 128, 9, 32, 9, [0, 7, 101], true);

    /// A parameter set giving 256 bits of security.
    pub const APR2011_743: EncryptionParams =
        EncryptionParams::simple(743, 2048, 248, 220, 256, 10, 27, 14, [0, 7, 105], false, false);

    /// Like [`APR2011_743`](Self::APR2011_743) but with a product-form
    /// private key and `f = 1 + 3*F`, the fastest 256-bit variant.
    pub const APR2011_743_FAST: EncryptionParams =
        EncryptionParams::product(743, 2048, 11, 11, 15, 220, 256, 10, 27, 14, [0, 7, 105], false);

    /// Constructs a simple-form parameter set.
    #[allow(clippy::too_many_arguments)]
    pub const fn simple(
        n: usize,
        q: i64,
        df: usize,
        dm0: usize,
        db: usize,
        c: usize,
        min_calls_r: usize,
        min_calls_mask: usize,
        oid: [u8; 3],
        sparse: bool,
        fast_fp: bool,
    ) -> Self {
        EncryptionParams {
            n,
            q,
            df,
            df1: 0,
            df2: 0,
            df3: 0,
            dr: df,
            dg: n / 3,
            dm0,
            db,
            c,
            min_calls_r,
            min_calls_mask,
            oid,
            sparse,
            fast_fp,
            poly_type: TernaryPolynomialType::Simple,
            llen: 1,
            max_msg_len_bytes: n * 3 / 2 / 8 - 1 - db / 8,
            buffer_len_bits: (n * 3 / 2 + 7) / 8 * 8,
            buffer_len_trits: n - 1,
            pk_len: db / 2,
            reserved: [0; 16],
        }
    }

    /// Constructs a product-form parameter set; product-form keys imply
    /// `f = 1 + 3*F`.
    #[allow(clippy::too_many_arguments)]
    pub const fn product(
        n: usize,
        q: i64,
        df1: usize,
        df2: usize,
        df3: usize,
        dm0: usize,
        db: usize,
        c: usize,
        min_calls_r: usize,
        min_calls_mask: usize,
        oid: [u8; 3],
        sparse: bool,
    ) -> Self {
        EncryptionParams {
            n,
            q,
            df: 0,
            df1,
            df2,
            df3,
            dr: 0,
            dg: n / 3,
            dm0,
            db,
            c,
            min_calls_r,
            min_calls_mask,
            oid,
            sparse,
            fast_fp: true,
            poly_type: TernaryPolynomialType::Product,
            llen: 1,
            max_msg_len_bytes: n * 3 / 2 / 8 - 1 - db / 8,
            buffer_len_bits: (n * 3 / 2 + 7) / 8 * 8,
            buffer_len_trits: n - 1,
            pk_len: db / 2,
            reserved: [0; 16],
        }
    }

    /// Serializes the parameter set: eight big-endian `u32` fields
    /// (N, q, df, db, dm0, c, minCallsR, minCallsMask), the three OID
    /// bytes, one sparse flag byte, and 16 reserved bytes.
    pub fn write_to(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(8 * 4 + 3 + 1 + 16);
        for v in [
            self.n as u32,
            self.q as u32,
            self.df as u32,
            self.db as u32,
            self.dm0 as u32,
            self.c as u32,
            self.min_calls_r as u32,
            self.min_calls_mask as u32,
        ] {
            out.extend_from_slice(&v.to_be_bytes());
        }
        out.extend_from_slice(&self.oid);
        out.push(u8::from(self.sparse));
        out.extend_from_slice(&self.reserved);
        out
    }

    /// Deserializes a simple-form parameter set written by
    /// [`write_to`](Self::write_to).
    pub fn read_from(data: &[u8]) -> Result<Self> {
        const LEN: usize = 8 * 4 + 3 + 1 + 16;
        if data.len() < LEN {
            return Err(Error::InvalidEncoding("parameter record too short"));
        }
        let mut fields = [0u32; 8];
        for (i, f) in fields.iter_mut().enumerate() {
            let mut buf = [0u8; 4];
            buf.copy_from_slice(&data[4 * i..4 * i + 4]);
            *f = u32::from_be_bytes(buf);
        }
        let mut oid = [0u8; 3];
        oid.copy_from_slice(&data[32..35]);
        let sparse = data[35] != 0;
        let mut reserved = [0u8; 16];
        reserved.copy_from_slice(&data[36..52]);

        let q = fields[1] as i64;
        if q < 4 || q & (q - 1) != 0 {
            return Err(Error::InvalidEncoding("modulus is not a power of two"));
        }
        let mut params = EncryptionParams::simple(
            fields[0] as usize,
            q,
            fields[2] as usize,
            fields[4] as usize,
            fields[3] as usize,
            fields[5] as usize,
            fields[6] as usize,
            fields[7] as usize,
            oid,
            sparse,
            false,
        );
        params.reserved = reserved;
        Ok(params)
    }
}
