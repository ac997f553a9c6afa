//! Dense integer polynomials and their modular inverses.
//!
//! `IntegerPolynomial` is the workhorse representation: a fixed-length
//! coefficient vector with schoolbook multiplication, coefficient-wise
//! reductions, and the three inversion algorithms the NTRU schemes rely on
//! (modulo 2, modulo a power of two via Hensel lifting, and modulo 3).

use zeroize::Zeroize;

/// A polynomial in `Z[X]/(X^N - 1)` with `i64` coefficients.
///
/// `coeffs[i]` is the coefficient of `X^i`. The length is fixed at
/// construction; all operations on two polynomials require equal lengths.
#[derive(Debug, Clone, PartialEq, Eq, Zeroize)]
pub struct IntegerPolynomial {
    /// The coefficient vector.
    pub coeffs: Vec<i64>,
}

impl IntegerPolynomial {
    /// Creates a zero polynomial with `n` coefficients.
    pub fn new(n: usize) -> Self {
        IntegerPolynomial {
            coeffs: vec![0; n],
        }
    }

    /// Creates a polynomial from a coefficient vector.
    pub fn from_coeffs(coeffs: Vec<i64>) -> Self {
        IntegerPolynomial { coeffs }
    }

    /// Creates the constant polynomial `1` with `n` coefficients.
    pub fn one(n: usize) -> Self {
        let mut p = Self::new(n);
        p.coeffs[0] = 1;
        p
    }

    /// Number of coefficients.
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    /// Whether the polynomial has no coefficients.
    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Multiplies by `b`, folding degrees modulo `X^N - 1`.
    ///
    /// Schoolbook, `O(N^2)`: the output coefficient `k` is the sum of all
    /// `a[i]*b[j]` with `i+j = k (mod N)`.
    pub fn mult(&self, b: &IntegerPolynomial) -> IntegerPolynomial {
        let n = self.coeffs.len();
        debug_assert_eq!(n, b.coeffs.len());
        let mut c = vec![0i64; n];
        for i in 0..n {
            let ai = self.coeffs[i];
            if ai == 0 {
                continue;
            }
            for j in 0..n {
                let mut k = i + j;
                if k >= n {
                    k -= n;
                }
                c[k] += ai * b.coeffs[j];
            }
        }
        IntegerPolynomial::from_coeffs(c)
    }

    /// Multiplies by `b` and reduces all coefficients into `[0, modulus)`.
    pub fn mult_mod(&self, b: &IntegerPolynomial, modulus: i64) -> IntegerPolynomial {
        let mut c = self.mult(b);
        c.mod_positive(modulus);
        c
    }

    /// Adds `b` in place.
    pub fn add(&mut self, b: &IntegerPolynomial) {
        debug_assert_eq!(self.coeffs.len(), b.coeffs.len());
        for (c, &v) in self.coeffs.iter_mut().zip(&b.coeffs) {
            *c += v;
        }
    }

    /// Adds `b` in place, then reduces all coefficients into `[0, modulus)`.
    pub fn add_mod(&mut self, b: &IntegerPolynomial, modulus: i64) {
        self.add(b);
        self.mod_positive(modulus);
    }

    /// Subtracts `b` in place.
    pub fn sub(&mut self, b: &IntegerPolynomial) {
        debug_assert_eq!(self.coeffs.len(), b.coeffs.len());
        for (c, &v) in self.coeffs.iter_mut().zip(&b.coeffs) {
            *c -= v;
        }
    }

    /// Subtracts `b` in place, then reduces all coefficients into
    /// `[0, modulus)`.
    pub fn sub_mod(&mut self, b: &IntegerPolynomial, modulus: i64) {
        self.sub(b);
        self.mod_positive(modulus);
    }

    /// Multiplies all coefficients by a scalar.
    pub fn mult_scalar(&mut self, factor: i64) {
        for c in &mut self.coeffs {
            *c *= factor;
        }
    }

    /// Multiplies all coefficients by 3 and reduces into `[0, modulus)`.
    ///
    /// Used when assembling the public key `h = 3*g*fq (mod q)`.
    pub fn mult3_mod(&mut self, modulus: i64) {
        for c in &mut self.coeffs {
            *c = (*c * 3).rem_euclid(modulus);
        }
    }

    /// Reduces all coefficients into `[0, modulus)`.
    pub fn mod_positive(&mut self, modulus: i64) {
        for c in &mut self.coeffs {
            *c = c.rem_euclid(modulus);
        }
    }

    /// Adds `modulus` to every negative coefficient.
    ///
    /// Converts representatives in `(-modulus, modulus)` into `[0, modulus)`;
    /// unlike [`mod_positive`](Self::mod_positive) it never reduces
    /// coefficients that are already non-negative.
    pub fn ensure_positive(&mut self, modulus: i64) {
        for c in &mut self.coeffs {
            if *c < 0 {
                *c += modulus;
            }
        }
    }

    /// Shifts all coefficients into the centered range `(-m/2, m/2]`.
    pub fn center0(&mut self, modulus: i64) {
        for c in &mut self.coeffs {
            let mut r = c.rem_euclid(modulus);
            if r > modulus / 2 {
                r -= modulus;
            }
            *c = r;
        }
    }

    /// Full reduction into the centered range `(-m/2, m/2]`.
    ///
    /// Same range as [`center0`](Self::center0); kept as a separate entry
    /// point so call sites can state whether they expect near-range or
    /// arbitrary input.
    pub fn mod_center(&mut self, modulus: i64) {
        self.center0(modulus);
    }

    /// Reduces all coefficients modulo 3 into the centered set `{-1, 0, 1}`.
    pub fn mod3(&mut self) {
        self.center0(3);
    }

    /// Counts the coefficients equal to `value`.
    pub fn count(&self, value: i64) -> usize {
        self.coeffs.iter().filter(|&&c| c == value).count()
    }

    /// Index of the highest nonzero coefficient, or 0 for the zero
    /// polynomial.
    pub fn degree(&self) -> usize {
        let mut d = self.coeffs.len() - 1;
        while d > 0 && self.coeffs[d] == 0 {
            d -= 1;
        }
        d
    }

    /// Sum of the squares of all coefficients.
    pub fn square_sum(&self) -> i64 {
        self.coeffs.iter().map(|&c| c * c).sum()
    }

    /// Multiplies by `X`: rotates all coefficients up one position.
    pub fn rotate1(&mut self) {
        self.coeffs.rotate_right(1);
    }

    /// Computes the inverse modulo 2, or `None` if the polynomial is not
    /// invertible in `GF(2)[X]/(X^N - 1)`.
    ///
    /// Almost Inverse Algorithm: work on arrays of length `N+1`, divide `f`
    /// by `X` whenever its constant term vanishes while counting the shifts
    /// in `k`, and undo the accumulated shift with a final rotation by
    /// `X^{-k}`.
    pub fn invert_f2(&self) -> Option<IntegerPolynomial> {
        let n = self.coeffs.len();
        let mut k = 0usize;
        let mut b = vec![0i64; n + 1];
        b[0] = 1;
        let mut c = vec![0i64; n + 1];
        let mut f = vec![0i64; n + 1];
        for i in 0..n {
            f[i] = self.coeffs[i].rem_euclid(2);
        }
        // g(X) = X^N - 1; -1 = 1 in GF(2)
        let mut g = vec![0i64; n + 1];
        g[0] = 1;
        g[n] = 1;

        loop {
            while f[0] == 0 {
                // f(X) = f(X) / X, c(X) = c(X) * X
                for i in 1..=n {
                    f[i - 1] = f[i];
                    c[n + 1 - i] = c[n - i];
                }
                f[n] = 0;
                c[0] = 0;
                k += 1;
                if f.iter().all(|&x| x == 0) {
                    return None;
                }
            }
            if is_constant(&f) {
                break;
            }
            if degree(&f) < degree(&g) {
                std::mem::swap(&mut f, &mut g);
                std::mem::swap(&mut b, &mut c);
            }
            for i in 0..=n {
                f[i] = (f[i] + g[i]) % 2;
                b[i] = (b[i] + c[i]) % 2;
            }
        }

        if b[n] != 0 {
            return None;
        }
        // inverse = X^{N-k} * b(X)
        let mut inv = IntegerPolynomial::new(n);
        let k = k % n;
        for i in (0..n).rev() {
            let j = if i < k { i + n - k } else { i - k };
            inv.coeffs[j] = b[i];
        }
        Some(inv)
    }

    /// Computes the inverse modulo `q`, where `q` is a power of two, or
    /// `None` if the polynomial is not invertible modulo 2.
    ///
    /// The inverse modulo 2 is lifted with the Newton iteration
    /// `Fq <- Fq*(2 - f*Fq) (mod v)` while `v` squares from 4 upwards; each
    /// step doubles the number of correct 2-adic digits, so the loop ends as
    /// soon as `v >= q` and a final reduction modulo `q` remains.
    pub fn invert_fq(&self, q: i64) -> Option<IntegerPolynomial> {
        debug_assert!(q > 0 && q & (q - 1) == 0, "q must be a power of two");
        let mut fq = self.invert_f2()?;
        let mut v = 2i64;
        while v < q {
            v *= v;
            let mut next = fq.clone();
            for coeff in &mut next.coeffs {
                *coeff = (*coeff * 2).rem_euclid(v);
            }
            let square = self.mult_mod(&fq, v).mult_mod(&fq, v);
            next.sub_mod(&square, v);
            fq = next;
        }
        fq.mod_positive(q);
        Some(fq)
    }

    /// Computes the inverse modulo 3, or `None` if the polynomial is not
    /// invertible in `GF(3)[X]/(X^N - 1)`.
    ///
    /// Same Almost Inverse structure as [`invert_f2`](Self::invert_f2) with
    /// coefficients kept centered in `{-1, 0, 1}`; the loop exits when `f`
    /// collapses to `+1` or `-1`, and the sign is folded into the result.
    pub fn invert_f3(&self) -> Option<IntegerPolynomial> {
        let n = self.coeffs.len();
        let mut k = 0usize;
        let mut b = vec![0i64; n + 1];
        b[0] = 1;
        let mut c = vec![0i64; n + 1];
        let mut f = vec![0i64; n + 1];
        for i in 0..n {
            f[i] = center3(self.coeffs[i]);
        }
        // g(X) = X^N - 1
        let mut g = vec![0i64; n + 1];
        g[0] = -1;
        g[n] = 1;

        loop {
            while f[0] == 0 {
                for i in 1..=n {
                    f[i - 1] = f[i];
                    c[n + 1 - i] = c[n - i];
                }
                f[n] = 0;
                c[0] = 0;
                k += 1;
                if f.iter().all(|&x| x == 0) {
                    return None;
                }
            }
            if is_constant(&f) {
                break;
            }
            if degree(&f) < degree(&g) {
                std::mem::swap(&mut f, &mut g);
                std::mem::swap(&mut b, &mut c);
            }
            if f[0] == g[0] {
                for i in 0..=n {
                    f[i] = center3(f[i] - g[i]);
                    b[i] = center3(b[i] - c[i]);
                }
            } else {
                for i in 0..=n {
                    f[i] = center3(f[i] + g[i]);
                    b[i] = center3(b[i] + c[i]);
                }
            }
        }

        if b[n] != 0 {
            return None;
        }
        // inverse = f[0] * X^{N-k} * b(X); f[0] is the +-1 unit left over
        let sign = f[0];
        let mut inv = IntegerPolynomial::new(n);
        let k = k % n;
        for i in (0..n).rev() {
            let j = if i < k { i + n - k } else { i - k };
            inv.coeffs[j] = center3(sign * b[i]);
        }
        Some(inv)
    }
}

/// Centers a value modulo 3 into `{-1, 0, 1}`.
fn center3(v: i64) -> i64 {
    let mut r = v % 3;
    if r > 1 {
        r -= 3;
    } else if r < -1 {
        r += 3;
    }
    r
}

/// Degree of a working array: index of the highest nonzero entry.
fn degree(p: &[i64]) -> usize {
    let mut d = p.len() - 1;
    while d > 0 && p[d] == 0 {
        d -= 1;
    }
    d
}

/// Whether a working array is a nonzero constant.
fn is_constant(p: &[i64]) -> bool {
    p[0] != 0 && p[1..].iter().all(|&x| x == 0)
}
