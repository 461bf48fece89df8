//! Word-size modular arithmetic.
//!
//! This module provides [`NMod`], a runtime modulus that fits in a machine
//! word together with the precomputed data for division-free reduction of
//! one-, two- and three-word quantities. It is the reduction building block
//! of the MACHINE_WORD quotient rings and of the Kronecker substitution
//! kernels.

use std::fmt;

/// A machine-word modulus with a precomputed inverse.
///
/// Reduction uses the Möller–Granlund "division by invariant integers"
/// method: the modulus is shifted left by `norm` so that its top bit is
/// set, and `ninv = floor((2^128 - 1) / (n << norm)) - 2^64`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NMod {
    n: u64,
    ninv: u64,
    norm: u32,
}

impl NMod {
    /// Creates the reduction data for modulus `n`.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero.
    #[must_use]
    pub fn new(n: u64) -> Self {
        assert!(n != 0, "modulus cannot be zero");
        let norm = n.leading_zeros();
        let normed = n << norm;
        let ninv = (u128::MAX / u128::from(normed)) as u64;
        Self { n, ninv, norm }
    }

    /// Returns the modulus.
    #[must_use]
    pub const fn modulus(&self) -> u64 {
        self.n
    }

    /// Returns the precomputed inverse of the normalised modulus.
    #[must_use]
    pub const fn ninv(&self) -> u64 {
        self.ninv
    }

    /// Returns the normalisation shift.
    #[must_use]
    pub const fn norm(&self) -> u32 {
        self.norm
    }

    /// Divides the normalised two-word value `(u1, u0)` by `n << norm`,
    /// returning the (normalised) remainder. Requires `u1 < n << norm`.
    #[inline]
    fn rem_normalised(&self, u1: u64, u0: u64) -> u64 {
        let nn = self.n << self.norm;
        let p = u128::from(self.ninv) * u128::from(u1);
        let s = p.wrapping_add((u128::from(u1) << 64) | u128::from(u0));
        let q1 = (s >> 64) as u64;
        let q0 = s as u64;
        let mut r = u0.wrapping_sub(q1.wrapping_add(1).wrapping_mul(nn));
        if r > q0 {
            r = r.wrapping_add(nn);
        }
        if r < nn {
            r
        } else {
            r - nn
        }
    }

    #[inline]
    fn hi_bits(&self, x: u64) -> u64 {
        if self.norm == 0 {
            0
        } else {
            x >> (64 - self.norm)
        }
    }

    /// Reduces a single word.
    #[inline]
    #[must_use]
    pub fn red(&self, a: u64) -> u64 {
        if a < self.n {
            a
        } else {
            self.red2(0, a)
        }
    }

    /// Reduces the two-word value `hi * 2^64 + lo`.
    #[inline]
    #[must_use]
    pub fn red2(&self, hi: u64, lo: u64) -> u64 {
        let mut hi = hi;
        if hi >= self.n {
            let u1 = self.hi_bits(hi);
            let u0 = hi << self.norm;
            hi = self.rem_normalised(u1, u0) >> self.norm;
        }
        let u1 = (hi << self.norm) | self.hi_bits(lo);
        let u0 = lo << self.norm;
        self.rem_normalised(u1, u0) >> self.norm
    }

    /// Reduces the three-word value `hi * 2^128 + mid * 2^64 + lo`.
    #[inline]
    #[must_use]
    pub fn red3(&self, hi: u64, mid: u64, lo: u64) -> u64 {
        let t = self.red2(hi, mid);
        self.red2(t, lo)
    }

    /// Reduces a signed value into `[0, n)`.
    #[must_use]
    pub fn red_signed(&self, a: i64) -> u64 {
        let r = self.red(a.unsigned_abs());
        if a < 0 {
            self.neg(r)
        } else {
            r
        }
    }

    /// Modular addition of reduced operands.
    #[inline]
    #[must_use]
    pub fn add(&self, a: u64, b: u64) -> u64 {
        let neg_b = self.n - b;
        if a >= neg_b {
            a - neg_b
        } else {
            a + b
        }
    }

    /// Modular subtraction of reduced operands.
    #[inline]
    #[must_use]
    pub fn sub(&self, a: u64, b: u64) -> u64 {
        if a >= b {
            a - b
        } else {
            a.wrapping_sub(b).wrapping_add(self.n)
        }
    }

    /// Modular negation of a reduced operand.
    #[inline]
    #[must_use]
    pub fn neg(&self, a: u64) -> u64 {
        if a == 0 {
            0
        } else {
            self.n - a
        }
    }

    /// Modular multiplication of reduced operands.
    #[inline]
    #[must_use]
    pub fn mul(&self, a: u64, b: u64) -> u64 {
        let p = u128::from(a) * u128::from(b);
        self.red2((p >> 64) as u64, p as u64)
    }

    /// Computes `a^exp` using binary exponentiation.
    #[must_use]
    pub fn pow(&self, a: u64, mut exp: u64) -> u64 {
        let mut base = self.red(a);
        let mut result = self.red(1);

        while exp > 0 {
            if exp & 1 == 1 {
                result = self.mul(result, base);
            }
            base = self.mul(base, base);
            exp >>= 1;
        }

        result
    }

    /// Computes the modular inverse using the extended Euclidean algorithm.
    ///
    /// Returns `None` if the inverse doesn't exist (when gcd(a, n) != 1).
    #[must_use]
    pub fn inv(&self, a: u64) -> Option<u64> {
        if self.n == 1 {
            return Some(0);
        }
        let a = self.red(a);
        if a == 0 {
            return None;
        }

        let mut t = 0i128;
        let mut new_t = 1i128;
        let mut r = i128::from(self.n);
        let mut new_r = i128::from(a);

        while new_r != 0 {
            let quotient = r / new_r;
            (t, new_t) = (new_t, t - quotient * new_t);
            (r, new_r) = (new_r, r - quotient * new_r);
        }

        if r > 1 {
            return None; // Not coprime
        }

        let n = i128::from(self.n);
        Some(((t % n + n) % n) as u64)
    }
}

impl fmt::Debug for NMod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NMod({})", self.n)
    }
}

/// Word-size primes used in tests and benchmarks.
pub mod primes {
    /// 2^23 * 7 * 17 + 1 = 998244353
    pub const P998244353: u64 = 998_244_353;

    /// Largest prime below 2^63.
    pub const P63: u64 = 9_223_372_036_854_775_783;

    /// Largest prime below 2^64.
    pub const P64: u64 = 18_446_744_073_709_551_557;

    /// Large prime for general use: 2^61 - 1 (Mersenne prime)
    pub const MERSENNE_61: u64 = (1 << 61) - 1;
}
