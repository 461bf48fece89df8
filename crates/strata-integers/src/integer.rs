//! Arbitrary precision integers.
//!
//! This module provides a wrapper around `dashu::IBig` with the
//! operations the INTEGER leaf ring needs: floor division, exact
//! division, modular inverses and random test values.

use dashu::base::{Abs, BitTest, Gcd, Signed as DashuSigned};
use dashu::integer::IBig;
use num_traits::{One, Zero};
use rand::Rng;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// An arbitrary precision integer.
///
/// This type wraps `dashu::IBig` and provides the operations
/// needed by the generic ring layer.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Integer(IBig);

impl Integer {
    /// Creates a new integer from an i64.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(IBig::from(value))
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.clone().abs())
    }

    /// Returns the sign: -1, 0, or 1.
    #[must_use]
    pub fn signum(&self) -> i8 {
        if self.0.is_zero() {
            0
        } else if DashuSigned::is_positive(&self.0) {
            1
        } else {
            -1
        }
    }

    /// Returns true if this integer is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        DashuSigned::is_negative(&self.0)
    }

    /// Returns the number of bits needed to represent the absolute value.
    #[must_use]
    pub fn bit_len(&self) -> usize {
        self.0.bit_len()
    }

    /// Computes the greatest common divisor. The result is never negative,
    /// and `gcd(0, b) = |b|`, so `gcd(0, 0) = 0`.
    #[must_use]
    pub fn gcd(&self, other: &Self) -> Self {
        if self.is_zero() {
            return other.abs();
        }
        if other.is_zero() {
            return self.abs();
        }
        Self(IBig::from(self.0.clone().gcd(other.0.clone())))
    }

    /// Floor division: returns `(q, r)` with `self = q * d + r` and `r`
    /// carrying the sign of `d`.
    ///
    /// # Panics
    ///
    /// Panics if `d` is zero.
    #[must_use]
    pub fn fdiv_qr(&self, d: &Self) -> (Self, Self) {
        assert!(!d.is_zero(), "division by zero");
        let mut q = &self.0 / &d.0;
        let mut r = &self.0 % &d.0;
        if !r.is_zero() && DashuSigned::is_negative(&r) != DashuSigned::is_negative(&d.0) {
            q -= IBig::ONE;
            r += &d.0;
        }
        (Self(q), Self(r))
    }

    /// Floor remainder. For a positive modulus the result lies in `[0, m)`.
    #[must_use]
    pub fn fdiv_r(&self, m: &Self) -> Self {
        self.fdiv_qr(m).1
    }

    /// Exact division. The caller guarantees that `d` divides `self`.
    #[must_use]
    pub fn divexact(&self, d: &Self) -> Self {
        debug_assert!((&self.0 % &d.0).is_zero(), "inexact division");
        Self(&self.0 / &d.0)
    }

    /// Returns true if `d` divides `self` exactly.
    #[must_use]
    pub fn is_divisible_by(&self, d: &Self) -> bool {
        if d.is_zero() {
            return self.is_zero();
        }
        (&self.0 % &d.0).is_zero()
    }

    /// Computes the inverse of `self` modulo `m`, reduced into `[0, |m|)`.
    ///
    /// Returns `None` when `gcd(self, m) != 1`.
    #[must_use]
    pub fn invmod(&self, m: &Self) -> Option<Self> {
        let m = m.abs();
        if m.is_zero() {
            return None;
        }
        if m.is_one() {
            return Some(Self::zero());
        }

        // Extended Euclidean algorithm, tracking only the coefficient of self
        let mut old_r = self.fdiv_r(&m);
        let mut r = m.clone();
        let mut old_s = Self::one();
        let mut s = Self::zero();

        while !r.is_zero() {
            let (q, rem) = old_r.fdiv_qr(&r);
            old_r = r;
            r = rem;

            let new_s = &old_s - &(&q * &s);
            old_s = s;
            s = new_s;
        }

        if old_r.is_one() {
            Some(old_s.fdiv_r(&m))
        } else {
            None
        }
    }

    /// Attempts to convert to a u64.
    ///
    /// Returns `None` if the value is negative or too large.
    #[must_use]
    pub fn to_u64(&self) -> Option<u64> {
        self.0.clone().try_into().ok()
    }

    /// Computes `self^exp`.
    #[must_use]
    pub fn pow(&self, exp: usize) -> Self {
        Self(self.0.pow(exp))
    }

    /// Returns `self * 2^bits`.
    #[must_use]
    pub fn shl(&self, bits: usize) -> Self {
        Self(&self.0 << bits)
    }

    /// Draws a random integer of at most `bits` bits with a random sign.
    ///
    /// The bit size itself is drawn uniformly from `0..=bits`, so small
    /// values and zero show up regularly.
    pub fn random_bits<G: Rng + ?Sized>(rng: &mut G, bits: usize) -> Self {
        let bits = rng.gen_range(0..=bits);
        let mut value = IBig::ZERO;
        let mut filled = 0;
        while filled < bits {
            let take = (bits - filled).min(64);
            let word = if take == 64 {
                rng.gen::<u64>()
            } else {
                rng.gen::<u64>() >> (64 - take)
            };
            value += IBig::from(word) << filled;
            filled += take;
        }
        if rng.gen_bool(0.5) {
            value = -value;
        }
        Self(value)
    }
}

impl Zero for Integer {
    fn zero() -> Self {
        Self(IBig::ZERO)
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl One for Integer {
    fn one() -> Self {
        Self(IBig::ONE)
    }

    fn is_one(&self) -> bool {
        self.0 == IBig::ONE
    }
}

impl fmt::Debug for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Integer({})", self.0)
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Arithmetic operations
impl Add for Integer {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Add<&Integer> for Integer {
    type Output = Self;

    fn add(self, rhs: &Integer) -> Self::Output {
        Self(self.0 + &rhs.0)
    }
}

impl Add for &Integer {
    type Output = Integer;

    fn add(self, rhs: Self) -> Self::Output {
        Integer(&self.0 + &rhs.0)
    }
}

impl Sub for Integer {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Sub<&Integer> for Integer {
    type Output = Self;

    fn sub(self, rhs: &Integer) -> Self::Output {
        Self(self.0 - &rhs.0)
    }
}

impl Sub for &Integer {
    type Output = Integer;

    fn sub(self, rhs: Self) -> Self::Output {
        Integer(&self.0 - &rhs.0)
    }
}

impl Mul for Integer {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl Mul<&Integer> for Integer {
    type Output = Self;

    fn mul(self, rhs: &Integer) -> Self::Output {
        Self(self.0 * &rhs.0)
    }
}

impl Mul for &Integer {
    type Output = Integer;

    fn mul(self, rhs: Self) -> Self::Output {
        Integer(&self.0 * &rhs.0)
    }
}

impl Neg for Integer {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Neg for &Integer {
    type Output = Integer;

    fn neg(self) -> Self::Output {
        Integer(-&self.0)
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<u64> for Integer {
    fn from(value: u64) -> Self {
        Self(IBig::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_basic_ops() {
        let a = Integer::new(10);
        let b = Integer::new(3);

        assert_eq!(&a + &b, Integer::new(13));
        assert_eq!(&a - &b, Integer::new(7));
        assert_eq!(&a * &b, Integer::new(30));
        assert_eq!(-&a, Integer::new(-10));
    }

    #[test]
    fn test_gcd() {
        let a = Integer::new(48);
        let b = Integer::new(-18);
        assert_eq!(a.gcd(&b), Integer::new(6));
        assert_eq!(Integer::new(-7).gcd(&Integer::new(-7)), Integer::new(7));
    }

    #[test]
    fn test_gcd_with_zero() {
        let zero = Integer::zero();
        assert_eq!(zero.gcd(&Integer::new(-5)), Integer::new(5));
        assert_eq!(Integer::new(-5).gcd(&zero), Integer::new(5));
        assert_eq!(zero.gcd(&zero), zero);
    }

    #[test]
    fn test_fdiv_qr_signs() {
        let cases = [(7, 2, 3, 1), (-7, 2, -4, 1), (7, -2, -4, -1), (-7, -2, 3, -1), (6, -3, -2, 0)];
        for (a, d, q, r) in cases {
            let (qq, rr) = Integer::new(a).fdiv_qr(&Integer::new(d));
            assert_eq!(qq, Integer::new(q), "quotient of {a} / {d}");
            assert_eq!(rr, Integer::new(r), "remainder of {a} / {d}");
        }
    }

    #[test]
    fn test_invmod() {
        let m = Integer::new(7);
        assert_eq!(Integer::new(3).invmod(&m), Some(Integer::new(5)));
        assert_eq!(Integer::new(-3).invmod(&m), Some(Integer::new(2)));
        assert_eq!(Integer::new(14).invmod(&m), None);
        assert_eq!(Integer::new(4).invmod(&Integer::new(8)), None);
    }

    #[test]
    fn test_divexact() {
        let a = Integer::new(-84);
        assert_eq!(a.divexact(&Integer::new(12)), Integer::new(-7));
        assert!(a.is_divisible_by(&Integer::new(-7)));
        assert!(!a.is_divisible_by(&Integer::new(5)));
    }

    #[test]
    fn test_random_bits_bound() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            let x = Integer::random_bits(&mut rng, 150);
            assert!(x.bit_len() <= 150);
        }
    }

    #[test]
    fn test_large_numbers() {
        let a = Integer::new(10).pow(29);
        assert_eq!(a.to_string(), "100000000000000000000000000000");
        assert_eq!(a.to_u64(), None);
        assert_eq!(Integer::new(2).pow(64), Integer::new(1).shl(64));
        assert_eq!((Integer::new(1).shl(64) - Integer::new(1)).to_u64(), Some(u64::MAX));
    }
}
