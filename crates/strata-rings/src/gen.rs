//! A ring/element pair with operator overloading.
//!
//! [`Gen`] is a convenience handle over the dispatch layer: it remembers
//! its ring so that `&a + &b` works without passing the ring around. Both
//! operands of a binary operation must live in the same ring.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use std::sync::Arc;

use rand::Rng;

use crate::dispatch;
use crate::elem::{Elem, PolyBuf};
use crate::error::Result;
use crate::frac;
use crate::random;
use crate::ring::Ring;

/// An element together with its ring.
#[derive(Clone, Debug)]
pub struct Gen {
    ring: Arc<Ring>,
    elem: Elem,
}

impl Gen {
    /// The zero element of `ring`.
    #[must_use]
    pub fn new(ring: &Arc<Ring>) -> Self {
        Self {
            ring: Arc::clone(ring),
            elem: Elem::init(ring),
        }
    }

    /// Wraps an existing element.
    ///
    /// # Panics
    ///
    /// Panics if `elem` does not have the shape `ring` expects.
    #[must_use]
    pub fn from_elem(ring: &Arc<Ring>, elem: Elem) -> Self {
        assert!(elem.belongs_to(ring), "element does not belong to {ring}");
        Self {
            ring: Arc::clone(ring),
            elem,
        }
    }

    /// The image of `v` in `ring`.
    #[must_use]
    pub fn from_si(ring: &Arc<Ring>, v: i64) -> Self {
        Self::from_elem(ring, Elem::from_si(v, ring))
    }

    /// The identity of `ring`.
    #[must_use]
    pub fn one(ring: &Arc<Ring>) -> Self {
        Self::from_elem(ring, Elem::one_of(ring))
    }

    /// A polynomial with small integer coefficients, constant term first.
    #[must_use]
    pub fn from_coeffs_si(ring: &Arc<Ring>, coeffs: &[i64]) -> Self {
        Self::from_elem(ring, Elem::poly_from_si(coeffs, ring))
    }

    /// A random element; see [`random::randtest`].
    pub fn randtest<R: Rng + ?Sized>(ring: &Arc<Ring>, rng: &mut R, size: &[usize]) -> Self {
        Self::from_elem(ring, random::randtest(rng, size, ring))
    }

    /// The ring.
    #[must_use]
    pub fn ring(&self) -> &Arc<Ring> {
        &self.ring
    }

    /// The element.
    #[must_use]
    pub fn elem(&self) -> &Elem {
        &self.elem
    }

    /// Consumes the handle, returning the element.
    #[must_use]
    pub fn into_elem(self) -> Elem {
        self.elem
    }

    /// True for zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.elem.is_zero()
    }

    /// True for one.
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.elem.is_one(&self.ring)
    }

    /// Sets a polynomial coefficient.
    pub fn set_coeff_si(&mut self, index: usize, v: i64) {
        self.elem.set_coeff_si(index, v, &self.ring);
    }

    /// Copies the value of `other`.
    pub fn set(&mut self, other: &Gen) {
        self.assert_same_ring(other);
        self.elem.set(&other.elem, &self.ring);
    }

    /// Exchanges values with `other`.
    pub fn swap(&mut self, other: &mut Gen) {
        self.assert_same_ring(other);
        self.elem.swap(&mut other.elem);
    }

    fn assert_same_ring(&self, other: &Gen) {
        assert!(
            self.ring == other.ring,
            "ring mismatch: {} vs {}",
            self.ring,
            other.ring
        );
    }

    fn wrap(&self, elem: Elem) -> Gen {
        Gen {
            ring: Arc::clone(&self.ring),
            elem,
        }
    }

    /// Division with remainder, `(q, r)`.
    ///
    /// # Panics
    ///
    /// As for [`dispatch::divrem`].
    #[must_use]
    pub fn divrem(&self, other: &Gen) -> (Gen, Gen) {
        self.assert_same_ring(other);
        let mut q = Elem::init(&self.ring);
        let mut r = Elem::init(&self.ring);
        dispatch::divrem(&mut q, &mut r, &self.elem, &other.elem, &self.ring);
        (self.wrap(q), self.wrap(r))
    }

    /// Exact quotient.
    ///
    /// # Errors
    ///
    /// Fails if `other` is zero or does not divide `self`.
    pub fn divexact(&self, other: &Gen) -> Result<Gen> {
        self.assert_same_ring(other);
        let mut q = Elem::init(&self.ring);
        dispatch::try_divexact(&mut q, &self.elem, &other.elem, &self.ring)?;
        Ok(self.wrap(q))
    }

    /// Multiplicative inverse.
    ///
    /// # Errors
    ///
    /// Fails if `self` is not a unit.
    pub fn inv(&self) -> Result<Gen> {
        let mut r = Elem::init(&self.ring);
        dispatch::inv(&mut r, &self.elem, &self.ring)?;
        Ok(self.wrap(r))
    }

    /// Unit-normal greatest common divisor.
    #[must_use]
    pub fn gcd(&self, other: &Gen) -> Gen {
        self.assert_same_ring(other);
        let mut g = Elem::init(&self.ring);
        dispatch::gcd(&mut g, &self.elem, &other.elem, &self.ring);
        self.wrap(g)
    }

    /// `self^e`.
    #[must_use]
    pub fn pow(&self, e: u64) -> Gen {
        let mut r = Elem::init(&self.ring);
        dispatch::pow_ui(&mut r, &self.elem, e, &self.ring);
        self.wrap(r)
    }

    /// `self * other mod x^n`.
    #[must_use]
    pub fn mullow(&self, other: &Gen, n: usize) -> Gen {
        self.assert_same_ring(other);
        let mut r = Elem::init(&self.ring);
        dispatch::mullow(&mut r, &self.elem, &other.elem, n, &self.ring);
        self.wrap(r)
    }

    /// Puts a fraction in lowest terms.
    pub fn canonicalise(&mut self) {
        frac::frac_canonicalise(&mut self.elem, &self.ring);
    }

    /// The coefficients of a polynomial, constant term first.
    #[must_use]
    pub fn coeffs(&self) -> &[Elem] {
        self.elem.poly().coeffs()
    }

    /// Coefficient `i` as a handle in the coefficient ring.
    ///
    /// # Panics
    ///
    /// Panics if the ring is not a polynomial ring.
    #[must_use]
    pub fn coeff(&self, i: usize) -> Gen {
        let coeff = self.ring.coeff_ring().expect("polynomial ring");
        let c = self.elem.poly().get(i).cloned().unwrap_or_else(|| Elem::init(coeff));
        Gen {
            ring: Arc::clone(coeff),
            elem: c,
        }
    }

    /// Builds a polynomial from coefficient handles.
    ///
    /// # Panics
    ///
    /// Panics if a coefficient is not in the coefficient ring of `ring`.
    #[must_use]
    pub fn from_coeffs(ring: &Arc<Ring>, coeffs: Vec<Gen>) -> Self {
        let coeff = ring.coeff_ring().expect("polynomial ring");
        let elems = coeffs
            .into_iter()
            .map(|c| {
                assert!(c.ring == *coeff, "coefficient ring mismatch");
                c.elem
            })
            .collect();
        Self::from_elem(ring, Elem::Poly(PolyBuf::from_coeffs(elems)))
    }
}

impl PartialEq for Gen {
    fn eq(&self, other: &Self) -> bool {
        self.ring == other.ring && self.elem.equal(&other.elem, &self.ring)
    }
}

impl fmt::Display for Gen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.elem)
    }
}

impl Add for &Gen {
    type Output = Gen;

    fn add(self, rhs: &Gen) -> Gen {
        self.assert_same_ring(rhs);
        let mut r = Elem::init(&self.ring);
        dispatch::add(&mut r, &self.elem, &rhs.elem, &self.ring);
        self.wrap(r)
    }
}

impl Add for Gen {
    type Output = Gen;

    fn add(mut self, rhs: Gen) -> Gen {
        self += &rhs;
        self
    }
}

impl Sub for &Gen {
    type Output = Gen;

    fn sub(self, rhs: &Gen) -> Gen {
        self.assert_same_ring(rhs);
        let mut r = Elem::init(&self.ring);
        dispatch::sub(&mut r, &self.elem, &rhs.elem, &self.ring);
        self.wrap(r)
    }
}

impl Sub for Gen {
    type Output = Gen;

    fn sub(mut self, rhs: Gen) -> Gen {
        self -= &rhs;
        self
    }
}

impl Mul for &Gen {
    type Output = Gen;

    fn mul(self, rhs: &Gen) -> Gen {
        self.assert_same_ring(rhs);
        let mut r = Elem::init(&self.ring);
        dispatch::mul(&mut r, &self.elem, &rhs.elem, &self.ring);
        self.wrap(r)
    }
}

impl Mul for Gen {
    type Output = Gen;

    fn mul(mut self, rhs: Gen) -> Gen {
        self *= &rhs;
        self
    }
}

impl Neg for &Gen {
    type Output = Gen;

    fn neg(self) -> Gen {
        let mut r = Elem::init(&self.ring);
        dispatch::neg(&mut r, &self.elem, &self.ring);
        self.wrap(r)
    }
}

impl Neg for Gen {
    type Output = Gen;

    fn neg(mut self) -> Gen {
        dispatch::neg_assign(&mut self.elem, &self.ring);
        self
    }
}

impl AddAssign<&Gen> for Gen {
    fn add_assign(&mut self, rhs: &Gen) {
        self.assert_same_ring(rhs);
        dispatch::add_assign(&mut self.elem, &rhs.elem, &self.ring);
    }
}

impl SubAssign<&Gen> for Gen {
    fn sub_assign(&mut self, rhs: &Gen) {
        self.assert_same_ring(rhs);
        dispatch::sub_assign(&mut self.elem, &rhs.elem, &self.ring);
    }
}

impl MulAssign<&Gen> for Gen {
    fn mul_assign(&mut self, rhs: &Gen) {
        self.assert_same_ring(rhs);
        dispatch::mul_assign(&mut self.elem, &rhs.elem, &self.ring);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use strata_integers::Integer;

    #[test]
    fn test_residue_operators() {
        let z7 = Ring::integers_mod(&Integer::new(7));
        let a = Gen::from_si(&z7, 5);
        let b = Gen::from_si(&z7, 4);
        assert_eq!(&a + &b, Gen::from_si(&z7, 2));
        assert_eq!(&a * &b, Gen::from_si(&z7, 6));
        assert_eq!(-&a, Gen::from_si(&z7, 2));
        assert_eq!(a.inv().unwrap(), Gen::from_si(&z7, 3));
        assert_eq!(a.pow(6), Gen::one(&z7));
    }

    #[test]
    fn test_polynomial_operators() {
        let zx = Ring::polynomial(Ring::integer());
        let a = Gen::from_coeffs_si(&zx, &[1, 2, 3]);
        let x = Gen::from_coeffs_si(&zx, &[0, 1]);
        assert_eq!((&a * &x).to_string(), "[0, 1, 2, 3]");
        assert_eq!(a.mullow(&x, 2).to_string(), "[0, 1]");

        let mut acc = a.clone();
        acc -= &a;
        assert!(acc.is_zero());
        acc += &x;
        acc *= &x;
        assert_eq!(acc.to_string(), "[0, 0, 1]");

        let (q, r) = (&acc + &Gen::one(&zx)).divrem(&x);
        assert_eq!((q.to_string(), r.to_string()), ("[0, 1]".into(), "[1]".into()));
        assert_eq!(acc.divexact(&x).unwrap(), x);
        assert!(x.divexact(&acc).is_err());

        assert_eq!(a.coeff(2), Gen::from_si(zx.coeff_ring().unwrap(), 3));
        let rebuilt = Gen::from_coeffs(&zx, (0..3).map(|i| a.coeff(i)).collect());
        assert_eq!(rebuilt, a);
    }

    #[test]
    fn test_owned_operators_match_borrowed() {
        let ring = Ring::polynomial(Ring::words_mod(101));
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let a = Gen::randtest(&ring, &mut rng, &[6]);
        let b = Gen::randtest(&ring, &mut rng, &[6]);
        assert_eq!(a.clone() + b.clone(), &a + &b);
        assert_eq!(a.clone() - b.clone(), &a - &b);
        assert_eq!(a.clone() * b.clone(), &a * &b);
        assert_eq!(-a.clone(), -&a);
    }

    #[test]
    fn test_gcd_and_canonicalise() {
        let zx = Ring::polynomial(Ring::integer());
        let a = Gen::from_coeffs_si(&zx, &[-1, 0, 1]);
        let b = Gen::from_coeffs_si(&zx, &[1, 1]);
        assert_eq!(a.gcd(&b), b);

        let qx = Ring::fraction(zx.clone(), zx.clone());
        let mut f = Gen::from_elem(&qx, Elem::fraction(a.into_elem(), b.clone().into_elem()));
        f.canonicalise();
        assert_eq!(f.to_string(), "[-1, 1]/[1]");
    }

    #[test]
    fn test_equality_needs_same_ring() {
        let a = Gen::from_si(&Ring::integers_mod(&Integer::new(7)), 1);
        let b = Gen::from_si(&Ring::integers_mod(&Integer::new(11)), 1);
        assert_ne!(a, b);
    }

    #[test]
    #[should_panic(expected = "ring mismatch")]
    fn test_mixed_rings_panic() {
        let a = Gen::from_si(&Ring::integer(), 1);
        let b = Gen::from_si(&Ring::machine_word(), 1);
        let _ = &a + &b;
    }
}
