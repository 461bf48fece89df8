//! Fraction arithmetic.
//!
//! Fractions are not reduced automatically. Results of `add`, `mul` and
//! friends are correct but may carry common factors until
//! [`frac_canonicalise`] is called.
//!
//! When the denominator ring is the numerator's coefficient ring,
//! numerator-by-denominator products are scalar multiplications.

use crate::content;
use crate::dispatch;
use crate::elem::{Elem, FracElem};
use crate::error::{ArithError, Result};
use crate::fatal;
use crate::ring::Ring;

fn parts(ring: &Ring) -> (&Ring, &Ring) {
    match ring {
        Ring::Fraction { numer, denom } => (numer, denom),
        _ => unreachable!("not a fraction ring: {ring}"),
    }
}

/// `res = n * d` for a numerator `n` and a denominator `d`.
fn mul_num_den(res: &mut Elem, n: &Elem, d: &Elem, ring: &Ring) {
    let (numer, _) = parts(ring);
    if ring.is_mixed_fraction() {
        dispatch::scalar_mul(res, n, d, numer);
    } else {
        dispatch::mul(res, n, d, numer);
    }
}

fn add_or_sub(res: &mut Elem, a: &FracElem, b: &FracElem, ring: &Ring, subtract: bool) {
    let (numer, denom) = parts(ring);
    let combine: fn(&mut Elem, &Elem, &Elem, &Ring) =
        if subtract { dispatch::sub } else { dispatch::add };

    if a.den().equal(b.den(), denom) {
        let f = res.frac_mut(ring);
        combine(f.num_mut(), a.num(), b.num(), numer);
        f.den_mut().clone_from(a.den());
        return;
    }

    let mut t = Elem::init(numer);
    let mut u = Elem::init(numer);
    mul_num_den(&mut t, a.num(), b.den(), ring);
    mul_num_den(&mut u, b.num(), a.den(), ring);
    let f = res.frac_mut(ring);
    combine(f.num_mut(), &t, &u, numer);
    dispatch::mul(f.den_mut(), a.den(), b.den(), denom);
}

/// `res = a + b`.
pub(crate) fn add(res: &mut Elem, a: &FracElem, b: &FracElem, ring: &Ring) {
    add_or_sub(res, a, b, ring, false);
}

/// `res = a - b`.
pub(crate) fn sub(res: &mut Elem, a: &FracElem, b: &FracElem, ring: &Ring) {
    add_or_sub(res, a, b, ring, true);
}

/// `res = a * b`.
pub(crate) fn mul(res: &mut Elem, a: &FracElem, b: &FracElem, ring: &Ring) {
    let (numer, denom) = parts(ring);
    let f = res.frac_mut(ring);
    dispatch::mul(f.num_mut(), a.num(), b.num(), numer);
    dispatch::mul(f.den_mut(), a.den(), b.den(), denom);
}

/// `res = a / b` when numerators and denominators share a ring.
pub(crate) fn div(res: &mut Elem, a: &FracElem, b: &FracElem, ring: &Ring) -> Result<()> {
    let (numer, _) = parts(ring);
    if b.num().is_zero() {
        return Err(ArithError::DivisionByZero(ring.to_string()));
    }
    let f = res.frac_mut(ring);
    dispatch::mul(f.num_mut(), a.num(), b.den(), numer);
    dispatch::mul(f.den_mut(), a.den(), b.num(), numer);
    Ok(())
}

/// `a.num * b.den == b.num * a.den`.
pub(crate) fn equal(a: &FracElem, b: &FracElem, ring: &Ring) -> bool {
    let (numer, _) = parts(ring);
    let mut t = Elem::init(numer);
    let mut u = Elem::init(numer);
    mul_num_den(&mut t, a.num(), b.den(), ring);
    mul_num_den(&mut u, b.num(), a.den(), ring);
    t.equal(&u, numer)
}

/// Puts a fraction in lowest terms.
///
/// The gcd of numerator and denominator is divided out, then both are
/// scaled by a unit so the denominator is unit-normal: positive over the
/// integers, monic over a field. Zero becomes `0 / 1`.
///
/// # Panics
///
/// Panics on a zero denominator.
pub fn frac_canonicalise(x: &mut Elem, ring: &Ring) {
    let Ring::Fraction { numer, denom } = ring else {
        fatal::not_implemented("frac_canonicalise", ring)
    };
    let f = x.frac_mut(ring);
    let (num, den) = f.parts_mut();
    assert!(!den.is_zero(), "zero denominator");
    if num.is_zero() {
        den.one(denom);
        return;
    }

    let mut g = Elem::init(denom);
    if ring.is_mixed_fraction() {
        let mut c = Elem::init(denom);
        content::content_recursive(&mut c, num, denom, numer);
        dispatch::gcd(&mut g, &c, den, denom);
        if !g.is_one(denom) {
            content::div_content_recursive(num, &g, denom, numer);
            dispatch::divexact_assign(den, &g, denom);
        }
    } else {
        dispatch::gcd(&mut g, num, den, numer);
        if !g.is_one(numer) {
            dispatch::divexact_assign(num, &g, numer);
            dispatch::divexact_assign(den, &g, numer);
        }
    }

    if let Some(u) = content::normaliser(den, denom) {
        content::scale_innermost(den, &u, denom);
        content::scale_innermost(num, &u, numer);
    }
}
