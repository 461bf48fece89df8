//! Content extraction and polynomial gcd.
//!
//! The content of an element of a polynomial tower, relative to some ring
//! `R` further down the tower, is the gcd of all its coefficients that live
//! in `R`. Contents are unit-normal: non-negative over the integers, one
//! for any non-zero element of a field, `gcd(x, n)` in Z/nZ, and with a
//! unit-normal innermost leading coefficient over a polynomial ring.
//!
//! For every element `x`, dividing by the content and multiplying back
//! gives `x` again.

use tracing::trace;

use crate::dispatch;
use crate::elem::{Elem, PolyBuf};
use crate::fatal;
use crate::poly;
use crate::ring::Ring;

/// gcd used to combine contents. Fields have no interesting gcd, so any
/// non-zero content there is one.
fn content_gcd(res: &mut Elem, a: &Elem, b: &Elem, ring: &Ring) {
    match ring {
        Ring::Fraction { .. } if !ring.is_mixed_fraction() => {
            if a.is_zero() && b.is_zero() {
                res.zero(ring);
            } else {
                res.one(ring);
            }
        }
        _ => dispatch::gcd(res, a, b, ring),
    }
}

/// Sets `cont` to the content of `obj` with respect to `cont_ring`.
///
/// `obj_ring` must be `cont_ring` itself or a polynomial tower over it. The
/// content of zero is zero.
pub fn content_recursive(cont: &mut Elem, obj: &Elem, cont_ring: &Ring, obj_ring: &Ring) {
    if obj_ring == cont_ring {
        unit_normal(cont, obj, cont_ring);
        return;
    }
    let Ring::Polynomial { coeff } = obj_ring else {
        fatal::not_implemented("content_recursive", obj_ring)
    };
    trace!(len = obj.poly().len(), ring = %obj_ring, "content recursion");

    cont.zero(cont_ring);
    let mut c = Elem::init(cont_ring);
    let mut g = Elem::init(cont_ring);
    for x in obj.poly().coeffs() {
        content_recursive(&mut c, x, cont_ring, coeff);
        content_gcd(&mut g, cont, &c, cont_ring);
        cont.swap(&mut g);
        if cont.is_one(cont_ring) {
            break;
        }
    }
}

/// Divides every coefficient of `obj` living in `cont_ring` by `cont`,
/// which must divide all of them. A zero or unit content leaves `obj`
/// unchanged.
pub fn div_content_recursive(obj: &mut Elem, cont: &Elem, cont_ring: &Ring, obj_ring: &Ring) {
    if cont.is_zero() || cont.is_one(cont_ring) {
        return;
    }
    divide_through(obj, cont, cont_ring, obj_ring);
}

fn divide_through(obj: &mut Elem, cont: &Elem, cont_ring: &Ring, obj_ring: &Ring) {
    if obj_ring == cont_ring {
        dispatch::divexact_assign(obj, cont, cont_ring);
        return;
    }
    let Ring::Polynomial { coeff } = obj_ring else {
        fatal::not_implemented("div_content_recursive", obj_ring)
    };
    let buf = obj.poly_mut();
    for c in buf.coeffs_mut() {
        divide_through(c, cont, cont_ring, coeff);
    }
    buf.normalise();
}

/// Multiplies every coefficient of `obj` living in `cont_ring` by `cont`.
pub fn mul_content_recursive(obj: &mut Elem, cont: &Elem, cont_ring: &Ring, obj_ring: &Ring) {
    if obj_ring == cont_ring {
        dispatch::mul_assign(obj, cont, cont_ring);
        return;
    }
    let Ring::Polynomial { coeff } = obj_ring else {
        fatal::not_implemented("mul_content_recursive", obj_ring)
    };
    let buf = obj.poly_mut();
    for c in buf.coeffs_mut() {
        mul_content_recursive(c, cont, cont_ring, coeff);
    }
    buf.normalise();
}

/// A unit `u` such that `x * u` is unit-normal, or `None` if `x` already
/// is or no such unit is known.
///
/// For polynomials the unit normalises the innermost leading coefficient
/// and lives in the innermost non-polynomial ring.
pub(crate) fn normaliser(x: &Elem, ring: &Ring) -> Option<Elem> {
    match ring {
        Ring::Polynomial { coeff } => x.poly().lead().and_then(|l| normaliser(l, coeff)),
        Ring::Integer => x.integer().is_negative().then(|| Elem::from_si(-1, ring)),
        Ring::Quotient { base, .. } if matches!(**base, Ring::Integer | Ring::MachineWord) => {
            invert_unless_one(x, ring)
        }
        Ring::Fraction { .. } if !ring.is_mixed_fraction() => invert_unless_one(x, ring),
        _ => None,
    }
}

fn invert_unless_one(x: &Elem, ring: &Ring) -> Option<Elem> {
    if x.is_zero() || x.is_one(ring) {
        return None;
    }
    let mut u = Elem::init(ring);
    dispatch::inv(&mut u, x, ring).ok()?;
    Some(u)
}

/// Multiplies every innermost scalar of `x` by `u`.
pub(crate) fn scale_innermost(x: &mut Elem, u: &Elem, ring: &Ring) {
    match ring {
        Ring::Polynomial { coeff } => {
            let buf = x.poly_mut();
            for c in buf.coeffs_mut() {
                scale_innermost(c, u, coeff);
            }
            buf.normalise();
        }
        _ => dispatch::mul_assign(x, u, ring),
    }
}

/// Sets `res` to the unit-normal associate of `x`.
pub(crate) fn unit_normal(res: &mut Elem, x: &Elem, ring: &Ring) {
    match ring {
        Ring::Integer => *res = Elem::Integer(x.integer().abs()),
        Ring::Quotient { base, modulus, .. } if matches!(**base, Ring::Integer) => {
            let m = modulus.integer();
            *res = Elem::Integer(x.integer().gcd(m).fdiv_r(m));
        }
        Ring::Quotient { base, modulus, .. } if matches!(**base, Ring::MachineWord) => {
            let n = modulus.word();
            *res = Elem::Word(dispatch::word_gcd(x.word(), n) % n);
        }
        Ring::Fraction { .. } if !ring.is_mixed_fraction() => {
            if x.is_zero() {
                res.zero(ring);
            } else {
                res.one(ring);
            }
        }
        Ring::Polynomial { .. } => {
            res.clone_from(x);
            if let Some(u) = normaliser(x, ring) {
                scale_innermost(res, &u, ring);
            }
        }
        _ => res.clone_from(x),
    }
}

/// gcd of two non-zero polynomials over a gcd domain by the primitive
/// pseudo-remainder sequence. The result is unit-normal.
pub(crate) fn poly_gcd(res: &mut Elem, a: &Elem, b: &Elem, ring: &Ring) {
    let Ring::Polynomial { coeff } = ring else {
        unreachable!("poly_gcd over {ring}")
    };
    debug_assert!(!a.is_zero() && !b.is_zero(), "zero operand reached poly_gcd");

    let mut ca = Elem::init(coeff);
    let mut cb = Elem::init(coeff);
    content_recursive(&mut ca, a, coeff, ring);
    content_recursive(&mut cb, b, coeff, ring);
    let mut g = Elem::init(coeff);
    content_gcd(&mut g, &ca, &cb, coeff);

    let mut pa = a.clone();
    let mut pb = b.clone();
    div_content_recursive(&mut pa, &ca, coeff, ring);
    div_content_recursive(&mut pb, &cb, coeff, ring);
    if pa.poly().len() < pb.poly().len() {
        pa.swap(&mut pb);
    }

    let mut steps = 0usize;
    loop {
        let r = poly::poly_pseudo_rem(pa.poly().coeffs(), pb.poly().coeffs(), coeff);
        steps += 1;
        if r.is_empty() {
            break;
        }
        if r.len() == 1 {
            pb.one(ring);
            break;
        }
        let mut r = Elem::Poly(PolyBuf::from_coeffs(r));
        let mut cr = Elem::init(coeff);
        content_recursive(&mut cr, &r, coeff, ring);
        div_content_recursive(&mut r, &cr, coeff, ring);
        pa = std::mem::replace(&mut pb, r);
    }
    trace!(steps, degree = pb.poly().len().saturating_sub(1), "primitive remainder sequence");

    let mut h = Elem::init(ring);
    unit_normal(&mut h, &pb, ring);
    dispatch::scalar_mul(res, &h, &g, ring);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use strata_integers::Integer;

    fn zx() -> Arc<Ring> {
        Ring::polynomial(Ring::integer())
    }

    fn p(coeffs: &[i64], ring: &Ring) -> Elem {
        Elem::poly_from_si(coeffs, ring)
    }

    fn assert_content_roundtrip(x: &Elem, cont_ring: &Ring, obj_ring: &Ring) -> Elem {
        let mut c = Elem::init(cont_ring);
        content_recursive(&mut c, x, cont_ring, obj_ring);
        let mut y = x.clone();
        div_content_recursive(&mut y, &c, cont_ring, obj_ring);
        let mut back = y.clone();
        mul_content_recursive(&mut back, &c, cont_ring, obj_ring);
        assert!(back.equal(x, obj_ring), "{x} / {c} = {y}");
        c
    }

    #[test]
    fn test_integer_polynomial_content() {
        let ring = zx();
        let z = Ring::integer();
        let x = p(&[6, -4, 10], &ring);
        let c = assert_content_roundtrip(&x, &z, &ring);
        assert_eq!(c, Elem::from_si(2, &z));

        let mut y = x.clone();
        div_content_recursive(&mut y, &c, &z, &ring);
        assert_eq!(y.to_string(), "[3, -2, 5]");

        // Contents are non-negative even when every coefficient is negative
        let c = assert_content_roundtrip(&p(&[-3, -9], &ring), &z, &ring);
        assert_eq!(c, Elem::from_si(3, &z));

        let c = assert_content_roundtrip(&Elem::init(&ring), &z, &ring);
        assert!(c.is_zero());
    }

    #[test]
    fn test_content_with_zero_coefficients() {
        let ring = zx();
        let z = Ring::integer();

        // 3x
        let c = assert_content_roundtrip(&p(&[0, 3], &ring), &z, &ring);
        assert_eq!(c, Elem::from_si(3, &z));

        // 2 + 4x^2
        let c = assert_content_roundtrip(&p(&[2, 0, 4], &ring), &z, &ring);
        assert_eq!(c, Elem::from_si(2, &z));

        let x = p(&[0, 0, -5, 0, 10], &ring);
        let c = assert_content_roundtrip(&x, &z, &ring);
        assert_eq!(c, Elem::from_si(5, &z));
        let mut y = x.clone();
        div_content_recursive(&mut y, &c, &z, &ring);
        assert_eq!(y.to_string(), "[0, 0, -1, 0, 2]");

        // y(x + 1) has a zero constant coefficient in Z[x]
        let zxy = Ring::polynomial(ring.clone());
        let mut x = Elem::init(&zxy);
        x.poly_mut().load(vec![Elem::init(&ring), p(&[1, 1], &ring)]);
        let c = assert_content_roundtrip(&x, &ring, &zxy);
        assert_eq!(c.to_string(), "[1, 1]");

        let r = Ring::words_mod(12);
        let ring = Ring::polynomial(r.clone());
        let c = assert_content_roundtrip(&p(&[0, 8], &ring), &r, &ring);
        assert_eq!(c, Elem::Word(4));
    }

    #[test]
    fn test_bivariate_content() {
        let z = Ring::integer();
        let zx = zx();
        let zxy = Ring::polynomial(zx.clone());

        // (2 + 2x) + (4x + 4x^2) y
        let mut x = Elem::init(&zxy);
        let buf = x.poly_mut();
        buf.load(vec![p(&[2, 2], &zx), p(&[0, 4, 4], &zx)]);

        let c = assert_content_roundtrip(&x, &z, &zxy);
        assert_eq!(c, Elem::from_si(2, &z));

        let c = assert_content_roundtrip(&x, &zx, &zxy);
        assert_eq!(c.to_string(), "[2, 2]");
        let mut y = x.clone();
        div_content_recursive(&mut y, &c, &zx, &zxy);
        assert_eq!(y.to_string(), "[[1], [0, 2]]");
    }

    #[test]
    fn test_residue_content() {
        let r = Ring::words_mod(12);
        let ring = Ring::polynomial(r.clone());
        let c = assert_content_roundtrip(&p(&[4, 8], &ring), &r, &ring);
        assert_eq!(c, Elem::Word(4));

        let r = Ring::integers_mod(&Integer::new(7));
        let ring = Ring::polynomial(r.clone());
        let c = assert_content_roundtrip(&p(&[3, 5], &ring), &r, &ring);
        assert!(c.is_one(&r));
    }

    #[test]
    fn test_rational_content_is_one() {
        let z = Ring::integer();
        let qq = Ring::fraction(z.clone(), z.clone());
        let ring = Ring::polynomial(qq.clone());
        let x = Elem::Poly(PolyBuf::from_coeffs(vec![
            Elem::fraction(Elem::from_si(1, &z), Elem::from_si(2, &z)),
            Elem::fraction(Elem::from_si(3, &z), Elem::from_si(4, &z)),
        ]));
        let c = assert_content_roundtrip(&x, &qq, &ring);
        assert!(c.is_one(&qq));
    }

    #[test]
    fn test_integer_polynomial_gcd() {
        let ring = zx();
        let mut g = Elem::init(&ring);

        // 6(x + 1)(x - 2) and 4(x + 1)(x + 3)
        dispatch::gcd(&mut g, &p(&[-12, -6, 6], &ring), &p(&[12, 16, 4], &ring), &ring);
        assert_eq!(g.to_string(), "[2, 2]");

        dispatch::gcd(&mut g, &p(&[0, 1], &ring), &p(&[1, 1], &ring), &ring);
        assert!(g.is_one(&ring));

        dispatch::gcd(&mut g, &Elem::init(&ring), &p(&[-2, -4], &ring), &ring);
        assert_eq!(g.to_string(), "[2, 4]");
    }

    #[test]
    fn test_residue_polynomial_gcd_is_monic() {
        let ring = Ring::polynomial(Ring::integers_mod(&Integer::new(7)));
        let mut g = Elem::init(&ring);
        // 3(x + 1)(x + 2) and 5(x + 1)
        dispatch::gcd(&mut g, &p(&[6, 2, 3], &ring), &p(&[5, 5], &ring), &ring);
        assert_eq!(g.to_string(), "[1, 1]");
    }

    #[test]
    fn test_normaliser() {
        let z = Ring::integer();
        assert_eq!(normaliser(&Elem::from_si(-5, &z), &z), Some(Elem::from_si(-1, &z)));
        assert_eq!(normaliser(&Elem::from_si(5, &z), &z), None);

        let z7 = Ring::integers_mod(&Integer::new(7));
        assert_eq!(normaliser(&Elem::from_si(3, &z7), &z7), Some(Elem::from_si(5, &z7)));
        assert_eq!(normaliser(&Elem::from_si(1, &z7), &z7), None);

        let zxx = Ring::polynomial(zx());
        let mut x = Elem::init(&zxx);
        x.set_coeff_si(1, -1, &zxx);
        assert_eq!(normaliser(&x, &zxx), Some(Elem::from_si(-1, &z)));
    }
}
