//! Generic arithmetic dispatch.
//!
//! Every operation matches once on the ring. Leaf rings compute directly,
//! quotient rings compute in the base and reduce, fraction rings
//! cross-multiply, and polynomial rings run a kernel over the coefficient
//! ring, which recurses back into this module.
//!
//! Outputs come first and the ring last. An output is never one of the
//! inputs; the `_assign` forms cover the aliased cases:
//!
//! | aliasing          | form                          |
//! |-------------------|-------------------------------|
//! | `x = x + y`       | [`add_assign`]                |
//! | `x = x - y`       | [`sub_assign`]                |
//! | `x = y - x`       | [`sub_rev_assign`]            |
//! | `x = -x`          | [`neg_assign`]                |
//! | `x = x * y`       | [`mul_assign`]                |
//! | `(q, x) = x / y`  | [`divrem_assign`]             |
//! | `(x, r) = x / y`  | [`divrem_quo_assign`]         |
//! | `x = x / y` exact | [`divexact_assign`]           |

use num_traits::{One, Zero};
use strata_integers::Integer;
use strata_poly::algorithms::{div_basecase, kronecker};
use tracing::{debug, trace};

use crate::elem::{self, Elem, PolyBuf};
use crate::error::{ArithError, Result};
use crate::ring::Ring;
use crate::{content, fatal, frac, poly};

/// Minimum operand length for Karatsuba multiplication of integer
/// polynomials.
pub const POLY_KARATSUBA_CUTOFF: usize = 8;

/// Minimum operand length for Kronecker substitution over word residues.
pub const POLY_KS_CUTOFF: usize = 16;

/// `res = a + b`.
pub fn add(res: &mut Elem, a: &Elem, b: &Elem, ring: &Ring) {
    match ring {
        Ring::Integer => *res = Elem::Integer(a.integer() + b.integer()),
        Ring::MachineWord => *res = Elem::Word(a.word().wrapping_add(b.word())),
        Ring::Quotient { base, modulus, nmod } => match (&**base, nmod) {
            (Ring::MachineWord, Some(m)) => *res = Elem::Word(m.add(a.word(), b.word())),
            (Ring::Integer, _) => {
                *res = Elem::Integer((a.integer() + b.integer()).fdiv_r(modulus.integer()));
            }
            _ => add(res, a, b, base),
        },
        Ring::Fraction { .. } => frac::add(res, a.frac(), b.frac(), ring),
        Ring::Polynomial { coeff } => {
            let (a, b) = (a.poly(), b.poly());
            let len = a.len().max(b.len());
            let buf = res.poly_mut();
            buf.fit_length(len, coeff);
            poly::poly_add(&mut buf.slots_mut()[..len], a.coeffs(), b.coeffs(), coeff);
            buf.set_length(len, coeff);
            buf.normalise();
        }
    }
}

/// `res = a - b`.
pub fn sub(res: &mut Elem, a: &Elem, b: &Elem, ring: &Ring) {
    match ring {
        Ring::Integer => *res = Elem::Integer(a.integer() - b.integer()),
        Ring::MachineWord => *res = Elem::Word(a.word().wrapping_sub(b.word())),
        Ring::Quotient { base, modulus, nmod } => match (&**base, nmod) {
            (Ring::MachineWord, Some(m)) => *res = Elem::Word(m.sub(a.word(), b.word())),
            (Ring::Integer, _) => {
                *res = Elem::Integer((a.integer() - b.integer()).fdiv_r(modulus.integer()));
            }
            _ => sub(res, a, b, base),
        },
        Ring::Fraction { .. } => frac::sub(res, a.frac(), b.frac(), ring),
        Ring::Polynomial { coeff } => {
            let (a, b) = (a.poly(), b.poly());
            let len = a.len().max(b.len());
            let buf = res.poly_mut();
            buf.fit_length(len, coeff);
            poly::poly_sub(&mut buf.slots_mut()[..len], a.coeffs(), b.coeffs(), coeff);
            buf.set_length(len, coeff);
            buf.normalise();
        }
    }
}

/// `res = -a`.
pub fn neg(res: &mut Elem, a: &Elem, ring: &Ring) {
    res.clone_from(a);
    neg_assign(res, ring);
}

/// `x = x + y`.
pub fn add_assign(x: &mut Elem, y: &Elem, ring: &Ring) {
    match ring {
        Ring::Integer => {
            let s = x.integer() + y.integer();
            *x = Elem::Integer(s);
        }
        Ring::MachineWord => *x = Elem::Word(x.word().wrapping_add(y.word())),
        Ring::Quotient { base, modulus, nmod } => match (&**base, nmod) {
            (Ring::MachineWord, Some(m)) => *x = Elem::Word(m.add(x.word(), y.word())),
            (Ring::Integer, _) => {
                let s = (x.integer() + y.integer()).fdiv_r(modulus.integer());
                *x = Elem::Integer(s);
            }
            _ => add_assign(x, y, base),
        },
        Ring::Fraction { .. } => {
            let mut t = Elem::init(ring);
            frac::add(&mut t, x.frac(), y.frac(), ring);
            x.swap(&mut t);
        }
        Ring::Polynomial { coeff } => {
            let y = y.poly();
            let buf = grow_to(x, y.len(), coeff);
            for (c, d) in buf.coeffs_mut().iter_mut().zip(y.coeffs()) {
                add_assign(c, d, coeff);
            }
            buf.normalise();
        }
    }
}

/// `x = x - y`.
pub fn sub_assign(x: &mut Elem, y: &Elem, ring: &Ring) {
    match ring {
        Ring::Integer => {
            let s = x.integer() - y.integer();
            *x = Elem::Integer(s);
        }
        Ring::MachineWord => *x = Elem::Word(x.word().wrapping_sub(y.word())),
        Ring::Quotient { base, modulus, nmod } => match (&**base, nmod) {
            (Ring::MachineWord, Some(m)) => *x = Elem::Word(m.sub(x.word(), y.word())),
            (Ring::Integer, _) => {
                let s = (x.integer() - y.integer()).fdiv_r(modulus.integer());
                *x = Elem::Integer(s);
            }
            _ => sub_assign(x, y, base),
        },
        Ring::Fraction { .. } => {
            let mut t = Elem::init(ring);
            frac::sub(&mut t, x.frac(), y.frac(), ring);
            x.swap(&mut t);
        }
        Ring::Polynomial { coeff } => {
            let y = y.poly();
            let buf = grow_to(x, y.len(), coeff);
            for (c, d) in buf.coeffs_mut().iter_mut().zip(y.coeffs()) {
                sub_assign(c, d, coeff);
            }
            buf.normalise();
        }
    }
}

/// `x = y - x`.
pub fn sub_rev_assign(x: &mut Elem, y: &Elem, ring: &Ring) {
    match ring {
        Ring::Integer => {
            let s = y.integer() - x.integer();
            *x = Elem::Integer(s);
        }
        Ring::MachineWord => *x = Elem::Word(y.word().wrapping_sub(x.word())),
        Ring::Quotient { base, modulus, nmod } => match (&**base, nmod) {
            (Ring::MachineWord, Some(m)) => *x = Elem::Word(m.sub(y.word(), x.word())),
            (Ring::Integer, _) => {
                let s = (y.integer() - x.integer()).fdiv_r(modulus.integer());
                *x = Elem::Integer(s);
            }
            _ => sub_rev_assign(x, y, base),
        },
        Ring::Fraction { .. } => {
            let mut t = Elem::init(ring);
            frac::sub(&mut t, y.frac(), x.frac(), ring);
            x.swap(&mut t);
        }
        Ring::Polynomial { coeff } => {
            let y = y.poly();
            let buf = grow_to(x, y.len(), coeff);
            for (i, c) in buf.coeffs_mut().iter_mut().enumerate() {
                match y.get(i) {
                    Some(d) => sub_rev_assign(c, d, coeff),
                    None => neg_assign(c, coeff),
                }
            }
            buf.normalise();
        }
    }
}

/// Extends the polynomial `x` with zeros to at least `len` coefficients.
fn grow_to<'a>(x: &'a mut Elem, len: usize, coeff: &Ring) -> &'a mut PolyBuf {
    let buf = x.poly_mut();
    if len > buf.len() {
        buf.fit_length(len, coeff);
        buf.set_length(len, coeff);
    }
    buf
}

/// `x = -x`.
pub fn neg_assign(x: &mut Elem, ring: &Ring) {
    match ring {
        Ring::Integer => {
            let v = -x.integer();
            *x = Elem::Integer(v);
        }
        Ring::MachineWord => *x = Elem::Word(x.word().wrapping_neg()),
        Ring::Quotient { base, modulus, nmod } => match (&**base, nmod) {
            (Ring::MachineWord, Some(m)) => *x = Elem::Word(m.neg(x.word())),
            (Ring::Integer, _) => {
                let v = (-x.integer()).fdiv_r(modulus.integer());
                *x = Elem::Integer(v);
            }
            _ => neg_assign(x, base),
        },
        Ring::Fraction { numer, .. } => neg_assign(x.frac_mut(ring).num_mut(), numer),
        Ring::Polynomial { coeff } => {
            for c in x.poly_mut().coeffs_mut() {
                neg_assign(c, coeff);
            }
        }
    }
}

/// `res = a * b`.
pub fn mul(res: &mut Elem, a: &Elem, b: &Elem, ring: &Ring) {
    match ring {
        Ring::Integer => *res = Elem::Integer(a.integer() * b.integer()),
        Ring::MachineWord => *res = Elem::Word(a.word().wrapping_mul(b.word())),
        Ring::Quotient { base, modulus, nmod } => match (&**base, nmod) {
            (Ring::MachineWord, Some(m)) => *res = Elem::Word(m.mul(a.word(), b.word())),
            (Ring::Integer, _) => {
                *res = Elem::Integer((a.integer() * b.integer()).fdiv_r(modulus.integer()));
            }
            _ => {
                mul(res, a, b, base);
                reduce(res, ring);
            }
        },
        Ring::Fraction { .. } => frac::mul(res, a.frac(), b.frac(), ring),
        Ring::Polynomial { coeff } => poly_mul(res, a.poly(), b.poly(), coeff),
    }
}

/// `x = x * y`. Products of composite elements are staged through a
/// temporary.
pub fn mul_assign(x: &mut Elem, y: &Elem, ring: &Ring) {
    match ring {
        Ring::Integer => {
            let p = x.integer() * y.integer();
            *x = Elem::Integer(p);
        }
        Ring::MachineWord => *x = Elem::Word(x.word().wrapping_mul(y.word())),
        Ring::Quotient { base, nmod: Some(m), .. } if matches!(**base, Ring::MachineWord) => {
            *x = Elem::Word(m.mul(x.word(), y.word()));
        }
        _ => {
            let mut t = Elem::init(ring);
            mul(&mut t, x, y, ring);
            x.swap(&mut t);
        }
    }
}

/// `res += a * b`.
pub fn addmul(res: &mut Elem, a: &Elem, b: &Elem, ring: &Ring) {
    let mut t = Elem::init(ring);
    mul(&mut t, a, b, ring);
    add_assign(res, &t, ring);
}

/// `res -= a * b`.
pub fn submul(res: &mut Elem, a: &Elem, b: &Elem, ring: &Ring) {
    let mut t = Elem::init(ring);
    mul(&mut t, a, b, ring);
    sub_assign(res, &t, ring);
}

fn integers_of(coeffs: &[Elem]) -> Vec<Integer> {
    coeffs.iter().map(|c| c.integer().clone()).collect()
}

fn words_of(coeffs: &[Elem]) -> Vec<u64> {
    coeffs.iter().map(Elem::word).collect()
}

fn poly_mul(res: &mut Elem, a: &PolyBuf, b: &PolyBuf, coeff: &Ring) {
    if a.is_empty() || b.is_empty() {
        res.poly_mut().set_length(0, coeff);
        return;
    }
    let len = a.len() + b.len() - 1;
    let short = a.len().min(b.len());

    match coeff {
        Ring::Integer if short >= POLY_KARATSUBA_CUTOFF => {
            debug!(len1 = a.len(), len2 = b.len(), "integer polynomial product via karatsuba");
            let p = strata_poly::karatsuba_mul(&integers_of(a.coeffs()), &integers_of(b.coeffs()));
            res.poly_mut().load(p.into_iter().map(Elem::Integer).collect());
        }
        Ring::Quotient { base, nmod: Some(m), .. }
            if matches!(**base, Ring::MachineWord) && short >= POLY_KS_CUTOFF =>
        {
            debug!(len1 = a.len(), len2 = b.len(), "word residue product via kronecker substitution");
            let p = kronecker::mul_ks(&words_of(a.coeffs()), &words_of(b.coeffs()), m);
            res.poly_mut().load(p.into_iter().map(Elem::Word).collect());
        }
        _ => {
            trace!(len1 = a.len(), len2 = b.len(), "schoolbook polynomial product");
            let buf = res.poly_mut();
            buf.fit_length(len, coeff);
            poly::poly_mul(&mut buf.slots_mut()[..len], a.coeffs(), b.coeffs(), coeff);
            buf.set_length(len, coeff);
            buf.normalise();
        }
    }
}

/// `res = a * b mod x^n` in a polynomial ring.
pub fn mullow(res: &mut Elem, a: &Elem, b: &Elem, n: usize, ring: &Ring) {
    let Ring::Polynomial { coeff } = ring else {
        fatal::not_implemented("mullow", ring)
    };
    let (a, b) = (a.poly(), b.poly());
    if n == 0 || a.is_empty() || b.is_empty() {
        res.poly_mut().set_length(0, coeff);
        return;
    }
    let n = n.min(a.len() + b.len() - 1);

    match &**coeff {
        Ring::Integer if n >= POLY_KARATSUBA_CUTOFF => {
            let p = strata_poly::mullow(&integers_of(a.coeffs()), &integers_of(b.coeffs()), n);
            res.poly_mut().load(p.into_iter().map(Elem::Integer).collect());
        }
        _ => {
            let buf = res.poly_mut();
            buf.fit_length(n, coeff);
            poly::poly_mullow(&mut buf.slots_mut()[..n], a.coeffs(), b.coeffs(), coeff);
            buf.set_length(n, coeff);
            buf.normalise();
        }
    }
}

/// `res = a^e`.
pub fn pow_ui(res: &mut Elem, a: &Elem, e: u64, ring: &Ring) {
    if let (Ring::Integer, Ok(e)) = (ring, usize::try_from(e)) {
        *res = Elem::Integer(a.integer().pow(e));
        return;
    }
    res.one(ring);
    let mut base = a.clone();
    let mut sq = Elem::init(ring);
    let mut e = e;
    while e > 0 {
        if e & 1 == 1 {
            mul_assign(res, &base, ring);
        }
        e >>= 1;
        if e > 0 {
            mul(&mut sq, &base, &base, ring);
            base.swap(&mut sq);
        }
    }
}

/// `res = a * c` where `c` lies in the coefficient ring of a polynomial
/// ring, or in `ring` itself otherwise.
pub fn scalar_mul(res: &mut Elem, a: &Elem, c: &Elem, ring: &Ring) {
    match ring {
        Ring::Polynomial { coeff } => {
            let a = a.poly();
            let len = a.len();
            let buf = res.poly_mut();
            buf.set_length(0, coeff);
            buf.fit_length(len, coeff);
            elem::vec_scalar_mul(&mut buf.slots_mut()[..len], a.coeffs(), c, coeff);
            buf.set_length(len, coeff);
            buf.normalise();
        }
        _ => mul(res, a, c, ring),
    }
}

/// Reduces a base-ring value into a quotient ring. Other rings are left
/// untouched.
pub(crate) fn reduce(x: &mut Elem, ring: &Ring) {
    let Ring::Quotient { base, modulus, nmod } = ring else {
        return;
    };
    match (&**base, nmod) {
        (Ring::MachineWord, Some(m)) => *x = Elem::Word(m.red(x.word())),
        (Ring::Integer, _) => {
            let r = x.integer().fdiv_r(modulus.integer());
            *x = Elem::Integer(r);
        }
        _ => {
            let mut q = Elem::init(base);
            divrem_assign(&mut q, x, modulus, base);
        }
    }
}

/// Division with remainder: `a = q * b + r`.
///
/// Integers use floor division and words unsigned division. In quotient
/// and fraction rings `q = a / b` and `r = 0`. Polynomial division needs an
/// invertible leading coefficient in `b` and leaves `deg r < deg b`.
///
/// # Panics
///
/// Panics if `b` is zero or, where an inverse is needed, not invertible.
/// Aborts for fraction rings with scalar denominators.
pub fn divrem(q: &mut Elem, r: &mut Elem, a: &Elem, b: &Elem, ring: &Ring) {
    match ring {
        Ring::Polynomial { coeff } => {
            let a = a.poly();
            let rb = r.poly_mut();
            rb.set_length(0, coeff);
            rb.fit_length(a.len(), coeff);
            elem::vec_set(&mut rb.slots_mut()[..a.len()], a.coeffs());
            rb.set_length(a.len(), coeff);
            poly_divrem(q.poly_mut(), rb, b.poly(), coeff);
        }
        _ => scalar_divrem(q, r, a, b, ring),
    }
}

fn scalar_divrem(q: &mut Elem, r: &mut Elem, a: &Elem, b: &Elem, ring: &Ring) {
    match ring {
        Ring::Integer => {
            let (qq, rr) = a.integer().fdiv_qr(b.integer());
            *q = Elem::Integer(qq);
            *r = Elem::Integer(rr);
        }
        Ring::MachineWord => {
            let (x, d) = (a.word(), b.word());
            assert!(d != 0, "division by zero");
            *q = Elem::Word(x / d);
            *r = Elem::Word(x % d);
        }
        Ring::Quotient { base, .. } if matches!(&**base, Ring::Polynomial { .. }) => {
            fatal::not_implemented("divrem", ring)
        }
        Ring::Quotient { .. } | Ring::Fraction { .. } => {
            if ring.is_mixed_fraction() {
                fatal::not_implemented("divrem", ring);
            }
            let mut b_inv = Elem::init(ring);
            if let Err(e) = inv(&mut b_inv, b, ring) {
                panic!("divrem: {e}");
            }
            mul(q, a, &b_inv, ring);
            r.zero(ring);
        }
        Ring::Polynomial { .. } => unreachable!("polynomial division is handled by divrem"),
    }
}

/// Divides in place: `a` becomes the remainder and `q` the quotient.
///
/// # Panics
///
/// As for [`divrem`].
pub fn divrem_assign(q: &mut Elem, a: &mut Elem, b: &Elem, ring: &Ring) {
    match ring {
        Ring::Polynomial { coeff } => poly_divrem(q.poly_mut(), a.poly_mut(), b.poly(), coeff),
        _ => {
            let mut r = Elem::init(ring);
            scalar_divrem(q, &mut r, a, b, ring);
            a.swap(&mut r);
        }
    }
}

/// Divides in place: `a` becomes the quotient and `r` the remainder.
///
/// # Panics
///
/// As for [`divrem`].
pub fn divrem_quo_assign(a: &mut Elem, r: &mut Elem, b: &Elem, ring: &Ring) {
    match ring {
        Ring::Polynomial { coeff } => {
            let b = b.poly();
            assert!(!b.is_empty(), "division by zero");
            let ab = a.poly_mut();
            let rb = r.poly_mut();
            rb.set_length(0, coeff);
            let len_a = ab.len();
            if len_a < b.len() {
                std::mem::swap(ab, rb);
                return;
            }
            let split = b.len() - 1;
            divrem_packed(ab.coeffs_mut(), b.coeffs(), coeff);

            rb.fit_length(split, coeff);
            for (dst, src) in rb.slots_mut()[..split].iter_mut().zip(ab.coeffs_mut()) {
                dst.swap(src);
            }
            rb.set_length(split, coeff);
            rb.normalise();

            ab.coeffs_mut().rotate_left(split);
            ab.set_length(len_a - split, coeff);
            ab.normalise();
        }
        _ => {
            let mut q = Elem::init(ring);
            scalar_divrem(&mut q, r, a, b, ring);
            a.swap(&mut q);
        }
    }
}

/// Runs the packed division kernel on `ar`, which holds the dividend.
/// Afterwards `ar[..len(b) - 1]` holds the remainder and the rest the
/// quotient.
fn divrem_packed(ar: &mut [Elem], b: &[Elem], coeff: &Ring) {
    match coeff {
        Ring::Quotient { base, modulus, .. } if matches!(**base, Ring::Integer) => {
            debug!(len1 = ar.len(), len2 = b.len(), "residue polynomial division via basecase");
            let p = modulus.integer();
            let bi = integers_of(b);
            let lead_inv = bi
                .last()
                .and_then(|l| l.invmod(p))
                .unwrap_or_else(|| panic!("divrem: leading coefficient is not invertible in {coeff}"));
            let mut ai = integers_of(ar);
            div_basecase::divrem_basecase_inplace(&mut ai, &bi, &lead_inv, p);
            for (slot, v) in ar.iter_mut().zip(ai) {
                *slot = Elem::Integer(v);
            }
        }
        _ => {
            let lead_inv = lead_inverse(b, coeff);
            poly::poly_divrem_inplace(ar, b, &lead_inv, coeff);
        }
    }
}

fn lead_inverse(b: &[Elem], coeff: &Ring) -> Elem {
    let mut lead_inv = Elem::init(coeff);
    let lead = b.last().expect("divisor is non-zero");
    if let Err(e) = inv(&mut lead_inv, lead, coeff) {
        panic!("divrem: leading coefficient: {e}");
    }
    lead_inv
}

/// `rem` holds the dividend on entry and the remainder on exit.
fn poly_divrem(quo: &mut PolyBuf, rem: &mut PolyBuf, b: &PolyBuf, coeff: &Ring) {
    assert!(!b.is_empty(), "division by zero");
    quo.set_length(0, coeff);
    let len_a = rem.len();
    let len_b = b.len();
    if len_a < len_b {
        return;
    }
    let len_q = len_a - len_b + 1;
    quo.fit_length(len_q, coeff);

    match coeff {
        Ring::Quotient { base, .. } if matches!(**base, Ring::Integer) => {
            divrem_packed(rem.coeffs_mut(), b.coeffs(), coeff);
            poly::take_quotient(&mut quo.slots_mut()[..len_q], rem.coeffs_mut(), len_b - 1, coeff);
        }
        _ => {
            let lead_inv = lead_inverse(b.coeffs(), coeff);
            poly::poly_divrem(
                &mut quo.slots_mut()[..len_q],
                rem.coeffs_mut(),
                b.coeffs(),
                &lead_inv,
                coeff,
            );
        }
    }

    quo.set_length(len_q, coeff);
    quo.normalise();
    rem.set_length(len_b - 1, coeff);
    rem.normalise();
}

/// Exact division `q = a / b`. Exactness is only checked in debug builds.
pub fn divexact(q: &mut Elem, a: &Elem, b: &Elem, ring: &Ring) {
    match ring {
        Ring::Integer => *q = Elem::Integer(a.integer().divexact(b.integer())),
        Ring::MachineWord => {
            let (x, d) = (a.word(), b.word());
            debug_assert!(d != 0 && x % d == 0, "inexact division");
            *q = Elem::Word(x / d);
        }
        _ => {
            let checked = try_divexact(q, a, b, ring);
            debug_assert!(checked.is_ok(), "divexact: {checked:?}");
        }
    }
}

/// `x = x / y`, exactly.
pub fn divexact_assign(x: &mut Elem, y: &Elem, ring: &Ring) {
    let mut q = Elem::init(ring);
    divexact(&mut q, x, y, ring);
    x.swap(&mut q);
}

/// Exact division that reports failure instead of assuming exactness.
///
/// In quotient rings over integers or words any solution of `q * b = a` is
/// accepted, so non-invertible divisors work whenever a solution exists.
///
/// # Errors
///
/// Returns [`ArithError::DivisionByZero`] for a zero divisor and
/// [`ArithError::InexactDivision`] when no exact quotient exists.
pub fn try_divexact(q: &mut Elem, a: &Elem, b: &Elem, ring: &Ring) -> Result<()> {
    if b.is_zero() {
        return Err(ArithError::DivisionByZero(ring.to_string()));
    }
    let inexact = || ArithError::InexactDivision(ring.to_string());
    match ring {
        Ring::Integer => {
            let (qq, rr) = a.integer().fdiv_qr(b.integer());
            if !rr.is_zero() {
                return Err(inexact());
            }
            *q = Elem::Integer(qq);
        }
        Ring::MachineWord => {
            let (x, d) = (a.word(), b.word());
            if x % d != 0 {
                return Err(inexact());
            }
            *q = Elem::Word(x / d);
        }
        Ring::Quotient { base, modulus, .. } => match &**base {
            Ring::Integer => {
                let v = residue_divexact(a.integer(), b.integer(), modulus.integer()).ok_or_else(inexact)?;
                *q = Elem::Integer(v);
            }
            Ring::MachineWord => {
                let n = Integer::from(modulus.word());
                let v = residue_divexact(&Integer::from(a.word()), &Integer::from(b.word()), &n)
                    .ok_or_else(inexact)?;
                *q = Elem::Word(v.to_u64().ok_or_else(inexact)?);
            }
            _ => fatal::not_implemented("divexact", ring),
        },
        Ring::Fraction { .. } => {
            if ring.is_mixed_fraction() {
                fatal::not_implemented("divexact", ring);
            }
            frac::div(q, a.frac(), b.frac(), ring)?;
        }
        Ring::Polynomial { coeff } => {
            let (a, b) = (a.poly(), b.poly());
            let buf = q.poly_mut();
            buf.set_length(0, coeff);
            if a.is_empty() {
                return Ok(());
            }
            if a.len() < b.len() {
                return Err(inexact());
            }
            let len_q = a.len() - b.len() + 1;
            buf.fit_length(len_q, coeff);
            poly::poly_divexact(&mut buf.slots_mut()[..len_q], a.coeffs(), b.coeffs(), coeff)?;
            buf.set_length(len_q, coeff);
            buf.normalise();
        }
    }
    Ok(())
}

/// Some `q` in `[0, n)` with `q * b = a (mod n)`, if one exists.
fn residue_divexact(a: &Integer, b: &Integer, n: &Integer) -> Option<Integer> {
    let g = b.gcd(n);
    if !a.is_divisible_by(&g) {
        return None;
    }
    let n_g = n.divexact(&g);
    let b_inv = b.divexact(&g).invmod(&n_g)?;
    Some((a.divexact(&g) * b_inv).fdiv_r(&n_g))
}

/// Inverse of an odd word modulo 2^64 by Newton iteration.
fn word_inverse(a: u64) -> u64 {
    // a * a = 1 (mod 8), so a is correct to 3 bits; each step doubles that
    let mut x = a;
    for _ in 0..5 {
        x = x.wrapping_mul(2u64.wrapping_sub(a.wrapping_mul(x)));
    }
    x
}

/// Multiplicative inverse.
///
/// # Errors
///
/// Returns [`ArithError::DivisionByZero`] for zero and
/// [`ArithError::NotInvertible`] for other non-units.
pub fn inv(res: &mut Elem, a: &Elem, ring: &Ring) -> Result<()> {
    if a.is_zero() && !a.is_one(ring) {
        return Err(ArithError::DivisionByZero(ring.to_string()));
    }
    let not_invertible = || ArithError::NotInvertible(ring.to_string());
    match ring {
        Ring::Integer => {
            if !a.integer().abs().is_one() {
                return Err(not_invertible());
            }
            res.clone_from(a);
        }
        Ring::MachineWord => {
            let w = a.word();
            if w & 1 == 0 {
                return Err(not_invertible());
            }
            *res = Elem::Word(word_inverse(w));
        }
        Ring::Quotient { base, modulus, nmod } => match (&**base, nmod) {
            (Ring::MachineWord, Some(m)) => {
                *res = Elem::Word(m.inv(a.word()).ok_or_else(not_invertible)?);
            }
            (Ring::Integer, _) => {
                let v = a.integer().invmod(modulus.integer()).ok_or_else(not_invertible)?;
                *res = Elem::Integer(v);
            }
            _ => fatal::not_implemented("inv", ring),
        },
        Ring::Fraction { .. } => {
            if ring.is_mixed_fraction() {
                fatal::not_implemented("inv", ring);
            }
            let f = a.frac();
            *res = Elem::fraction(f.den().clone(), f.num().clone());
        }
        Ring::Polynomial { coeff } => {
            let p = a.poly();
            if p.len() != 1 {
                return Err(not_invertible());
            }
            let mut c = Elem::init(coeff);
            inv(&mut c, &p.coeffs()[0], coeff)?;
            res.poly_mut().load(vec![c]);
        }
    }
    Ok(())
}

pub(crate) fn word_gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Greatest common divisor, normalised to a canonical associate.
///
/// Integers give a non-negative result. In Z/nZ the result is the
/// canonical generator `gcd(a, b, n)` of the ideal `(a, b)`. Polynomial
/// rings over gcd domains use the primitive remainder sequence. A zero
/// operand gives the unit-normal associate of the other, so
/// `gcd(0, 0) = 0`.
///
/// Aborts for fraction rings and quotients of polynomial rings.
pub fn gcd(res: &mut Elem, a: &Elem, b: &Elem, ring: &Ring) {
    let supported = match ring {
        Ring::Quotient { base, .. } => matches!(**base, Ring::Integer | Ring::MachineWord),
        Ring::Fraction { .. } => false,
        _ => true,
    };
    if !supported {
        fatal::not_implemented("gcd", ring);
    }
    if b.is_zero() {
        content::unit_normal(res, a, ring);
        return;
    }
    if a.is_zero() {
        content::unit_normal(res, b, ring);
        return;
    }

    match ring {
        Ring::Integer => *res = Elem::Integer(a.integer().gcd(b.integer())),
        Ring::MachineWord => *res = Elem::Word(word_gcd(a.word(), b.word())),
        Ring::Quotient { base, modulus, .. } => match &**base {
            Ring::Integer => {
                let m = modulus.integer();
                *res = Elem::Integer(a.integer().gcd(b.integer()).gcd(m).fdiv_r(m));
            }
            _ => {
                let n = modulus.word();
                *res = Elem::Word(word_gcd(word_gcd(a.word(), b.word()), n) % n);
            }
        },
        Ring::Polynomial { .. } => content::poly_gcd(res, a, b, ring),
        Ring::Fraction { .. } => unreachable!("gcd over {ring}"),
    }
}
