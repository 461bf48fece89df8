//! Generic polynomial kernels.
//!
//! These routines work on coefficient slices and are parameterised only by
//! the coefficient ring. They neither allocate output buffers nor
//! normalise; the dispatch layer sizes the output, calls the kernel and
//! strips leading zeros afterwards.
//!
//! Output slices never overlap inputs. Products in particular cannot be
//! formed in place, so in-place multiplication goes through a temporary.

use crate::dispatch;
use crate::elem::{vec_neg, vec_scalar_addmul, vec_scalar_submul, vec_set, vec_zero, Elem};
use crate::error::{ArithError, Result};
use crate::ring::Ring;

/// `res = a + b`, where `res.len() == max(a.len(), b.len())`.
pub fn poly_add(res: &mut [Elem], a: &[Elem], b: &[Elem], ring: &Ring) {
    debug_assert_eq!(res.len(), a.len().max(b.len()));
    let min = a.len().min(b.len());
    for (r, (x, y)) in res.iter_mut().zip(a.iter().zip(b)) {
        dispatch::add(r, x, y, ring);
    }
    let tail = if a.len() > min { &a[min..] } else { &b[min..] };
    vec_set(&mut res[min..], tail);
}

/// `res = a - b`, where `res.len() == max(a.len(), b.len())`.
pub fn poly_sub(res: &mut [Elem], a: &[Elem], b: &[Elem], ring: &Ring) {
    debug_assert_eq!(res.len(), a.len().max(b.len()));
    let min = a.len().min(b.len());
    for (r, (x, y)) in res.iter_mut().zip(a.iter().zip(b)) {
        dispatch::sub(r, x, y, ring);
    }
    if a.len() > min {
        vec_set(&mut res[min..], &a[min..]);
    } else {
        vec_neg(&mut res[min..], &b[min..], ring);
    }
}

/// Schoolbook product, `res.len() == a.len() + b.len() - 1`.
pub fn poly_mul(res: &mut [Elem], a: &[Elem], b: &[Elem], ring: &Ring) {
    debug_assert_eq!(res.len() + 1, a.len() + b.len());
    vec_zero(res, ring);
    for (i, c) in a.iter().enumerate() {
        if !c.is_zero() {
            vec_scalar_addmul(&mut res[i..i + b.len()], b, c, ring);
        }
    }
}

/// Low `res.len()` coefficients of `a * b`.
pub fn poly_mullow(res: &mut [Elem], a: &[Elem], b: &[Elem], ring: &Ring) {
    let n = res.len();
    vec_zero(res, ring);
    for (i, c) in a.iter().enumerate().take(n) {
        if c.is_zero() {
            continue;
        }
        let m = (n - i).min(b.len());
        vec_scalar_addmul(&mut res[i..i + m], &b[..m], c, ring);
    }
}

/// Long division in a single buffer.
///
/// `ar` holds the dividend on entry. Working from the top, each step turns
/// the current leading coefficient into a quotient coefficient, subtracts
/// its multiple of `b` from the `len(b) - 1` slots below and stores the
/// quotient coefficient in the slot it consumed. On exit `ar[..len(b) - 1]`
/// is the remainder and `ar[len(b) - 1..]` the quotient.
///
/// Requires `ar.len() >= b.len() >= 1` and `lead_inv * lead(b) == 1`.
pub fn poly_divrem_inplace(ar: &mut [Elem], b: &[Elem], lead_inv: &Elem, ring: &Ring) {
    let len_r = b.len() - 1;
    debug_assert!(ar.len() > len_r, "divisor longer than dividend");

    let mut q = Elem::init(ring);
    for top in (len_r..ar.len()).rev() {
        if ar[top].is_zero() {
            continue;
        }
        dispatch::mul(&mut q, &ar[top], lead_inv, ring);
        let base = top - len_r;
        vec_scalar_submul(&mut ar[base..top], &b[..len_r], &q, ring);
        ar[top].swap(&mut q);
    }
}

/// Moves the quotient half of a packed division buffer into `q`, leaving
/// zeros behind.
pub fn take_quotient(q: &mut [Elem], ar: &mut [Elem], split: usize, ring: &Ring) {
    debug_assert_eq!(q.len() + split, ar.len());
    for (dst, src) in q.iter_mut().zip(&mut ar[split..]) {
        dst.swap(src);
        src.zero(ring);
    }
}

/// Long division with separate outputs.
///
/// `r` holds the dividend on entry and is consumed from the top; on exit
/// `r[..len(b) - 1]` is the remainder, the rest of `r` is zero and `q`,
/// of length `len(r) - len(b) + 1`, is the quotient.
pub fn poly_divrem(q: &mut [Elem], r: &mut [Elem], b: &[Elem], lead_inv: &Elem, ring: &Ring) {
    poly_divrem_inplace(r, b, lead_inv, ring);
    take_quotient(q, r, b.len() - 1, ring);
}

/// Exact division `q = a / b` using exact division of leading
/// coefficients, so `b` need not have an invertible leading coefficient.
///
/// # Errors
///
/// Fails with [`ArithError::InexactDivision`] if some coefficient division
/// or the final remainder is not exact.
pub fn poly_divexact(q: &mut [Elem], a: &[Elem], b: &[Elem], ring: &Ring) -> Result<()> {
    let len_b = b.len();
    debug_assert_eq!(q.len() + len_b, a.len() + 1);
    let lead = &b[len_b - 1];

    let mut r = a.to_vec();
    for iq in (0..q.len()).rev() {
        let top = iq + len_b - 1;
        if r[top].is_zero() {
            q[iq].zero(ring);
            continue;
        }
        dispatch::try_divexact(&mut q[iq], &r[top], lead, ring)?;
        vec_scalar_submul(&mut r[iq..top], &b[..len_b - 1], &q[iq], ring);
    }

    if r[..len_b - 1].iter().any(|c| !c.is_zero()) {
        return Err(ArithError::InexactDivision(ring.to_string()));
    }
    Ok(())
}

/// Pseudo-remainder of `a` by `b`: the remainder of `lead(b)^d * a` with
/// `d = len(a) - len(b) + 1`, normalised. Needs no division in the
/// coefficient ring.
#[must_use]
pub fn poly_pseudo_rem(a: &[Elem], b: &[Elem], ring: &Ring) -> Vec<Elem> {
    let len_b = b.len();
    let mut r = a.to_vec();
    if a.len() >= len_b {
        let lead_b = &b[len_b - 1];
        for top in (len_b - 1..a.len()).rev() {
            let lead_r = std::mem::replace(&mut r[top], Elem::init(ring));
            for c in &mut r[..top] {
                dispatch::mul_assign(c, lead_b, ring);
            }
            let shift = top + 1 - len_b;
            vec_scalar_submul(&mut r[shift..top], &b[..len_b - 1], &lead_r, ring);
        }
        r.truncate(len_b - 1);
    }
    while r.last().is_some_and(Elem::is_zero) {
        r.pop();
    }
    r
}
