//! Schoolbook division over Z/pZ with a precomputed leading inverse.
//!
//! Coefficients are big integers reduced into `[0, p)`. The caller supplies
//! `inv_b`, the inverse of the divisor's leading coefficient modulo `p`, so
//! no inversion happens inside the loop.
//!
//! The in-place kernel works on a single buffer that holds the dividend on
//! entry. Each step reads the current leading coefficient at index `top`,
//! updates the `len(B) - 1` entries directly below it, and then stores the
//! quotient coefficient back at `top`. The window of live dividend entries
//! therefore shrinks by exactly one slot per quotient coefficient produced,
//! and no entry is read after it has been overwritten.

use num_traits::Zero;
use strata_integers::Integer;

/// Divides in place. On entry `ar` holds the dividend `A`; on exit
/// `ar[..len(B) - 1]` holds the remainder and `ar[len(B) - 1..]` the
/// quotient.
///
/// Requires `ar.len() >= b.len() >= 1` and `inv_b * lead(B) == 1 (mod p)`.
pub fn divrem_basecase_inplace(ar: &mut [Integer], b: &[Integer], inv_b: &Integer, p: &Integer) {
    let len_a = ar.len();
    let len_b = b.len();
    debug_assert!(len_b >= 1 && len_a >= len_b, "divisor longer than dividend");

    let len_r = len_b - 1;
    for top in (len_r..len_a).rev() {
        let q = if ar[top].is_zero() {
            Integer::zero()
        } else {
            (&ar[top] * inv_b).fdiv_r(p)
        };

        if !q.is_zero() {
            let base = top - len_r;
            for (i, bc) in b[..len_r].iter().enumerate() {
                ar[base + i] = (&ar[base + i] - &(&q * bc)).fdiv_r(p);
            }
        }

        ar[top] = q;
    }
}

/// Computes `(Q, R)` with `A = Q * B + R` over Z/pZ.
///
/// The quotient has `len(A) - len(B) + 1` coefficients and the remainder
/// `len(B) - 1`; neither is normalised. Returns an empty quotient and a
/// copy of `A` when `A` is shorter than `B`.
#[must_use]
pub fn divrem_basecase(
    a: &[Integer],
    b: &[Integer],
    inv_b: &Integer,
    p: &Integer,
) -> (Vec<Integer>, Vec<Integer>) {
    if a.len() < b.len() {
        return (Vec::new(), a.to_vec());
    }

    let mut ar = a.to_vec();
    divrem_basecase_inplace(&mut ar, b, inv_b, p);
    let q = ar.split_off(b.len() - 1);
    (q, ar)
}

/// Computes only the quotient of `A` by `B` over Z/pZ.
///
/// Low coefficients of the divisor stop influencing the quotient once the
/// quotient index drops below them, so the divisor window shrinks from the
/// bottom as the loop advances and those products are skipped.
#[must_use]
pub fn div_basecase(a: &[Integer], b: &[Integer], inv_b: &Integer, p: &Integer) -> Vec<Integer> {
    let len_a = a.len();
    let len_b = b.len();
    if len_a < len_b {
        return Vec::new();
    }
    let len_q = len_a - len_b + 1;

    let mut w = a.to_vec();
    let mut q = vec![Integer::zero(); len_q];
    let mut b = b;
    let mut len_r = len_b - 1;
    let mut cur = len_a;

    for iq in (0..len_q).rev() {
        if !w[cur - 1].is_zero() {
            let qc = (&w[cur - 1] * inv_b).fdiv_r(p);
            let base = cur - len_r - 1;
            for i in 0..len_r {
                w[base + i] = (&w[base + i] - &(&qc * &b[i])).fdiv_r(p);
            }
            q[iq] = qc;
        }

        if len_r > iq {
            b = &b[1..];
            len_r -= 1;
        }
        cur -= 1;
    }

    q
}
