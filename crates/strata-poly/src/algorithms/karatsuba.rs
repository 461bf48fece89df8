//! Karatsuba multiplication algorithm.
//!
//! This module provides the Karatsuba divide-and-conquer multiplication
//! algorithm, which achieves O(n^1.58) complexity, together with a
//! truncated variant that only produces the low coefficients of a product.

use tracing::trace;

use crate::Coeff;

/// Karatsuba multiplication threshold.
///
/// Below this length, schoolbook multiplication is faster.
pub const KARATSUBA_THRESHOLD: usize = 32;

/// Below this length, truncated products are computed classically.
pub const MULLOW_CLASSICAL_CUTOFF: usize = 8;

/// Schoolbook multiplication: O(n²).
///
/// Returns `a.len() + b.len() - 1` coefficients, or nothing if either
/// operand is empty.
pub fn schoolbook_mul<T: Coeff>(a: &[T], b: &[T]) -> Vec<T> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }

    let n = a.len();
    let m = b.len();
    let mut result = vec![T::zero(); n + m - 1];

    for i in 0..n {
        for j in 0..m {
            result[i + j] = result[i + j].clone() + a[i].clone() * b[j].clone();
        }
    }

    result
}

/// Classical truncated product: the low `n` coefficients of `a * b`,
/// zero-padded when the full product is shorter.
pub fn mullow_classical<T: Coeff>(a: &[T], b: &[T], n: usize) -> Vec<T> {
    let mut result = vec![T::zero(); n];

    for (i, ai) in a.iter().enumerate().take(n) {
        for (j, bj) in b.iter().enumerate().take(n - i) {
            result[i + j] = result[i + j].clone() + ai.clone() * bj.clone();
        }
    }

    result
}

/// Performs Karatsuba multiplication on coefficient slices.
///
/// Returns exactly `a.len() + b.len() - 1` coefficients.
pub fn karatsuba_mul<T: Coeff>(a: &[T], b: &[T]) -> Vec<T> {
    let n = a.len();
    let m = b.len();

    // Base case
    if n < KARATSUBA_THRESHOLD || m < KARATSUBA_THRESHOLD {
        return schoolbook_mul(a, b);
    }

    // Pad the shorter operand so both halves line up
    let size = n.max(m);
    let mut a_ext = a.to_vec();
    let mut b_ext = b.to_vec();
    a_ext.resize(size, T::zero());
    b_ext.resize(size, T::zero());

    let mut result = karatsuba_square_len(&a_ext, &b_ext);
    result.truncate(n + m - 1);
    result
}

/// Full product of two operands of the same length.
fn karatsuba_square_len<T: Coeff>(a: &[T], b: &[T]) -> Vec<T> {
    let size = a.len();
    if size < KARATSUBA_THRESHOLD {
        return schoolbook_mul(a, b);
    }

    // Split: a = a0 + a1*x^half, b = b0 + b1*x^half, with len(a1) >= len(a0)
    let half = size / 2;
    let (a0, a1) = a.split_at(half);
    let (b0, b1) = b.split_at(half);

    // Compute z0 = a0*b0, z2 = a1*b1
    let z0 = karatsuba_square_len(a0, b0);
    let z2 = karatsuba_square_len(a1, b1);

    // z1 = (a0+a1)*(b0+b1) - z0 - z2
    let a01 = add_padded(a1, a0);
    let b01 = add_padded(b1, b0);
    let mut z1 = karatsuba_square_len(&a01, &b01);
    for (i, c) in z0.iter().enumerate() {
        z1[i] = z1[i].clone() - c.clone();
    }
    for (i, c) in z2.iter().enumerate() {
        z1[i] = z1[i].clone() - c.clone();
    }

    // Combine: result = z0 + z1*x^half + z2*x^(2*half)
    let mut result = vec![T::zero(); 2 * size - 1];

    for (i, c) in z0.into_iter().enumerate() {
        result[i] = c;
    }

    for (i, c) in z1.into_iter().enumerate() {
        result[i + half] = result[i + half].clone() + c;
    }

    for (i, c) in z2.into_iter().enumerate() {
        result[i + 2 * half] = result[i + 2 * half].clone() + c;
    }

    result
}

/// `long + short`, where `long.len() >= short.len()`.
fn add_padded<T: Coeff>(long: &[T], short: &[T]) -> Vec<T> {
    let mut sum = long.to_vec();
    for (s, c) in sum.iter_mut().zip(short) {
        *s = s.clone() + c.clone();
    }
    sum
}

/// Writes the low `n` coefficients of `a * b` into `res`, where
/// `a`, `b` and `res` all have length `n`.
///
/// Each operand is split as `lo + x^s * hi` with `s = n / 2`. Only three
/// sub-products are formed: the full `lo * lo`, and the truncated
/// `hi * hi` and `(lo + hi) * (lo + hi)` of length `n - s`. The middle
/// term is recovered by subtraction and overlaid at offset `s`; the part
/// of `hi * hi` that lands at or above `x^n` is never computed.
///
/// # Panics
///
/// Panics if the three slices differ in length.
pub fn mullow_karatsuba_n<T: Coeff>(res: &mut [T], a: &[T], b: &[T]) {
    let n = res.len();
    assert!(a.len() == n && b.len() == n, "mullow_karatsuba_n needs equal lengths");

    if n <= MULLOW_CLASSICAL_CUTOFF {
        for (r, c) in res.iter_mut().zip(mullow_classical(a, b, n)) {
            *r = c;
        }
        return;
    }

    let s = n / 2;
    let h = n - s;
    let (a0, a1) = a.split_at(s);
    let (b0, b1) = b.split_at(s);

    // Low product, 2s - 1 coefficients, all of which are below x^n
    let p0 = karatsuba_mul(a0, b0);

    // High product, only needed modulo x^h
    let mut p2 = vec![T::zero(); h];
    mullow_karatsuba_n(&mut p2, a1, b1);

    // Sum product modulo x^h
    let sa = add_padded(a1, a0);
    let sb = add_padded(b1, b0);
    let mut pm = vec![T::zero(); h];
    mullow_karatsuba_n(&mut pm, &sa, &sb);

    for r in res.iter_mut() {
        *r = T::zero();
    }
    for (r, c) in res.iter_mut().zip(p0.iter()) {
        *r = c.clone();
    }

    // Middle term (a0*b1 + a1*b0) mod x^h, shifted by s
    for i in 0..h {
        let mut mid = pm[i].clone() - p2[i].clone();
        if let Some(c) = p0.get(i) {
            mid = mid - c.clone();
        }
        res[s + i] = res[s + i].clone() + mid;
    }

    // The only surviving coefficient of x^(2s) * a1*b1 when n is odd
    if n % 2 == 1 {
        res[2 * s] = res[2 * s].clone() + p2[0].clone();
    }
}

/// Low `n` coefficients of `a * b` for operands of any length.
///
/// Operands are truncated or zero-padded to `n` before the truncated
/// Karatsuba kernel runs.
pub fn mullow<T: Coeff>(a: &[T], b: &[T], n: usize) -> Vec<T> {
    if n == 0 || a.is_empty() || b.is_empty() {
        return vec![T::zero(); n];
    }
    if n <= MULLOW_CLASSICAL_CUTOFF {
        return mullow_classical(a, b, n);
    }

    trace!(n, len1 = a.len(), len2 = b.len(), "truncated karatsuba");

    let pad = |p: &[T]| {
        let mut v: Vec<T> = p.iter().take(n).cloned().collect();
        v.resize(n, T::zero());
        v
    };
    let a_ext = pad(a);
    let b_ext = pad(b);
    let mut res = vec![T::zero(); n];
    mullow_karatsuba_n(&mut res, &a_ext, &b_ext);
    res
}
