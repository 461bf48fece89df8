//! Kronecker substitution for word-modulus polynomials.
//!
//! Polynomials with coefficients in `[0, n)` are packed into big integers
//! with `b` bits per coefficient, multiplied once in the forward and once in
//! the reversed coefficient order, and the product coefficients are then
//! recovered from the two digit streams with [`recover_reduce`].
//!
//! With `B = 2^b`, the forward product is `X = Σ c_i B^i` and the reversed
//! product is `Y = Σ c_i B^(len - 1 - i)`. Every `c_i` spans two base-`B`
//! digits. The low digit is read off `X` from the bottom and the high digit
//! off `Y` from the top; carries from neighbouring coefficients are undone
//! with a running borrow. Coefficients must satisfy `c_i < 2^(2b - 1)`.
//!
//! Digits are stored one per word when `b <= 64` and as (low, high) word
//! pairs when `64 < b <= 96`.

use dashu::integer::UBig;
use strata_integers::NMod;
use tracing::trace;

/// Largest digit width the recovery kernels accept.
pub const MAX_DIGIT_BITS: u32 = 96;

/// Recovers `res.len()` coefficients from the digit streams of `X` and `Y`
/// and reduces them modulo `m`.
///
/// `op1` holds the low `res.len() + 1` digits of `X`, `op2` the low
/// `res.len() + 1` digits of `Y`. One of four code paths is selected from
/// `b` alone: `2b <= 64` (coefficients fit one word), `b < 64` (two words),
/// `b == 64` (two words, no masking) and `64 < b <= 96` (three words, digits
/// simulated as double-word registers).
///
/// # Panics
///
/// Panics if `b` is zero or exceeds [`MAX_DIGIT_BITS`], or if a digit
/// stream is too short.
pub fn recover_reduce(res: &mut [u64], op1: &[u64], op2: &[u64], b: u32, m: &NMod) {
    assert!(b > 0 && b <= MAX_DIGIT_BITS, "digit width {b} out of range");
    let n = res.len();
    if n == 0 {
        return;
    }
    let words = if b <= 64 { 1 } else { 2 };
    assert!(
        op1.len() >= words * (n + 1) && op2.len() >= words * (n + 1),
        "digit streams too short"
    );

    if 2 * b <= 64 {
        trace!(b, n, "recover_reduce: one-word path");
        recover_reduce1(res, op1, op2, b, m);
    } else if b < 64 {
        trace!(b, n, "recover_reduce: two-word path");
        recover_reduce2(res, op1, op2, b, m);
    } else if b == 64 {
        trace!(b, n, "recover_reduce: full-word path");
        recover_reduce2b(res, op1, op2, m);
    } else {
        trace!(b, n, "recover_reduce: three-word path");
        recover_reduce3(res, op1, op2, b, m);
    }
}

/// `2b <= 64`: each recovered coefficient fits a single word.
fn recover_reduce1(res: &mut [u64], op1: &[u64], op2: &[u64], b: u32, m: &NMod) {
    let n = res.len();
    let mask = (1u64 << b) - 1;

    // (x0, x1) and (y0, y1) are two-digit windows into X and Y
    let mut x0 = op1[0];
    let mut y1 = op2[n];
    let mut borrow = 0u64;

    for i in 0..n {
        let y0 = op2[n - 1 - i];
        let mut x1 = op1[i + 1];
        if y0 < x0 {
            y1 = y1.wrapping_sub(1);
        }
        res[i] = m.red(x0.wrapping_add(y1 << b));
        y1 = y1.wrapping_add(borrow);
        borrow = u64::from(x1 < y1);
        x1 = x1.wrapping_sub(y1);
        y1 = y0.wrapping_sub(x0) & mask;
        x0 = x1 & mask;
    }
}

/// `64 < 2b < 128`: same loop, two-word reduction.
fn recover_reduce2(res: &mut [u64], op1: &[u64], op2: &[u64], b: u32, m: &NMod) {
    let n = res.len();
    let mask = (1u64 << b) - 1;
    let b2 = 64 - b;

    let mut x0 = op1[0];
    let mut y1 = op2[n];
    let mut borrow = 0u64;

    for i in 0..n {
        let y0 = op2[n - 1 - i];
        let mut x1 = op1[i + 1];
        if y0 < x0 {
            y1 = y1.wrapping_sub(1);
        }
        res[i] = m.red2(y1 >> b2, x0.wrapping_add(y1 << b));
        y1 = y1.wrapping_add(borrow);
        borrow = u64::from(x1 < y1);
        x1 = x1.wrapping_sub(y1);
        y1 = y0.wrapping_sub(x0) & mask;
        x0 = x1 & mask;
    }
}

/// `b == 64`: digits are whole words, so nothing is masked.
fn recover_reduce2b(res: &mut [u64], op1: &[u64], op2: &[u64], m: &NMod) {
    let n = res.len();

    let mut x0 = op1[0];
    let mut y1 = op2[n];
    let mut borrow = 0u64;

    for i in 0..n {
        let y0 = op2[n - 1 - i];
        let mut x1 = op1[i + 1];
        if y0 < x0 {
            y1 = y1.wrapping_sub(1);
        }
        res[i] = m.red2(y1, x0);
        y1 = y1.wrapping_add(borrow);
        borrow = u64::from(x1 < y1);
        x1 = x1.wrapping_sub(y1);
        y1 = y0.wrapping_sub(x0);
        x0 = x1;
    }
}

#[inline]
fn join(hi: u64, lo: u64) -> u128 {
    (u128::from(hi) << 64) | u128::from(lo)
}

/// `128 < 2b <= 192`: digits span two words. Suffixes `l`/`h` are the low
/// and high word of each double-word register.
fn recover_reduce3(res: &mut [u64], op1: &[u64], op2: &[u64], b: u32, m: &NMod) {
    let n = res.len();
    let b1 = b - 64;
    let b2 = 128 - b;
    let mask_h = (1u64 << b1) - 1;

    let mut x0l = op1[0];
    let mut x0h = op1[1];
    let mut y1h = op2[2 * n + 1];
    let mut y1l = op2[2 * n];
    let mut borrow = false;

    for i in 0..n {
        let y0h = op2[2 * (n - 1 - i) + 1];
        let y0l = op2[2 * (n - 1 - i)];
        let x1l = op1[2 * (i + 1)];
        let x1h = op1[2 * (i + 1) + 1];

        if join(y0h, y0l) < join(x0h, x0l) {
            let y1 = join(y1h, y1l).wrapping_sub(1);
            y1h = (y1 >> 64) as u64;
            y1l = y1 as u64;
        }

        let hi = (y1h << b1).wrapping_add(y1l >> b2);
        let mid = (y1l << b1).wrapping_add(x0h);
        res[i] = m.red3(hi, mid, x0l);

        let mut y1 = join(y1h, y1l);
        if borrow {
            y1 = y1.wrapping_add(1);
        }
        let x1 = join(x1h, x1l);
        borrow = x1 < y1;
        let x1 = x1.wrapping_sub(y1);
        let y1 = join(y0h, y0l).wrapping_sub(join(x0h, x0l));

        y1h = ((y1 >> 64) as u64) & mask_h;
        y1l = y1 as u64;
        x0l = x1 as u64;
        x0h = ((x1 >> 64) as u64) & mask_h;
    }
}

/// Packs `coeffs` into an integer with `b` bits per coefficient, optionally
/// in reversed order. Every coefficient must be below `2^b`.
#[must_use]
pub fn pack(coeffs: &[u64], b: u32, reversed: bool) -> UBig {
    let b = b as usize;
    let mut words = vec![0u64; coeffs.len() * b / 64 + 2];
    let len = coeffs.len();

    for (i, &c) in coeffs.iter().enumerate() {
        debug_assert!(b >= 64 || c >> b == 0, "coefficient wider than digit");
        let slot = if reversed { len - 1 - i } else { i };
        let off = slot * b;
        let (w, s) = (off / 64, off % 64);
        words[w] |= c << s;
        if s != 0 {
            words[w + 1] |= c >> (64 - s);
        }
    }

    UBig::from_words(&words)
}

/// Reads `width <= 96` bits starting at bit `off`.
fn get_bits(words: &[u64], off: usize, width: u32) -> u128 {
    let word = |k: usize| u128::from(words.get(k).copied().unwrap_or(0));
    let (w, s) = (off / 64, off % 64);
    let mut v = (word(w) | (word(w + 1) << 64)) >> s;
    if s != 0 {
        v |= word(w + 2) << (128 - s);
    }
    v & ((1u128 << width) - 1)
}

/// Splits `x` into its low `count` base-`2^b` digits in the word layout
/// [`recover_reduce`] expects.
#[must_use]
pub fn unpack_digits(x: &UBig, b: u32, count: usize) -> Vec<u64> {
    let words = x.as_words();
    let per_digit = if b <= 64 { 1 } else { 2 };
    let mut out = Vec::with_capacity(count * per_digit);

    for j in 0..count {
        let d = get_bits(words, j * b as usize, b);
        out.push(d as u64);
        if per_digit == 2 {
            out.push((d >> 64) as u64);
        }
    }

    out
}

/// Digit width for multiplying polynomials of the given lengths over
/// `Z/nZ`: one bit more than half the size of the largest product
/// coefficient, so that `c_i < 2^(2b - 1)`. Returns `None` for `n == 1`,
/// where every product is zero.
#[must_use]
pub fn digit_bits(len1: usize, len2: usize, m: &NMod) -> Option<u32> {
    let coeff_bits = 64 - (m.modulus() - 1).leading_zeros();
    if coeff_bits == 0 {
        return None;
    }
    let min_len = len1.min(len2).max(1);
    let log_len = usize::BITS - (min_len - 1).leading_zeros();
    Some((2 * coeff_bits + log_len) / 2 + 1)
}

/// Multiplies two polynomials with reduced coefficients modulo `m` by
/// reciprocal Kronecker substitution.
///
/// Returns `len(a) + len(b) - 1` coefficients, not normalised.
#[must_use]
pub fn mul_ks(a: &[u64], b: &[u64], m: &NMod) -> Vec<u64> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let n = a.len() + b.len() - 1;
    let Some(bits) = digit_bits(a.len(), b.len(), m) else {
        return vec![0; n];
    };

    let x = pack(a, bits, false) * pack(b, bits, false);
    let y = pack(a, bits, true) * pack(b, bits, true);

    let op1 = unpack_digits(&x, bits, n + 1);
    let op2 = unpack_digits(&y, bits, n + 1);

    let mut res = vec![0u64; n];
    recover_reduce(&mut res, &op1, &op2, bits, m);
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use strata_integers::modular::primes;

    fn naive_mul(a: &[u64], b: &[u64], m: &NMod) -> Vec<u64> {
        let mut res = vec![0u64; a.len() + b.len() - 1];
        for (i, &x) in a.iter().enumerate() {
            for (j, &y) in b.iter().enumerate() {
                res[i + j] = m.add(res[i + j], m.mul(x, y));
            }
        }
        res
    }

    #[test]
    fn test_pack_unpack() {
        let coeffs = [5u64, 0, 7, 1];
        let x = pack(&coeffs, 3, false);
        assert_eq!(unpack_digits(&x, 3, 5), vec![5, 0, 7, 1, 0]);
        let y = pack(&coeffs, 3, true);
        assert_eq!(unpack_digits(&y, 3, 4), vec![1, 7, 0, 5]);
    }

    #[test]
    fn test_mul_ks_small_modulus() {
        let m = NMod::new(7);
        let a = [1u64, 2, 3, 4, 5, 6];
        let b = [6u64, 5, 4];
        assert_eq!(mul_ks(&a, &b, &m), naive_mul(&a, &b, &m));
    }

    #[test]
    fn test_mul_ks_every_width_path() {
        // Digit widths 11, 44, 64 and 67 bits: one modulus per path
        for n in [251u64, (1 << 40) + 15, primes::MERSENNE_61, primes::P64] {
            let m = NMod::new(n);
            let a: Vec<u64> = (0..23u64).map(|i| m.red(i.wrapping_mul(0x9e37_79b9_7f4a_7c15))).collect();
            let b: Vec<u64> = (0..17u64).map(|i| m.red(u64::MAX - i * 977)).collect();
            assert_eq!(mul_ks(&a, &b, &m), naive_mul(&a, &b, &m), "modulus {n}");
        }
    }

    #[test]
    fn test_mul_ks_modulus_one() {
        let m = NMod::new(1);
        assert_eq!(mul_ks(&[0, 0], &[0], &m), vec![0, 0]);
    }

    #[test]
    fn test_random_operands_match_naive() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..60 {
            let n = match rng.gen_range(0..3) {
                0 => rng.gen_range(2..1 << 16),
                1 => rng.gen_range(1 << 16..1 << 48),
                _ => rng.gen_range(1 << 48..=u64::MAX),
            };
            let m = NMod::new(n);
            let len_a = rng.gen_range(1..=60);
            let len_b = rng.gen_range(1..=60);
            let a: Vec<u64> = (0..len_a).map(|_| rng.gen_range(0..n)).collect();
            let b: Vec<u64> = (0..len_b).map(|_| rng.gen_range(0..n)).collect();
            assert_eq!(mul_ks(&a, &b, &m), naive_mul(&a, &b, &m), "modulus {n}");
        }
    }
}
