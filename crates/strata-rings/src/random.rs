//! Random elements for tests and benchmarks.
//!
//! `size[0]` bounds the outermost level: the bit size of an integer or the
//! length of a polynomial. The remaining entries bound the levels below;
//! when they run out the last entry is reused.

use rand::Rng;
use strata_integers::Integer;

use crate::dispatch;
use crate::elem::{Elem, PolyBuf};
use crate::ring::Ring;

/// Machine words that tend to expose carry and overflow bugs.
const SPECIAL_WORDS: [u64; 6] = [0, 1, 2, u64::MAX, u64::MAX - 1, 1 << 63];

fn inner(size: &[usize]) -> &[usize] {
    if size.len() > 1 {
        &size[1..]
    } else {
        size
    }
}

fn random_word<R: Rng + ?Sized>(rng: &mut R, bits: usize) -> u64 {
    match rng.gen_range(0..4) {
        0 => SPECIAL_WORDS[rng.gen_range(0..SPECIAL_WORDS.len())],
        1 if (1..64).contains(&bits) => rng.gen::<u64>() >> (64 - bits),
        _ => rng.gen(),
    }
}

/// Draws a random element of `ring`.
///
/// Quotient elements are always reduced. Fractions get a non-zero
/// denominator but are not canonicalised.
pub fn randtest<R: Rng + ?Sized>(rng: &mut R, size: &[usize], ring: &Ring) -> Elem {
    let top = size.first().copied().unwrap_or(0);
    match ring {
        Ring::Integer => Elem::Integer(Integer::random_bits(rng, top)),
        Ring::MachineWord => Elem::Word(random_word(rng, top)),
        Ring::Quotient { base, modulus, .. } => match &**base {
            Ring::MachineWord => Elem::Word(rng.gen_range(0..modulus.word())),
            Ring::Integer => {
                let m = modulus.integer();
                let x = Integer::random_bits(rng, m.bit_len() + 8);
                Elem::Integer(x.fdiv_r(m))
            }
            _ => {
                let mut x = randtest(rng, size, base);
                dispatch::reduce(&mut x, ring);
                x
            }
        },
        Ring::Fraction { numer, denom } => {
            let num = randtest(rng, size, numer);
            let den_size = if ring.is_mixed_fraction() { inner(size) } else { size };
            let den = randtest_not_zero(rng, den_size, denom);
            Elem::fraction(num, den)
        }
        Ring::Polynomial { coeff } => {
            let len = rng.gen_range(0..=top);
            let sub = inner(size);
            let coeffs = (0..len).map(|_| randtest(rng, sub, coeff)).collect();
            Elem::Poly(PolyBuf::from_coeffs(coeffs))
        }
    }
}

/// Like [`randtest`] but retries until the element is non-zero, falling
/// back to one.
pub fn randtest_not_zero<R: Rng + ?Sized>(rng: &mut R, size: &[usize], ring: &Ring) -> Elem {
    for _ in 0..16 {
        let x = randtest(rng, size, ring);
        if !x.is_zero() {
            return x;
        }
    }
    Elem::one_of(ring)
}
