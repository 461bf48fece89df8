//! Property-based tests across ring towers.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use strata_integers::Integer;

    use crate::content::{content_recursive, div_content_recursive, mul_content_recursive};
    use crate::dispatch::{
        add, add_assign, divrem, divrem_assign, divrem_quo_assign, mul, mul_assign, mullow, sub,
        sub_assign, sub_rev_assign,
    };
    use crate::elem::Elem;
    use crate::random::{randtest, randtest_not_zero};
    use crate::ring::Ring;

    const TOWERS: usize = 11;

    fn tower(index: usize) -> Arc<Ring> {
        let z = Ring::integer();
        let zx = Ring::polynomial(z.clone());
        match index {
            0 => z,
            1 => Ring::machine_word(),
            2 => Ring::integers_mod(&Integer::new(1_000_000_007)),
            3 => Ring::words_mod(360),
            4 => zx,
            5 => Ring::polynomial(Ring::integers_mod(&Integer::new(7))),
            6 => Ring::polynomial(Ring::words_mod(u64::MAX - 58)),
            7 => Ring::polynomial(zx),
            8 => Ring::fraction(z.clone(), z),
            9 => Ring::fraction(zx, z),
            _ => {
                let m = Elem::poly_from_si(&[1, 0, 1], &zx);
                Ring::quotient(zx, m)
            }
        }
    }

    /// Polynomial rings whose coefficient ring is a field.
    fn field_poly_ring(index: usize) -> Arc<Ring> {
        match index % 3 {
            0 => Ring::polynomial(Ring::integers_mod(&Integer::new(10_007))),
            1 => Ring::polynomial(Ring::words_mod(65_537)),
            _ => Ring::polynomial(Ring::fraction(Ring::integer(), Ring::integer())),
        }
    }

    const SIZE: [usize; 3] = [8, 4, 40];

    fn elements(seed: u64, ring: &Ring, n: usize) -> Vec<Elem> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (0..n).map(|_| randtest(&mut rng, &SIZE, ring)).collect()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn add_sub_aliasing(seed in any::<u64>(), t in 0..TOWERS) {
            let ring = tower(t);
            let v = elements(seed, &ring, 2);
            let (a, b) = (&v[0], &v[1]);
            let mut fresh = Elem::init(&ring);

            add(&mut fresh, a, b, &ring);
            let mut x = a.clone();
            add_assign(&mut x, b, &ring);
            prop_assert!(x.equal(&fresh, &ring));
            let mut x = b.clone();
            add_assign(&mut x, a, &ring);
            prop_assert!(x.equal(&fresh, &ring));

            sub(&mut fresh, a, b, &ring);
            let mut x = a.clone();
            sub_assign(&mut x, b, &ring);
            prop_assert!(x.equal(&fresh, &ring));
            let mut x = b.clone();
            sub_rev_assign(&mut x, a, &ring);
            prop_assert!(x.equal(&fresh, &ring));
        }

        #[test]
        fn mul_aliasing(seed in any::<u64>(), t in 0..TOWERS) {
            let ring = tower(t);
            let v = elements(seed, &ring, 2);
            let (a, b) = (&v[0], &v[1]);
            let mut fresh = Elem::init(&ring);

            mul(&mut fresh, a, b, &ring);
            let mut x = a.clone();
            mul_assign(&mut x, b, &ring);
            prop_assert!(x.equal(&fresh, &ring));

            mul(&mut fresh, a, a, &ring);
            let mut x = a.clone();
            let y = x.clone();
            mul_assign(&mut x, &y, &ring);
            prop_assert!(x.equal(&fresh, &ring));
        }

        #[test]
        fn add_is_commutative_and_associative(seed in any::<u64>(), t in 0..TOWERS) {
            let ring = tower(t);
            let v = elements(seed, &ring, 3);
            let (a, b, c) = (&v[0], &v[1], &v[2]);
            let (mut ab, mut ba) = (Elem::init(&ring), Elem::init(&ring));
            add(&mut ab, a, b, &ring);
            add(&mut ba, b, a, &ring);
            prop_assert!(ab.equal(&ba, &ring));

            let (mut left, mut bc, mut right) = (Elem::init(&ring), Elem::init(&ring), Elem::init(&ring));
            add(&mut left, &ab, c, &ring);
            add(&mut bc, b, c, &ring);
            add(&mut right, a, &bc, &ring);
            prop_assert!(left.equal(&right, &ring));
        }

        #[test]
        fn divrem_identity_and_aliasing(seed in any::<u64>(), t in 0usize..3) {
            let ring = field_poly_ring(t);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let a = randtest(&mut rng, &[12, 16], &ring);
            let b = randtest_not_zero(&mut rng, &[6, 16], &ring);

            let (mut q, mut r) = (Elem::init(&ring), Elem::init(&ring));
            divrem(&mut q, &mut r, &a, &b, &ring);
            prop_assert!(r.poly().len() < b.poly().len());
            let mut check = Elem::init(&ring);
            mul(&mut check, &q, &b, &ring);
            add_assign(&mut check, &r, &ring);
            prop_assert!(check.equal(&a, &ring));

            let mut x = a.clone();
            let mut q2 = Elem::init(&ring);
            divrem_assign(&mut q2, &mut x, &b, &ring);
            prop_assert!(q2.equal(&q, &ring) && x.equal(&r, &ring));

            let mut x = a.clone();
            let mut r2 = Elem::init(&ring);
            divrem_quo_assign(&mut x, &mut r2, &b, &ring);
            prop_assert!(x.equal(&q, &ring) && r2.equal(&r, &ring));
        }

        #[test]
        fn divrem_by_monic_over_integers(seed in any::<u64>()) {
            let ring = tower(4);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let a = randtest(&mut rng, &[14, 30], &ring);
            let mut b = randtest(&mut rng, &[6, 30], &ring);
            let deg = b.poly().len();
            b.set_coeff_si(deg, 1, &ring);

            let (mut q, mut r) = (Elem::init(&ring), Elem::init(&ring));
            divrem(&mut q, &mut r, &a, &b, &ring);
            prop_assert!(r.poly().len() < b.poly().len());
            let mut check = Elem::init(&ring);
            mul(&mut check, &q, &b, &ring);
            add_assign(&mut check, &r, &ring);
            prop_assert_eq!(check, a);
        }

        #[test]
        fn mullow_is_truncated_mul(seed in any::<u64>(), t in prop::sample::select(vec![4usize, 5, 6, 7]), n in 0usize..20) {
            let ring = tower(t);
            let coeff = ring.coeff_ring().unwrap().clone();
            let v = elements(seed, &ring, 2);
            let (mut low, mut full) = (Elem::init(&ring), Elem::init(&ring));
            mullow(&mut low, &v[0], &v[1], n, &ring);
            mul(&mut full, &v[0], &v[1], &ring);
            full.poly_mut().truncate(n, &coeff);
            prop_assert!(low.equal(&full, &ring));
        }

        #[test]
        fn content_roundtrip(seed in any::<u64>(), t in prop::sample::select(vec![4usize, 5, 6, 7])) {
            let ring = tower(t);
            let mut coeff = ring.coeff_ring().unwrap().clone();
            let x = elements(seed, &ring, 1).pop().unwrap();

            // Every level below the top, innermost last
            loop {
                let mut c = Elem::init(&coeff);
                content_recursive(&mut c, &x, &coeff, &ring);
                let mut y = x.clone();
                div_content_recursive(&mut y, &c, &coeff, &ring);
                mul_content_recursive(&mut y, &c, &coeff, &ring);
                prop_assert!(y.equal(&x, &ring), "content {} of {}", c, x);

                match coeff.coeff_ring() {
                    Some(inner) => coeff = inner.clone(),
                    None => break,
                }
            }
        }

        #[test]
        fn word_residue_products_agree_across_widths(seed in any::<u64>()) {
            // The same product over Z/pZ with word and big-integer residues
            let p = 1_000_000_007u64;
            let wr = Ring::polynomial(Ring::words_mod(p));
            let ir = Ring::polynomial(Ring::integers_mod(&Integer::from(p)));
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let len_a = rand::Rng::gen_range(&mut rng, 0..40usize);
            let len_b = rand::Rng::gen_range(&mut rng, 0..40usize);
            let a: Vec<i64> = (0..len_a).map(|_| rand::Rng::gen_range(&mut rng, 0..p as i64)).collect();
            let b: Vec<i64> = (0..len_b).map(|_| rand::Rng::gen_range(&mut rng, 0..p as i64)).collect();

            let mut w = Elem::init(&wr);
            mul(&mut w, &Elem::poly_from_si(&a, &wr), &Elem::poly_from_si(&b, &wr), &wr);
            let mut i = Elem::init(&ir);
            mul(&mut i, &Elem::poly_from_si(&a, &ir), &Elem::poly_from_si(&b, &ir), &ir);
            prop_assert_eq!(w.to_string(), i.to_string());
        }
    }
}
