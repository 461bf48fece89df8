//! Property-based tests for the leaf kernels.

#[cfg(test)]
mod tests {
    use dashu::integer::UBig;
    use proptest::prelude::*;
    use strata_integers::{Integer, NMod};

    use crate::algorithms::div_basecase::{div_basecase, divrem_basecase};
    use crate::algorithms::karatsuba::{karatsuba_mul, mullow, schoolbook_mul};
    use crate::algorithms::kronecker::{mul_ks, recover_reduce, unpack_digits};

    // Strategy for generating integer coefficient vectors
    fn int_poly(max_len: usize) -> impl Strategy<Value = Vec<Integer>> {
        proptest::collection::vec(any::<i64>().prop_map(Integer::new), 0..=max_len)
    }

    // Digit widths, with the boundary cases of every reduction path
    fn digit_width() -> impl Strategy<Value = u32> {
        prop_oneof![Just(32u32), Just(33), Just(63), Just(64), Just(65), Just(96), 1u32..=96]
    }

    fn modulus() -> impl Strategy<Value = u64> {
        prop_oneof![2u64..1000u64, 2u64..=u64::MAX, (1u64 << 63)..=u64::MAX]
    }

    proptest! {
        #[test]
        fn karatsuba_matches_schoolbook(a in int_poly(80), b in int_poly(80)) {
            prop_assert_eq!(karatsuba_mul(&a, &b), schoolbook_mul(&a, &b));
        }

        #[test]
        fn mullow_is_truncated_product(a in int_poly(60), b in int_poly(60), cut in 0usize..=120) {
            prop_assume!(!a.is_empty() && !b.is_empty());
            let full = schoolbook_mul(&a, &b);
            let len = cut.min(full.len());
            let mut expected = full;
            expected.truncate(len);
            prop_assert_eq!(mullow(&a, &b, len), expected);
        }

        #[test]
        fn divrem_basecase_reconstructs(
            a in proptest::collection::vec(0i64..10_007, 1..30),
            b in proptest::collection::vec(0i64..10_007, 1..10),
            lead in 1i64..10_007,
        ) {
            let p = Integer::new(10_007);
            let a: Vec<Integer> = a.into_iter().map(Integer::new).collect();
            let mut b: Vec<Integer> = b.into_iter().map(Integer::new).collect();
            prop_assume!(a.len() >= b.len());
            *b.last_mut().unwrap() = Integer::new(lead);
            let inv = Integer::new(lead).invmod(&p).unwrap();

            let (q, r) = divrem_basecase(&a, &b, &inv, &p);
            prop_assert_eq!(r.len(), b.len() - 1);
            prop_assert_eq!(&q, &div_basecase(&a, &b, &inv, &p));

            let mut check = schoolbook_mul(&q, &b);
            for (i, ri) in r.iter().enumerate() {
                check[i] = &check[i] + ri;
            }
            let check: Vec<Integer> = check.iter().map(|c| c.fdiv_r(&p)).collect();
            prop_assert_eq!(check, a);
        }

        #[test]
        fn recover_reduce_matches_reference(
            b in digit_width(),
            raw in proptest::collection::vec(any::<[u64; 3]>(), 1..12),
            n in modulus(),
        ) {
            let m = NMod::new(n);
            let bound = UBig::ONE << (2 * b as usize - 1);
            let coeffs: Vec<UBig> = raw.iter().map(|w| UBig::from_words(w) % &bound).collect();
            let len = coeffs.len();

            let mut x = UBig::ZERO;
            let mut y = UBig::ZERO;
            for (i, c) in coeffs.iter().enumerate() {
                x += c.clone() << (b as usize * i);
                y += c.clone() << (b as usize * (len - 1 - i));
            }
            let op1 = unpack_digits(&x, b, len + 1);
            let op2 = unpack_digits(&y, b, len + 1);

            let mut res = vec![0u64; len];
            recover_reduce(&mut res, &op1, &op2, b, &m);

            let modulus = UBig::from(n);
            let expected: Vec<u64> = coeffs
                .iter()
                .map(|c| u64::try_from(c % &modulus).unwrap())
                .collect();
            prop_assert_eq!(res, expected);
        }

        #[test]
        fn mul_ks_matches_naive(
            n in modulus(),
            a in proptest::collection::vec(any::<u64>(), 1..40),
            b in proptest::collection::vec(any::<u64>(), 1..40),
        ) {
            let m = NMod::new(n);
            let a: Vec<u64> = a.into_iter().map(|c| m.red(c)).collect();
            let b: Vec<u64> = b.into_iter().map(|c| m.red(c)).collect();

            let mut naive = vec![0u64; a.len() + b.len() - 1];
            for (i, &x) in a.iter().enumerate() {
                for (j, &y) in b.iter().enumerate() {
                    naive[i + j] = m.add(naive[i + j], m.mul(x, y));
                }
            }
            prop_assert_eq!(mul_ks(&a, &b, &m), naive);
        }
    }
}
