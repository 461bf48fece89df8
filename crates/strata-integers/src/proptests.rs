//! Property-based tests for big-integer and word-modulus arithmetic.

#[cfg(test)]
mod tests {
    use num_traits::Zero;
    use proptest::prelude::*;

    use crate::{Integer, NMod};

    // Strategy for generating small integers
    fn small_int() -> impl Strategy<Value = i64> {
        -1000i64..1000i64
    }

    // Strategy for generating non-zero integers
    fn non_zero_int() -> impl Strategy<Value = i64> {
        prop_oneof![(-1000i64..=-1i64), (1i64..=1000i64)]
    }

    // Strategy for generating moduli across the whole word range
    fn modulus() -> impl Strategy<Value = u64> {
        prop_oneof![1u64..1000u64, 1u64..=u64::MAX, (1u64 << 63)..=u64::MAX]
    }

    proptest! {
        // Integer ring axioms

        #[test]
        fn integer_add_commutative(a in small_int(), b in small_int()) {
            let a = Integer::new(a);
            let b = Integer::new(b);
            prop_assert_eq!(a.clone() + b.clone(), b.clone() + a.clone());
        }

        #[test]
        fn integer_add_associative(a in small_int(), b in small_int(), c in small_int()) {
            let a = Integer::new(a);
            let b = Integer::new(b);
            let c = Integer::new(c);
            prop_assert_eq!(
                (a.clone() + b.clone()) + c.clone(),
                a.clone() + (b.clone() + c.clone())
            );
        }

        #[test]
        fn integer_distributive(a in small_int(), b in small_int(), c in small_int()) {
            let a = Integer::new(a);
            let b = Integer::new(b);
            let c = Integer::new(c);
            prop_assert_eq!(
                a.clone() * (b.clone() + c.clone()),
                a.clone() * b.clone() + a.clone() * c.clone()
            );
        }

        // Division properties

        #[test]
        fn fdiv_qr_reconstructs(a in any::<i64>(), d in non_zero_int()) {
            let a = Integer::new(a);
            let d = Integer::new(d);
            let (q, r) = a.fdiv_qr(&d);
            prop_assert_eq!(&(&q * &d) + &r, a);
            prop_assert!(r.abs() < d.abs());
            prop_assert!(r.is_zero() || r.signum() == d.signum());
        }

        #[test]
        fn gcd_divides_both(a in non_zero_int(), b in non_zero_int()) {
            let a = Integer::new(a);
            let b = Integer::new(b);
            let g = a.gcd(&b);

            prop_assert!(a.is_divisible_by(&g));
            prop_assert!(b.is_divisible_by(&g));
            prop_assert!(!g.is_negative());
        }

        #[test]
        fn invmod_is_inverse(a in small_int(), m in 2i64..500i64) {
            let a = Integer::new(a);
            let m = Integer::new(m);
            match a.invmod(&m) {
                Some(inv) => prop_assert!((&a * &inv).fdiv_r(&m) == Integer::new(1)),
                None => prop_assert!(!a.gcd(&m).is_zero() && a.gcd(&m) != Integer::new(1)),
            }
        }

        // NMod reductions against u128 arithmetic

        #[test]
        fn nmod_red2_matches_u128(n in modulus(), hi in any::<u64>(), lo in any::<u64>()) {
            let m = NMod::new(n);
            let expected = ((u128::from(hi) << 64) | u128::from(lo)) % u128::from(n);
            prop_assert_eq!(u128::from(m.red2(hi, lo)), expected);
        }

        #[test]
        fn nmod_red3_matches_reference(n in modulus(), hi in any::<u64>(), mid in any::<u64>(), lo in any::<u64>()) {
            let m = NMod::new(n);
            let n128 = u128::from(n);
            let t = ((u128::from(hi) << 64) | u128::from(mid)) % n128;
            let expected = ((t << 64) | u128::from(lo)) % n128;
            prop_assert_eq!(u128::from(m.red3(hi, mid, lo)), expected);
        }

        #[test]
        fn nmod_mul_matches_u128(n in modulus(), a in any::<u64>(), b in any::<u64>()) {
            let m = NMod::new(n);
            let (a, b) = (a % n, b % n);
            let expected = (u128::from(a) * u128::from(b)) % u128::from(n);
            prop_assert_eq!(u128::from(m.mul(a, b)), expected);
        }

        #[test]
        fn nmod_add_sub_roundtrip(n in modulus(), a in any::<u64>(), b in any::<u64>()) {
            let m = NMod::new(n);
            let (a, b) = (a % n, b % n);
            prop_assert_eq!(m.sub(m.add(a, b), b), a);
        }

        #[test]
        fn nmod_fermat_little_theorem(a in 1u64..1000u64) {
            const P: u64 = 998_244_353;
            let m = NMod::new(P);
            // a^(p-1) = 1 (mod p) for a != 0
            prop_assert_eq!(m.pow(a, P - 1), 1);
            let inv = m.inv(a).expect("inverse should exist for non-zero mod prime");
            prop_assert_eq!(m.mul(a, inv), 1);
        }
    }

    #[test]
    fn zero_is_additive_identity() {
        let a = Integer::new(-17);
        assert_eq!(a.clone() + Integer::zero(), a);
    }
}
