//! Ring descriptors.
//!
//! A [`Ring`] describes one level of an algebraic tower. Composite rings
//! hold their constituents through `Arc`, so a sub-ring shared by several
//! towers stays alive until the last of them is dropped. Rings are built
//! leaf-first and never change afterwards.

use std::fmt;
use std::mem::size_of;
use std::sync::Arc;

use strata_integers::{Integer, NMod};

use crate::dispatch;
use crate::elem::{Elem, PolyBuf};
use crate::fatal;

/// The kind of a ring, without its parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RingKind {
    /// Arbitrary precision integers.
    Integer,
    /// Unsigned 64-bit words with wrapping arithmetic.
    MachineWord,
    /// A base ring modulo a fixed element.
    Quotient,
    /// Pairs `num / den`.
    Fraction,
    /// Dense univariate polynomials.
    Polynomial,
}

/// A ring descriptor.
///
/// Two descriptors are equal when they describe the same tower, whether or
/// not they share storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Ring {
    /// Z.
    Integer,
    /// Z/2^64 Z with wrapping arithmetic.
    MachineWord,
    /// `base / (modulus)`.
    Quotient {
        /// The ring being reduced.
        base: Arc<Ring>,
        /// The modulus; a positive integer for an integer base.
        modulus: Elem,
        /// Precomputed reduction data when the base is `MachineWord`.
        nmod: Option<NMod>,
    },
    /// Fractions with numerators in `numer` and denominators in `denom`.
    Fraction {
        /// Numerator ring.
        numer: Arc<Ring>,
        /// Denominator ring: `numer` itself or its coefficient ring.
        denom: Arc<Ring>,
    },
    /// `coeff[x]`.
    Polynomial {
        /// Coefficient ring.
        coeff: Arc<Ring>,
    },
}

impl Ring {
    /// The ring of integers.
    #[must_use]
    pub fn integer() -> Arc<Ring> {
        Arc::new(Ring::Integer)
    }

    /// The ring of machine words.
    #[must_use]
    pub fn machine_word() -> Arc<Ring> {
        Arc::new(Ring::MachineWord)
    }

    /// The quotient of `base` by `modulus`.
    ///
    /// An integer modulus is stored by absolute value so that residues lie
    /// in `[0, |m|)`.
    ///
    /// # Panics
    ///
    /// Panics if `modulus` is zero, is not an element of `base`, or is a
    /// polynomial whose leading coefficient is not invertible. Aborts if
    /// `base` is a fraction or quotient ring.
    #[must_use]
    pub fn quotient(base: Arc<Ring>, modulus: Elem) -> Arc<Ring> {
        assert!(!modulus.is_zero(), "modulus cannot be zero");
        let (modulus, nmod) = match &*base {
            Ring::Integer => (Elem::Integer(modulus.integer().abs()), None),
            Ring::MachineWord => {
                let nmod = NMod::new(modulus.word());
                (modulus, Some(nmod))
            }
            Ring::Polynomial { coeff } => {
                let lead = modulus.poly().lead().expect("modulus is non-zero");
                let mut lead_inv = Elem::init(coeff);
                assert!(
                    dispatch::inv(&mut lead_inv, lead, coeff).is_ok(),
                    "polynomial modulus must have an invertible leading coefficient"
                );
                (modulus, None)
            }
            Ring::Quotient { .. } | Ring::Fraction { .. } => fatal::not_implemented("quotient", &base),
        };
        Arc::new(Ring::Quotient { base, modulus, nmod })
    }

    /// Z/mZ with a big-integer modulus.
    #[must_use]
    pub fn integers_mod(m: &Integer) -> Arc<Ring> {
        Self::quotient(Self::integer(), Elem::Integer(m.clone()))
    }

    /// Z/nZ with a machine-word modulus.
    #[must_use]
    pub fn words_mod(n: u64) -> Arc<Ring> {
        Self::quotient(Self::machine_word(), Elem::Word(n))
    }

    /// The ring of fractions `numer / denom`.
    ///
    /// # Panics
    ///
    /// Panics unless `denom` equals `numer` or is the coefficient ring of
    /// the polynomial ring `numer`.
    #[must_use]
    pub fn fraction(numer: Arc<Ring>, denom: Arc<Ring>) -> Arc<Ring> {
        let compatible = numer == denom
            || matches!(&*numer, Ring::Polynomial { coeff } if *coeff == denom);
        assert!(
            compatible,
            "denominator ring must be the numerator ring or its coefficient ring"
        );
        Arc::new(Ring::Fraction { numer, denom })
    }

    /// The polynomial ring over `coeff`.
    #[must_use]
    pub fn polynomial(coeff: Arc<Ring>) -> Arc<Ring> {
        Arc::new(Ring::Polynomial { coeff })
    }

    /// Returns the kind of this ring.
    #[must_use]
    pub fn kind(&self) -> RingKind {
        match self {
            Ring::Integer => RingKind::Integer,
            Ring::MachineWord => RingKind::MachineWord,
            Ring::Quotient { .. } => RingKind::Quotient,
            Ring::Fraction { .. } => RingKind::Fraction,
            Ring::Polynomial { .. } => RingKind::Polynomial,
        }
    }

    /// Returns a short name for the ring kind.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Ring::Integer => "integer",
            Ring::MachineWord => "machine word",
            Ring::Quotient { .. } => "quotient",
            Ring::Fraction { .. } => "fraction",
            Ring::Polynomial { .. } => "polynomial",
        }
    }

    /// Coefficient ring of a polynomial ring.
    #[must_use]
    pub fn coeff_ring(&self) -> Option<&Arc<Ring>> {
        match self {
            Ring::Polynomial { coeff } => Some(coeff),
            _ => None,
        }
    }

    /// Numerator ring of a fraction ring.
    #[must_use]
    pub fn numer_ring(&self) -> Option<&Arc<Ring>> {
        match self {
            Ring::Fraction { numer, .. } => Some(numer),
            _ => None,
        }
    }

    /// Denominator ring of a fraction ring.
    #[must_use]
    pub fn denom_ring(&self) -> Option<&Arc<Ring>> {
        match self {
            Ring::Fraction { denom, .. } => Some(denom),
            _ => None,
        }
    }

    /// Base ring of a quotient ring.
    #[must_use]
    pub fn base_ring(&self) -> Option<&Arc<Ring>> {
        match self {
            Ring::Quotient { base, .. } => Some(base),
            _ => None,
        }
    }

    /// Modulus of a quotient ring.
    #[must_use]
    pub fn modulus(&self) -> Option<&Elem> {
        match self {
            Ring::Quotient { modulus, .. } => Some(modulus),
            _ => None,
        }
    }

    /// Reduction data of a quotient over machine words.
    #[must_use]
    pub fn nmod(&self) -> Option<&NMod> {
        match self {
            Ring::Quotient { nmod, .. } => nmod.as_ref(),
            _ => None,
        }
    }

    /// Size in bytes of one element's inline block, not counting heap
    /// storage owned by it.
    #[must_use]
    pub fn elem_size(&self) -> usize {
        match self {
            Ring::Integer => size_of::<Integer>(),
            Ring::MachineWord => size_of::<u64>(),
            Ring::Quotient { base, .. } => base.elem_size(),
            Ring::Fraction { numer, denom } => numer.elem_size() + denom.elem_size(),
            Ring::Polynomial { .. } => size_of::<PolyBuf>(),
        }
    }

    /// True for a fraction ring whose denominators live in the numerator's
    /// coefficient ring.
    pub(crate) fn is_mixed_fraction(&self) -> bool {
        matches!(self, Ring::Fraction { numer, denom } if numer != denom)
    }
}

impl fmt::Display for Ring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ring::Integer => write!(f, "Integer ring"),
            Ring::MachineWord => write!(f, "Machine word ring"),
            Ring::Quotient { base, modulus, .. } => {
                write!(f, "Residue ring of {base} modulo {modulus}")
            }
            Ring::Fraction { numer, denom } if numer == denom => {
                write!(f, "Fraction field of {numer}")
            }
            Ring::Fraction { numer, denom } => {
                write!(f, "Fractions of {numer} over {denom}")
            }
            Ring::Polynomial { coeff } => write!(f, "Univariate polynomial ring over {coeff}"),
        }
    }
}
