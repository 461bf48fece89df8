//! # strata-rings
//!
//! Runtime-described ring towers for Strata.
//!
//! This crate provides:
//! - A closed ring descriptor (`Ring`): integers, machine words, quotient
//!   rings, fraction rings and univariate polynomial rings over any of them
//! - A matching closed element type (`Elem`) with an owned polynomial
//!   buffer (`PolyBuf`) and typed fraction parts (`FracElem`)
//! - One set of dispatch functions (`add`, `mul`, `divrem`, ...) that works
//!   across the whole tower, with in-place forms for aliased outputs
//! - Content extraction and polynomial gcd over gcd domains
//! - Random test elements and a ring/element handle (`Gen`)
//!
//! ## Tower Layout
//!
//! ```text
//! Polynomial ──► coeff
//! Fraction   ──► numer, denom   (denom == numer, or numer's coefficient ring)
//! Quotient   ──► base           (Integer, MachineWord or Polynomial)
//! Integer, MachineWord          (leaves)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use strata_rings::{Gen, Ring};
//!
//! let zx = Ring::polynomial(Ring::integer());
//! let a = Gen::from_coeffs_si(&zx, &[1, 2, 3]);
//! let b = Gen::from_coeffs_si(&zx, &[0, 1]);
//! assert_eq!((&a * &b).to_string(), "[0, 1, 2, 3]");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod content;
pub mod dispatch;
pub mod elem;
pub mod error;
pub mod fatal;
pub mod frac;
pub mod gen;
pub mod poly;
pub mod random;
pub mod ring;

#[cfg(test)]
mod proptests;

pub use content::{content_recursive, div_content_recursive, mul_content_recursive};
pub use dispatch::{
    add, add_assign, divexact, divexact_assign, divrem, divrem_assign, divrem_quo_assign, gcd,
    inv, mul, mul_assign, mullow, neg, neg_assign, pow_ui, scalar_mul, sub, sub_assign,
    sub_rev_assign, try_divexact,
};
pub use elem::{Elem, FracElem, PolyBuf};
pub use error::{ArithError, Result};
pub use frac::frac_canonicalise;
pub use gen::Gen;
pub use random::randtest;
pub use ring::{Ring, RingKind};
