//! # strata-poly
//!
//! Leaf polynomial kernels for the Strata ring tower.
//!
//! This crate provides the performance-critical routines the generic ring
//! layer bottoms out in:
//! - Karatsuba multiplication, full and truncated ("mullow")
//! - Schoolbook division over Z/pZ with a precomputed leading inverse
//! - Kronecker substitution with width-dispatched digit recovery
//!
//! ## Algorithm Selection
//!
//! `strata-rings` chooses between kernels by operand length. Inside
//! `karatsuba_mul`, pieces shorter than `KARATSUBA_THRESHOLD` (32) fall
//! back to schoolbook O(n²); longer ones split in half for O(n^1.58).
//! `mullow` uses the classical truncated product up to
//! `MULLOW_CLASSICAL_CUTOFF`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use num_traits::Zero;
use std::ops::{Add, Mul, Sub};

pub mod algorithms;

#[cfg(test)]
mod proptests;

pub use algorithms::karatsuba::{karatsuba_mul, mullow, mullow_karatsuba_n, schoolbook_mul};

/// Coefficient types the multiplication kernels accept.
pub trait Coeff: Clone + Zero + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self> {}

impl<T> Coeff for T where T: Clone + Zero + Add<Output = T> + Sub<Output = T> + Mul<Output = T> {}
