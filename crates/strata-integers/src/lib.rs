//! # strata-integers
//!
//! Leaf arithmetic for the Strata ring tower.
//!
//! This crate wraps `dashu` and machine words to provide:
//! - Arbitrary precision integers (`Integer`), the INTEGER leaf ring
//! - Word-size moduli with precomputed inverses (`NMod`), used by
//!   MACHINE_WORD quotient rings and the Kronecker substitution kernels
//!
//! ## Performance Notes
//!
//! - Small integers (fitting in a machine word) use stack allocation
//! - `NMod` reduces one, two or three words without hardware division

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod integer;
pub mod modular;

#[cfg(test)]
mod proptests;

pub use integer::Integer;
pub use modular::NMod;
