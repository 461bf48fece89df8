//! # Strata
//!
//! Generic algebraic arithmetic over ring towers described at runtime.
//!
//! Strata builds rings such as `Z/7Z[x]`, `Frac(Z[x])` or
//! `Z[x][y] / (y^2 + 1)` from a handful of constructors and runs one set of
//! arithmetic routines over all of them.
//!
//! ## Features
//!
//! - **Ring Towers**: integers, machine words, quotients, fractions and
//!   univariate polynomials, nested to any depth
//! - **Aliasing-Safe Dispatch**: fresh-output and in-place forms of every
//!   operation
//! - **Fast Leaf Kernels**: Karatsuba, Kronecker substitution and
//!   width-dispatched word reduction
//! - **Content and GCD**: recursive content extraction and primitive
//!   remainder sequences
//!
//! ## Quick Start
//!
//! ```rust
//! use strata::prelude::*;
//!
//! let z7x = Ring::polynomial(Ring::words_mod(7));
//! let a = Gen::from_coeffs_si(&z7x, &[1, 1]);
//! let b = a.pow(7);
//! // Frobenius: (x + 1)^7 = x^7 + 1 over Z/7
//! assert_eq!(b.to_string(), "[1, 0, 0, 0, 0, 0, 0, 1]");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use strata_integers as integers;
pub use strata_poly as poly;
pub use strata_rings as rings;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use strata_integers::{Integer, NMod};
    pub use strata_rings::{ArithError, Elem, Gen, Ring, RingKind};
}
