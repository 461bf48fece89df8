//! Polynomial algorithms.
//!
//! This module contains the leaf kernels of the generic layer:
//! - Karatsuba multiplication, including the truncated variant
//! - Basecase division with a precomputed leading inverse
//! - Kronecker substitution and digit-window recovery

pub mod div_basecase;
pub mod karatsuba;
pub mod kronecker;
