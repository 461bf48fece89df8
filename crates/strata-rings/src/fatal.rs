//! Configuration errors.
//!
//! Asking a ring for an operation its kind does not support is a mistake in
//! how the tower was assembled. It is logged and the process aborts.

use tracing::error;

use crate::ring::Ring;

/// Reports that `op` is not available for `ring` and aborts.
#[cold]
#[inline(never)]
pub fn not_implemented(op: &str, ring: &Ring) -> ! {
    error!(op, %ring, "operation not implemented");
    eprintln!("operation {op} not implemented for ring {ring}");
    std::process::abort()
}
