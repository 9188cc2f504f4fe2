//! The benchmarked function.
//!
//! `fib` is intentionally the exponential double recursion. Do not memoize,
//! iterate, or rewrite it into tail calls: the call tree *is* the workload.

use crate::error::FibError;

/// Largest `n` for which `fib(n)` fits in a `u64`
pub const MAX_FIB_INPUT: u32 = 93;

/// Naive recursive Fibonacci.
///
/// `fib(0) = 0`, `fib(1) = 1`, `fib(n) = fib(n - 1) + fib(n - 2)`.
/// Inputs above [`MAX_FIB_INPUT`] overflow; use [`checked_fib`] when `n`
/// is not a known constant.
pub fn fib(n: u32) -> u64 {
    if n < 2 {
        return n as u64;
    }
    fib(n - 1) + fib(n - 2)
}

/// [`fib`] for inputs whose result fits in a `u64`.
///
/// `fib(n)` fits exactly when `n <= MAX_FIB_INPUT`, so the bound check is the
/// whole overflow test; larger inputs are rejected before any recursion.
pub fn checked_fib(n: u32) -> Result<u64, FibError> {
    if n > MAX_FIB_INPUT {
        return Err(FibError::Overflow { n });
    }
    Ok(fib(n))
}
