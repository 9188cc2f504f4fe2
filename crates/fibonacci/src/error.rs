//! Fibonacci error types.

/// Error returned by [`checked_fib`](crate::checked_fib).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FibError {
    /// `fib(n)` does not fit in a `u64`
    Overflow { n: u32 },
}

impl std::fmt::Display for FibError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FibError::Overflow { n } => {
                write!(f, "fib({}) overflows a 64-bit unsigned integer", n)
            }
        }
    }
}

impl std::error::Error for FibError {}
