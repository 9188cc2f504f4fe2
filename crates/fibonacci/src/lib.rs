//! Recursive Fibonacci benchmark
//!
//! Computes `fib(42)` with the textbook double recursion and reports it as a
//! single tagged line, so the run time measures raw function-call overhead.
//! The same program exists for every language in the suite; all of them print
//! `<TAG> | Resultado: <value>` and the harness compares those lines.
//!
//! # Example
//!
//! ```
//! use fibonacci::{fib, result_line};
//!
//! assert_eq!(fib(10), 55);
//! assert_eq!(result_line("Rust", fib(10)), "Rust    | Resultado: 55");
//! ```

pub mod error;
pub mod fib;
pub mod output;

pub use error::FibError;
pub use fib::{MAX_FIB_INPUT, checked_fib, fib};
pub use output::{SEPARATOR, TAG_WIDTH, parse_result_line, result_line};

/// Input size shared by every implementation in the suite
pub const N: u32 = 42;

/// `fib(N)`, the value every implementation must print
pub const EXPECTED: u64 = 267_914_296;

/// Language tag this implementation reports
pub const LANG_TAG: &str = "Rust";
