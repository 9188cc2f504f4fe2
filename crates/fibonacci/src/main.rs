//! Fibonacci benchmark entry
//!
//! Takes no arguments. Prints exactly one line to stdout:
//! `Rust    | Resultado: 267914296`.

use fibonacci::{LANG_TAG, N, fib, result_line};
use std::io::{self, Write};
use std::process;
use std::time::Instant;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() {
    // Fixed filter: the benchmark reads no environment variables
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("fibonacci=warn"))
        .with_writer(io::stderr)
        .init();

    let start = Instant::now();
    let result = fib(N);
    debug!(
        n = N,
        result,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "computed fib"
    );

    let mut stdout = io::stdout().lock();
    if let Err(e) = writeln!(stdout, "{}", result_line(LANG_TAG, result)) {
        eprintln!("Error writing result: {}", e);
        process::exit(1);
    }
}
