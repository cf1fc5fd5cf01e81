//! # dp-dpll
//!
//! `dp-dpll` decides the satisfiability of CNF formulas with one of two
//! complete procedures:
//! 1.  **DP (Davis-Putnam)**: eliminates variables one at a time by resolution.
//!     It proves satisfiability without producing a model.
//! 2.  **DPLL (Davis-Putnam-Logemann-Loveland)**: backtracking search with unit
//!     propagation and pure-literal elimination. It produces a model.
//!
//! ## Usage
//!
//! ```sh
//! dp-dpll problem.cnf
//! dp-dpll file --path problem.cnf --solver dp
//! dp-dpll text --input "1 2 0\n-1 0" --print-solution
//! dp-dpll dir --path benchmarks/ --stats false
//! dp-dpll completions bash
//! ```
//!
//! Every run ends with one of `SATISFIABLE`, `UNSATISFIABLE` or `UNKNOWN`
//! (a search budget ran out) and exits with status 0. Unreadable or
//! malformed input exits non-zero.
//!
//! Logging goes to stderr through `tracing`; `-v` raises the level and
//! `RUST_LOG` overrides it.

use clap::Parser;

mod command_line;

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() -> anyhow::Result<()> {
    let cli = command_line::cli::Cli::parse();
    command_line::cli::run(cli)
}
