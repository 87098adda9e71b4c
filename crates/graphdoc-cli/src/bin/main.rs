//! graphdoc CLI binary entry point
//!
//! Thin wrapper that calls the library's `run_cli()` function.

use anyhow::Result;
use graphdoc_cli::run_cli;

fn main() -> Result<()> {
    run_cli()
}
