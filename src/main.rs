//! # hydrotrace CLI
//!
//! Inspect thermal-hydraulic simulation output and replay saved derived
//! columns from the command line.
//!
//! ## Usage
//!
//! ```bash
//! # Detect the format and list the parameters
//! hydrotrace info res_cyclic.txt --encoding cp1251
//!
//! # Reload a session and rebuild its derived columns
//! hydrotrace replay session.toml
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
