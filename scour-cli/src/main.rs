//! scour CLI
//!
//! Sanitizes text for embedding in markup.

use std::io;

use anyhow::Result;
use clap::Parser;
use scour_cli::{Cli, print_summary};
use scour_common::warning::set_quiet;

fn main() -> Result<()> {
    let cli = Cli::parse();
    set_quiet(cli.quiet);

    let summary = cli.run(io::stdin().lock(), &mut io::stdout().lock())?;

    if cli.stats {
        print_summary(&summary);
    }

    Ok(())
}
