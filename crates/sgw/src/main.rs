//! Suggestion Gateway - Entry Point
//!
//! Binary entry point; lives in the `sgw` facade crate next to the library.

// Force-link sgw-providers to ensure adapter registrations are included
extern crate sgw_providers;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use sgw::cli::{Cli, run};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let command = format!("{:?}", cli.command);
    run(cli)
        .await
        .with_context(|| format!("sgw command failed: {command}"))
}
