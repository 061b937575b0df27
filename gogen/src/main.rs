//! gogen entry point.

mod cli;

use clap::Parser;
use cli::{Cli, Command};
use gogen_codegen::Generator;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "done");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("gogen: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<PathBuf> {
    let Command::Type(command) = cli.command;
    let dir = std::env::current_dir()?;
    let request = command.args().to_request(command.kind(), dir);
    let path = Generator::new().generate(&request)?;
    Ok(path)
}
