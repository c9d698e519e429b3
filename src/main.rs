use clap::Parser;
use std::process::ExitCode;
use wikidump_config::Config;

mod cli;
mod commands;
mod logging;

use crate::cli::{Cli, Command};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("Configuration error: {error:?}");
            return ExitCode::FAILURE;
        },
    };
    let success = match cli.command {
        Command::Export(args) => commands::export(config, args).await,
        Command::Convert(args) => commands::convert(config, args),
    };
    if success { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}
