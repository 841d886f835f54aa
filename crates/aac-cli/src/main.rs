mod app;
mod cli;
mod commands;
mod constants;
mod errors;
mod helpers;
mod logging;
mod output;

use clap::Parser;

use crate::app::AppContext;
use crate::cli::Cli;
use crate::errors::CliError;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let ctx = AppContext::new(&cli);
    if let Err(err) = commands::run(&ctx, &cli.command) {
        if let Some(cli_err) = CliError::classify(&err) {
            cli_err.exit();
        }
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
