//! Storeprobe CLI
//!
//! ## Usage
//!
//! ```bash
//! storeprobe decode response.html          # Recover JSON from a body
//! curl -s $URL | storeprobe decode         # ... or from stdin
//! storeprobe encode email=a@b.c password=1 # Build a form body
//! storeprobe api search top                # Query the store
//! ```

use clap::Parser;
use std::process::ExitCode;
use storeprobe_cli::{
    handlers::{execute_api, execute_decode, execute_encode},
    init_logging, Cli, CliConfig, CliResult, ColorChoice, Commands, Verbosity,
};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let config = build_config(&cli);
    init_logging(&config);

    match cli.command {
        Commands::Decode(args) => execute_decode(&config, &args),
        Commands::Encode(args) => execute_encode(&config, &args),
        Commands::Api(args) => execute_api(&config, &args),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    let color: ColorChoice = cli.color.clone().into();

    CliConfig::new()
        .with_verbosity(verbosity)
        .with_color(color)
        .with_format(cli.format.into())
}
