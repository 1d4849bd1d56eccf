//! `gtc-peer` - EAP-GTC peer method and settings toolkit

use clap::Parser;

use gtc_peer::cli::args::Cli;
use gtc_peer::cli::commands;
use gtc_peer::error::ExitCode;
use gtc_peer::observability::{init_logging, init_metrics};

fn main() {
    let cli = Cli::parse();

    if !cli.quiet {
        init_logging(cli.log_format, cli.verbose, cli.color);
    }

    let metrics = if cli.metrics {
        match init_metrics() {
            Ok(handle) => Some(handle),
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(e.exit_code());
            }
        }
    } else {
        None
    };

    let result = commands::dispatch(cli);

    if let Some(handle) = metrics {
        eprint!("{}", handle.render());
    }

    match result {
        Ok(()) => std::process::exit(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
