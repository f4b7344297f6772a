//! `dotlink` binary entry point.
use std::process::ExitCode;

use clap::Parser;

use dotlink::cli::Cli;
use dotlink::commands;
use dotlink::logging::{self, Log as _, Logger};

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();
    let file_logging = logging::init_subscriber(args.verbose);
    let log = Logger::new();

    match (file_logging, log.log_path()) {
        (true, Some(path)) => log.debug(&format!("logging to {}", path.display())),
        _ => log.warn("cannot open the log file; logging to the console only"),
    }

    match commands::install::run(&args, &log) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log.error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
