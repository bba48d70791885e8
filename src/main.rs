use clap::Parser;
use log::{error, info};
use tfbs_extract::{Args, LogSink, init_logging, tfbs_extract};

use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();

    match init_logging(args.log_dir(), args.effective_level()) {
        Ok(Some(path)) => info!("Logging to {}", path.display()),
        Ok(None) => {}
        Err(e) => {
            eprintln!("ERROR: {}", e);
            return ExitCode::FAILURE;
        }
    }

    match tfbs_extract(&args, &LogSink::default()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("ERROR: {}", e);
            ExitCode::FAILURE
        }
    }
}
