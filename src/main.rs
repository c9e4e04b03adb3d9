use clap::Parser;

use log::{error, info};
use std::process::ExitCode;

use nabirds2voc::{convert, Args};

fn main() -> ExitCode {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if !args.dataset_dir.is_dir() {
        error!(
            "The specified dataset directory does not exist: {}",
            args.dataset_dir.display()
        );
        return ExitCode::FAILURE;
    }

    info!("Starting the conversion process...");

    match convert(&args) {
        Ok(_) => {
            info!("Conversion process completed successfully.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Failed to convert dataset: {}", e);
            ExitCode::FAILURE
        }
    }
}
