//! px4tsid: scan BS/CS110 TSIDs through a px4_drv tuner and print the
//! channel map in a receiver-specific format.

use std::process::ExitCode;

use clap::Parser;
use log::error;

use px4tsid::context::Cli;
use px4tsid::{CancelToken, Px4Device, ScanController, ScanError};

fn main() -> ExitCode {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || handler_token.cancel()) {
        error!("failed to install signal handler: {e}");
        return ExitCode::FAILURE;
    }

    let config = cli.scan_config();
    let tuner = match Px4Device::open(&cli.device, config.lnb_power) {
        Ok(tuner) => tuner,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    // The controller owns the tuner; the device closes when it drops, on
    // the cancellation path included.
    let map = match ScanController::new(config, tuner, cancel).run() {
        Ok(map) => map,
        Err(e @ ScanError::Cancelled) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match cli.format.render(&map) {
        Ok(rendered) => {
            print!("{rendered}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("failed to render channel map: {e}");
            ExitCode::FAILURE
        }
    }
}
