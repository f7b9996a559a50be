//! HTTP API entry point.
//!
//! Reads `STUDENTS_*` environment configuration, starts file logging,
//! initializes the store and serves the routes until shutdown.

use log::{error, info};
use std::process::ExitCode;
use std::sync::Arc;
use student_core::{init_logging, open_student_service, AppConfig};

#[tokio::main]
async fn main() -> ExitCode {
    let config = AppConfig::from_env();
    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("logging disabled: {err}");
    }

    let service = match open_student_service(&config.db_path) {
        Ok(service) => Arc::new(service),
        Err(err) => {
            error!("event=api_start module=api status=error error={}", err);
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    info!(
        "event=api_start module=api status=ok addr={} db_path={}",
        config.api_addr,
        config.db_path.display()
    );
    match student_api::serve(service, &config.api_addr).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=api_serve module=api status=error error={}", err);
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
