//! Console entry point.
//!
//! Reads `STUDENTS_*` environment configuration, starts file logging,
//! initializes the store and runs the menu on stdin/stdout.

use log::error;
use std::process::ExitCode;
use student_core::{init_logging, open_student_service, AppConfig};

fn main() -> ExitCode {
    let config = AppConfig::from_env();
    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        // Logging is diagnostics only; the menu still works without it.
        eprintln!("logging disabled: {err}");
    }

    let service = match open_student_service(&config.db_path) {
        Ok(service) => service,
        Err(err) => {
            error!("event=cli_start module=cli status=error error={}", err);
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout().lock();
    match student_cli::run_menu(&service, &mut input, &mut output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=menu_abort module=cli status=error error={}", err);
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
