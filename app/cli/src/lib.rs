//! FILENAME: app/cli/src/lib.rs
// PURPOSE: Library entry point for the treemap command.
// CONTEXT: `run` is the single top-level handler: every stage error ends up
// here, is reported on stderr, and turns into a non-zero exit code.

use std::error::Error as _;
use std::process::ExitCode;

use clap::Parser;

pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;

pub use config::{Args, PipelineConfig};
pub use error::AppError;
pub use logging::{init_log_file, set_verbose};
pub use pipeline::{run_pipeline, PipelineSummary, AGGREGATED_DUMP, CLEANED_DUMP, RAW_DUMP};

/// Prints an error the way the user sees it. Input errors get their message;
/// anything unexpected also gets the chain of underlying causes.
pub fn report_error(err: &AppError) {
    if err.is_input_error() {
        eprintln!("Error: {}", err);
        return;
    }

    eprintln!("An unexpected error occurred: {}", err);
    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {}", cause);
        source = cause.source();
    }
}

pub fn run() -> ExitCode {
    let args = Args::parse();
    set_verbose(args.verbose);

    if let Some(path) = &args.log_file {
        if let Err(e) = init_log_file(path) {
            eprintln!("[LOG_INIT] FAILED: {}", e);
            eprintln!("[LOG_INIT] Continuing with console-only logging");
        }
    }
    log_info!("SYS", "treemap starting");

    let config = PipelineConfig::from(&args);
    match run_pipeline(&config) {
        Ok(summary) => {
            println!(
                "\nSuccess! Interactive treemap generated: {}",
                summary.output_path.display()
            );
            log_info!("SYS", "done, total={}", summary.grand_total);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log_error!("SYS", "{}", e);
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}
