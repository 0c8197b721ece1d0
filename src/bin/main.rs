//! Entry point for the travel assistant sample.
//!
//! Telemetry export is configured before the assistant runs: failing to load
//! the endpoint or the ingest credential aborts startup, the assistant does
//! not run unobserved.
#![warn(missing_docs)]

use std::error::Error;
use std::process::ExitCode;
use tracing::info;
use travel_assistant::assistant::TravelAssistant;
use travel_assistant::cli::Cli;
use travel_assistant::instrumentation::config::InstrumentationConfig;
use travel_assistant::instrumentation::tracing::try_init_tracing;

fn main() -> ExitCode {
    match _main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// This is the actual main function.
///
/// It is separated from [main] to allow propagating errors and reporting
/// them in string format only, instead of the default `Debug` rendering.
fn _main() -> Result<(), Box<dyn Error>> {
    let run_config = Cli::init()?;

    // Configuration must load before any registration happens: a missing
    // token file aborts right here.
    let instrumentation_config = InstrumentationConfig::from_environment(&run_config.token_path)?;

    // Keep the tracer alive until the end of the run, dropping it shuts the
    // providers down and flushes pending telemetry.
    let _tracer = try_init_tracing(instrumentation_config)?;
    info!("Telemetry export initialized");

    let assistant = TravelAssistant::from_environment();
    let reply = assistant.handle(run_config.payload);
    println!("{}", serde_json::to_string(&reply)?);

    Ok(())
}
