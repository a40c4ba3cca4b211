//! script-exec - Main entry point

use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use script_exec::cli::Cli;
use script_exec::exec::{self, NOTHING_TO_RUN};
use script_exec::script_traits::{DiagnosticsSink, TracingDiagnostics};

/// Initialize logging on stderr so a script's stdout stays untouched
fn init_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_logger();

    let cli = Cli::parse_args();
    debug!("CLI arguments parsed");

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.to_config()?;
    let mut diagnostics = TracingDiagnostics;

    if let Some(ref path) = cli.save_config {
        config.save_to_file(path)?;
        info!("Configuration saved to {:?}", path);
        return Ok(());
    }

    if cli.print_command {
        match exec::preview(&config.interpreter, &config) {
            Some(line) => println!("{}", line),
            None => diagnostics.warn(NOTHING_TO_RUN),
        }
        return Ok(());
    }

    exec::execute(&config.interpreter, &config, &mut diagnostics)?;
    Ok(())
}
