use std::io::{self, Write};
use std::process::ExitCode;

use pdbuild_bootstrap::{
    BootstrapConfig, BootstrapError, Bootstrapper, DEFAULT_LOG_FILTER, LOG_ENV, Outcome,
};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let config = match BootstrapConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: failed to load config: {err}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.log_filter(std::env::var(LOG_ENV).ok().as_deref()));

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            for line in err.report() {
                eprintln!("{line}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(config: &BootstrapConfig) -> Result<(), BootstrapError> {
    let columns = std::env::var("COLUMNS").ok();
    let module_dir = std::env::current_dir()?;

    let mut bootstrapper =
        Bootstrapper::new().with_layout(config.help_layout(columns.as_deref()));
    match bootstrapper.init(&module_dir, std::env::args().skip(1))? {
        Outcome::Help(lines) => {
            let mut out = io::stdout().lock();
            for line in lines {
                writeln!(out, "{line}")?;
            }
            out.flush()?;
        }
        Outcome::Ready(settings) => {
            tracing::debug!(?settings, "ready to load the build module");
        }
    }
    Ok(())
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
