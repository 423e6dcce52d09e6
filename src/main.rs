use clap::Parser;
use instpack::cli::{execute_command, get_log_level, Cli, Invocation, DEFAULT_LOG_LEVEL};
use tracing::{debug, error, trace};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let invocation = match Invocation::resolve(cli.command) {
        Ok(invocation) => invocation,
        Err(e) => fail(e),
    };

    let filter = match get_log_level(cli.verbose) {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(
                invocation
                    .configured_log_level()
                    .unwrap_or(DEFAULT_LOG_LEVEL),
            )
        }),
    };

    // Logs go to stderr; stdout belongs to `list`
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(cli.verbose >= 2)
        .with_line_number(cli.verbose >= 3)
        .init();

    debug!("instpack started with verbosity level: {}", cli.verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());

    if let Err(e) = execute_command(invocation) {
        fail(e);
    }
}

fn fail(e: anyhow::Error) -> ! {
    error!("Fatal error: {:#}", e);
    eprintln!("Error: {e:#}");
    std::process::exit(1);
}
