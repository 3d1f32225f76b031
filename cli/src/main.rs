//! `instances` — track and control cloud compute instances by name

use clap::Parser;
use tracing_subscriber::EnvFilter;

use instances_cli::cli::Cli;
use instances_cli::domain::error_code;
use instances_cli::output::OutputContext;
use instances_cli::output::json::format_error;

/// Environment variable holding the log filter directive.
const LOG_ENV: &str = "INSTANCES_LOG";

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_ansi(console::Term::stderr().is_term())
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let (json, no_color) = (cli.json, cli.no_color);

    if let Err(e) = cli.run().await {
        tracing::debug!(error = ?e, "command failed");
        let message = format!("{e:#}");
        match json.then(|| format_error(&message, error_code(&e))) {
            Some(Ok(body)) => println!("{body}"),
            _ => OutputContext::new(no_color, false).error(&format!("Error: {message}")),
        }
        std::process::exit(1);
    }
}
