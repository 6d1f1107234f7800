use clap::Parser;
use tile_r_drive::cli::{Cli, execute_command};
use tracing_subscriber::EnvFilter;

fn main() {
    // Logs go to stderr so tile bytes on stdout stay clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();

    if let Err(err) = execute_command(&args) {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}
