mod cli;

use std::{io, process};

use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_env("SWIPE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if let Err(e) = cli::run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
