//! Bridge tools binary

mod args;
mod commands;
mod constants;

use args::Cli;
use clap::Parser;

#[tokio::main]
async fn main() {
    init_tracing_subscriber();

    // Enable backtraces unless a RUST_BACKTRACE value has already been explicitly provided.
    if std::env::var_os("RUST_BACKTRACE").is_none() {
        std::env::set_var("RUST_BACKTRACE", "1");
    }

    let cli = Cli::parse();
    if let Err(err) = cli.command.execute(&cli).await {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}

/// Initialize the tracing subscriber, writing to stderr with the filter read from `RUST_LOG` and
/// defaulting to `info`.
fn init_tracing_subscriber() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_line_number(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
