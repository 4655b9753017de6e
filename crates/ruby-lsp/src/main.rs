//! Ruby LSP entry point.

use std::io;

use clap::Parser;
use ruby_lsp::Server;
use tracing_subscriber::{fmt, EnvFilter};

/// Ruby Language Server Protocol backend
#[derive(Parser, Debug)]
#[command(name = "ruby-lsp", version, about, long_about = None)]
struct Args {
    /// Use stdio for communication (the only supported transport)
    #[arg(long, default_value_t = true)]
    stdio: bool,

    /// TCP socket transport, not supported by this server
    #[arg(long, conflicts_with = "stdio")]
    socket: bool,

    /// Logging level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Print a one-line health check and exit instead of serving
    #[arg(long)]
    health: bool,
}

fn init_logging(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.health {
        println!("ruby-lsp {} ok", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    init_logging(&args.log_level);

    if args.socket {
        anyhow::bail!("ruby-lsp only supports stdio transport, --socket is not implemented");
    }

    tracing::info!("ruby-lsp: starting on stdio");
    let mut server = Server::new(Box::new(io::stdout()));
    server.run()?;

    Ok(())
}
