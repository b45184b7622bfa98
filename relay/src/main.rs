//! Results relay entry point

use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use tokio::signal;

use relay::{RealResultRepository, RelayServer};
use shared::{ProcessId, logging};

/// REST + WebSocket backend for festival results
#[derive(Parser, Debug)]
#[command(name = "results-relay")]
#[command(about = "Stores festival results and pushes every change to subscribers")]
struct Args {
    /// Port for the HTTP server
    #[arg(long, env = "PORT", default_value = "3006")]
    port: u16,

    /// Bind address
    #[arg(long, env = "RELAY_HOST", default_value = "0.0.0.0")]
    host: IpAddr,

    /// Allowed CORS origin (repeatable; permissive when omitted)
    #[arg(long = "allowed-origin", env = "RELAY_ALLOWED_ORIGINS", value_delimiter = ',')]
    allowed_origins: Vec<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    ProcessId::init_relay();
    logging::init_tracing_with_level(Some(&args.log_level));

    let addr = SocketAddr::new(args.host, args.port);
    logging::log_startup(ProcessId::current(), &format!("results relay on {addr}"));

    let server = RelayServer::new(RealResultRepository::new(), &args.allowed_origins)?;
    server
        .run(addr, async {
            let _ = signal::ctrl_c().await;
            logging::log_shutdown(ProcessId::current(), "interrupt received");
        })
        .await?;

    Ok(())
}
