//! Boxoffice server binary.
//!
//! # Usage
//!
//! ```bash
//! # Demo catalog on the default port
//! boxoffice-server
//!
//! # Empty catalog, explicit address and pool size
//! boxoffice-server --bind 127.0.0.1:7000 --workers 8 --no-seed
//! ```

use boxoffice_core::{AdministrationService, BookingService, InventoryStore};
use boxoffice_server::{Server, ServerConfig, seed_demo_catalog};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Boxoffice seat-reservation server
#[derive(Parser, Debug)]
#[command(name = "boxoffice-server")]
#[command(about = "Seat-reservation server speaking the boxoffice line protocol")]
#[command(version)]
struct Args {
    /// Address to bind to
    #[arg(short, long, default_value = "0.0.0.0:12345")]
    bind: String,

    /// Worker threads (maximum concurrent connections); defaults to the
    /// number of available CPUs
    #[arg(short, long)]
    workers: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Start with an empty catalog instead of the demo movies and theaters
    #[arg(long)]
    no_seed: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    let store = InventoryStore::new();
    if args.no_seed {
        tracing::info!("starting with an empty catalog");
    } else {
        seed_demo_catalog(&AdministrationService::new(store.clone()))?;
    }

    let mut config = ServerConfig { bind_address: args.bind, ..ServerConfig::default() };
    if let Some(workers) = args.workers {
        config.workers = workers;
    }

    let server = Server::bind(config, BookingService::new(store))?;
    tracing::info!("listening on {}", server.local_addr());

    server.run()?;

    Ok(())
}
