//! Projman Server - GraphQL API for clients and projects
//!
//! Startup order: configuration, document store connection, router, bind.
//! A store that cannot be opened stops the process before the port is bound.

use clap::Parser;
use projman_core::Repository;
use projman_server::{ProjmanServer, api, config::Config};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Projman Server CLI arguments
#[derive(Parser, Debug)]
#[command(name = "projman-server")]
#[command(about = "Projman GraphQL Server", long_about = None)]
struct Args {
    /// Enable verbose logging (prints debug information to stdout/stderr)
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Directory holding server.toml
    #[arg(long, env = "PROJMAN_CONFIG_DIR", default_value = "config")]
    config_dir: PathBuf,

    /// Print the GraphQL schema (SDL) and exit
    #[arg(long)]
    print_schema: bool,
}

fn main() -> anyhow::Result<()> {
    // Load .env before clap reads `env = ...` defaults
    dotenvy::dotenv().ok();

    let args = Args::parse();

    if args.print_schema {
        print!("{}", api::graphql::export_sdl());
        return Ok(());
    }

    let filter = if args.verbose {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "projman_server=debug,projman_core=debug,tower_http=debug".into()
        })
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "projman_server=info,projman_core=info,tower_http=warn".into())
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rt = tokio::runtime::Builder::new_multi_thread()
        .thread_name("projman-worker")
        .enable_all()
        .build()?;

    rt.block_on(async_main(args))
}

async fn async_main(args: Args) -> anyhow::Result<()> {
    let config = Config::load(&args.config_dir)?;
    info!(
        "Starting Projman Server ({} mode) on {}",
        config.environment,
        config.addr()
    );

    let store = match projman_core::connect(&config.database_url) {
        Ok(store) => store,
        Err(e) => {
            error!(
                "Failed to connect to document store {}: {}",
                config.database_url, e
            );
            return Err(e.into());
        }
    };
    info!("Connected to {} document store", store.kind());

    let addr = config.addr();
    let server = Arc::new(ProjmanServer::new(config, Repository::new(store)));
    let app = api::create_router(server);

    let listener = TcpListener::bind(addr).await?;
    info!("Projman Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Projman Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
