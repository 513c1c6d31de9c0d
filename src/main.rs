//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// Entry point of the product update service. Wires the store, queue, worker pool and HTTP API
// together and tears them down in reverse order on SIGINT/SIGTERM.
//--------------------------------------------------------------------------------------------------

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::signal::unix::{signal, SignalKind};
use tokio::time::timeout;
use tracing::{error, info};

use product_updates::{
    telemetry, Api, Config, EventQueue, InMemoryQueue, InMemoryStore, ProductService,
    ProductStore, WorkerPool,
};

/// Command line overrides for the environment configuration
#[derive(Debug, Parser)]
#[command(name = "product-updates", about = "Asynchronous product update service")]
struct Cli {
    /// Port to listen on
    #[arg(long)]
    port: Option<u16>,

    /// Number of workers applying updates
    #[arg(long)]
    workers: Option<usize>,

    /// Capacity of the event queue
    #[arg(long)]
    queue_size: Option<usize>,
}

impl Cli {
    fn apply(self, mut config: Config) -> anyhow::Result<Config> {
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(workers) = self.workers {
            anyhow::ensure!(workers > 0, "--workers must be greater than zero");
            config.worker_count = workers;
        }
        if let Some(queue_size) = self.queue_size {
            anyhow::ensure!(queue_size > 0, "--queue-size must be greater than zero");
            config.queue_buffer_size = queue_size;
        }
        Ok(config)
    }
}

/// Completes when SIGINT or SIGTERM is received
async fn shutdown_signal() {
    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sigterm) => sigterm,
        Err(err) => {
            error!(error = %err, "Failed to install SIGTERM handler");
            let _ = tokio::signal::ctrl_c().await;
            return;
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => info!("Received SIGINT, initiating graceful shutdown"),
        _ = sigterm.recv() => info!("Received SIGTERM, initiating graceful shutdown"),
    }
}

async fn run(config: Config) -> anyhow::Result<()> {
    info!(
        addr = %config.addr(),
        worker_count = config.worker_count,
        queue_buffer_size = config.queue_buffer_size,
        "Starting product update service"
    );

    let store = Arc::new(InMemoryStore::new());
    let queue = Arc::new(InMemoryQueue::new(config.queue_buffer_size));
    queue.connect().context("failed to connect to queue")?;

    let service = ProductService::new(store.clone(), queue.clone());

    let pool = WorkerPool::new(config.worker_count, queue.clone(), store.clone());
    pool.start().context("failed to start worker pool")?;

    let api = Api::new(config.addr(), service).with_request_timeout(config.request_timeout);
    // The listener is gone once serve returns, so no producer can enqueue past this point
    let served = api.serve(shutdown_signal()).await;

    info!("Shutting down");
    match timeout(config.shutdown_timeout, pool.stop()).await {
        Ok(result) => result.context("worker pool did not stop cleanly")?,
        Err(_) => anyhow::bail!(
            "worker pool did not stop within {:?}, forcing shutdown",
            config.shutdown_timeout
        ),
    }

    queue.close().context("failed to close queue")?;
    store.close().context("failed to close store")?;

    served.context("API server failed")?;
    info!("Service stopped gracefully");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::try_from_env()
        .map_err(anyhow::Error::from)
        .and_then(|config| cli.apply(config))
    {
        Ok(config) => config,
        Err(err) => {
            telemetry::init(tracing::Level::INFO);
            error!("Failed to load configuration: {:#}", err);
            return ExitCode::FAILURE;
        }
    };
    telemetry::init(config.log_level);

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}
