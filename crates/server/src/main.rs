use clap::Parser;
use tokengate_core::{config, BucketConfig};
use tokengate_server::api::create_router;
use tokengate_server::api::handlers::AppState;
use tokengate_server::logging;
use tokengate_server::scheduler::RefillScheduler;

#[derive(Parser)]
#[command(name = "tokengate", about = "HTTP request gate behind a scheduled token bucket")]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = config::DEFAULT_PORT)]
    port: u16,

    /// Maximum number of tokens the bucket holds
    #[arg(long, env = "TOKENGATE_CAPACITY", default_value_t = config::DEFAULT_BUCKET_CAPACITY)]
    capacity: usize,

    /// Seconds between refills (also sent as Retry-After on 429)
    #[arg(
        long,
        env = "TOKENGATE_REFILL_INTERVAL_SECS",
        default_value_t = config::DEFAULT_REFILL_INTERVAL_SECS
    )]
    refill_interval: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::setup_logging();

    let args = Args::parse();

    if args.port == 0 {
        eprintln!("Error: port must be > 0");
        std::process::exit(1);
    }
    let bucket_config = BucketConfig::new(args.capacity, args.refill_interval).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let prometheus_handle =
        metrics_exporter_prometheus::PrometheusBuilder::new().install_recorder()?;

    let state = AppState::new(bucket_config, prometheus_handle);
    let bucket = state.bucket.clone();
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    // Tokens only start flowing once the listener is bound
    let refill = RefillScheduler::new(bucket, bucket_config.refill_interval).start();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        port = args.port,
        capacity = bucket_config.capacity,
        refill_interval_secs = args.refill_interval,
        "tokengate ready"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_signal())
        .await?;

    refill.stop().await;
    tracing::info!("Shutdown complete");

    Ok(())
}

async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT"),
        _ = terminate => tracing::info!("Received SIGTERM"),
    }

    tracing::info!("Shutting down gracefully, draining in-flight requests...");
}
