use anyhow::{Context, Result};
use payload_redactor_gateway::{GatewayConfig, GatewayServer};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let config = GatewayConfig::from_env().context("Failed to load configuration")?;

    init_tracing(&config.log_level);

    info!("redaction-gateway service starting");
    info!(
        mode = %config.redaction_mode,
        keywords = config.sensitive_keywords.len(),
        max_body_size_bytes = config.max_body_size_bytes,
        max_json_depth = config.max_json_depth,
        parse_failure_policy = ?config.parse_failure_policy,
        "Configuration loaded"
    );

    let server = GatewayServer::new(config).context("Failed to create gateway server")?;
    server.run_until(shutdown_signal()).await?;

    info!("redaction-gateway service stopped");
    Ok(())
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_line_number(true)
        .compact()
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm =
            signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
