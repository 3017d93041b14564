use anyhow::Context;

use ipgate_api::config::{Environment, GatewayConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    ipgate_observability::init();

    let config = GatewayConfig::from_env().context("invalid gateway configuration")?;

    if config.environment == Environment::Production && config.allow_insecure_cookie {
        tracing::warn!(
            "IPGATE_ALLOW_INSECURE_COOKIE is set; credential cookie will be sent over plain HTTP"
        );
    }

    let app = ipgate_api::app::build_app(&config, ipgate_api::pages::shell_router())?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        backend = %config.backend_url,
        environment = config.environment.as_str(),
        cookie_secure = config.cookie_secure(),
        "listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("failed to listen for ctrl-c: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
