use std::net::SocketAddr;

use anyhow::Context;
use axum::Router;
use configs::{AppConfig, DatabaseConfig};
use migration::MigratorTrait;
use tokio::signal;
use tracing::info;

use crate::routes;
use crate::state::ServerState;
use crate::templates;

/// Connect, bring the schema up to date and compile the templates.
pub async fn build_state(db_cfg: &DatabaseConfig) -> anyhow::Result<ServerState> {
    let db = models::db::connect_with_config(db_cfg).await?;
    migration::Migrator::up(&db, None).await?;
    let templates = templates::build()?;
    Ok(ServerState::new(db, templates))
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    let raw = format!("{}:{}", cfg.server.host, cfg.server.port);
    raw.parse().with_context(|| format!("server.host must be an IP address, got {raw}"))
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!(error = %e, "ctrl-c handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable");
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
    info!(event = "shutdown_signal", "draining in-flight requests");
}

/// Serve the three apps with an already validated config until a shutdown
/// signal arrives.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    common::env::ensure_env(&cfg.server.static_dir).await?;

    let state = build_state(&cfg.database).await?;
    let app: Router = routes::build_router(state, &cfg.server.static_dir);

    let addr = bind_addr(&cfg)?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("cannot bind {addr}"))?;
    info!(%addr, static_dir = %cfg.server.static_dir, sqlite = cfg.database.is_sqlite(), "petstagram listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_comes_from_server_section() {
        let mut cfg = AppConfig::default();
        cfg.server.host = "0.0.0.0".into();
        cfg.server.port = 9000;
        assert_eq!(bind_addr(&cfg).unwrap(), "0.0.0.0:9000".parse::<SocketAddr>().unwrap());

        cfg.server.host = "pets.local".into();
        let err = bind_addr(&cfg).unwrap_err();
        assert!(err.to_string().contains("pets.local:9000"));
    }
}
