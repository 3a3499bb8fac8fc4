use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::{AppConfig, ServerConfig};
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, ServerState};
use service::employee::{repo::SeaOrmEmployeeRepository, EmployeeRepository};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Config from `config.toml`, or from env vars when the file is missing or invalid
pub fn load_config() -> anyhow::Result<AppConfig> {
    match AppConfig::load_and_validate() {
        Ok(cfg) => Ok(cfg),
        Err(e) => {
            warn!(error = %e, "config file unusable; falling back to environment");
            AppConfig::from_env()
        }
    }
}

pub fn bind_addr(server: &ServerConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", server.host, server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bad bind address {}:{}: {e}", server.host, server.port)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("received Ctrl+C, shutting down");
}

/// Public entry: connect, migrate, build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_from_env();

    let cfg = load_config()?;

    let db = models::db::connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None).await?;

    let repo: Arc<dyn EmployeeRepository> = Arc::new(SeaOrmEmployeeRepository::new(db));
    let app: Router = routes::build_router(ServerState::new(repo), build_cors());

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, "starting employee server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_parses_host_and_port() {
        let addr = bind_addr(&ServerConfig { host: "127.0.0.1".into(), port: 8080, worker_threads: None }).unwrap();
        assert_eq!(addr.port(), 8080);
        assert!(addr.ip().is_loopback());
    }

    #[test]
    fn bind_addr_rejects_hostnames() {
        let err = bind_addr(&ServerConfig { host: "not a host".into(), port: 8080, worker_threads: None }).unwrap_err();
        assert!(matches!(err, StartupError::InvalidConfig(_)));
    }
}
