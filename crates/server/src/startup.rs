use std::{env, net::SocketAddr, sync::Arc};

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes::{self, ServerState};
use service::students::repo::seaorm::SeaOrmStudentRepository;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Router with the production layers applied.
pub fn app(state: ServerState) -> Router {
    routes::build_router(state, build_cors())
}

/// Host/port from a validated `config.toml`, or `SERVER_HOST`/`SERVER_PORT` when there is none
fn load_bind_addr() -> anyhow::Result<SocketAddr> {
    let (host, port) = match configs::load_validated()? {
        Some(cfg) => (cfg.server.host, cfg.server.port),
        None => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(8080);
            (host, port)
        }
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "ctrl_c listener failed; serving until the process is killed");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received, draining connections");
}

/// Serve `state` on an already bound listener until Ctrl+C.
pub async fn serve(listener: TcpListener, state: ServerState) -> anyhow::Result<()> {
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Public entry: connect, migrate, then run the HTTP server.
/// Expects `.env` and logging to be set up by the caller.
pub async fn run() -> anyhow::Result<()> {
    let db = models::db::connect().await?;
    models::db::migrate(&db).await?;
    info!("schema up to date");

    let state = ServerState::new(Arc::new(SeaOrmStudentRepository::new(db)));

    let addr = load_bind_addr()?;
    info!(%addr, "starting student records server");
    let listener = TcpListener::bind(addr).await?;
    serve(listener, state).await
}
