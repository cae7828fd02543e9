use std::{future::Future, net::SocketAddr};

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, ServerState};
use service::runtime;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(cfg.server.bind_addr().parse()?)
}

/// Open storage and assemble the router for the given configuration.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let store = runtime::open_course_store(&cfg.storage).await?;
    info!(
        courses = %store.courses_path().display(),
        modules = %store.modules_path().display(),
        lessons = %store.lessons_path().display(),
        event = "storage_ready",
        "course storage opened"
    );
    Ok(routes::build_router(ServerState::new(store), build_cors()))
}

/// Bind and serve until `shutdown` resolves, then drain in-flight requests.
pub async fn run_with_shutdown<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_app(&cfg).await?;
    let addr = bind_addr(&cfg)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, event = "listening", "course api listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    Ok(())
}

/// Serve until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    run_with_shutdown(cfg, async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await
}
