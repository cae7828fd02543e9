use configs::AppConfig;
use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn main() -> std::process::ExitCode {
    // load .env before reading config so CONFIG_PATH, PORT, RUST_LOG apply
    dotenv().ok();

    let cfg = match AppConfig::load_or_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            common::utils::logging::init_logging_default();
            error!(service = "course_api", event = "config_invalid", error = %e, "invalid configuration");
            return std::process::ExitCode::FAILURE;
        }
    };
    common::utils::logging::init_logging_with_format(&cfg.log.format);
    info!(service = "course_api", event = "logger_init", format = %cfg.log.format, "tracing subscriber initialized");

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "course_api",
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = cfg.server.worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "course_api", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "course_api",
        event = "start",
        %service_id,
        pid,
        version,
        threads = cfg.server.worker_threads.unwrap_or_default(),
        data_dir = %cfg.storage.data_dir.display(),
        "course api starting"
    );

    rt.block_on(async move {
        let shutdown = async move {
            let _ = tokio::signal::ctrl_c().await;
            info!(service = "course_api", event = "shutdown_signal", %service_id, pid, "received Ctrl+C, shutting down");
        };
        match server::run_with_shutdown(cfg, shutdown).await {
            Ok(()) => {
                info!(service = "course_api", event = "stop", %service_id, pid, "course api stopped normally");
                std::process::ExitCode::SUCCESS
            }
            Err(e) => {
                error!(service = "course_api", event = "run_failed", error = %e, "server returned error");
                std::process::ExitCode::FAILURE
            }
        }
    })
}
