use std::process::ExitCode;

use common::utils::logging::{init_logging, LogFormat};
use configs::AppConfig;
use dotenvy::dotenv;
use tracing::{error, info};

fn main() -> ExitCode {
    dotenv().ok();
    init_logging(LogFormat::from_env_or(LogFormat::Json));
    info!(service = "video-service", event = "logger_init", "tracing subscriber initialized");

    let cfg = match AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "video-service", event = "config_invalid", error = %format!("{e:#}"), "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service = "video-service",
        event = "bootstrap",
        downstream = %cfg.downstream.user_service_url,
        "delegating startup to video_service::run"
    );
    let worker_threads = cfg.video_service.worker_threads;
    common::lifecycle::run_service("video-service", worker_threads, move || video_service::run(cfg))
}
