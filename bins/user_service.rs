use std::process::ExitCode;

use common::utils::logging::{init_logging, LogFormat};
use configs::AppConfig;
use dotenvy::dotenv;
use tracing::{error, info};

fn main() -> ExitCode {
    // .env first so RUST_LOG / LOG_FORMAT apply to the subscriber
    dotenv().ok();
    init_logging(LogFormat::from_env_or(LogFormat::Compact));
    info!(service = "user-service", event = "logger_init", "tracing subscriber initialized");

    let cfg = match AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "user-service", event = "config_invalid", error = %format!("{e:#}"), "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    let worker_threads = cfg.user_service.worker_threads;
    common::lifecycle::run_service("user-service", worker_threads, move || user_service::run(cfg))
}
