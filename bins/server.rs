use std::process::ExitCode;

use configs::AppConfig;
use tracing::{error, info};

fn main() -> ExitCode {
    // .env before the subscriber so RUST_LOG and LOG_FORMAT take effect
    dotenvy::dotenv().ok();
    common::utils::logging::init_logging_from_env();
    std::panic::set_hook(Box::new(|panic| error!(event = "panic", %panic, "petstagram panicked")));

    let cfg = match AppConfig::load_or_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(event = "config_invalid", error = %format!("{e:#}"), "refusing to start");
            return ExitCode::FAILURE;
        }
    };

    let workers = cfg.server.worker_threads.unwrap_or(4);
    let rt = match tokio::runtime::Builder::new_multi_thread().worker_threads(workers).enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(event = "runtime_failed", error = %e, "cannot build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        event = "start",
        version = env!("CARGO_PKG_VERSION"),
        pid = std::process::id(),
        workers,
        "petstagram starting"
    );
    match rt.block_on(server::run(cfg)) {
        Ok(()) => {
            info!(event = "stop", "petstagram stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(event = "run_failed", error = %format!("{e:#}"), "petstagram exited with an error");
            ExitCode::FAILURE
        }
    }
}
