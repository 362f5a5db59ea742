//! Environment-based runtime configuration

use std::env;

/// Load a local `.env` file if present. Embedding binaries call this once
/// before [`crate::logging::init_logging`].
pub fn load_env() {
    dotenvy::dotenv().ok();
}

/// Get the current environment (production, sandbox, development)
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string())
}

/// Worker pool size for per-symbol batch evaluation.
///
/// `WORKER_CONCURRENCY` overrides; defaults to available parallelism.
pub fn get_worker_concurrency() -> usize {
    env::var("WORKER_CONCURRENCY")
        .ok()
        .and_then(|c| c.parse().ok())
        .filter(|&c| c > 0)
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
        })
}
