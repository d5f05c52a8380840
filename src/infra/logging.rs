use tracing_subscriber::EnvFilter;

use crate::infra::{config::LogConfig, error::AppError};

/// Installs the global subscriber. `RUST_LOG` wins over the configured level.
/// Output goes to stderr so it never interleaves with chat lines on stdout.
pub fn init(config: &LogConfig) -> Result<(), AppError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => configured_filter(config)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(AppError::LoggingInit)
}

fn configured_filter(config: &LogConfig) -> Result<EnvFilter, AppError> {
    EnvFilter::try_new(&config.level).map_err(|source| AppError::LogLevel {
        level: config.level.clone(),
        source,
    })
}
