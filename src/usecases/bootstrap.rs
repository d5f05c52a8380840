use std::{path::Path, sync::Arc};

use crate::{
    infra::{self, config::AppConfig, error::AppError},
    usecases::{broker::Broker, context::AppContext, contracts::SessionFactory},
};

/// Loads configuration, installs logging, and builds the one broker the
/// application shares between all sessions.
pub fn bootstrap<F>(
    config_path: Option<&Path>,
    build_factory: impl FnOnce(&AppConfig) -> F,
) -> Result<AppContext, AppError>
where
    F: SessionFactory + 'static,
{
    let config = load_config(config_path)?;
    infra::logging::init(&config.logging)?;

    Ok(compose(config, build_factory))
}

fn load_config(config_path: Option<&Path>) -> Result<AppConfig, AppError> {
    infra::config::load(config_path)
}

fn compose<F>(config: AppConfig, build_factory: impl FnOnce(&AppConfig) -> F) -> AppContext
where
    F: SessionFactory + 'static,
{
    let factory = build_factory(&config);
    AppContext::new(config, Arc::new(Broker::new(factory)))
}
