use std::sync::Arc;

use crate::{infra::config::AppConfig, usecases::broker::Broker};

#[derive(Debug)]
pub struct AppContext {
    pub config: AppConfig,
    pub broker: Arc<Broker>,
}

impl AppContext {
    pub fn new(config: AppConfig, broker: Arc<Broker>) -> Self {
        Self { config, broker }
    }
}
