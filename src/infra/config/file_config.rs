use serde::Deserialize;

use crate::infra::config::{AppConfig, ConsoleConfig, LogConfig};

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    pub logging: Option<FileLogConfig>,
    pub console: Option<FileConsoleConfig>,
}

impl FileConfig {
    pub fn merge_into(self, config: &mut AppConfig) {
        if let Some(logging) = self.logging {
            logging.merge_into(&mut config.logging);
        }

        if let Some(console) = self.console {
            console.merge_into(&mut config.console);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileLogConfig {
    pub level: Option<String>,
}

impl FileLogConfig {
    fn merge_into(self, config: &mut LogConfig) {
        if let Some(level) = self.level {
            config.level = level;
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileConsoleConfig {
    pub show_timestamps: Option<bool>,
    pub replay_history: Option<bool>,
}

impl FileConsoleConfig {
    fn merge_into(self, config: &mut ConsoleConfig) {
        if let Some(show_timestamps) = self.show_timestamps {
            config.show_timestamps = show_timestamps;
        }

        if let Some(replay_history) = self.replay_history {
            config.replay_history = replay_history;
        }
    }
}
