use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AppConfig {
    pub logging: LogConfig,
    pub console: ConsoleConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Prefix chat lines with the message's `HH:MM:SS` (UTC).
    pub show_timestamps: bool,
    /// Render the existing history when a new session opens.
    pub replay_history: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            show_timestamps: false,
            replay_history: true,
        }
    }
}
