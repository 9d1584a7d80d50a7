//! Language service configuration
//!
//! Read from a JSON document such as:
//!
//! ```json
//! { "logLevel": "debug" }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{LanguageServiceError, Result};
use crate::logging::{ConsoleLogger, LogLevel};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LanguageServiceConfig {
    #[serde(default = "default_log_level")]
    pub log_level: LogLevel,
}

fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

impl Default for LanguageServiceConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl LanguageServiceConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_json(&content)?;
        Ok(config)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Err(LanguageServiceError::Config(
                "configuration document is empty".to_string(),
            ));
        }
        Ok(serde_json::from_str(content)?)
    }

    pub fn logger(&self) -> ConsoleLogger {
        ConsoleLogger::new(self.log_level)
    }
}
