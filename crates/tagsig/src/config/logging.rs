//! Where tagsig logs and how much.

use std::{collections::HashMap, path::PathBuf};

use serde::Deserialize;
use serde_json::Value;

/// Verbosity of the `tagsig` tracing target, ordered from quietest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[serde(alias = "warning")]
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub const ALL: [LogLevel; 5] = [Self::Error, Self::Warn, Self::Info, Self::Debug, Self::Trace];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    /// Whether lifecycle messages are also forwarded to the LSP client.
    pub fn allows_info(self) -> bool {
        self >= Self::Info
    }

    /// `EnvFilter` directive scoping this level to the crate.
    pub fn filter_directive(self) -> String {
        format!("tagsig={}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoggingSettings {
    pub level: LogLevel,
    /// Log file used when `--log-file` is not given. Only read at startup.
    pub file: Option<PathBuf>,
}

impl LoggingSettings {
    pub(crate) fn apply_patch(
        &mut self,
        patch: LoggingSettingsPatch,
    ) {
        if let Some(level) = patch.level {
            self.level = level;
        }
        if let Some(file) = patch.file {
            let file = file.trim();
            self.file = (!file.is_empty()).then(|| PathBuf::from(file));
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct LoggingSettingsPatch {
    pub(crate) level: Option<LogLevel>,
    pub(crate) file: Option<String>,
    #[serde(flatten)]
    pub(crate) _extra: HashMap<String, Value>,
}
