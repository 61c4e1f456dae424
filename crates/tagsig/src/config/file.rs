use std::{
    fmt::{Display, Formatter},
    path::{Path, PathBuf},
};

use serde_json::Value;

pub const CONFIG_FILENAME: &str = ".tagsig.toml";

/// Walks parent directories from `start` looking for `.tagsig.toml`.
/// Returns the path to the first one found, or `None`.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut dir = if start.is_file() {
        start.parent()?
    } else {
        start
    };
    loop {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
}

/// Reads a `.tagsig.toml` file and converts it into the same JSON shape the
/// LSP configuration payloads use, so it can be merged with
/// [`Settings::merged_with_payload`](crate::config::Settings::merged_with_payload).
pub fn load_config_file(path: &Path) -> Result<Value, ConfigFileError> {
    let content = std::fs::read_to_string(path).map_err(|error| ConfigFileError::Read {
        path: path.to_path_buf(),
        reason: error.to_string(),
    })?;
    parse_config(&content).map_err(|reason| ConfigFileError::Parse {
        path: path.to_path_buf(),
        reason,
    })
}

pub(crate) fn parse_config(content: &str) -> Result<Value, String> {
    let table: toml::Table = toml::from_str(content).map_err(|error| error.to_string())?;
    serde_json::to_value(table).map_err(|error| error.to_string())
}

#[derive(Debug)]
pub enum ConfigFileError {
    Read {
        path: PathBuf,
        reason: String,
    },
    Parse {
        path: PathBuf,
        reason: String,
    },
}

impl Display for ConfigFileError {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Self::Read {
                path,
                reason,
            } => write!(f, "failed to read {}: {reason}", path.display()),
            Self::Parse {
                path,
                reason,
            } => write!(f, "failed to parse {}: {reason}", path.display()),
        }
    }
}

impl std::error::Error for ConfigFileError {}

#[cfg(test)]
#[path = "../../tests/src/config/file_tests.rs"]
mod tests;
