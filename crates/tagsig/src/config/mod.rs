//! Declarative configuration.
//!
//! Settings are split into one file per category. [`Settings`] aggregates
//! all categories and handles deserialization from LSP initialization
//! options, `didChangeConfiguration` payloads and `.tagsig.toml` files.
//! Every field has a default, so an empty payload is a valid configuration.

pub(crate) mod display;
pub(crate) mod file;
pub(crate) mod languages;
pub(crate) mod logging;
pub(crate) mod paths;
pub(crate) mod schema;
pub(crate) mod tags;

use std::collections::HashMap;

pub use display::{
    DisplaySettings, MAX_TOOLTIP_LINES, MAX_TRIM_SIZE, MIN_TOOLTIP_LINES, MIN_TRIM_SIZE,
};
use display::DisplaySettingsPatch;
pub use file::{CONFIG_FILENAME, ConfigFileError, find_config_file, load_config_file};
use languages::LanguageSettingsPatch;
pub use languages::{LanguageSettings, default_language_mapping};
use logging::LoggingSettingsPatch;
pub use logging::{LogLevel, LoggingSettings};
use paths::PathSettingsPatch;
pub use paths::{MAX_PATH_STYLE, PathMappingRule, PathSettings};
pub use schema::{SchemaField, SchemaType, generate_configuration_markdown, generate_json_schema, schema_fields};
use serde::Deserialize;
use serde_json::Value;
use tags::TagsSettingsPatch;
pub use tags::TagsSettings;

pub const SETTINGS_SECTION_KEY: &str = "tagsig";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Settings {
    pub languages: LanguageSettings,
    pub paths: PathSettings,
    pub display: DisplaySettings,
    pub tags: TagsSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    pub fn from_payload(payload: Option<&Value>) -> Self {
        let mut settings = Self::default();
        if let Some(payload) = payload {
            settings = settings.merged_with_payload(payload);
        }
        settings
    }

    /// Layer `payload` over `self`. Accepts both `{ "tagsig": { ... } }`
    /// and the bare `{ ... }` shape; unknown or ill-typed keys are ignored.
    pub fn merged_with_payload(
        &self,
        payload: &Value,
    ) -> Self {
        let mut merged = self.clone();

        for candidate in payload_candidates(payload) {
            if let Ok(patch) = serde_json::from_value::<SettingsPatch>(candidate.clone()) {
                merged.apply_patch(patch);
            }
        }

        merged.normalize();
        merged
    }

    fn apply_patch(
        &mut self,
        patch: SettingsPatch,
    ) {
        if let Some(p) = patch.languages {
            self.languages.apply_patch(p);
        }
        if let Some(p) = patch.paths {
            self.paths.apply_patch(p);
        }
        if let Some(p) = patch.display {
            self.display.apply_patch(p);
        }
        if let Some(p) = patch.tags {
            self.tags.apply_patch(p);
        }
        if let Some(p) = patch.logging {
            self.logging.apply_patch(p);
        }
    }

    fn normalize(&mut self) {
        self.languages.normalize();
        self.paths.normalize();
        self.display.normalize();
        self.tags.normalize();
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct SettingsPatch {
    languages: Option<LanguageSettingsPatch>,
    paths: Option<PathSettingsPatch>,
    display: Option<DisplaySettingsPatch>,
    tags: Option<TagsSettingsPatch>,
    logging: Option<LoggingSettingsPatch>,
    #[serde(flatten)]
    _extra: HashMap<String, Value>,
}

fn payload_candidates(payload: &Value) -> Vec<Value> {
    let mut candidates = Vec::new();
    candidates.push(payload.clone());
    if let Some(scoped) = payload.get(SETTINGS_SECTION_KEY) {
        candidates.push(scoped.clone());
    }
    candidates
}

#[cfg(test)]
#[path = "../../tests/src/config/settings_tests.rs"]
mod tests;
