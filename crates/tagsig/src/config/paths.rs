use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

pub const MAX_PATH_STYLE: u8 = 7;

/// Literal prefix and its replacement, e.g. `("/home/me", "~")`.
pub type PathMappingRule = (String, String);

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathSettings {
    /// Applied in order; put the most specific prefix first.
    pub mapping: Vec<PathMappingRule>,
    /// Bitmask: 1 = keep the parent of `include` as `parent:`,
    /// 2 = trim everything up to the last `include` segment,
    /// 4 = abbreviate directories to their first character.
    pub style: u8,
}

impl PathSettings {
    pub(crate) fn apply_patch(
        &mut self,
        patch: PathSettingsPatch,
    ) {
        if let Some(v) = patch.mapping {
            self.mapping = v;
        }
        if let Some(v) = patch.style {
            self.style = v.min(u64::from(MAX_PATH_STYLE)) as u8;
        }
    }

    pub(crate) fn normalize(&mut self) {
        self.style = self.style.min(MAX_PATH_STYLE);
        self.mapping.retain(|(from, _)| !from.is_empty());
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct PathSettingsPatch {
    pub(crate) mapping: Option<Vec<PathMappingRule>>,
    pub(crate) style: Option<u64>,
    #[serde(flatten)]
    pub(crate) _extra: HashMap<String, Value>,
}
