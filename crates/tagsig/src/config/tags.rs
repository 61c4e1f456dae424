use std::collections::{HashMap, HashSet};

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct TagsSettings {
    /// Tags files searched in order. Relative entries resolve against the
    /// workspace root.
    pub files: Vec<String>,
    pub binary_search: bool,
}

impl Default for TagsSettings {
    fn default() -> Self {
        Self {
            files: vec!["tags".to_string()],
            binary_search: true,
        }
    }
}

impl TagsSettings {
    pub(crate) fn apply_patch(
        &mut self,
        patch: TagsSettingsPatch,
    ) {
        if let Some(v) = patch.files {
            self.files = v;
        }
        if let Some(v) = patch.binary_search {
            self.binary_search = v;
        }
    }

    pub(crate) fn normalize(&mut self) {
        let mut seen = HashSet::new();
        self.files = self
            .files
            .iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .filter(|p| seen.insert(p.clone()))
            .collect();
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct TagsSettingsPatch {
    pub(crate) files: Option<Vec<String>>,
    pub(crate) binary_search: Option<bool>,
    #[serde(flatten)]
    pub(crate) _extra: HashMap<String, Value>,
}
