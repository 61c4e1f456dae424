use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

pub const MIN_TOOLTIP_LINES: usize = 1;
pub const MAX_TOOLTIP_LINES: usize = 100;
pub const MIN_TRIM_SIZE: usize = 0;
pub const MAX_TRIM_SIZE: usize = 80;

#[derive(Debug, Clone, PartialEq)]
pub struct DisplaySettings {
    /// Candidates shown in a hover tooltip before it is cut off.
    pub max_tooltip_lines: usize,
    /// Only answer hovers; never echo while typing.
    pub tooltip_only: bool,
    /// Columns left free at the right edge of the echo area.
    pub trim_size: usize,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            max_tooltip_lines: 10,
            tooltip_only: false,
            trim_size: 3,
        }
    }
}

impl DisplaySettings {
    pub(crate) fn apply_patch(
        &mut self,
        patch: DisplaySettingsPatch,
    ) {
        if let Some(v) = patch.max_tooltip_lines {
            self.max_tooltip_lines = v;
        }
        if let Some(v) = patch.tooltip_only {
            self.tooltip_only = v;
        }
        if let Some(v) = patch.trim_size {
            self.trim_size = v;
        }
    }

    pub(crate) fn normalize(&mut self) {
        self.max_tooltip_lines = self.max_tooltip_lines.clamp(MIN_TOOLTIP_LINES, MAX_TOOLTIP_LINES);
        self.trim_size = self.trim_size.clamp(MIN_TRIM_SIZE, MAX_TRIM_SIZE);
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct DisplaySettingsPatch {
    pub(crate) max_tooltip_lines: Option<usize>,
    pub(crate) tooltip_only: Option<bool>,
    pub(crate) trim_size: Option<usize>,
    #[serde(flatten)]
    pub(crate) _extra: HashMap<String, Value>,
}
