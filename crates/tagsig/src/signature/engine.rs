use tracing::{debug, warn};

use crate::{
    config::Settings,
    cycle::EchoContext,
    signature::{
        extract::{call_prefix, extract},
        filter::filter,
        format::{FormatContext, format},
    },
    tags::{TagIndex, TagQuery},
};

/// Last tooltip line when candidates were cut off.
pub const TOOLTIP_ELLIPSIS: &str = "...";

/// The lookup pipeline: extract the callee, query the index, filter and
/// format the survivors.
///
/// Holds no state of its own; the per-window [`EchoContext`] is passed in by
/// the caller.
pub struct EchoEngine<'a, I: TagIndex + ?Sized> {
    settings: &'a Settings,
    index: &'a I,
}

impl<'a, I: TagIndex + ?Sized> EchoEngine<'a, I> {
    pub fn new(
        settings: &'a Settings,
        index: &'a I,
    ) -> Self {
        Self {
            settings,
            index,
        }
    }

    pub fn settings(&self) -> &Settings {
        self.settings
    }

    /// Formatted candidates for `name`, in index order.
    pub fn candidates(
        &self,
        name: &str,
        language: &str,
        require_callable: bool,
    ) -> Vec<String> {
        if name.is_empty() {
            return Vec::new();
        }

        let records = match TagQuery::new(self.index).query(name, language) {
            Ok(records) => records,
            Err(error) => {
                warn!("[echo] lookup of '{name}' failed: {error}");
                return Vec::new();
            },
        };
        let found = records.len();

        let survivors = filter(records, name, language, require_callable, &self.settings.languages);
        debug!("[echo] '{name}' ({language}): {found} tags, {} candidates", survivors.len());

        let ctx = FormatContext {
            language,
            path: &self.settings.paths,
        };
        let total = survivors.len();
        survivors
            .iter()
            .enumerate()
            .map(|(i, record)| format(record, i + 1, total, &ctx))
            .collect()
    }

    /// Handle a `(` typed at the end of `text`.
    ///
    /// Fills `ctx` with the callable candidates and returns the line to echo.
    /// In tooltip-only mode the context is filled but nothing is echoed.
    pub fn on_open_paren(
        &self,
        ctx: &mut EchoContext,
        text: &str,
        previous_line: Option<&str>,
        language: &str,
    ) -> Option<String> {
        let name = extract(&call_prefix(text, previous_line));
        let candidates = self.candidates(&name, language, true);
        if candidates.is_empty() {
            ctx.reset();
            return None;
        }

        ctx.populate(candidates);
        if self.settings.display.tooltip_only {
            return None;
        }
        Some(ctx.current().to_string())
    }

    /// Every tag named `word`, one per line, at most `maxTooltipLines`
    /// of them.
    pub fn tooltip(
        &self,
        word: &str,
        language: &str,
    ) -> Option<String> {
        let mut lines = self.candidates(word, language, false);
        if lines.is_empty() {
            return None;
        }

        let max = self.settings.display.max_tooltip_lines;
        if lines.len() > max {
            lines.truncate(max);
            lines.push(TOOLTIP_ELLIPSIS.to_string());
        }
        Some(lines.join("\n"))
    }

    /// Cut `text` to fit an echo area `columns` wide, leaving `trimSize`
    /// columns free. `0` columns means the width is unknown.
    pub fn display_line(
        &self,
        text: &str,
        columns: usize,
    ) -> String {
        if columns == 0 {
            return text.to_string();
        }
        let width = columns.saturating_sub(self.settings.display.trim_size);
        text.chars().take(width).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/src/signature/engine_tests.rs"]
mod tests;
