use tower_lsp::lsp_types::*;

use crate::cycle::unclosed_paren;

// ── Document ────────────────────────────────────────────────────────────────

/// Snapshot of a single open text document.
#[derive(Debug, Clone)]
pub struct Document {
    pub uri: Url,
    /// Editor language id, e.g. `c` or `cpp`. Drives tag language filtering.
    pub language_id: String,
    /// Full source text (always kept up-to-date).
    pub text: String,
    /// Document version as reported by the client.
    pub version: i32,
    /// Pre-computed line start byte offsets (rebuilt on every mutation).
    line_offsets: Vec<usize>,
}

/// The call the cursor is inside of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    /// Position of the opening parenthesis.
    pub paren: Position,
    /// Line text up to and including the parenthesis.
    pub text: String,
    /// The line above, for a parenthesis that starts its line.
    pub previous_line: Option<String>,
}

impl Document {
    pub fn new(
        uri: Url,
        language_id: impl Into<String>,
        text: String,
        version: i32,
    ) -> Self {
        let line_offsets = Self::compute_line_offsets(&text);
        Self {
            uri,
            language_id: language_id.into(),
            text,
            version,
            line_offsets,
        }
    }

    // ── queries ─────────────────────────────────────────────────────────

    pub fn line_count(&self) -> usize {
        self.line_offsets.len()
    }

    /// Return the full text of a given 0-based line (without the trailing newline).
    pub fn line_text(
        &self,
        line: usize,
    ) -> Option<&str> {
        let start = *self.line_offsets.get(line)?;
        let end = self.line_offsets.get(line + 1).copied().unwrap_or(self.text.len());
        let slice = &self.text[start..end];
        Some(slice.trim_end_matches('\n').trim_end_matches('\r'))
    }

    /// Text of the cursor's line before the cursor.
    pub fn line_prefix(
        &self,
        pos: Position,
    ) -> Option<&str> {
        let line_start = *self.line_offsets.get(pos.line as usize)?;
        let offset = self.offset_of(pos)?;
        let prefix = &self.text[line_start..offset];
        Some(prefix.trim_end_matches('\n').trim_end_matches('\r'))
    }

    /// Text between two positions, which may span lines.
    pub fn text_between(
        &self,
        from: Position,
        to: Position,
    ) -> Option<&str> {
        let start = self.offset_of(from)?;
        let end = self.offset_of(to)?;
        self.text.get(start..end)
    }

    /// Convert an LSP `Position` (line/character, 0-based) to a byte offset.
    pub fn offset_of(
        &self,
        pos: Position,
    ) -> Option<usize> {
        let line = pos.line as usize;
        let line_start = *self.line_offsets.get(line)?;
        let line_end = self.line_offsets.get(line + 1).copied().unwrap_or(self.text.len());
        let line_text = &self.text[line_start..line_end];

        // LSP character offsets are UTF-16 code-unit counts.
        let mut utf16_offset: u32 = 0;
        let mut byte_offset = line_start;
        for ch in line_text.chars() {
            if utf16_offset >= pos.character {
                break;
            }
            utf16_offset += ch.len_utf16() as u32;
            byte_offset += ch.len_utf8();
        }
        Some(byte_offset)
    }

    /// Convert a byte offset to an LSP `Position`.
    pub fn position_of(
        &self,
        offset: usize,
    ) -> Position {
        let offset = offset.min(self.text.len());
        let line = match self.line_offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(ins) => ins.saturating_sub(1),
        };
        let line_start = self.line_offsets[line];
        let character = self.text[line_start..offset].chars().map(|c| c.len_utf16() as u32).sum::<u32>();
        Position {
            line: line as u32,
            character,
        }
    }

    /// The innermost call on the cursor's line that is still open at the
    /// cursor.
    pub fn call_site(
        &self,
        pos: Position,
    ) -> Option<CallSite> {
        let prefix = self.line_prefix(pos)?;
        let paren = unclosed_paren(prefix)?;
        let line_start = self.line_offsets[pos.line as usize];

        let previous_line = match pos.line {
            0 => None,
            line => self.line_text(line as usize - 1).map(str::to_string),
        };

        Some(CallSite {
            paren: self.position_of(line_start + paren),
            text: prefix[..=paren].to_string(),
            previous_line,
        })
    }

    /// Extract the word (identifier, possibly `::`-qualified) surrounding
    /// the given position. Returns `(word, Range)`.
    pub fn word_at(
        &self,
        pos: Position,
    ) -> Option<(String, Range)> {
        let line_text = self.line_text(pos.line as usize)?;
        let chars: Vec<char> = line_text.chars().collect();

        // Translate UTF-16 character offset to char index in the line.
        let mut char_idx: usize = 0;
        let mut utf16_count: u32 = 0;
        for (i, &ch) in chars.iter().enumerate() {
            if utf16_count >= pos.character {
                char_idx = i;
                break;
            }
            utf16_count += ch.len_utf16() as u32;
            char_idx = i + 1;
        }

        if char_idx >= chars.len() {
            if char_idx > 0 && is_word_char(chars[char_idx - 1]) {
                char_idx = chars.len() - 1;
            } else {
                return None;
            }
        }

        if !is_word_char(chars[char_idx]) {
            if char_idx > 0 && is_word_char(chars[char_idx - 1]) {
                char_idx -= 1;
            } else {
                return None;
            }
        }

        // Expand left, across `::` qualifiers.
        let mut start = char_idx;
        loop {
            while start > 0 && is_word_char(chars[start - 1]) {
                start -= 1;
            }
            if start >= 3 && chars[start - 1] == ':' && chars[start - 2] == ':' && is_word_char(chars[start - 3]) {
                start -= 2;
                continue;
            }
            break;
        }

        // Expand right.
        let mut end = char_idx;
        while end + 1 < chars.len() && is_word_char(chars[end + 1]) {
            end += 1;
        }

        let word: String = chars[start..=end].iter().collect();
        if word.is_empty() {
            return None;
        }

        let start_utf16: u32 = chars[..start].iter().map(|c| c.len_utf16() as u32).sum();
        let end_utf16: u32 = chars[..=end].iter().map(|c| c.len_utf16() as u32).sum();

        let range = Range {
            start: Position {
                line: pos.line,
                character: start_utf16,
            },
            end: Position {
                line: pos.line,
                character: end_utf16,
            },
        };

        Some((word, range))
    }

    // ── mutations ───────────────────────────────────────────────────────

    /// Replace the full content and bump version.
    pub fn set_content(
        &mut self,
        text: String,
        version: i32,
    ) {
        self.text = text;
        self.version = version;
        self.line_offsets = Self::compute_line_offsets(&self.text);
    }

    /// Apply a list of incremental or full-content changes and bump version.
    pub fn apply_changes(
        &mut self,
        changes: Vec<TextDocumentContentChangeEvent>,
        version: i32,
    ) {
        for change in changes {
            if let Some(range) = change.range {
                if let (Some(start), Some(end)) = (self.offset_of(range.start), self.offset_of(range.end)) {
                    self.text.replace_range(start..end, &change.text);
                    self.line_offsets = Self::compute_line_offsets(&self.text);
                }
            } else {
                self.text = change.text;
                self.line_offsets = Self::compute_line_offsets(&self.text);
            }
        }
        self.version = version;
    }

    // ── internal helpers ────────────────────────────────────────────────

    fn compute_line_offsets(text: &str) -> Vec<usize> {
        let mut offsets = vec![0usize];
        for (i, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                offsets.push(i + 1);
            }
        }
        offsets
    }
}

// ── helpers ─────────────────────────────────────────────────────────────────

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
#[path = "../../tests/src/document/text_document_tests.rs"]
mod tests;
