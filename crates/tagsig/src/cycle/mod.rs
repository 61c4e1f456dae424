//! Per-window echo state: the formatted candidates for the call being typed
//! and which one is on display.

mod balance;

pub use balance::{ParenCount, unclosed_paren};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// Position of the `(` that opened the call, 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Anchor {
    pub line: u32,
    pub column: u32,
}

/// Candidate strings plus a 1-based cursor that wraps at both ends.
///
/// A context belongs to one trigger. A new `(` gets a fresh context; it is
/// never merged with the previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EchoContext {
    candidates: Vec<String>,
    cursor: usize,
    anchor: Option<Anchor>,
}

impl Default for EchoContext {
    fn default() -> Self {
        Self {
            candidates: Vec::new(),
            cursor: 1,
            anchor: None,
        }
    }
}

impl EchoContext {
    pub fn anchored(anchor: Anchor) -> Self {
        Self {
            anchor: Some(anchor),
            ..Self::default()
        }
    }

    pub fn anchor(&self) -> Option<Anchor> {
        self.anchor
    }

    pub fn populate(
        &mut self,
        candidates: Vec<String>,
    ) {
        self.candidates = candidates;
        self.cursor = 1;
    }

    /// Move the cursor one step and return the candidate now on display,
    /// or `""` when there is none.
    pub fn advance(
        &mut self,
        direction: Direction,
    ) -> &str {
        let len = self.candidates.len();
        if len == 0 {
            return "";
        }
        self.cursor = match direction {
            Direction::Next => self.cursor % len + 1,
            Direction::Previous if self.cursor <= 1 => len,
            Direction::Previous => self.cursor - 1,
        };
        self.current()
    }

    pub fn current(&self) -> &str {
        self.cursor
            .checked_sub(1)
            .and_then(|index| self.candidates.get(index))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Jump to the `n`th candidate (1-based). Out-of-range positions are
    /// ignored.
    pub fn select(
        &mut self,
        n: usize,
    ) -> bool {
        if n == 0 || n > self.candidates.len() {
            return false;
        }
        self.cursor = n;
        true
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn on_insert_leave(&mut self) {
        self.reset();
    }

    /// Look at the text typed since the opening parenthesis and reset once
    /// the call has been closed. Returns whether the context was reset.
    pub fn observe_span(
        &mut self,
        span: &str,
    ) -> bool {
        if !ParenCount::of(span).is_balanced() {
            return false;
        }
        trace!("[cycle] call closed at {:?}, clearing {} candidates", self.anchor, self.candidates.len());
        self.reset();
        true
    }
}

#[cfg(test)]
#[path = "../../tests/src/cycle/cycle_tests.rs"]
mod tests;
