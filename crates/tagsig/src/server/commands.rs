use serde::Deserialize;
use serde_json::Value;
use tower_lsp::lsp_types::Url;

use crate::cycle::Direction;

pub const NEXT_CANDIDATE_COMMAND: &str = "tagsig.nextCandidate";
pub const PREVIOUS_CANDIDATE_COMMAND: &str = "tagsig.previousCandidate";
/// Clears the echo state of a document, like leaving insert mode.
pub const LEAVE_INSERT_COMMAND: &str = "tagsig.leaveInsert";

pub const COMMANDS: &[&str] = &[NEXT_CANDIDATE_COMMAND, PREVIOUS_CANDIDATE_COMMAND, LEAVE_INSERT_COMMAND];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EchoCommand {
    Cycle(Direction),
    LeaveInsert,
}

impl EchoCommand {
    pub fn parse(command: &str) -> Option<Self> {
        match command {
            NEXT_CANDIDATE_COMMAND => Some(Self::Cycle(Direction::Next)),
            PREVIOUS_CANDIDATE_COMMAND => Some(Self::Cycle(Direction::Previous)),
            LEAVE_INSERT_COMMAND => Some(Self::LeaveInsert),
            _ => None,
        }
    }
}

/// Which document a command applies to, and how wide the echo area is.
///
/// Accepted argument shapes: `["file:///a.c"]`, `["file:///a.c", 80]` and
/// `[{ "uri": "file:///a.c", "columns": 80 }]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommandTarget {
    pub uri: Url,
    #[serde(default)]
    pub columns: usize,
}

impl CommandTarget {
    pub fn from_arguments(arguments: &[Value]) -> Option<Self> {
        match arguments.first()? {
            Value::String(uri) => Some(Self {
                uri: Url::parse(uri).ok()?,
                columns: arguments.get(1).and_then(Value::as_u64).unwrap_or(0) as usize,
            }),
            object @ Value::Object(_) => serde_json::from_value(object.clone()).ok(),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src/server/commands_tests.rs"]
mod tests;
