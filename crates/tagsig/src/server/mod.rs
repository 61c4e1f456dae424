pub(crate) mod commands;
pub(crate) mod handler;
pub(crate) mod state;

pub use commands::{
    COMMANDS, CommandTarget, EchoCommand, LEAVE_INSERT_COMMAND, NEXT_CANDIDATE_COMMAND, PREVIOUS_CANDIDATE_COMMAND,
};
pub use state::TagSigServer;
