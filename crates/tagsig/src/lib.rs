pub mod config;
pub mod cycle;
pub mod document;
pub mod server;
pub mod signature;
pub mod tags;

pub use config::Settings;
pub use cycle::{Anchor, Direction, EchoContext};
pub use document::{Document, DocumentStore};
pub use server::TagSigServer;
pub use signature::{EchoEngine, FormatContext};
pub use tags::{QueryError, TagFiles, TagIndex, TagQuery, TagRecord, TagsFile};
