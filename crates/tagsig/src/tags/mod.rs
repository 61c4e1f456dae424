//! ctags tag files: record model, file reader and name queries.

mod file;
mod parser;
mod query;
mod record;

pub use file::{TagFiles, TagsFile};
pub use query::{DegradedMode, NamePattern, QUALIFIED_RETRY_LANGUAGE, QueryError, TagIndex, TagQuery};
pub use record::{Locator, Owner, OwnerKind, TagKind, TagRecord};
