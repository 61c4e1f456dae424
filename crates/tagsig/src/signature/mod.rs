//! From typed text to echo lines: callee extraction, candidate filtering,
//! formatting and path shortening.

pub mod engine;
pub mod extract;
pub mod filter;
pub mod format;
pub mod path;

pub use engine::{EchoEngine, TOOLTIP_ELLIPSIS};
pub use extract::{call_prefix, extract};
pub use filter::filter;
pub use format::{FormatContext, format};
pub use path::shorten;
