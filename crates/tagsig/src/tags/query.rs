use std::fmt::{Display, Formatter};

use regex::Regex;
use tracing::debug;

use crate::tags::record::TagRecord;

/// Editor language whose tags are usually recorded with their enclosing
/// namespace, so call sites that omit it need a second, suffix-anchored
/// lookup.
pub const QUALIFIED_RETRY_LANGUAGE: &str = "cpp";

/// Call-site words that look like a function name but never are.
const CONTROL_KEYWORDS: &[&str] = &["catch", "if", "for", "while", "switch"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The sorted-file acceleration disagrees with the file contents.
    Transient {
        path: String,
        reason: String,
    },
    /// No tags file could be read.
    Unavailable {
        path: String,
        reason: String,
    },
    InvalidPattern(String),
}

impl Display for QueryError {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Self::Transient {
                path,
                reason,
            } => write!(f, "inconsistent tags file {path}: {reason}"),
            Self::Unavailable {
                path,
                reason,
            } => write!(f, "cannot read tags file {path}: {reason}"),
            Self::InvalidPattern(reason) => write!(f, "invalid tag pattern: {reason}"),
        }
    }
}

impl std::error::Error for QueryError {}

impl From<regex::Error> for QueryError {
    fn from(error: regex::Error) -> Self {
        Self::InvalidPattern(error.to_string())
    }
}

/// A compiled tag-name pattern.
///
/// Exact patterns also carry the literal name so a sorted tags file can be
/// binary searched instead of scanned.
#[derive(Debug, Clone)]
pub struct NamePattern {
    regex: Regex,
    literal: Option<String>,
}

impl NamePattern {
    /// `^name$`
    pub fn exact(name: &str) -> Result<Self, QueryError> {
        Ok(Self {
            regex: Regex::new(&format!("^{}$", regex::escape(name)))?,
            literal: Some(name.to_string()),
        })
    }

    /// `::name$`, matching `ns::name` and `A::B::name` but not `name`.
    pub fn qualified_suffix(name: &str) -> Result<Self, QueryError> {
        Ok(Self {
            regex: Regex::new(&format!("::{}$", regex::escape(name)))?,
            literal: None,
        })
    }

    pub fn is_match(
        &self,
        name: &str,
    ) -> bool {
        self.regex.is_match(name)
    }

    pub fn literal(&self) -> Option<&str> {
        self.literal.as_deref()
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// Read-only tag lookup service.
pub trait TagIndex {
    fn find(
        &self,
        pattern: &NamePattern,
    ) -> Result<Vec<TagRecord>, QueryError>;

    /// Whether sorted files may be binary searched.
    fn binary_search(&self) -> bool;

    fn set_binary_search(
        &self,
        enabled: bool,
    );
}

/// Disables binary search for as long as it is alive and restores the
/// previous setting when dropped.
pub struct DegradedMode<'a, I: TagIndex + ?Sized> {
    index: &'a I,
    previous: bool,
}

impl<'a, I: TagIndex + ?Sized> DegradedMode<'a, I> {
    pub fn enter(index: &'a I) -> Self {
        let previous = index.binary_search();
        index.set_binary_search(false);
        Self {
            index,
            previous,
        }
    }
}

impl<I: TagIndex + ?Sized> Drop for DegradedMode<'_, I> {
    fn drop(&mut self) {
        self.index.set_binary_search(self.previous);
    }
}

/// Name lookups against a [`TagIndex`].
pub struct TagQuery<'a, I: TagIndex + ?Sized> {
    index: &'a I,
}

impl<'a, I: TagIndex + ?Sized> TagQuery<'a, I> {
    pub fn new(index: &'a I) -> Self {
        Self {
            index,
        }
    }

    /// Return every tag named exactly `name`.
    ///
    /// For [`QUALIFIED_RETRY_LANGUAGE`] an empty result triggers one more
    /// lookup for `…::name`. An empty result is not an error.
    pub fn query(
        &self,
        name: &str,
        language: &str,
    ) -> Result<Vec<TagRecord>, QueryError> {
        let exact = NamePattern::exact(name)?;
        let records = self.find_with_retry(&exact)?;
        if !records.is_empty() || language != QUALIFIED_RETRY_LANGUAGE || CONTROL_KEYWORDS.contains(&name) {
            return Ok(records);
        }

        let qualified = NamePattern::qualified_suffix(name)?;
        debug!("[tag-query] no exact tag for '{name}', retrying with {}", qualified.as_str());
        self.find_with_retry(&qualified)
    }

    fn find_with_retry(
        &self,
        pattern: &NamePattern,
    ) -> Result<Vec<TagRecord>, QueryError> {
        match self.index.find(pattern) {
            Err(QueryError::Transient {
                path,
                reason,
            }) => {
                debug!("[tag-query] {path}: {reason}; retrying without binary search");
                let _degraded = DegradedMode::enter(self.index);
                self.index.find(pattern)
            },
            result => result,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src/tags/query_tests.rs"]
mod tests;
