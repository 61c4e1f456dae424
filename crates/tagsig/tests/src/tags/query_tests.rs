use std::cell::{Cell, RefCell};

use super::*;
use crate::tags::record::{Locator, TagKind};

/// Index that fails with a transient error while binary search is on.
struct FlakyIndex {
    records: Vec<TagRecord>,
    fail_transiently: bool,
    binary_search: Cell<bool>,
    seen_modes: RefCell<Vec<bool>>,
    seen_patterns: RefCell<Vec<String>>,
}

impl FlakyIndex {
    fn new(
        records: Vec<TagRecord>,
        fail_transiently: bool,
    ) -> Self {
        Self {
            records,
            fail_transiently,
            binary_search: Cell::new(true),
            seen_modes: RefCell::new(Vec::new()),
            seen_patterns: RefCell::new(Vec::new()),
        }
    }
}

impl TagIndex for FlakyIndex {
    fn find(
        &self,
        pattern: &NamePattern,
    ) -> Result<Vec<TagRecord>, QueryError> {
        self.seen_modes.borrow_mut().push(self.binary_search.get());
        self.seen_patterns.borrow_mut().push(pattern.as_str().to_string());
        if self.fail_transiently && self.binary_search.get() {
            return Err(QueryError::Transient {
                path: "tags".into(),
                reason: "not sorted".into(),
            });
        }
        Ok(self.records.iter().filter(|r| pattern.is_match(&r.name)).cloned().collect())
    }

    fn binary_search(&self) -> bool {
        self.binary_search.get()
    }

    fn set_binary_search(
        &self,
        enabled: bool,
    ) {
        self.binary_search.set(enabled);
    }
}

struct DownIndex;

impl TagIndex for DownIndex {
    fn find(
        &self,
        _pattern: &NamePattern,
    ) -> Result<Vec<TagRecord>, QueryError> {
        Err(QueryError::Unavailable {
            path: "tags".into(),
            reason: "No such file or directory".into(),
        })
    }

    fn binary_search(&self) -> bool {
        true
    }

    fn set_binary_search(
        &self,
        _enabled: bool,
    ) {
    }
}

fn function(name: &str) -> TagRecord {
    TagRecord::new(name, "a.c", Locator::Line(1)).with_kind(TagKind::Function)
}

#[test]
fn exact_pattern_escapes_metacharacters() {
    let pattern = NamePattern::exact("operator []").expect("pattern");
    assert!(pattern.is_match("operator []"));
    assert!(!pattern.is_match("operator ()"));
    assert_eq!(pattern.literal(), Some("operator []"));

    let pattern = NamePattern::exact("a.b").expect("pattern");
    assert!(!pattern.is_match("axb"));
}

#[test]
fn qualified_suffix_requires_scope_operator() {
    let pattern = NamePattern::qualified_suffix("draw").expect("pattern");
    assert!(pattern.is_match("ns::draw"));
    assert!(pattern.is_match("a::b::draw"));
    assert!(!pattern.is_match("draw"));
    assert!(!pattern.is_match("ns::draw2"));
    assert_eq!(pattern.literal(), None);
}

#[test]
fn transient_error_retries_once_without_binary_search_and_restores() {
    let index = FlakyIndex::new(vec![function("add")], true);
    let records = TagQuery::new(&index).query("add", "c").expect("query succeeds after retry");

    assert_eq!(records.len(), 1);
    assert_eq!(*index.seen_modes.borrow(), vec![true, false]);
    assert!(index.binary_search(), "binary search must be restored after the retry");
}

#[test]
fn degraded_mode_restores_on_failure() {
    let index = FlakyIndex::new(Vec::new(), true);
    index.set_binary_search(true);
    {
        let _degraded = DegradedMode::enter(&index);
        assert!(!index.binary_search());
    }
    assert!(index.binary_search());

    index.set_binary_search(false);
    {
        let _degraded = DegradedMode::enter(&index);
    }
    assert!(!index.binary_search(), "restores the previous value, not a hard-coded one");
}

#[test]
fn cpp_retries_with_qualified_pattern_when_exact_is_empty() {
    let index = FlakyIndex::new(vec![function("ns::draw")], false);
    let records = TagQuery::new(&index).query("draw", "cpp").expect("query");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "ns::draw");
    assert_eq!(*index.seen_patterns.borrow(), vec!["^draw$".to_string(), "::draw$".to_string()]);
}

#[test]
fn qualified_retry_is_cpp_only() {
    let index = FlakyIndex::new(vec![function("ns::draw")], false);
    let records = TagQuery::new(&index).query("draw", "c").expect("query");

    assert!(records.is_empty());
    assert_eq!(index.seen_patterns.borrow().len(), 1);
}

#[test]
fn qualified_retry_skips_when_exact_found() {
    let index = FlakyIndex::new(vec![function("draw"), function("ns::draw")], false);
    let records = TagQuery::new(&index).query("draw", "cpp").expect("query");

    assert_eq!(records.len(), 1);
    assert_eq!(index.seen_patterns.borrow().len(), 1);
}

#[test]
fn qualified_retry_skips_control_keywords() {
    let index = FlakyIndex::new(vec![function("std::for")], false);
    let records = TagQuery::new(&index).query("for", "cpp").expect("query");

    assert!(records.is_empty());
    assert_eq!(index.seen_patterns.borrow().len(), 1);
}

#[test]
fn unavailable_index_is_reported() {
    let error = TagQuery::new(&DownIndex).query("add", "c").expect_err("index is down");
    assert!(matches!(error, QueryError::Unavailable { .. }));
    assert_eq!(error.to_string(), "cannot read tags file tags: No such file or directory");
}
