use regex::Regex;
use tracing::debug;

use crate::{
    config::LanguageSettings,
    tags::{OwnerKind, QUALIFIED_RETRY_LANGUAGE, TagKind, TagRecord},
};

/// Narrow raw query results to the candidates worth showing for `subject`.
///
/// Input order is preserved; it becomes the cycling order.
pub fn filter(
    records: Vec<TagRecord>,
    subject: &str,
    target_language: &str,
    require_callable: bool,
    languages: &LanguageSettings,
) -> Vec<TagRecord> {
    let subject_re = match Regex::new(&regex::escape(subject)) {
        Ok(re) => re,
        Err(error) => {
            debug!("[filter] cannot match '{subject}': {error}");
            return Vec::new();
        },
    };

    records
        .into_iter()
        .filter(|record| !record.name.is_empty())
        .filter(|record| match record.language.as_deref() {
            Some(tag_language) => languages.accepts(target_language, tag_language),
            None => true,
        })
        .filter(|record| match &record.kind {
            Some(kind) => {
                (!require_callable || is_callable(kind, record))
                    && subject_re.is_match(&record.name)
                    && !is_foreign_class_member(record, target_language)
            },
            None => !require_callable && record.name == subject,
        })
        .collect()
}

/// Prototypes and functions always qualify; a member only when its locator
/// has a `(`, which separates methods from fields.
fn is_callable(
    kind: &TagKind,
    record: &TagRecord,
) -> bool {
    kind.is_callable() || (*kind == TagKind::Member && record.cmd.raw().contains('('))
}

/// A qualified C++ name that does not mention its own class came from the
/// suffix retry matching some other scope.
fn is_foreign_class_member(
    record: &TagRecord,
    target_language: &str,
) -> bool {
    if target_language != QUALIFIED_RETRY_LANGUAGE {
        return false;
    }
    match &record.owner {
        Some(owner) if owner.kind == OwnerKind::Class => {
            record.name.contains("::") && !record.name.contains(owner.name.as_str())
        },
        _ => false,
    }
}

#[cfg(test)]
#[path = "../../tests/src/signature/filter_tests.rs"]
mod tests;
