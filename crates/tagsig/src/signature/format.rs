//! Rendering of one tag as a single display line.
//!
//! The declaration text is rebuilt from the tag's search pattern, which holds
//! the source line the tag was generated from:
//!
//! ```text
//! add  m.c  /^int add(int a, int b)$/;"  f  signature:(int a, int b)
//!   -> int add(int a, int b) (1/1) m.c
//! ```

use regex::Regex;

use crate::{
    config::PathSettings,
    signature::path,
    tags::{QUALIFIED_RETRY_LANGUAGE, TagKind, TagRecord},
};

/// Languages whose declarations end at `;`.
const SEMICOLON_LANGUAGES: &[&str] = &["c", "cpp", "cs", "csharp", "java", "javascript", "systemverilog"];
/// Blocks open with `:` after the declaration.
const COLON_LANGUAGE: &str = "python";
/// Declarations may be followed by the `{` that opens the body.
const BRACE_LANGUAGE: &str = "tcl";

pub struct FormatContext<'a> {
    /// Editor language of the buffer the signature is shown in.
    pub language: &'a str,
    pub path: &'a PathSettings,
}

/// `<declaration> (<ordinal>/<total>) <file>[:<line>]`
pub fn format(
    record: &TagRecord,
    ordinal: usize,
    total: usize,
    ctx: &FormatContext<'_>,
) -> String {
    let declaration = declaration(record, ctx.language);
    let mut location = path::shorten(&record.filename, &ctx.path.mapping, ctx.path.style);
    if let Some(line) = record.cmd.line() {
        location.push(':');
        location.push_str(&line.to_string());
    }
    format!("{} ({ordinal}/{total}) {location}", collapse_whitespace(&declaration))
}

/// The declaration part of [`format`], before whitespace cleanup.
pub fn declaration(
    record: &TagRecord,
    language: &str,
) -> String {
    let Some(kind) = &record.kind else {
        return record.name.clone();
    };

    let mut text = match record.signature.as_deref() {
        Some(signature) => format!("{}{}{signature}", leading_text(record, language), record.name),
        None => declaration_without_signature(record, kind, language),
    };

    if *kind == TagKind::Member
        && let Some(owner) = &record.owner
    {
        text.push_str(&format!(" <-- {} {}", owner.kind.as_str(), owner.name));
    }
    text
}

/// Whatever precedes the name on the tagged line, e.g. `static int ` for
/// `static int add(int a, int b)`.
fn leading_text(
    record: &TagRecord,
    language: &str,
) -> String {
    let Some(line) = record.cmd.pattern_text() else {
        return String::new();
    };

    let bare = regex::escape(record.bare_name());
    let strip = if language == QUALIFIED_RETRY_LANGUAGE {
        // `Foo::operator +` may be written `Foo::operator+(` in the source.
        let bare = bare.replacen("operator ", r"operator\s*", 1);
        format!(r"(?:\w+::)*{bare}\s*\(.*")
    } else {
        format!("{}.*", word_pattern(record.bare_name(), &bare))
    };

    match Regex::new(&strip).ok().and_then(|re| re.find(line)) {
        Some(found) => line[..found.start()].to_string(),
        None => String::new(),
    }
}

fn declaration_without_signature(
    record: &TagRecord,
    kind: &TagKind,
    language: &str,
) -> String {
    match kind {
        TagKind::Macro => format!("macro {}", record.name),
        TagKind::Class | TagKind::Struct | TagKind::Union => format!("{} {}", kind.as_str(), record.name),
        kind if kind.is_declaration_bearing() => {
            isolate_declaration(record, kind, language).unwrap_or_else(|| match kind {
                TagKind::Typedef => format!("typedef {}", record.name),
                TagKind::Variable => format!("var {}", record.name),
                _ => record.name.clone(),
            })
        },
        _ => record.name.clone(),
    }
}

/// Cut the tagged line at the language's declaration terminator.
fn isolate_declaration(
    record: &TagRecord,
    kind: &TagKind,
    language: &str,
) -> Option<String> {
    let line = record.cmd.pattern_text()?;
    let bare = record.bare_name();
    let name = word_pattern(bare, &regex::escape(bare));

    let isolate = if SEMICOLON_LANGUAGES.contains(&language) {
        format!(r"^(.*?{name}.*?)\s*;")
    } else if language == COLON_LANGUAGE && matches!(kind, TagKind::Function | TagKind::Member) {
        format!(r"^(.*?{name}.*):")
    } else if language == BRACE_LANGUAGE {
        format!(r"^(.*?{name}.*?)\s*\{{?\s*$")
    } else {
        format!(r"^(.*?{name}.*?)\s*$")
    };

    let re = Regex::new(&isolate).ok()?;
    let caps = re.captures(line)?;
    Some(caps.get(1)?.as_str().to_string())
}

/// `escaped` wrapped in `\b` on each side that starts or ends with a word
/// character.
fn word_pattern(
    raw: &str,
    escaped: &str,
) -> String {
    let is_word = |ch: char| ch == '_' || ch.is_alphanumeric();
    let start = if raw.chars().next().is_some_and(is_word) {
        r"\b"
    } else {
        ""
    };
    let end = if raw.chars().last().is_some_and(is_word) {
        r"\b"
    } else {
        ""
    };
    format!("{start}{escaped}{end}")
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[path = "../../tests/src/signature/format_tests.rs"]
mod tests;
