//! Line parser for ctags `tags` files (the "extended" format).
//!
//! ```text
//! name<TAB>file<TAB>excmd;"<TAB>kind<TAB>key:value...
//! ```

use std::path::Path;

use crate::tags::record::{Locator, Owner, OwnerKind, TagKind, TagRecord};

const HEADER_PREFIX: &str = "!_TAG_";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TagLine {
    Header {
        key: String,
        value: String,
    },
    Tag(TagRecord),
}

/// Parse one line of a tags file. Returns `None` for blank or malformed lines.
///
/// Relative file names are resolved against `base_dir`, the directory that
/// holds the tags file.
pub(crate) fn parse_line(
    line: &str,
    base_dir: Option<&Path>,
) -> Option<TagLine> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.is_empty() {
        return None;
    }

    if let Some(header) = line.strip_prefix(HEADER_PREFIX) {
        let mut parts = header.splitn(3, '\t');
        let key = parts.next()?.to_string();
        let value = parts.next().unwrap_or_default().to_string();
        return Some(TagLine::Header {
            key,
            value,
        });
    }

    let (name, rest) = line.split_once('\t')?;
    let (file, rest) = rest.split_once('\t')?;
    if name.is_empty() {
        return None;
    }

    let (cmd, trailer) = split_excmd(rest);
    let mut record = TagRecord::new(name, resolve_filename(file, base_dir), Locator::parse(cmd));

    let fields = trailer.strip_prefix(";\"").unwrap_or(trailer);
    for field in fields.split('\t').filter(|f| !f.is_empty()) {
        apply_field(&mut record, field);
    }

    Some(TagLine::Tag(record))
}

/// Split `rest` into the ex command and whatever follows it.
fn split_excmd(rest: &str) -> (&str, &str) {
    let bytes = rest.as_bytes();
    if let Some(&delimiter @ (b'/' | b'?')) = bytes.first() {
        let mut idx = 1;
        while idx < bytes.len() {
            match bytes[idx] {
                b'\\' => idx += 2,
                b if b == delimiter => return (&rest[..=idx], &rest[idx + 1..]),
                _ => idx += 1,
            }
        }
        return (rest, "");
    }

    let end = rest.find(";\"").or_else(|| rest.find('\t')).unwrap_or(rest.len());
    (&rest[..end], &rest[end..])
}

fn apply_field(
    record: &mut TagRecord,
    field: &str,
) {
    let Some((key, value)) = field.split_once(':') else {
        if record.kind.is_none() {
            record.kind = TagKind::parse(field);
        }
        return;
    };

    let value = unescape_field(value);
    match key {
        "kind" => record.kind = TagKind::parse(&value),
        "language" => record.language = Some(value),
        "signature" => record.signature = Some(value),
        "class" => record.owner = owner(OwnerKind::Class, value),
        "struct" => record.owner = owner(OwnerKind::Struct, value),
        "union" => record.owner = owner(OwnerKind::Union, value),
        _ => {
            record.fields.insert(key.to_string(), value);
        },
    }
}

fn owner(
    kind: OwnerKind,
    name: String,
) -> Option<Owner> {
    Some(Owner {
        kind,
        name,
    })
}

fn unescape_field(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            },
            None => out.push('\\'),
        }
    }
    out
}

fn resolve_filename(
    file: &str,
    base_dir: Option<&Path>,
) -> String {
    let path = Path::new(file);
    match base_dir {
        Some(dir) if path.is_relative() && !dir.as_os_str().is_empty() => dir.join(path).display().to_string(),
        _ => file.to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/src/tags/parser_tests.rs"]
mod tests;
