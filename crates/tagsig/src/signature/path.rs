//! Display-only shortening of tag file names.

use crate::config::PathMappingRule;

/// Prefix the trimmed path with the directory that held `include`.
pub const STYLE_INCLUDE_PARENT: u8 = 1;
/// Drop everything up to and including the last `include` directory.
pub const STYLE_INCLUDE_TRIM: u8 = 2;
/// Reduce every directory to its first character.
pub const STYLE_ABBREVIATE: u8 = 4;

const INCLUDE_SEGMENT: &str = "include";

pub fn shorten(
    path: &str,
    rules: &[PathMappingRule],
    style: u8,
) -> String {
    let mut shortened = collapse_current_dir(path);
    for (from, to) in rules {
        if !from.is_empty() {
            shortened = shortened.replace(from.as_str(), to);
        }
    }

    if style <= STYLE_INCLUDE_PARENT {
        return shortened;
    }

    let separator = separator_of(&shortened);
    let (prefix, rest) = if style & STYLE_INCLUDE_TRIM != 0 {
        trim_to_include(&shortened, separator, style & STYLE_INCLUDE_PARENT != 0)
    } else {
        (String::new(), shortened)
    };
    let rest = if style & STYLE_ABBREVIATE != 0 {
        abbreviate(&rest, separator)
    } else {
        rest
    };

    format!("{prefix}{rest}")
}

fn separator_of(path: &str) -> char {
    if path.contains('\\') && !path.contains('/') {
        '\\'
    } else {
        '/'
    }
}

/// `a/./b` → `a/b`, `a/.` → `a`, and the same with backslashes.
fn collapse_current_dir(path: &str) -> String {
    let mut out = path.to_string();
    for separator in ['/', '\\'] {
        let inner = format!("{separator}.{separator}");
        let single = separator.to_string();
        while out.contains(&inner) {
            out = out.replace(&inner, &single);
        }
        let trailing = format!("{separator}.");
        if let Some(stripped) = out.strip_suffix(&trailing)
            && !stripped.is_empty()
        {
            out = stripped.to_string();
        }
    }
    out
}

fn trim_to_include(
    path: &str,
    separator: char,
    keep_parent: bool,
) -> (String, String) {
    let segments: Vec<&str> = path.split(separator).collect();
    let directories = segments.len().saturating_sub(1);
    let Some(include_idx) = segments[..directories].iter().rposition(|segment| *segment == INCLUDE_SEGMENT) else {
        return (String::new(), path.to_string());
    };

    let rest = segments[include_idx + 1..].join(&separator.to_string());
    let prefix = match include_idx.checked_sub(1).map(|idx| segments[idx]) {
        Some(parent) if keep_parent && !parent.is_empty() => format!("{parent}:"),
        _ => String::new(),
    };
    (prefix, rest)
}

fn abbreviate(
    path: &str,
    separator: char,
) -> String {
    let segments: Vec<&str> = path.split(separator).collect();
    let last = segments.len().saturating_sub(1);
    segments
        .iter()
        .enumerate()
        .map(|(idx, segment)| {
            if idx == last {
                segment.to_string()
            } else {
                segment.chars().next().map(String::from).unwrap_or_default()
            }
        })
        .collect::<Vec<_>>()
        .join(&separator.to_string())
}

#[cfg(test)]
#[path = "../../tests/src/signature/path_tests.rs"]
mod tests;
