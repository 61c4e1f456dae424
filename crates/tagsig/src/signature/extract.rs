use once_cell::sync::Lazy;
use regex::Regex;

/// The callee at the end of the text: a possibly qualified identifier
/// (optionally a `~destructor`), `operator new[]`/`delete[]`, or an operator
/// built from symbol characters.
static CALLEE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^.*?(",
        r"(?:\w+::)*",
        r"(?:~?\w+",
        r"|operator\s+new(?:\[\])?",
        r"|operator\s+delete(?:\[\])?",
        r"|operator\s*[\[\]()+\-*/%<>=!~^&|]+",
        r"))\s*$",
    ))
    .expect("callee regex is valid")
});

static OPERATOR_SPACING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\boperator\s*").expect("operator regex is valid"));

/// Extract the name of the function being called from the text typed up to
/// (and usually including) the opening parenthesis.
///
/// Returns an empty string when nothing callable precedes the parenthesis.
pub fn extract(text: &str) -> String {
    let text = text.trim_end();
    let text = text.strip_suffix('(').unwrap_or(text);

    let Some(name) = CALLEE_RE.captures(text).and_then(|caps| caps.get(1)) else {
        return String::new();
    };
    let name = name.as_str();

    // Tags spell operators with exactly one space after the keyword.
    if OPERATOR_SPACING_RE.is_match(name) {
        return OPERATOR_SPACING_RE.replace(name, "operator ").into_owned();
    }
    name.to_string()
}

/// Text to hand to [`extract`] for a `(` typed at the end of `current`.
///
/// When the parenthesis is the only thing on its line the callee is on the
/// line above, so that line is used with a `(` appended.
pub fn call_prefix(
    current: &str,
    previous_line: Option<&str>,
) -> String {
    let before_paren = current.trim_end();
    let before_paren = before_paren.strip_suffix('(').unwrap_or(before_paren);
    match previous_line {
        Some(previous) if before_paren.trim().is_empty() => format!("{}(", previous.trim_end()),
        _ => current.to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/src/signature/extract_tests.rs"]
mod tests;
