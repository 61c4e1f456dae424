use std::collections::BTreeMap;

/// Syntactic category of a tag.
///
/// ctags writes kinds either as a single letter (`f`) or, with
/// `--fields=+K`, as a long name (`function`). Both spellings map to the
/// same variant. Letters outside the C-family vocabulary are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TagKind {
    Prototype,
    Function,
    Member,
    Macro,
    Class,
    Struct,
    Union,
    Typedef,
    Variable,
    Other(String),
}

impl TagKind {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        let kind = match raw {
            "p" | "prototype" => Self::Prototype,
            "f" | "function" => Self::Function,
            "m" | "member" | "method" => Self::Member,
            "d" | "macro" => Self::Macro,
            "c" | "class" => Self::Class,
            "s" | "struct" => Self::Struct,
            "u" | "union" => Self::Union,
            "t" | "typedef" => Self::Typedef,
            "v" | "variable" => Self::Variable,
            other => Self::Other(other.to_string()),
        };
        Some(kind)
    }

    /// Kinds that can be invoked without further evidence.
    pub fn is_callable(&self) -> bool {
        matches!(self, Self::Prototype | Self::Function)
    }

    /// Kinds whose locator line usually holds a full declaration.
    pub fn is_declaration_bearing(&self) -> bool {
        matches!(self, Self::Function | Self::Prototype | Self::Member | Self::Variable | Self::Typedef)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Prototype => "prototype",
            Self::Function => "function",
            Self::Member => "member",
            Self::Macro => "macro",
            Self::Class => "class",
            Self::Struct => "struct",
            Self::Union => "union",
            Self::Typedef => "typedef",
            Self::Variable => "variable",
            Self::Other(other) => other,
        }
    }
}

/// Where a tag's definition lives inside its file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// `42`
    Line(u32),
    /// `/^int add(int a, int b)$/`. `text` is the unanchored, unescaped body.
    Pattern {
        raw: String,
        text: String,
    },
    Other(String),
}

impl Locator {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim_end();
        if let Ok(line) = raw.parse::<u32>() {
            return Self::Line(line);
        }

        let mut chars = raw.chars();
        let Some(delimiter @ ('/' | '?')) = chars.next() else {
            return Self::Other(raw.to_string());
        };
        if raw.len() < 2 || !raw.ends_with(delimiter) {
            return Self::Other(raw.to_string());
        }

        let body = &raw[1..raw.len() - 1];
        let body = body.strip_prefix('^').unwrap_or(body);
        let body = match body.strip_suffix('$') {
            Some(stripped) if !stripped.ends_with('\\') => stripped,
            _ => body,
        };

        Self::Pattern {
            raw: raw.to_string(),
            text: unescape_pattern(body, delimiter),
        }
    }

    pub fn line(&self) -> Option<u32> {
        match self {
            Self::Line(line) => Some(*line),
            _ => None,
        }
    }

    pub fn pattern_text(&self) -> Option<&str> {
        match self {
            Self::Pattern {
                text, ..
            } => Some(text),
            _ => None,
        }
    }

    /// The locator exactly as it appeared in the tags file.
    pub fn raw(&self) -> String {
        match self {
            Self::Line(line) => line.to_string(),
            Self::Pattern {
                raw, ..
            } => raw.clone(),
            Self::Other(raw) => raw.clone(),
        }
    }
}

fn unescape_pattern(
    body: &str,
    delimiter: char,
) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\\'
            && let Some(&next) = chars.peek()
            && (next == delimiter || next == '\\')
        {
            out.push(next);
            chars.next();
            continue;
        }
        out.push(ch);
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OwnerKind {
    Class,
    Struct,
    Union,
}

impl OwnerKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Struct => "struct",
            Self::Union => "union",
        }
    }
}

/// The type a member tag belongs to (`class:`, `struct:` or `union:`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Owner {
    pub kind: OwnerKind,
    pub name: String,
}

/// One tag as produced by the index. Never mutated after a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRecord {
    pub name: String,
    pub kind: Option<TagKind>,
    pub language: Option<String>,
    pub signature: Option<String>,
    pub cmd: Locator,
    pub filename: String,
    pub owner: Option<Owner>,
    pub fields: BTreeMap<String, String>,
}

impl TagRecord {
    pub fn new(
        name: impl Into<String>,
        filename: impl Into<String>,
        cmd: Locator,
    ) -> Self {
        Self {
            name: name.into(),
            kind: None,
            language: None,
            signature: None,
            cmd,
            filename: filename.into(),
            owner: None,
            fields: BTreeMap::new(),
        }
    }

    pub fn with_kind(
        mut self,
        kind: TagKind,
    ) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_language(
        mut self,
        language: impl Into<String>,
    ) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_signature(
        mut self,
        signature: impl Into<String>,
    ) -> Self {
        self.signature = Some(signature.into());
        self
    }

    pub fn with_owner(
        mut self,
        kind: OwnerKind,
        name: impl Into<String>,
    ) -> Self {
        self.owner = Some(Owner {
            kind,
            name: name.into(),
        });
        self
    }

    /// Name with any `A::B::` qualification removed.
    pub fn bare_name(&self) -> &str {
        self.name.rsplit("::").next().unwrap_or(&self.name)
    }
}

#[cfg(test)]
#[path = "../../tests/src/tags/record_tests.rs"]
mod tests;
