use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Deserialize;
use serde_json::Value;

/// Editor language → tag `language:` labels that count as compatible.
pub fn default_language_mapping() -> BTreeMap<String, Vec<String>> {
    const DEFAULTS: &[(&str, &[&str])] = &[
        ("asm", &["Asm"]),
        ("aspperl", &["Asp"]),
        ("aspvbs", &["Asp"]),
        ("awk", &["Awk"]),
        ("basic", &["Basic"]),
        ("c", &["C", "C++"]),
        ("cpp", &["C++", "C"]),
        ("cs", &["C#"]),
        ("csharp", &["C#"]),
        ("cobol", &["Cobol"]),
        ("eiffel", &["Eiffel"]),
        ("erlang", &["Erlang"]),
        ("fortran", &["Fortran"]),
        ("go", &["Go"]),
        ("html", &["HTML"]),
        ("java", &["Java"]),
        ("javascript", &["JavaScript"]),
        ("lisp", &["Lisp"]),
        ("lua", &["Lua"]),
        ("make", &["Make"]),
        ("pascal", &["Pascal"]),
        ("perl", &["Perl"]),
        ("php", &["PHP"]),
        ("python", &["Python"]),
        ("rexx", &["REXX"]),
        ("ruby", &["Ruby"]),
        ("rust", &["Rust"]),
        ("scheme", &["Scheme"]),
        ("sh", &["Sh"]),
        ("shellscript", &["Sh"]),
        ("zsh", &["Sh"]),
        ("slang", &["SLang"]),
        ("sml", &["SML"]),
        ("sql", &["SQL"]),
        ("systemverilog", &["SystemVerilog"]),
        ("tcl", &["Tcl"]),
        ("vera", &["Vera"]),
        ("verilog", &["Verilog"]),
        ("vim", &["Vim"]),
        ("yacc", &["YACC"]),
    ];

    DEFAULTS
        .iter()
        .map(|(editor, tags)| (editor.to_string(), tags.iter().map(|t| t.to_string()).collect()))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct LanguageSettings {
    pub mapping: BTreeMap<String, Vec<String>>,
}

impl Default for LanguageSettings {
    fn default() -> Self {
        Self {
            mapping: default_language_mapping(),
        }
    }
}

impl LanguageSettings {
    /// Whether a tag written for `tag_language` may be shown in a buffer of
    /// `editor_language`. Languages without a mapping entry accept anything.
    pub fn accepts(
        &self,
        editor_language: &str,
        tag_language: &str,
    ) -> bool {
        match self.mapping.get(editor_language) {
            Some(accepted) => accepted.iter().any(|label| label == tag_language),
            None => true,
        }
    }

    pub(crate) fn apply_patch(
        &mut self,
        patch: LanguageSettingsPatch,
    ) {
        if let Some(mapping) = patch.mapping {
            self.mapping.extend(mapping);
        }
    }

    pub(crate) fn normalize(&mut self) {
        let mapping = std::mem::take(&mut self.mapping);
        self.mapping = mapping
            .into_iter()
            .map(|(editor, labels)| {
                let mut seen = HashSet::new();
                let labels = labels
                    .into_iter()
                    .map(|label| label.trim().to_string())
                    .filter(|label| !label.is_empty())
                    .filter(|label| seen.insert(label.clone()))
                    .collect();
                (editor.trim().to_string(), labels)
            })
            .filter(|(editor, _)| !editor.is_empty())
            .collect();
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct LanguageSettingsPatch {
    pub(crate) mapping: Option<HashMap<String, Vec<String>>>,
    #[serde(flatten)]
    pub(crate) _extra: HashMap<String, Value>,
}
