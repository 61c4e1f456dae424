use serde_json::json;

use super::*;

#[test]
fn zero_configuration_has_usable_defaults() {
    let settings = Settings::from_payload(None);
    assert_eq!(settings.paths.style, 0);
    assert!(settings.paths.mapping.is_empty());
    assert_eq!(settings.display.max_tooltip_lines, 10);
    assert!(!settings.display.tooltip_only);
    assert_eq!(settings.display.trim_size, 3);
    assert_eq!(settings.tags.files, vec!["tags"]);
    assert!(settings.tags.binary_search);
    assert_eq!(settings.logging.level, LogLevel::Info);
    assert!(settings.languages.mapping.len() >= 30);
}

#[test]
fn parses_namespaced_payload() {
    let payload = json!({
        "tagsig": {
            "languages": {
                "mapping": { "cuda": ["C++", "C"] }
            },
            "paths": {
                "mapping": [["/home/u", "~"], ["/usr/include", "<sys>"]],
                "style": 6
            },
            "display": {
                "maxTooltipLines": 4,
                "tooltipOnly": true,
                "trimSize": 0
            },
            "tags": {
                "files": ["tags", " ../lib/tags "],
                "binarySearch": false
            },
            "logging": {
                "level": "debug"
            }
        }
    });

    let settings = Settings::from_payload(Some(&payload));
    assert_eq!(settings.languages.mapping.get("cuda"), Some(&vec!["C++".to_string(), "C".to_string()]));
    assert!(settings.languages.mapping.contains_key("python"), "defaults survive a partial mapping");
    assert_eq!(
        settings.paths.mapping,
        vec![("/home/u".to_string(), "~".to_string()), ("/usr/include".to_string(), "<sys>".to_string())]
    );
    assert_eq!(settings.paths.style, 6);
    assert_eq!(settings.display.max_tooltip_lines, 4);
    assert!(settings.display.tooltip_only);
    assert_eq!(settings.display.trim_size, 0);
    assert_eq!(settings.tags.files, vec!["tags".to_string(), "../lib/tags".to_string()]);
    assert!(!settings.tags.binary_search);
    assert_eq!(settings.logging.level, LogLevel::Debug);
}

#[test]
fn parses_direct_payload() {
    let payload = json!({
        "display": { "tooltipOnly": true }
    });

    let settings = Settings::from_payload(Some(&payload));
    assert!(settings.display.tooltip_only);
    assert_eq!(settings.display.max_tooltip_lines, 10);
}

#[test]
fn clamps_numeric_values() {
    let payload = json!({
        "paths": { "style": 42 },
        "display": { "maxTooltipLines": 0, "trimSize": 500 }
    });

    let settings = Settings::from_payload(Some(&payload));
    assert_eq!(settings.paths.style, MAX_PATH_STYLE);
    assert_eq!(settings.display.max_tooltip_lines, MIN_TOOLTIP_LINES);
    assert_eq!(settings.display.trim_size, MAX_TRIM_SIZE);
}

#[test]
fn ignores_unknown_and_invalid_sections() {
    let payload = json!({
        "somethingElse": true,
        "display": { "maxTooltipLines": "many" }
    });

    let settings = Settings::from_payload(Some(&payload));
    assert_eq!(settings, Settings::default());
}

#[test]
fn merging_keeps_previous_values() {
    let first = Settings::from_payload(Some(&json!({ "paths": { "style": 3 } })));
    let second = first.merged_with_payload(&json!({ "display": { "trimSize": 10 } }));
    assert_eq!(second.paths.style, 3);
    assert_eq!(second.display.trim_size, 10);
}

#[test]
fn drops_empty_mapping_prefixes_and_duplicate_tag_files() {
    let payload = json!({
        "paths": { "mapping": [["", "x"], ["/a", "b"]] },
        "tags": { "files": ["tags", "tags", ""] }
    });

    let settings = Settings::from_payload(Some(&payload));
    assert_eq!(settings.paths.mapping, vec![("/a".to_string(), "b".to_string())]);
    assert_eq!(settings.tags.files, vec!["tags"]);
}

#[test]
fn language_acceptance() {
    let languages = LanguageSettings::default();
    assert!(languages.accepts("c", "C"));
    assert!(languages.accepts("c", "C++"));
    assert!(!languages.accepts("c", "Python"));
    assert!(languages.accepts("brainfuck", "Anything"), "unmapped editor languages accept every tag");
}

#[test]
fn log_level_filter_directive() {
    assert_eq!(LogLevel::Debug.filter_directive(), "tagsig=debug");
    assert!(LogLevel::Info.allows_info());
    assert!(!LogLevel::Warn.allows_info());
}

#[test]
fn logging_section_sets_level_and_file() {
    let settings = Settings::from_payload(Some(&json!({
        "logging": { "level": "warning", "file": " /tmp/tagsig-debug.log " }
    })));
    assert_eq!(settings.logging.level, LogLevel::Warn);
    assert_eq!(settings.logging.file, Some(std::path::PathBuf::from("/tmp/tagsig-debug.log")));

    let cleared = settings.merged_with_payload(&json!({ "logging": { "file": "" } }));
    assert_eq!(cleared.logging.file, None);
    assert_eq!(cleared.logging.level, LogLevel::Warn);
}

#[test]
fn user_language_mapping_replaces_only_listed_keys() {
    let settings = Settings::from_payload(Some(&json!({
        "languages": { "mapping": { "c": ["C"] } }
    })));
    assert!(!settings.languages.accepts("c", "C++"));
    assert!(settings.languages.accepts("cpp", "C"), "unlisted defaults are kept");

    let schema = generate_json_schema();
    let description = schema["tagsig.languages.mapping"]["markdownDescription"].as_str().unwrap_or_default();
    assert!(description.contains("replaces its built-in list"));
}

#[test]
fn schema_lists_every_section() {
    let markdown = generate_configuration_markdown();
    for title in ["## Languages", "## Paths", "## Display", "## Tags", "## Logging"] {
        assert!(markdown.contains(title), "missing {title}");
    }

    let schema = generate_json_schema();
    assert_eq!(schema["tagsig.paths.style"]["maximum"], json!(7));
    assert_eq!(schema["tagsig.tags.files"]["default"], json!(["tags"]));
    assert_eq!(schema["tagsig.paths.mapping"]["items"]["maxItems"], json!(2));
    assert_eq!(schema["tagsig.logging.level"]["enum"], json!(["error", "warn", "info", "debug", "trace"]));
    assert_eq!(schema["tagsig.logging.file"]["type"], json!(["string", "null"]));
}
