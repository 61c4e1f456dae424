use super::*;
use crate::{
    config::DisplaySettings,
    cycle::Direction,
    tags::{NamePattern, QueryError, TagRecord, TagsFile},
};

const TAGS: &str = concat!(
    "add\tmath.c\t/^int add(int a, int b)$/;\"\tf\tlanguage:C\tsignature:(int a, int b)\n",
    "add\tmath.h\t/^int add(int a, int b);$/;\"\tp\tlanguage:C\tsignature:(int a, int b)\n",
    "add\tvec.c\t/^static float add(float x, float y)$/;\"\tf\tlanguage:C\tsignature:(float x, float y)\n",
    "count\tmath.c\t/^static int count = 0;$/;\"\tv\tlanguage:C\n",
    "count\tmath.h\t/^int count(const char *s);$/;\"\tp\tlanguage:C\tsignature:(const char *s)\n",
    "Shape::area\tshape.cpp\t/^double Shape::area() const {$/;\"\tf\tlanguage:C++\tclass:Shape\tsignature:() const\n",
);

fn index() -> TagsFile {
    TagsFile::from_contents("tags", TAGS)
}

#[test]
fn candidates_are_formatted_in_index_order() {
    let settings = Settings::default();
    let index = index();
    let engine = EchoEngine::new(&settings, &index);
    assert_eq!(engine.candidates("add", "c", true), vec![
        "int add(int a, int b) (1/3) math.c",
        "int add(int a, int b) (2/3) math.h",
        "static float add(float x, float y) (3/3) vec.c",
    ]);
}

#[test]
fn callable_lookup_skips_variables() {
    let settings = Settings::default();
    let index = index();
    let engine = EchoEngine::new(&settings, &index);
    assert_eq!(engine.candidates("count", "c", true), vec!["int count(const char *s) (1/1) math.h"]);
    assert_eq!(engine.candidates("count", "c", false).len(), 2);
}

#[test]
fn cpp_finds_qualified_tags_by_suffix() {
    let settings = Settings::default();
    let index = index();
    let engine = EchoEngine::new(&settings, &index);
    assert_eq!(engine.candidates("area", "cpp", true), vec!["double Shape::area() const (1/1) shape.cpp"]);
    assert!(engine.candidates("area", "c", true).is_empty());
}

#[test]
fn open_paren_populates_context_and_cycles() {
    let settings = Settings::default();
    let index = index();
    let engine = EchoEngine::new(&settings, &index);
    let mut ctx = EchoContext::default();

    let shown = engine.on_open_paren(&mut ctx, "    total = add(", None, "c");
    assert_eq!(shown.as_deref(), Some("int add(int a, int b) (1/3) math.c"));
    assert_eq!(ctx.len(), 3);
    assert_eq!(ctx.advance(Direction::Previous), "static float add(float x, float y) (3/3) vec.c");
}

#[test]
fn open_paren_alone_on_its_line_uses_previous_line() {
    let settings = Settings::default();
    let index = index();
    let engine = EchoEngine::new(&settings, &index);
    let mut ctx = EchoContext::default();

    let shown = engine.on_open_paren(&mut ctx, "        (", Some("    total = count"), "c");
    assert_eq!(shown.as_deref(), Some("int count(const char *s) (1/1) math.h"));
}

#[test]
fn open_paren_without_candidates_resets_context() {
    let settings = Settings::default();
    let index = index();
    let engine = EchoEngine::new(&settings, &index);
    let mut ctx = EchoContext::default();
    ctx.populate(vec!["stale".to_string()]);

    assert_eq!(engine.on_open_paren(&mut ctx, "if (", None, "c"), None);
    assert!(ctx.is_empty());
    assert_eq!(engine.on_open_paren(&mut ctx, "x = (", None, "c"), None);
    assert!(ctx.is_empty());
}

#[test]
fn tooltip_only_fills_context_silently() {
    let settings = Settings {
        display: DisplaySettings {
            tooltip_only: true,
            ..DisplaySettings::default()
        },
        ..Settings::default()
    };
    let index = index();
    let engine = EchoEngine::new(&settings, &index);
    let mut ctx = EchoContext::default();

    assert_eq!(engine.on_open_paren(&mut ctx, "add(", None, "c"), None);
    assert_eq!(ctx.len(), 3);
}

#[test]
fn tooltip_lists_every_kind() {
    let settings = Settings::default();
    let index = index();
    let engine = EchoEngine::new(&settings, &index);
    assert_eq!(
        engine.tooltip("count", "c").as_deref(),
        Some("static int count = 0 (1/2) math.c\nint count(const char *s) (2/2) math.h")
    );
    assert_eq!(engine.tooltip("missing", "c"), None);
    assert_eq!(engine.tooltip("", "c"), None);
}

#[test]
fn tooltip_is_capped() {
    let settings = Settings {
        display: DisplaySettings {
            max_tooltip_lines: 2,
            ..DisplaySettings::default()
        },
        ..Settings::default()
    };
    let index = index();
    let engine = EchoEngine::new(&settings, &index);
    let tooltip = engine.tooltip("add", "c").unwrap_or_default();
    let lines: Vec<&str> = tooltip.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "int add(int a, int b) (2/3) math.h");
    assert_eq!(lines[2], TOOLTIP_ELLIPSIS);
}

#[test]
fn display_line_leaves_trim_columns_free() {
    let settings = Settings::default();
    let index = index();
    let engine = EchoEngine::new(&settings, &index);
    assert_eq!(engine.display_line("int add(int a, int b)", 10), "int add");
    assert_eq!(engine.display_line("short", 80), "short");
    assert_eq!(engine.display_line("anything", 0), "anything");
    assert_eq!(engine.display_line("añadir(ñ)", 6), "aña");
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

#[test]
fn unavailable_index_means_no_candidates() {
    let settings = Settings::default();
    let engine = EchoEngine::new(&settings, &DownIndex);
    let mut ctx = EchoContext::default();
    assert!(engine.candidates("add", "c", true).is_empty());
    assert_eq!(engine.on_open_paren(&mut ctx, "add(", None, "c"), None);
    assert_eq!(engine.tooltip("add", "c"), None);
}
