use super::*;

fn test_doc(text: &str) -> Document {
    Document::new(Url::parse("file:///test.c").unwrap(), "c", text.to_string(), 1)
}

fn pos(
    line: u32,
    character: u32,
) -> Position {
    Position {
        line,
        character,
    }
}

#[test]
fn line_offsets_empty() {
    let doc = test_doc("");
    assert_eq!(doc.line_count(), 1);
    assert_eq!(doc.line_text(0), Some(""));
}

#[test]
fn line_offsets_basic() {
    let doc = test_doc("hello\r\nworld\n");
    assert_eq!(doc.line_count(), 3);
    assert_eq!(doc.line_text(0), Some("hello"));
    assert_eq!(doc.line_text(1), Some("world"));
    assert_eq!(doc.line_text(2), Some(""));
    assert_eq!(doc.line_text(3), None);
}

#[test]
fn offset_roundtrip() {
    let doc = test_doc("int total;\nfloat mean;\n");
    let off = doc.offset_of(pos(1, 0)).unwrap();
    assert_eq!(off, 11); // byte offset of second line
    assert_eq!(doc.position_of(off), pos(1, 0));
}

#[test]
fn line_prefix_stops_at_cursor() {
    let doc = test_doc("x = add(1, 2);\n");
    assert_eq!(doc.line_prefix(pos(0, 8)), Some("x = add("));
    assert_eq!(doc.line_prefix(pos(0, 0)), Some(""));
}

#[test]
fn text_between_spans_lines() {
    let doc = test_doc("f(a,\n  b)\n");
    assert_eq!(doc.text_between(pos(0, 1), pos(1, 4)), Some("(a,\n  b)"));
    assert_eq!(doc.text_between(pos(1, 0), pos(0, 0)), None);
}

#[test]
fn call_site_of_nested_call() {
    let doc = test_doc("  r = add(1, scale(2, x");
    let site = doc.call_site(pos(0, 23)).unwrap();
    assert_eq!(site.paren, pos(0, 18));
    assert_eq!(site.text, "  r = add(1, scale(");
    assert_eq!(site.previous_line, None);

    let site = doc.call_site(pos(0, 12)).unwrap();
    assert_eq!(site.paren, pos(0, 9));
    assert_eq!(site.text, "  r = add(");
}

#[test]
fn call_site_keeps_previous_line() {
    let doc = test_doc("    total = compute\n        (a, b");
    let site = doc.call_site(pos(1, 12)).unwrap();
    assert_eq!(site.paren, pos(1, 8));
    assert_eq!(site.previous_line.as_deref(), Some("    total = compute"));
}

#[test]
fn call_site_outside_any_call() {
    let doc = test_doc("add(1, 2); x");
    assert_eq!(doc.call_site(pos(0, 12)), None);
}

#[test]
fn call_site_counts_utf16_columns() {
    let doc = test_doc("s = \"é\" + f(");
    let site = doc.call_site(pos(0, 12)).unwrap();
    assert_eq!(site.paren, pos(0, 11));
}

#[test]
fn word_at_position() {
    let doc = test_doc("int position;");
    let (word, range) = doc.word_at(pos(0, 7)).unwrap();
    assert_eq!(word, "position");
    assert_eq!(range.start, pos(0, 4));
    assert_eq!(range.end, pos(0, 12));
}

#[test]
fn word_at_includes_qualifiers() {
    let doc = test_doc("auto v = geo::Shape::area;");
    let (word, _) = doc.word_at(pos(0, 22)).unwrap();
    assert_eq!(word, "geo::Shape::area");
    assert!(doc.word_at(pos(0, 7)).is_none());
}

#[test]
fn set_content_updates_lines() {
    let mut doc = test_doc("one\ntwo");
    assert_eq!(doc.line_count(), 2);
    doc.set_content("a\nb\nc\n".to_string(), 2);
    assert_eq!(doc.line_count(), 4);
    assert_eq!(doc.version, 2);
}

#[test]
fn incremental_change() {
    let mut doc = test_doc("hello world");
    doc.apply_changes(
        vec![TextDocumentContentChangeEvent {
            range: Some(Range {
                start: pos(0, 6),
                end: pos(0, 11),
            }),
            range_length: None,
            text: "tags".to_string(),
        }],
        2,
    );
    assert_eq!(doc.text, "hello tags");
    assert_eq!(doc.version, 2);
}

#[test]
fn full_content_change() {
    let mut doc = test_doc("old content");
    doc.apply_changes(
        vec![TextDocumentContentChangeEvent {
            range: None,
            range_length: None,
            text: "new content".to_string(),
        }],
        3,
    );
    assert_eq!(doc.text, "new content");
    assert_eq!(doc.version, 3);
}
