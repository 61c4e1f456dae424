use serde_json::json;

use super::*;

#[test]
fn parses_known_commands() {
    assert_eq!(EchoCommand::parse("tagsig.nextCandidate"), Some(EchoCommand::Cycle(Direction::Next)));
    assert_eq!(EchoCommand::parse("tagsig.previousCandidate"), Some(EchoCommand::Cycle(Direction::Previous)));
    assert_eq!(EchoCommand::parse("tagsig.leaveInsert"), Some(EchoCommand::LeaveInsert));
    assert_eq!(EchoCommand::parse("tagsig.unknown"), None);
    assert!(COMMANDS.iter().all(|command| EchoCommand::parse(command).is_some()));
}

#[test]
fn target_from_uri_string() {
    let target = CommandTarget::from_arguments(&[json!("file:///src/main.c")]).unwrap();
    assert_eq!(target.uri.as_str(), "file:///src/main.c");
    assert_eq!(target.columns, 0);

    let target = CommandTarget::from_arguments(&[json!("file:///src/main.c"), json!(80)]).unwrap();
    assert_eq!(target.columns, 80);
}

#[test]
fn target_from_object() {
    let target = CommandTarget::from_arguments(&[json!({ "uri": "file:///src/main.c", "columns": 40 })]).unwrap();
    assert_eq!(target.uri.as_str(), "file:///src/main.c");
    assert_eq!(target.columns, 40);
}

#[test]
fn rejects_missing_or_malformed_targets() {
    assert_eq!(CommandTarget::from_arguments(&[]), None);
    assert_eq!(CommandTarget::from_arguments(&[json!("not a uri")]), None);
    assert_eq!(CommandTarget::from_arguments(&[json!(3)]), None);
    assert_eq!(CommandTarget::from_arguments(&[json!({ "columns": 3 })]), None);
}
