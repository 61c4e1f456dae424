use super::*;

fn lex(input: &str) -> Vec<(Result<BalanceToken, ()>, &str)> {
    let mut lexer = BalanceToken::lexer(input);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next() {
        tokens.push((token, lexer.slice()));
    }
    tokens
}

#[test]
fn test_tokens() {
    assert_eq!(lex(r#"f("a)", ')')"#), vec![
        (Ok(BalanceToken::Other), "f"),
        (Ok(BalanceToken::LParen), "("),
        (Ok(BalanceToken::Literal), r#""a)""#),
        (Ok(BalanceToken::Other), ", "),
        (Ok(BalanceToken::Literal), "')'"),
        (Ok(BalanceToken::RParen), ")"),
    ]);
}

#[test]
fn test_escaped_quote_stays_inside_literal() {
    assert_eq!(lex(r#""\")""#), vec![(Ok(BalanceToken::Literal), r#""\")""#)]);
}

#[test]
fn test_unterminated_literal_runs_to_end() {
    assert_eq!(lex(r#"(")"#), vec![
        (Ok(BalanceToken::LParen), "("),
        (Ok(BalanceToken::UnterminatedLiteral), r#"")"#),
    ]);
}

#[test]
fn test_nested_call_balances() {
    let count = ParenCount::of("foo(bar(1,2))");
    assert_eq!(count, ParenCount {
        open: 2,
        close: 2,
    });
    assert!(count.is_balanced());
    assert!(!ParenCount::of("foo(bar(1,2)").is_balanced());
}

#[test]
fn test_parens_in_literals_do_not_count() {
    assert!(!ParenCount::of(r#"puts(")""#).is_balanced());
    assert!(ParenCount::of(r#"puts(")")"#).is_balanced());
    assert!(ParenCount::of("put(')')").is_balanced());
}

#[test]
fn test_span_without_parens_is_not_balanced() {
    assert!(!ParenCount::of("").is_balanced());
    assert!(!ParenCount::of("abc").is_balanced());
}

#[test]
fn test_unclosed_paren_finds_innermost_open_call() {
    assert_eq!(unclosed_paren("x = add("), Some(7));
    assert_eq!(unclosed_paren("f(a, g(b"), Some(6));
    assert_eq!(unclosed_paren("f(a, g(b), "), Some(1));
    assert_eq!(unclosed_paren("f(a, \"(\", "), Some(1));
    assert_eq!(unclosed_paren("f(a)"), None);
    assert_eq!(unclosed_paren("plain"), None);
}
