use logos::Logos;

#[derive(Logos, Debug, PartialEq, Clone, Copy)]
#[logos(error = ())]
pub(crate) enum BalanceToken {
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,

    #[regex(r#""([^"\\]|\\[\s\S])*""#)]
    #[regex(r#"'([^'\\]|\\[\s\S])*'"#)]
    Literal,

    // A literal still being typed swallows the rest of the span.
    #[regex(r#""([^"\\]|\\[\s\S])*"#, allow_greedy = true)]
    #[regex(r#"'([^'\\]|\\[\s\S])*"#, allow_greedy = true)]
    UnterminatedLiteral,

    #[regex(r#"[^()"']+"#)]
    Other,
}

/// Parentheses typed since a call was opened, ignoring those inside string
/// and character literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParenCount {
    pub open: usize,
    pub close: usize,
}

impl ParenCount {
    pub fn of(span: &str) -> Self {
        let mut count = Self::default();
        for token in BalanceToken::lexer(span) {
            match token {
                Ok(BalanceToken::LParen) => count.open += 1,
                Ok(BalanceToken::RParen) => count.close += 1,
                _ => {},
            }
        }
        count
    }

    /// Every `(` in the span has been closed.
    pub fn is_balanced(self) -> bool {
        self.open > 0 && self.open == self.close
    }
}

/// Byte offset of the innermost `(` in `text` that is still open at its end.
pub fn unclosed_paren(text: &str) -> Option<usize> {
    let mut open = Vec::new();
    let mut lexer = BalanceToken::lexer(text);
    while let Some(token) = lexer.next() {
        match token {
            Ok(BalanceToken::LParen) => open.push(lexer.span().start),
            Ok(BalanceToken::RParen) => {
                open.pop();
            },
            _ => {},
        }
    }
    open.pop()
}

#[cfg(test)]
#[path = "../../tests/src/cycle/balance_tests.rs"]
mod tests;
