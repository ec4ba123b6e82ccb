//! Lexer for attribute value text using logos

use logos::Logos;

/// Byte range in value text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\n\r]+")]
pub enum Token {
    // Reference sigils (`@+id/name`, `@android:id/name`)
    #[token("@")]
    At,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("/")]
    Slash,
    #[token(":")]
    Colon,

    // Integers only: dp values in the attribute model are whole numbers
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    Number(i64),

    // Identifiers cover units (`dp`), keywords (`wrap_content`) and id names
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::At => write!(f, "'@'"),
            Token::Plus => write!(f, "'+'"),
            Token::Minus => write!(f, "'-'"),
            Token::Slash => write!(f, "'/'"),
            Token::Colon => write!(f, "':'"),
            Token::Number(n) => write!(f, "number {}", n),
            Token::Ident(s) => write!(f, "identifier '{}'", s),
        }
    }
}

/// Lex value text into tokens with spans.
///
/// Byte ranges logos cannot match come back as `Err(span)`, so `12%` is
/// rejected rather than read as `12`.
pub fn lex(input: &str) -> impl Iterator<Item = Result<(Token, Span), Span>> + '_ {
    Token::lexer(input)
        .spanned()
        .map(|(tok, span)| match tok {
            Ok(t) => Ok((t, span)),
            Err(()) => Err(span),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        lex(input).filter_map(|r| r.ok()).map(|(t, _)| t).collect()
    }

    #[test]
    fn test_dimension_tokens() {
        assert_eq!(
            tokens("120dp"),
            vec![Token::Number(120), Token::Ident("dp".to_string())]
        );
    }

    #[test]
    fn test_reference_tokens() {
        assert_eq!(
            tokens("@+id/button_1"),
            vec![
                Token::At,
                Token::Plus,
                Token::Ident("id".to_string()),
                Token::Slash,
                Token::Ident("button_1".to_string()),
            ]
        );
    }

    #[test]
    fn test_package_reference_tokens() {
        assert_eq!(
            tokens("@android:id/list"),
            vec![
                Token::At,
                Token::Ident("android".to_string()),
                Token::Colon,
                Token::Ident("id".to_string()),
                Token::Slash,
                Token::Ident("list".to_string()),
            ]
        );
    }

    #[test]
    fn test_keyword_token() {
        assert_eq!(
            tokens("wrap_content"),
            vec![Token::Ident("wrap_content".to_string())]
        );
    }

    #[test]
    fn test_whitespace_skipped() {
        assert_eq!(
            tokens("  -8 dp "),
            vec![
                Token::Minus,
                Token::Number(8),
                Token::Ident("dp".to_string())
            ]
        );
    }

    #[test]
    fn test_invalid_input_reported() {
        let errors: Vec<Span> = lex("12%").filter_map(|r| r.err()).collect();
        assert_eq!(errors, vec![2..3]);
    }
}
