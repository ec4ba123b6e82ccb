//! Error types for attribute value parsing

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::value::lexer::Token;

/// Byte range in value text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("syntax error at {span:?}: {message}")]
    Syntax {
        span: Span,
        message: String,
        expected: Vec<String>,
    },

    #[error("unexpected text '{text}' at {span:?}")]
    InvalidText { span: Span, text: String },

    #[error("unknown unit '{unit}' at {span:?}")]
    UnknownUnit { span: Span, unit: String },
}

impl ValueError {
    /// Byte range of the offending text
    pub fn span(&self) -> &Span {
        match self {
            ValueError::Syntax { span, .. }
            | ValueError::InvalidText { span, .. }
            | ValueError::UnknownUnit { span, .. } => span,
        }
    }

    /// Short message without the span, for labels
    fn label_message(&self) -> String {
        match self {
            ValueError::Syntax {
                message, expected, ..
            } => {
                if expected.is_empty() {
                    message.clone()
                } else {
                    format!("{}\nExpected: {}", message, expected.join(", "))
                }
            }
            ValueError::InvalidText { text, .. } => format!("'{}' is not valid here", text),
            ValueError::UnknownUnit { unit, .. } => {
                format!("'{}' is not a length unit (use dp, dip, px or sp)", unit)
            }
        }
    }

    /// Format the error with the value text as context using ariadne.
    ///
    /// `name` identifies the value in the report, typically the qualified
    /// attribute name.
    pub fn format(&self, source: &str, name: &str) -> String {
        let mut buf = Vec::new();
        let span = self.span().clone();
        let written = Report::build(ReportKind::Error, name, span.start)
            .with_message(format!("invalid value for {}", name))
            .with_label(
                Label::new((name, span))
                    .with_message(self.label_message())
                    .with_color(Color::Red),
            )
            .finish()
            .write((name, Source::from(source)), &mut buf);
        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}

impl<'a> From<chumsky::error::Rich<'a, Token>> for ValueError {
    fn from(err: chumsky::error::Rich<'a, Token>) -> Self {
        use chumsky::error::RichReason;

        let message = match err.reason() {
            RichReason::ExpectedFound { found, .. } => match found {
                Some(tok) => format!("Unexpected {}", describe(tok)),
                None => "Unexpected end of value".to_string(),
            },
            RichReason::Custom(msg) => msg.to_string(),
            #[allow(unreachable_patterns)]
            _ => "Invalid value".to_string(),
        };

        let expected: Vec<String> = err
            .expected()
            .filter_map(|e| match e {
                chumsky::error::RichPattern::Token(tok) => Some(describe(tok)),
                chumsky::error::RichPattern::Label(label) => Some(label.to_string()),
                chumsky::error::RichPattern::EndOfInput => Some("end of value".to_string()),
                #[allow(unreachable_patterns)]
                _ => None,
            })
            .collect();

        ValueError::Syntax {
            span: err.span().into_range(),
            message,
            expected,
        }
    }
}

/// Format a token for human-readable error messages
fn describe(tok: &Token) -> String {
    tok.to_string()
}
