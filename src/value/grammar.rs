//! Value parser implementation using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::error::ValueError;
use crate::value::ast::{AttrValue, Unit};
use crate::value::lexer::{lex, Token};

/// Parse attribute value text into an [`AttrValue`]
pub fn parse_value(input: &str) -> Result<AttrValue, Vec<ValueError>> {
    let len = input.len();

    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    for item in lex(input) {
        match item {
            Ok((tok, span)) => tokens.push((tok, SimpleSpan::from(span))),
            Err(span) => {
                let text = input.get(span.clone()).unwrap_or_default().to_string();
                errors.push(ValueError::InvalidText { span, text });
            }
        }
    }
    if !errors.is_empty() {
        return Err(errors);
    }

    let token_stream = Stream::from_iter(tokens)
        // Split (Token, SimpleSpan) into token and span parts
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    let raw = value_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect::<Vec<ValueError>>())?;
    raw.lower().map_err(|e| vec![e])
}

/// Parser output before unit suffixes are checked
#[derive(Debug, Clone)]
enum RawValue {
    Length {
        value: i64,
        suffix: Option<(String, std::ops::Range<usize>)>,
    },
    Value(AttrValue),
}

impl RawValue {
    fn lower(self) -> Result<AttrValue, ValueError> {
        match self {
            RawValue::Value(v) => Ok(v),
            RawValue::Length { value, suffix: None } => Ok(AttrValue::Length {
                value,
                unit: Unit::None,
            }),
            RawValue::Length {
                value,
                suffix: Some((suffix, span)),
            } => match Unit::from_suffix(&suffix) {
                Some(unit) => Ok(AttrValue::Length { value, unit }),
                None => Err(ValueError::UnknownUnit { span, unit: suffix }),
            },
        }
    }
}

/// Helper to extract span range from chumsky's MapExtra
fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> std::ops::Range<usize> {
    e.start()..e.end()
}

fn value_parser<'a, I>() -> impl Parser<'a, I, RawValue, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let ident = select! {
        Token::Ident(s) => s,
    };

    let number = select! {
        Token::Number(n) => n,
    };

    // -8dp, 16dip, 0
    let length = just(Token::Minus)
        .or_not()
        .then(number)
        .then(
            ident
                .clone()
                .map_with(|s, e| (s, span_range(&e.span())))
                .or_not(),
        )
        .map(|((minus, n), suffix)| RawValue::Length {
            value: if minus.is_some() { -n } else { n },
            suffix,
        });

    // @+id/name, @id/name, @android:id/name
    let reference = just(Token::At)
        .ignore_then(just(Token::Plus).or_not())
        .then(ident.clone().then_ignore(just(Token::Colon)).or_not())
        .then(ident.clone())
        .then_ignore(just(Token::Slash))
        .then(ident.clone())
        .map(|(((create, package), kind), name)| {
            RawValue::Value(AttrValue::Reference {
                create: create.is_some(),
                package,
                kind,
                name,
            })
        });

    let keyword = ident.map(|k| RawValue::Value(AttrValue::Keyword(k)));

    choice((reference, length, keyword)).then_ignore(end())
}
