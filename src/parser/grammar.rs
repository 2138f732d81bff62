//! Markup grammar using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::parser::ast::*;
use crate::parser::builder::{self, Item};
use crate::parser::lexer::Token;

/// Parse markup into its top-level nodes
///
/// The grammar yields a flat run of tags, text and comments; nesting,
/// including implied end tags, is resolved afterwards by the tree builder.
pub fn parse(input: &str) -> Result<Vec<Node>, Vec<crate::ParseError>> {
    let len = input.len();

    let token_iter = crate::parser::lexer::lex(input)
        .into_iter()
        .map(|(tok, span)| (tok, span.into()));

    let token_stream = Stream::from_iter(token_iter)
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    let items = items_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(crate::ParseError::from).collect::<Vec<_>>())?;

    builder::build(items).map_err(|e| vec![e])
}

fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> std::ops::Range<usize> {
    e.start()..e.end()
}

fn items_parser<'a, I>() -> impl Parser<'a, I, Vec<Item>, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let name = select! {
        Token::Name(s) => s,
    }
    .labelled("name");

    let attribute = name
        .clone()
        .then(
            just(Token::Equals)
                .ignore_then(select! { Token::Value(v) => v }.labelled("attribute value"))
                .or_not(),
        )
        .map(|(name, value)| Attribute { name, value });

    // `<tag ...>` or `<tag .../>`
    let open_tag = just(Token::TagOpen)
        .ignore_then(name.clone())
        .then(attribute.repeated().collect::<Vec<_>>())
        .then(choice((
            just(Token::SelfClose).to(true),
            just(Token::TagEnd).to(false),
        )))
        .map_with(|((tag, attributes), self_closing), e| Item::Open {
            tag,
            attributes,
            self_closing,
            span: span_range(&e.span()),
        });

    let close_tag = just(Token::CloseTagOpen)
        .ignore_then(name)
        .then_ignore(just(Token::TagEnd))
        .map_with(|tag, e| Item::Close {
            tag,
            span: span_range(&e.span()),
        });

    choice((
        select! {
            Token::Text(s) => Item::Text(s),
            Token::Comment(s) => Item::Comment(s),
        },
        open_tag,
        close_tag,
    ))
    .repeated()
    .collect()
    .then_ignore(end())
}
