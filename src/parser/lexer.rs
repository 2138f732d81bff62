//! Lexer for HTML markup using logos
//!
//! Markup is not context free at the token level: the same characters mean
//! different things between tags, inside a tag and after an `=`. Each of
//! these contexts has its own logos token set, and [`lex`] morphs between
//! them while producing one flat [`Token`] stream for the grammar.

use logos::{Lexer, Logos};

use super::ast::{is_escapable_raw_text_element, is_raw_text_element, is_void_element, Span};

/// Token handed to the grammar
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Text(String),
    Comment(String),
    /// `<` starting an opening tag
    TagOpen,
    /// `</` starting a closing tag
    CloseTagOpen,
    /// `>` ending a tag that takes content
    TagEnd,
    /// `/>`, or the `>` of a void element
    SelfClose,
    Name(String),
    Equals,
    Value(String),
    /// Input no token set accepts
    Invalid(String),
}

#[derive(Logos, Debug, Clone, PartialEq)]
enum ContentToken {
    #[token("<!--", comment_body)]
    Comment(String),

    #[regex(r"<![dD][oO][cC][tT][yY][pP][eE][^>]*>")]
    Doctype,

    #[token("</")]
    CloseTagOpen,

    #[token("<")]
    TagOpen,

    #[regex(r"[^<]+", |lex| decode_entities(lex.slice()))]
    Text(String),
}

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum TagToken {
    #[token(">")]
    End,

    #[token("/>")]
    SelfClose,

    #[token("=")]
    Equals,

    #[regex(r#"[^ \t\r\n\f"'=<>/`]+"#, |lex| lex.slice().to_string())]
    Name(String),
}

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum ValueToken {
    #[regex(r#""[^"]*""#, unquote)]
    #[regex(r"'[^']*'", unquote)]
    Quoted(String),

    #[regex(r#"[^ \t\r\n\f"'=<>`]+"#)]
    Unquoted,
}

fn comment_body(lex: &mut Lexer<ContentToken>) -> Option<String> {
    let rest = lex.remainder();
    let end = rest.find("-->")?;
    let body = rest[..end].to_string();
    lex.bump(end + 3);
    Some(body)
}

fn unquote(lex: &mut Lexer<ValueToken>) -> String {
    let s = lex.slice();
    decode_entities(&s[1..s.len() - 1])
}

enum Mode<'s> {
    Content(Lexer<'s, ContentToken>),
    Tag(Lexer<'s, TagToken>),
    Value(Lexer<'s, ValueToken>),
}

/// The tag currently being lexed
#[derive(Debug, Default)]
struct OpenTag {
    name: Option<String>,
    closing: bool,
}

impl OpenTag {
    fn new(closing: bool) -> Self {
        Self {
            name: None,
            closing,
        }
    }

    fn is_void(&self) -> bool {
        !self.closing && self.name.as_deref().is_some_and(is_void_element)
    }

    fn raw_text_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .filter(|name| !self.closing && is_raw_text_element(name))
    }
}

/// Lex markup into tokens with spans
///
/// Lexing never fails; input no mode accepts becomes [`Token::Invalid`]
/// and is reported by the grammar.
pub fn lex(input: &str) -> Vec<(Token, Span)> {
    let mut tokens = Vec::new();
    let mut tag = OpenTag::default();
    let mut mode = Some(Mode::Content(ContentToken::lexer(input)));

    while let Some(current) = mode {
        mode = match current {
            Mode::Content(lex) => step_content(lex, &mut tokens, &mut tag),
            Mode::Tag(lex) => step_tag(lex, &mut tokens, &mut tag),
            Mode::Value(lex) => step_value(lex, &mut tokens),
        };
    }

    tokens
}

fn step_content<'s>(
    mut lex: Lexer<'s, ContentToken>,
    tokens: &mut Vec<(Token, Span)>,
    tag: &mut OpenTag,
) -> Option<Mode<'s>> {
    let result = lex.next()?;
    let span = lex.span();
    match result {
        Ok(ContentToken::Text(text)) => push_text(tokens, text, span),
        Ok(ContentToken::Comment(body)) => tokens.push((Token::Comment(body), span)),
        Ok(ContentToken::Doctype) => {}
        Ok(ContentToken::TagOpen) if starts_tag_name(lex.remainder()) => {
            tokens.push((Token::TagOpen, span));
            *tag = OpenTag::new(false);
            return Some(Mode::Tag(lex.morph()));
        }
        Ok(ContentToken::CloseTagOpen) if starts_tag_name(lex.remainder()) => {
            tokens.push((Token::CloseTagOpen, span));
            *tag = OpenTag::new(true);
            return Some(Mode::Tag(lex.morph()));
        }
        // `a < b` is text, not a tag
        Ok(ContentToken::TagOpen) | Ok(ContentToken::CloseTagOpen) => {
            push_text(tokens, lex.slice().to_string(), span)
        }
        Err(()) => tokens.push((Token::Invalid(lex.slice().to_string()), span)),
    }
    Some(Mode::Content(lex))
}

fn step_tag<'s>(
    mut lex: Lexer<'s, TagToken>,
    tokens: &mut Vec<(Token, Span)>,
    tag: &mut OpenTag,
) -> Option<Mode<'s>> {
    let result = lex.next()?;
    let span = lex.span();
    match result {
        Ok(TagToken::Name(name)) => {
            if tag.name.is_none() {
                tag.name = Some(name.clone());
            }
            tokens.push((Token::Name(name), span));
        }
        Ok(TagToken::Equals) => {
            tokens.push((Token::Equals, span));
            return Some(Mode::Value(lex.morph()));
        }
        Ok(TagToken::End) => {
            let token = if tag.is_void() {
                Token::SelfClose
            } else {
                Token::TagEnd
            };
            tokens.push((token, span));
            let mut content = lex.morph();
            if let Some(name) = tag.raw_text_name() {
                raw_text(&mut content, name, tokens);
            }
            return Some(Mode::Content(content));
        }
        Ok(TagToken::SelfClose) => {
            tokens.push((Token::SelfClose, span));
            return Some(Mode::Content(lex.morph()));
        }
        Err(()) => tokens.push((Token::Invalid(lex.slice().to_string()), span)),
    }
    Some(Mode::Tag(lex))
}

fn step_value<'s>(mut lex: Lexer<'s, ValueToken>, tokens: &mut Vec<(Token, Span)>) -> Option<Mode<'s>> {
    let result = lex.next()?;
    let span = lex.span();
    match result {
        Ok(ValueToken::Quoted(value)) => tokens.push((Token::Value(value), span)),
        // `name=x/>` self-closes rather than ending the value in a slash
        Ok(ValueToken::Unquoted) => match lex.slice().strip_suffix('/') {
            Some(value) if !value.is_empty() && lex.remainder().starts_with('>') => {
                tokens.push((Token::Value(decode_entities(value)), span.start..span.end - 1));
                lex.bump(1);
                tokens.push((Token::SelfClose, span.end - 1..span.end + 1));
                return Some(Mode::Content(lex.morph()));
            }
            _ => tokens.push((Token::Value(decode_entities(lex.slice())), span)),
        },
        Err(()) => tokens.push((Token::Invalid(lex.slice().to_string()), span)),
    }
    Some(Mode::Tag(lex.morph()))
}

/// Consume a raw text body up to the element's closing tag
///
/// A missing closing tag takes the rest of the input; the grammar then
/// reports the element as unclosed.
fn raw_text(lex: &mut Lexer<ContentToken>, name: &str, tokens: &mut Vec<(Token, Span)>) {
    let rest = lex.remainder();
    let start = lex.source().len() - rest.len();
    let close = format!("</{}", name.to_ascii_lowercase());
    let len = rest.to_ascii_lowercase().find(&close).unwrap_or(rest.len());
    if len == 0 {
        return;
    }

    let body = &rest[..len];
    let text = if is_escapable_raw_text_element(name) {
        decode_entities(body)
    } else {
        body.to_string()
    };
    lex.bump(len);
    tokens.push((Token::Text(text), start..start + len));
}

fn starts_tag_name(rest: &str) -> bool {
    rest.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
}

/// Append text, merging with a directly preceding text token
fn push_text(tokens: &mut Vec<(Token, Span)>, text: String, span: Span) {
    if let Some((Token::Text(prev), prev_span)) = tokens.last_mut() {
        if prev_span.end == span.start {
            prev.push_str(&text);
            prev_span.end = span.end;
            return;
        }
    }
    tokens.push((Token::Text(text), span));
}

/// Decode character references; unknown references are kept verbatim
pub fn decode_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        let decoded = rest
            .find(';')
            .and_then(|end| decode_reference(&rest[1..end]).map(|c| (c, end)));
        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &rest[end + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_reference(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let digits = name.strip_prefix('#')?;
            let code = match digits.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => digits.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}
