//! Placeholder substitution: text with `$fig-N` tokens back into values

use logos::Logos;

use crate::config::FalsyPolicy;
use crate::value::Value;

use super::composer::References;

#[derive(Logos, Debug, Clone, PartialEq)]
enum Piece {
    #[regex(r"\$fig-[0-9]+")]
    Placeholder,

    #[regex(r"[^$]+")]
    Literal,

    #[token("$")]
    Dollar,
}

/// Split `text` into literal segments and the values its placeholders name
///
/// Order is preserved and empty literals are never emitted. Tokens with no
/// registered value are dropped, as are falsy values under
/// [`FalsyPolicy::Drop`].
pub fn feed<E: Clone>(text: &str, references: &References<E>, falsy: FalsyPolicy) -> Vec<Value<E>> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut lexer = Piece::lexer(text);

    while let Some(piece) = lexer.next() {
        match piece {
            Ok(Piece::Placeholder) => {
                flush(&mut literal, &mut segments);
                if let Some(value) = references.get(lexer.slice()) {
                    if falsy == FalsyPolicy::Keep || value.is_truthy() {
                        segments.push(value.clone());
                    }
                }
            }
            Ok(Piece::Literal) | Ok(Piece::Dollar) | Err(()) => literal.push_str(lexer.slice()),
        }
    }
    flush(&mut literal, &mut segments);

    segments
}

fn flush<E>(literal: &mut String, segments: &mut Vec<Value<E>>) {
    if !literal.is_empty() {
        segments.push(Value::Text(std::mem::take(literal)));
    }
}
