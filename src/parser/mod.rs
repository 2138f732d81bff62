//! Markup parser: text to a generic node tree

pub mod ast;
mod builder;
mod document;
mod grammar;
pub mod lexer;

pub use ast::*;
pub use document::{split_document, HtmlParser, MarkupParser};
pub use grammar::parse;
