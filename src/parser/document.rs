//! Full-document parsing: top-level nodes sorted into head and body

use crate::error::ParseError;

use super::ast::{is_metadata_element, Node, ParsedDocument, Span};
use super::grammar;

/// A service turning markup into a parsed document
pub trait MarkupParser {
    fn parse_document(&self, markup: &str) -> Result<ParsedDocument, Vec<ParseError>>;
}

/// The built-in markup parser
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlParser;

impl MarkupParser for HtmlParser {
    fn parse_document(&self, markup: &str) -> Result<ParsedDocument, Vec<ParseError>> {
        let nodes = grammar::parse(markup)?;
        split_document(nodes, 0..markup.len()).map_err(|e| vec![e])
    }
}

/// Sort top-level nodes into head and body
///
/// An explicit `<html>` is unwrapped and explicit `<head>`/`<body>`
/// sections are honored. Otherwise leading metadata elements, with the
/// whitespace and comments between them, form the head and the first
/// other node starts the body.
pub fn split_document(nodes: Vec<Node>, span: Span) -> Result<ParsedDocument, ParseError> {
    let nodes = unwrap_html(nodes, &span)?;

    // with explicit sections, whitespace between them belongs to neither
    let sectioned = nodes
        .iter()
        .filter_map(Node::as_element)
        .any(|e| e.is_named("head") || e.is_named("body"));

    let mut doc = ParsedDocument::default();
    let mut in_body = false;
    let mut seen_head = false;
    let mut seen_body = false;

    for node in nodes {
        match node {
            Node::Element(e) if e.is_named("html") => {
                return Err(ParseError::structure(span, "nested <html>"));
            }
            Node::Element(e) if e.is_named("head") => {
                if seen_head {
                    return Err(ParseError::structure(span, "duplicate <head>"));
                }
                if in_body {
                    return Err(ParseError::structure(span, "<head> after body content"));
                }
                seen_head = true;
                doc.head.extend(e.children);
            }
            Node::Element(e) if e.is_named("body") => {
                if seen_body {
                    return Err(ParseError::structure(span, "duplicate <body>"));
                }
                seen_body = true;
                in_body = true;
                doc.body.extend(e.children);
            }
            node if sectioned && node.is_whitespace() => {}
            node if !in_body && belongs_in_head(&node) => doc.head.push(node),
            node => {
                in_body = true;
                doc.body.push(node);
            }
        }
    }

    Ok(doc)
}

fn belongs_in_head(node: &Node) -> bool {
    match node {
        Node::Element(e) => is_metadata_element(&e.tag),
        Node::Comment(_) => true,
        Node::Text(_) => node.is_whitespace(),
    }
}

fn unwrap_html(nodes: Vec<Node>, span: &Span) -> Result<Vec<Node>, ParseError> {
    let html_count = nodes
        .iter()
        .filter(|n| n.as_element().is_some_and(|e| e.is_named("html")))
        .count();

    match html_count {
        0 => Ok(nodes),
        1 => {
            let mut inner = Vec::new();
            for node in nodes {
                match node {
                    Node::Element(e) if e.is_named("html") => inner = e.children,
                    Node::Comment(_) => {}
                    node if node.is_whitespace() => {}
                    _ => {
                        return Err(ParseError::structure(span.clone(), "content outside <html>"))
                    }
                }
            }
            Ok(inner)
        }
        _ => Err(ParseError::structure(span.clone(), "duplicate <html>")),
    }
}
