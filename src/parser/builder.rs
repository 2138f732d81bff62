//! Nesting flat markup items into a node tree
//!
//! Open elements live on a stack. An element whose end tag is optional
//! closes when a sibling that ends it opens, or when an ancestor closes;
//! every other element needs its own closing tag.

use crate::error::ParseError;

use super::ast::{
    ends_on_open, has_optional_end_tag, is_void_element, Attribute, Element, Node, Span,
};

/// One markup item in source order, before nesting
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Open {
        tag: String,
        attributes: Vec<Attribute>,
        self_closing: bool,
        span: Span,
    },
    Close {
        tag: String,
        span: Span,
    },
    Text(String),
    Comment(String),
}

struct OpenElement {
    element: Element,
    span: Span,
}

#[derive(Default)]
struct TreeBuilder {
    roots: Vec<Node>,
    stack: Vec<OpenElement>,
}

impl TreeBuilder {
    fn append(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(open) => open.element.children.push(node),
            None => self.roots.push(node),
        }
    }

    fn close_top(&mut self) {
        if let Some(open) = self.stack.pop() {
            self.append(Node::Element(open.element));
        }
    }

    fn open(&mut self, tag: String, attributes: Vec<Attribute>, self_closing: bool, span: Span) {
        while self
            .stack
            .last()
            .is_some_and(|open| ends_on_open(&open.element.tag, &tag))
        {
            self.close_top();
        }

        let element = Element {
            tag,
            attributes,
            children: vec![],
        };
        if self_closing {
            self.append(Node::Element(element));
        } else {
            self.stack.push(OpenElement { element, span });
        }
    }

    fn close(&mut self, tag: &str, span: Span) -> Result<(), ParseError> {
        let depth = match self.stack.iter().rposition(|open| open.element.is_named(tag)) {
            Some(depth) => depth,
            // `</br>`, or an end tag whose element was already ended implicitly
            None if is_void_element(tag) || has_optional_end_tag(tag) => return Ok(()),
            None => {
                return Err(ParseError::Syntax {
                    span,
                    message: format!("closing tag </{}> has no open element", tag),
                    expected: vec![],
                })
            }
        };

        let blocker = self.stack[depth + 1..]
            .iter()
            .rev()
            .find(|open| !has_optional_end_tag(&open.element.tag));
        if let Some(blocker) = blocker {
            return Err(ParseError::Syntax {
                span,
                message: format!(
                    "closing tag </{}> does not match <{}>",
                    tag, blocker.element.tag
                ),
                expected: vec![format!("'</{}>'", blocker.element.tag)],
            });
        }

        while self.stack.len() > depth {
            self.close_top();
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<Node>, ParseError> {
        if let Some(unclosed) = self
            .stack
            .iter()
            .rev()
            .find(|open| !has_optional_end_tag(&open.element.tag))
        {
            return Err(ParseError::Syntax {
                span: unclosed.span.clone(),
                message: format!("<{}> is never closed", unclosed.element.tag),
                expected: vec![format!("'</{}>'", unclosed.element.tag)],
            });
        }

        while !self.stack.is_empty() {
            self.close_top();
        }
        Ok(self.roots)
    }
}

/// Nest items into top-level nodes
pub fn build(items: Vec<Item>) -> Result<Vec<Node>, ParseError> {
    let mut builder = TreeBuilder::default();
    for item in items {
        match item {
            Item::Text(text) => builder.append(Node::Text(text)),
            Item::Comment(body) => builder.append(Node::Comment(body)),
            Item::Open {
                tag,
                attributes,
                self_closing,
                span,
            } => builder.open(tag, attributes, self_closing, span),
            Item::Close { tag, span } => builder.close(&tag, span)?,
        }
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn open(tag: &str) -> Item {
        Item::Open {
            tag: tag.to_string(),
            attributes: vec![],
            self_closing: false,
            span: 0..0,
        }
    }

    fn close(tag: &str) -> Item {
        Item::Close {
            tag: tag.to_string(),
            span: 0..0,
        }
    }

    fn text(s: &str) -> Item {
        Item::Text(s.to_string())
    }

    fn element(tag: &str, children: Vec<Node>) -> Node {
        Node::Element(Element {
            tag: tag.to_string(),
            attributes: vec![],
            children,
        })
    }

    fn leaf(tag: &str, s: &str) -> Node {
        element(tag, vec![Node::Text(s.to_string())])
    }

    #[test]
    fn test_sibling_ends_list_item() {
        let nodes = build(vec![open("ul"), open("li"), text("a"), open("li"), text("b"), close("ul")])
            .expect("Should build");
        assert_eq!(nodes, vec![element("ul", vec![leaf("li", "a"), leaf("li", "b")])]);
    }

    #[test]
    fn test_block_ends_paragraph() {
        let nodes = build(vec![open("p"), text("a"), open("div"), text("b"), close("div"), close("p")])
            .expect("Should build");
        assert_eq!(nodes, vec![leaf("p", "a"), leaf("div", "b")]);
    }

    #[test]
    fn test_table_cells_close_implicitly() {
        let nodes = build(vec![
            open("table"),
            open("tr"),
            open("td"),
            text("1"),
            open("td"),
            text("2"),
            open("tr"),
            open("th"),
            text("3"),
            close("table"),
        ])
        .expect("Should build");
        assert_eq!(
            nodes,
            vec![element(
                "table",
                vec![
                    element("tr", vec![leaf("td", "1"), leaf("td", "2")]),
                    element("tr", vec![leaf("th", "3")]),
                ],
            )]
        );
    }

    #[test]
    fn test_nested_lists_stay_nested() {
        let nodes = build(vec![
            open("ul"),
            open("li"),
            text("a"),
            open("ol"),
            open("li"),
            text("b"),
            close("ol"),
            open("li"),
            text("c"),
            close("ul"),
        ])
        .expect("Should build");
        assert_eq!(
            nodes,
            vec![element(
                "ul",
                vec![
                    element(
                        "li",
                        vec![Node::Text("a".to_string()), element("ol", vec![leaf("li", "b")])],
                    ),
                    leaf("li", "c"),
                ],
            )]
        );
    }

    #[test]
    fn test_end_of_input_closes_optional_elements() {
        let nodes = build(vec![open("p"), text("one"), open("p"), text("two")]).expect("Should build");
        assert_eq!(nodes, vec![leaf("p", "one"), leaf("p", "two")]);
    }

    #[test]
    fn test_required_end_tags() {
        let err = build(vec![open("div"), open("span"), close("div")]).expect_err("Should fail");
        assert!(err.to_string().contains("does not match <span>"));

        let err = build(vec![open("section"), open("p")]).expect_err("Should fail");
        assert!(err.to_string().contains("<section> is never closed"));

        let err = build(vec![text("x"), close("span")]).expect_err("Should fail");
        assert!(err.to_string().contains("no open element"));
    }

    #[test]
    fn test_stray_optional_and_void_end_tags_ignored() {
        let nodes = build(vec![text("x"), close("p"), close("br")]).expect("Should build");
        assert_eq!(nodes, vec![Node::Text("x".to_string())]);
    }
}
