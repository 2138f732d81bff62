//! Element construction primitives
//!
//! The renderer never builds UI values itself; it hands every element to a
//! [`Host`]. [`TreeHost`] is the built-in host, producing an inspectable
//! [`HostNode`] tree that can be serialized back to markup.

use crate::parser::is_void_element;
use crate::value::{Identity, Props, Value};

/// The generic "create element" primitive
pub trait Host {
    /// Opaque element value produced by [`Host::create`]
    type Element: Clone;
    /// Constructor type stored in name tables
    type Component: Clone;

    fn create(
        &self,
        identity: Identity<Self::Component>,
        props: Props<Self::Element>,
        children: Vec<Value<Self::Element>>,
    ) -> Self::Element;
}

impl<H: Host> Host for &H {
    type Element = H::Element;
    type Component = H::Component;

    fn create(
        &self,
        identity: Identity<Self::Component>,
        props: Props<Self::Element>,
        children: Vec<Value<Self::Element>>,
    ) -> Self::Element {
        (**self).create(identity, props, children)
    }
}

/// Host building plain [`HostNode`] trees; components are named by string
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeHost;

impl Host for TreeHost {
    type Element = HostNode;
    type Component = String;

    fn create(
        &self,
        identity: Identity<String>,
        props: Props<HostNode>,
        children: Vec<Value<HostNode>>,
    ) -> HostNode {
        HostNode {
            identity,
            props,
            children,
        }
    }
}

/// An element built by [`TreeHost`]
#[derive(Debug, Clone, PartialEq)]
pub struct HostNode {
    pub identity: Identity<String>,
    pub props: Props<HostNode>,
    pub children: Vec<Value<HostNode>>,
}

impl HostNode {
    /// Tag name, or component name for resolved components
    pub fn name(&self) -> &str {
        match &self.identity {
            Identity::Tag(tag) => tag,
            Identity::Component(component) => component,
        }
    }

    /// Tag name, `None` for components
    pub fn tag(&self) -> Option<&str> {
        self.identity.as_tag()
    }

    pub fn prop(&self, name: &str) -> Option<&Value<HostNode>> {
        self.props.get(name)
    }

    /// Child elements, skipping text and other values
    pub fn elements(&self) -> impl Iterator<Item = &HostNode> {
        self.children.iter().filter_map(Value::as_element)
    }

    /// Concatenated text content of the subtree
    pub fn text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            write_text(child, &mut out);
        }
        out
    }

    /// Serialize the subtree back to markup
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        write_node(self, &mut out);
        out
    }
}

fn write_text(value: &Value<HostNode>, out: &mut String) {
    match value {
        Value::Element(node) => out.push_str(&node.text()),
        Value::List(items) => items.iter().for_each(|item| write_text(item, out)),
        Value::Callback(_) | Value::Null => {}
        other => out.push_str(&other.to_string()),
    }
}

/// Serialize one produced value as markup
pub fn value_to_markup(value: &Value<HostNode>) -> String {
    let mut out = String::new();
    write_value(value, &mut out);
    out
}

fn write_value(value: &Value<HostNode>, out: &mut String) {
    match value {
        Value::Element(node) => write_node(node, out),
        Value::List(items) => items.iter().for_each(|item| write_value(item, out)),
        Value::Callback(_) | Value::Null => {}
        other => escape_text(&other.to_string(), out),
    }
}

fn write_node(node: &HostNode, out: &mut String) {
    out.push('<');
    out.push_str(node.name());
    for (name, value) in &node.props {
        match value {
            // callbacks have no markup form
            Value::Callback(_) => {}
            Value::Bool(true) => {
                out.push(' ');
                out.push_str(name);
            }
            Value::Bool(false) | Value::Null => {}
            other => {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                escape_attr(&other.to_string(), out);
                out.push('"');
            }
        }
    }

    let void = node.tag().is_some_and(is_void_element);
    if void && node.children.is_empty() {
        out.push('>');
        return;
    }
    if node.tag().is_none() && node.children.is_empty() {
        out.push_str("/>");
        return;
    }

    out.push('>');
    for child in &node.children {
        write_value(child, out);
    }
    out.push_str("</");
    out.push_str(node.name());
    out.push('>');
}

fn escape_text(s: &str, out: &mut String) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn escape_attr(s: &str, out: &mut String) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}
