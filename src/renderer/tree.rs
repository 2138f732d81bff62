//! Tree rendering: parsed nodes to host elements

use crate::config::FalsyPolicy;
use crate::host::Host;
use crate::names::NameTable;
use crate::parser::{Element, Node};
use crate::template::{feed, References};
use crate::value::{Identity, Props, Value};

use super::attributes::normalize_attribute;

/// Walks parsed nodes, restoring values and building host elements
pub struct Renderer<'a, H: Host> {
    host: &'a H,
    references: &'a References<H::Element>,
    names: &'a NameTable<H::Component>,
    falsy: FalsyPolicy,
}

impl<'a, H: Host> Renderer<'a, H> {
    pub fn new(
        host: &'a H,
        references: &'a References<H::Element>,
        names: &'a NameTable<H::Component>,
    ) -> Self {
        Self {
            host,
            references,
            names,
            falsy: FalsyPolicy::default(),
        }
    }

    pub fn with_falsy(mut self, falsy: FalsyPolicy) -> Self {
        self.falsy = falsy;
        self
    }

    /// Render one node into the values it expands to
    ///
    /// Text yields one value per feeder segment, comments yield nothing and
    /// elements yield exactly one host element.
    pub fn render(&self, node: &Node) -> Vec<Value<H::Element>> {
        match node {
            Node::Text(text) => feed(text, self.references, self.falsy),
            Node::Comment(_) => Vec::new(),
            Node::Element(element) => vec![Value::Element(self.render_element(element))],
        }
    }

    /// Render a sequence of sibling nodes, flattening their results
    pub fn render_all<'n>(&self, nodes: impl IntoIterator<Item = &'n Node>) -> Vec<Value<H::Element>> {
        nodes.into_iter().flat_map(|node| self.render(node)).collect()
    }

    fn render_element(&self, element: &Element) -> H::Element {
        let tag = element.tag.to_lowercase();

        let mut props = Props::new();
        for attribute in &element.attributes {
            if let Some((name, value)) = normalize_attribute(
                &attribute.name,
                attribute.value.as_deref(),
                self.references,
                self.falsy,
            ) {
                // the first occurrence of a repeated attribute wins
                props.entry(name).or_insert(value);
            }
        }

        let children = self.render_all(&element.children);

        let identity = match self.names.resolve(&tag) {
            Some(component) => Identity::Component(component.clone()),
            None => {
                if tag.contains(crate::names::NAMESPACE_DELIMITER) {
                    log::trace!("no component for <{}>, using it as a tag", tag);
                }
                Identity::Tag(tag)
            }
        };

        self.host.create(identity, props, children)
    }
}
