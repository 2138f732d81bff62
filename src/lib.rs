//! fig-html - tagged-template markup compiled to element trees
//!
//! A template is a list of literal markup fragments interleaved with runtime
//! values. The fragments and placeholder tokens for the values are joined
//! into one markup string, parsed, and walked back into host elements with
//! every placeholder swapped for its original value, so callbacks and
//! pre-built elements land in the tree untouched. Namespaced tags such as
//! `<ui:button>` are resolved through a caller-supplied [`NameTable`].
//!
//! # Example
//!
//! ```rust
//! use fig_html::{Fig, NameTable, Template, TreeHost, Value};
//!
//! let fig = Fig::new(TreeHost);
//! let names = NameTable::new().with("ui:button", "Button".to_string()).unwrap();
//! let html = fig.dict(Some(names));
//!
//! let out = html
//!     .render(Template::literal("<p>").value(42).text("</p><ui:button/>"))
//!     .unwrap();
//!
//! let p = out[0].as_element().unwrap();
//! assert_eq!(p.children, vec![Value::Number(42.0)]);
//! assert_eq!(out[1].as_element().unwrap().name(), "Button");
//! ```

pub mod config;
pub mod error;
pub mod host;
pub mod names;
pub mod parser;
pub mod renderer;
pub mod template;
pub mod value;

use std::rc::Rc;
use std::sync::Arc;

pub use config::{FalsyPolicy, FigConfig};
pub use error::ParseError;
pub use host::{Host, HostNode, TreeHost};
pub use names::{NameTable, NameTableError};
pub use parser::{HtmlParser, MarkupParser, ParsedDocument};
pub use renderer::Renderer;
pub use template::{PlaceholderCounter, Template};
pub use value::{Callback, Identity, Props, Value};

use thiserror::Error;

/// Errors a templating call can surface
#[derive(Debug, Error)]
pub enum FigError {
    /// The composed markup could not be parsed into a document; the
    /// parser's diagnostics are logged, not carried here
    #[error("invalid document structure")]
    InvalidDocument,
}

/// Factory over an element construction primitive
///
/// Bind a name table with [`Fig::dict`] to get a [`Templater`]; reach the
/// primitive itself through [`Fig::dynamic`].
pub struct Fig<H: Host, P = HtmlParser> {
    host: Rc<H>,
    parser: Rc<P>,
    counter: Arc<PlaceholderCounter>,
    config: FigConfig,
}

impl<H: Host> Fig<H> {
    /// Create a factory using the built-in parser and the shared counter
    pub fn new(host: H) -> Self {
        Self {
            host: Rc::new(host),
            parser: Rc::new(HtmlParser),
            counter: PlaceholderCounter::global(),
            config: FigConfig::default(),
        }
    }
}

impl<H: Host, P: MarkupParser> Fig<H, P> {
    /// Swap the markup parsing service
    pub fn with_parser<Q: MarkupParser>(self, parser: Q) -> Fig<H, Q> {
        Fig {
            host: self.host,
            parser: Rc::new(parser),
            counter: self.counter,
            config: self.config,
        }
    }

    /// Use a dedicated placeholder counter instead of the shared one
    pub fn with_counter(mut self, counter: Arc<PlaceholderCounter>) -> Self {
        self.counter = counter;
        self
    }

    /// Replace the rendering configuration
    pub fn with_config(mut self, config: FigConfig) -> Self {
        self.config = config;
        self
    }

    /// Bind a name table, producing the templating function
    pub fn dict(&self, names: Option<NameTable<H::Component>>) -> Templater<H, P> {
        Templater {
            host: Rc::clone(&self.host),
            parser: Rc::clone(&self.parser),
            counter: Arc::clone(&self.counter),
            config: self.config.clone(),
            names: names.unwrap_or_default(),
        }
    }

    /// The element construction primitive, passed through unchanged
    pub fn dynamic(&self) -> &H {
        &self.host
    }
}

/// A templating function bound to one name table
pub struct Templater<H: Host, P = HtmlParser> {
    host: Rc<H>,
    parser: Rc<P>,
    counter: Arc<PlaceholderCounter>,
    config: FigConfig,
    names: NameTable<H::Component>,
}

impl<H: Host, P: MarkupParser> Templater<H, P> {
    /// Render a template into the values its markup produces
    ///
    /// Head nodes come first, then body nodes; each element becomes one
    /// host element and each text node one value per segment.
    pub fn render(&self, template: Template<H::Element>) -> Result<Vec<Value<H::Element>>, FigError> {
        let composition = template::compose(template, &self.counter, self.config.trim);
        log::debug!(
            "composed markup ({} references): {}",
            composition.references.len(),
            composition.markup
        );

        let document = self
            .parser
            .parse_document(&composition.markup)
            .map_err(|errors| {
                for error in &errors {
                    log::error!(
                        "{}",
                        error.format(&composition.markup, &self.config.source_name)
                    );
                }
                FigError::InvalidDocument
            })?;

        let renderer = Renderer::new(self.host.as_ref(), &composition.references, &self.names)
            .with_falsy(self.config.falsy);
        Ok(renderer.render_all(document.nodes()))
    }

    /// Tagged-template call shape: `fragments.len()` should be `values.len() + 1`
    pub fn call<S: AsRef<str>>(
        &self,
        fragments: &[S],
        values: Vec<Value<H::Element>>,
    ) -> Result<Vec<Value<H::Element>>, FigError> {
        self.render(Template::from_parts(fragments, values))
    }

    pub fn names(&self) -> &NameTable<H::Component> {
        &self.names
    }

    pub fn config(&self) -> &FigConfig {
        &self.config
    }
}
