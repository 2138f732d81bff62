//! Template composition: literal fragments and values joined into markup

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use crate::value::Value;

/// Prefix shared by every placeholder token
pub const PLACEHOLDER_PREFIX: &str = "$fig-";

/// Source of placeholder identifiers
///
/// Identifiers are never reused, so tokens minted for different calls
/// sharing one counter cannot collide.
#[derive(Debug, Default)]
pub struct PlaceholderCounter {
    next: AtomicU64,
}

impl PlaceholderCounter {
    pub const fn new() -> Self {
        Self {
            next: AtomicU64::new(0),
        }
    }

    /// The counter shared by every binding that does not bring its own
    pub fn global() -> Arc<PlaceholderCounter> {
        static GLOBAL: OnceLock<Arc<PlaceholderCounter>> = OnceLock::new();
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(PlaceholderCounter::new())))
    }

    /// Mint the next token, e.g. `$fig-7`
    pub fn mint(&self) -> String {
        let id = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}{}", PLACEHOLDER_PREFIX, id)
    }

    /// Number of tokens minted so far
    pub fn minted(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}

/// Placeholder token to original value, for one templating call
#[derive(Debug, Clone)]
pub struct References<E> {
    entries: HashMap<String, Value<E>>,
}

impl<E> Default for References<E> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<E> References<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, token: &str) -> Option<&Value<E>> {
        self.entries.get(token)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }

    fn register(&mut self, token: String, value: Value<E>) {
        self.entries.insert(token, value);
    }
}

/// Literal fragments interleaved with interpolated values
///
/// The builder keeps one more fragment than values, the shape a
/// tagged template literal hands over.
#[derive(Debug, Clone)]
pub struct Template<E> {
    fragments: Vec<String>,
    values: Vec<Value<E>>,
}

impl<E> Default for Template<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Template<E> {
    /// An empty template with a single empty fragment
    pub fn new() -> Self {
        Self {
            fragments: vec![String::new()],
            values: Vec::new(),
        }
    }

    /// A template with no body at all
    pub fn empty() -> Self {
        Self {
            fragments: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Build from raw parts without checking the fragment/value counts
    pub fn from_parts<S: AsRef<str>>(fragments: &[S], values: Vec<Value<E>>) -> Self {
        Self {
            fragments: fragments.iter().map(|f| f.as_ref().to_string()).collect(),
            values,
        }
    }

    /// Start a template from one literal fragment
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            fragments: vec![text.into()],
            values: Vec::new(),
        }
    }

    /// Append literal markup
    pub fn text(mut self, text: &str) -> Self {
        if self.fragments.len() > self.values.len() {
            if let Some(last) = self.fragments.last_mut() {
                last.push_str(text);
            }
        } else {
            self.fragments.push(text.to_string());
        }
        self
    }

    /// Append an interpolated value
    pub fn value(mut self, value: impl Into<Value<E>>) -> Self {
        while self.fragments.len() <= self.values.len() {
            self.fragments.push(String::new());
        }
        self.values.push(value.into());
        self.fragments.push(String::new());
        self
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub fn values(&self) -> &[Value<E>] {
        &self.values
    }
}

/// Composed markup and the values its placeholders stand for
#[derive(Debug, Clone)]
pub struct Composition<E> {
    pub markup: String,
    pub references: References<E>,
}

/// Join a template into one markup string
///
/// Each value is replaced by a fresh placeholder token; values beyond the
/// last fragment are ignored.
pub fn compose<E>(template: Template<E>, counter: &PlaceholderCounter, trim: bool) -> Composition<E> {
    let mut references = References::new();
    if template.fragments.is_empty() {
        return Composition {
            markup: String::new(),
            references,
        };
    }

    let mut markup = String::new();
    let mut values = template.values.into_iter();
    for fragment in &template.fragments {
        markup.push_str(fragment);
        if let Some(value) = values.next() {
            let token = counter.mint();
            markup.push_str(&token);
            references.register(token, value);
        }
    }

    let markup = if trim {
        markup.trim().to_string()
    } else {
        markup
    };

    Composition { markup, references }
}

#[cfg(test)]
mod tests {
    use super::*;

    type V = Value<()>;

    #[test]
    fn test_compose_empty_template() {
        let counter = PlaceholderCounter::new();
        let comp = compose(Template::<()>::empty(), &counter, true);
        assert_eq!(comp.markup, "");
        assert!(comp.references.is_empty());
        assert_eq!(counter.minted(), 0);
    }

    #[test]
    fn test_compose_single_value() {
        let counter = PlaceholderCounter::new();
        let template = Template::from_parts(&["<p>", "</p>"], vec![V::from(42)]);
        let comp = compose(template, &counter, true);
        assert_eq!(comp.markup, "<p>$fig-0</p>");
        assert_eq!(comp.references.get("$fig-0"), Some(&V::from(42)));
    }

    #[test]
    fn test_compose_trims_whitespace() {
        let counter = PlaceholderCounter::new();
        let comp = compose(Template::<()>::literal("\n   <br>\n  "), &counter, true);
        assert_eq!(comp.markup, "<br>");

        let comp = compose(Template::<()>::literal(" <br> "), &counter, false);
        assert_eq!(comp.markup, " <br> ");
    }

    #[test]
    fn test_compose_ignores_surplus_values() {
        let counter = PlaceholderCounter::new();
        let template = Template::from_parts(&["<b>"], vec![V::from("x"), V::from("y")]);
        let comp = compose(template, &counter, true);
        assert_eq!(comp.markup, "<b>$fig-0");
        assert_eq!(comp.references.len(), 1);
    }

    #[test]
    fn test_tokens_unique_across_calls() {
        let counter = PlaceholderCounter::new();
        let first = compose(Template::<()>::new().value(1), &counter, true);
        let second = compose(Template::<()>::new().value(2), &counter, true);
        assert_eq!(first.markup, "$fig-0");
        assert_eq!(second.markup, "$fig-1");
    }

    #[test]
    fn test_builder_keeps_fragment_invariant() {
        let template = Template::<()>::literal("<a ")
            .text("href=")
            .value("x")
            .value("y")
            .text(">link</a>");
        assert_eq!(template.fragments(), &["<a href=", "", ">link</a>"]);
        assert_eq!(template.values().len(), 2);
    }

    #[test]
    fn test_global_counter_is_shared() {
        let a = PlaceholderCounter::global();
        let b = PlaceholderCounter::global();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
