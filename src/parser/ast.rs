//! Node tree produced by the markup parser

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// One attribute of an element, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    /// `None` for valueless attributes such as `<input disabled>`
    pub value: Option<String>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: Option<&str>) -> Self {
        Self {
            name: name.into(),
            value: value.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Tag name as written in the source
    pub tag: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn is_named(&self, name: &str) -> bool {
        self.tag.eq_ignore_ascii_case(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Text consisting only of HTML whitespace
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Node::Text(t) if t.chars().all(|c| matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C')))
    }
}

/// A fully parsed document split into its two top-level sections
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDocument {
    pub head: Vec<Node>,
    pub body: Vec<Node>,
}

impl ParsedDocument {
    /// Head nodes followed by body nodes
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.head.iter().chain(self.body.iter())
    }
}

/// Elements that never have content or a closing tag
pub fn is_void_element(tag: &str) -> bool {
    matches!(
        tag.to_ascii_lowercase().as_str(),
        "area" | "base" | "br" | "col" | "embed" | "hr" | "img"
            | "input" | "link" | "meta" | "param" | "source" | "track" | "wbr"
    )
}

/// Elements that belong in a document head
pub fn is_metadata_element(tag: &str) -> bool {
    matches!(
        tag.to_ascii_lowercase().as_str(),
        "base" | "link" | "meta" | "noscript" | "script" | "style" | "template" | "title"
    )
}

/// Elements whose content is raw text up to their closing tag
pub fn is_raw_text_element(tag: &str) -> bool {
    matches!(
        tag.to_ascii_lowercase().as_str(),
        "script" | "style" | "textarea" | "title"
    )
}

/// Raw text elements whose content still decodes character references
pub fn is_escapable_raw_text_element(tag: &str) -> bool {
    matches!(tag.to_ascii_lowercase().as_str(), "textarea" | "title")
}

/// Elements whose end tag may be left out
pub fn has_optional_end_tag(tag: &str) -> bool {
    matches!(
        tag.to_ascii_lowercase().as_str(),
        "html" | "head" | "body" | "li" | "dt" | "dd" | "p" | "rt" | "rp" | "optgroup"
            | "option" | "colgroup" | "thead" | "tbody" | "tfoot" | "tr" | "td" | "th"
    )
}

/// Whether an open `current` element ends when an `incoming` sibling opens
pub fn ends_on_open(current: &str, incoming: &str) -> bool {
    let incoming = incoming.to_ascii_lowercase();
    let incoming = incoming.as_str();
    match current.to_ascii_lowercase().as_str() {
        "li" => incoming == "li",
        "dt" | "dd" => matches!(incoming, "dt" | "dd"),
        "p" => ends_paragraph(incoming),
        "rt" | "rp" => matches!(incoming, "rt" | "rp"),
        "option" => matches!(incoming, "option" | "optgroup"),
        "optgroup" => incoming == "optgroup",
        "colgroup" => matches!(incoming, "colgroup" | "thead" | "tbody" | "tfoot" | "tr"),
        "thead" | "tbody" => matches!(incoming, "tbody" | "tfoot"),
        "tr" => matches!(incoming, "tr" | "thead" | "tbody" | "tfoot"),
        "td" | "th" => matches!(incoming, "td" | "th" | "tr" | "thead" | "tbody" | "tfoot"),
        "head" => !is_metadata_element(incoming),
        _ => false,
    }
}

fn ends_paragraph(incoming: &str) -> bool {
    matches!(
        incoming,
        "address" | "article" | "aside" | "blockquote" | "details" | "dialog" | "div" | "dl"
            | "dd" | "dt" | "fieldset" | "figcaption" | "figure" | "footer" | "form" | "h1"
            | "h2" | "h3" | "h4" | "h5" | "h6" | "header" | "hgroup" | "hr" | "li" | "main"
            | "menu" | "nav" | "ol" | "p" | "pre" | "section" | "table" | "ul"
    )
}
