//! Rendering of parsed markup into host elements

pub mod attributes;
mod tree;

pub use attributes::{normalize_attribute, normalize_name, normalize_value};
pub use tree::Renderer;
