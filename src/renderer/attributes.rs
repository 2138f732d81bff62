//! Attribute normalization

use crate::config::FalsyPolicy;
use crate::names::NAMESPACE_DELIMITER;
use crate::template::{feed, References};
use crate::value::Value;

/// Camel-case a namespaced attribute name: `data:testId` becomes `dataTestId`
///
/// Names without a delimiter, or with an empty segment, are returned as is.
pub fn normalize_name(name: &str) -> String {
    let segments: Vec<&str> = name.split(NAMESPACE_DELIMITER).collect();
    if segments.len() < 2 || segments.iter().any(|s| s.is_empty()) {
        return name.to_string();
    }

    let mut out = segments[0].to_string();
    for segment in &segments[1..] {
        let mut chars = segment.chars();
        if let Some(c) = chars.next() {
            out.extend(c.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// Restore the value an attribute's text stands for
///
/// A single segment keeps its type, so a lone placeholder hands back the
/// original value; anything else is flattened into one string.
pub fn normalize_value<E: Clone>(raw: &str, references: &References<E>, falsy: FalsyPolicy) -> Value<E> {
    let mut segments = feed(raw, references, falsy);
    if segments.len() == 1 {
        if let Some(only) = segments.pop() {
            return only;
        }
    }
    Value::Text(segments.iter().map(|s| s.to_string()).collect())
}

/// Normalize one attribute into a property; valueless attributes are skipped
pub fn normalize_attribute<E: Clone>(
    name: &str,
    raw: Option<&str>,
    references: &References<E>,
    falsy: FalsyPolicy,
) -> Option<(String, Value<E>)> {
    let raw = raw?;
    Some((normalize_name(name), normalize_value(raw, references, falsy)))
}
