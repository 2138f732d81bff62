//! Name tables mapping namespaced tag names to components
//!
//! A tag such as `ui:button` is split on `:` and looked up segment by
//! segment in a nested table. Tables for the CLI are loaded from TOML:
//!
//! ```toml
//! card = "Card"
//!
//! [ui]
//! button = "Button"
//!
//! [ui.form]
//! input = "TextInput"
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Delimiter between namespace segments in tag names
pub const NAMESPACE_DELIMITER: char = ':';

/// Errors that can occur when building or loading a name table
#[derive(Error, Debug)]
pub enum NameTableError {
    #[error("Failed to read name table file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse name table TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    /// A path runs through an existing component
    #[error("name '{path}' conflicts with an existing entry")]
    Conflict { path: String },
    #[error("invalid name '{path}'")]
    InvalidName { path: String },
}

/// One level of a name table
#[derive(Debug, Clone, PartialEq)]
pub enum NameEntry<C> {
    Namespace(HashMap<String, NameEntry<C>>),
    Component(C),
}

/// Progress of a lookup walk
enum Lookup<'a, C> {
    Namespace(&'a HashMap<String, NameEntry<C>>),
    Component(&'a C),
    NotFound,
}

impl<'a, C> Lookup<'a, C> {
    fn step(self, segment: &str) -> Self {
        match self {
            Lookup::Namespace(level) => match level.get(segment) {
                Some(NameEntry::Namespace(next)) => Lookup::Namespace(next),
                Some(NameEntry::Component(c)) => Lookup::Component(c),
                None => Lookup::NotFound,
            },
            Lookup::Component(_) | Lookup::NotFound => Lookup::NotFound,
        }
    }
}

/// Nested mapping from tag name segments to components
#[derive(Debug, Clone, PartialEq)]
pub struct NameTable<C> {
    root: HashMap<String, NameEntry<C>>,
}

impl<C> Default for NameTable<C> {
    fn default() -> Self {
        Self {
            root: HashMap::new(),
        }
    }
}

impl<C> NameTable<C> {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a tag name to a component
    ///
    /// Only a walk that consumes every segment and ends on a component
    /// succeeds; ending on a namespace, or running into a component before
    /// the last segment, is a miss.
    pub fn resolve(&self, tag: &str) -> Option<&C> {
        let walked = tag
            .split(NAMESPACE_DELIMITER)
            .fold(Lookup::Namespace(&self.root), Lookup::step);
        match walked {
            Lookup::Component(c) => Some(c),
            Lookup::Namespace(_) | Lookup::NotFound => None,
        }
    }

    /// Register a component under a possibly namespaced path like `ui:button`
    pub fn insert(&mut self, path: &str, component: C) -> Result<(), NameTableError> {
        let segments: Vec<&str> = path.split(NAMESPACE_DELIMITER).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(NameTableError::InvalidName {
                path: path.to_string(),
            });
        }

        let (last, parents) = match segments.split_last() {
            Some(split) => split,
            None => {
                return Err(NameTableError::InvalidName {
                    path: path.to_string(),
                })
            }
        };

        let mut level = &mut self.root;
        for segment in parents {
            let entry = level
                .entry(segment.to_string())
                .or_insert_with(|| NameEntry::Namespace(HashMap::new()));
            level = match entry {
                NameEntry::Namespace(next) => next,
                NameEntry::Component(_) => {
                    return Err(NameTableError::Conflict {
                        path: path.to_string(),
                    })
                }
            };
        }

        if let Some(NameEntry::Namespace(_)) = level.get(*last) {
            return Err(NameTableError::Conflict {
                path: path.to_string(),
            });
        }
        level.insert(last.to_string(), NameEntry::Component(component));
        Ok(())
    }

    /// Builder form of [`NameTable::insert`]
    pub fn with(mut self, path: &str, component: C) -> Result<Self, NameTableError> {
        self.insert(path, component)?;
        Ok(self)
    }

    /// Mount a whole table under one namespace segment
    pub fn namespace(mut self, name: &str, table: NameTable<C>) -> Self {
        self.root
            .insert(name.to_string(), NameEntry::Namespace(table.root));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// All component paths, joined with `:`
    pub fn paths(&self) -> Vec<String> {
        fn collect<C>(level: &HashMap<String, NameEntry<C>>, prefix: &str, out: &mut Vec<String>) {
            for (key, entry) in level {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}{}{}", prefix, NAMESPACE_DELIMITER, key)
                };
                match entry {
                    NameEntry::Namespace(next) => collect(next, &path, out),
                    NameEntry::Component(_) => out.push(path),
                }
            }
        }

        let mut out = Vec::new();
        collect(&self.root, "", &mut out);
        out.sort();
        out
    }
}

/// TOML structure for deserializing name tables
#[derive(Deserialize)]
#[serde(untagged)]
enum TomlEntry {
    Component(String),
    Namespace(HashMap<String, TomlEntry>),
}

impl From<TomlEntry> for NameEntry<String> {
    fn from(entry: TomlEntry) -> Self {
        match entry {
            TomlEntry::Component(name) => NameEntry::Component(name),
            TomlEntry::Namespace(level) => {
                NameEntry::Namespace(level.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl NameTable<String> {
    /// Load a name table from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, NameTableError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a name table from a TOML string
    ///
    /// Tables become namespaces and string values become component names.
    pub fn from_str(content: &str) -> Result<Self, NameTableError> {
        let parsed: HashMap<String, TomlEntry> = toml::from_str(content)?;
        Ok(NameTable {
            root: parsed.into_iter().map(|(k, v)| (k, v.into())).collect(),
        })
    }
}
