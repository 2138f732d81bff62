//! Configuration for templating calls

/// What the feeder does with a placeholder whose value is falsy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FalsyPolicy {
    /// Falsy values (`null`, `false`, `0`, `""`) vanish like dangling tokens
    #[default]
    Drop,
    /// Every registered value is restored
    Keep,
}

/// Configuration options for a templating binding
#[derive(Debug, Clone)]
pub struct FigConfig {
    /// Handling of falsy interpolated values
    pub falsy: FalsyPolicy,

    /// Whether composed markup is trimmed before parsing
    pub trim: bool,

    /// File name shown in logged parse diagnostics
    pub source_name: String,
}

impl Default for FigConfig {
    fn default() -> Self {
        Self {
            falsy: FalsyPolicy::Drop,
            trim: true,
            source_name: "template".to_string(),
        }
    }
}

impl FigConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the falsy value policy
    pub fn with_falsy(mut self, policy: FalsyPolicy) -> Self {
        self.falsy = policy;
        self
    }

    /// Set whether composed markup is trimmed
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Set the name used for the markup in diagnostics
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = name.into();
        self
    }
}
