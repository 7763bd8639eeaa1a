use serde::Deserialize;

/// Encoding label used when none is configured
pub const DEFAULT_ENCODING: &str = "windows-1251";

/// What the loader does when no decoder produces a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackPolicy {
    /// Substitute the built-in default table for a missing or unrecognized
    /// file (interactive use)
    #[default]
    UseDefault,
    /// Surface every failure to the caller
    Strict,
}

/// Settings for [`FormatDetectingLoader`](super::FormatDetectingLoader)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Encoding label for the KORSAR text decoder
    pub encoding: String,

    /// Failure handling
    pub fallback: FallbackPolicy,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            encoding: DEFAULT_ENCODING.to_string(),
            fallback: FallbackPolicy::default(),
        }
    }
}

impl LoaderConfig {
    /// Default settings with strict failure handling
    pub fn strict() -> Self {
        Self {
            fallback: FallbackPolicy::Strict,
            ..Default::default()
        }
    }

    /// Set the text encoding label
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }

    /// Set the fallback policy
    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }
}
