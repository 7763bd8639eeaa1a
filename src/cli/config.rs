//! TOML configuration and session files.
//!
//! Loader defaults can live in a config file instead of repeating flags:
//!
//! ```toml
//! # hydrotrace.toml
//! [loader]
//! encoding = "cp1251"
//! fallback = "strict"   # or "use-default"
//! ```
//!
//! A session file names a data file and the formula tags of the derived
//! columns that were open when it was saved:
//!
//! ```toml
//! data_file = "runs/lent3"
//! encoding = "cp1251"
//! formulas = ["$Integral(G1, кг/с)$", "$(Р1, МПа)*(10.0)$"]
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use hydrotrace::loader::LoaderConfig;

/// Root configuration structure for hydrotrace.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Loader settings.
    #[serde(default)]
    pub loader: LoaderConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Config file if given, defaults otherwise.
    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

/// A saved session: data file plus derived-column formula tags.
#[derive(Debug, Deserialize)]
pub struct Session {
    /// Data file, relative to the session file unless absolute.
    pub data_file: PathBuf,

    /// Text encoding for the data file.
    pub encoding: Option<String>,

    /// Formula tags in the order the columns were created.
    #[serde(default)]
    pub formulas: Vec<String>,
}

impl Session {
    /// Load a session, resolving `data_file` against the session's directory.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read session file: {}", path.display()))?;
        let mut session = Self::parse(&content)?;

        if session.data_file.is_relative() {
            if let Some(dir) = path.parent() {
                session.data_file = dir.join(&session.data_file);
            }
        }
        Ok(session)
    }

    /// Parse a session from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML session")
    }
}
