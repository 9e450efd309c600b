use std::{io, path::Path};

use serde::Deserialize;

use crate::domain::{SortOrder, outline::DEFAULT_INDENT};

/// The name of the optional configuration file in the scanned directory.
pub const FILE_NAME: &str = ".mdtoc.toml";

/// Configuration for table of contents generation.
///
/// Every setting can be overridden on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "Versions")]
pub struct Config {
    /// The title of the root heading.
    ///
    /// If this is `None`, the name of the scanned directory is used.
    pub title: Option<String>,

    /// Whether siblings are listed in ascending order of their file names.
    pub ascending: bool,

    /// The indentation unit for nested list items.
    indent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: None,
            ascending: default_ascending(),
            indent: default_indent(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        Ok(toml::from_str(&content)?)
    }

    /// Returns the indentation unit for nested list items.
    #[must_use]
    pub fn indent(&self) -> &str {
        &self.indent
    }

    /// Returns the configured sibling order.
    #[must_use]
    pub fn sort_order(&self) -> SortOrder {
        SortOrder::from(self.ascending)
    }
}

/// Errors that can occur when loading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file: {0}")]
    Read(#[source] io::Error),

    /// The configuration file is not valid TOML, or has invalid values.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

const fn default_ascending() -> bool {
    true
}

fn default_indent() -> String {
    DEFAULT_INDENT.to_string()
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default)]
        title: Option<String>,

        #[serde(default = "default_ascending")]
        ascending: bool,

        /// The indentation unit, for example two spaces or a tab.
        #[serde(default = "default_indent")]
        indent: String,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                title,
                ascending,
                indent,
            } => Self {
                title,
                ascending,
                indent,
            },
        }
    }
}
