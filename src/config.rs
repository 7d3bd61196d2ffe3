use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_DIMENSIONS: usize = 1024;
pub const DEFAULT_WINDOW: usize = 17;
pub const DEFAULT_TOP_K: usize = 20;

/// What the corpus builder does when a document fails to load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// any failed document fails the whole build
    #[default]
    Abort,
    /// failed documents are logged and left out
    Skip,
}

/// Parameters of the vector construction engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorizerConfig {
    /// projected vector dimension (D)
    pub dimensions: usize,
    /// context window capacity (W), odd
    pub window: usize,
    /// number of words kept by word ranking (K)
    pub top_k: usize,
    pub failure_policy: FailurePolicy,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            dimensions: DEFAULT_DIMENSIONS,
            window: DEFAULT_WINDOW,
            top_k: DEFAULT_TOP_K,
            failure_policy: FailurePolicy::Abort,
        }
    }
}

impl VectorizerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.dimensions == 0 {
            return Err(Error::InvalidConfig("dimensions must be greater than 0".into()));
        }
        if self.window == 0 || self.window % 2 == 0 {
            return Err(Error::InvalidConfig(format!(
                "window must be odd and greater than 0, got {}",
                self.window
            )));
        }
        if self.top_k == 0 {
            return Err(Error::InvalidConfig("top_k must be greater than 0".into()));
        }
        Ok(())
    }

    /// center offset of the context window
    #[inline]
    pub fn center(&self) -> usize {
        self.window / 2
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// identifier of the document other documents are ranked against
    pub document: Option<String>,
    /// word other words are ranked against
    pub word: Option<String>,
}

/// Full configuration file
///
/// ```toml
/// data_dir = "data/"
///
/// [vectorizer]
/// dimensions = 1024
/// window = 17
///
/// [query]
/// document = "data/pg1661.txt"
/// word = "sea"
///
/// [labels]
/// "data/pg1661.txt" = "Arthur Conan Doyle"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_dir: Option<PathBuf>,
    pub vectorizer: VectorizerConfig,
    pub query: QueryConfig,
    /// document identifier -> display label, presentation only
    pub labels: IndexMap<String, String>,
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s)?;
        config.vectorizer.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// display label for a document, falling back to its identifier
    pub fn label<'a>(&'a self, id: &'a str) -> &'a str {
        self.labels.get(id).map(String::as_str).unwrap_or(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.vectorizer, VectorizerConfig::default());
        assert_eq!(config.vectorizer.dimensions, 1024);
        assert_eq!(config.vectorizer.window, 17);
        assert_eq!(config.vectorizer.center(), 8);
        assert!(config.labels.is_empty());
        assert_eq!(config.query, QueryConfig::default());
    }

    #[test]
    fn parses_full_config() {
        let text = r#"
            data_dir = "data/"

            [vectorizer]
            dimensions = 256
            window = 5
            top_k = 3
            failure_policy = "skip"

            [query]
            document = "data/pg1661.txt"
            word = "sea"

            [labels]
            "data/pg1661.txt" = "Arthur Conan Doyle"
        "#;
        let config = Config::from_toml_str(text).unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("data/")));
        assert_eq!(config.vectorizer.dimensions, 256);
        assert_eq!(config.vectorizer.window, 5);
        assert_eq!(config.vectorizer.top_k, 3);
        assert_eq!(config.vectorizer.failure_policy, FailurePolicy::Skip);
        assert_eq!(config.query.word.as_deref(), Some("sea"));
        assert_eq!(config.label("data/pg1661.txt"), "Arthur Conan Doyle");
        assert_eq!(config.label("data/other.txt"), "data/other.txt");
    }

    #[test]
    fn rejects_even_window() {
        let err = Config::from_toml_str("[vectorizer]\nwindow = 4\n").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn rejects_zero_dimensions_and_top_k() {
        let config = VectorizerConfig { dimensions: 0, ..Default::default() };
        assert!(config.validate().is_err());
        let config = VectorizerConfig { top_k: 0, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn reports_parse_errors() {
        let err = Config::from_toml_str("[vectorizer]\nwindow = \"wide\"\n").unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }
}
