use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid resolver config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Knobs of the anchor resolver. Every field has a default, so an empty TOML
/// table yields [`ResolverConfig::default`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Tags considered paragraph-like when searching for anchor text.
    pub paragraph_tags: Vec<String>,
    /// Class reserved for claimed anchors; candidate selection skips it.
    pub marker_class: String,
    /// Inline `border` applied to a resolved anchor.
    pub border: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            paragraph_tags: vec!["p".to_string()],
            marker_class: "annotated".to_string(),
            border: "solid 3px yellow".to_string(),
        }
    }
}

impl ResolverConfig {
    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn is_paragraph_like(&self, tag: &str) -> bool {
        self.paragraph_tags
            .iter()
            .any(|t| t.eq_ignore_ascii_case(tag))
    }
}
