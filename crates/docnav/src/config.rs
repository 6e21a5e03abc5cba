use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid navigation config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Markup contract between the documentation template and the navigator.
///
/// Defaults match the stock documentation template; override any subset from TOML.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub toc_container_id: String,
    /// Headings are collected under this element, or the whole page if it is absent.
    pub content_root_id: String,
    pub heading_tags: Vec<String>,
    /// Separator of property-style headings (`name : type`).
    pub type_marker: String,

    pub current_page_class: String,
    pub current_section_class: String,
    pub section_header_class: String,
    pub section_contents_class: String,
    pub always_show_class: String,
    pub default_section_id: String,

    pub title_root: String,
    pub code_brush_class: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            toc_container_id: "toc".to_string(),
            content_root_id: "main-content".to_string(),
            heading_tags: ["h2", "h3", "h4", "h5", "h6"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            type_marker: " : ".to_string(),
            current_page_class: "current-page".to_string(),
            current_section_class: "current-section".to_string(),
            section_header_class: "sidebar-section-header".to_string(),
            section_contents_class: "sidebar-section-contents".to_string(),
            always_show_class: "always-show".to_string(),
            default_section_id: "default-section-contents".to_string(),
            title_root: "Add-on SDK Documentation".to_string(),
            code_brush_class: "brush: js".to_string(),
        }
    }
}

impl NavConfig {
    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn is_heading(&self, tag: &str) -> bool {
        self.heading_tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}
