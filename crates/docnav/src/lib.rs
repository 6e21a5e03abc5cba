//! Documentation page navigation: table of contents generation and sidebar
//! current-page/current-section highlighting.

pub mod code;
pub mod config;
pub mod sidebar;
pub mod title;
pub mod toc;

pub use crate::config::{ConfigError, NavConfig};
pub use crate::sidebar::{Highlight, highlight_current, relative_path};
pub use crate::toc::{TocEntry, TocState, generate_toc};

use html::Page;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum NavState {
    #[default]
    Uninitialized,
    Resolved(Highlight),
}

/// Per-page-load driver. Every pass starts from fresh derived state; nothing
/// carries over between loads.
#[derive(Clone, Debug)]
pub struct Navigator {
    config: NavConfig,
    base_url: String,
    state: NavState,
}

impl Navigator {
    pub fn new(config: NavConfig, base_url: impl Into<String>) -> Self {
        Self {
            config,
            base_url: base_url.into(),
            state: NavState::Uninitialized,
        }
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    pub fn state(&self) -> &NavState {
        &self.state
    }

    /// Build the page's table of contents with a fresh [`TocState`].
    pub fn build_toc(&self, page: &mut Page, location: &str) -> Vec<TocEntry> {
        let (entries, _) = generate_toc(page, location, &self.config, TocState::new());
        entries
    }

    /// Recompute current-page/current-section marks for `location`.
    pub fn navigate(&mut self, page: &mut Page, location: &str) -> Highlight {
        let highlight = highlight_current(page, location, &self.base_url, &self.config);
        self.state = NavState::Resolved(highlight.clone());
        highlight
    }

    /// Full page-load pass: title, code blocks, table of contents, then sidebar.
    pub fn load(&mut self, page: &mut Page, location: &str) -> PageLoad {
        let title = title::apply_title(page, &self.config);
        let code_blocks = code::prepare_code_blocks(page, &self.config);
        let toc = self.build_toc(page, location);
        let highlight = self.navigate(page, location);
        log::debug!(
            target: "docnav",
            "loaded {location}: {} toc entries, section {:?}",
            toc.len(),
            highlight.current_section
        );
        PageLoad {
            title,
            code_blocks,
            toc,
            highlight,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageLoad {
    pub title: String,
    pub code_blocks: usize,
    pub toc: Vec<TocEntry>,
    pub highlight: Highlight,
}
