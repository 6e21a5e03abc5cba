use serde::{Deserialize, Serialize};

/// A stored note bound to one page and a text fragment on it.
///
/// Records arrive from the host as JSON objects with camelCase keys.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    /// Absolute location of the page the note targets.
    pub url: String,
    /// Element id expected to exist on that page.
    pub ancestor_id: String,
    /// Substring expected inside a paragraph-like descendant of the ancestor.
    pub anchor_text: String,
    /// Opaque payload shown on hover.
    pub annotation_text: String,
}

impl Annotation {
    pub fn targets(&self, location: &str) -> bool {
        self.url == location
    }
}

/// Outbound display signal sent to the host when the pointer crosses an anchor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Signal {
    Show(String),
    Hide,
}

impl Signal {
    pub fn kind(&self) -> &'static str {
        match self {
            Signal::Show(_) => "show",
            Signal::Hide => "hide",
        }
    }
}

/// Pointer transitions delivered by the host for a node of the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Over,
    Out,
}
