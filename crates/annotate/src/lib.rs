//! Annotation anchoring: resolve stored notes to paragraphs of the current page
//! and relay hover transitions to the host.

pub mod candidates;
pub mod config;
pub mod feed;
pub mod resolver;

pub use crate::candidates::{AnchorCandidate, anchor_candidates, candidate_for};
pub use crate::config::{ConfigError, ResolverConfig};
pub use crate::feed::{FeedError, parse_feed};
pub use crate::resolver::{AnchorResolver, HoverBinding, Outcome, ResolveReport, find_anchor};
