//! Resolve annotation records to live anchors on the current page.
//!
//! For each annotation targeting this page:
//! - look up the ancestor element by id,
//! - pick the last paragraph-like descendant (document order) whose text contains
//!   the anchor text,
//! - mark it (border + marker class) and bind hover signals.
//!
//! Every miss is soft: the annotation is skipped and the pass continues.

use crate::config::ResolverConfig;
use bus::Notify;
use core_types::{Annotation, PointerKind, Signal};
use html::collect::{normalize_whitespace, normalized_text};
use html::query::{ancestors_inclusive, find_by_id, last_matching};
use html::{NodeId, Page};

/// Signals fired by pointer transitions on one anchored element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoverBinding {
    pub node: NodeId,
    pub on_over: Signal,
    pub on_out: Signal,
}

impl HoverBinding {
    fn signal_for(&self, kind: PointerKind) -> &Signal {
        match kind {
            PointerKind::Over => &self.on_over,
            PointerKind::Out => &self.on_out,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Anchored(NodeId),
    OtherPage,
    MissingAncestor,
    MissingAnchor,
}

/// Per-annotation outcome, in feed order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolveReport {
    pub outcomes: Vec<Outcome>,
}

impl ResolveReport {
    pub fn anchored(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.outcomes.iter().filter_map(|o| match o {
            Outcome::Anchored(id) => Some(*id),
            _ => None,
        })
    }

    pub fn other_page(&self) -> usize {
        self.tally(|o| matches!(o, Outcome::OtherPage))
    }

    pub fn missing_ancestors(&self) -> usize {
        self.tally(|o| matches!(o, Outcome::MissingAncestor))
    }

    pub fn missing_anchors(&self) -> usize {
        self.tally(|o| matches!(o, Outcome::MissingAnchor))
    }

    /// Annotations for this page that could not be anchored.
    pub fn misses(&self) -> usize {
        self.tally(|o| matches!(o, Outcome::MissingAncestor | Outcome::MissingAnchor))
    }

    fn tally(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(o)).count()
    }
}

pub struct AnchorResolver<N> {
    config: ResolverConfig,
    host: N,
    bindings: Vec<HoverBinding>,
}

impl<N: Notify> AnchorResolver<N> {
    pub fn new(config: ResolverConfig, host: N) -> Self {
        Self {
            config,
            host,
            bindings: Vec::new(),
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn host(&self) -> &N {
        &self.host
    }

    pub fn into_host(self) -> N {
        self.host
    }

    pub fn bindings(&self) -> &[HoverBinding] {
        &self.bindings
    }

    pub fn bindings_for(&self, node: NodeId) -> impl Iterator<Item = &HoverBinding> + '_ {
        self.bindings.iter().filter(move |b| b.node == node)
    }

    /// Resolve every annotation whose `url` is exactly `location`.
    pub fn resolve(
        &mut self,
        page: &mut Page,
        location: &str,
        annotations: &[Annotation],
    ) -> ResolveReport {
        let mut report = ResolveReport::default();
        for annotation in annotations {
            let outcome = if annotation.targets(location) {
                self.display(page, annotation)
            } else {
                Outcome::OtherPage
            };
            report.outcomes.push(outcome);
        }
        log::debug!(
            target: "annotate.resolve",
            "resolved {} of {} annotations for {location}",
            report.anchored().count(),
            annotations.len()
        );
        report
    }

    fn display(&mut self, page: &mut Page, annotation: &Annotation) -> Outcome {
        let Some(ancestor) = find_by_id(page, &annotation.ancestor_id) else {
            log::debug!(
                target: "annotate.resolve",
                "no element with id {:?}; skipping",
                annotation.ancestor_id
            );
            return Outcome::MissingAncestor;
        };

        let Some(anchor) = find_anchor(page, ancestor, &annotation.anchor_text, &self.config)
        else {
            log::debug!(
                target: "annotate.resolve",
                "anchor text {:?} not found under #{}",
                annotation.anchor_text,
                annotation.ancestor_id
            );
            return Outcome::MissingAnchor;
        };

        page.set_style(anchor, "border", &self.config.border);
        page.add_class(anchor, &self.config.marker_class);
        self.bindings.push(HoverBinding {
            node: anchor,
            on_over: Signal::Show(annotation.annotation_text.clone()),
            on_out: Signal::Hide,
        });
        Outcome::Anchored(anchor)
    }

    /// Deliver a pointer transition on `target`. Like DOM `mouseover`/`mouseout`,
    /// the event bubbles: every bound element on the path from `target` to the
    /// document emits its signal once, innermost first.
    pub fn pointer(&mut self, page: &Page, target: NodeId, kind: PointerKind) -> usize {
        let mut fired = 0;
        for node in ancestors_inclusive(page, target) {
            for binding in self.bindings.iter().filter(|b| b.node == node) {
                let signal = binding.signal_for(kind).clone();
                log::trace!(target: "annotate.hover", "{:?} on {:?} -> {}", kind, node, signal.kind());
                self.host.notify(signal);
                fired += 1;
            }
        }
        fired
    }
}

/// The last paragraph-like descendant of `ancestor` whose rendered text contains
/// `anchor_text` (case-sensitive, whitespace-normalized on both sides).
pub fn find_anchor(
    page: &Page,
    ancestor: NodeId,
    anchor_text: &str,
    config: &ResolverConfig,
) -> Option<NodeId> {
    let needle = normalize_whitespace(anchor_text);
    last_matching(page, ancestor, |page, id| {
        page.element_name(id)
            .is_some_and(|tag| config.is_paragraph_like(tag))
            && normalized_text(page, id).contains(needle.as_str())
    })
}
