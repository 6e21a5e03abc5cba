use annotate::{AnchorResolver, Outcome, ResolverConfig, parse_feed};
use bus::{Bus, RecordingHost};
use core_types::{Annotation, PointerKind, Signal};
use html::query::{elements_by_tag, find_by_id};
use html::serialize::to_html;
use html::{Page, parse_page};
use serde_json::json;

const LOCATION: &str = "http://localhost:8888/dev-guide/addon-development/about";

const PAGE: &str = r#"<!DOCTYPE html>
<html><body>
  <div id="main-content">
    <h1>About</h1>
    <div id="intro">
      <p>The SDK uses foo as a building block.</p>
      <p>Nothing to see here.</p>
      <p>Again, foo shows up in this paragraph.</p>
    </div>
    <div id="single"><p>Only one match: bar.</p><p>No match.</p></div>
  </div>
</body></html>"#;

fn note(ancestor: &str, anchor: &str, body: &str) -> Annotation {
    Annotation {
        url: LOCATION.to_string(),
        ancestor_id: ancestor.to_string(),
        anchor_text: anchor.to_string(),
        annotation_text: body.to_string(),
    }
}

fn resolver() -> AnchorResolver<RecordingHost> {
    AnchorResolver::new(ResolverConfig::default(), RecordingHost::new())
}

fn paragraphs(page: &Page, ancestor: &str) -> Vec<html::NodeId> {
    let root = find_by_id(page, ancestor).expect("fixture ancestor");
    elements_by_tag(page, root, "p")
}

#[test]
fn annotations_for_other_pages_leave_the_page_untouched() {
    let mut page = parse_page(PAGE);
    let before = to_html(&page);
    let mut r = resolver();

    let mut other = note("intro", "foo", "x");
    other.url = format!("{LOCATION}#fragment");
    let report = r.resolve(&mut page, LOCATION, &[other]);

    assert_eq!(report.outcomes, vec![Outcome::OtherPage]);
    assert_eq!(to_html(&page), before, "no mutation expected");
    assert!(r.bindings().is_empty());
}

#[test]
fn single_match_is_marked_with_one_show_and_one_hide_binding() {
    let mut page = parse_page(PAGE);
    let mut r = resolver();
    let report = r.resolve(&mut page, LOCATION, &[note("single", "bar", "about bar")]);

    let ps = paragraphs(&page, "single");
    assert_eq!(report.outcomes, vec![Outcome::Anchored(ps[0])]);
    assert!(page.has_class(ps[0], "annotated"));
    assert_eq!(page.style(ps[0], "border"), Some("solid 3px yellow"));
    assert!(!page.has_class(ps[1], "annotated"));

    let bindings: Vec<_> = r.bindings_for(ps[0]).collect();
    assert_eq!(bindings.len(), 1);
    assert_eq!(bindings[0].on_over, Signal::Show("about bar".to_string()));
    assert_eq!(bindings[0].on_out, Signal::Hide);
}

#[test]
fn last_matching_paragraph_wins() {
    let mut page = parse_page(PAGE);
    let mut r = resolver();
    r.resolve(&mut page, LOCATION, &[note("intro", "foo", "n")]);

    let ps = paragraphs(&page, "intro");
    let marked: Vec<bool> = ps.iter().map(|p| page.has_class(*p, "annotated")).collect();
    assert_eq!(marked, vec![false, false, true]);
}

#[test]
fn soft_misses_do_not_stop_the_pass() {
    let mut page = parse_page(PAGE);
    let mut r = resolver();
    let feed = [
        note("removed-section", "foo", "stale"),
        note("intro", "not on the page", "stale"),
        note("single", "bar", "fresh"),
    ];
    let report = r.resolve(&mut page, LOCATION, &feed);
    assert_eq!(report.missing_ancestors(), 1);
    assert_eq!(report.missing_anchors(), 1);
    assert_eq!(report.anchored().count(), 1);
}

#[test]
fn feed_to_host_round_trip_over_the_bus() {
    let feed = parse_feed(
        &json!([{
            "url": LOCATION,
            "ancestorId": "single",
            "anchorText": "bar",
            "annotationText": "from the feed"
        }])
        .to_string(),
    )
    .unwrap();

    let mut page = parse_page(PAGE);
    let bus = Bus::new();
    let mut r = AnchorResolver::new(ResolverConfig::default(), bus.host);
    let report = r.resolve(&mut page, LOCATION, &feed);
    let anchor = report.anchored().next().unwrap();

    r.pointer(&page, anchor, PointerKind::Over);
    r.pointer(&page, anchor, PointerKind::Out);
    r.pointer(&page, anchor, PointerKind::Over);

    let messages: Vec<_> = bus.rx.try_iter().collect();
    assert_eq!(
        messages,
        vec![
            json!(["show", "from the feed"]),
            json!(["hide"]),
            json!(["show", "from the feed"]),
        ]
    );
}
