use annotate::{AnchorResolver, FeedError, ResolverConfig, parse_feed};
use bus::RecordingHost;
use clap::Parser;
use core_types::{Annotation, PointerKind};
use docnav::{NavConfig, Navigator};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use thiserror::Error;

#[derive(Parser)]
#[command(
    name = "pagemark",
    about = "Annotate and navigate a documentation page offline"
)]
struct Cli {
    /// HTML page to process.
    page: PathBuf,

    /// Location the page is served at.
    #[arg(short, long)]
    location: String,

    /// Root URL of the documentation tree.
    #[arg(short, long, default_value = "/")]
    base_url: String,

    /// JSON array of annotations to anchor.
    #[arg(short, long)]
    annotations: Option<PathBuf>,

    /// TOML file with optional `[nav]` and `[resolver]` tables.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print a tree outline instead of the processed HTML.
    #[arg(long)]
    outline: bool,

    /// Hover over and out of every anchored paragraph, printing the host
    /// messages to stderr.
    #[arg(long)]
    replay_hover: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Settings {
    nav: NavConfig,
    resolver: ResolverConfig,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),
    #[error(transparent)]
    Feed(#[from] FeedError),
}

fn read(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// What one invocation produces, before anything is printed.
#[derive(Debug)]
struct Rendered {
    output: String,
    hover_messages: Vec<String>,
}

fn render(cli: &Cli, settings: Settings, source: &str, annotations: &[Annotation]) -> Rendered {
    let mut page = html::parse_page(source);

    let mut navigator = Navigator::new(settings.nav, cli.base_url.as_str());
    let load = navigator.load(&mut page, &cli.location);
    log::info!(
        "title {:?}, {} toc entries, {} code blocks",
        load.title,
        load.toc.len(),
        load.code_blocks
    );

    let mut resolver = AnchorResolver::new(settings.resolver, RecordingHost::new());
    let report = resolver.resolve(&mut page, &cli.location, annotations);
    log::info!(
        "{} of {} annotations anchored",
        report.anchored().count(),
        annotations.len()
    );

    if cli.replay_hover {
        for node in report.anchored() {
            resolver.pointer(&page, node, PointerKind::Over);
            resolver.pointer(&page, node, PointerKind::Out);
        }
    }
    let hover_messages = resolver
        .host()
        .signals
        .iter()
        .map(|signal| bus::to_message(signal).to_string())
        .collect();

    let output = if cli.outline {
        html::debug::outline(&page, usize::MAX).join("\n")
    } else {
        html::serialize::to_html(&page)
    };
    Rendered {
        output,
        hover_messages,
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let settings: Settings = match &cli.config {
        Some(path) => toml::from_str(&read(path)?)?,
        None => Settings::default(),
    };
    let annotations: Vec<Annotation> = match &cli.annotations {
        Some(path) => parse_feed(&read(path)?)?,
        None => Vec::new(),
    };
    let source = read(&cli.page)?;

    let rendered = render(&cli, settings, &source, &annotations);
    for message in &rendered.hover_messages {
        eprintln!("{message}");
    }
    println!("{}", rendered.output);
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(err) = run(Cli::parse()) {
        eprintln!("pagemark: {err}");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOCATION: &str = "/docs/api/panel";

    const PAGE: &str = r#"<html><head><title></title></head><body>
<ul class="sidebar-section-contents" id="api"><li><a href="api/panel">panel</a></li></ul>
<div id="contents"></div>
<div id="main-content">
  <h1>panel</h1>
  <h2>show : function</h2>
  <div id="intro"><p>A panel is a dialog.</p></div>
</div>
</body></html>"#;

    fn cli(extra: &[&str]) -> Cli {
        let mut args = vec!["pagemark", "page.html", "--location", LOCATION, "--base-url", "/docs/"];
        args.extend_from_slice(extra);
        Cli::try_parse_from(args).unwrap()
    }

    fn note() -> Annotation {
        Annotation {
            url: LOCATION.to_string(),
            ancestor_id: "intro".to_string(),
            anchor_text: "dialog".to_string(),
            annotation_text: "see also tabs".to_string(),
        }
    }

    #[test]
    fn settings_tables_are_optional() {
        let settings: Settings = toml::from_str("[nav]\ntoc_container_id = \"contents\"\n").unwrap();
        assert_eq!(settings.nav.toc_container_id, "contents");
        assert_eq!(settings.resolver, ResolverConfig::default());
    }

    #[test]
    fn render_runs_navigation_and_annotation() {
        let settings: Settings = toml::from_str("[nav]\ntoc_container_id = \"contents\"\n").unwrap();
        let rendered = render(&cli(&[]), settings, PAGE, &[note()]);

        assert!(rendered.output.contains("<title>panel - Add-on SDK Documentation</title>"));
        assert!(rendered.output.contains(r#"<li class="current-page">"#));
        assert!(rendered.output.contains(r#"<a href="/docs/api/panel#show" class="h2" title="show">show</a>"#));
        assert!(rendered.output.contains(r#"<p class="annotated" style="border: solid 3px yellow">"#));
        assert!(rendered.hover_messages.is_empty(), "no hover without --replay-hover");
    }

    #[test]
    fn replay_hover_emits_show_then_hide() {
        let rendered = render(
            &cli(&["--replay-hover", "--outline"]),
            Settings::default(),
            PAGE,
            &[note()],
        );
        assert_eq!(
            rendered.hover_messages,
            vec![r#"["show","see also tabs"]"#.to_string(), r#"["hide"]"#.to_string()]
        );
        assert!(rendered.output.starts_with("#document"));
        assert!(rendered.output.contains(r#"<p class="annotated">  /* border: solid 3px yellow; */"#));
    }

    #[test]
    fn missing_input_file_is_reported_with_its_path() {
        let err = read(Path::new("/nonexistent/page.html")).unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/page.html"));
    }
}
