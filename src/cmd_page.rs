//! Page subcommand handlers: scan, reply, suggest.

use std::path::Path;

use scraper::Html;
use tracing::{debug, info};
use url::Url;

use siwoti_core::{ContentAgent, Runtime};
use siwoti_discovery::{parse_html, HtmlDocument, MemorySurface};
use siwoti_protocols::{PageLocation, PanelView, ScanSummary, Tone};

/// Longest comment preview printed per annotation.
const PREVIEW_CHARS: usize = 100;

/// Parse `url` into the page location the scanner reports.
pub(crate) fn page_location(url: &str) -> Result<PageLocation, Box<dyn std::error::Error>> {
    let parsed = Url::parse(url)?;
    let hostname = parsed
        .host_str()
        .ok_or_else(|| format!("URL has no host: {}", url))?
        .to_string();
    Ok(PageLocation {
        hostname,
        url: parsed.to_string(),
        title: String::new(),
    })
}

fn load_html(path: &Path) -> Result<Html, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    debug!("Read {} bytes from {}", content.len(), path.display());
    Ok(parse_html(&content))
}

/// Scan a saved page and print what was found.
pub(crate) async fn handle_scan(
    runtime: &Runtime,
    html: &Path,
    url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let document = load_html(html)?;
    let doc = HtmlDocument::new(&document, page_location(url)?);
    let mut agent = runtime.content_agent(MemorySurface::new());

    let summary = agent.scan(&doc).await;
    print_summary(&summary, &agent);
    Ok(())
}

/// Scan a saved page and generate a reply for one of its comments.
pub(crate) async fn handle_reply(
    runtime: &Runtime,
    html: &Path,
    url: &str,
    index: Option<usize>,
    tone: Option<Tone>,
) -> Result<(), Box<dyn std::error::Error>> {
    let document = load_html(html)?;
    let doc = HtmlDocument::new(&document, page_location(url)?);
    let mut agent = runtime.content_agent(MemorySurface::new());

    let summary = agent.scan(&doc).await;
    if !summary.found {
        print_summary(&summary, &agent);
        return Ok(());
    }

    let annotations = agent.annotations().annotations();
    let index = match index {
        Some(index) => index,
        None => annotations
            .iter()
            .position(|a| summary.worst.as_deref() == Some(a.comment.as_str()))
            .unwrap_or(0),
    };
    let annotation = annotations
        .get(index)
        .ok_or_else(|| format!("No comment at index {} ({} found)", index, annotations.len()))?;
    let control = annotation.control;
    println!("Replying to [{}]: {}", index, preview(&annotation.comment));

    if let Some(tone) = tone {
        agent.annotations_mut().select_tone(control, tone)?;
    }
    info!(index, "Generating reply");
    let panel = agent.activate(&doc, control).await?;
    if let Some(mounted) = agent.annotations().surface().panel(panel) {
        print_panel(&mounted.view);
    }
    Ok(())
}

/// Generate a reply for free text, optionally in the context of a page.
pub(crate) async fn handle_suggest(
    runtime: &Runtime,
    text: &str,
    tone: Option<Tone>,
    url: Option<&str>,
    html: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let document = match html {
        Some(path) => load_html(path)?,
        None => parse_html(""),
    };
    let location = match url {
        Some(url) => page_location(url)?,
        None => PageLocation::default(),
    };
    let doc = HtmlDocument::new(&document, location);
    let mut agent = runtime.content_agent(MemorySurface::new());

    match agent.reply_to_selection(&doc, text, tone).await {
        Some(panel) => {
            if let Some(mounted) = agent.annotations().surface().panel(panel) {
                print_panel(&mounted.view);
            }
            Ok(())
        }
        None => Err("Nothing to reply to: the text is blank".into()),
    }
}

fn print_summary(summary: &ScanSummary, agent: &ContentAgent<MemorySurface>) {
    if summary.unsupported {
        println!("Site not supported.");
        return;
    }
    if summary.disabled {
        println!("SIWOTI is disabled for this site.");
        return;
    }
    if !summary.found {
        println!("No comments found.");
        return;
    }

    if let Some(text) = &summary.text {
        println!("{}", text);
    }
    for (index, annotation) in agent.annotations().annotations().iter().enumerate() {
        let marker = if summary.worst.as_deref() == Some(annotation.comment.as_str()) {
            "*"
        } else {
            " "
        };
        println!(
            "{}[{}] ({:.0}, {:.0}) {}",
            marker,
            index,
            annotation.position.x,
            annotation.position.y,
            preview(&annotation.comment)
        );
    }
}

fn print_panel(view: &PanelView) {
    if let Some(title) = &view.title {
        println!("{}", title);
    } else if view.is_error() {
        println!("Error");
    } else if view.cached {
        println!("Suggested reply [cached]");
    } else {
        println!("Suggested reply");
    }
    println!();
    println!("{}", view.body);
}

fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
