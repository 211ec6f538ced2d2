//! Page side: scanning, annotation and reply rendering.

use std::sync::Arc;

use tracing::{debug, info, warn};

use siwoti_config::{SettingsAccessor, SiteDescriptor, SiteRegistry};
use siwoti_discovery::{extract, extract_article_context, pick_worst, AnnotationManager};
use siwoti_protocols::{
    Ack, AnnotationError, DocumentScanner, GeneratedReply, OverlayId, OverlaySurface, PanelAction,
    PanelView, ReplyRequest, ReplyResponse, Request, Response, ScanSummary, Settings, Tone,
};

use crate::channel::BackgroundHandle;

/// Drives discovery and the annotation lifecycle for one document.
///
/// Owns the live-annotation registry through its [`AnnotationManager`];
/// reply generation goes through the background channel.
pub struct ContentAgent<S: OverlaySurface> {
    registry: Arc<SiteRegistry>,
    settings: SettingsAccessor,
    background: BackgroundHandle,
    annotations: AnnotationManager<S>,
    /// Descriptor of the last scanned site.
    descriptor: Option<SiteDescriptor>,
}

impl<S: OverlaySurface> ContentAgent<S> {
    pub fn new(
        registry: Arc<SiteRegistry>,
        settings: SettingsAccessor,
        background: BackgroundHandle,
        surface: S,
    ) -> Self {
        Self {
            registry,
            settings,
            background,
            annotations: AnnotationManager::new(surface),
            descriptor: None,
        }
    }

    pub fn annotations(&self) -> &AnnotationManager<S> {
        &self.annotations
    }

    pub fn annotations_mut(&mut self) -> &mut AnnotationManager<S> {
        &mut self.annotations
    }

    async fn load_settings(&self) -> Settings {
        self.settings.load().await.unwrap_or_else(|e| {
            warn!("Settings unavailable, using defaults: {}", e);
            Settings::default()
        })
    }

    /// Answer a page-side request.
    pub async fn handle(&mut self, doc: &dyn DocumentScanner, request: Request) -> Response {
        match request {
            Request::Scan => Response::Scan(self.scan(doc).await),
            Request::GenerateReplyFromSelection { comment, tone } => {
                self.reply_to_selection(doc, &comment, tone).await;
                Response::Ack(Ack::ok())
            }
            other => {
                warn!(kind = other.kind(), "Background request sent to the page side");
                Response::Reply(ReplyResponse::error(format!("Unsupported request: {}", other.kind())))
            }
        }
    }

    /// Scan the document and annotate every candidate.
    ///
    /// Unsupported and disabled sites are left untouched. Otherwise all
    /// previous overlays are removed before any new one is created.
    pub async fn scan(&mut self, doc: &dyn DocumentScanner) -> ScanSummary {
        let hostname = doc.location().hostname.clone();
        let Some(descriptor) = self.registry.resolve(&hostname).await else {
            debug!(hostname = %hostname, "Site not supported, skipping scan");
            return ScanSummary::unsupported();
        };

        let settings = self.load_settings().await;
        if !settings.is_site_enabled(&hostname) {
            info!(hostname = %hostname, "SIWOTI disabled for this site");
            return ScanSummary::disabled();
        }

        self.annotations.clear_all();
        let candidates = extract(doc, Some(&descriptor));
        self.descriptor = Some(descriptor);
        if candidates.is_empty() {
            info!(hostname = %hostname, "No comments found");
            return ScanSummary::empty();
        }

        let count = self.annotations.annotate(doc, &candidates, settings.tone());
        let worst = pick_worst(&candidates).map(|(candidate, score)| {
            debug!(score, "Worst candidate");
            candidate.text.clone()
        });
        ScanSummary::found(count, worst)
    }

    /// Generate a reply for one control and render the result.
    ///
    /// Returns the result panel. The call is not cancellable; the control
    /// stays disabled until the background side answers. Controls the page
    /// removed since the last call are released first.
    pub async fn activate(
        &mut self,
        doc: &dyn DocumentScanner,
        control: OverlayId,
    ) -> Result<OverlayId, AnnotationError> {
        self.annotations.observe_removals();
        let ticket = self.annotations.activate(control)?;
        let article = extract_article_context(
            doc,
            self.descriptor.as_ref().and_then(|d| d.article.as_ref()),
        );
        let request = ReplyRequest::new(ticket.comment, ticket.tone).with_article_context(article);

        let outcome = match self.background.generate_reply(request).await {
            ReplyResponse::Success { reply, cached } => Ok(GeneratedReply { reply, cached }),
            ReplyResponse::Failure { error } => Err(error),
        };
        self.annotations.complete(control, outcome)
    }

    /// Reply to text the user selected, shown in a centered panel.
    ///
    /// Blank selections are ignored. The tone falls back to the stored tone.
    pub async fn reply_to_selection(
        &mut self,
        doc: &dyn DocumentScanner,
        text: &str,
        tone: Option<Tone>,
    ) -> Option<OverlayId> {
        if text.trim().is_empty() {
            debug!("Empty selection ignored");
            return None;
        }
        self.annotations.clear_all();

        let tone = match tone {
            Some(tone) => tone,
            None => self.load_settings().await.tone(),
        };
        let descriptor = self.registry.resolve(&doc.location().hostname).await;
        let article = extract_article_context(doc, descriptor.as_ref().and_then(|d| d.article.as_ref()));
        let request = ReplyRequest::new(text, tone).with_article_context(article);

        let view = match self.background.generate_reply(request).await {
            ReplyResponse::Success { reply, cached } => {
                let mut title = format!("Suggested reply ({})", tone);
                if cached {
                    title.push_str(" [cached]");
                }
                PanelView::reply(reply, cached)
                    .with_title(title)
                    .with_actions(vec![PanelAction::Copy, PanelAction::Close])
            }
            ReplyResponse::Failure { error } => PanelView::error(error).with_title("Error"),
        };
        Some(self.annotations.show_centered_panel(&view))
    }
}

#[cfg(test)]
#[path = "content_tests.rs"]
mod tests;
