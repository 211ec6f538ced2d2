//! Background side: answers reply requests and settings writes.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use siwoti_config::SettingsAccessor;
use siwoti_protocols::{Ack, ReplyRequest, ReplyResponse, Request, Response, SettingsError};
use siwoti_reply::ReplyService;

use crate::channel::{respond, BackgroundHandle, Envelope};

/// Owns the reply service and the settings writer.
///
/// Each `generateReply` runs in its own task, so a slow backend never holds
/// up other requests. Settings writes are applied in arrival order.
#[derive(Clone)]
pub struct BackgroundService {
    replies: Arc<ReplyService>,
    settings: SettingsAccessor,
}

impl BackgroundService {
    pub fn new(replies: Arc<ReplyService>) -> Self {
        let settings = replies.settings().clone();
        Self { replies, settings }
    }

    pub fn replies(&self) -> &Arc<ReplyService> {
        &self.replies
    }

    /// Start the request loop. It ends once every handle is dropped.
    pub fn spawn(self, capacity: usize) -> (BackgroundHandle, JoinHandle<()>) {
        let (handle, rx) = BackgroundHandle::channel(capacity);
        let task = tokio::spawn(self.run(rx));
        (handle, task)
    }

    pub async fn run(self, mut rx: mpsc::Receiver<Envelope>) {
        info!("Background service started");
        while let Some(Envelope { request, respond_to }) = rx.recv().await {
            debug!(kind = request.kind(), "Request received");
            match request {
                Request::GenerateReply(request) => {
                    let replies = self.replies.clone();
                    tokio::spawn(async move {
                        let response = Self::reply(&replies, &request).await;
                        respond(respond_to, Response::Reply(response));
                    });
                }
                request => {
                    let response = self.handle(request).await;
                    respond(respond_to, response);
                }
            }
        }
        info!("Background service stopped");
    }

    /// Answer one request inline.
    pub async fn handle(&self, request: Request) -> Response {
        match request {
            Request::GenerateReply(request) => Response::Reply(Self::reply(&self.replies, &request).await),
            Request::SaveApiKey { api_key } => self.ack(self.settings.save_api_key(&api_key).await),
            Request::SaveApiBase { api_base } => self.ack(self.settings.save_api_base(&api_base).await),
            Request::SaveModel { model } => self.ack(self.settings.save_model(&model).await),
            Request::SaveTone { tone } => self.ack(self.settings.save_tone(tone).await),
            Request::SetSiteEnabled { hostname, enabled } => {
                self.ack(self.settings.set_site_enabled(&hostname, enabled).await)
            }
            other @ (Request::Scan | Request::GenerateReplyFromSelection { .. }) => {
                warn!(kind = other.kind(), "Page request sent to the background side");
                Response::Reply(ReplyResponse::error(format!(
                    "Unsupported request: {}",
                    other.kind()
                )))
            }
        }
    }

    async fn reply(replies: &ReplyService, request: &ReplyRequest) -> ReplyResponse {
        match replies.generate_reply(request).await {
            Ok(generated) => generated.into(),
            Err(e) => {
                error!("Reply generation failed: {}", e);
                ReplyResponse::error(e.to_string())
            }
        }
    }

    fn ack(&self, result: Result<(), SettingsError>) -> Response {
        match result {
            Ok(()) => Response::Ack(Ack::ok()),
            Err(e) => {
                error!("Settings write failed: {}", e);
                Response::Ack(Ack { ok: false })
            }
        }
    }
}

#[cfg(test)]
#[path = "background_tests.rs"]
mod tests;
