//! Request/response channel between the page side and the background side.
//!
//! Every request travels with a oneshot sender for its response. The
//! background side answers each one exactly once; a dropped sender shows
//! up as [`ChannelError::NoResponse`] on the calling side.

use tokio::sync::{mpsc, oneshot};
use tracing::trace;

use siwoti_protocols::{Ack, ChannelError, ReplyRequest, ReplyResponse, Request, Response};

/// Capacity of the request queue.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// A request paired with the slot for its response.
#[derive(Debug)]
pub struct Envelope {
    pub request: Request,
    pub respond_to: oneshot::Sender<Response>,
}

impl Envelope {
    /// Send the response. A caller that stopped waiting is not an error.
    pub fn respond(self, response: Response) {
        respond(self.respond_to, response);
    }
}

/// Answer through a response slot taken out of its [`Envelope`].
pub fn respond(respond_to: oneshot::Sender<Response>, response: Response) {
    if respond_to.send(response).is_err() {
        trace!("Caller dropped before the response was ready");
    }
}

/// Cloneable sending side of the channel.
#[derive(Debug, Clone)]
pub struct BackgroundHandle {
    tx: mpsc::Sender<Envelope>,
}

impl BackgroundHandle {
    /// A handle and the receiver the background loop reads from.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<Envelope>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }

    /// Send a request and wait for its response.
    pub async fn call(&self, request: Request) -> Result<Response, ChannelError> {
        let kind = request.kind();
        let (respond_to, rx) = oneshot::channel();
        self.tx
            .send(Envelope { request, respond_to })
            .await
            .map_err(|_| ChannelError::Closed)?;
        rx.await.map_err(|_| ChannelError::NoResponse(kind.to_string()))
    }

    /// `generateReply`. Channel failures come back as `{error}` too.
    pub async fn generate_reply(&self, request: ReplyRequest) -> ReplyResponse {
        match self.call(Request::GenerateReply(request)).await {
            Ok(Response::Reply(reply)) => reply,
            Ok(_) => ReplyResponse::error(
                ChannelError::UnexpectedResponse("generateReply".to_string()).to_string(),
            ),
            Err(e) => ReplyResponse::error(e.to_string()),
        }
    }

    /// A settings write; resolves to the acknowledgement.
    pub async fn save(&self, request: Request) -> Result<Ack, ChannelError> {
        let kind = request.kind();
        match self.call(request).await? {
            Response::Ack(ack) => Ok(ack),
            _ => Err(ChannelError::UnexpectedResponse(kind.to_string())),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use siwoti_protocols::Tone;

    #[tokio::test]
    async fn test_round_trip() {
        let (handle, mut rx) = BackgroundHandle::channel(4);
        tokio::spawn(async move {
            while let Some(envelope) = rx.recv().await {
                envelope.respond(Response::Ack(Ack::ok()));
            }
        });

        let ack = handle
            .save(Request::SaveModel { model: "m".to_string() })
            .await
            .unwrap();
        assert!(ack.ok);
    }

    #[tokio::test]
    async fn test_closed_channel() {
        let (handle, rx) = BackgroundHandle::channel(1);
        drop(rx);
        assert!(handle.is_closed());
        let err = handle.call(Request::Scan).await.unwrap_err();
        assert!(matches!(err, ChannelError::Closed));
    }

    #[tokio::test]
    async fn test_dropped_responder() {
        let (handle, mut rx) = BackgroundHandle::channel(1);
        tokio::spawn(async move {
            // Receive and drop without answering.
            let _ = rx.recv().await;
        });
        let response = handle
            .generate_reply(ReplyRequest::new("hi", Tone::Funny))
            .await;
        assert_eq!(
            response.error_message(),
            Some("Receiver dropped before responding to generateReply")
        );
    }

    #[tokio::test]
    async fn test_unexpected_response() {
        let (handle, mut rx) = BackgroundHandle::channel(1);
        tokio::spawn(async move {
            if let Some(envelope) = rx.recv().await {
                envelope.respond(Response::Ack(Ack::ok()));
            }
        });
        let response = handle
            .generate_reply(ReplyRequest::new("hi", Tone::Funny))
            .await;
        assert!(!response.is_success());
    }
}
