//! Outbound planning and the sequential dispatch loop.

use tracing::{debug, warn};

use crate::{
    domain::{ChatId, MessageRef},
    keyboard::KeyboardLayout,
    markup::{
        media::Segment,
        pipeline::{RenderedReply, ReplyPipeline},
    },
    messaging::{
        port::MessengerPort,
        types::{MediaKind, OutboundMessage, OutboundPayload, SendReceipt},
    },
    syntax::MarkupSyntax,
    Result,
};

/// One outbound message per segment, in order; the keyboard rides on the
/// last message only. A reply with no segments plans nothing, and a
/// keyboard with no message body to carry it is dropped.
pub fn plan_send(reply: &RenderedReply) -> Vec<OutboundMessage> {
    let keyboard = keyboard_of(reply);
    if reply.segments.is_empty() {
        if keyboard.is_some() {
            warn!("reply has a keyboard but no message body; dropping the keyboard");
        }
        return Vec::new();
    }

    let mut plan: Vec<OutboundMessage> = reply
        .segments
        .iter()
        .map(|segment| OutboundMessage {
            payload: send_payload(segment),
            keyboard: None,
        })
        .collect();
    if let Some(last) = plan.last_mut() {
        last.keyboard = keyboard;
    }
    plan
}

/// The single payload an edit can apply. A media head takes the immediately
/// following text segment as its caption; segments beyond that cannot be
/// expressed by an edit and are discarded.
pub fn plan_edit(reply: &RenderedReply) -> Option<OutboundMessage> {
    let mut segments = reply.segments.iter();
    let first = segments.next()?;

    let payload = match first {
        Segment::Text(body) => OutboundPayload::Text { body: body.clone() },
        Segment::Media(url) => {
            let caption = match segments.next() {
                Some(Segment::Text(text)) => Some(text.clone()),
                _ => None,
            };
            media_payload(url, caption)
        }
    };

    Some(OutboundMessage {
        payload,
        keyboard: keyboard_of(reply),
    })
}

fn keyboard_of(reply: &RenderedReply) -> Option<KeyboardLayout> {
    (!reply.keyboard.is_empty()).then(|| reply.keyboard.clone())
}

fn send_payload(segment: &Segment) -> OutboundPayload {
    match segment {
        Segment::Text(body) => OutboundPayload::Text { body: body.clone() },
        Segment::Media(url) => media_payload(url, None),
    }
}

fn media_payload(url: &str, caption: Option<String>) -> OutboundPayload {
    match MediaKind::classify(url) {
        Some(kind) => OutboundPayload::Media {
            kind,
            url: url.to_string(),
            caption,
        },
        // Unrecognized extension: the URL goes out as plain text.
        None => OutboundPayload::Text {
            body: url.to_string(),
        },
    }
}

/// Renders, plans, and drives replies through a messenger port.
pub struct ReplyDispatcher {
    pipeline: ReplyPipeline,
}

impl ReplyDispatcher {
    pub fn new(syntax: MarkupSyntax) -> Self {
        Self {
            pipeline: ReplyPipeline::new(syntax),
        }
    }

    pub fn pipeline(&self) -> &ReplyPipeline {
        &self.pipeline
    }

    /// Render `raw` and send it as sequential messages. The receipt carries
    /// the extracted control tags so the caller can correlate conversation
    /// state with what was sent.
    pub async fn send_reply(
        &self,
        port: &dyn MessengerPort,
        chat_id: ChatId,
        raw: &str,
    ) -> Result<SendReceipt> {
        let reply = self.pipeline.render(raw)?;
        let plan = plan_send(&reply);
        debug!(
            segments = reply.segments.len(),
            messages = plan.len(),
            buttons = reply.keyboard.button_count(),
            "dispatching reply"
        );

        let mut messages = Vec::with_capacity(plan.len());
        for message in &plan {
            messages.push(port.send(chat_id, message).await?);
        }

        Ok(SendReceipt {
            tags: reply.tags,
            messages,
        })
    }

    /// Render `raw` and edit `target` with the single planned message.
    /// Returns whether anything was edited.
    pub async fn edit_reply(
        &self,
        port: &dyn MessengerPort,
        target: MessageRef,
        raw: &str,
    ) -> Result<bool> {
        let reply = self.pipeline.render(raw)?;
        let Some(message) = plan_edit(&reply) else {
            warn!("reply renders to no message body; nothing to edit");
            return Ok(false);
        };

        port.edit(target, &message).await?;
        Ok(true)
    }
}
