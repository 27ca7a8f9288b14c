//! The canonical reply-processing order.
//!
//! Earlier implementations of this markup disagreed on ordering (buttons
//! before or after page breaks, control tags sometimes never stripped).
//! This module is the one contract: strip control tags, normalize line
//! breaks, tokenize buttons over the whole reply, split pages, segment
//! media.

use serde::{Deserialize, Serialize};

use crate::{
    keyboard::KeyboardLayout,
    markup::{
        buttons::ButtonTokenizer,
        media::{MediaSegmenter, Segment},
        pages::PageBreakSplitter,
        tags::{Tag, TagExtractor},
    },
    syntax::MarkupSyntax,
    Result,
};

/// Everything the dispatch layer needs to know about one reply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedReply {
    pub tags: Vec<Tag>,
    pub segments: Vec<Segment>,
    pub keyboard: KeyboardLayout,
}

#[derive(Clone, Debug)]
pub struct ReplyPipeline {
    syntax: MarkupSyntax,
    tags: TagExtractor,
    buttons: ButtonTokenizer,
    pages: PageBreakSplitter,
    media: MediaSegmenter,
}

impl ReplyPipeline {
    pub fn new(syntax: MarkupSyntax) -> Self {
        Self {
            tags: TagExtractor::new(syntax.clone()),
            buttons: ButtonTokenizer::new(syntax.clone()),
            pages: PageBreakSplitter::new(syntax.clone()),
            media: MediaSegmenter::new(syntax.clone()),
            syntax,
        }
    }

    /// Render one raw reply. Empty input renders an empty reply; the only
    /// failure is malformed markup.
    pub fn render(&self, raw: &str) -> Result<RenderedReply> {
        let (without_tags, tags) = self.tags.strip_control_tags(raw)?;
        let text = without_tags.replace(self.syntax.line_break.as_str(), "\n");

        let tokenized = self.buttons.tokenize(&text)?;
        let keyboard = KeyboardLayout::build(&tokenized.buttons);

        let mut segments = Vec::new();
        for page in self.pages.split(&tokenized.display) {
            segments.extend(self.media.segment(page));
        }

        Ok(RenderedReply {
            tags,
            segments,
            keyboard,
        })
    }
}
