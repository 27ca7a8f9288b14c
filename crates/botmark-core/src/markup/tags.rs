//! Control-tag handling (`[message|name]`, `[refresh|name]`).

use serde::{Deserialize, Serialize};

use crate::{syntax::MarkupSyntax, Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagKind {
    Message,
    Refresh,
}

/// A control tag lifted out of a reply. The name correlates the sent message
/// with bot conversation state; it never reaches the user-visible text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub kind: TagKind,
    pub name: String,
}

/// Finds, reads, and strips control tags.
///
/// Single-shot by contract: every operation touches only the first
/// occurrence of the kind it is given; callers re-invoke to take more.
#[derive(Clone, Debug)]
pub struct TagExtractor {
    syntax: MarkupSyntax,
}

struct TagSpan<'t> {
    start: usize,
    /// Past the close marker.
    end: usize,
    name: &'t str,
}

impl TagExtractor {
    pub fn new(syntax: MarkupSyntax) -> Self {
        Self { syntax }
    }

    /// Whether a tag of `kind` appears anywhere in `text`.
    pub fn contains(&self, text: &str, kind: TagKind) -> bool {
        text.contains(self.open_marker(kind))
    }

    /// The name of the first tag of `kind`, without touching `text`.
    pub fn extract(&self, text: &str, kind: TagKind) -> Result<Option<String>> {
        Ok(self.locate(text, kind)?.map(|span| span.name.to_string()))
    }

    /// `text` with the first tag of `kind` removed, open marker through
    /// close marker inclusive.
    pub fn strip(&self, text: &str, kind: TagKind) -> Result<String> {
        match self.locate(text, kind)? {
            Some(span) => Ok(format!("{}{}", &text[..span.start], &text[span.end..])),
            None => Ok(text.to_string()),
        }
    }

    /// Strip the first `message` tag and the first `refresh` tag, reporting
    /// what was removed in source-position order.
    pub fn strip_control_tags(&self, text: &str) -> Result<(String, Vec<Tag>)> {
        let mut found: Vec<(usize, Tag)> = Vec::new();
        for kind in [TagKind::Message, TagKind::Refresh] {
            if let Some(span) = self.locate(text, kind)? {
                found.push((
                    span.start,
                    Tag {
                        kind,
                        name: span.name.to_string(),
                    },
                ));
            }
        }
        found.sort_by_key(|(start, _)| *start);

        let without_message = self.strip(text, TagKind::Message)?;
        let stripped = self.strip(&without_message, TagKind::Refresh)?;

        Ok((stripped, found.into_iter().map(|(_, tag)| tag).collect()))
    }

    fn open_marker(&self, kind: TagKind) -> &str {
        match kind {
            TagKind::Message => &self.syntax.message_tag_open,
            TagKind::Refresh => &self.syntax.refresh_tag_open,
        }
    }

    fn locate<'t>(&self, text: &'t str, kind: TagKind) -> Result<Option<TagSpan<'t>>> {
        let open = self.open_marker(kind);
        let Some(start) = text.find(open) else {
            return Ok(None);
        };

        // The close marker only counts after the open marker; a stray `]`
        // earlier in the text must not terminate the name.
        let name_start = start + open.len();
        let Some(rel) = text[name_start..].find(self.syntax.tag_close.as_str()) else {
            return Err(Error::MalformedMarkup {
                marker: open.to_string(),
                at: start,
            });
        };

        Ok(Some(TagSpan {
            start,
            end: name_start + rel + self.syntax.tag_close.len(),
            name: &text[name_start..name_start + rel],
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> TagExtractor {
        TagExtractor::new(MarkupSyntax::default())
    }

    #[test]
    fn extracts_state_name() {
        let name = extractor()
            .extract("[message|state1]Hello", TagKind::Message)
            .unwrap();
        assert_eq!(name.as_deref(), Some("state1"));
    }

    #[test]
    fn strips_tag_from_message() {
        let out = extractor()
            .strip("[message|state1]Hello", TagKind::Message)
            .unwrap();
        assert_eq!(out, "Hello");
    }

    #[test]
    fn strips_first_occurrence_only() {
        let out = extractor()
            .strip("[refresh|a]x[refresh|b]", TagKind::Refresh)
            .unwrap();
        assert_eq!(out, "x[refresh|b]");
    }

    #[test]
    fn leaves_text_without_tag_untouched() {
        let ex = extractor();
        assert_eq!(ex.strip("plain text", TagKind::Message).unwrap(), "plain text");
        assert_eq!(ex.extract("plain text", TagKind::Message).unwrap(), None);
    }

    #[test]
    fn close_marker_before_open_is_ignored() {
        let name = extractor()
            .extract("a] [message|st]b", TagKind::Message)
            .unwrap();
        assert_eq!(name.as_deref(), Some("st"));
    }

    #[test]
    fn unterminated_tag_is_malformed() {
        let err = extractor()
            .strip("x[message|oops", TagKind::Message)
            .unwrap_err();
        assert!(matches!(err, Error::MalformedMarkup { at: 1, .. }));
    }

    #[test]
    fn reports_tags_in_source_order() {
        let (out, tags) = extractor()
            .strip_control_tags("[refresh|r]mid[message|m]end")
            .unwrap();
        assert_eq!(out, "midend");
        assert_eq!(
            tags,
            vec![
                Tag {
                    kind: TagKind::Refresh,
                    name: "r".to_string()
                },
                Tag {
                    kind: TagKind::Message,
                    name: "m".to_string()
                },
            ]
        );
    }

    #[test]
    fn detects_tag_presence() {
        let ex = extractor();
        assert!(ex.contains("[refresh|x]", TagKind::Refresh));
        assert!(!ex.contains("[refresh|x]", TagKind::Message));
    }
}
