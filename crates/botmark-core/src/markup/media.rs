//! Raw-URL detection and media segmentation.

use serde::{Deserialize, Serialize};

use crate::syntax::MarkupSyntax;

/// One renderable unit of a reply, in source order. Never empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    Text(String),
    /// A raw URL token, to be sent as an attachment reference.
    Media(String),
}

/// Decides whether a span contains an unlinked ("raw") URL.
#[derive(Clone, Debug)]
pub struct MediaClassifier {
    syntax: MarkupSyntax,
}

impl MediaClassifier {
    pub fn new(syntax: MarkupSyntax) -> Self {
        Self { syntax }
    }

    /// Count-based heuristic, not an HTML parser: a well-formed anchor
    /// consumes exactly one URL occurrence, so any surplus URL is raw.
    pub fn is_media_message(&self, text: &str) -> bool {
        let raw = text.matches(self.syntax.raw_url.as_str()).count();
        if raw == 0 {
            return false;
        }
        let anchored = text.matches(self.syntax.anchor.as_str()).count();
        raw > anchored
    }
}

/// Splits one page into leading text, URL token, and trailing caption.
#[derive(Clone, Debug)]
pub struct MediaSegmenter {
    syntax: MarkupSyntax,
    classifier: MediaClassifier,
}

impl MediaSegmenter {
    pub fn new(syntax: MarkupSyntax) -> Self {
        let classifier = MediaClassifier::new(syntax.clone());
        Self { syntax, classifier }
    }

    /// Segment one page.
    ///
    /// Only the first raw URL is split out as media; further URLs stay
    /// embedded in the caption text. A blank page yields nothing at all, a
    /// non-media page passes through as a single text segment.
    pub fn segment(&self, page: &str) -> Vec<Segment> {
        if page.trim().is_empty() {
            return Vec::new();
        }
        if !self.classifier.is_media_message(page) {
            return vec![Segment::Text(page.to_string())];
        }
        let Some(start) = page.find(self.syntax.raw_url.as_str()) else {
            // Unreachable once the classifier said yes; keep the page whole.
            return vec![Segment::Text(page.to_string())];
        };

        let mut segments = Vec::new();

        let front = page[..start].trim_end();
        if !front.is_empty() {
            segments.push(Segment::Text(front.to_string()));
        }

        // The URL token runs to the next whitespace character, or to the
        // end of the page when there is none.
        let rest = &page[start..];
        match rest.find(char::is_whitespace) {
            None => segments.push(Segment::Media(rest.to_string())),
            Some(token_end) => {
                segments.push(Segment::Media(rest[..token_end].to_string()));
                let caption = rest[token_end..].trim();
                if !caption.is_empty() {
                    segments.push(Segment::Text(caption.to_string()));
                }
            }
        }

        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> MediaClassifier {
        MediaClassifier::new(MarkupSyntax::default())
    }

    fn segmenter() -> MediaSegmenter {
        MediaSegmenter::new(MarkupSyntax::default())
    }

    #[test]
    fn text_without_url_is_not_media() {
        assert!(!classifier().is_media_message("just words"));
    }

    #[test]
    fn anchored_url_is_not_media() {
        let text = r#"see <a href="http://x.com">the site</a>"#;
        assert!(!classifier().is_media_message(text));
    }

    #[test]
    fn surplus_raw_url_is_media() {
        let text = r#"<a href="http://x.com">site</a> http://x.com/pic.png"#;
        assert!(classifier().is_media_message(text));
    }

    #[test]
    fn plain_page_passes_through_unchanged() {
        let segments = segmenter().segment(" keep  spacing ");
        assert_eq!(segments, vec![Segment::Text(" keep  spacing ".to_string())]);
    }

    #[test]
    fn blank_page_yields_no_segments() {
        assert!(segmenter().segment("").is_empty());
        assert!(segmenter().segment("   \n ").is_empty());
    }

    #[test]
    fn splits_front_media_and_caption() {
        let segments = segmenter().segment("Look:  http://a.b/c.png  nice shot ");
        assert_eq!(
            segments,
            vec![
                Segment::Text("Look:".to_string()),
                Segment::Media("http://a.b/c.png".to_string()),
                Segment::Text("nice shot".to_string()),
            ]
        );
    }

    #[test]
    fn url_without_trailing_whitespace_runs_to_end() {
        let segments = segmenter().segment("see http://a.b/c");
        assert_eq!(
            segments,
            vec![
                Segment::Text("see".to_string()),
                Segment::Media("http://a.b/c".to_string()),
            ]
        );
    }

    #[test]
    fn newline_ends_the_url_token() {
        let segments = segmenter().segment("http://a.b/c.png\ncaption");
        assert_eq!(
            segments,
            vec![
                Segment::Media("http://a.b/c.png".to_string()),
                Segment::Text("caption".to_string()),
            ]
        );
    }

    #[test]
    fn only_first_url_splits_out() {
        let segments = segmenter().segment("http://a.png http://b.png");
        assert_eq!(
            segments,
            vec![
                Segment::Media("http://a.png".to_string()),
                Segment::Text("http://b.png".to_string()),
            ]
        );
    }
}
