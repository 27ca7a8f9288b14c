//! The inline markup language: one immutable set of marker literals.
//!
//! The markers are plain substrings, not a grammar. Scanning is always
//! left-to-right and first-match-wins; there is no escaping, so marker text
//! inside another marker's payload is taken at face value.

/// Marker literals recognized by the tokenizer components.
///
/// Passed explicitly into every component constructor; the [`Default`] value
/// is the canonical set and the only one used in production.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkupSyntax {
    /// Splits one reply into sequential messages.
    pub page_break: String,
    /// Opens an inline button; the payload runs to the next `button_close`.
    pub button_open: String,
    pub button_close: String,
    /// Separates the payload fields of buttons and control tags.
    pub field_separator: char,
    /// Ends the current keyboard row.
    pub row_break: String,
    /// A URL not wrapped in an anchor counts as an attachment reference.
    pub raw_url: String,
    /// An anchored URL is a plain link, not an attachment.
    pub anchor: String,
    /// Opens a `message` control tag; the name runs to the next `tag_close`.
    pub message_tag_open: String,
    /// Opens a `refresh` control tag.
    pub refresh_tag_open: String,
    pub tag_close: String,
    /// Normalized to `\n` before tokenizing.
    pub line_break: String,
}

impl Default for MarkupSyntax {
    fn default() -> Self {
        Self {
            page_break: "[pagebreak]".to_string(),
            button_open: "[button|".to_string(),
            button_close: "]".to_string(),
            field_separator: '|',
            row_break: "[row]".to_string(),
            raw_url: "http".to_string(),
            anchor: "<a href".to_string(),
            message_tag_open: "[message|".to_string(),
            refresh_tag_open: "[refresh|".to_string(),
            tag_close: "]".to_string(),
            line_break: "<br/>".to_string(),
        }
    }
}
