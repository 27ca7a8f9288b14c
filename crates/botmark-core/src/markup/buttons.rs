//! Inline-button tokenizer: lifts `[button|id|label|action]` markers and
//! `[row]` separators out of a reply, leaving clean display text.

use serde::{Deserialize, Serialize};

use crate::{syntax::MarkupSyntax, Error, Result};

/// One tokenized marker, in source order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonSpec {
    /// A pressable button: display label plus its callback action string.
    Action { label: String, action: String },
    /// Ends the current keyboard row.
    RowBreak,
}

/// Tokenizer output: display text with all markers removed, plus the markers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizedReply {
    pub display: String,
    pub buttons: Vec<ButtonSpec>,
}

/// Where the next marker (if any) sits relative to the cursor. Row breaks
/// and button opens compete; the smaller index wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ScanState {
    Scanning,
    AtRowBreak { at: usize },
    AtButton { at: usize },
    Done,
}

#[derive(Clone, Debug)]
pub struct ButtonTokenizer {
    syntax: MarkupSyntax,
}

impl ButtonTokenizer {
    pub fn new(syntax: MarkupSyntax) -> Self {
        Self { syntax }
    }

    /// Single left-to-right pass over `text`.
    ///
    /// Fails with [`Error::MalformedMarkup`] when a button open marker has
    /// no matching close marker in the remaining text; every other input is
    /// valid, including empty payloads and adjacent markers.
    pub fn tokenize(&self, text: &str) -> Result<TokenizedReply> {
        let mut display = String::new();
        let mut buttons = Vec::new();
        let mut cursor = 0usize;
        let mut state = ScanState::Scanning;

        loop {
            match state {
                ScanState::Scanning => {
                    state = self.next_marker(text, cursor);
                }
                ScanState::AtRowBreak { at } => {
                    // The separator itself contributes no display text; the
                    // text before it is kept.
                    display.push_str(&text[cursor..at]);
                    buttons.push(ButtonSpec::RowBreak);
                    cursor = at + self.syntax.row_break.len();
                    state = ScanState::Scanning;
                }
                ScanState::AtButton { at } => {
                    display.push_str(&text[cursor..at]);
                    let payload_start = at + self.syntax.button_open.len();
                    let Some(rel) =
                        text[payload_start..].find(self.syntax.button_close.as_str())
                    else {
                        return Err(Error::MalformedMarkup {
                            marker: self.syntax.button_open.clone(),
                            at,
                        });
                    };
                    buttons.push(self.parse_action(&text[payload_start..payload_start + rel]));
                    cursor = payload_start + rel + self.syntax.button_close.len();
                    state = ScanState::Scanning;
                }
                ScanState::Done => {
                    display.push_str(&text[cursor..]);
                    return Ok(TokenizedReply { display, buttons });
                }
            }
        }
    }

    fn next_marker(&self, text: &str, cursor: usize) -> ScanState {
        let rest = &text[cursor..];
        let row = rest.find(self.syntax.row_break.as_str());
        let button = rest.find(self.syntax.button_open.as_str());
        match (row, button) {
            (Some(row), Some(button)) if row < button => ScanState::AtRowBreak { at: cursor + row },
            (_, Some(button)) => ScanState::AtButton { at: cursor + button },
            (Some(row), None) => ScanState::AtRowBreak { at: cursor + row },
            (None, None) => ScanState::Done,
        }
    }

    /// Payload fields are `id|label|action`. The id slot is reserved and
    /// discarded; the action keeps any further separators. Missing fields
    /// come out empty rather than failing.
    fn parse_action(&self, payload: &str) -> ButtonSpec {
        let sep = self.syntax.field_separator;
        let rest = payload.split_once(sep).map(|(_, rest)| rest).unwrap_or("");
        let (label, action) = rest.split_once(sep).unwrap_or((rest, ""));
        ButtonSpec::Action {
            label: label.to_string(),
            action: action.to_string(),
        }
    }
}
