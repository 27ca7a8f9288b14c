/// Core error type for the messaging adapter.
///
/// Adapter crates should map their specific failures into this type so the
/// dispatch layer can handle them consistently.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An open marker (button or control tag) is never closed in the
    /// remaining text. Terminal for the whole tokenization call; callers are
    /// expected to hand us well-formed markup.
    #[error("malformed markup: `{marker}` opened at byte {at} is never closed")]
    MalformedMarkup { marker: String, at: usize },

    #[error("unsupported update: {0}")]
    UnsupportedUpdate(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("messenger error: {0}")]
    Messenger(String),
}

pub type Result<T> = std::result::Result<T, Error>;
