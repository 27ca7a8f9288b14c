//! Core domain + application logic for the botmark messaging adapter.
//!
//! The interesting part lives in [`markup`]: a tokenizer that turns an
//! author-written reply string (page breaks, inline buttons, row breaks, raw
//! media URLs, control tags) into ordered segments and a keyboard grid.
//! Everything downstream of it is data shaping; the actual messenger lives
//! behind a port (trait) implemented in adapter crates.

pub mod domain;
pub mod errors;
pub mod keyboard;
pub mod logging;
pub mod markup;
pub mod menu;
pub mod messaging;
pub mod syntax;

pub use errors::{Error, Result};
