//! Messenger-facing layer: outbound planning, the port seam, incoming
//! update parsing.

pub mod dispatch;
pub mod port;
pub mod types;
