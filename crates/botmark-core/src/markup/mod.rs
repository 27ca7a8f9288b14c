//! The markup tokenizer: competing inline markers over immutable text.
//!
//! Everything in here is a pure, synchronous transformation; independent
//! replies can be tokenized concurrently with no coordination.

pub mod buttons;
pub mod media;
pub mod pages;
pub mod pipeline;
pub mod tags;
