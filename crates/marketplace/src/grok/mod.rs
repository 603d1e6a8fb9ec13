//! Chat-completions client for the xAI Grok API.
//!
//! The API is OpenAI-compatible: a list of role-tagged messages goes in, the
//! first choice's message content comes out. User messages may mix text and
//! `image_url` parts, which is how artwork images reach the model.
//!
//! Every AI feature in the marketplace (pricing, feedback, enhancement chat,
//! matchmaking, search ranking and suggestions) goes through [`GrokClient`].

mod client;
mod error;
mod types;

pub use client::{ChatOptions, GrokClient};
pub use error::GrokError;
pub use types::{ChatMessage, ContentPart, ImageUrl, MessageContent, Role};
