//! # gistr
//!
//! A TUI for summarizing YouTube videos and web pages with hosted LLMs.
//!
//! ## Features
//!
//! - **Video transcripts**: `youtube.com/watch?v=` and `youtu.be/` links are
//!   summarized from their captions
//! - **Web pages**: anything else is fetched and reduced to its readable text
//! - **Provider choice**: Groq (default) or Gemini, selected in `gistr.toml`
//!
//! Each action runs one linear pipeline, see [`pipeline::Pipeline::run`].

pub mod agent;
pub mod config;
pub mod content;
pub mod logging;
pub mod pipeline;
pub mod prompts;
pub mod scraper;
pub mod source;
pub mod summary;
pub mod transcript;
pub mod ui;
pub mod validate;

pub use config::Config;
pub use content::{ContentDocument, ContentFetcher};
pub use pipeline::{ErrorCategory, LivePipeline, Pipeline, Stage, SummarizeError};
pub use summary::Summary;
