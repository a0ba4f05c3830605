//! The summarize action: validate, fetch, summarize.
//!
//! One run walks `Idle -> Validating -> Fetching -> Summarizing -> Done`, or
//! jumps to `Failed` from whichever stage broke. Nothing is retried.

use std::fmt;

use thiserror::Error;

use crate::agent::{self, AgentError, LanguageModel, LlmClient, Summary};
use crate::config::Config;
use crate::content::{ContentDocument, ContentFetcher, FetchError};
use crate::scraper::{PageSource, ScraperError, WebScraper};
use crate::transcript::{TranscriptError, TranscriptSource, YouTubeTranscripts};
use crate::validate::{validate_input, validate_url};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Validating,
    Fetching,
    Summarizing,
    Done,
    Failed,
}

impl Stage {
    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Done | Stage::Failed)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::Idle => "idle",
            Stage::Validating => "validating input",
            Stage::Fetching => "fetching content",
            Stage::Summarizing => "summarizing",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// User-visible error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    MissingInput,
    MalformedUrl,
    ProcessingFailure,
}

#[derive(Error, Debug)]
pub enum SummarizeError {
    #[error("Please provide both an API key and a valid URL.")]
    MissingInput,
    #[error("Invalid URL. Please enter a valid YouTube or website link.")]
    MalformedUrl(String),
    #[error(transparent)]
    Retrieval(#[from] FetchError),
    #[error("summarization failed: {0}")]
    Summarization(#[from] AgentError),
}

impl SummarizeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SummarizeError::MissingInput => ErrorCategory::MissingInput,
            SummarizeError::MalformedUrl(_) => ErrorCategory::MalformedUrl,
            SummarizeError::Retrieval(_) | SummarizeError::Summarization(_) => {
                ErrorCategory::ProcessingFailure
            }
        }
    }

    /// Message shown to the user for this error
    pub fn headline(&self) -> String {
        match self.category() {
            ErrorCategory::ProcessingFailure => "An error occurred during processing.".to_string(),
            _ => self.to_string(),
        }
    }

    /// The underlying failure, shown under the headline for processing failures
    pub fn detail(&self) -> Option<String> {
        match self {
            SummarizeError::Retrieval(e) => Some(e.to_string()),
            SummarizeError::Summarization(e) => Some(e.to_string()),
            _ => None,
        }
    }
}

/// Failure to build the live clients
#[derive(Error, Debug)]
pub enum SetupError {
    #[error(transparent)]
    Transcript(#[from] TranscriptError),
    #[error(transparent)]
    Scraper(#[from] ScraperError),
    #[error(transparent)]
    Agent(#[from] AgentError),
}

pub struct Pipeline<T, P, M> {
    fetcher: ContentFetcher<T, P>,
    llm: M,
}

impl<T, P, M> Pipeline<T, P, M>
where
    T: TranscriptSource,
    P: PageSource,
    M: LanguageModel,
{
    pub fn new(fetcher: ContentFetcher<T, P>, llm: M) -> Self {
        Self { fetcher, llm }
    }

    pub fn model(&self) -> &str {
        self.llm.model()
    }

    /// Validate input and fetch the document without summarizing it
    pub async fn fetch_document(&self, url: &str) -> Result<ContentDocument, SummarizeError> {
        let url = validate_url(url)?;
        Ok(self.fetcher.fetch(&url).await?)
    }

    /// Run the full action, reporting every stage transition to `on_stage`.
    pub async fn run<F>(
        &self,
        api_key: &str,
        url: &str,
        mut on_stage: F,
    ) -> Result<Summary, SummarizeError>
    where
        F: FnMut(Stage),
    {
        let result = self.run_stages(api_key, url, &mut on_stage).await;

        match &result {
            Ok(summary) => {
                tracing::info!(url = %summary.source_url, chars = summary.text.len(), "summary generated");
                on_stage(Stage::Done);
            }
            Err(e) => {
                tracing::warn!(error = %e, "summarize action failed");
                on_stage(Stage::Failed);
            }
        }

        result
    }

    async fn run_stages<F>(
        &self,
        api_key: &str,
        url: &str,
        on_stage: &mut F,
    ) -> Result<Summary, SummarizeError>
    where
        F: FnMut(Stage),
    {
        on_stage(Stage::Validating);
        let url = validate_input(api_key, url)?;

        on_stage(Stage::Fetching);
        let document = self.fetcher.fetch(&url).await?;
        tracing::debug!(url = %url, kind = ?document.kind, chars = document.text.len(), "document ready");

        on_stage(Stage::Summarizing);
        let summary = agent::summarize(&self.llm, api_key.trim(), &document).await?;

        Ok(summary)
    }
}

/// The pipeline wired to YouTube, the web and the configured LLM provider
pub type LivePipeline = Pipeline<YouTubeTranscripts, WebScraper, LlmClient>;

impl LivePipeline {
    pub fn from_config(config: &Config) -> Result<Self, SetupError> {
        let transcripts = YouTubeTranscripts::new(config.fetch.transcript_languages.clone())?;
        let pages = WebScraper::new(&config.fetch)?;
        let llm = LlmClient::from_config(&config.agent)?;

        Ok(Pipeline::new(ContentFetcher::new(transcripts, pages), llm))
    }
}
