//! Content retrieval: turns a validated URL into a [`ContentDocument`].

use thiserror::Error;
use url::Url;

use crate::scraper::{PageSource, ScraperError};
use crate::source::{classify, ContentSource, SourceError};
use crate::transcript::{join_fragments, TranscriptError, TranscriptSource};

/// Every way fetching can fail, reported as a single retrieval failure
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("content retrieval failed: {0}")]
    Source(#[from] SourceError),
    #[error("content retrieval failed: {0}")]
    Transcript(#[from] TranscriptError),
    #[error("content retrieval failed: {0}")]
    Page(#[from] ScraperError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Transcript,
    WebPage,
}

/// Text pulled from a URL, ready to be summarized
#[derive(Debug, Clone)]
pub struct ContentDocument {
    pub source_url: String,
    pub kind: DocumentKind,
    pub title: Option<String>,
    pub text: String,
}

pub struct ContentFetcher<T, P> {
    transcripts: T,
    pages: P,
}

impl<T: TranscriptSource, P: PageSource> ContentFetcher<T, P> {
    pub fn new(transcripts: T, pages: P) -> Self {
        Self { transcripts, pages }
    }

    /// Fetch the document behind a URL: a joined transcript for videos,
    /// extracted text for everything else.
    pub async fn fetch(&self, url: &Url) -> Result<ContentDocument, FetchError> {
        match classify(url)? {
            ContentSource::Video { video_id } => {
                let fragments = self.transcripts.fetch(&video_id).await?;
                Ok(ContentDocument {
                    source_url: url.to_string(),
                    kind: DocumentKind::Transcript,
                    title: None,
                    text: join_fragments(&fragments),
                })
            }
            ContentSource::WebPage => {
                let page = self.pages.fetch_page(url).await?;
                Ok(ContentDocument {
                    source_url: page.url,
                    kind: DocumentKind::WebPage,
                    title: page.title,
                    text: page.text,
                })
            }
        }
    }
}
