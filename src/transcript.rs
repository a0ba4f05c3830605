//! Video transcript retrieval.
//!
//! The transcript service hands back timed fragments; only their text ends up
//! in the document.

use std::future::Future;

use thiserror::Error;
use yt_transcript_rs::api::YouTubeTranscriptApi;

#[derive(Error, Debug)]
pub enum TranscriptError {
    #[error("transcript client could not be created: {0}")]
    Client(String),
    #[error("Transcript extraction failed: {0}")]
    Fetch(String),
}

/// One timed piece of a transcript
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptFragment {
    pub text: String,
    /// Offset into the video, in seconds
    pub start: f64,
    /// Length, in seconds
    pub duration: f64,
}

impl TranscriptFragment {
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }
}

pub trait TranscriptSource {
    /// Fetch the ordered transcript fragments for a video
    fn fetch(
        &self,
        video_id: &str,
    ) -> impl Future<Output = Result<Vec<TranscriptFragment>, TranscriptError>>;
}

/// Join fragment texts, in order, separated by single spaces.
pub fn join_fragments(fragments: &[TranscriptFragment]) -> String {
    fragments
        .iter()
        .map(|fragment| fragment.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Transcripts from YouTube's caption tracks
pub struct YouTubeTranscripts {
    api: YouTubeTranscriptApi,
    languages: Vec<String>,
}

impl YouTubeTranscripts {
    pub fn new(languages: Vec<String>) -> Result<Self, TranscriptError> {
        let api = YouTubeTranscriptApi::new(None, None, None)
            .map_err(|e| TranscriptError::Client(e.to_string()))?;
        Ok(Self { api, languages })
    }
}

impl TranscriptSource for YouTubeTranscripts {
    async fn fetch(&self, video_id: &str) -> Result<Vec<TranscriptFragment>, TranscriptError> {
        let languages: Vec<&str> = self.languages.iter().map(String::as_str).collect();
        tracing::debug!(video_id, ?languages, "fetching transcript");

        let transcript = self
            .api
            .fetch_transcript(video_id, &languages, false)
            .await
            .map_err(|e| TranscriptError::Fetch(e.to_string()))?;

        tracing::info!(
            video_id,
            language = %transcript.language_code,
            fragments = transcript.snippets.len(),
            "transcript fetched"
        );

        Ok(transcript
            .snippets
            .into_iter()
            .map(|snippet| TranscriptFragment::new(snippet.text, snippet.start, snippet.duration))
            .collect())
    }
}
