//! URL classification: YouTube video or generic web page.

use thiserror::Error;
use url::Url;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("Could not extract video ID from URL.")]
    MissingVideoId,
}

/// Where the content for a URL comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    /// A YouTube video, summarized from its transcript
    Video { video_id: String },
    /// Any other page, summarized from its extracted text
    WebPage,
}

/// Whether the URL points at a video host we pull transcripts from
pub fn is_video_url(url: &Url) -> bool {
    let raw = url.as_str();
    raw.contains("youtube.com") || raw.contains("youtu.be")
}

/// Classify a URL, extracting the video identifier for video URLs
pub fn classify(url: &Url) -> Result<ContentSource, SourceError> {
    if !is_video_url(url) {
        return Ok(ContentSource::WebPage);
    }

    extract_video_id(url)
        .map(|video_id| ContentSource::Video { video_id })
        .ok_or(SourceError::MissingVideoId)
}

/// Extract the video identifier from `youtube.com/...?v=<id>` or `youtu.be/<id>`
pub fn extract_video_id(url: &Url) -> Option<String> {
    let raw = url.as_str();

    let video_id = if raw.contains("youtube.com") {
        url.query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned())
    } else if raw.contains("youtu.be") {
        Some(url.path().trim_start_matches('/').to_string())
    } else {
        None
    };

    video_id.filter(|id| !id.is_empty())
}
