//! Summary struct - the text returned by the language model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A generated summary. The text is the model's response, unmodified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    /// Bullet-point text from the model
    pub text: String,
    /// URL the content came from
    pub source_url: String,
    /// Model that produced the summary
    pub model: String,
    pub created_at: DateTime<Utc>,
}

impl Summary {
    /// Create a new summary
    pub fn new(text: String, source_url: String, model: String) -> Self {
        Self {
            text,
            source_url,
            model,
            created_at: Utc::now(),
        }
    }

    /// The bullet lines of the summary, markers stripped
    pub fn bullet_points(&self) -> Vec<&str> {
        self.text
            .lines()
            .map(str::trim)
            .filter_map(|line| {
                ["• ", "- ", "* "]
                    .iter()
                    .find_map(|marker| line.strip_prefix(marker))
                    .map(str::trim)
            })
            .filter(|point| !point.is_empty())
            .collect()
    }

    /// Check if the summary has any content
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}
