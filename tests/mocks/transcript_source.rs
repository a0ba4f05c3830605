use std::sync::{Arc, Mutex};

use gistr::transcript::{TranscriptError, TranscriptFragment, TranscriptSource};

#[derive(Clone, Default)]
pub struct MockTranscripts {
    pub fragments: Vec<TranscriptFragment>,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<String>,
}

impl MockTranscripts {
    pub fn new(texts: &[&str]) -> Self {
        let fragments = texts
            .iter()
            .enumerate()
            .map(|(i, text)| TranscriptFragment::new(*text, i as f64 * 2.0, 2.0))
            .collect();
        Self {
            fragments,
            ..Default::default()
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Default::default()
        }
    }
}

impl TranscriptSource for MockTranscripts {
    async fn fetch(&self, video_id: &str) -> Result<Vec<TranscriptFragment>, TranscriptError> {
        self.calls.lock().unwrap().push(video_id.to_string());
        if let Some(ref msg) = self.fail_with {
            return Err(TranscriptError::Fetch(msg.clone()));
        }
        Ok(self.fragments.clone())
    }
}
