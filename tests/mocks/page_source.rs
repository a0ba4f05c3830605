use std::sync::{Arc, Mutex};

use gistr::scraper::{PageSource, ScraperError, WebContent};
use url::Url;

#[derive(Clone, Default)]
pub struct MockPages {
    pub title: Option<String>,
    pub text: String,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub status: Option<u16>,
}

impl MockPages {
    pub fn new(title: &str, text: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            text: text.to_string(),
            ..Default::default()
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

impl PageSource for MockPages {
    async fn fetch_page(&self, url: &Url) -> Result<WebContent, ScraperError> {
        self.calls.lock().unwrap().push(url.to_string());
        if let Some(status) = self.status {
            return Err(ScraperError::Status(status));
        }
        Ok(WebContent {
            url: url.to_string(),
            title: self.title.clone(),
            text: self.text.clone(),
        })
    }
}
