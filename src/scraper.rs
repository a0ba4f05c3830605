//! Web scraping module for content extraction.
//!
//! Uses reqwest for fetching and scraper for HTML parsing.

use lazy_static::lazy_static;
use reqwest::Client;
use scraper::{Html, Selector};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::config::FetchConfig;

lazy_static! {
    static ref TITLE: Selector = Selector::parse("title").expect("valid selector");
    static ref H1: Selector = Selector::parse("h1").expect("valid selector");
    static ref TEXT_BLOCKS: Selector =
        Selector::parse("p, h1, h2, h3, h4, h5, h6, li").expect("valid selector");
    static ref MAIN_CONTENT: Vec<Selector> =
        ["article", "main", "[role='main']", ".content", "#content"]
            .iter()
            .map(|s| Selector::parse(s).expect("valid selector"))
            .collect();
}

/// Text blocks this short are navigation crumbs, not content
const MIN_BLOCK_CHARS: usize = 20;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("failed to fetch URL: {0}")]
    FetchError(#[from] reqwest::Error),
    #[error("server responded with HTTP {0}")]
    Status(u16),
    #[error("no content found at URL")]
    NoContent,
}

/// Extracted content from a webpage
#[derive(Debug, Clone)]
pub struct WebContent {
    /// The original URL
    pub url: String,
    /// Page title
    pub title: Option<String>,
    /// Main text content
    pub text: String,
}

pub trait PageSource {
    /// Fetch a page and extract its readable text
    fn fetch_page(&self, url: &Url) -> impl Future<Output = Result<WebContent, ScraperError>>;
}

/// reqwest-backed page fetcher
pub struct WebScraper {
    client: Client,
}

impl WebScraper {
    pub fn new(config: &FetchConfig) -> Result<Self, ScraperError> {
        if config.accept_invalid_certs {
            tracing::warn!("TLS certificate verification is disabled for page fetches");
        }

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;

        Ok(Self { client })
    }
}

impl PageSource for WebScraper {
    async fn fetch_page(&self, url: &Url) -> Result<WebContent, ScraperError> {
        tracing::debug!(%url, "fetching page");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::Status(status.as_u16()));
        }

        let html = response.text().await?;
        let content = parse_html(url.as_str(), &html)?;

        tracing::info!(%url, chars = content.text.len(), "page extracted");
        Ok(content)
    }
}

/// Extract the title and readable text from an HTML document
pub fn parse_html(url: &str, html: &str) -> Result<WebContent, ScraperError> {
    let document = Html::parse_document(html);

    let title = extract_title(&document);
    let text = extract_text(&document);

    if text.trim().is_empty() {
        return Err(ScraperError::NoContent);
    }

    Ok(WebContent {
        url: url.to_string(),
        title,
        text,
    })
}

/// Extract the page title from <title> or <h1>
fn extract_title(document: &Html) -> Option<String> {
    [&*TITLE, &*H1].into_iter().find_map(|selector| {
        let element = document.select(selector).next()?;
        let title: String = element.text().collect();
        let title = title.trim();
        (!title.is_empty()).then(|| title.to_string())
    })
}

/// Extract readable text content from the page
fn extract_text(document: &Html) -> String {
    // Prefer the main content area when the page marks one
    for selector in MAIN_CONTENT.iter() {
        if let Some(element) = document.select(selector).next() {
            let text = extract_text_from_element(&Html::parse_fragment(&element.html()));
            if !text.trim().is_empty() {
                return text;
            }
        }
    }

    extract_text_from_element(document)
}

/// Extract text from paragraphs and headings, excluding scripts and styles
fn extract_text_from_element(document: &Html) -> String {
    let mut paragraphs: Vec<String> = Vec::new();

    for element in document.select(&TEXT_BLOCKS) {
        let text: String = element.text().collect::<Vec<_>>().join(" ");
        let cleaned = text.split_whitespace().collect::<Vec<_>>().join(" ");

        if cleaned.len() > MIN_BLOCK_CHARS {
            paragraphs.push(cleaned);
        }
    }

    paragraphs.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTICLE: &str = r#"
        <html>
          <head><title> Ownership in Rust </title><script>var x = "ignored script text here";</script></head>
          <body>
            <nav><p>Home | About | Contact us today</p></nav>
            <article>
              <h1>Understanding ownership</h1>
              <p>Every value in Rust has a single owner at any point in time.</p>
              <p>Short one.</p>
              <ul><li>Borrowing lets code use a value without taking it.</li></ul>
            </article>
          </body>
        </html>"#;

    #[test]
    fn prefers_article_content() {
        let content = parse_html("https://example.com", ARTICLE).unwrap();
        assert_eq!(content.title.as_deref(), Some("Ownership in Rust"));
        assert_eq!(
            content.text,
            "Understanding ownership\n\n\
             Every value in Rust has a single owner at any point in time.\n\n\
             Borrowing lets code use a value without taking it."
        );
        assert!(!content.text.contains("Contact"));
    }

    #[test]
    fn falls_back_to_whole_document_and_h1_title() {
        let html = r#"<html><body>
            <h1>A heading that is long enough</h1>
            <p>   Whitespace    is   collapsed   in this paragraph.  </p>
        </body></html>"#;
        let content = parse_html("https://example.com", html).unwrap();
        assert_eq!(content.title.as_deref(), Some("A heading that is long enough"));
        assert_eq!(
            content.text,
            "A heading that is long enough\n\nWhitespace is collapsed in this paragraph."
        );
    }

    #[test]
    fn page_without_text_is_no_content() {
        let html = "<html><head><title>Empty</title></head><body><div>tiny</div></body></html>";
        assert!(matches!(
            parse_html("https://example.com", html),
            Err(ScraperError::NoContent)
        ));
    }

    #[test]
    fn builds_client_with_relaxed_tls() {
        let config = FetchConfig {
            accept_invalid_certs: true,
            ..FetchConfig::default()
        };
        assert!(WebScraper::new(&config).is_ok());
    }
}
