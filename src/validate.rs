//! Input validation for the summarize action.
//!
//! Runs before anything touches the network.

use url::{Host, Url};

use crate::pipeline::SummarizeError;

/// Check that both fields are filled in and that the URL is a usable web address.
pub fn validate_input(api_key: &str, url: &str) -> Result<Url, SummarizeError> {
    if api_key.trim().is_empty() {
        return Err(SummarizeError::MissingInput);
    }
    validate_url(url)
}

/// Check the URL field alone, for actions that need no credential
pub fn validate_url(url: &str) -> Result<Url, SummarizeError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(SummarizeError::MissingInput);
    }

    parse_web_url(url).ok_or_else(|| SummarizeError::MalformedUrl(url.to_string()))
}

/// Parse an absolute http(s) URL whose host looks like a real address.
pub fn parse_web_url(raw: &str) -> Option<Url> {
    let url = Url::parse(raw).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }

    match url.host()? {
        Host::Domain(domain) => {
            let domain = domain.trim_end_matches('.');
            let valid = domain == "localhost"
                || (domain.contains('.') && domain.split('.').all(|label| !label.is_empty()));
            valid.then_some(url)
        }
        Host::Ipv4(_) | Host::Ipv6(_) => Some(url),
    }
}
