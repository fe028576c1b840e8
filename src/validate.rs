//! Client-side article URL validation, run before any network call

use reqwest::Url;

use crate::error::{QuizError, Result};

/// Parse `raw` and require an http(s) URL whose host contains `domain`
pub fn validate_article_url(raw: &str, domain: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|_| QuizError::Validation(String::from("Please enter a valid URL.")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(QuizError::Validation(String::from("Please enter a valid URL.")));
    }

    match url.host_str() {
        Some(host) if host.contains(domain) => Ok(url),
        _ => Err(QuizError::Validation(String::from(
            "Please enter a valid Wikipedia article URL.",
        ))),
    }
}
