use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};

use crate::error::{FetchError, ScrapeError};

/// Body fragments providers use to signal throttling on non-429 responses.
const RATE_LIMIT_MARKERS: &[&str] = &[
    "exceeded the rate limit",
    "Too many requests",
    "Too Many Requests",
];

/// Build the blocking client shared by every request of a job. `timeout`
/// bounds the whole request, connect through body.
pub fn build_client(timeout: Duration, user_agent: Option<&str>) -> Result<Client, ScrapeError> {
    let mut builder = Client::builder().timeout(timeout);
    if let Some(ua) = user_agent {
        builder = builder.user_agent(ua);
    }
    Ok(builder.build()?)
}

/// Send a request and return the body of a successful response.
pub fn get_text(request: RequestBuilder) -> Result<String, FetchError> {
    let resp = request.send()?;
    let status = resp.status().as_u16();
    let text = resp.text()?;
    classify_response(status, &text)?;
    Ok(text)
}

/// Map an HTTP status and body onto the per-record failure kinds.
pub fn classify_response(status: u16, body: &str) -> Result<(), FetchError> {
    match status {
        200..=299 => Ok(()),
        404 | 410 => Err(FetchError::NotFound),
        429 => Err(FetchError::RateLimited),
        _ if RATE_LIMIT_MARKERS.iter().any(|m| body.contains(m)) => Err(FetchError::RateLimited),
        _ => Err(FetchError::Transient(format!(
            "HTTP {status}: {}",
            snippet(body)
        ))),
    }
}

/// First 200 characters of a body, for error messages.
pub fn snippet(body: &str) -> String {
    body.chars().take(200).collect()
}
