//! Poster URLs scraped from IMDb title pages.
//!
//! The hero poster `<img>` carries a responsive `srcset`
//! (`URL 190w, URL 285w, ...`) and a plain `src`. Both are kept: the widths
//! as `{"190": URL, ...}` and the default as `"src"`.

use std::sync::LazyLock;
use std::time::Duration;

use cinemeta_core::{FieldMap, ImdbId, fields};
use regex::Regex;
use reqwest::blocking::Client;
use scraper::{Html, Selector};
use serde_json::Value;

use crate::error::{FetchError, ScrapeError};
use crate::http;
use crate::source::EnrichmentSource;

pub const IMDB_TITLE_BASE_URL: &str = "https://www.imdb.com/title";

/// Width picked for `poster_url` when present; otherwise `src` is used.
pub const PREFERRED_POSTER_WIDTH: &str = "380";

pub const SRC_KEY: &str = "src";

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

static POSTER_IMG: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"div[data-testid="hero-media__poster"] div.ipc-media img"#)
        .expect("static selector")
});

static SRCSET_ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(https://\S+)\s+(\d+)w").expect("static pattern"));

/// Poster URLs found on one title page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PosterSet {
    /// `(width, url)` in `srcset` order.
    pub by_width: Vec<(String, String)>,
    /// The `<img src>` fallback.
    pub src: Option<String>,
}

impl PosterSet {
    pub fn is_empty(&self) -> bool {
        self.by_width.is_empty() && self.src.is_none()
    }

    /// The preferred width if available, else `src`.
    pub fn preferred(&self) -> Option<&str> {
        self.by_width
            .iter()
            .find(|(w, url)| w == PREFERRED_POSTER_WIDTH && !url.trim().is_empty())
            .map(|(_, url)| url.as_str())
            .or(self.src.as_deref().filter(|s| !s.trim().is_empty()))
    }

    /// `poster_urls` as an object plus the chosen `poster_url`.
    pub fn into_fields(self) -> FieldMap {
        let preferred = self.preferred().map(str::to_string);

        let mut urls = FieldMap::new();
        for (width, url) in self.by_width {
            urls.insert(width, Value::String(url));
        }
        if let Some(src) = self.src {
            urls.insert(SRC_KEY.to_string(), Value::String(src));
        }

        let mut out = FieldMap::new();
        out.insert(fields::POSTER_URLS.to_string(), Value::Object(urls));
        out.insert(
            fields::POSTER_URL.to_string(),
            preferred.map(Value::String).unwrap_or(Value::Null),
        );
        out
    }
}

/// Find the hero poster on a title page. `None` when the page has no poster
/// element or the element carries no usable URL.
pub fn parse_poster_html(html: &str) -> Option<PosterSet> {
    let document = Html::parse_document(html);
    let img = document.select(&POSTER_IMG).next()?;

    let mut set = PosterSet::default();
    if let Some(srcset) = img.value().attr("srcset") {
        set.by_width = parse_srcset(srcset);
    }
    set.src = img
        .value()
        .attr("src")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    if set.is_empty() { None } else { Some(set) }
}

/// Parse `URL <n>w` entries. IMDb image URLs contain commas of their own
/// (`..._CR0,0,190,281_.jpg`), so entries are matched rather than split.
pub fn parse_srcset(srcset: &str) -> Vec<(String, String)> {
    SRCSET_ENTRY
        .captures_iter(srcset)
        .map(|c| (c[2].to_string(), c[1].to_string()))
        .collect()
}

/// Scrapes poster URLs from public IMDb title pages.
pub struct PosterPageSource {
    http: Client,
    base_url: String,
}

impl PosterPageSource {
    pub fn new(timeout: Duration) -> Result<Self, ScrapeError> {
        Self::with_base_url(IMDB_TITLE_BASE_URL, timeout)
    }

    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ScrapeError> {
        let http = http::build_client(timeout, Some(BROWSER_USER_AGENT))?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// `https://www.imdb.com/title/tt0114709/`
    pub fn page_url(&self, id: ImdbId) -> String {
        format!("{}/{}/", self.base_url.trim_end_matches('/'), id)
    }
}

impl EnrichmentSource for PosterPageSource {
    fn name(&self) -> &str {
        "imdb-posters"
    }

    fn fetch(&self, id: ImdbId) -> Result<FieldMap, FetchError> {
        let url = self.page_url(id);
        log::debug!("GET {}", url);

        let html = http::get_text(self.http.get(&url))?;
        parse_poster_html(&html)
            .map(PosterSet::into_fields)
            .ok_or(FetchError::NotFound)
    }
}

#[cfg(test)]
#[path = "tests/posters_tests.rs"]
mod tests;
