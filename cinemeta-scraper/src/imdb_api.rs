//! Metadata enrichment from the IMDb API (RapidAPI `imdb236`).

use cinemeta_core::{FieldMap, ImdbId, fields};
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::{FetchError, ScrapeError};
use crate::http;
use crate::source::EnrichmentSource;
use crate::types::{TitleInfo, join_names};

const API_KEY_HEADER: &str = "x-rapidapi-key";

/// Fetches description, interests, release date and credits per title.
pub struct ImdbApiSource {
    http: Client,
    config: ApiConfig,
}

impl ImdbApiSource {
    pub fn new(config: ApiConfig) -> Result<Self, ScrapeError> {
        let http = http::build_client(config.timeout, None)?;
        Ok(Self { http, config })
    }

    /// `{base_url}/tt0114709`
    pub fn title_url(&self, id: ImdbId) -> String {
        title_url(&self.config.base_url, id)
    }
}

impl EnrichmentSource for ImdbApiSource {
    fn name(&self) -> &str {
        "imdb-api"
    }

    fn fetch(&self, id: ImdbId) -> Result<FieldMap, FetchError> {
        let url = self.title_url(id);
        log::debug!("GET {}", url);

        let request = self
            .http
            .get(&url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .header(ACCEPT, "application/json");
        let body = http::get_text(request)?;
        parse_title_response(&body)
    }
}

fn title_url(base_url: &str, id: ImdbId) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), id)
}

/// Turn a title response body into the six metadata fields.
///
/// All six keys are always present in the result. Scalars missing from the
/// response come back as null; missing credit lists come back as "".
pub fn parse_title_response(body: &str) -> Result<FieldMap, FetchError> {
    let value: Value = serde_json::from_str(body).map_err(|e| {
        FetchError::malformed(format!("{e}. Response: {}", http::snippet(body)))
    })?;
    if !value.is_object() {
        return Err(FetchError::malformed(format!(
            "expected a JSON object. Response: {}",
            http::snippet(body)
        )));
    }
    let info: TitleInfo =
        serde_json::from_value(value).map_err(|e| FetchError::malformed(e.to_string()))?;
    Ok(title_fields(info))
}

fn title_fields(info: TitleInfo) -> FieldMap {
    let mut out = FieldMap::new();
    out.insert(
        fields::DESCRIPTION.to_string(),
        info.description.unwrap_or(Value::Null),
    );
    out.insert(
        fields::INTERESTS.to_string(),
        info.interests.unwrap_or(Value::Null),
    );
    out.insert(
        fields::RELEASE_DATE.to_string(),
        info.release_date.unwrap_or(Value::Null),
    );
    out.insert(
        fields::DIRECTORS.to_string(),
        Value::String(join_names(info.directors.as_deref())),
    );
    out.insert(
        fields::CAST.to_string(),
        Value::String(join_names(info.cast.as_deref())),
    );
    out.insert(
        fields::WRITERS.to_string(),
        Value::String(join_names(info.writers.as_deref())),
    );
    out
}

#[cfg(test)]
#[path = "tests/imdb_api_tests.rs"]
mod tests;
