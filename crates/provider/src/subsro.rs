//! Subs.ro API client.
//!
//! API v1.0, authenticated with the `X-Subs-Api-Key` header. Search is
//! always restricted to Romanian subtitles.

use std::time::Duration;

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::debug;

use rosub_core::SearchQuery;

use crate::{ProviderError, SubtitleListing, SubtitleProvider};

const BASE_URL: &str = "https://subs.ro/api/v1.0";
const API_KEY_HEADER: &str = "X-Subs-Api-Key";
const SUBTITLE_LANGUAGE: &str = "ro";

const SEARCH_TIMEOUT: Duration = Duration::from_secs(10);
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(15);

pub struct SubsRoClient {
    api_key: String,
    client: reqwest::Client,
}

impl SubsRoClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl SubtitleProvider for SubsRoClient {
    /// Search for subtitles matching the query.
    ///
    /// A body whose own `status` field is not 200 yields an empty result
    /// rather than an error.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SubtitleListing>, ProviderError> {
        let url = search_url(query);
        debug!(url = %url, "subs.ro search");

        let resp = self
            .client
            .get(&url)
            .query(&[("language", SUBTITLE_LANGUAGE)])
            .header(API_KEY_HEADER, &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .timeout(SEARCH_TIMEOUT)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            return Err(ProviderError::from_status(status.as_u16()));
        }

        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| ProviderError::Parse(format!("search response: {e}")))?;

        Ok(parse_search_response(&body))
    }

    /// Download the archive for a subtitle id. Returns the raw body bytes.
    async fn download(&self, subtitle_id: &str) -> Result<Vec<u8>, ProviderError> {
        let url = download_url(subtitle_id);
        debug!(url = %url, "subs.ro download");

        let resp = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .timeout(DOWNLOAD_TIMEOUT)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            return Err(ProviderError::from_status(status.as_u16()));
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

fn search_url(query: &SearchQuery) -> String {
    let value = utf8_percent_encode(&query.value, NON_ALPHANUMERIC);
    format!("{BASE_URL}/search/{}/{value}", query.field)
}

fn download_url(subtitle_id: &str) -> String {
    let id = utf8_percent_encode(subtitle_id, NON_ALPHANUMERIC);
    format!("{BASE_URL}/subtitle/{id}/download")
}

/// Extract listings from a search response body.
fn parse_search_response(body: &serde_json::Value) -> Vec<SubtitleListing> {
    if body["status"].as_i64() != Some(200) {
        debug!(status = ?body.get("status"), "search body status not 200");
        return Vec::new();
    }

    let items = body["items"].as_array().cloned().unwrap_or_default();

    items
        .iter()
        .filter_map(|item| {
            // Ids appear as numbers or strings depending on the endpoint.
            let id = match &item["id"] {
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::String(s) => s.clone(),
                _ => return None,
            };
            Some(SubtitleListing {
                id,
                title: item["title"]
                    .as_str()
                    .unwrap_or("Unknown Release")
                    .to_string(),
                poster: item["poster"].as_str().map(|s| s.to_string()),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rosub_core::QueryField;

    #[test]
    fn search_url_for_imdb_id() {
        let q = SearchQuery {
            field: QueryField::ImdbId,
            value: "tt1234567".to_string(),
        };
        assert_eq!(
            search_url(&q),
            "https://subs.ro/api/v1.0/search/imdbid/tt1234567"
        );
    }

    #[test]
    fn search_url_percent_encodes_the_value() {
        let q = SearchQuery {
            field: QueryField::Title,
            value: "The Wire S03E07".to_string(),
        };
        assert_eq!(
            search_url(&q),
            "https://subs.ro/api/v1.0/search/title/The%20Wire%20S03E07"
        );
    }

    #[test]
    fn download_url_embeds_the_id() {
        assert_eq!(
            download_url("98765"),
            "https://subs.ro/api/v1.0/subtitle/98765/download"
        );
    }

    #[test]
    fn parse_search_response_maps_items() {
        let body = serde_json::json!({
            "status": 200,
            "items": [
                { "id": 101, "title": "Movie.2020.1080p", "poster": "https://img/1.jpg" },
                { "id": "102", "title": "Movie.2020.720p" },
            ]
        });

        let listings = parse_search_response(&body);
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].id, "101");
        assert_eq!(listings[0].title, "Movie.2020.1080p");
        assert_eq!(listings[0].poster.as_deref(), Some("https://img/1.jpg"));
        assert_eq!(listings[1].id, "102");
        assert!(listings[1].poster.is_none());
    }

    #[test]
    fn parse_search_response_defaults_missing_title() {
        let body = serde_json::json!({
            "status": 200,
            "items": [ { "id": 7 } ]
        });
        assert_eq!(parse_search_response(&body)[0].title, "Unknown Release");
    }

    #[test]
    fn parse_search_response_skips_items_without_id() {
        let body = serde_json::json!({
            "status": 200,
            "items": [ { "title": "no id" }, { "id": 5, "title": "ok" } ]
        });
        let listings = parse_search_response(&body);
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].id, "5");
    }

    #[test]
    fn parse_search_response_rejects_non_200_body_status() {
        let body = serde_json::json!({
            "status": 404,
            "items": [ { "id": 1, "title": "ignored" } ]
        });
        assert!(parse_search_response(&body).is_empty());
        assert!(parse_search_response(&serde_json::json!({})).is_empty());
    }
}
