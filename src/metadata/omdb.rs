use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{Lookup, MetadataClient, MetadataError, MovieSummary};
use crate::consts::OMDB_BASE_URL;

/// Client for the OMDb title endpoint.
pub struct OmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(OMDB_BASE_URL, api_key)
    }

    /// Point the client at another host (tests, proxies).
    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn parse_response(body: &str) -> Result<Lookup, MetadataError> {
        let response: OmdbResponse = serde_json::from_str(body)?;

        if response.response != "True" {
            debug!(
                error = response.error.as_deref().unwrap_or(""),
                "OMDb reported no match"
            );
            return Ok(Lookup::NotFound);
        }

        Ok(Lookup::Found(MovieSummary {
            title: response.title.unwrap_or_default(),
            year: response.year.unwrap_or_default(),
            director: response.director.unwrap_or_default(),
            genre: response.genre.unwrap_or_default(),
            plot: response.plot.unwrap_or_default(),
            rating: response.imdb_rating.unwrap_or_default(),
        }))
    }
}

#[async_trait]
impl MetadataClient for OmdbClient {
    async fn lookup(&self, title: &str) -> Result<Lookup, MetadataError> {
        let url = format!("{}/", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("t", title),
                ("apikey", self.api_key.as_str()),
                ("plot", "full"),
                ("r", "json"),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(MetadataError::Status { status, body });
        }

        let body = resp.text().await?;
        debug!(%body, "OMDb response");
        Self::parse_response(&body)
    }
}

// --- API types ---

#[derive(Deserialize)]
struct OmdbResponse {
    #[serde(rename = "Response", default)]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "Director")]
    director: Option<String>,
    #[serde(rename = "Genre")]
    genre: Option<String>,
    #[serde(rename = "Plot")]
    plot: Option<String>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_found_response() {
        let body = r#"{
            "Title": "The Matrix",
            "Year": "1999",
            "Genre": "Action, Sci-Fi",
            "Director": "Lana Wachowski, Lilly Wachowski",
            "Plot": "When a beautiful stranger leads computer hacker Neo...",
            "imdbRating": "8.7",
            "Response": "True"
        }"#;
        match OmdbClient::parse_response(body).unwrap() {
            Lookup::Found(movie) => {
                assert_eq!(movie.title, "The Matrix");
                assert_eq!(movie.year, "1999");
                assert_eq!(movie.genre, "Action, Sci-Fi");
                assert_eq!(movie.director, "Lana Wachowski, Lilly Wachowski");
                assert!(movie.plot.starts_with("When a beautiful stranger"));
                assert_eq!(movie.rating, "8.7");
            }
            Lookup::NotFound => panic!("expected Found"),
        }
    }

    #[test]
    fn parse_not_found_response() {
        let body = r#"{"Response":"False","Error":"Movie not found!"}"#;
        assert_eq!(OmdbClient::parse_response(body).unwrap(), Lookup::NotFound);
    }

    #[test]
    fn parse_missing_fields_become_empty() {
        let body = r#"{"Response":"True","Title":"Obscure"}"#;
        match OmdbClient::parse_response(body).unwrap() {
            Lookup::Found(movie) => {
                assert_eq!(movie.title, "Obscure");
                assert_eq!(movie.year, "");
                assert_eq!(movie.rating, "");
                assert_eq!(movie.plot, "");
            }
            Lookup::NotFound => panic!("expected Found"),
        }
    }

    #[test]
    fn parse_null_fields_become_empty() {
        let body = r#"{"Response":"True","Title":"X","Plot":null}"#;
        match OmdbClient::parse_response(body).unwrap() {
            Lookup::Found(movie) => assert_eq!(movie.plot, ""),
            Lookup::NotFound => panic!("expected Found"),
        }
    }

    #[test]
    fn parse_missing_indicator_is_not_found() {
        assert_eq!(OmdbClient::parse_response("{}").unwrap(), Lookup::NotFound);
    }

    #[test]
    fn parse_non_json_is_decode_error() {
        let err = OmdbClient::parse_response("<html>502</html>").unwrap_err();
        assert!(matches!(err, MetadataError::Decode(_)));
    }

    #[test]
    fn base_url_trailing_slash_trimmed() {
        let client = OmdbClient::with_base_url("http://localhost:1234/", "key");
        assert_eq!(client.base_url, "http://localhost:1234");
    }
}
