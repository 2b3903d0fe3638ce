pub mod mock;
pub mod omdb;

use async_trait::async_trait;
use thiserror::Error;

/// The handful of fields the bot shows for a movie.
///
/// All values are passed through as the service returned them; a missing
/// field is an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieSummary {
    pub title: String,
    pub year: String,
    pub director: String,
    pub genre: String,
    pub plot: String,
    /// Decimal rating as text, e.g. `"8.7"`.
    pub rating: String,
}

/// Outcome of a title lookup that reached the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(MovieSummary),
    /// The service answered and said it has no such title.
    NotFound,
}

/// The service could not be asked, or its answer could not be read.
/// Never used for "no such title".
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("metadata request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("metadata service returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("metadata response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Resolves a title to movie metadata.
#[async_trait]
pub trait MetadataClient: Send + Sync {
    async fn lookup(&self, title: &str) -> Result<Lookup, MetadataError>;
}
