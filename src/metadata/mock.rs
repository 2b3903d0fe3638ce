use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{Lookup, MetadataClient, MetadataError, MovieSummary};

/// A canned metadata service for tests.
///
/// Knows a fixed set of titles; everything else is not found. Can be told
/// to fail every request to simulate an unreachable service.
#[derive(Default)]
pub struct MockMetadata {
    movies: HashMap<String, MovieSummary>,
    unreachable: bool,
    calls: AtomicUsize,
    last_query: Mutex<Option<String>>,
}

impl MockMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `query` with `movie`.
    pub fn with_movie(mut self, query: impl Into<String>, movie: MovieSummary) -> Self {
        self.movies.insert(query.into(), movie);
        self
    }

    /// Fail every lookup with a status error.
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }

    /// Number of lookups performed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The title passed to the most recent lookup.
    pub fn last_query(&self) -> Option<String> {
        self.last_query.lock().unwrap().clone()
    }
}

#[async_trait]
impl MetadataClient for MockMetadata {
    async fn lookup(&self, title: &str) -> Result<Lookup, MetadataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some(title.to_string());

        if self.unreachable {
            return Err(MetadataError::Status {
                status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
                body: "mock: service unavailable".to_string(),
            });
        }

        Ok(match self.movies.get(title) {
            Some(movie) => Lookup::Found(movie.clone()),
            None => Lookup::NotFound,
        })
    }
}
