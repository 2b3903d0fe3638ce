use std::sync::Arc;

use async_trait::async_trait;
use html_escape::encode_text;
use thiserror::Error;
use tracing::{error, info};

use super::{Engine, FailureKind, Outcome, Reply};
use crate::audit::AuditStore;
use crate::consts::{EMPTY_INPUT_REPLY, FAILURE_REPLY, NOT_FOUND_REPLY};
use crate::metadata::{Lookup, MetadataClient, MetadataError, MovieSummary};
use crate::translator::{Translation, TranslationError};

/// Anything that aborts a lookup before a reply is composed.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error(transparent)]
    Translation(#[from] TranslationError),

    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error("audit write failed: {0:#}")]
    Audit(anyhow::Error),
}

impl LookupError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Translation(_) => FailureKind::Translation,
            Self::Metadata(_) => FailureKind::Metadata,
            Self::Audit(_) => FailureKind::Audit,
        }
    }
}

/// Drives one query: translate, look up, translate back, format, audit.
///
/// Confirmed matches and confirmed misses are audited. Translation and
/// transport failures are logged and answered with a generic message but
/// leave no audit row.
pub struct Orchestrator {
    translation: Translation,
    metadata: Arc<dyn MetadataClient>,
    audit: Arc<dyn AuditStore>,
}

impl Orchestrator {
    pub fn new(
        translation: Translation,
        metadata: Arc<dyn MetadataClient>,
        audit: Arc<dyn AuditStore>,
    ) -> Self {
        Self {
            translation,
            metadata,
            audit,
        }
    }

    async fn search(&self, query: &str) -> Result<Reply, LookupError> {
        let english = self.translation.to_english(query).await?;
        info!(%query, %english, "translated query");

        match self.metadata.lookup(&english).await? {
            Lookup::Found(movie) => {
                let title = self.translation.to_display(&movie.title).await?;
                let plot = self.translation.to_display(&movie.plot).await?;
                let text = format_summary(&movie, &title, &plot);

                self.audit
                    .record(query, true)
                    .await
                    .map_err(LookupError::Audit)?;
                info!(%query, title = %movie.title, "movie found");
                Ok(Reply::new(text, Outcome::Found))
            }
            Lookup::NotFound => {
                self.audit
                    .record(query, false)
                    .await
                    .map_err(LookupError::Audit)?;
                info!(%query, "movie not found");
                Ok(Reply::new(NOT_FOUND_REPLY, Outcome::NotFound))
            }
        }
    }
}

#[async_trait]
impl Engine for Orchestrator {
    async fn handle(&self, text: &str) -> Reply {
        let query = text.trim();
        if query.is_empty() {
            return Reply::new(EMPTY_INPUT_REPLY, Outcome::EmptyInput);
        }

        match self.search(query).await {
            Ok(reply) => reply,
            Err(e) => {
                error!(%query, error = %e, kind = ?e.kind(), "lookup failed");
                Reply::new(FAILURE_REPLY, Outcome::Failed(e.kind()))
            }
        }
    }
}

/// Telegram HTML message, one labeled line per field. `title` and `plot`
/// are the display-language versions; everything else is shown as fetched.
pub fn format_summary(movie: &MovieSummary, title: &str, plot: &str) -> String {
    format!(
        "🎬 <b>{}</b>\n\
         📅 Год: {}\n\
         🎞 Жанр: {}\n\
         🎥 Режиссёр: {}\n\
         ⭐ IMDb: {}\n\
         📝 Сюжет: {}",
        encode_text(title),
        encode_text(&movie.year),
        encode_text(&movie.genre),
        encode_text(&movie.director),
        encode_text(&movie.rating),
        encode_text(plot),
    )
}
