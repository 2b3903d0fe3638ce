pub mod google;
pub mod mock;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

/// Source language code that asks the service to detect the language.
pub const AUTO: &str = "auto";

/// Language the metadata service is queried in.
pub const ENGLISH: &str = "en";

#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("translation request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("translation service returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("unexpected translation response: {0}")]
    Decode(String),
}

/// Stateless text translation between two language codes.
#[async_trait]
pub trait Translator: Send + Sync {
    /// `source` may be [`AUTO`].
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslationError>;
}

/// The two fixed directions the bot uses: anything to English for the
/// query, English to the display language for the answer.
#[derive(Clone)]
pub struct Translation {
    translator: Arc<dyn Translator>,
    display_lang: String,
}

impl Translation {
    pub fn new(translator: Arc<dyn Translator>, display_lang: impl Into<String>) -> Self {
        Self {
            translator,
            display_lang: display_lang.into(),
        }
    }

    pub fn display_lang(&self) -> &str {
        &self.display_lang
    }

    pub async fn to_english(&self, text: &str) -> Result<String, TranslationError> {
        self.translator.translate(text, AUTO, ENGLISH).await
    }

    pub async fn to_display(&self, text: &str) -> Result<String, TranslationError> {
        self.translator
            .translate(text, ENGLISH, &self.display_lang)
            .await
    }
}
