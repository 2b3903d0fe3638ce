use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::{TranslationError, Translator};
use crate::consts::GOOGLE_TRANSLATE_BASE_URL;

/// Translator backed by the public Google Translate web endpoint.
/// No API key is needed.
pub struct GoogleTranslator {
    client: Client,
    base_url: String,
}

impl Default for GoogleTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl GoogleTranslator {
    pub fn new() -> Self {
        Self::with_base_url(GOOGLE_TRANSLATE_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// The endpoint answers with nested arrays; the first element lists
    /// `[translated, original, ...]` segments in order.
    fn parse_response(body: &str) -> Result<String, TranslationError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| TranslationError::Decode(format!("invalid JSON: {e}")))?;

        let segments = value
            .get(0)
            .and_then(Value::as_array)
            .ok_or_else(|| TranslationError::Decode(format!("no segments in {body}")))?;

        let translated: String = segments
            .iter()
            .filter_map(|segment| segment.get(0).and_then(Value::as_str))
            .collect();

        if translated.is_empty() {
            return Err(TranslationError::Decode(format!(
                "empty translation in {body}"
            )));
        }
        Ok(translated)
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslationError> {
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }

        let url = format!("{}/translate_a/single", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(TranslationError::Status { status, body });
        }

        let body = resp.text().await?;
        let translated = Self::parse_response(&body)?;
        debug!(source, target, %text, %translated, "translated");
        Ok(translated)
    }
}
