use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{TranslationError, Translator};

/// A dictionary translator for tests.
///
/// Known `(text, target)` pairs map to fixed translations; anything else
/// comes back unchanged. Every call is recorded as `(text, source, target)`.
#[derive(Default)]
pub struct MockTranslator {
    entries: HashMap<(String, String), String>,
    failing: bool,
    calls: Mutex<Vec<(String, String, String)>>,
}

impl MockTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(
        mut self,
        text: impl Into<String>,
        target: impl Into<String>,
        translated: impl Into<String>,
    ) -> Self {
        self.entries
            .insert((text.into(), target.into()), translated.into());
        self
    }

    /// Fail every call, as if the service were down.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<(String, String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslationError> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), source.to_string(), target.to_string()));

        if self.failing {
            return Err(TranslationError::Decode("mock: translator offline".to_string()));
        }

        Ok(self
            .entries
            .get(&(text.to_string(), target.to_string()))
            .cloned()
            .unwrap_or_else(|| text.to_string()))
    }
}
