pub mod orchestrator;

use async_trait::async_trait;

/// Which dependency broke a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Translation,
    Metadata,
    Audit,
}

/// How a message was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to search for; no lookup, no audit row.
    EmptyInput,
    Found,
    NotFound,
    Failed(FailureKind),
}

/// Text to send back plus how it was reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub outcome: Outcome,
}

impl Reply {
    pub fn new(text: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            text: text.into(),
            outcome,
        }
    }
}

/// The outermost boundary. The chat front-end only knows this trait.
#[async_trait]
pub trait Engine: Send + Sync {
    /// Answer one inbound message. Never fails: errors become a reply.
    async fn handle(&self, text: &str) -> Reply;
}
