//! Chat front-end: turns inbound chat messages into engine calls.
//!
//! [`Dispatcher`] decides what a message means; [`telegram`] moves the
//! bytes. Only `/start` is a recognised command, other commands are
//! dropped silently and plain text is a title search.

pub mod telegram;

use std::sync::Arc;

use crate::consts::GREETING;
use crate::engine::Engine;

/// What an inbound text message asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inbound<'a> {
    Start,
    /// Any other `/command`, named without the slash or `@botname`.
    Command(&'a str),
    Search(&'a str),
}

impl<'a> Inbound<'a> {
    pub fn classify(text: &'a str) -> Self {
        let Some(rest) = text.trim_start().strip_prefix('/') else {
            return Self::Search(text);
        };

        let word = rest.split_whitespace().next().unwrap_or("");
        let name = word.split('@').next().unwrap_or(word);
        if name == "start" {
            Self::Start
        } else {
            Self::Command(name)
        }
    }
}

/// Routes inbound text to the greeting or to the engine.
pub struct Dispatcher {
    engine: Arc<dyn Engine>,
}

impl Dispatcher {
    pub fn new(engine: Arc<dyn Engine>) -> Self {
        Self { engine }
    }

    /// The reply to send, or `None` if the message should be ignored.
    pub async fn respond(&self, text: &str) -> Option<String> {
        match Inbound::classify(text) {
            Inbound::Start => Some(GREETING.to_string()),
            Inbound::Command(name) => {
                tracing::debug!(command = name, "ignoring unknown command");
                None
            }
            Inbound::Search(query) => Some(self.engine.handle(query).await.text),
        }
    }
}
