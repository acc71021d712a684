//! Shared test helpers: a language model that replays scripted replies.

#![allow(dead_code)]

use async_trait::async_trait;
use kgextract::lm::{self, CompletionParams, LanguageModel, LmError, Message};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replays canned replies in order and records every request it receives.
#[derive(Debug, Default)]
pub struct ScriptedModel {
    replies: Mutex<VecDeque<lm::Result<String>>>,
    calls: Mutex<Vec<Vec<Message>>>,
}

impl ScriptedModel {
    /// A model answering each call with the next reply.
    pub fn replying<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(|r| Ok(r.into())).collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A model whose first call fails with `error`.
    pub fn failing(error: LmError) -> Self {
        Self {
            replies: Mutex::new(VecDeque::from([Err(error)])),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far.
    pub fn calls(&self) -> Vec<Vec<Message>> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of completion requests received.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// The last user message of the `n`th call.
    pub fn user_message(&self, n: usize) -> String {
        self.calls()[n]
            .last()
            .map(|m| m.content.clone())
            .unwrap_or_default()
    }

    /// The system message of the `n`th call.
    pub fn system_message(&self, n: usize) -> String {
        self.calls()[n][0].content.clone()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn complete(&self, messages: &[Message], _params: &CompletionParams) -> lm::Result<String> {
        self.calls.lock().unwrap().push(messages.to_vec());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LmError::Other("no scripted reply left".to_string())))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Owned entity list from string literals.
pub fn names(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
