//! Completions from an LLM proxy with structured output.
//!
//! The chat client and its transport live outside this crate; they plug in
//! through [`ChatModel`] and [`ChatModelFactory`]. This module adds the
//! proxy settings, a bounded cache of client objects, and decoding of
//! replies into [`CompletionResponse`].

mod cache;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use cache::{ClientCache, ClientKey};

pub const DEFAULT_PROXY_URL: &str = "http://localhost:4000";
/// Master key of a local development proxy.
pub const DEFAULT_API_KEY: &str = "sk-1234";
pub const DEFAULT_MODEL: &str = "o4-mini";
/// o-series models only accept the default temperature.
pub const DEFAULT_TEMPERATURE: f32 = 1.0;

const STRUCTURED_INSTRUCTIONS: &str = "\n\nRespond with only a JSON object of the form \
{\"answer\": string, \"reasoning\": string}. `answer` is the main answer to the question; \
`reasoning` briefly explains the reasoning behind it.";

/// Error from a completion call. Every variant renders with the
/// `LLM completion failed:` prefix.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("LLM completion failed: {0}")]
    Request(String),
    #[error("LLM completion failed: reply does not match the response schema: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Structured reply to a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// The main answer to the user's question.
    pub answer: String,
    /// Brief explanation of the reasoning behind the answer.
    pub reasoning: String,
}

/// Result of [`Completer::complete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Structured(CompletionResponse),
    Text(String),
}

/// Where the proxy lives and how to authenticate against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxySettings {
    pub base_url: String,
    pub api_key: String,
}

impl ProxySettings {
    /// Read `LITELLM_PROXY_URL` and `LITELLM_MASTER_KEY`, falling back to a
    /// local development proxy.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        ProxySettings {
            base_url: lookup("LITELLM_PROXY_URL")
                .unwrap_or_else(|| DEFAULT_PROXY_URL.to_string()),
            api_key: lookup("LITELLM_MASTER_KEY").unwrap_or_else(|| DEFAULT_API_KEY.to_string()),
        }
    }
}

/// A chat-completion client bound to one model and temperature.
pub trait ChatModel {
    /// Send `prompt` and return the reply text.
    fn invoke(&self, prompt: &str) -> Result<String, CompletionError>;
}

/// Builds chat clients for the proxy.
pub trait ChatModelFactory {
    type Model: ChatModel;

    fn build(&self, settings: &ProxySettings, key: &ClientKey) -> Self::Model;
}

/// Entry point for completions: picks a cached client and decodes replies.
pub struct Completer<F: ChatModelFactory> {
    factory: F,
    settings: ProxySettings,
    cache: ClientCache<F::Model>,
    key: ClientKey,
}

impl<F: ChatModelFactory> Completer<F> {
    /// A completer using [`DEFAULT_MODEL`] with a default-sized client cache.
    pub fn new(factory: F, settings: ProxySettings) -> Self {
        Completer {
            factory,
            settings,
            cache: ClientCache::default(),
            key: ClientKey::new(DEFAULT_MODEL, DEFAULT_TEMPERATURE),
        }
    }

    /// Switch the model and temperature used by later calls.
    pub fn with_model(mut self, model: impl Into<String>, temperature: f32) -> Self {
        self.key = ClientKey::new(model, temperature);
        self
    }

    /// Replace the client cache, e.g. to change its capacity.
    pub fn with_cache(mut self, cache: ClientCache<F::Model>) -> Self {
        self.cache = cache;
        self
    }

    pub fn cache(&self) -> &ClientCache<F::Model> {
        &self.cache
    }

    /// The client for `key`, built on first use.
    pub fn client(&mut self, key: &ClientKey) -> Arc<F::Model> {
        let (factory, settings) = (&self.factory, &self.settings);
        self.cache
            .get_or_insert_with(key, |key| factory.build(settings, key))
    }

    /// Complete `prompt`, decoding into [`CompletionResponse`] when
    /// `structured` is set and returning the raw text otherwise.
    pub fn complete(
        &mut self,
        prompt: &str,
        structured: bool,
    ) -> Result<Completion, CompletionError> {
        let key = self.key.clone();
        let client = self.client(&key);
        if structured {
            let reply = client.invoke(&format!("{prompt}{STRUCTURED_INSTRUCTIONS}"))?;
            Ok(Completion::Structured(parse_structured(&reply)?))
        } else {
            Ok(Completion::Text(client.invoke(prompt)?))
        }
    }

    /// Structured completion as a JSON object.
    pub fn complete_json(&mut self, prompt: &str) -> Result<serde_json::Value, CompletionError> {
        let key = self.key.clone();
        let client = self.client(&key);
        let reply = client.invoke(&format!("{prompt}{STRUCTURED_INSTRUCTIONS}"))?;
        Ok(serde_json::to_value(parse_structured(&reply)?)?)
    }

    /// Plain-text completion.
    pub fn complete_text(&mut self, prompt: &str) -> Result<String, CompletionError> {
        match self.complete(prompt, false)? {
            Completion::Text(text) => Ok(text),
            Completion::Structured(response) => Ok(response.answer),
        }
    }
}

/// Decode a structured reply, tolerating a surrounding fenced code block.
pub fn parse_structured(reply: &str) -> Result<CompletionResponse, CompletionError> {
    Ok(serde_json::from_str(strip_code_fence(reply))?)
}

fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(body) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (`json`) on the opening fence line.
    let body = body.split_once('\n').map_or("", |(_, rest)| rest);
    body.strip_suffix("```").unwrap_or(body).trim()
}
