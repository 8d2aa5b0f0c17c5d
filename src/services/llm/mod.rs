// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

pub mod anthropic;
pub mod openai;

use serde_json::Value;

use crate::config::{Config, Provider};
use crate::error::{Error, Result};

pub use anthropic::AnthropicProvider;
pub use openai::OpenAiProvider;

pub(crate) const SYSTEM_PROMPT: &str = "You are an expert at writing concise, conventional git \
    commit messages using gitmojis. Always answer with the requested structured output only.";

/// Sampling temperature for every request
pub(crate) const TEMPERATURE: f32 = 0.3;

/// A JSON schema the model output must satisfy
#[derive(Debug, Clone)]
pub struct ResponseSchema {
    pub name: &'static str,
    pub description: &'static str,
    pub schema: Value,
}

/// Model backend, one variant per supported provider
pub enum LlmProvider {
    OpenAi(OpenAiProvider),
    Anthropic(AnthropicProvider),
}

impl LlmProvider {
    /// Single request constrained to `schema`; returns the parsed JSON document
    pub async fn generate_structured(
        &self,
        prompt: &str,
        schema: &ResponseSchema,
    ) -> Result<Value> {
        match self {
            Self::OpenAi(p) => p.generate_structured(prompt, schema).await,
            Self::Anthropic(p) => p.generate_structured(prompt, schema).await,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::OpenAi(p) => p.name(),
            Self::Anthropic(p) => p.name(),
        }
    }
}

pub fn create_provider(config: &Config) -> Result<LlmProvider> {
    if let Some(ref raw) = config.unsupported_provider {
        return Err(Error::UnsupportedProvider(raw.clone()));
    }

    let api_key = config
        .resolve_api_key()
        .ok_or_else(|| Error::InvalidConfig {
            errors: vec![config.missing_key_message()],
        })?;

    Ok(match config.provider {
        Provider::OpenAI => LlmProvider::OpenAi(OpenAiProvider::new(config, api_key)),
        Provider::Anthropic => LlmProvider::Anthropic(AnthropicProvider::new(config, api_key)),
    })
}

pub(crate) fn generation_error(provider: &str, message: impl Into<String>) -> Error {
    Error::Generation {
        provider: provider.into(),
        message: message.into(),
    }
}

pub(crate) fn request_error(provider: &str, e: reqwest::Error) -> Error {
    if e.is_timeout() {
        generation_error(provider, "request timed out")
    } else {
        generation_error(provider, e.to_string())
    }
}
