// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::error::Result;

use super::{ResponseSchema, SYSTEM_PROMPT, TEMPERATURE, generation_error, request_error};

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";
const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 2048;
const NAME: &str = "anthropic";

pub struct AnthropicProvider {
    client: Client,
    base_url: String,
    model: String,
    api_key: SecretString,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    system: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
    max_tokens: u32,
    tools: Vec<Tool<'a>>,
    tool_choice: ToolChoice<'a>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct Tool<'a> {
    name: &'a str,
    description: &'a str,
    input_schema: &'a Value,
}

#[derive(Serialize)]
struct ToolChoice<'a> {
    #[serde(rename = "type")]
    choice_type: &'static str,
    name: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    ToolUse { name: String, input: Value },
    #[serde(other)]
    Other,
}

impl AnthropicProvider {
    pub fn new(config: &Config, api_key: SecretString) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            model: config.model.clone(),
            api_key,
        }
    }

    /// Forces a single tool call whose input schema is the response schema
    pub async fn generate_structured(
        &self,
        prompt: &str,
        schema: &ResponseSchema,
    ) -> Result<Value> {
        let url = format!("{}/messages", self.base_url);
        debug!(model = %self.model, prompt_chars = prompt.len(), "anthropic request");

        let response = self
            .client
            .post(&url)
            .header("x-api-key", self.api_key.expose_secret())
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(&MessagesRequest {
                model: &self.model,
                system: SYSTEM_PROMPT,
                messages: vec![Message {
                    role: "user",
                    content: prompt,
                }],
                temperature: TEMPERATURE,
                max_tokens: MAX_TOKENS,
                tools: vec![Tool {
                    name: schema.name,
                    description: schema.description,
                    input_schema: &schema.schema,
                }],
                tool_choice: ToolChoice {
                    choice_type: "tool",
                    name: schema.name,
                },
            })
            .send()
            .await
            .map_err(|e| request_error(NAME, e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(generation_error(NAME, format!("HTTP {status}: {body}")));
        }

        let body: MessagesResponse = response
            .json()
            .await
            .map_err(|e| generation_error(NAME, format!("malformed response: {e}")))?;

        let input = body
            .content
            .into_iter()
            .find_map(|block| match block {
                ContentBlock::ToolUse { name, input } if name == schema.name => Some(input),
                _ => None,
            })
            .ok_or_else(|| generation_error(NAME, "response contained no tool call"))?;

        debug!("anthropic response");
        Ok(input)
    }

    pub fn name(&self) -> &str {
        NAME
    }
}
