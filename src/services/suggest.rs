// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use serde_json::{Value, json};
use tracing::debug;

use crate::config::Config;
use crate::domain::{Candidate, ChangeFactSheet, SuggestionSet, gitmoji};
use crate::error::Result;
use crate::services::llm::{self, LlmProvider, ResponseSchema, generation_error};

/// Diff characters embedded in the prompt (~4 chars per token)
pub const MAX_DIFF_CHARS: usize = 24_000;

pub const MAX_SUGGESTIONS: usize = 3;

pub struct SuggestionRequester {
    provider: LlmProvider,
}

impl SuggestionRequester {
    pub fn new(provider: LlmProvider) -> Self {
        Self { provider }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(llm::create_provider(config)?))
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// One remote call; candidates come back in model-ranked order
    pub async fn request(&self, sheet: &ChangeFactSheet) -> Result<Vec<Candidate>> {
        let prompt = Self::build_prompt(sheet);
        debug!(
            prompt_chars = prompt.len(),
            provider = self.provider.name(),
            "requesting suggestions"
        );

        let value = self
            .provider
            .generate_structured(&prompt, &Self::response_schema())
            .await?;

        Self::parse_candidates(self.provider.name(), value)
    }

    /// Validate the structured response against the 1–3 candidate contract
    pub fn parse_candidates(provider: &str, value: Value) -> Result<Vec<Candidate>> {
        let set: SuggestionSet = serde_json::from_value(value).map_err(|e| {
            generation_error(provider, format!("response does not match schema: {e}"))
        })?;

        if set.suggestions.is_empty() {
            return Err(generation_error(provider, "model returned no suggestions"));
        }
        if set.suggestions.len() > MAX_SUGGESTIONS {
            return Err(generation_error(
                provider,
                format!(
                    "model returned {} suggestions, expected at most {MAX_SUGGESTIONS}",
                    set.suggestions.len()
                ),
            ));
        }
        if let Some(bad) = set.suggestions.iter().find(|c| c.confidence > 100) {
            return Err(generation_error(
                provider,
                format!("confidence {} is outside 0-100", bad.confidence),
            ));
        }

        let candidates: Vec<Candidate> = set
            .suggestions
            .into_iter()
            .map(Candidate::normalized)
            .collect();

        if candidates.iter().any(|c| c.message.is_empty() || c.gitmoji.is_empty()) {
            return Err(generation_error(provider, "suggestion with empty message or gitmoji"));
        }

        debug!(count = candidates.len(), "suggestions parsed");
        Ok(candidates)
    }

    pub fn response_schema() -> ResponseSchema {
        let candidate = json!({
            "type": "object",
            "properties": {
                "gitmoji": {
                    "type": "string",
                    "description": "The gitmoji emoji character (e.g., \"🎨\")"
                },
                "gitmojiCode": {
                    "type": "string",
                    "description": "The gitmoji code (e.g., \":art:\")"
                },
                "scope": {
                    "type": ["string", "null"],
                    "description": "Optional scope without parentheses (e.g. \"api\", \"ui\")"
                },
                "message": {
                    "type": "string",
                    "description": "Brief explanation of the change, without emoji or scope"
                },
                "description": {
                    "type": ["string", "null"],
                    "description": "Concise technical description, only for substantial changes"
                },
                "confidence": {
                    "type": "integer",
                    "minimum": 0,
                    "maximum": 100,
                    "description": "Confidence score 0-100"
                }
            },
            "required": ["gitmoji", "gitmojiCode", "scope", "message", "description", "confidence"],
            "additionalProperties": false
        });

        ResponseSchema {
            name: "commit_suggestions",
            description: "1-3 ranked gitmoji commit message suggestions",
            schema: json!({
                "type": "object",
                "properties": {
                    "suggestions": {
                        "type": "array",
                        "items": candidate,
                        "minItems": 1,
                        "maxItems": MAX_SUGGESTIONS,
                        "description": "1-3 ranked commit message suggestions, best first"
                    }
                },
                "required": ["suggestions"],
                "additionalProperties": false
            }),
        }
    }

    pub fn build_prompt(sheet: &ChangeFactSheet) -> String {
        let signals = sheet.signals();
        let signals = if signals.is_empty() {
            "none".to_string()
        } else {
            signals.join(", ")
        };

        format!(
            r#"You are an expert at creating conventional commit messages using gitmojis.

AVAILABLE GITMOJIS:
{gitmojis}

FILES CHANGED: {files}
FILE TYPES: {types}
SUMMARY: {summary}
DETECTED SIGNALS: {signals}

GIT DIFF:
{diff}

INSTRUCTIONS:
1. Analyze the git diff and select the most appropriate gitmoji
2. Break down the commit message into separate components:
   - gitmoji: The emoji character
   - gitmojiCode: The :code: version
   - scope: Optional scope without parentheses ("api", "ui", "auth"), only if applicable
   - message: Brief explanation (lowercase, no period, specific action)
3. Message requirements:
   - Be concise and specific about what changed
   - Start with verb (add, fix, update, remove, refactor)
   - No emoji, no scope, no fluff
   - Examples: "add user authentication", "fix memory leak in parser", "update API endpoints"
4. Description requirements:
   - Only include if changes are substantial/complex
   - Be information-dense, no marketing speak
   - Focus on technical details: what changed, why, impact
   - Keep short if changes are simple
5. Scope guidelines:
   - Only use if change is clearly bounded to a specific area
   - Use common terms: api, ui, auth, db, config, cli, docs
   - Leave empty for general/mixed changes
6. Return 1-3 suggestions ranked best first, with confidence based on gitmoji appropriateness

Generate commit message suggestions now:"#,
            gitmojis = gitmoji::reference_table(),
            files = sheet.file_paths.join(", "),
            types = sheet.file_types.join(", "),
            summary = sheet.summary,
            diff = truncate_diff(&sheet.diff, MAX_DIFF_CHARS),
        )
    }
}

/// Cut at the last line boundary within `max` characters
pub fn truncate_diff(diff: &str, max: usize) -> String {
    let Some((limit, _)) = diff.char_indices().nth(max) else {
        return diff.to_string();
    };
    let end = diff[..limit].rfind('\n').unwrap_or(limit);

    format!(
        "{}\n... (diff truncated, {} more characters)",
        &diff[..end],
        diff[end..].chars().count()
    )
}
