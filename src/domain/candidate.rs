// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use serde::{Deserialize, Serialize};

/// One proposed commit message, as returned by the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Emoji glyph, e.g. "✨"
    pub gitmoji: String,
    /// Emoji code, e.g. ":sparkles:"
    pub gitmoji_code: String,
    pub message: String,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub confidence: u8,
}

impl Candidate {
    /// Trim text fields and turn blank optionals into `None`
    pub fn normalized(self) -> Self {
        fn non_blank(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            gitmoji: self.gitmoji.trim().to_string(),
            gitmoji_code: self.gitmoji_code.trim().to_string(),
            message: self.message.trim().to_string(),
            scope: non_blank(self.scope),
            description: non_blank(self.description),
            confidence: self.confidence,
        }
    }
}

/// Top-level shape of the structured response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SuggestionSet {
    pub suggestions: Vec<Candidate>,
}
