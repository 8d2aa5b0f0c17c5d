// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use crate::domain::Candidate;
use crate::error::{Error, Result};

pub struct CommitFormatter;

impl CommitFormatter {
    /// Explicit scope wins over the one the model suggested
    pub fn effective_scope<'a>(
        explicit: Option<&'a str>,
        candidate: &'a Candidate,
    ) -> Option<&'a str> {
        explicit
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .or(candidate.scope.as_deref())
    }

    /// `(scope): message`, or just `message` without a scope
    pub fn subject(candidate: &Candidate, scope: Option<&str>) -> String {
        match Self::effective_scope(scope, candidate) {
            Some(scope) => format!("({}): {}", scope, candidate.message),
            None => candidate.message.clone(),
        }
    }

    /// `{glyph} [(scope): ]{message}`
    pub fn title(candidate: &Candidate, scope: Option<&str>) -> String {
        format!("{} {}", candidate.gitmoji, Self::subject(candidate, scope))
    }

    /// Title plus the description as a second paragraph
    pub fn full_message(candidate: &Candidate, scope: Option<&str>) -> String {
        let title = Self::title(candidate, scope);
        match &candidate.description {
            Some(description) => format!("{title}\n\n{description}"),
            None => title,
        }
    }

    /// Entry shown in the interactive picker
    pub fn choice_label(candidate: &Candidate, scope: Option<&str>) -> String {
        let mut label = format!(
            "{} ({}% confidence)",
            Self::title(candidate, scope),
            candidate.confidence
        );
        if let Some(description) = &candidate.description {
            label.push_str(&format!("\n    📝 {description}"));
        }
        label
    }

    /// Equivalent `git commit` invocation for the operator to copy
    pub fn commit_command(candidate: &Candidate, scope: Option<&str>) -> String {
        let title = shell_quote(&Self::title(candidate, scope));
        match &candidate.description {
            Some(description) => {
                format!("git commit -m {title} -m {}", shell_quote(description))
            }
            None => format!("git commit -m {title}"),
        }
    }

    /// Pick a candidate.
    ///
    /// With `interactive` and more than one candidate, `choose` receives the
    /// labels and returns the chosen index (default 0); otherwise the first
    /// candidate wins.
    pub fn select<'a, F>(
        candidates: &'a [Candidate],
        scope: Option<&str>,
        interactive: bool,
        choose: F,
    ) -> Result<&'a Candidate>
    where
        F: FnOnce(&[String]) -> Result<usize>,
    {
        let Some(first) = candidates.first() else {
            return Err(Error::Generation {
                provider: "selection".into(),
                message: "no suggestions to choose from".into(),
            });
        };

        if !interactive || candidates.len() == 1 {
            return Ok(first);
        }

        let labels: Vec<String> = candidates
            .iter()
            .map(|c| Self::choice_label(c, scope))
            .collect();

        let index = choose(&labels)?;
        candidates.get(index).ok_or_else(|| {
            Error::Dialog(format!(
                "selection {index} out of range (1-{})",
                candidates.len()
            ))
        })
    }
}

fn shell_quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', r"'\''"))
}
