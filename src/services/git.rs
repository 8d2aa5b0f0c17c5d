// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::path::PathBuf;

use tokio::process::Command;
use tracing::debug;

use crate::error::{Error, Result};

/// One line of `git status --porcelain=v1`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub index: char,
    pub worktree: char,
    pub path: String,
}

impl StatusEntry {
    pub fn parse_porcelain(output: &str) -> Vec<Self> {
        output
            .lines()
            .filter_map(|line| {
                let mut chars = line.chars();
                let index = chars.next()?;
                let worktree = chars.next()?;
                let rest = line.get(3..)?.trim();
                if rest.is_empty() {
                    return None;
                }
                // Renames and copies: "R  old -> new"
                let path = rest
                    .rsplit_once(" -> ")
                    .map_or(rest, |(_, new)| new)
                    .trim_matches('"');
                Some(Self {
                    index,
                    worktree,
                    path: path.to_string(),
                })
            })
            .collect()
    }

    pub fn is_staged(&self) -> bool {
        !matches!(self.index, ' ' | '?' | '!')
    }

    pub fn is_untracked(&self) -> bool {
        self.index == '?' && self.worktree == '?'
    }

    /// Status glyph shown next to the path in `run`
    pub fn indicator(&self) -> &'static str {
        if self.is_untracked() {
            return "❓";
        }
        match (self.index, self.worktree) {
            ('A', _) => "➕",
            ('M', _) | (_, 'M') => "📝",
            ('D', _) | (_, 'D') => "🗑️",
            ('R', _) => "🚚",
            ('C', _) => "📋",
            _ => "📄",
        }
    }
}

pub struct GitService {
    work_dir: PathBuf,
}

impl GitService {
    pub fn discover() -> Result<Self> {
        let repo = gix::discover(".").map_err(|_| Error::NotAGitRepo)?;

        let work_dir = repo
            .workdir()
            .ok_or_else(|| Error::Git("Bare repository not supported".into()))?
            .to_path_buf();

        debug!(work_dir = %work_dir.display(), "repository discovered");
        Ok(Self { work_dir })
    }

    async fn git(&self, args: &[&str]) -> Result<String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.work_dir)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Git(stderr.trim().to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    pub async fn status(&self) -> Result<Vec<StatusEntry>> {
        let output = self
            .git(&["status", "--porcelain=v1", "--untracked-files=all"])
            .await?;
        Ok(StatusEntry::parse_porcelain(&output))
    }

    /// Diff of the index against HEAD; fails when nothing is staged
    pub async fn staged_diff(&self) -> Result<String> {
        let staged = self
            .status()
            .await?
            .iter()
            .filter(|e| e.is_staged())
            .count();

        if staged == 0 {
            return Err(Error::NoStagedChanges);
        }

        let diff = self
            .git(&["diff", "--cached", "--no-ext-diff", "--no-color", "--unified=3"])
            .await?;
        debug!(staged, diff_len = diff.len(), "staged diff fetched");
        Ok(diff)
    }

    /// Unstaged changes to tracked files
    pub async fn working_diff(&self) -> Result<String> {
        self.git(&["diff", "--no-ext-diff", "--no-color", "--unified=3"])
            .await
    }

    pub async fn add_all(&self) -> Result<()> {
        self.git(&["add", "."]).await?;
        Ok(())
    }

    pub async fn commit(&self, message: &str) -> Result<()> {
        self.git(&["commit", "-m", message]).await?;
        Ok(())
    }

    pub async fn head_short_hash(&self) -> Option<String> {
        self.git(&["rev-parse", "--short", "HEAD"])
            .await
            .ok()
            .map(|hash| hash.trim().to_string())
            .filter(|hash| !hash.is_empty())
    }
}
