// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::sync::LazyLock;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use regex::Regex;
use tracing::debug;

use crate::domain::{ChangeFactSheet, FileChangeKind, FileStat};
use crate::error::{Error, Result};
use crate::services::git::GitService;

static BREAKING_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)breaking change|breaking|remove.*api|delete.*function").unwrap()
});

static BUGFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)fix|bug|error|issue|patch").unwrap());

static REFACTOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)refactor|restructure|reorganize|cleanup").unwrap());

// Declarations on added lines
static DECLARATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(function|class|export|fn|def|struct|trait|interface)\b").unwrap()
});

// Unified diff hunk header; an omitted count means one line
static HUNK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@@\s*-\d+(?:,(\d+))?\s+\+\d+(?:,(\d+))?\s*@@").unwrap());

static TEST_PATHS: LazyLock<GlobSet> = LazyLock::new(|| {
    build_set(&[
        "**/*.test.*",
        "**/*.spec.*",
        "**/*_test.*",
        "**/*_spec.*",
        "**/test_*",
        "**/tests/**",
        "**/test/**",
        "**/__tests__/**",
        "**/spec/**",
    ])
});

static DOC_PATHS: LazyLock<GlobSet> = LazyLock::new(|| {
    build_set(&[
        "**/*.md",
        "**/*.mdx",
        "**/*.rst",
        "**/*.adoc",
        "**/*.txt",
        "**/docs/**",
        "**/doc/**",
        "**/README*",
        "**/CHANGELOG*",
        "**/LICENSE*",
        "**/CONTRIBUTING*",
    ])
});

static CONFIG_PATHS: LazyLock<GlobSet> = LazyLock::new(|| {
    build_set(&[
        "**/*.json",
        "**/*.yaml",
        "**/*.yml",
        "**/*.toml",
        "**/*.ini",
        "**/*.cfg",
        "**/*.conf",
        "**/*.env",
        "**/*.lock",
        "**/*.config.*",
        "**/.env*",
        "**/.*rc",
        "**/.gitignore",
        "**/.editorconfig",
        "**/Dockerfile",
        "**/Makefile",
        "**/config/**",
        "**/.github/**",
    ])
});

fn build_set(patterns: &[&str]) -> GlobSet {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(
            GlobBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .unwrap(),
        );
    }
    builder.build().unwrap()
}

/// One file section of a unified diff
#[derive(Debug, Clone)]
pub struct DiffFile<'a> {
    pub stat: FileStat,
    pub added_lines: Vec<&'a str>,
}

/// Where the parser is relative to hunk bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HunkState {
    Outside,
    /// Lines still owed to the old and new side of the current hunk
    Counted { old: usize, new: usize },
    /// Header without usable counts; the body runs until the next header
    Open,
}

impl HunkState {
    fn from_header(line: &str) -> Self {
        let Some(caps) = HUNK_REGEX.captures(line) else {
            return Self::Open;
        };
        let count = |i| caps.get(i).map_or(Some(1), |m| m.as_str().parse::<usize>().ok());
        match (count(1), count(2)) {
            (Some(0), Some(0)) => Self::Outside,
            (Some(old), Some(new)) => Self::Counted { old, new },
            _ => Self::Open,
        }
    }

    /// Consume one body line of a counted hunk
    fn advance(self, line: &str) -> Self {
        let Self::Counted { mut old, mut new } = self else {
            return self;
        };
        match line.as_bytes().first() {
            Some(b'+') => new = new.saturating_sub(1),
            Some(b'-') => old = old.saturating_sub(1),
            Some(b'\\') => {}
            _ => {
                old = old.saturating_sub(1);
                new = new.saturating_sub(1);
            }
        }
        if old == 0 && new == 0 {
            Self::Outside
        } else {
            Self::Counted { old, new }
        }
    }
}

#[derive(Default)]
struct SectionBuilder<'a> {
    git_header: bool,
    seen_hunk: bool,
    header_path: Option<String>,
    old_path: Option<String>,
    new_path: Option<String>,
    insertions: usize,
    deletions: usize,
    added_lines: Vec<&'a str>,
}

impl<'a> SectionBuilder<'a> {
    fn from_git_header(rest: &str) -> Self {
        let header_path = rest
            .rsplit_once(" b/")
            .map(|(_, path)| path.trim_matches('"').to_string());
        Self {
            git_header: true,
            header_path,
            ..Self::default()
        }
    }

    fn record(&mut self, line: &'a str) {
        if let Some(added) = line.strip_prefix('+') {
            self.insertions += 1;
            self.added_lines.push(added);
        } else if line.starts_with('-') {
            self.deletions += 1;
        }
    }

    fn finish(self) -> Option<DiffFile<'a>> {
        let path = self.new_path.or(self.old_path).or(self.header_path)?;
        Some(DiffFile {
            stat: FileStat {
                path,
                insertions: self.insertions,
                deletions: self.deletions,
            },
            added_lines: self.added_lines,
        })
    }
}

/// `--- a/src/lib.rs\t2026-01-01` → `src/lib.rs`; `/dev/null` → `None`
fn header_path(raw: &str) -> Option<String> {
    let raw = raw.split('\t').next().unwrap_or(raw).trim().trim_matches('"');
    if raw == "/dev/null" || raw.is_empty() {
        return None;
    }
    let path = raw
        .strip_prefix("a/")
        .or_else(|| raw.strip_prefix("b/"))
        .unwrap_or(raw);
    Some(path.to_string())
}

pub struct ChangeAnalyzer;

impl ChangeAnalyzer {
    /// Fetch the staged diff and analyze it
    pub async fn analyze_staged(git: &GitService) -> Result<ChangeFactSheet> {
        let diff = git.staged_diff().await?;
        Self::analyze(&diff)
    }

    /// Classify a unified diff. Fails with `NoStagedChanges` when it names no files.
    pub fn analyze(diff: &str) -> Result<ChangeFactSheet> {
        if diff.trim().is_empty() {
            return Err(Error::NoStagedChanges);
        }

        let parsed = Self::parse(diff);
        if parsed.is_empty() {
            return Err(Error::NoStagedChanges);
        }

        let mut file_paths: Vec<String> = Vec::new();
        let mut file_types: Vec<String> = Vec::new();
        for file in &parsed {
            if !file_paths.contains(&file.stat.path) {
                file_paths.push(file.stat.path.clone());
            }
            if let Some(ext) = file.stat.extension() {
                if !file_types.contains(&ext) {
                    file_types.push(ext);
                }
            }
        }

        let has_kind = |kind| parsed.iter().any(|f| f.stat.kind() == Some(kind));

        let declares_symbol = parsed
            .iter()
            .flat_map(|f| f.added_lines.iter())
            .any(|line| DECLARATION_REGEX.is_match(line));

        let is_test = file_paths.iter().any(|p| TEST_PATHS.is_match(p));
        let has_non_test_path = file_paths.iter().any(|p| !TEST_PATHS.is_match(p));

        let insertions: usize = parsed.iter().map(|f| f.stat.insertions).sum();
        let deletions: usize = parsed.iter().map(|f| f.stat.deletions).sum();

        let sheet = ChangeFactSheet {
            has_new_files: has_kind(FileChangeKind::New),
            has_deleted_files: has_kind(FileChangeKind::Deleted),
            has_modified_files: has_kind(FileChangeKind::Modified),
            is_feature: declares_symbol || has_non_test_path,
            is_bugfix: BUGFIX_REGEX.is_match(diff),
            is_refactor: REFACTOR_REGEX.is_match(diff),
            is_documentation: file_paths.iter().any(|p| DOC_PATHS.is_match(p)),
            is_test,
            is_config: file_paths.iter().any(|p| CONFIG_PATHS.is_match(p)),
            is_breaking: BREAKING_REGEX.is_match(diff),
            summary: Self::summarize(file_paths.len(), insertions, deletions),
            files: parsed.into_iter().map(|f| f.stat).collect(),
            file_paths,
            file_types,
            diff: diff.to_string(),
        };

        debug!(
            files = sheet.files.len(),
            insertions,
            deletions,
            signals = ?sheet.signals(),
            "diff analyzed"
        );

        Ok(sheet)
    }

    /// `Modified 2 files with 1 addition and 0 deletions`
    pub fn summarize(files: usize, insertions: usize, deletions: usize) -> String {
        format!(
            "Modified {} with {} and {}",
            plural(files, "file"),
            plural(insertions, "addition"),
            plural(deletions, "deletion"),
        )
    }

    /// Split a unified diff into per-file sections with line counts.
    ///
    /// Files are delimited by `diff --git` headers, or by `---`/`+++` pairs
    /// for plain unified diffs. Hunk bodies are sized by their `@@` header,
    /// so content lines that look like file headers stay in their hunk.
    pub fn parse(diff: &str) -> Vec<DiffFile<'_>> {
        let mut files = Vec::new();
        let mut current: Option<SectionBuilder<'_>> = None;
        let mut hunk = HunkState::Outside;
        let mut lines = diff.lines().peekable();

        while let Some(line) = lines.next() {
            if let Some(rest) = line.strip_prefix("diff --git ") {
                files.extend(current.take().and_then(SectionBuilder::finish));
                current = Some(SectionBuilder::from_git_header(rest));
                hunk = HunkState::Outside;
                continue;
            }

            match hunk {
                HunkState::Counted { .. } => {
                    if let Some(section) = current.as_mut() {
                        section.record(line);
                    }
                    hunk = hunk.advance(line);
                    continue;
                }
                HunkState::Open => {
                    let plain = current.as_ref().is_none_or(|s| !s.git_header);
                    let next_is_new_header = plain
                        && line.starts_with("--- ")
                        && lines.peek().is_some_and(|next| next.starts_with("+++ "));

                    if next_is_new_header {
                        hunk = HunkState::Outside;
                    } else if !line.starts_with("@@") {
                        if let Some(section) = current.as_mut() {
                            section.record(line);
                        }
                        continue;
                    }
                }
                HunkState::Outside => {}
            }

            if line.starts_with("@@") {
                current.get_or_insert_with(SectionBuilder::default).seen_hunk = true;
                hunk = HunkState::from_header(line);
            } else if let Some(raw) = line.strip_prefix("--- ") {
                if current.as_ref().is_some_and(|s| s.seen_hunk) {
                    files.extend(current.take().and_then(SectionBuilder::finish));
                }
                current.get_or_insert_with(SectionBuilder::default).old_path = header_path(raw);
            } else if let Some(raw) = line.strip_prefix("+++ ") {
                current.get_or_insert_with(SectionBuilder::default).new_path = header_path(raw);
            }
        }

        files.extend(current.and_then(SectionBuilder::finish));
        files
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
