// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileChangeKind {
    New,
    Deleted,
    Modified,
}

/// Line counts for one file section of a diff
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStat {
    pub path: String,
    pub insertions: usize,
    pub deletions: usize,
}

impl FileStat {
    /// `None` when nothing was counted (binary or mode-only changes)
    pub fn kind(&self) -> Option<FileChangeKind> {
        match (self.insertions > 0, self.deletions > 0) {
            (true, false) => Some(FileChangeKind::New),
            (false, true) => Some(FileChangeKind::Deleted),
            (true, true) => Some(FileChangeKind::Modified),
            (false, false) => None,
        }
    }

    /// Lowercased text after the last `.` of the file name
    pub fn extension(&self) -> Option<String> {
        let name = self.path.rsplit('/').next().unwrap_or(&self.path);
        name.rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .filter(|ext| !ext.is_empty())
    }
}

/// Everything the heuristics learned about one diff
#[derive(Debug, Clone)]
pub struct ChangeFactSheet {
    pub files: Vec<FileStat>,
    pub file_paths: Vec<String>,
    pub file_types: Vec<String>,
    pub has_new_files: bool,
    pub has_deleted_files: bool,
    pub has_modified_files: bool,
    pub is_feature: bool,
    pub is_bugfix: bool,
    pub is_refactor: bool,
    pub is_documentation: bool,
    pub is_test: bool,
    pub is_config: bool,
    pub is_breaking: bool,
    pub summary: String,
    pub diff: String,
}

impl ChangeFactSheet {
    pub fn total_insertions(&self) -> usize {
        self.files.iter().map(|f| f.insertions).sum()
    }

    pub fn total_deletions(&self) -> usize {
        self.files.iter().map(|f| f.deletions).sum()
    }

    /// Names of the signal flags that are set, for prompts and logs
    pub fn signals(&self) -> Vec<&'static str> {
        [
            (self.has_new_files, "new files"),
            (self.has_deleted_files, "deleted files"),
            (self.has_modified_files, "modified files"),
            (self.is_feature, "feature"),
            (self.is_bugfix, "bugfix"),
            (self.is_refactor, "refactor"),
            (self.is_documentation, "documentation"),
            (self.is_test, "tests"),
            (self.is_config, "configuration"),
            (self.is_breaking, "breaking change"),
        ]
        .into_iter()
        .filter_map(|(set, name)| set.then_some(name))
        .collect()
    }
}
