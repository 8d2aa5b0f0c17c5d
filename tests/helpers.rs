// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use gitmoji_msg::domain::Candidate;

/// One `diff --git` section in the shape `git diff --cached` produces.
///
/// A file with no removed lines is rendered as newly created, one with no
/// added lines as deleted.
#[allow(dead_code)]
pub fn file_diff(path: &str, added: &[&str], removed: &[&str]) -> String {
    let old = if removed.is_empty() && !added.is_empty() {
        "/dev/null".to_string()
    } else {
        format!("a/{path}")
    };
    let new = if added.is_empty() && !removed.is_empty() {
        "/dev/null".to_string()
    } else {
        format!("b/{path}")
    };

    let mut diff = format!(
        "diff --git a/{path} b/{path}\nindex 1111111..2222222 100644\n\
         --- {old}\n+++ {new}\n@@ -1,{} +1,{} @@\n",
        removed.len(),
        added.len()
    );
    for line in removed {
        diff.push_str(&format!("-{line}\n"));
    }
    for line in added {
        diff.push_str(&format!("+{line}\n"));
    }
    diff
}

/// Concatenate file sections into one diff
#[allow(dead_code)]
pub fn combine(sections: &[String]) -> String {
    sections.concat()
}

#[allow(dead_code)]
pub fn candidate(gitmoji: &str, code: &str, message: &str) -> Candidate {
    Candidate {
        gitmoji: gitmoji.into(),
        gitmoji_code: code.into(),
        message: message.into(),
        scope: None,
        description: None,
        confidence: 90,
    }
}
