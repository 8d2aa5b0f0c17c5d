// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

#![no_main]

use libfuzzer_sys::fuzz_target;

use gitmoji_msg::services::analyzer::ChangeAnalyzer;

fuzz_target!(|data: &str| {
    let files = ChangeAnalyzer::parse(data);

    if let Ok(sheet) = ChangeAnalyzer::analyze(data) {
        assert_eq!(sheet.files.len(), files.len());
        assert!(!sheet.file_paths.is_empty());
    }
});
