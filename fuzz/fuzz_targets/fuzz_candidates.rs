// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

#![no_main]

use libfuzzer_sys::fuzz_target;

use gitmoji_msg::services::suggest::{MAX_SUGGESTIONS, SuggestionRequester};

fuzz_target!(|data: &str| {
    let Ok(value) = serde_json::from_str(data) else {
        return;
    };

    if let Ok(candidates) = SuggestionRequester::parse_candidates("fuzz", value) {
        assert!((1..=MAX_SUGGESTIONS).contains(&candidates.len()));
        assert!(candidates.iter().all(|c| c.confidence <= 100 && !c.message.is_empty()));
    }
});
