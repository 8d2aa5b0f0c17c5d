// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gitmoji {
    pub emoji: &'static str,
    pub code: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

impl std::fmt::Display for Gitmoji {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}: {}", self.emoji, self.code, self.description)
    }
}

const fn gitmoji(
    emoji: &'static str,
    code: &'static str,
    name: &'static str,
    description: &'static str,
) -> Gitmoji {
    Gitmoji {
        emoji,
        code,
        name,
        description,
    }
}

/// The gitmoji reference table, in gitmoji.dev order
pub static GITMOJIS: &[Gitmoji] = &[
    gitmoji("🎨", ":art:", "art", "Improve structure / format of the code."),
    gitmoji("⚡️", ":zap:", "zap", "Improve performance."),
    gitmoji("🔥", ":fire:", "fire", "Remove code or files."),
    gitmoji("🐛", ":bug:", "bug", "Fix a bug."),
    gitmoji("🚑️", ":ambulance:", "ambulance", "Critical hotfix."),
    gitmoji("✨", ":sparkles:", "sparkles", "Introduce new features."),
    gitmoji("📝", ":memo:", "memo", "Add or update documentation."),
    gitmoji("🚀", ":rocket:", "rocket", "Deploy stuff."),
    gitmoji("💄", ":lipstick:", "lipstick", "Add or update the UI and style files."),
    gitmoji("🎉", ":tada:", "tada", "Begin a project."),
    gitmoji("✅", ":white_check_mark:", "white-check-mark", "Add, update, or pass tests."),
    gitmoji("🔒️", ":lock:", "lock", "Fix security or privacy issues."),
    gitmoji("🔐", ":closed_lock_with_key:", "closed-lock-with-key", "Add or update secrets."),
    gitmoji("🔖", ":bookmark:", "bookmark", "Release / Version tags."),
    gitmoji("🚨", ":rotating_light:", "rotating-light", "Fix compiler / linter warnings."),
    gitmoji("🚧", ":construction:", "construction", "Work in progress."),
    gitmoji("💚", ":green_heart:", "green-heart", "Fix CI Build."),
    gitmoji("⬇️", ":arrow_down:", "arrow-down", "Downgrade dependencies."),
    gitmoji("⬆️", ":arrow_up:", "arrow-up", "Upgrade dependencies."),
    gitmoji("📌", ":pushpin:", "pushpin", "Pin dependencies to specific versions."),
    gitmoji(
        "👷",
        ":construction_worker:",
        "construction-worker",
        "Add or update CI build system.",
    ),
    gitmoji(
        "📈",
        ":chart_with_upwards_trend:",
        "chart-with-upwards-trend",
        "Add or update analytics or track code.",
    ),
    gitmoji("♻️", ":recycle:", "recycle", "Refactor code."),
    gitmoji("➕", ":heavy_plus_sign:", "heavy-plus-sign", "Add a dependency."),
    gitmoji("➖", ":heavy_minus_sign:", "heavy-minus-sign", "Remove a dependency."),
    gitmoji("🔧", ":wrench:", "wrench", "Add or update configuration files."),
    gitmoji("🔨", ":hammer:", "hammer", "Add or update development scripts."),
    gitmoji(
        "🌐",
        ":globe_with_meridians:",
        "globe-with-meridians",
        "Internationalization and localization.",
    ),
    gitmoji("✏️", ":pencil2:", "pencil2", "Fix typos."),
    gitmoji("💩", ":poop:", "poop", "Write bad code that needs to be improved."),
    gitmoji("⏪️", ":rewind:", "rewind", "Revert changes."),
    gitmoji("🔀", ":twisted_rightwards_arrows:", "twisted-rightwards-arrows", "Merge branches."),
    gitmoji("📦️", ":package:", "package", "Add or update compiled files or packages."),
    gitmoji("👽️", ":alien:", "alien", "Update code due to external API changes."),
    gitmoji("🚚", ":truck:", "truck", "Move or rename resources (e.g.: files, paths, routes)."),
    gitmoji("📄", ":page_facing_up:", "page-facing-up", "Add or update license."),
    gitmoji("💥", ":boom:", "boom", "Introduce breaking changes."),
    gitmoji("🍱", ":bento:", "bento", "Add or update assets."),
    gitmoji("♿️", ":wheelchair:", "wheelchair", "Improve accessibility."),
    gitmoji("💡", ":bulb:", "bulb", "Add or update comments in source code."),
    gitmoji("🍻", ":beers:", "beers", "Write code drunkenly."),
    gitmoji("💬", ":speech_balloon:", "speech-balloon", "Add or update text and literals."),
    gitmoji("🗃️", ":card_file_box:", "card-file-box", "Perform database related changes."),
    gitmoji("🔊", ":loud_sound:", "loud-sound", "Add or update logs."),
    gitmoji("🔇", ":mute:", "mute", "Remove logs."),
    gitmoji(
        "👥",
        ":busts_in_silhouette:",
        "busts-in-silhouette",
        "Add or update contributor(s).",
    ),
    gitmoji(
        "🚸",
        ":children_crossing:",
        "children-crossing",
        "Improve user experience / usability.",
    ),
    gitmoji(
        "🏗️",
        ":building_construction:",
        "building-construction",
        "Make architectural changes.",
    ),
    gitmoji("📱", ":iphone:", "iphone", "Work on responsive design."),
    gitmoji("🤡", ":clown_face:", "clown-face", "Mock things."),
    gitmoji("🥚", ":egg:", "egg", "Add or update an easter egg."),
    gitmoji("🙈", ":see_no_evil:", "see-no-evil", "Add or update a .gitignore file."),
    gitmoji("📸", ":camera_flash:", "camera-flash", "Add or update snapshots."),
    gitmoji("⚗️", ":alembic:", "alembic", "Perform experiments."),
    gitmoji("🔍️", ":mag:", "mag", "Improve SEO."),
    gitmoji("🏷️", ":label:", "label", "Add or update types."),
    gitmoji("🌱", ":seedling:", "seedling", "Add or update seed files."),
    gitmoji(
        "🚩",
        ":triangular_flag_on_post:",
        "triangular-flag-on-post",
        "Add, update, or remove feature flags.",
    ),
    gitmoji("🥅", ":goal_net:", "goal-net", "Catch errors."),
    gitmoji("💫", ":dizzy:", "dizzy", "Add or update animations and transitions."),
    gitmoji(
        "🗑️",
        ":wastebasket:",
        "wastebasket",
        "Deprecate code that needs to be cleaned up.",
    ),
    gitmoji(
        "🛂",
        ":passport_control:",
        "passport-control",
        "Work on code related to authorization, roles and permissions.",
    ),
    gitmoji(
        "🩹",
        ":adhesive_bandage:",
        "adhesive-bandage",
        "Simple fix for a non-critical issue.",
    ),
    gitmoji("🧐", ":monocle_face:", "monocle-face", "Data exploration/inspection."),
    gitmoji("⚰️", ":coffin:", "coffin", "Remove dead code."),
    gitmoji("🧪", ":test_tube:", "test-tube", "Add a failing test."),
    gitmoji("👔", ":necktie:", "necktie", "Add or update business logic."),
    gitmoji("🩺", ":stethoscope:", "stethoscope", "Add or update healthcheck."),
    gitmoji("🧱", ":bricks:", "bricks", "Infrastructure related changes."),
    gitmoji("🧑‍💻", ":technologist:", "technologist", "Improve developer experience."),
    gitmoji(
        "💸",
        ":money_with_wings:",
        "money-with-wings",
        "Add sponsorships or money related infrastructure.",
    ),
    gitmoji(
        "🧵",
        ":thread:",
        "thread",
        "Add or update code related to multithreading or concurrency.",
    ),
    gitmoji("🦺", ":safety_vest:", "safety-vest", "Add or update code related to validation."),
    gitmoji("✈️", ":airplane:", "airplane", "Improve offline support."),
];

/// Category name to gitmoji codes, sorted by name.
///
/// Some codes (`:gear:`, `:racehorse:`, `:whale:`) are not in the table and
/// simply never match.
pub static CATEGORIES: &[(&str, &[&str])] = &[
    ("breaking", &[":boom:"]),
    ("bug", &[":bug:", ":ambulance:", ":adhesive_bandage:", ":green_heart:"]),
    ("build", &[":construction_worker:", ":green_heart:", ":arrow_up:", ":arrow_down:"]),
    ("chore", &[":wrench:", ":hammer:", ":gear:", ":package:"]),
    ("ci", &[":construction_worker:", ":green_heart:", ":whale:"]),
    ("config", &[":wrench:", ":gear:", ":heavy_plus_sign:", ":heavy_minus_sign:"]),
    ("deps", &[":arrow_up:", ":arrow_down:", ":heavy_plus_sign:", ":heavy_minus_sign:"]),
    ("docs", &[":memo:", ":bulb:", ":card_file_box:", ":children_crossing:"]),
    ("feature", &[":sparkles:", ":zap:", ":construction:", ":heavy_plus_sign:"]),
    ("hotfix", &[":ambulance:", ":fire:"]),
    ("perf", &[":zap:", ":racehorse:", ":chart_with_upwards_trend:"]),
    ("refactor", &[":recycle:", ":truck:", ":fire:", ":wastebasket:"]),
    ("release", &[":bookmark:", ":rocket:", ":tada:"]),
    ("revert", &[":rewind:"]),
    ("security", &[":lock:", ":passport_control:"]),
    ("style", &[":art:", ":lipstick:", ":rotating_light:", ":recycle:"]),
    ("test", &[":white_check_mark:", ":construction_worker:", ":green_heart:"]),
    ("wip", &[":construction:"]),
];

pub fn find_by_code(code: &str) -> Option<&'static Gitmoji> {
    GITMOJIS.iter().find(|g| g.code == code)
}

pub fn category_names() -> Vec<&'static str> {
    CATEGORIES.iter().map(|(name, _)| *name).collect()
}

pub fn category_codes(category: &str) -> Option<&'static [&'static str]> {
    let category = category.to_lowercase();
    CATEGORIES
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, codes)| *codes)
}

impl Gitmoji {
    /// Case-insensitive substring match on description, code or name
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.description.to_lowercase().contains(&term)
            || self.code.to_lowercase().contains(&term)
            || self.name.to_lowercase().contains(&term)
    }
}

/// Apply the `list` command filters, keeping table order
pub fn filter(search: Option<&str>, category: Option<&str>) -> Result<Vec<&'static Gitmoji>> {
    let codes = match category {
        Some(category) => Some(category_codes(category).ok_or_else(|| Error::UnknownCategory {
            category: category.to_string(),
            available: category_names().into_iter().map(String::from).collect(),
        })?),
        None => None,
    };

    Ok(GITMOJIS
        .iter()
        .filter(|g| search.is_none_or(|term| g.matches(term)))
        .filter(|g| codes.is_none_or(|codes| codes.contains(&g.code)))
        .collect())
}

/// One `{emoji} {code}: {description}` line per entry, as embedded in prompts
pub fn reference_table() -> String {
    GITMOJIS
        .iter()
        .map(|g| g.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
