// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

mod candidate;
mod change;
pub mod gitmoji;

pub use candidate::*;
pub use change::*;
pub use gitmoji::Gitmoji;
