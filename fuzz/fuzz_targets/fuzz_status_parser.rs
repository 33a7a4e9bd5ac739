// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

#![no_main]

use libfuzzer_sys::fuzz_target;

use gitsplain::services::git::{parse_untracked, unquote_path};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let paths = parse_untracked(s);
        assert!(paths.len() <= s.lines().count());
        let _ = unquote_path(s);
    }
});
