// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

#![no_main]

use libfuzzer_sys::fuzz_target;

use gitsplain::services::render::render_markdown;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let out = render_markdown(s, false);
        assert!(out.ends_with('\n'));
        assert!(!out.contains('\u{1b}') || s.contains('\u{1b}'));
    }
});
